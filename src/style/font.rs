use std::fmt;

/// The ten decorative script faces a signature can be drawn with.
///
/// Order is fixed; uniform selection indexes into [`SignatureFont::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SignatureFont {
    #[serde(rename = "Pacifico")]
    Pacifico,
    #[serde(rename = "Dancing Script")]
    DancingScript,
    #[serde(rename = "Great Vibes")]
    GreatVibes,
    #[serde(rename = "Allura")]
    Allura,
    #[serde(rename = "Satisfy")]
    Satisfy,
    #[serde(rename = "Sacramento")]
    Sacramento,
    #[serde(rename = "Alex Brush")]
    AlexBrush,
    #[serde(rename = "Yellowtail")]
    Yellowtail,
    #[serde(rename = "Marck Script")]
    MarckScript,
    #[serde(rename = "Kaushan Script")]
    KaushanScript,
}

impl SignatureFont {
    pub const ALL: [SignatureFont; 10] = [
        Self::Pacifico,
        Self::DancingScript,
        Self::GreatVibes,
        Self::Allura,
        Self::Satisfy,
        Self::Sacramento,
        Self::AlexBrush,
        Self::Yellowtail,
        Self::MarckScript,
        Self::KaushanScript,
    ];

    /// Family name as published by the font files.
    pub fn family_name(self) -> &'static str {
        match self {
            Self::Pacifico => "Pacifico",
            Self::DancingScript => "Dancing Script",
            Self::GreatVibes => "Great Vibes",
            Self::Allura => "Allura",
            Self::Satisfy => "Satisfy",
            Self::Sacramento => "Sacramento",
            Self::AlexBrush => "Alex Brush",
            Self::Yellowtail => "Yellowtail",
            Self::MarckScript => "Marck Script",
            Self::KaushanScript => "Kaushan Script",
        }
    }
}

impl fmt::Display for SignatureFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family_name())
    }
}

/// A font request as held by a drawing surface: family, pixel size and slant/weight.
///
/// Families that cannot be resolved fall back to a generic cursive face at raster time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f32,
    pub italic: bool,
    pub bold: bool,
}

impl FontSpec {
    /// Italic bold request, the way every signature is set.
    pub fn signature(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            family: family.into(),
            size_px,
            italic: true,
            bold: true,
        }
    }

    /// CSS shorthand, e.g. `italic bold 70px "Pacifico", cursive`.
    pub fn css(&self) -> String {
        let mut out = String::new();
        if self.italic {
            out.push_str("italic ");
        }
        if self.bold {
            out.push_str("bold ");
        }
        out.push_str(&format!("{}px \"{}\", cursive", self.size_px, self.family));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/font.rs"]
mod tests;
