use crate::foundation::core::Rgba8;

/// Locked palette of dark ink colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkColor {
    Black,
    DarkBlue,
    Charcoal,
    DeepGreen,
}

impl InkColor {
    pub const ALL: [InkColor; 4] = [Self::Black, Self::DarkBlue, Self::Charcoal, Self::DeepGreen];

    pub fn rgba(self) -> Rgba8 {
        match self {
            Self::Black => Rgba8::opaque(0x11, 0x18, 0x27),
            Self::DarkBlue => Rgba8::opaque(0x1E, 0x3A, 0x8A),
            Self::Charcoal => Rgba8::opaque(0x37, 0x41, 0x51),
            Self::DeepGreen => Rgba8::opaque(0x06, 0x5F, 0x46),
        }
    }

    /// `#RRGGBB` form of [`Self::rgba`].
    pub fn hex(self) -> String {
        self.rgba().to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/ink.rs"]
mod tests;
