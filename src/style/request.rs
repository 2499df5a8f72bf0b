use std::fmt;

/// A trimmed, non-empty name ready to be rendered.
///
/// Empty and whitespace-only input never produces a request, so nothing downstream has to
/// re-check it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderRequest {
    text: String,
}

impl RenderRequest {
    /// Trim `raw`; `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_owned(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters that will be revealed, spaces included.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for RenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/request.rs"]
mod tests;
