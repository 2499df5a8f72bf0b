use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    foundation::error::{AutographError, AutographResult},
    layout::measure::GlyphMeasure,
    style::font::FontSpec,
};

#[derive(Clone)]
/// One loaded font file and the family name read from its data.
pub struct FontFace {
    family: String,
    source: Option<PathBuf>,
    bytes: Arc<Vec<u8>>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("source", &self.source)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    pub fn family(&self) -> &str {
        &self.family
    }

    /// File the face was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }
}

/// Set of font faces keyed by family, with a fallback for unknown families.
///
/// One face is kept per family (the first one added). Requests for a family that is not
/// present resolve to the fallback family, or to the first loaded face.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    faces: Vec<FontFace>,
    fallback_family: Option<String>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.ttf` / `*.otf` file in `dir` (non-recursive, sorted by path).
    ///
    /// Unreadable or unparsable files are skipped with a warning.
    #[tracing::instrument]
    pub fn load_dir(dir: &Path) -> AutographResult<Self> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            AutographError::font(format!("read font dir '{}': {e}", dir.display()))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_font_file(p))
            .collect();
        paths.sort();

        let mut book = Self::new();
        for path in paths {
            let bytes = match std::fs::read(&path) {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
                    continue;
                }
            };
            if let Err(e) = book.add_bytes(bytes, Some(path.clone())) {
                tracing::warn!(path = %path.display(), error = %e, "skipping font");
            }
        }
        tracing::debug!(faces = book.len(), "font directory loaded");
        Ok(book)
    }

    /// Register raw font bytes; returns the detected family name.
    pub fn add_bytes(&mut self, bytes: Vec<u8>, source: Option<PathBuf>) -> AutographResult<String> {
        let family = detect_family_name(&bytes)?;
        if self.find(&family).is_some() {
            tracing::debug!(family, "family already loaded, keeping first face");
            return Ok(family);
        }
        self.faces.push(FontFace {
            family: family.clone(),
            source,
            bytes: Arc::new(bytes),
        });
        Ok(family)
    }

    /// Family used when a request cannot be matched.
    pub fn with_fallback(mut self, family: impl Into<String>) -> Self {
        self.fallback_family = Some(family.into());
        self
    }

    pub fn faces(&self) -> &[FontFace] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Exact (case-insensitive) family lookup.
    pub fn find(&self, family: &str) -> Option<&FontFace> {
        self.faces
            .iter()
            .find(|f| f.family.eq_ignore_ascii_case(family))
    }

    /// Face to draw `family` with, falling back when it is missing. `None` only if empty.
    pub fn resolve(&self, family: &str) -> Option<&FontFace> {
        self.find(family).or_else(|| self.fallback())
    }

    /// Generic cursive default: the configured fallback family, else the first face.
    pub fn fallback(&self) -> Option<&FontFace> {
        self.fallback_family
            .as_deref()
            .and_then(|f| self.find(f))
            .or_else(|| self.faces.first())
    }
}

fn is_font_file(p: &Path) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
}

fn detect_family_name(bytes: &[u8]) -> AutographResult<String> {
    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| AutographError::font("no font families registered from font bytes"))?;
    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| AutographError::font("registered font family has no name"))?;
    Ok(name.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct AdvanceKey {
    family: String,
    size_bits: u32,
    italic: bool,
    bold: bool,
    ch: char,
}

/// Text shaped for drawing, plus the face it was shaped with.
pub struct ShapedText {
    pub face: FontFace,
    pub layout: parley::Layout<()>,
}

/// Stateful helper building Parley layouts against a [`FontBook`].
///
/// Advances are cached per (family, size, style, char), so repeated measurement of the same
/// inputs returns bit-identical widths.
pub struct TextShaper {
    book: Arc<FontBook>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    registered: HashMap<String, String>,
    advances: HashMap<AdvanceKey, f64>,
    warned: HashSet<String>,
    warned_empty: bool,
}

impl TextShaper {
    pub fn new(book: Arc<FontBook>) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let mut registered = HashMap::new();
        for face in book.faces() {
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(face.bytes().to_vec()), None);
            let name = families
                .first()
                .and_then(|(id, _)| font_ctx.collection.family_name(*id))
                .map(str::to_owned)
                .unwrap_or_else(|| face.family().to_owned());
            registered.insert(face.family().to_ascii_lowercase(), name);
        }
        Self {
            book,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            registered,
            advances: HashMap::new(),
            warned: HashSet::new(),
            warned_empty: false,
        }
    }

    pub fn book(&self) -> &Arc<FontBook> {
        &self.book
    }

    /// Shape `text` as a single unwrapped line. `None` when the book has no faces.
    pub fn shape(&mut self, text: &str, spec: &FontSpec) -> Option<ShapedText> {
        let face = self.resolve_face(&spec.family)?;
        let family_name = self
            .registered
            .get(&face.family().to_ascii_lowercase())
            .cloned()
            .unwrap_or_else(|| face.family().to_owned());

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(spec.size_px));
        if spec.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }
        if spec.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Some(ShapedText { face, layout })
    }

    fn resolve_face(&mut self, family: &str) -> Option<FontFace> {
        let face = self.book.resolve(family)?.clone();
        if !face.family().eq_ignore_ascii_case(family) && self.warned.insert(family.to_owned()) {
            tracing::warn!(
                requested = family,
                fallback = face.family(),
                "font family not loaded, using fallback"
            );
        }
        Some(face)
    }
}

impl GlyphMeasure for TextShaper {
    fn glyph_width(&mut self, ch: char, font: &FontSpec) -> f64 {
        let key = AdvanceKey {
            family: font.family.to_ascii_lowercase(),
            size_bits: font.size_px.to_bits(),
            italic: font.italic,
            bold: font.bold,
            ch,
        };
        if let Some(w) = self.advances.get(&key) {
            return *w;
        }

        let mut buf = [0u8; 4];
        let width = match self.shape(ch.encode_utf8(&mut buf), font) {
            Some(shaped) => f64::from(shaped.layout.full_width()),
            None => {
                if !self.warned_empty {
                    self.warned_empty = true;
                    tracing::warn!("no fonts loaded, glyphs measure as zero width");
                }
                0.0
            }
        };
        self.advances.insert(key, width);
        width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
