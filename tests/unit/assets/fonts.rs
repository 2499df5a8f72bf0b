use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "autograph_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn system_font() -> Option<Vec<u8>> {
    ["/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"]
        .iter()
        .find_map(|p| std::fs::read(p).ok())
}

#[test]
fn empty_book_resolves_nothing() {
    let book = FontBook::new().with_fallback("Pacifico");
    assert!(book.is_empty());
    assert!(book.resolve("Pacifico").is_none());
    assert!(book.fallback().is_none());
}

#[test]
fn missing_dir_is_a_font_error() {
    let err = FontBook::load_dir(&temp_dir("missing")).unwrap_err();
    assert!(err.to_string().starts_with("font error:"));
}

#[test]
fn non_font_files_are_skipped() {
    let tmp = temp_dir("fonts_skip");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("readme.txt"), b"hello").unwrap();
    std::fs::write(tmp.join("broken.ttf"), b"not a font").unwrap();

    let book = FontBook::load_dir(&tmp).unwrap();
    assert!(book.is_empty());
}

#[test]
fn shaper_without_fonts_measures_zero() {
    let mut shaper = TextShaper::new(Arc::new(FontBook::new()));
    let spec = FontSpec::signature("Allura", 70.0);
    assert_eq!(shaper.glyph_width('A', &spec), 0.0);
    assert!(shaper.shape("A", &spec).is_none());
}

#[test]
fn loaded_face_is_used_as_fallback() {
    let Some(bytes) = system_font() else {
        eprintln!("skipping: no system font available");
        return;
    };
    let tmp = temp_dir("fonts_load");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("face.ttf"), &bytes).unwrap();

    let book = FontBook::load_dir(&tmp).unwrap();
    assert_eq!(book.len(), 1);
    let face = &book.faces()[0];
    assert_eq!(face.source(), Some(tmp.join("face.ttf").as_path()));
    assert_eq!(book.resolve("Great Vibes").unwrap().family(), face.family());
    assert!(book.find(&face.family().to_uppercase()).is_some());
}

#[test]
fn duplicate_family_keeps_first_face() {
    let Some(bytes) = system_font() else {
        eprintln!("skipping: no system font available");
        return;
    };
    let mut book = FontBook::new();
    let a = book.add_bytes(bytes.clone(), None).unwrap();
    let b = book.add_bytes(bytes, None).unwrap();
    assert_eq!(a, b);
    assert_eq!(book.len(), 1);
}

#[test]
fn shaped_advances_are_cached_and_deterministic() {
    let Some(bytes) = system_font() else {
        eprintln!("skipping: no system font available");
        return;
    };
    let mut book = FontBook::new();
    book.add_bytes(bytes, None).unwrap();
    let mut shaper = TextShaper::new(Arc::new(book));
    let spec = FontSpec::signature("Sacramento", 70.0);

    let w = shaper.glyph_width('W', &spec);
    assert!(w > 0.0);
    assert_eq!(shaper.glyph_width('W', &spec).to_bits(), w.to_bits());
    assert!(shaper.glyph_width('i', &spec) < w);

    let small = FontSpec::signature("Sacramento", 35.0);
    assert!(shaper.glyph_width('W', &small) < w);
}
