use super::*;

#[test]
fn default_canvas_is_800_by_300_centered() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (800, 300));
    assert_eq!(c.center(), Point::new(400.0, 150.0));
}

#[test]
fn canvas_rejects_zero_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 70_000).is_err());
    assert!(Canvas::new(16, 16).is_ok());
}

#[test]
fn hex_form_is_uppercase_and_keeps_translucent_alpha() {
    assert_eq!(Rgba8::opaque(0x1e, 0x3a, 0x8a).to_hex(), "#1E3A8A");
    assert_eq!(Rgba8::BLACK.to_hex(), "#000000");
    let translucent = Rgba8 {
        a: 0x80,
        ..Rgba8::opaque(0x11, 0x18, 0x27)
    };
    assert_eq!(translucent.to_hex(), "#11182780");
}
