use super::*;

fn line(cap: LineCap, alpha: f32) -> DrawOp {
    DrawOp::StrokeLine {
        from: Point::new(100.0, 150.0),
        to: Point::new(300.0, 150.0),
        width: 2.0,
        cap,
        color: Rgba8::BLACK,
        alpha,
        transform: Affine::IDENTITY,
    }
}

fn glyph() -> DrawOp {
    DrawOp::FillGlyph {
        ch: 'A',
        at: Point::new(400.0, 150.0),
        font: FontSpec::signature("Pacifico", 70.0),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
        color: Rgba8::BLACK,
        alpha: 1.0,
        transform: Affine::IDENTITY,
    }
}

fn rasterizer() -> CpuRasterizer {
    CpuRasterizer::new(Arc::new(FontBook::new()))
}

#[test]
fn empty_list_is_transparent() {
    let frame = rasterizer().rasterize(&[], Canvas::default()).unwrap();
    assert_eq!((frame.width, frame.height), (800, 300));
    assert_eq!(frame.data.len(), 800 * 300 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.covered_pixels(), 0);
}

#[test]
fn stroke_covers_its_segment_only() {
    let frame = rasterizer()
        .rasterize(&[line(LineCap::Butt, 1.0)], Canvas::default())
        .unwrap();
    assert_eq!(frame.pixel(200, 149).unwrap()[3], 255);
    assert_eq!(frame.pixel(200, 150).unwrap()[3], 255);
    assert_eq!(frame.pixel(200, 140).unwrap()[3], 0);
    assert_eq!(frame.pixel(50, 149).unwrap()[3], 0);
    assert_eq!(frame.pixel(97, 149).unwrap()[3], 0);
}

#[test]
fn round_cap_extends_past_endpoints() {
    let frame = rasterizer()
        .rasterize(&[line(LineCap::Round, 1.0)], Canvas::default())
        .unwrap();
    assert!(frame.pixel(99, 149).unwrap()[3] > 0);
    assert!(frame.pixel(300, 149).unwrap()[3] > 0);
}

#[test]
fn translucent_stroke_is_partially_covered() {
    let frame = rasterizer()
        .rasterize(&[line(LineCap::Round, 0.6)], Canvas::default())
        .unwrap();
    let a = frame.pixel(200, 149).unwrap()[3];
    assert!(a > 100 && a < 200, "alpha {a}");
}

#[test]
fn zero_alpha_draws_nothing() {
    let frame = rasterizer()
        .rasterize(&[line(LineCap::Round, 0.0)], Canvas::default())
        .unwrap();
    assert_eq!(frame.covered_pixels(), 0);
}

#[test]
fn ops_before_last_clear_are_not_drawn() {
    let ops = vec![line(LineCap::Butt, 1.0), DrawOp::Clear];
    let frame = rasterizer().rasterize(&ops, Canvas::default()).unwrap();
    assert_eq!(frame.covered_pixels(), 0);
}

#[test]
fn glyphs_without_fonts_are_skipped() {
    let ops = vec![glyph(), line(LineCap::Butt, 1.0)];
    let frame = rasterizer().rasterize(&ops, Canvas::default()).unwrap();
    assert!(frame.covered_pixels() > 0);
    assert_eq!(frame.pixel(400, 100).unwrap()[3], 0);
}

#[test]
fn rotated_stroke_moves_off_axis() {
    let pivot = Point::new(200.0, 150.0).to_vec2();
    let rot = Affine::translate(pivot) * Affine::rotate(90f64.to_radians()) * Affine::translate(-pivot);
    let op = DrawOp::StrokeLine {
        from: Point::new(100.0, 150.0),
        to: Point::new(300.0, 150.0),
        width: 2.0,
        cap: LineCap::Butt,
        color: Rgba8::BLACK,
        alpha: 1.0,
        transform: rot,
    };
    let frame = rasterizer().rasterize(&[op], Canvas::default()).unwrap();
    assert_eq!(frame.pixel(120, 149).unwrap()[3], 0);
    assert!(frame.pixel(199, 100).unwrap()[3] > 0);
}

#[test]
fn invalid_canvas_is_rejected() {
    let err = rasterizer()
        .rasterize(&[], Canvas { width: 0, height: 10 })
        .unwrap_err();
    assert!(err.to_string().contains("canvas"));
}
