use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::fonts::{FontBook, FontFace, TextShaper},
    foundation::core::{Affine, Canvas, Point, Rgba8},
    foundation::error::{AutographError, AutographResult},
    render::backend::FrameRGBA,
    render::display_list::{DrawOp, LineCap, TextAlign, TextBaseline, visible_ops},
    style::font::FontSpec,
};

/// Replays display lists onto a `vello_cpu` pixmap.
///
/// Only the ops after the last [`DrawOp::Clear`] are drawn; the pixmap starts transparent.
/// Overlapping translucent draws accumulate like canvas compositing does.
pub struct CpuRasterizer {
    shaper: TextShaper,
    font_cache: HashMap<String, vello_cpu::peniko::FontData>,
}

impl CpuRasterizer {
    pub fn new(book: Arc<FontBook>) -> Self {
        Self {
            shaper: TextShaper::new(book),
            font_cache: HashMap::new(),
        }
    }

    pub fn book(&self) -> &Arc<FontBook> {
        self.shaper.book()
    }

    /// Shaper used for glyph layout; also usable as the surface's measurer.
    pub fn shaper_mut(&mut self) -> &mut TextShaper {
        &mut self.shaper
    }

    #[tracing::instrument(skip(self, ops), fields(ops = ops.len()))]
    pub fn rasterize(&mut self, ops: &[DrawOp], canvas: Canvas) -> AutographResult<FrameRGBA> {
        canvas.validate()?;
        let width_u16: u16 = canvas
            .width
            .try_into()
            .map_err(|_| AutographError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = canvas
            .height
            .try_into()
            .map_err(|_| AutographError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        for op in visible_ops(ops) {
            self.draw_op(&mut ctx, op);
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_op(&mut self, ctx: &mut vello_cpu::RenderContext, op: &DrawOp) {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::Clear => {}
            DrawOp::FillGlyph {
                ch,
                at,
                font,
                align,
                baseline,
                color,
                alpha,
                transform,
            } => {
                if *alpha <= 0.0 {
                    return;
                }
                self.fill_glyph(ctx, *ch, *at, font, *align, *baseline, *color, *alpha, *transform);
            }
            DrawOp::StrokeLine {
                from,
                to,
                width,
                cap,
                color,
                alpha,
                transform,
            } => {
                if *alpha <= 0.0 {
                    return;
                }
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.set_paint(paint_for(*color));
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width).with_caps(cap_to_cpu(*cap)));

                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(*from));
                path.line_to(point_to_cpu(*to));

                if *alpha < 1.0 {
                    ctx.push_opacity_layer(*alpha);
                }
                ctx.stroke_path(&path);
                if *alpha < 1.0 {
                    ctx.pop_layer();
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_glyph(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        ch: char,
        at: Point,
        font: &FontSpec,
        align: TextAlign,
        baseline: TextBaseline,
        color: Rgba8,
        alpha: f32,
        transform: Affine,
    ) {
        let mut buf = [0u8; 4];
        let Some(shaped) = self.shaper.shape(ch.encode_utf8(&mut buf), font) else {
            tracing::debug!(%ch, "no font face available, glyph skipped");
            return;
        };
        let font_data = self.font_data_for(&shaped.face);
        let layout = &shaped.layout;

        let dx = match align {
            TextAlign::Start => 0.0,
            TextAlign::Center => -f64::from(layout.full_width()) / 2.0,
            TextAlign::End => -f64::from(layout.full_width()),
        };
        let dy = match baseline {
            TextBaseline::Top => 0.0,
            TextBaseline::Middle => -f64::from(layout.height()) / 2.0,
            TextBaseline::Alphabetic => -layout
                .lines()
                .next()
                .map(|l| f64::from(l.metrics().baseline))
                .unwrap_or_default(),
        };

        let placed = transform * Affine::translate((at.x + dx, at.y + dy));
        ctx.set_transform(affine_to_cpu(placed));
        ctx.set_paint(paint_for(color));

        if alpha < 1.0 {
            ctx.push_opacity_layer(alpha);
        }
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if alpha < 1.0 {
            ctx.pop_layer();
        }
    }

    fn font_data_for(&mut self, face: &FontFace) -> vello_cpu::peniko::FontData {
        let key = face.family().to_ascii_lowercase();
        if let Some(font) = self.font_cache.get(&key) {
            return font.clone();
        }
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes().as_ref().clone()),
            0,
        );
        self.font_cache.insert(key, font.clone());
        font
    }
}

fn paint_for(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn cap_to_cpu(cap: LineCap) -> vello_cpu::kurbo::Cap {
    match cap {
        LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
        LineCap::Round => vello_cpu::kurbo::Cap::Round,
        LineCap::Square => vello_cpu::kurbo::Cap::Square,
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
