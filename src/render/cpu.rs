use crate::{
    foundation::{
        color::Rgba8,
        core::{Affine, BezPath, Canvas, Point},
        error::{BloomError, BloomResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend},
        display_list::{DisplayList, DrawOp},
        surface::{Brush, Surface},
    },
};

/// Rasterizes display lists with `vello_cpu`, one fresh context per frame.
#[derive(Debug, Default)]
pub struct CpuBackend {
    frames_rendered: u64,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl RenderBackend for CpuBackend {
    fn render_list(&mut self, list: &DisplayList) -> BloomResult<FrameRGBA> {
        let canvas = list.canvas();
        let (w, h) = raster_dims(canvas)?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for op in list.ops() {
            draw_op(&mut ctx, op, canvas);
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        self.frames_rendered += 1;

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn raster_dims(canvas: Canvas) -> BloomResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| BloomError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| BloomError::render("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(BloomError::render("canvas must be non-empty"));
    }
    Ok((w, h))
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp, canvas: Canvas) {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::Clear { color } => {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                canvas.width_f64(),
                canvas.height_f64(),
            ));
        }
        DrawOp::FillPath {
            path,
            transform,
            brush,
        } => {
            ctx.set_transform(affine_to_cpu(*transform));
            set_brush(ctx, brush);
            ctx.fill_path(&bezpath_to_cpu(path));
        }
        DrawOp::StrokePath {
            path,
            transform,
            brush,
            width,
        } => {
            ctx.set_transform(affine_to_cpu(*transform));
            set_brush(ctx, brush);
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.stroke_path(&bezpath_to_cpu(path));
        }
    }
}

fn set_brush(ctx: &mut vello_cpu::RenderContext, brush: &Brush) {
    match brush {
        Brush::Solid(color) => ctx.set_paint(color_to_cpu(*color)),
        Brush::Radial {
            center,
            inner_radius,
            outer_radius,
            inner,
            outer,
        } => {
            let center = point_to_cpu(*center);
            let gradient = vello_cpu::peniko::Gradient::new_two_point_radial(
                center,
                *inner_radius as f32,
                center,
                *outer_radius as f32,
            )
            .with_stops([color_to_cpu(*inner), color_to_cpu(*outer)]);
            ctx.set_paint(gradient);
        }
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
