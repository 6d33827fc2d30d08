use crate::error::{WavyError, WavyResult};
use crate::wave::{DrawOp, FrameScene};

/// One rendered frame of **premultiplied** RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Rasterization settings.
///
/// `clear_rgba` is the straight-alpha background painted across the whole
/// canvas beneath the clipped scene; `None` leaves it transparent.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderSettings {
    pub clear_rgba: Option<[u8; 4]>,
}

/// CPU rasterizer for [`FrameScene`] values, powered by `vello_cpu`.
///
/// The render context is kept across frames and reused while the canvas
/// size is stable.
pub struct CpuRenderer {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ctx: None,
        }
    }

    pub fn render_scene(&mut self, scene: &FrameScene) -> WavyResult<FrameRGBA> {
        let width_u16: u16 = scene
            .width
            .try_into()
            .map_err(|_| WavyError::validation("canvas width exceeds u16"))?;
        let height_u16: u16 = scene
            .height
            .try_into()
            .map_err(|_| WavyError::validation("canvas height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(WavyError::validation("canvas width/height must be > 0"));
        }

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width_u16 && ctx.height() == height_u16 => ctx,
            _ => vello_cpu::RenderContext::new(width_u16, height_u16),
        };
        ctx.reset();

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        // The pixmap is overwritten by render_to_pixmap, so the background
        // must be drawn as part of the scene, outside the clip.
        if let Some([r, g, b, a]) = self.settings.clear_rgba {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(scene.width),
                f64::from(scene.height),
            ));
        }
        ctx.push_clip_layer(&bezpath_to_cpu(&scene.clip));

        for op in &scene.ops {
            match op {
                DrawOp::FillPath {
                    path,
                    transform,
                    color,
                } => {
                    ctx.set_transform(affine_to_cpu(*transform));
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        color.r, color.g, color.b, color.a,
                    ));
                    ctx.fill_path(&bezpath_to_cpu(path));
                }
                DrawOp::StrokePath {
                    path,
                    transform,
                    color,
                    width,
                } => {
                    ctx.set_transform(affine_to_cpu(*transform));
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        color.r, color.g, color.b, color.a,
                    ));
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                    ctx.stroke_path(&bezpath_to_cpu(path));
                }
            }
        }

        ctx.pop_layer();
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: scene.width,
            height: scene.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
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
mod tests {
    use super::*;

    #[test]
    fn clear_color_survives_a_sceneless_render() {
        let mut backend = CpuRenderer::new(RenderSettings {
            clear_rgba: Some([10, 20, 30, 255]),
        });
        let scene = FrameScene {
            width: 8,
            height: 8,
            clip: kurbo::BezPath::new(),
            ops: vec![],
        };
        let frame = backend.render_scene(&scene).unwrap();
        for px in frame.data.chunks_exact(4) {
            assert_eq!(px, [10, 20, 30, 255]);
        }
    }

    #[test]
    fn no_clear_color_leaves_the_canvas_transparent() {
        let mut backend = CpuRenderer::new(RenderSettings::default());
        let scene = FrameScene {
            width: 8,
            height: 8,
            clip: kurbo::BezPath::new(),
            ops: vec![],
        };
        let frame = backend.render_scene(&scene).unwrap();
        assert!(frame.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let mut backend = CpuRenderer::new(RenderSettings::default());
        let scene = FrameScene {
            width: 0,
            height: 0,
            clip: kurbo::BezPath::new(),
            ops: vec![],
        };
        assert!(backend.render_scene(&scene).is_err());
    }
}
