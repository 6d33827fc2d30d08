use kurbo::{Affine, BezPath, Circle, Shape};

use crate::color::Rgba8;
use crate::config::{
    DEFAULT_FLOWING_COLOR, DEFAULT_LINE_COLOR, DEFAULT_WAVE_SPEED, WaveOptions,
};

/// Vertical amplitude of the wave crest, in canvas units.
pub const AMPLITUDE: f64 = 100.0;

/// Stroke width of the circle outline, in canvas units.
pub const OUTLINE_STROKE_WIDTH: f64 = 10.0;

/// Side length used when the host imposes no size constraint.
pub const DEFAULT_SIDE: u32 = 400;

/// The widget always renders as a square: the measured side is the smaller
/// of the two available extents, each defaulting to [`DEFAULT_SIDE`].
pub fn measure_side(width: Option<u32>, height: Option<u32>) -> u32 {
    width
        .unwrap_or(DEFAULT_SIDE)
        .min(height.unwrap_or(DEFAULT_SIDE))
}

/// Per-instance animation and style state.
///
/// `phase_x` holds the horizontal scroll offset of the wave and stays in
/// `[-width, 0]`: it advances by `wave_speed` each frame and wraps back to
/// `-width` once it would pass 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveState {
    pub progress_percent: f64,
    pub display_progress: f64,
    pub wave_speed: i32,
    pub phase_x: i32,
    pub width: u32,
    pub height: u32,
    pub flowing_color: Rgba8,
    pub line_color: Rgba8,
}

/// A single draw command in canvas coordinates.
#[derive(Clone, Debug)]
pub enum DrawOp {
    FillPath {
        path: BezPath,
        transform: Affine,
        color: Rgba8,
    },
    StrokePath {
        path: BezPath,
        transform: Affine,
        color: Rgba8,
        width: f64,
    },
}

/// Draw commands for one frame: a clip region plus ordered ops.
///
/// The scene is a plain value; any backend that can clip to a path, fill
/// and stroke can consume it.
#[derive(Clone, Debug)]
pub struct FrameScene {
    pub width: u32,
    pub height: u32,
    pub clip: BezPath,
    pub ops: Vec<DrawOp>,
}

/// Animated liquid-fill progress renderer.
///
/// Owns a [`WaveState`] and, per frame, produces a [`FrameScene`] (circle
/// clip, stroked outline, filled wave path) and advances the scroll phase.
/// The split between the pure [`scene`](Self::scene) and
/// [`advance`](Self::advance) keeps the geometry independent of whatever
/// repaint loop drives it.
#[derive(Clone, Debug)]
pub struct WaveRenderer {
    state: WaveState,
}

impl WaveRenderer {
    /// Creates a renderer for the given canvas size with default style.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: WaveState {
                progress_percent: 0.0,
                display_progress: 0.0,
                wave_speed: DEFAULT_WAVE_SPEED,
                phase_x: -(width as i32),
                width,
                height,
                flowing_color: DEFAULT_FLOWING_COLOR,
                line_color: DEFAULT_LINE_COLOR,
            },
        }
    }

    /// Creates a renderer and applies `opts` on top of the defaults.
    pub fn with_options(width: u32, height: u32, opts: &WaveOptions) -> Self {
        let mut r = Self::new(width, height);
        r.configure(opts);
        r
    }

    pub fn state(&self) -> &WaveState {
        &self.state
    }

    /// Applies the recognized options. Absent fields are left untouched;
    /// malformed color strings are logged and the previous value retained.
    pub fn configure(&mut self, opts: &WaveOptions) {
        if let Some(c) = opts.flowing_color.as_deref() {
            self.set_flowing_color(c);
        }
        if let Some(c) = opts.line_color.as_deref() {
            self.set_line_color(c);
        }
        if let Some(s) = opts.wave_speed {
            self.set_speed(s);
        }
        if let Some(p) = opts.progress {
            self.set_progress(p);
        }
    }

    /// Sets the progress percentage.
    ///
    /// At exactly 100 the displayed progress is boosted by [`AMPLITUDE`] so
    /// the wave crest overtops the circle and the fill reads as complete.
    /// Values outside [0,100] are accepted as-is and simply place the wave
    /// origin outside the visible canvas.
    pub fn set_progress(&mut self, progress: f64) {
        self.state.progress_percent = progress;
        self.state.display_progress = if progress == 100.0 {
            progress + AMPLITUDE
        } else {
            progress
        };
    }

    /// Sets the wave fill color from a hex string, keeping the previous
    /// color if the string does not parse.
    pub fn set_flowing_color(&mut self, color: &str) {
        match Rgba8::parse(color) {
            Ok(c) => self.state.flowing_color = c,
            Err(err) => tracing::warn!(color, %err, "ignoring invalid flowing color"),
        }
    }

    /// Sets the outline color from a hex string, keeping the previous
    /// color if the string does not parse.
    pub fn set_line_color(&mut self, color: &str) {
        match Rgba8::parse(color) {
            Ok(c) => self.state.line_color = c,
            Err(err) => tracing::warn!(color, %err, "ignoring invalid line color"),
        }
    }

    /// Sets the horizontal scroll speed in units per frame.
    pub fn set_speed(&mut self, speed: i32) {
        self.state.wave_speed = speed;
    }

    /// Updates the canvas size and restarts the horizontal scroll cycle.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.state.width = width;
        self.state.height = height;
        self.state.phase_x = -(width as i32);
    }

    /// Builds the scene for the current state without mutating it.
    pub fn scene(&self) -> FrameScene {
        let w = f64::from(self.state.width);
        let h = f64::from(self.state.height);
        let circle = Circle::new((w / 2.0, h / 2.0), h / 2.0);

        let ops = vec![
            DrawOp::StrokePath {
                path: circle_path(circle),
                transform: Affine::IDENTITY,
                color: self.state.line_color,
                width: OUTLINE_STROKE_WIDTH,
            },
            DrawOp::FillPath {
                path: self.wave_path(),
                // The wave is built with y=0 at the canvas bottom.
                transform: Affine::translate((0.0, h)),
                color: self.state.flowing_color,
            },
        ];

        FrameScene {
            width: self.state.width,
            height: self.state.height,
            clip: circle_path(circle),
            ops,
        }
    }

    /// Advances the scroll phase for the next frame, wrapping back to
    /// `-width` once it passes 0.
    pub fn advance(&mut self) {
        self.state.phase_x += self.state.wave_speed;
        if self.state.phase_x > 0 {
            self.state.phase_x = -(self.state.width as i32);
        }
    }

    /// Produces the current frame's scene, then advances the animation.
    pub fn render_frame(&mut self) -> FrameScene {
        let scene = self.scene();
        self.advance();
        scene
    }

    /// The closed wave path, in a frame where y=0 is the canvas bottom.
    ///
    /// Four quadratic segments with alternating control-point offsets tile
    /// a wavy baseline across twice the canvas width, so the surface stays
    /// covered while `phase_x` scrolls. The tail extends down to
    /// `height/2` and back across to `-width` so everything below the
    /// crest is filled regardless of the scroll offset.
    fn wave_path(&self) -> BezPath {
        let w = f64::from(self.state.width);
        let h = f64::from(self.state.height);
        let origin_y = -(self.state.display_progress / 100.0 * h);
        let wave = w / 4.0;
        let x0 = f64::from(self.state.phase_x);

        let mut path = BezPath::new();
        path.move_to((x0, origin_y));
        for i in 0..4 {
            let start_x = x0 + f64::from(i) * 2.0 * wave;
            let end_x = start_x + 2.0 * wave;
            let ctrl_y = if i % 2 == 0 {
                origin_y + AMPLITUDE
            } else {
                origin_y - AMPLITUDE
            };
            path.quad_to(((start_x + end_x) / 2.0, ctrl_y), (end_x, origin_y));
        }
        path.line_to((w, h / 2.0));
        path.line_to((-w, h / 2.0));
        path.line_to((-w, 0.0));
        path.close_path();
        path
    }
}

fn circle_path(circle: Circle) -> BezPath {
    let mut path = BezPath::new();
    for el in circle.path_elements(0.1) {
        path.push(el);
    }
    path
}
