#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render_cpu;
pub mod wave;

pub use color::Rgba8;
pub use config::WaveOptions;
pub use error::{WavyError, WavyResult};
pub use pipeline::{FRAME_DELAY, render_frames, run_animation};
pub use render_cpu::{CpuRenderer, FrameRGBA, RenderSettings};
pub use wave::{
    AMPLITUDE, DEFAULT_SIDE, DrawOp, FrameScene, OUTLINE_STROKE_WIDTH, WaveRenderer, WaveState,
    measure_side,
};
