use std::time::Duration;

use crate::error::{WavyError, WavyResult};
use crate::render_cpu::{CpuRenderer, FrameRGBA};
use crate::wave::WaveRenderer;

/// Delay between repaints of the live widget.
///
/// The original repaint loop re-requests itself every 10 time units; the
/// driver honors the same cadence when asked to pace in real time.
pub const FRAME_DELAY: Duration = Duration::from_millis(10);

/// Render `count` consecutive frames, advancing the animation each time.
///
/// This is the offline equivalent of the widget's self-rescheduling repaint
/// loop: the caller owns scheduling, the renderer only produces scenes.
#[tracing::instrument(skip(renderer, backend))]
pub fn render_frames(
    renderer: &mut WaveRenderer,
    backend: &mut CpuRenderer,
    count: u64,
) -> WavyResult<Vec<FrameRGBA>> {
    if count == 0 {
        return Err(WavyError::validation("frame count must be > 0"));
    }

    let mut out = Vec::with_capacity(count.min(4096) as usize);
    for _ in 0..count {
        let scene = renderer.render_frame();
        out.push(backend.render_scene(&scene)?);
    }
    Ok(out)
}

/// Drive the animation loop, handing each frame to `on_frame`.
///
/// With `realtime` set, sleeps [`FRAME_DELAY`] between frames to emulate
/// the live repaint cadence. The loop runs for exactly `count` frames;
/// stopping is the caller's concern, same as detaching the live widget.
#[tracing::instrument(skip(renderer, backend, on_frame))]
pub fn run_animation(
    renderer: &mut WaveRenderer,
    backend: &mut CpuRenderer,
    count: u64,
    realtime: bool,
    mut on_frame: impl FnMut(u64, &FrameRGBA) -> WavyResult<()>,
) -> WavyResult<()> {
    if count == 0 {
        return Err(WavyError::validation("frame count must be > 0"));
    }

    for i in 0..count {
        let scene = renderer.render_frame();
        let frame = backend.render_scene(&scene)?;
        on_frame(i, &frame)?;
        if realtime && i + 1 < count {
            std::thread::sleep(FRAME_DELAY);
        }
    }
    Ok(())
}
