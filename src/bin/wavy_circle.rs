use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use wavy_circle::{
    CpuRenderer, FrameRGBA, RenderSettings, Rgba8, WaveOptions, WaveRenderer, measure_side,
    render_frames, run_animation,
};

#[derive(Parser, Debug)]
#[command(name = "wavy-circle", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an animation as a numbered PNG sequence.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame index (0-based): the animation is stepped this many frames
    /// first, so the scroll phase matches a live widget after that many
    /// repaints.
    #[arg(long, default_value_t = 0)]
    frame: u64,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Output directory for frame_NNNN.png files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames to render.
    #[arg(long, default_value_t = 100)]
    frames: u64,

    /// Sleep the 10 ms frame delay between frames (live repaint cadence).
    #[arg(long)]
    realtime: bool,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct StyleArgs {
    /// Optional JSON options file (flowing_color, line_color, wave_speed,
    /// progress). A malformed file is logged and ignored.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Square canvas side length.
    #[arg(long)]
    size: Option<u32>,

    /// Progress percentage.
    #[arg(long)]
    progress: Option<f64>,

    /// Wave fill color, #RRGGBB or #RRGGBBAA.
    #[arg(long)]
    flowing_color: Option<String>,

    /// Circle outline color, #RRGGBB or #RRGGBBAA.
    #[arg(long)]
    line_color: Option<String>,

    /// Horizontal scroll speed in units per frame.
    #[arg(long)]
    speed: Option<i32>,

    /// Background color the canvas is cleared to.
    #[arg(long, default_value = "#12141c")]
    background: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn build_renderer(style: &StyleArgs) -> WaveRenderer {
    let side = measure_side(style.size, style.size);
    let mut renderer = WaveRenderer::new(side, side);

    if let Some(path) = &style.config {
        match load_options(path) {
            Ok(opts) => renderer.configure(&opts),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring malformed options file");
            }
        }
    }

    // Inline flags override the options file.
    if let Some(c) = style.flowing_color.as_deref() {
        renderer.set_flowing_color(c);
    }
    if let Some(c) = style.line_color.as_deref() {
        renderer.set_line_color(c);
    }
    if let Some(s) = style.speed {
        renderer.set_speed(s);
    }
    if let Some(p) = style.progress {
        renderer.set_progress(p);
    }

    renderer
}

fn load_options(path: &Path) -> wavy_circle::WavyResult<WaveOptions> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| wavy_circle::WavyError::config_parse(e.to_string()))?;
    WaveOptions::from_json_str(&text)
}

fn build_backend(style: &StyleArgs) -> CpuRenderer {
    let clear = match Rgba8::parse(&style.background) {
        Ok(c) => Some([c.r, c.g, c.b, c.a]),
        Err(err) => {
            tracing::warn!(color = %style.background, %err, "ignoring invalid background color");
            None
        }
    };
    CpuRenderer::new(RenderSettings { clear_rgba: clear })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut renderer = build_renderer(&args.style);
    let mut backend = build_backend(&args.style);

    let frames = render_frames(&mut renderer, &mut backend, args.frame + 1)?;
    let frame = frames
        .last()
        .ok_or_else(|| anyhow::anyhow!("no frame rendered"))?;

    write_png(&args.out, frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let mut renderer = build_renderer(&args.style);
    let mut backend = build_backend(&args.style);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let out_dir = args.out_dir.clone();
    run_animation(
        &mut renderer,
        &mut backend,
        args.frames,
        args.realtime,
        |i, frame| {
            let path = out_dir.join(format!("frame_{i:04}.png"));
            write_png(&path, frame).map_err(wavy_circle::WavyError::from)
        },
    )?;

    eprintln!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
