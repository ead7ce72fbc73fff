//! Command-line interface implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::{load_config, StarfieldConfig};
use crate::engine::{FrameOutcome, Starfield};
use crate::gif::render_gif;
use crate::output::{frame_path, save_png};
use crate::palette::Theme;
use crate::raster::RasterSurface;

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Starfield - render the orbiting star-trail animation headlessly
#[derive(Parser)]
#[command(name = "starfield")]
#[command(about = "Starfield - render the orbiting star-trail animation to PNG frames or GIF")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a frame sequence
    Render {
        /// Optional TOML configuration file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Viewport width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Viewport height in pixels
        #[arg(long, default_value = "600")]
        height: u32,

        /// Number of frames to render
        #[arg(long, default_value = "120")]
        frames: u32,

        /// Simulated frame rate driving the animation clock
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..=240))]
        fps: u32,

        /// Initial theme: light or dark
        #[arg(long, default_value = "dark")]
        theme: String,

        /// Toggle the theme at this frame index to exercise the crossfade
        #[arg(long)]
        toggle_at: Option<u32>,

        /// Override the star generator seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for PNG frames, or a path ending in .gif
        #[arg(short, long, default_value = "frames/")]
        output: PathBuf,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            width,
            height,
            frames,
            fps,
            theme,
            toggle_at,
            seed,
            output,
        } => run_render(RenderArgs {
            config,
            width,
            height,
            frames,
            fps,
            theme,
            toggle_at,
            seed,
            output,
        }),
    }
}

struct RenderArgs {
    config: Option<PathBuf>,
    width: u32,
    height: u32,
    frames: u32,
    fps: u32,
    theme: String,
    toggle_at: Option<u32>,
    seed: Option<u64>,
    output: PathBuf,
}

fn is_gif_path(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("gif"))
        .unwrap_or(false)
}

/// Execute the render command
fn run_render(args: RenderArgs) -> ExitCode {
    let theme: Theme = match args.theme.parse() {
        Ok(theme) => theme,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: cannot load config '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
        None => StarfieldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let mut engine = Starfield::new(config, theme);
    engine.on_viewport_change(args.width as f64, args.height as f64);
    let mut surface = RasterSurface::new(args.width, args.height);

    let frame_ms = 1000.0 / args.fps as f64;
    let to_gif = is_gif_path(&args.output);
    let mut gif_frames: Vec<image::RgbaImage> = Vec::new();

    for frame in 0..args.frames {
        let now_ms = frame as f64 * frame_ms;

        if args.toggle_at == Some(frame) {
            engine.on_theme_toggle(engine.theme().toggled(), now_ms);
        }

        match engine.tick(&mut surface, now_ms) {
            FrameOutcome::Rendered => {}
            outcome => {
                eprintln!("Warning: frame {} skipped ({:?})", frame, outcome);
                continue;
            }
        }

        if to_gif {
            gif_frames.push(surface.image().clone());
        } else {
            let path = frame_path(&args.output, frame as usize);
            if let Err(e) = save_png(surface.image(), &path) {
                eprintln!("Error: failed to save '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    if to_gif {
        if let Err(e) = render_gif(&gif_frames, frame_ms.round() as u32, true, &args.output) {
            eprintln!("Error: failed to save '{}': {}", args.output.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Saved: {} ({} frames)", args.output.display(), gif_frames.len());
    } else {
        println!("Saved: {} frames under {}", args.frames, args.output.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}
