//! # Backdrop CLI
//!
//! Render clock-face backgrounds to PNG files.
//!
//! ## Usage
//!
//! ```bash
//! # List available backgrounds
//! backdrop list
//!
//! # Show a shader's parameters
//! backdrop params palette
//!
//! # Render one frame
//! backdrop render shader:ether --time 3.5 --width 1170 --height 2532 --png ether.png
//!
//! # Override parameters
//! backdrop render shader:palette --param stop_count=6 --param speed=0.8 --png bands.png
//!
//! # Render a numbered sequence
//! backdrop frames shader:space --count 120 --fps 30 --dir frames/
//! ```
//!
//! Set `RUST_LOG=debug` for render timings.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use backdrop::{
    BackdropError,
    background::Background,
    config::Preferences,
    effects::{self, ParamKind},
    render,
    uniforms::Resolution,
};

/// Backdrop - procedural clock backgrounds
#[derive(Parser, Debug)]
#[command(name = "backdrop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List background keys
    List,

    /// Show the parameters of a shader
    Params {
        /// Shader name, e.g. "palette"
        shader: String,
    },

    /// Render a single frame to PNG
    Render {
        #[command(flatten)]
        background: BackgroundArgs,

        /// Seconds since the background started
        #[arg(long, default_value = "0")]
        time: f32,

        /// Output file
        #[arg(long, value_name = "FILE")]
        png: PathBuf,
    },

    /// Render a numbered PNG sequence
    Frames {
        #[command(flatten)]
        background: BackgroundArgs,

        /// Number of frames
        #[arg(long, default_value = "60")]
        count: u32,

        /// Frames per second
        #[arg(long, default_value = "30")]
        fps: f32,

        /// Output directory
        #[arg(long, value_name = "DIR")]
        dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct BackgroundArgs {
    /// Background key, e.g. "shader:ether" or "gradient:sunset" (defaults to
    /// the config file's background)
    background: Option<String>,

    /// Output width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Shader parameter as name=value (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE")]
    params: Vec<String>,

    /// Seed uniform for the flow shaders
    #[arg(long)]
    seed: Option<f32>,

    /// Speed modifier override
    #[arg(long)]
    speed: Option<f32>,

    /// Start from randomized shader parameters
    #[arg(long)]
    random: bool,

    /// Preferences file to start from
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl BackgroundArgs {
    fn resolution(&self) -> Resolution {
        Resolution::new(self.width as f32, self.height as f32)
    }

    fn resolve(&self) -> Result<Background, BackdropError> {
        let mut prefs = match &self.config {
            Some(path) => Preferences::load_from_file(path)?,
            None => Preferences::default(),
        };
        if let Some(bg) = &self.background {
            prefs.background = bg.clone();
        }
        for pair in &self.params {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                BackdropError::InvalidParam(format!("expected name=value, got '{}'", pair))
            })?;
            prefs
                .params
                .insert(name.trim().to_string(), value.trim().to_string());
        }
        if let Some(seed) = self.seed {
            prefs.seed = seed;
        }
        if self.speed.is_some() {
            prefs.speed = self.speed;
        }

        if self.random {
            prefs.randomized_background()
        } else {
            prefs.background()
        }
    }
}

fn main() {
    initialise_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), BackdropError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            println!("Available backgrounds:");
            println!("  solid:#rrggbb");
            for key in Background::preset_keys() {
                println!("  {}", key);
            }
        }

        Commands::Params { shader } => {
            let effect = effects::by_name(&shader)
                .ok_or_else(|| BackdropError::UnknownBackground(format!("shader:{}", shader)))?;
            let values = effect.list_params();
            println!("{} ({})", effect.name(), effect.params_description());
            for spec in effect.param_specs() {
                let current = values
                    .iter()
                    .find(|(name, _)| *name == spec.name)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or("-");
                let range = match spec.kind {
                    ParamKind::Slider { min, max, .. } => format!("{} .. {}", min, max),
                    ParamKind::Int { min, max } => format!(
                        "{} .. {}",
                        min.map_or("".to_string(), |v| v.to_string()),
                        max.map_or("".to_string(), |v| v.to_string())
                    ),
                    ParamKind::Color => "r,g,b or #rrggbb".to_string(),
                };
                println!("  {:<18} {:<14} [{}]", spec.name, current, range);
                if let Some(description) = spec.description {
                    println!("  {:<18} {}", "", description);
                }
            }
        }

        Commands::Render {
            background,
            time,
            png,
        } => {
            let bg = background.resolve()?;
            let resolution = background.resolution();
            println!(
                "Rendering {} at t={:.2}s ({}x{})...",
                bg, time, background.width, background.height
            );
            let frame = render::render_frame(&bg, time, resolution)?;
            render::save_png(&frame, &png)?;
            println!("Saved to {}", png.display());
        }

        Commands::Frames {
            background,
            count,
            fps,
            dir,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(BackdropError::InvalidParam(format!(
                    "fps must be positive, got {}",
                    fps
                )));
            }
            let bg = background.resolve()?;
            let resolution = background.resolution();
            std::fs::create_dir_all(&dir)?;

            println!("Rendering {} frames of {} at {} fps...", count, bg, fps);
            for i in 0..count {
                let time = i as f32 / fps;
                let frame = render::render_frame(&bg, time, resolution)?;
                render::save_png(&frame, &dir.join(format!("frame_{:04}.png", i)))?;
            }
            println!("Saved to {}", dir.display());
        }
    }

    Ok(())
}
