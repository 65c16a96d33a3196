use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tile_geom::ResampleFilter;
use tiled_upscale::error::classify;
use tiled_upscale::{HasRecoverySuggestion, ModelId, TracingProgress, UpscaleConfig, UpscaleMode};
use tracing_subscriber::EnvFilter;

/// Tile-based image upscaling:
/// - any input size, any target scale
/// - tiles sized for the model, merged by pasting or along optimised seams
#[derive(Parser, Debug)]
#[command(name = "upscale")]
#[command(about = "Upscale an image of any size with a tile-based upscaler")]
#[command(long_about = "Upscale an image of any size to any scale. The image is cut into tiles the model
accepts, every tile is upscaled, and the tiles are merged back, repeating until the target size is reached.")]
struct Args {
    /// Image to upscale
    #[arg(short, long = "input-file", value_name = "FILE")]
    input: PathBuf,

    /// Output path (default: <input stem>_upscaled.png next to the input)
    #[arg(short, long = "output-file", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Scale factor, e.g. 2.5
    #[arg(short, long, default_value_t = 4.0)]
    scale: f64,

    /// Minimum tile overlap as a fraction of the tile size; 0 pastes tiles, > 0 stitches them
    #[arg(long, visible_alias = "sof", default_value_t = 0.0)]
    stitch_overlap_fraction: f64,

    /// Tile upscaler model
    #[arg(short, long, value_enum, default_value_t = ModelId::Lanczos4x)]
    model: ModelId,

    /// Prompt passed to the model
    #[arg(short, long, default_value = "")]
    prompt: String,

    /// Save provenance and seam overlay images for every merged pass, and log at debug level
    #[arg(short, long)]
    debug: bool,

    /// Directory for debug images
    #[arg(long, value_name = "DIR", default_value = ".")]
    debug_dir: PathBuf,

    /// Orchestration mode
    #[arg(long, value_enum, default_value_t = UpscaleMode::Multi)]
    mode: UpscaleMode,

    /// Filter for resizes done without the model
    #[arg(long, value_enum, default_value_t = ResampleFilter::Lanczos3)]
    resample_filter: ResampleFilter,

    /// Upscale tiles one at a time
    #[arg(long)]
    sequential: bool,
}

impl Args {
    fn into_config(self) -> UpscaleConfig {
        UpscaleConfig {
            input: self.input,
            output: self.output,
            scale: self.scale,
            stitch_overlap_fraction: self.stitch_overlap_fraction,
            model: self.model,
            prompt: self.prompt,
            debug: self.debug,
            debug_dir: self.debug_dir,
            mode: self.mode,
            parallel_tiles: !self.sequential,
            resample_filter: self.resample_filter,
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Exit status for errors the user can fix by changing the invocation
const USAGE_EXIT: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.debug);

    let config = args.into_config();
    match tiled_upscale::upscale_file(&config, &TracingProgress) {
        Ok(output) => {
            println!("Saved {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = if classify::is_user_error(&e) { USAGE_EXIT } else { 1 };
            let hint = e.recovery_suggestion().map(str::to_owned);
            let report = anyhow::Error::new(e).context(format!("failed to upscale {}", config.input.display()));
            eprintln!("Error: {:#}", report);
            if let Some(hint) = hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
