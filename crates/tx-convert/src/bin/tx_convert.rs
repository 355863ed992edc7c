use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use texel_ops::{EdgeRepairConfig, description, is_standard_srgb};
use tracing_subscriber::EnvFilter;
use tx_convert::{CombineMode, Pipeline, ResampleKind, Step, pipeline, store};

#[derive(Parser, Debug)]
#[command(name = "tx_convert")]
#[command(about = "Filter, rescale and composite textures with texel-ops")]
struct Cli {
    /// Log filter, e.g. `debug` or `tx_convert=trace`; overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "blur")]
    Blur(BlurArgs),
    #[command(name = "sharpen")]
    Sharpen(SharpenArgs),
    #[command(name = "resample")]
    Resample(ResampleArgs),
    #[command(name = "combine")]
    Combine(CombineArgs),
    #[command(name = "fix-edges")]
    FixEdges(FixEdgesArgs),
    #[command(name = "profile")]
    Profile(ProfileArgs),
    #[command(name = "pipeline")]
    Pipeline(PipelineArgs),
}

#[derive(Args, Debug, Clone)]
struct IoArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, required = true)]
    output: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct BlurArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long, default_value_t = 1)]
    iterations: usize,
}

#[derive(Args, Debug, Clone)]
struct SharpenArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long, default_value_t = 1.5)]
    factor: f32,
    #[arg(long, default_value_t = 1)]
    iterations: usize,
}

#[derive(Args, Debug, Clone)]
struct ResampleArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long)]
    width: usize,
    #[arg(long)]
    height: usize,
    #[arg(long, value_enum, default_value_t = ResampleKind::Nearest)]
    filter: ResampleKind,
}

#[derive(Args, Debug, Clone)]
struct CombineArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long, required = true)]
    overlay: PathBuf,
    #[arg(long, value_enum)]
    mode: CombineMode,
    #[arg(long, default_value_t = 1.0)]
    blend: f32,
}

#[derive(Args, Debug, Clone)]
struct FixEdgesArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long, default_value_t = EdgeRepairConfig::default().opacity_threshold)]
    opacity_threshold: u8,
}

#[derive(Args, Debug, Clone)]
struct ProfileArgs {
    #[arg(long, required = true)]
    input: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct PipelineArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long, required = true)]
    config: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.cmd {
        Command::Blur(args) => convert_one(
            &args.io,
            Step::Blur {
                iterations: args.iterations,
            },
        ),
        Command::Sharpen(args) => convert_one(
            &args.io,
            Step::Sharpen {
                factor: args.factor,
                iterations: args.iterations,
            },
        ),
        Command::Resample(args) => convert_one(
            &args.io,
            Step::Resample {
                width: args.width,
                height: args.height,
                filter: args.filter,
            },
        ),
        Command::Combine(args) => convert_one(
            &args.io,
            Step::Combine {
                overlay: args.overlay,
                mode: args.mode,
                blend: args.blend,
            },
        ),
        Command::FixEdges(args) => convert_one(
            &args.io,
            Step::FixTransparentEdges {
                opacity_threshold: args.opacity_threshold,
            },
        ),
        Command::Profile(args) => run_profile(args),
        Command::Pipeline(args) => run_pipeline(args),
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn convert_one(io: &IoArgs, step: Step) -> Result<()> {
    let pipeline = Pipeline { steps: vec![step] };
    convert(io, &pipeline, Path::new("."))
}

fn run_pipeline(args: PipelineArgs) -> Result<()> {
    ensure_file_exists(&args.config, "pipeline config")?;
    let pipeline = Pipeline::load(&args.config)?;
    let base_dir = args.config.parent().unwrap_or(Path::new("."));
    convert(&args.io, &pipeline, base_dir)
}

fn convert(io: &IoArgs, pipeline: &Pipeline, base_dir: &Path) -> Result<()> {
    ensure_file_exists(&io.input, "input")?;
    let loaded = store::load(&io.input)?;
    if let Some(profile) = &loaded.icc_profile
        && !is_standard_srgb(profile)
    {
        tracing::warn!(input = %io.input.display(), "input color profile is not standard sRGB");
    }

    let out = pipeline::run(pipeline, loaded.buffer, base_dir)
        .with_context(|| format!("converting {}", io.input.display()))?;
    store::save(&out, &io.output)?;
    tracing::info!(
        output = %io.output.display(),
        width = out.width(),
        height = out.height(),
        "wrote output"
    );
    Ok(())
}

fn run_profile(args: ProfileArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let loaded = store::load(&args.input)?;
    let Some(profile) = loaded.icc_profile else {
        println!("{}: no embedded color profile", args.input.display());
        return Ok(());
    };

    match description(&profile) {
        Ok(text) => println!(
            "{}: \"{}\" (standard sRGB: {})",
            args.input.display(),
            text,
            is_standard_srgb(&profile)
        ),
        Err(err) => println!(
            "{}: unreadable color profile ({err}), standard sRGB: false",
            args.input.display()
        ),
    }
    Ok(())
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
