use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use stereopair::{OutputFormat, OutputMode, ResizeMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "stereopair",
    version,
    about = "Convert a single image into a stereo pair"
)]
struct Cli {
    /// Input image (JPEG, PNG, ...).
    input: PathBuf,

    /// Parallax as a percentage of image width (positional form, overrides --parallax).
    parallax_perc: Option<f64>,

    /// Parallax as a percentage of image width.
    #[arg(long)]
    parallax: Option<f64>,

    /// Number of depth bands.
    #[arg(long)]
    layers: Option<i64>,

    /// Depth band rendered without shift.
    #[arg(long = "zero-layer")]
    zero_layer: Option<i64>,

    /// Which outputs to produce.
    #[arg(long, value_enum)]
    mode: Option<OutputMode>,

    /// Output directory.
    #[arg(long = "out-dir")]
    out_dir: Option<PathBuf>,

    /// Output file format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// JPEG quality (clamped to 1-100).
    #[arg(long, allow_negative_numbers = true)]
    quality: Option<i64>,

    /// Override worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Resize the input before conversion.
    #[arg(long, value_enum)]
    resize: Option<ResizeMode>,

    /// Resize target width.
    #[arg(long = "target-width")]
    target_width: Option<u32>,

    /// Resize target height.
    #[arg(long = "target-height")]
    target_height: Option<u32>,

    /// JSON config file; command-line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Copy the preferred output to `latest.<ext>`.
    #[arg(long = "publish-latest")]
    publish_latest: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = build_config(&cli)?;

    let src = stereopair::load_source(&cli.input, &cfg.resize)?;
    tracing::info!(
        input = %cli.input.display(),
        width = src.width(),
        height = src.height(),
        "loaded source image"
    );

    let params = cfg.parallax_params()?;
    let renderer = stereopair::StereoRenderer::new(params, &cfg.threading())?;
    let sink = stereopair::DirSink::new(&cfg.output_dir, cfg.format, cfg.encoder_quality())?;

    let report = stereopair::run_stereo(&renderer, &src, cfg.output_mode, &sink);

    if cfg.publish_latest {
        sink.publish_latest(&report.written)
            .with_context(|| format!("update latest in '{}'", sink.dir().display()))?;
    }

    for kind in &report.written {
        eprintln!("wrote {}", sink.path_for(*kind).display());
    }
    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("{} run failed: {}", failure.run, failure.error);
        }
        anyhow::bail!("{} of the requested runs failed", report.failures.len());
    }
    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<stereopair::StereoConfig> {
    let mut cfg = match &cli.config {
        Some(path) => stereopair::StereoConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => stereopair::StereoConfig::default(),
    };

    if let Some(v) = cli.parallax_perc.or(cli.parallax) {
        cfg.parallax_perc = v;
    }
    if let Some(v) = cli.layers {
        cfg.layers_count = v;
    }
    if let Some(v) = cli.zero_layer {
        cfg.zero_parallax_layer_num = v;
    }
    if let Some(mode) = cli.mode {
        cfg.output_mode = mode;
    }
    if let Some(dir) = &cli.out_dir {
        cfg.output_dir = dir.clone();
    }
    if let Some(format) = cli.format {
        cfg.format = format;
    }
    if let Some(q) = cli.quality {
        cfg.jpeg_quality = q;
    }
    if cli.threads.is_some() {
        cfg.threads = cli.threads;
    }
    if let Some(resize) = cli.resize {
        cfg.resize.mode = resize;
    }
    if let Some(w) = cli.target_width {
        cfg.resize.target_width = w;
    }
    if let Some(h) = cli.target_height {
        cfg.resize.target_height = h;
    }
    cfg.publish_latest |= cli.publish_latest;

    Ok(cfg.sanitize())
}
