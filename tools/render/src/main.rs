//! Texture renderer: builds a Perlin texture from flags or a JSON params file
//! and writes it as BMP or PNG, or prints the BMP data URL.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use perlin_core::params::BlendParams;
use perlin_core::{export, ChannelStack, MatrixType, TextureParams};

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Monochrome,
    Rgb,
    Rgba,
    Gradient,
}

impl From<Kind> for MatrixType {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Monochrome => MatrixType::Monochrome,
            Kind::Rgb => MatrixType::Rgb,
            Kind::Rgba => MatrixType::Rgba,
            Kind::Gradient => MatrixType::Gradient,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "render", about = "Render a Perlin noise texture to BMP, PNG or a data URL")]
struct Args {
    /// JSON params file; overrides every other texture flag.
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long, default_value = "256")]
    width: usize,

    #[arg(long, default_value = "256")]
    height: usize,

    #[arg(long, value_enum, default_value = "rgb")]
    kind: Kind,

    /// Skip stretching each channel to the full 0-255 range.
    #[arg(long)]
    no_scale: bool,

    /// Gradient stop, repeatable (e.g. `--stop '#0057B7' --stop '#FFDD00'`).
    #[arg(long = "stop")]
    stops: Vec<String>,

    /// Background hex colour for blending; requires --opacity.
    #[arg(long, requires = "opacity")]
    background: Option<String>,

    #[arg(long, requires = "background")]
    opacity: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Output file (`.bmp` or `.png`); prints the data URL when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn texture_params(args: &Args) -> Result<TextureParams> {
    if let Some(path) = &args.params {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading params file {}", path.display()))?;
        return TextureParams::from_json(&json)
            .with_context(|| format!("parsing params file {}", path.display()));
    }
    let blend = match (&args.background, args.opacity) {
        (Some(background), Some(opacity)) => {
            Some(BlendParams { background: background.clone(), opacity })
        }
        _ => None,
    };
    Ok(TextureParams {
        width: args.width,
        height: args.height,
        kind: args.kind.into(),
        scale: !args.no_scale,
        gradient: (!args.stops.is_empty()).then(|| args.stops.clone()),
        blend,
        seed: args.seed,
    })
}

fn write_png(stack: &ChannelStack, path: &Path) -> Result<()> {
    let rgb = export::rgb_buffer(stack)?;
    let img = image::RgbImage::from_raw(stack.width() as u32, stack.height() as u32, rgb)
        .context("pixel buffer does not match image dimensions")?;
    img.save(path).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let params = texture_params(&args)?;
    info!("Rendering {}x{} {:?} texture…", params.width, params.height, params.kind);
    let stack = ChannelStack::build(&params).context("building texture")?;

    let Some(path) = &args.output else {
        println!("{}", export::data_url(&stack)?);
        return Ok(());
    };

    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("bmp") => {
            let bmp = export::bmp_bytes(&stack)?;
            fs::write(path, bmp).with_context(|| format!("writing {}", path.display()))?;
        }
        Some("png") => write_png(&stack, path)?,
        _ => bail!("unsupported output extension for {} (use .bmp or .png)", path.display()),
    }
    info!("Wrote {}", path.display());
    Ok(())
}
