use clap::Parser;
use std::fs;
use std::path::PathBuf;
use poly_dot_wasm::{ConvertOptions, Shape, convert_bytes};
use anyhow::{Context, Result, anyhow};
use log::info;

/// Turn images into triangle, square or hexagon dot mosaics (native wrapper).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Tile shape: triangle, square or hexagon
    #[arg(short = 's', long, default_value = "triangle")]
    shape: Shape,

    /// Approximate number of tiles
    #[arg(short = 'n', long, default_value_t = 3000)]
    dots: u32,

    /// Palette size (5-30)
    #[arg(short = 'k', long, default_value_t = 16)]
    colors: usize,

    /// Grid rotation in degrees, a multiple of 15
    #[arg(short = 'r', long, default_value_t = 0, allow_negative_numbers = true)]
    rotate: i32,

    /// Seed for palette clustering, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Output filename prefix (ignored when --out-dir supplied)
    #[arg(short = 'p', long, default_value = "dots_")]
    prefix: String,

    /// Also write the extracted palette as JSON next to each output
    #[arg(long)]
    palette_json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = ConvertOptions {
        shape: args.shape,
        dots: args.dots,
        colors: args.colors,
        rotate: args.rotate,
        seed: args.seed,
    };
    options.validate()?;

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        info!("converting {} as {} ({} dots, {} colors, rotate {})", input.display(), options.shape, options.dots, options.colors, options.rotate);
        let (png, palette) = convert_bytes(&bytes, &options).context("mosaic conversion failed")?;

        let stem = input
            .file_stem()
            .ok_or_else(|| anyhow!("input path has no file name: {}", input.display()))?
            .to_string_lossy();
        let out_path = if let Some(dir) = &args.out_dir {
            dir.join(format!("{stem}.png"))
        } else {
            PathBuf::from(format!("{}{}.png", args.prefix, stem))
        };

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, png)?;
        println!("Saved → {}", out_path.display());

        if args.palette_json {
            let json_path = out_path.with_extension("json");
            let doc = serde_json::json!({
                "source": input.display().to_string(),
                "shape": options.shape.name(),
                "dots": options.dots,
                "rotate": options.rotate,
                "palette": palette,
            });
            fs::write(&json_path, serde_json::to_string_pretty(&doc)?)?;
            println!("Palette → {}", json_path.display());
        }
    }

    Ok(())
}
