use std::fs;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use whitted::raytracing::parser::SceneParser;
use whitted::raytracing::render::{render, RenderConfig, RenderMode};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// the input path to the scene file
    scene: String,
    /// the path where the rendered image is saved, the format follows the extension
    #[arg(short, long, default_value = "output.ppm")]
    output: String,
    /// width and height of the output image
    #[arg(short, long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [800, 600])]
    dims: Vec<u32>,
    /// maximum number of reflection and refraction bounces
    #[arg(long, default_value_t = 5)]
    max_depth: u32,
    /// size of the worker pool
    #[arg(
        short,
        long,
        default_value_t = 4,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    workers: usize,
    /// render on the main thread only (debugging)
    #[arg(long, default_value = "false")]
    sequential: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let (width, height) = (args.dims[0], args.dims[1]);

    log::info!("Parsing {}", args.scene);
    let content = fs::read_to_string(&args.scene)
        .with_context(|| format!("cannot read scene file {}", args.scene))?;
    let mut parser = SceneParser::new(&content);
    let scene = match parser.parse_scene() {
        Ok(scene) => scene,
        Err(parser_error) => {
            if let Some(location) = parser_error.error_location(&content) {
                eprintln!("{}", location);
            }
            bail!("parser error in {}: {}", args.scene, parser_error);
        }
    };

    let config = RenderConfig {
        max_depth: args.max_depth,
        mode: if args.sequential {
            RenderMode::Sequential
        } else {
            RenderMode::Parallel {
                workers: args.workers,
            }
        },
    };

    let start = Instant::now();
    let frame = render(&scene, width, height, &config)?;

    log::info!("Exporting {}", args.output);
    frame
        .to_image_buffer()
        .save(&args.output)
        .with_context(|| format!("cannot save {}", args.output))?;

    log::info!("Rendered {} in {:?}", args.output, start.elapsed());
    Ok(())
}
