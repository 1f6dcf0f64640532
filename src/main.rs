use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
};

use anyhow::{Context, Error};
use clap::Parser;
use log::{info, warn};
use rusty_ilda::{config::RenderConfig, raster::Plotter, Decoder};

/// Decode an ILDA file and render every frame to a PNG
#[derive(Parser, Debug)]
#[command(name = "ilda-render", version)]
struct Args {
    /// The .ild file to read
    input: PathBuf,

    /// Where the frame images go
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// RON render configuration
    #[arg(short, long, default_value = "render.ron")]
    config: PathBuf,

    /// Only print the frames, don't render them
    #[arg(short, long)]
    summary: bool,

    /// Print each frame as JSON instead of the short summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        RenderConfig::load(&args.config)
            .with_context(|| format!("Failed to load {}", args.config.display()))?
    } else {
        warn!(
            "No render config at {}, using the defaults",
            args.config.display()
        );
        RenderConfig::default()
    };

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let mut decoder = Decoder::new(BufReader::new(file));

    if !args.summary {
        fs::create_dir_all(&args.out_dir)?;
    }

    let rect = config.rect();
    let background = config.background_image();
    let mut canvas = config.background_image();
    let mut plotter = Plotter::new();
    let mut count = 0;

    while let Some(frame) = decoder.next_frame()? {
        if args.json {
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            println!("Name {}", frame.name);
            println!("Company {}", frame.company);
            println!("Number {}", frame.number);
            println!("Total {}", frame.total);
            println!("Projector {}", frame.projector);
            println!("Points {}", frame.points.len());
        }

        if !args.summary {
            plotter.draw_frame(&frame.points, &mut canvas, rect, &background, (0, 0));

            let path = args.out_dir.join(config.frame_file_name(count));
            canvas
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote frame {} to {}", frame.number, path.display());
        }

        count += 1;
    }

    info!("Decoded {} frames from {}", count, args.input.display());

    Ok(())
}
