use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use snafu::ResultExt;
use tracing::{error, info};

use cogdemo_core::config::load_dotenv;
use cogdemo_core::consts::*;
use cogdemo_core::error::{ConsoleSnafu, ImageOpenSnafu};
use cogdemo_core::client::vision::draw;
use cogdemo_core::format::TextReport;
use cogdemo_core::{CogdemoError, ConfigKey, Service, ServiceArgs, VisionSession};

#[derive(Parser)]
#[command(name = "read-text")]
#[command(about = "Read text in an image and outline it")]
struct Args {
    #[arg(long, help = "Image to read, skips the sample menu")]
    image: Option<PathBuf>,

    #[arg(long, default_value = SAMPLE_IMAGE_DIR, help = "Directory holding the sample images")]
    images: PathBuf,

    #[arg(short, long, default_value = OUTPUT_FILE, help = "Annotated image output path")]
    output: PathBuf,

    #[command(flatten)]
    service: ServiceArgs,
}

/// Prints the sample menu and returns the chosen image, or `None` to quit.
fn choose_image(images: &Path) -> Result<Option<PathBuf>, CogdemoError> {
    println!();
    println!("1: Use Read API for image ({PRINTED_SAMPLE_IMAGE})");
    println!("2: Read handwriting ({HANDWRITTEN_SAMPLE_IMAGE})");
    println!("Any other key to quit");
    println!();
    print!("Enter a number:");
    io::stdout().flush().context(ConsoleSnafu)?;

    let mut command = String::new();
    io::stdin().lock().read_line(&mut command).context(ConsoleSnafu)?;

    let image = match command.trim() {
        "1" => Some(images.join(PRINTED_SAMPLE_IMAGE)),
        "2" => Some(images.join(HANDWRITTEN_SAMPLE_IMAGE)),
        _ => None,
    };

    Ok(image)
}

/// Reads the text in `image_file`, prints it and writes the annotated copy
/// to `output`.
fn read_text(
    session: &VisionSession,
    image_file: &Path,
    output: &Path,
) -> Result<(), CogdemoError> {
    println!();
    println!("Reading text in {}", image_file.display());

    let analysis = session.analyze(image_file)?;

    if analysis.lines.is_empty() {
        println!();
        println!("No text found.");
        return Ok(());
    }

    println!();
    println!("Text:");
    print!("{}", TextReport(&analysis));

    let image = image::open(image_file).context(ImageOpenSnafu {
        path: image_file.to_string_lossy(),
    })?;
    draw(output, &analysis, &image)?;

    println!();
    println!("  Results saved in {}", output.display());
    Ok(())
}

fn run(args: Args) -> Result<(), CogdemoError> {
    let config = args.service.into_config(ConfigKey::SERVICE)?;
    let session = VisionSession::new(config)?;

    let image_file = match args.image {
        Some(image) => image,
        None => match choose_image(&args.images)? {
            Some(image) => image,
            None => {
                info!("No sample selected, quitting");
                return Ok(());
            }
        },
    };

    read_text(&session, &image_file, &args.output)
}

fn main() -> ExitCode {
    cogdemo_core::init_tracing();
    load_dotenv();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(kind = ?err.kind(), "read-text failed: {}", err);
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
