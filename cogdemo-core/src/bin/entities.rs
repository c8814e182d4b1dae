use std::error::Error;

use clap::Parser;
use tracing::{info, warn};

use cogdemo_core::config::load_dotenv;
use cogdemo_core::consts::DEFAULT_DOCUMENT;
use cogdemo_core::format::EntityReport;
use cogdemo_core::{ConfigKey, EntitySession, EntityTask, Service, ServiceArgs};

#[derive(Parser)]
#[command(name = "entities")]
#[command(about = "Text entity recognition demo")]
struct Args {
    #[arg(help = "Documents to analyze, defaults to a sample sentence")]
    documents: Vec<String>,

    #[arg(long, help = "Recognize personal information and print the redacted text")]
    pii: bool,

    #[command(flatten)]
    service: ServiceArgs,
}

fn main() -> Result<(), Box<dyn Error>> {
    cogdemo_core::init_tracing();
    load_dotenv();

    let args = Args::parse();

    let documents = if args.documents.is_empty() {
        vec![DEFAULT_DOCUMENT.to_string()]
    } else {
        args.documents
    };
    let task = if args.pii {
        EntityTask::PiiEntityRecognition
    } else {
        EntityTask::EntityRecognition
    };
    info!("Starting {:?} on {} documents", task, documents.len());

    let config = args.service.into_config(ConfigKey::SERVICE)?;
    let session = EntitySession::new(config, task)?;

    let recognition = session.analyze(&documents)?;
    for failure in recognition.failures() {
        warn!(kind = ?failure.kind(), "{}", failure);
    }
    print!("{}", EntityReport(&recognition));

    Ok(())
}
