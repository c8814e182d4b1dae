use std::error::Error;

use clap::Parser;
use tracing::info;

use cogdemo_core::config::load_dotenv;
use cogdemo_core::consts::DEFAULT_QUERY;
use cogdemo_core::format::ConversationReport;
use cogdemo_core::{ConfigKey, ConversationSession, Service, ServiceArgs};

#[derive(Parser)]
#[command(name = "clu")]
#[command(about = "Conversational language understanding demo")]
struct Args {
    #[arg(default_value = DEFAULT_QUERY, help = "Utterance to analyze")]
    query: String,

    #[command(flatten)]
    service: ServiceArgs,
}

fn main() -> Result<(), Box<dyn Error>> {
    cogdemo_core::init_tracing();
    load_dotenv();

    let args = Args::parse();
    info!("Starting conversation analysis");

    let config = args.service.into_config(ConfigKey::CONVERSATION)?;
    let session = ConversationSession::new(config)?;

    let prediction = session.analyze(&args.query)?;
    print!("{}", ConversationReport(&prediction));

    info!("Conversation analysis completed");
    Ok(())
}
