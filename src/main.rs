use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use advisor::core::action::ask_once;
use advisor::core::config::{self, AdvisorConfig, CliOverrides};
use advisor::core::state::App;
use advisor::service::HttpAdvisorClient;

#[derive(Parser)]
#[command(name = "advisor", about = "Chat with the AI Financial Advisor from your terminal")]
struct Args {
    /// Query endpoint URL (overrides config and ADVISOR_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request timeout in seconds, 0 to wait forever
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "advisor.log")]
    log_file: String,

    /// Ask one question, print the reply and exit
    #[arg(long, value_name = "QUESTION")]
    ask: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{e}, using defaults");
        eprintln!("Warning: {e}, using defaults");
        AdvisorConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            endpoint: args.endpoint.as_deref(),
            timeout_secs: args.timeout,
        },
    );
    log::info!(
        "Advisor starting up (endpoint: {}, timeout: {:?})",
        resolved.endpoint,
        resolved.timeout
    );

    let client = HttpAdvisorClient::new(&resolved.endpoint, resolved.timeout)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let client = Arc::new(client);

    if let Some(question) = args.ask {
        let mut app = App::from_config(client, &resolved);
        match ask_once(&mut app, question).await {
            Some(answered) => {
                println!("{}", answered.message.content);
                if let Some(err) = answered.failure {
                    eprintln!(
                        "Note: {} did not answer ({}), this is a demo reply",
                        resolved.endpoint, err
                    );
                }
            }
            None => eprintln!("Nothing to ask: the question is blank"),
        }
        return Ok(());
    }

    advisor::tui::run(&resolved, client)
}
