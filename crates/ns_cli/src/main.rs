use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use ns_inference::{create_model, Config, EntityBooster, EntityStrategy, ModelBackend, Summarizer};
use ns_scrapers::{handle_command, init_logging, run_interactive, HttpFetcher, SummarizeCommands, SummaryManager};
use ns_web::state::DEFAULT_PDF_DIR;
use ns_web::AppState;

#[derive(Debug, Clone, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if !current_number.is_empty() {
                let num = current_number
                    .parse::<u64>()
                    .map_err(|_| format!("Duration too large: {}", s))?;
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| format!("Duration too large: {}", s))?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // bare numbers are seconds
        if !current_number.is_empty() {
            total_seconds = current_number
                .parse::<u64>()
                .ok()
                .and_then(|secs| total_seconds.checked_add(secs))
                .ok_or_else(|| format!("Duration too large: {}", s))?;
            has_unit = true;
        }

        if !has_unit || total_seconds == 0 {
            return Err("Duration must be a positive number of seconds, e.g. 10s or 1m30s".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize news articles, homepages and PDFs", long_about = None)]
struct Cli {
    /// Summarization backend: huggingface (default), ollama, dummy
    #[arg(long, global = true, default_value = "huggingface")]
    model: ModelBackend,
    /// Base URL of the model endpoint
    #[arg(long, global = true)]
    model_url: Option<String>,
    #[arg(long, global = true)]
    model_name: Option<String>,
    #[arg(long, global = true, env = "HF_API_TOKEN", hide_env_values = true)]
    api_key: Option<String>,
    /// Page download timeout (e.g. 10s, 1m)
    #[arg(long, global = true, default_value = "10s")]
    timeout: HumanDuration,
    /// Entity handling: none, boost (list what the summary left out), emphasize (name people and dates up front)
    #[arg(long, global = true, default_value = "none")]
    entities: EntityStrategy,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Summarize(SummarizeCommands),
    /// Serve the summarizer over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
        /// Directory for uploaded PDFs
        #[arg(long, default_value = DEFAULT_PDF_DIR)]
        pdf_dir: PathBuf,
    },
}

fn build_manager(cli: &Cli) -> ns_core::Result<SummaryManager> {
    let config = Config {
        backend: cli.model,
        api_key: cli.api_key.clone(),
        model_name: cli.model_name.clone(),
        model_url: cli.model_url.clone(),
    };
    let model = create_model(&config)?;
    info!("🧠 Using {} backend ({})", config.backend, model.name());

    let summarizer = Arc::new(Summarizer::new(model));
    let fetcher = Arc::new(HttpFetcher::new(cli.timeout.0)?);
    Ok(SummaryManager::new(fetcher, summarizer).with_entities(EntityBooster::default(), cli.entities))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    let manager = build_manager(&cli)?;

    match cli.command {
        None => run_interactive(&manager).await?,
        Some(Commands::Summarize(command)) => handle_command(command, &manager).await?,
        Some(Commands::Serve { addr, pdf_dir }) => {
            ns_web::serve(addr, AppState::new(Arc::new(manager), pdf_dir)).await?
        }
    }

    Ok(())
}
