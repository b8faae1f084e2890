use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prospect::core::ScenarioId;
use prospect::provider::{HttpSource, ResultsProvider, ResultsSource, SampleSource};

#[derive(Parser, Debug)]
#[command(
    name = "prospect",
    about = "Financial-projection results service and dashboard"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard shell and the results API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Fetch one scenario's results and print the provider snapshot as JSON
    Fetch {
        #[arg(long)]
        scenario: String,
        #[arg(
            long,
            help = "Results backend base URL; uses the builtin sample data when omitted"
        )]
        base_url: Option<String>,
        #[arg(
            long,
            default_value_t = 300,
            help = "Artificial delay for the sample source in milliseconds"
        )]
        delay_ms: u64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "prospect=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = prospect::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Fetch {
            scenario,
            base_url,
            delay_ms,
        } => {
            let source: Arc<dyn ResultsSource> = match base_url {
                Some(url) => Arc::new(HttpSource::new(url)),
                None => Arc::new(SampleSource::new(Duration::from_millis(delay_ms))),
            };
            let provider = ResultsProvider::new(source, Some(ScenarioId::new(scenario)));
            provider.activate().await;

            let state = provider.snapshot();
            let snapshot = serde_json::json!({
                "loading": state.loading,
                "error": state.error,
                "results": state.results.as_deref(),
            });
            println!("{snapshot}");
            if state.error.is_some() {
                std::process::exit(1);
            }
        }
    }
}
