use std::sync::Arc;

use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use bank_app::commands::{self, AppContext, Console, Flow};
use bank_app::models::ListChange;
use bank_app::{AppConfig, BankApiClient, SessionStore};

fn env_filter() -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    for raw in ["bank_app=info", "reqwest=warn"] {
        match raw.parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive {}: {}", raw, e),
        }
    }
    filter
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so they never interleave with screen output
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("🏦 Starting bank client...");

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!("Backend: {}", config.api_base_url);

    let session = match SessionStore::open(config.session_file.clone()) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to open session store: {}", e);
            return;
        }
    };

    let client = match BankApiClient::with_timeout(&config.api_base_url, config.http_timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return;
        }
    };

    let ctx = AppContext::new(Arc::new(client), session.clone(), config);

    let mut changes = ctx.requests.subscribe().await;
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(ListChange::Replaced { version, len }) => {
                    debug!("Request list v{} replaced ({} items)", version, len)
                }
                Ok(ListChange::Removed { version, id, index }) => {
                    debug!("Request list v{} removed #{} at {}", version, id, index)
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Request list observer lagged by {} changes", n)
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    match session.current() {
        Some(s) => println!("👋 Welcome back, {}! Type `help` for commands.", s.name),
        None => println!("👋 Welcome! Type `login <email> <password>` or `help`."),
    }

    let mut console = Console::new();
    loop {
        let line = match console.read_line("bank> ").await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        match commands::handle_line(&ctx, &line, &mut console).await {
            Flow::Continue(output) => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Flow::Quit => break,
        }
    }

    info!("Goodbye");
}
