use std::env;
use std::sync::{Arc, Mutex, PoisonError};

use kids_gaming_site::countdown::SystemClock;
use kids_gaming_site::html::render_page;
use kids_gaming_site::loader::{DocumentSource, LoadPolicy};
use kids_gaming_site::page::PageState;
use kids_gaming_site::site;
use tracing::{error, info, instrument, warn};
use tracing_subscriber::EnvFilter;

type Error = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone)]
struct Config {
    data_url: String,
    output: String,
    policy: LoadPolicy,
    follow: bool,
}

impl Config {
    fn from_env() -> Self {
        let policy = match env::var("SITE_LOAD_POLICY").ok().as_deref() {
            Some("strict") => LoadPolicy::Strict,
            Some("lenient") | None => LoadPolicy::Lenient,
            Some(other) => {
                warn!(policy = %other, "Unknown SITE_LOAD_POLICY, using lenient");
                LoadPolicy::Lenient
            }
        };
        let follow = env::var("SITE_FOLLOW")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            data_url: env::var("SITE_DATA_URL").unwrap_or_else(|_| "data".to_string()),
            output: env::var("SITE_OUTPUT").unwrap_or_else(|_| "index.html".to_string()),
            policy,
            follow,
        }
    }
}

#[instrument(skip(page))]
fn write_page(path: &str, page: &Mutex<PageState>) -> Result<(), Error> {
    let html = render_page(&page.lock().unwrap_or_else(PoisonError::into_inner));
    std::fs::write(path, html)?;
    info!(path = %path, "Wrote page");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init();

    let config = Config::from_env();
    info!(?config, "Starting site sync");

    let source = DocumentSource::new(config.data_url.clone());
    let page = Arc::new(Mutex::new(PageState::new()));

    let countdown = match site::sync(&source, config.policy, Arc::clone(&page), SystemClock).await {
        Ok(countdown) => countdown,
        Err(e) => {
            // The page still gets written so the failure notice is visible.
            error!(error = %e, "Site sync failed");
            None
        }
    };
    write_page(&config.output, &page)?;

    let Some(mut countdown) = countdown else {
        return Ok(());
    };
    if !config.follow {
        countdown.stop();
        return Ok(());
    }

    let interrupted = tokio::select! {
        _ = tokio::signal::ctrl_c() => true,
        state = countdown.finished() => {
            info!(?state, "Countdown finished");
            false
        }
    };
    if interrupted {
        info!("Interrupted; stopping countdown");
        countdown.stop();
    }
    write_page(&config.output, &page)?;
    Ok(())
}
