//! # Stockroom Binary
//!
//! Assembles the in-memory store, the ticker task and the page layer, then
//! renders each path given on the command line as JSON.
//!
//! ```text
//! stockroom / /stock-rooms '#/s/SAMSUNG'
//! ```

use std::sync::Arc;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sr_api::router::Navigator;
use sr_api::ticker::{shared_tape, spawn_ticker};
use sr_api::AppState;
use sr_config::{LogConfig, Settings};
use sr_store_memory::{MemoryStore, StoreSettings};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log);

    let store_settings = StoreSettings {
        latency: settings.store.latency(),
    };
    let store = Arc::new(if settings.store.seed {
        MemoryStore::seeded(store_settings)
    } else {
        MemoryStore::new(store_settings)
    });
    let state = AppState::from_store(store);

    let tape = shared_tape();
    let ticker = settings.ticker.enabled.then(|| {
        spawn_ticker(
            tape.clone(),
            settings.ticker.interval(),
            StdRng::from_os_rng(),
        )
    });

    info!(
        seeded = settings.store.seed,
        latency_ms = settings.store.latency_ms,
        ticker = settings.ticker.enabled,
        "stockroom ready"
    );

    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        paths.push("/".to_string());
    }

    let mut nav = Navigator::from_hash("");
    for path in &paths {
        nav.navigate(path);
        let page = state
            .render(nav.current())
            .await
            .with_context(|| format!("rendering {}", nav.current()))?;
        println!("{}", serde_json::to_string_pretty(&page)?);
    }

    if let Some(handle) = ticker {
        handle.abort();
    }
    Ok(())
}
