use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use smartbox_card::Config;
use smartbox_card::RemoteCard;
use smartbox_card::RemoteHost;
use smartbox_card::api;
use smartbox_card::api::AppState;
use smartbox_card::registry;
use smartbox_card::remote::KeyActionLog;
use smartbox_card::resources;
use smartbox_card::resources::ResourceOutcome;
use smartbox_card::resources::ResourceStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Preview host for the NEO Smartbox remote card
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(default_value = "smartbox-card.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(config.logging.targets())
        .init();

    tracing::info!("smartbox-card starting");
    tracing::info!("Loaded config from: {}", args.config.display());

    for descriptor in registry::CARDS {
        registry::register_global(descriptor());
    }
    let custom_cards = registry::global()
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .custom_cards()
        .to_vec();

    let mut store = ResourceStore::new(config.dashboard.mode, config.dashboard.resources);
    match resources::register_card_resource(&mut store) {
        ResourceOutcome::Created => {
            tracing::info!("Card automatically registered as a dashboard resource")
        }
        ResourceOutcome::AlreadyPresent => {
            tracing::info!("Card already registered as a dashboard resource")
        }
        ResourceOutcome::ManualSetupRequired => {
            tracing::warn!("Dashboard is in YAML mode; add the card resource by hand")
        }
    }

    let key_actions = Arc::new(KeyActionLog::new());
    let host = Arc::new(RemoteHost::new(config.remotes, key_actions.clone()));
    tracing::info!("Serving {} remote(s)", host.states().len());

    let mut card = RemoteCard::new();
    card.set_config(config.card);
    card.set_state(host);
    tracing::info!("Card phase: {:?}", card.phase());

    let state = Arc::new(AppState::new(card, key_actions, custom_cards, store));

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received shutdown signal"),
            Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
        }
        let _ = shutdown_tx.send(());
    });

    tracing::info!("Press Ctrl+C to exit");
    api::serve(config.server.listen, config.server.port, state, shutdown_rx)
        .await
        .map_err(|e| anyhow::anyhow!("preview server failed: {}", e))?;

    tracing::info!("smartbox-card shutdown complete");
    Ok(())
}
