use std::sync::Arc;

use checkout_core::adapters::http::{build_app, AppState, SiteSettings};
use checkout_core::adapters::{
    InMemoryReferralLedger, JwtAccessTokenService, LoggingNotifier, SlackWebhookNotifier,
    StripeConfig, StripePaymentAdapter, YamlSpeakerDirectory,
};
use checkout_core::application::handlers::AddOnOffer;
use checkout_core::config::AppConfig;
use checkout_core::ports::OpsNotifier;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let addr = config.server.bind_addr()?;
    tracing::info!(
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        "Starting checkout core"
    );

    let state = build_state(&config).await?;
    let app = build_app(state, &config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn build_state(config: &AppConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let mut stripe = StripeConfig::from_secret(config.payment.stripe_api_key.clone())
        .with_timeout(std::time::Duration::from_secs(config.payment.timeout_secs));
    if let Some(url) = &config.payment.api_base_url {
        stripe = stripe.with_base_url(url.clone());
    }
    let payment_provider = Arc::new(StripePaymentAdapter::new(stripe)?);

    let notifier: Arc<dyn OpsNotifier> = match config.notifications.webhook_url() {
        Some(url) => Arc::new(SlackWebhookNotifier::new(
            url.clone(),
            config.notifications.timeout(),
        )?),
        None => {
            tracing::warn!("No Slack webhook configured, notifications will only be logged");
            Arc::new(LoggingNotifier)
        }
    };

    let referral_ledger = match &config.data.referrers_path {
        Some(path) => InMemoryReferralLedger::load(path).await?,
        None => InMemoryReferralLedger::new(),
    };

    let mut site = SiteSettings::new(config.site.base_url()).with_token_ttl(config.access_token.ttl());
    if let Some((label, unit_price)) = config.site.add_on() {
        site = site.with_add_on(AddOnOffer {
            label: label.to_string(),
            unit_price,
        });
    }

    Ok(AppState {
        payment_provider,
        notifier,
        speaker_directory: Arc::new(YamlSpeakerDirectory::new(&config.data.speakers_path)),
        referral_ledger: Arc::new(referral_ledger),
        access_tokens: Arc::new(JwtAccessTokenService::new(&config.access_token.secret)),
        site: Arc::new(site),
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
