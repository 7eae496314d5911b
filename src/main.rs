//! honeypot - HTTP server for the agentic scam honeypot.
//!
//! Reads configuration from `HONEYPOT__*` environment variables (and an
//! optional `.env`), wires the in-memory store, collaborators, dispatcher and
//! maintenance worker, and serves the axum router until Ctrl-C.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use honeypot::adapters::http::{
    build_router, ApiKeyState, DecisionHandlers, HoneypotHandlers, ReviewHandlers, RouterSettings,
    SessionHandlers,
};
use honeypot::adapters::{
    HttpReportSink, InMemoryDecisionLog, InMemorySessionStore, MaintenanceConfig, MaintenanceWorker,
    OpenAiReplyGenerator, PatternIntelligenceExtractor, PatternScamClassifier,
    PersonaReplyGenerator,
};
use honeypot::application::handlers::report::CallbackDispatcher;
use honeypot::application::{
    ConversationCoordinator, DeleteSessionHandler, GetSessionHandler, ListPendingSessionsHandler,
    ListReviewQueueHandler, MarkReviewedHandler, ReviewStatsHandler,
};
use honeypot::config::AppConfig;
use honeypot::ports::{DecisionLog, ReplyGenerator, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    // Storage
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::with_config(
        config.storage.shard_count,
        config.storage.max_update_attempts,
    ));

    // Report delivery
    let sink = HttpReportSink::new(config.callback.url.clone(), config.callback.timeout())?;
    let dispatcher = CallbackDispatcher::new(Arc::clone(&store), Arc::new(sink))
        .with_retry_policy(config.callback.retry_policy())
        .with_max_concurrent_deliveries(config.callback.max_concurrent_deliveries);

    // Detection audit
    let decisions: Arc<dyn DecisionLog> = Arc::new(InMemoryDecisionLog::new());

    // Collaborators
    let generator: Arc<dyn ReplyGenerator> = match config.ai.generator_config() {
        Some(ai) => {
            tracing::info!(model = %ai.model, "Using OpenAI-compatible reply generator");
            Arc::new(OpenAiReplyGenerator::new(ai)?)
        }
        None => {
            tracing::info!("No AI key configured; using persona templates");
            Arc::new(PersonaReplyGenerator::new())
        }
    };

    let coordinator = ConversationCoordinator::new(
        Arc::clone(&store),
        Arc::new(PatternScamClassifier::new()),
        Arc::new(PatternIntelligenceExtractor::new()),
        generator,
        dispatcher.clone(),
    )
    .with_policy(config.engagement.policy())
    .with_collaborator_timeout(config.engagement.collaborator_timeout())
    .with_decision_log(Arc::clone(&decisions));

    // Maintenance worker
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut maintenance = MaintenanceConfig::default()
        .with_sweep_interval(config.storage.sweep_interval());
    if let Some(ttl) = config.storage.session_ttl() {
        maintenance = maintenance.with_session_ttl(ttl);
    }
    let worker = MaintenanceWorker::new(Arc::clone(&store), dispatcher, maintenance);
    let worker_handle = tokio::spawn(async move { worker.run(shutdown_rx).await });

    // HTTP
    let api_key = ApiKeyState::new(config.auth.api_key.clone());
    if !api_key.is_enabled() {
        tracing::warn!("No API key configured; requests are not authenticated");
    }
    let app = build_router(
        HoneypotHandlers::new(Arc::new(coordinator)),
        SessionHandlers::new(
            Arc::new(GetSessionHandler::new(Arc::clone(&store))),
            Arc::new(DeleteSessionHandler::new(Arc::clone(&store))),
            Arc::new(ListPendingSessionsHandler::new(Arc::clone(&store))),
        ),
        ReviewHandlers::new(
            Arc::new(ListReviewQueueHandler::new(Arc::clone(&store))),
            Arc::new(MarkReviewedHandler::new(Arc::clone(&store))),
            Arc::new(ReviewStatsHandler::new(Arc::clone(&store))),
        ),
        DecisionHandlers::new(decisions),
        api_key,
        &RouterSettings {
            cors_origins: config.server.allowed_origins(),
            request_timeout: config.server.request_timeout(),
        },
    );

    let addr = config.server.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "honeypot listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    worker_handle.await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.environment.json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
