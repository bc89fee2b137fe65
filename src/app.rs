/*
 * Responsibility
 * - Config load → store session open → dependency wiring → Router assembly
 * - Middleware application (token auth, transport layers)
 * - axum::serve() with graceful shutdown; the store session is closed
 *   exactly once no matter how serving ends
 */
use std::net::SocketAddr;
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::{HttpTokenValidator, SharedValidator};
use crate::services::vessel::{HttpVesselClient, SharedVesselClient};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,consignment_service=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they aren't lost when stderr is
        // hidden by the process launcher.
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }));
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    // Fail fast on panics in development; keep serving in production.
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting consignment service in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    // Remote clients are wired before the store session opens; they do no
    // I/O at construction, and this keeps every post-open path below
    // funneled through the single close.
    let (vessels, auth) = build_clients(&config)?;

    // The store session is opened once, shared read-only by every call,
    // and closed exactly once below. Failing to open it is fatal: the
    // process must not begin serving without a datastore.
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.store_url)
        .await
        .with_context(|| format!("could not connect to datastore at {}", config.store_url))?;

    let state = AppState::new(db.clone(), vessels, auth);
    let app = build_router(state);

    // Capture the serve outcome instead of bailing early so the session
    // close below also runs when the server loop fails.
    let served = serve(app, config.addr).await;

    db.close().await;
    tracing::info!("datastore session closed");

    served
}

fn build_clients(config: &Config) -> Result<(SharedVesselClient, SharedValidator)> {
    tracing::info!(url = %config.vessel_service_url, "wiring vessel service client");
    let vessels: SharedVesselClient = Arc::new(HttpVesselClient::new(&config.vessel_service_url)?);

    tracing::info!(url = %config.auth_service_url, "wiring token validator");
    let auth: SharedValidator = Arc::new(HttpTokenValidator::new(&config.auth_service_url)?);

    Ok((vessels, auth))
}

fn build_router(state: AppState) -> Router {
    // Registration happens here, before the listener accepts anything: the
    // consignment routes go behind the token middleware, health stays open.
    let v1 = api::v1::routes();
    let v1 = middleware::auth::token::apply(v1, state.clone());

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .with_state(state);

    middleware::http::apply(router)
}

async fn serve(app: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server loop failed")?;

    Ok(())
}

/// Resolves on the first shutdown signal (SIGTERM from the orchestrator,
/// Ctrl-C in local dev).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }
}
