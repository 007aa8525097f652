#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    routes::{
        card_form::{delete_subject, post_field, post_subject_field, put_subject},
        card_page::{get_card, internal_get_preview},
        images::{get_placeholder, internal_get_thumbnail, post_image},
        index::get_index_route,
        sse::sse_feed,
    },
    state::AdmitState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod card;
mod config;
mod data;
mod error;
mod maud_conveniences;
mod routes;
mod state;
mod store;


async fn shutdown_signal(state: AdmitState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
    state.sensible_shutdown().await;
}

fn app(state: AdmitState) -> Router {
    let max_upload_bytes = state.config().max_upload_bytes();

    Router::new()
        .route("/", get(get_index_route))
        .route("/card/{id}", get(get_card))
        .route("/card/{id}/preview", get(internal_get_preview))
        .route("/card/{id}/field/{field}", post(post_field))
        .route(
            "/card/{id}/image/{slot}",
            get(internal_get_thumbnail).post(post_image),
        )
        .route("/card/{id}/subjects", put(put_subject))
        .route("/card/{id}/subjects/{index}", delete(delete_subject))
        .route(
            "/card/{id}/subjects/{index}/{field}",
            post(post_subject_field),
        )
        .route("/card/{id}/sse", get(sse_feed))
        .route("/placeholder/{width}/{height}", get(get_placeholder))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let dotenv_result = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv_result {
        debug!(?e, "No .env file loaded, using the process environment");
    }

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let state = AdmitState::new(config.clone());
    let _reaper = state.spawn_session_reaper();

    let listener = TcpListener::bind(config.server_ip())
        .await
        .expect("unable to listen on server ip");

    info!(server_ip = config.server_ip(), "Listening");
    axum::serve(listener, app(state.clone()))
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("unable to serve app");
}
