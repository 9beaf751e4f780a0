use std::sync::Arc;

use anyhow::{anyhow, Context};
use axum::{
    extract::{FromRef, MatchedPath},
    http::Request,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::configuration::Settings;
use crate::dispatcher::Dispatcher;
use crate::email_client::EmailClient;
use crate::routes::{check_health, method_not_allowed, send_notification};

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl FromRef<AppState> for Arc<Dispatcher> {
    fn from_ref(state: &AppState) -> Self {
        state.dispatcher.clone()
    }
}

pub fn get_app_state(configuration: &Settings) -> Result<AppState, anyhow::Error> {
    let sender = configuration
        .email_client
        .sender()
        .map_err(|error| anyhow!(error))
        .context("Invalid sender email address")?;

    let email_client = EmailClient::new(
        configuration.email_client.base_url.clone(),
        sender,
        configuration.email_client.authorization_token.clone(),
        configuration.email_client.timeout(),
    )
    .context("Failed to build the email client")?;

    let dispatcher = Dispatcher::new(&configuration.notification, email_client);

    Ok(AppState {
        dispatcher: Arc::new(dispatcher),
    })
}

pub async fn run(listener: TcpListener, app_state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(app_state)).await
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/send-notification",
            post(send_notification).fallback(method_not_allowed),
        )
        .route("/health_check", get(check_health))
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                tracing::info_span!(
                    "HTTP request",
                    method = ?request.method(),
                    path,
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}
