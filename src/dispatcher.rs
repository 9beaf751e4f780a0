use std::fmt::Debug;

use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::configuration::NotificationSettings;
use crate::domain::{Subscriber, SubscriberEmail};
use crate::email_client::{EmailClient, EmailMessage};
use crate::templates::TemplateRegistry;

/// Sends one localized launch email per subscriber and counts the outcomes.
pub struct Dispatcher {
    secret: Secret<String>,
    download_url: String,
    registry: TemplateRegistry,
    email_client: EmailClient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

enum DispatchOutcome {
    Sent,
    Failed(String),
}

impl Dispatcher {
    pub fn new(settings: &NotificationSettings, email_client: EmailClient) -> Self {
        Self {
            secret: settings.secret.clone(),
            download_url: settings.download_url.clone(),
            registry: TemplateRegistry::new(settings.default_language),
            email_client,
        }
    }

    #[tracing::instrument(
        name = "Dispatching launch notifications",
        skip(self, request),
        fields(total = tracing::field::Empty)
    )]
    pub async fn dispatch(&self, request: &Value) -> Result<DispatchResult, DispatchError> {
        self.authenticate(request)?;
        let subscribers = subscribers(request)?;
        tracing::Span::current().record("total", subscribers.len());

        let mut result = DispatchResult {
            total: subscribers.len(),
            successful: 0,
            failed: 0,
        };

        let mut submissions = JoinSet::new();
        for (position, entry) in subscribers.iter().enumerate() {
            let message = match self.compose(entry) {
                Ok(message) => message,
                Err(reason) => {
                    result.record(position, DispatchOutcome::Failed(reason));
                    continue;
                }
            };

            let email_client = self.email_client.clone();
            submissions.spawn(
                async move {
                    let outcome = match email_client.send_email(&message).await {
                        Ok(()) => DispatchOutcome::Sent,
                        Err(error) => DispatchOutcome::Failed(error.to_string()),
                    };
                    (position, outcome)
                }
                .in_current_span(),
            );
        }

        while let Some(joined) = submissions.join_next().await {
            let (position, outcome) =
                joined.context("A notification submission did not run to completion")?;
            result.record(position, outcome);
        }

        tracing::info!(
            successful = result.successful,
            failed = result.failed,
            "Launch notifications dispatched"
        );

        Ok(result)
    }

    fn authenticate(&self, request: &Value) -> Result<(), DispatchError> {
        match request.get("secret").and_then(Value::as_str) {
            Some(secret) if secret == self.secret.expose_secret().as_str() => Ok(()),
            _ => Err(DispatchError::Unauthorized),
        }
    }

    fn compose(&self, entry: &Value) -> Result<EmailMessage, String> {
        let subscriber = Subscriber::deserialize(entry)
            .map_err(|error| format!("Malformed subscriber record: {}", error))?;
        let recipient = SubscriberEmail::parse(subscriber.email)?;
        let template = self.registry.resolve(subscriber.language.as_deref());

        Ok(EmailMessage {
            from: self.email_client.sender().to_string(),
            to: recipient.to_string(),
            subject: template.subject.to_string(),
            html: template.render(&self.download_url),
        })
    }
}

impl DispatchResult {
    fn record(&mut self, position: usize, outcome: DispatchOutcome) {
        match outcome {
            DispatchOutcome::Sent => self.successful += 1,
            DispatchOutcome::Failed(reason) => {
                tracing::warn!(position, reason = %reason, "Failed to deliver a launch notification");
                self.failed += 1;
            }
        }
    }
}

fn subscribers(request: &Value) -> Result<&Vec<Value>, DispatchError> {
    match request.get("subscribers").and_then(Value::as_array) {
        Some(subscribers) if !subscribers.is_empty() => Ok(subscribers),
        _ => Err(DispatchError::MissingSubscribers),
    }
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Subscribers array is required")]
    MissingSubscribers,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
