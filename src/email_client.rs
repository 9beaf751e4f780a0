use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::domain::SenderEmail;

/// Client for the transactional email provider (Resend-compatible `POST /emails`).
#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: SenderEmail,
    authorization_token: Secret<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: SenderEmail,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }

    pub fn sender(&self) -> &SenderEmail {
        &self.sender
    }

    #[tracing::instrument(
        name = "Submitting an email to the provider",
        skip(self, message),
        fields(recipient = %message.to)
    )]
    pub async fn send_email(&self, message: &EmailMessage) -> Result<(), reqwest::Error> {
        let url = format!("{}/emails", self.base_url.trim_end_matches('/'));

        self.http_client
            .post(url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(message)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
