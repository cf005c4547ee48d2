use crate::core::{ConfigProvider, RelayClient};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{header, Client};
use std::time::Duration;

/// Posts submissions to a hosted form relay (Formspree-style endpoint).
#[derive(Debug, Clone)]
pub struct HttpRelay {
    endpoint: String,
    client: Client,
}

impl HttpRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.relay_timeout_seconds()))
            .build()?;
        Ok(Self {
            endpoint: config.relay_endpoint().to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RelayClient for HttpRelay {
    async fn submit(&self, fields: &[(String, String)]) -> Result<()> {
        let form = fields
            .iter()
            .fold(Form::new(), |form, (key, value)| {
                form.text(key.clone(), value.clone())
            });

        tracing::debug!("Posting {} fields to relay: {}", fields.len(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Relay response status: {}", status);

        if status.is_success() {
            Ok(())
        } else {
            Err(BookingError::RelayStatusError {
                status: status.as_u16(),
            })
        }
    }
}
