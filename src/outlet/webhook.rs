use super::*;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct AnnounceRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    text: &'a str,
}

/// POSTs JSON to a fixed endpoint and treats any 2xx as delivered
struct Webhook {
    client: reqwest::Client,
    url: reqwest::Url,
    timeout: Duration,
}

impl Webhook {
    fn new(url: &str, timeout: Duration) -> OutletResult<Self> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| OutletError::ConfigError(format!("{}: {}", url, e)))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OutletError::ConfigError(e.to_string()))?;
        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    async fn post<T: Serialize + ?Sized>(&self, body: &T) -> OutletResult<()> {
        let response = self
            .client
            .post(self.url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OutletError::Timeout(self.timeout)
                } else {
                    OutletError::Delivery(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(OutletError::Delivery(format!(
                "{} returned {}",
                self.url,
                response.status()
            )));
        }
        Ok(())
    }
}

/// Hands lines to a speech service; the request completes once the line was spoken
pub struct WebhookNarrator {
    hook: Webhook,
}

impl WebhookNarrator {
    pub fn new(url: &str, timeout: Duration) -> OutletResult<Self> {
        Ok(Self {
            hook: Webhook::new(url, timeout)?,
        })
    }
}

#[async_trait]
impl Narrator for WebhookNarrator {
    async fn announce(&self, text: &str) -> OutletResult<()> {
        self.hook.post(&AnnounceRequest { text }).await
    }

    fn name(&self) -> &str {
        "webhook"
    }
}

/// Hands private messages to an SMS or chat gateway
pub struct WebhookMessenger {
    hook: Webhook,
}

impl WebhookMessenger {
    pub fn new(url: &str, timeout: Duration) -> OutletResult<Self> {
        Ok(Self {
            hook: Webhook::new(url, timeout)?,
        })
    }
}

#[async_trait]
impl Messenger for WebhookMessenger {
    async fn send(&self, to: &ContactId, text: &str) -> OutletResult<()> {
        self.hook.post(&SendRequest { to, text }).await
    }

    fn name(&self) -> &str {
        "webhook"
    }
}
