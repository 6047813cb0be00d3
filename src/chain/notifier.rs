//! Outbound webhook notifications for qualifying burns.
//!
//! Delivery is best effort: a failed POST is logged and dropped, never
//! propagated back into the monitoring loop.

use crate::classifier::types::BurnVerdict;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct BurnNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl BurnNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            client,
            webhook_url,
        }
    }

    /// POST the verdict as JSON to the configured webhook, if any.
    pub async fn notify(&self, signature: &str, verdict: &BurnVerdict) {
        let Some(url) = &self.webhook_url else {
            debug!("no webhook configured, skipping notification");
            return;
        };

        let payload = serde_json::json!({
            "signature": signature,
            "verdict": verdict,
        });

        match self.client.post(url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                info!(signature, "burn notification delivered");
            }
            Ok(response) => {
                warn!(
                    signature,
                    status = %response.status(),
                    "webhook rejected burn notification"
                );
            }
            Err(e) => {
                warn!(signature, "failed to deliver burn notification: {}", e);
            }
        }
    }
}
