use crate::domain::processor::ProcessorClientBox;
use crate::error::Result;
use tracing::info;

/// Keeps the processor's webhook subscription list pointing at exactly one
/// endpoint: ours. Foreign endpoints are unsubscribed, a paused matching one
/// is resumed, and a missing one is registered.
pub struct SubscriptionMaintenance {
    processor: ProcessorClientBox,
    endpoint_url: String,
    secret: String,
}

impl SubscriptionMaintenance {
    pub fn new(processor: ProcessorClientBox, endpoint_url: String, secret: String) -> Self {
        Self {
            processor,
            endpoint_url,
            secret,
        }
    }

    /// Returns the location of the active subscription for our endpoint.
    pub async fn ensure_endpoint(&self) -> Result<String> {
        let subscriptions = self.processor.list_webhook_subscriptions().await?;
        let mut ours = None;

        for subscription in subscriptions {
            if subscription.url != self.endpoint_url {
                info!(url = %subscription.url, "removing foreign webhook subscription");
                self.processor
                    .delete_webhook_subscription(&subscription.location)
                    .await?;
                continue;
            }

            if subscription.paused {
                info!(url = %subscription.url, "unpausing webhook subscription");
                self.processor
                    .unpause_webhook_subscription(&subscription.location)
                    .await?;
            }
            ours = Some(subscription.location);
        }

        match ours {
            Some(location) => Ok(location),
            None => {
                info!(url = %self.endpoint_url, "registering webhook endpoint");
                let location = self
                    .processor
                    .register_webhook_subscription(&self.endpoint_url, &self.secret)
                    .await?;
                Ok(location)
            }
        }
    }
}
