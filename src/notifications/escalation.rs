use std::sync::Arc;

use crate::slack::ChatDelivery;

/// Best-effort reporter for unreachable customer channels. Posts a
/// diagnostic into a fixed operations channel; its own failures are logged
/// and swallowed so they can never mask the original dispatch outcome.
pub struct EscalationNotifier {
    delivery: Arc<dyn ChatDelivery>,
    ops_channel: String,
}

impl EscalationNotifier {
    pub fn new(delivery: Arc<dyn ChatDelivery>, ops_channel: String) -> Self {
        Self {
            delivery,
            ops_channel,
        }
    }

    pub async fn notify_channel_missing(&self, customer: &str, attempted_channel: &str) {
        let message = format!(
            "Channel Not Found Error\n\
             Failed to post notification for customer: `{customer}`\n\
             Attempted channel: `{attempted_channel}`\n\
             Please verify the channel exists and the bot has access."
        );

        match self.delivery.post_message(&self.ops_channel, &message).await {
            Ok(_) => {
                tracing::info!(
                    event = "escalation_posted",
                    ops_channel = %self.ops_channel,
                    customer = %customer,
                    "posted channel-not-found escalation"
                );
            }
            Err(err) => {
                tracing::error!(
                    event = "escalation_failed",
                    ops_channel = %self.ops_channel,
                    customer = %customer,
                    error = %err,
                    "failed to post escalation"
                );
            }
        }
    }
}
