use std::sync::Arc;

use crate::notifications::escalation::EscalationNotifier;
use crate::notifications::render::MessageRenderer;
use crate::notifications::resolver::customer_channel;
use crate::notifications::types::{DeliveryReceipt, NotificationRequest};
use crate::slack::{ChatDelivery, DeliveryError};

/// The failure taxonomy callers see. The dispatcher is the only place that
/// translates collaborator errors into these variants.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("channel '{channel}' for customer '{customer}' not found")]
    DestinationNotFound { customer: String, channel: String },
    #[error("delivery failed: {0}")]
    Delivery(String),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

pub type DispatchOutcome = Result<DeliveryReceipt, DispatchError>;

/// Orchestrates one notification: validate, resolve, render, deliver, and
/// escalate when the destination does not exist.
pub struct Dispatcher {
    delivery: Arc<dyn ChatDelivery>,
    renderer: MessageRenderer,
    escalation: EscalationNotifier,
}

impl Dispatcher {
    pub fn new(
        delivery: Arc<dyn ChatDelivery>,
        renderer: MessageRenderer,
        escalation: EscalationNotifier,
    ) -> Self {
        Self {
            delivery,
            renderer,
            escalation,
        }
    }

    pub async fn dispatch(&self, request: &NotificationRequest) -> DispatchOutcome {
        request
            .validate()
            .map_err(DispatchError::Validation)?;

        let channel = customer_channel(&request.customer);
        let text = self.renderer.render(request).await;

        match self.delivery.post_message(&channel, &text).await {
            Ok(message_id) => {
                tracing::info!(
                    event = "notification_delivered",
                    channel = %channel,
                    customer = %request.customer,
                    "notification delivered"
                );
                Ok(DeliveryReceipt {
                    channel,
                    message_id,
                })
            }
            Err(DeliveryError::ChannelNotFound { .. }) => {
                tracing::warn!(
                    event = "destination_not_found",
                    channel = %channel,
                    customer = %request.customer,
                    "customer channel not found, escalating"
                );
                self.escalation
                    .notify_channel_missing(&request.customer, &channel)
                    .await;
                Err(DispatchError::DestinationNotFound {
                    customer: request.customer.clone(),
                    channel,
                })
            }
            Err(err @ (DeliveryError::Api { .. } | DeliveryError::Transport { .. })) => {
                tracing::error!(
                    event = "delivery_failed",
                    channel = %channel,
                    customer = %request.customer,
                    error = %err,
                    "notification delivery failed"
                );
                Err(DispatchError::Delivery(err.to_string()))
            }
            Err(err @ DeliveryError::Unexpected { .. }) => {
                tracing::error!(
                    event = "delivery_unexpected",
                    channel = %channel,
                    customer = %request.customer,
                    error = %err,
                    "unclassified delivery failure"
                );
                Err(DispatchError::Unexpected(err.to_string()))
            }
        }
    }
}
