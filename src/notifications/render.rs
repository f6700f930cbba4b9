use std::sync::Arc;

use serde_json::json;

use crate::generation::TextGenerator;
use crate::notifications::types::{NotificationRequest, NotificationType};

/// Two-tier renderer: an LLM-backed formatter first, a deterministic
/// template second. Rendering as a whole never fails; generator failures are
/// logged and absorbed.
pub struct MessageRenderer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl MessageRenderer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub fn fallback_only() -> Self {
        Self { generator: None }
    }

    pub async fn render(&self, request: &NotificationRequest) -> String {
        if let Some(generator) = &self.generator {
            match generator.generate(&build_prompt(request)).await {
                Ok(text) => return text,
                Err(err) => {
                    tracing::warn!(
                        event = "render_fallback",
                        customer = %request.customer,
                        error = %err,
                        "generator failed, using template fallback"
                    );
                }
            }
        }
        fallback_message(request)
    }
}

fn build_prompt(request: &NotificationRequest) -> String {
    let payload = json!({
        "type": request.notification_type,
        "customer": request.customer,
        "data": request.data,
        "campaign": request.campaign,
        "links": request.links,
    });
    format!("Format this notification: {payload}")
}

/// Deterministic per-type templates. The closed `NotificationType` enum
/// guarantees every request matches an arm.
pub fn fallback_message(request: &NotificationRequest) -> String {
    let campaign_suffix = match &request.campaign {
        Some(campaign) => format!(" on {campaign}"),
        None => String::new(),
    };
    let data = request.data.joined();
    let customer = &request.customer;

    match request.notification_type {
        NotificationType::Change => {
            format!("Completed for {customer}{campaign_suffix}: {data}")
        }
        NotificationType::Learning => {
            format!("New insight for {customer}{campaign_suffix}: {data}")
        }
        NotificationType::Update => {
            format!("Action Required for {customer}{campaign_suffix}: {data}")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::{MessageRenderer, build_prompt, fallback_message};
    use crate::generation::{GenerationError, TextGenerator};
    use crate::notifications::types::{NotificationData, NotificationRequest, NotificationType};

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::RequestFailed("quota exceeded".to_string()))
        }
    }

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    fn request(
        notification_type: NotificationType,
        customer: &str,
        data: NotificationData,
        campaign: Option<&str>,
        links: Vec<&str>,
    ) -> NotificationRequest {
        NotificationRequest {
            notification_type,
            customer: customer.to_string(),
            campaign: campaign.map(str::to_string),
            data,
            links: links.into_iter().map(str::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn generator_output_is_used_when_it_succeeds() {
        let renderer = MessageRenderer::new(Some(Arc::new(FixedGenerator("Hi from Blue!"))));
        let req = request(
            NotificationType::Change,
            "acme",
            NotificationData::Single("done".to_string()),
            None,
            vec![],
        );
        assert_eq!(renderer.render(&req).await, "Hi from Blue!");
    }

    #[tokio::test]
    async fn generator_failure_falls_back_to_template() {
        let renderer = MessageRenderer::new(Some(Arc::new(FailingGenerator)));
        let req = request(
            NotificationType::Change,
            "hsbc",
            NotificationData::Many(vec!["a".to_string(), "b".to_string()]),
            None,
            vec![],
        );
        let text = renderer.render(&req).await;
        assert!(!text.is_empty());
        assert!(text.contains("hsbc"));
        assert!(text.contains("a, b"));
        assert!(!text.contains(" on "));
    }

    #[tokio::test]
    async fn update_fallback_matches_template_exactly() {
        let renderer = MessageRenderer::new(Some(Arc::new(FailingGenerator)));
        let req = request(
            NotificationType::Update,
            "anthropic",
            NotificationData::Single("Budget needed".to_string()),
            Some("AI Engineers, Video"),
            vec!["https://example.com/budget"],
        );
        let text = renderer.render(&req).await;
        assert_eq!(
            text,
            "Action Required for anthropic on AI Engineers, Video: Budget needed"
        );
    }

    #[test]
    fn learning_fallback_has_its_own_template() {
        let req = request(
            NotificationType::Learning,
            "acme",
            NotificationData::Single("CTR up 12%".to_string()),
            Some("Spring Launch"),
            vec![],
        );
        assert_eq!(
            fallback_message(&req),
            "New insight for acme on Spring Launch: CTR up 12%"
        );
    }

    #[test]
    fn prompt_carries_the_structured_payload() {
        let req = request(
            NotificationType::Update,
            "acme",
            NotificationData::Many(vec!["x".to_string()]),
            Some("Spring"),
            vec!["https://example.com"],
        );
        let prompt = build_prompt(&req);
        assert!(prompt.starts_with("Format this notification: "));
        assert!(prompt.contains("\"update\""));
        assert!(prompt.contains("\"acme\""));
        assert!(prompt.contains("https://example.com"));
    }
}
