use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Change,
    Learning,
    Update,
}

/// Payload body of a notification. Requests carry either a single string or
/// an ordered list of strings; both shapes are legal and kept distinct
/// through deserialization rather than coerced at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationData {
    Single(String),
    Many(Vec<String>),
}

impl NotificationData {
    pub fn is_empty(&self) -> bool {
        match self {
            NotificationData::Single(value) => value.trim().is_empty(),
            NotificationData::Many(values) => {
                values.iter().all(|value| value.trim().is_empty())
            }
        }
    }

    /// Render the payload for template interpolation; sequences join with a
    /// uniform separator.
    pub fn joined(&self) -> String {
        match self {
            NotificationData::Single(value) => value.clone(),
            NotificationData::Many(values) => values.join(", "),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRequest {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub customer: String,
    #[serde(default)]
    pub campaign: Option<String>,
    pub data: NotificationData,
    #[serde(default)]
    pub links: Vec<String>,
}

impl NotificationRequest {
    /// Shape validation; runs before any collaborator is touched.
    pub fn validate(&self) -> Result<(), String> {
        if self.customer.trim().is_empty() {
            return Err("customer must be a non-empty identifier".to_string());
        }
        if self.data.is_empty() {
            return Err("data must contain at least one non-empty element".to_string());
        }
        Ok(())
    }
}

/// Evidence of a successful post; `message_id` is the provider token,
/// passed through untouched.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub channel: String,
    pub message_id: String,
}

#[cfg(test)]
mod tests {
    use super::{NotificationData, NotificationRequest, NotificationType};

    #[test]
    fn data_shapes_deserialize_distinctly() {
        let single: NotificationData = serde_json::from_str("\"one item\"").expect("single");
        assert_eq!(single, NotificationData::Single("one item".to_string()));

        let many: NotificationData = serde_json::from_str("[\"a\", \"b\"]").expect("many");
        assert_eq!(
            many,
            NotificationData::Many(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let request: NotificationRequest = serde_json::from_str(
            r#"{"type": "change", "customer": "acme", "data": "done"}"#,
        )
        .expect("request");
        assert_eq!(request.notification_type, NotificationType::Change);
        assert!(request.campaign.is_none());
        assert!(request.links.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn validation_rejects_blank_customer() {
        let request: NotificationRequest = serde_json::from_str(
            r#"{"type": "update", "customer": "  ", "data": "x"}"#,
        )
        .expect("request");
        assert!(request.validate().is_err());
    }

    #[test]
    fn validation_rejects_empty_data_sequence() {
        let request: NotificationRequest = serde_json::from_str(
            r#"{"type": "learning", "customer": "acme", "data": ["", "  "]}"#,
        )
        .expect("request");
        assert!(request.validate().is_err());
    }
}
