use serde::{Deserialize, Serialize};

/// JSON envelope shared by every endpoint of the booking API.
///
/// `{ "success": true, "data": .., "id": .. }` on success and
/// `{ "success": false, "message": .. }` on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            id: None,
            message: None,
        }
    }

    pub fn created(id: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            id: Some(id.into()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            id: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Booking;

    #[test]
    fn test_failure_body_deserializes_without_data() {
        let body: Envelope<Booking> =
            serde_json::from_str(r#"{ "success": false, "message": "Missing required fields" }"#)
                .unwrap();

        assert!(!body.success);
        assert!(body.data.is_none());
        assert!(body.id.is_none());
        assert_eq!(body.message.as_deref(), Some("Missing required fields"));
    }

    #[test]
    fn test_failure_serializes_without_empty_fields() {
        let json = serde_json::to_value(Envelope::failure("Tour not found")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "message": "Tour not found" }));
    }
}
