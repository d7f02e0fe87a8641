use tracing::{info_span, Span};
use uuid::Uuid;

/// Diagnostics attached to one invocation of the relay.
#[derive(Clone, Debug)]
pub struct InvocationContext {
    request_id: String,
    event_kind: Option<String>,
}

impl InvocationContext {
    /// `request_id` is usually GitHub's delivery GUID. When there is none, a random one is
    /// generated so every invocation can still be told apart in the logs.
    pub fn new(request_id: Option<String>, event_kind: Option<String>) -> Self {
        Self {
            request_id: request_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            event_kind,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn event_kind(&self) -> Option<&str> {
        self.event_kind.as_deref()
    }

    /// Span every log line of the invocation is recorded in.
    pub fn span(&self) -> Span {
        info_span!(
            "invocation",
            request_id = %self.request_id,
            event = self.event_kind().unwrap_or("unknown"),
        )
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_delivery_id() {
        let context = InvocationContext::new(
            Some("72d3162e-cc78-11e3-81ab-4c9367dc0958".to_string()),
            Some("issues".to_string()),
        );

        assert_eq!(context.request_id(), "72d3162e-cc78-11e3-81ab-4c9367dc0958");
        assert_eq!(context.event_kind(), Some("issues"));
    }

    #[test]
    fn generates_request_id() {
        let first = InvocationContext::default();
        let second = InvocationContext::default();

        assert!(Uuid::parse_str(first.request_id()).is_ok());
        assert_ne!(first.request_id(), second.request_id());
        assert_eq!(first.event_kind(), None);
    }
}
