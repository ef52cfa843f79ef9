//! Click event model for asynchronous click counting.

/// A resolved short code waiting to be counted.
///
/// Created by the redirect resolver after the redirect decision is made and
/// passed to [`crate::domain::click_worker::run_click_worker`] over a
/// channel, so the store write never sits on the redirect path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new("abc123");
        assert_eq!(event.code, "abc123");
    }

    #[test]
    fn test_click_event_clone() {
        let event = ClickEvent::new("code1".to_string());
        let cloned = event.clone();
        assert_eq!(cloned, event);
    }
}
