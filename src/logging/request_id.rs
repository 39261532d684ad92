//! Correlation IDs for gateway calls

use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// Each scenario invocation gets one, so a single request/response pair can be
/// traced through the harness logs and the gateway's own logs.
///
/// # Examples
///
/// ```
/// use conformance::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert_eq!(request_id.len(), 36);
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_id_format() {
        let id = generate_request_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.chars().filter(|&c| c == '-').count(), 4);
    }

    #[test]
    fn test_generate_request_id_uniqueness() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
