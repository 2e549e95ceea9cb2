// Error handling tests

use studygenius::error::ServiceError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        ServiceError::Config("API key missing".to_string()),
        ServiceError::InvalidRequest("Empty input".to_string()),
        ServiceError::PayloadTooLarge("Body over limit".to_string()),
        ServiceError::Transport("Connection refused".to_string()),
        ServiceError::UpstreamTimeout("Deadline exceeded".to_string()),
        ServiceError::Upstream("HTTP 500".to_string()),
        ServiceError::Parse("Not valid JSON".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_config_error() {
    let error = ServiceError::Config("GEMINI_API_KEY missing from environment".to_string());
    assert!(format!("{}", error).contains("GEMINI_API_KEY"));
    assert_eq!(error.kind(), "configuration_error");
}

#[test]
fn test_validation_error() {
    let error = ServiceError::InvalidRequest("at least one of textInput or fileData".to_string());
    assert!(format!("{}", error).contains("textInput"));
    assert_eq!(error.kind(), "validation_error");
}

#[test]
fn test_transport_error() {
    let error = ServiceError::Transport("connection reset".to_string());
    assert!(format!("{}", error).contains("connection reset"));
    assert_eq!(error.kind(), "transport_error");
}

#[test]
fn test_timeout_error() {
    let error = ServiceError::UpstreamTimeout("deadline exceeded".to_string());
    assert_eq!(error.kind(), "upstream_timeout");
}

#[test]
fn test_upstream_error() {
    let error = ServiceError::Upstream("quota exceeded".to_string());
    assert!(format!("{}", error).contains("quota exceeded"));
    assert_eq!(error.kind(), "upstream_error");
}

#[test]
fn test_parse_error() {
    let error = ServiceError::Parse("correctAnswerIndex out of range".to_string());
    assert!(format!("{}", error).contains("correctAnswerIndex"));
    assert_eq!(error.kind(), "parse_error");
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
    let error: ServiceError = json_err.into();
    assert_eq!(error.kind(), "internal_error");
}
