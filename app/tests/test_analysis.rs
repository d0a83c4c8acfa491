//! FILENAME: tests/test_analysis.rs
//! Integration tests for the photo recognition and analysis boundary.

mod common;

use std::cell::RefCell;

use app_lib::{
    analyze_photo, decode_analysis_response, lookup_credential, solve_photo_text,
    AnalysisError, AppConfig, PhotoAnalysis, PhotoAnalyzer, TextRecognizer,
};
use common::TestHarness;

struct FixedText(&'static str);

impl TextRecognizer for FixedText {
    fn recognize(&self, _image: &[u8]) -> String {
        self.0.to_string()
    }
}

/// Records the credential it was given and replays a canned response body.
struct CannedAnalyzer {
    body: &'static str,
    seen_credential: RefCell<Option<String>>,
}

impl CannedAnalyzer {
    fn new(body: &'static str) -> Self {
        CannedAnalyzer {
            body,
            seen_credential: RefCell::new(None),
        }
    }
}

impl PhotoAnalyzer for CannedAnalyzer {
    fn analyze(
        &self,
        credential: &str,
        _image: &[u8],
        _mime_type: &str,
    ) -> Result<PhotoAnalysis, AnalysisError> {
        *self.seen_credential.borrow_mut() = Some(credential.to_string());
        decode_analysis_response(self.body)
    }
}

fn harness_with_key_env(var: &str) -> TestHarness {
    let mut config = AppConfig::default();
    config.analysis.api_key_env = var.to_string();
    TestHarness::with_config(config)
}

// ============================================================================
// OCR HAND-OFF
// ============================================================================

#[test]
fn test_recognized_photo_text_is_solved() {
    let data = solve_photo_text(&FixedText("x2 - 5x + 6 = 0"), b"jpeg bytes");
    assert!(data.recognized);
    assert_eq!(data.answer, "x1 = 3, x2 = 2");
}

#[test]
fn test_empty_recognition_is_unrecognized() {
    let data = solve_photo_text(&FixedText(""), b"");
    assert!(!data.recognized);
    assert!(data.steps.is_empty());
}

// ============================================================================
// REMOTE ANALYSIS
// ============================================================================

#[test]
fn test_missing_credential_skips_the_analyzer() {
    let harness = harness_with_key_env("CALCULA_TEST_KEY_NEVER_SET");
    let analyzer = CannedAnalyzer::new(r#"{"explanation": "unused"}"#);

    let err = analyze_photo(&harness.state, &analyzer, b"png", "image/png").unwrap_err();
    assert_eq!(err, "No analysis credential configured");
    assert!(analyzer.seen_credential.borrow().is_none());
}

#[test]
fn test_credential_is_forwarded() {
    std::env::set_var("CALCULA_TEST_KEY_FORWARDED", "  secret-123 ");
    let harness = harness_with_key_env("CALCULA_TEST_KEY_FORWARDED");
    let analyzer = CannedAnalyzer::new(
        r#"{"explanation": "Two linear equations", "suggestions": ["Use elimination"]}"#,
    );

    let analysis = analyze_photo(&harness.state, &analyzer, b"png", "image/png").unwrap();
    assert_eq!(analysis.explanation, "Two linear equations");
    assert_eq!(analysis.suggestions, Some(vec!["Use elimination".to_string()]));
    assert_eq!(analyzer.seen_credential.borrow().as_deref(), Some("secret-123"));
}

#[test]
fn test_service_error_is_reported() {
    std::env::set_var("CALCULA_TEST_KEY_SERVICE", "key");
    let harness = harness_with_key_env("CALCULA_TEST_KEY_SERVICE");
    let analyzer = CannedAnalyzer::new(r#"{"error": {"message": "quota exceeded"}}"#);

    let err = analyze_photo(&harness.state, &analyzer, b"png", "image/png").unwrap_err();
    assert_eq!(err, "Analysis service error: quota exceeded");
}

#[test]
fn test_blank_credential_counts_as_missing() {
    std::env::set_var("CALCULA_TEST_KEY_BLANK", "   ");
    let mut config = AppConfig::default();
    config.analysis.api_key_env = "CALCULA_TEST_KEY_BLANK".to_string();
    assert_eq!(
        lookup_credential(&config.analysis),
        Err(AnalysisError::MissingCredential)
    );
}
