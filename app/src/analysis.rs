//! FILENAME: app/src/analysis.rs
// PURPOSE: Boundary to photo text recognition and remote photo analysis.
// CONTEXT: Image capture, the OCR engine and the HTTP client live outside this
//          crate. They plug in through the two traits below; this module owns
//          credential lookup, response decoding and the hand-off to the parser.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api_types::EquationSolutionData;
use crate::config::AnalysisConfig;
use crate::equation::solve_equation_text;
use crate::{log_enter, log_exit, log_info, log_warn, AppState};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("No analysis credential configured")]
    MissingCredential,

    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    #[error("Analysis service error: {message}")]
    Service { message: String },
}

/// Image bytes to recognized text. Any string, including an empty one, is valid.
pub trait TextRecognizer {
    fn recognize(&self, image: &[u8]) -> String;
}

/// Remote photo analysis.
pub trait PhotoAnalyzer {
    fn analyze(
        &self,
        credential: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<PhotoAnalysis, AnalysisError>;
}

/// What the analysis service says about a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAnalysis {
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Error body returned by the service.
#[derive(Deserialize)]
struct ServiceErrorBody {
    error: ServiceErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ServiceErrorDetail {
    Message { message: String },
    Text(String),
}

/// Decodes a service response body: either a `PhotoAnalysis` object or an
/// `{"error": ...}` object.
pub fn decode_analysis_response(body: &str) -> Result<PhotoAnalysis, AnalysisError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    if value.get("error").is_some() {
        let body: ServiceErrorBody = serde_json::from_value(value)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        let message = match body.error {
            ServiceErrorDetail::Message { message } => message,
            ServiceErrorDetail::Text(text) => text,
        };
        return Err(AnalysisError::Service { message });
    }

    serde_json::from_value(value).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
}

/// Reads the credential from the configured environment variable.
pub fn lookup_credential(config: &AnalysisConfig) -> Result<String, AnalysisError> {
    match std::env::var(&config.api_key_env) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(AnalysisError::MissingCredential),
    }
}

/// Runs OCR on the image and solves whatever text comes back.
pub fn solve_photo_text(recognizer: &dyn TextRecognizer, image: &[u8]) -> EquationSolutionData {
    log_enter!("ANALYSIS", "solve_photo_text", "bytes={}", image.len());
    let text = recognizer.recognize(image);
    log_info!("ANALYSIS", "recognized text: {:?}", text);
    let data = solve_equation_text(&text);
    log_exit!("ANALYSIS", "solve_photo_text", "recognized={}", data.recognized);
    data
}

/// Sends the photo to the analyzer with the configured credential.
pub fn analyze_photo(
    state: &AppState,
    analyzer: &dyn PhotoAnalyzer,
    image: &[u8],
    mime_type: &str,
) -> Result<PhotoAnalysis, String> {
    log_enter!("ANALYSIS", "analyze_photo", "bytes={} mime={}", image.len(), mime_type);

    let credential = lookup_credential(&state.config.analysis).map_err(|e| {
        log_warn!("ANALYSIS", "{} (env {})", e, state.config.analysis.api_key_env);
        e.to_string()
    })?;

    let analysis = analyzer
        .analyze(&credential, image, mime_type)
        .map_err(|e| {
            log_warn!("ANALYSIS", "analyze_photo failed: {}", e);
            e.to_string()
        })?;

    log_exit!(
        "ANALYSIS",
        "analyze_photo",
        "suggestions={}",
        analysis.suggestions.as_ref().map_or(0, |s| s.len())
    );
    Ok(analysis)
}
