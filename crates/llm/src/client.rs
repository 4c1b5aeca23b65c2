use std::future::Future;
use std::pin::Pin;

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};

use crate::error::{
    DecodeResponseSnafu, InferenceResult, MissingApiKeySnafu, MissingOutputTextSnafu,
};

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One stateless call to the hosted model: only the current input is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub model_id: String,
    pub input_text: String,
    pub content_type: &'static str,
}

impl InferenceRequest {
    pub fn new(model_id: impl Into<String>, input_text: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            input_text: input_text.into(),
            content_type: JSON_CONTENT_TYPE,
        }
    }

    pub(crate) fn payload(&self) -> InvokePayload<'_> {
        InvokePayload {
            input_text: &self.input_text,
        }
    }
}

/// JSON body of an invoke call.
#[derive(Debug, Serialize)]
pub(crate) struct InvokePayload<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResponse {
    pub output_text: String,
}

#[derive(Debug, Deserialize)]
struct InvokeBody {
    #[serde(rename = "outputText")]
    output_text: Option<String>,
    #[serde(default)]
    results: Vec<InvokeResult>,
}

#[derive(Debug, Deserialize)]
struct InvokeResult {
    #[serde(rename = "outputText")]
    output_text: Option<String>,
}

impl InferenceResponse {
    /// Parses an invoke response body.
    ///
    /// Accepts a top-level `outputText`, or the Titan shape where the text sits
    /// in `results[0].outputText`.
    pub fn from_body(model_id: &str, body: &[u8]) -> InferenceResult<Self> {
        let parsed: InvokeBody = serde_json::from_slice(body).context(DecodeResponseSnafu {
            stage: "parse-invoke-body",
        })?;

        let output_text = parsed
            .output_text
            .or_else(|| {
                parsed
                    .results
                    .into_iter()
                    .next()
                    .and_then(|result| result.output_text)
            })
            .context(MissingOutputTextSnafu {
                stage: "extract-output-text",
                model_id,
            })?;

        Ok(Self { output_text })
    }
}

pub trait InferenceClient: Send + Sync {
    fn model_id(&self) -> &str;
    fn invoke<'a>(
        &'a self,
        request: InferenceRequest,
    ) -> BoxFuture<'a, InferenceResult<InferenceResponse>>;
}

/// Stand-in used when no API key is configured: every call fails, so the
/// widget still renders and answers with its fallback notice.
pub struct UnconfiguredClient {
    model_id: String,
}

impl UnconfiguredClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }
}

impl InferenceClient for UnconfiguredClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn invoke<'a>(
        &'a self,
        request: InferenceRequest,
    ) -> BoxFuture<'a, InferenceResult<InferenceResponse>> {
        let result: InferenceResult<InferenceResponse> = MissingApiKeySnafu {
            stage: "unconfigured-invoke",
            model_id: request.model_id,
        }
        .fail();
        async move { result }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InferenceError;

    #[test]
    fn payload_serializes_input_text() {
        let request = InferenceRequest::new("amazon.titan-text-express-v1", "Hello");
        let json = serde_json::to_value(request.payload()).unwrap();
        assert_eq!(json, serde_json::json!({ "inputText": "Hello" }));
        assert_eq!(request.content_type, "application/json");
    }

    #[test]
    fn reads_top_level_output_text() {
        let response = InferenceResponse::from_body("m", br#"{"outputText":"Hi there"}"#).unwrap();
        assert_eq!(response.output_text, "Hi there");
    }

    #[test]
    fn reads_titan_results_shape() {
        let body = br#"{"inputTextTokenCount":1,"results":[{"tokenCount":3,"outputText":"Hi from Titan","completionReason":"FINISH"}]}"#;
        let response = InferenceResponse::from_body("m", body).unwrap();
        assert_eq!(response.output_text, "Hi from Titan");
    }

    #[test]
    fn missing_output_text_is_an_error() {
        let error = InferenceResponse::from_body("m", br#"{"results":[]}"#).unwrap_err();
        assert!(matches!(error, InferenceError::MissingOutputText { .. }));
    }

    #[test]
    fn malformed_body_is_an_error() {
        let error = InferenceResponse::from_body("m", b"<html>quota</html>").unwrap_err();
        assert!(matches!(error, InferenceError::DecodeResponse { .. }));
    }
}
