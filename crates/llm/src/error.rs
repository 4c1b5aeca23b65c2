use snafu::Snafu;

pub type InferenceResult<T> = Result<T, InferenceError>;

/// Every way one inference call can fail.
///
/// Callers in the chat layer treat all variants alike; the variants only exist
/// so the logged diagnostic says where the call broke.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum InferenceError {
    #[snafu(display("missing API key for model '{model_id}'"))]
    MissingApiKey {
        stage: &'static str,
        model_id: String,
    },
    #[snafu(display("inference endpoint '{endpoint}' is not a valid base URL on `{stage}`"))]
    InvalidEndpoint {
        stage: &'static str,
        endpoint: String,
    },
    #[snafu(display("failed to build http client on `{stage}`, {source}"))]
    BuildHttpClient {
        stage: &'static str,
        source: reqwest::Error,
    },
    #[snafu(display("inference request failed on `{stage}`, {source}"))]
    SendRequest {
        stage: &'static str,
        source: reqwest::Error,
    },
    #[snafu(display("failed to read inference response on `{stage}`, {source}"))]
    ReadResponse {
        stage: &'static str,
        source: reqwest::Error,
    },
    #[snafu(display("inference endpoint returned status {status}: {body}"))]
    ResponseStatus {
        stage: &'static str,
        status: u16,
        body: String,
    },
    #[snafu(display("failed to decode inference response on `{stage}`, {source}"))]
    DecodeResponse {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("inference response for model '{model_id}' has no outputText"))]
    MissingOutputText {
        stage: &'static str,
        model_id: String,
    },
}
