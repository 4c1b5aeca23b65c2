pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "amazon.titan-text-express-v1";

/// Explicit connection settings for the hosted model.
///
/// Credentials are handed in by whoever constructs the client; nothing in this
/// crate reads the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    pub region: String,
    pub endpoint: String,
    pub model_id: String,
    pub api_key: String,
}

impl InferenceConfig {
    pub fn new(
        region: impl Into<String>,
        model_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let region = non_empty_or(region.into(), DEFAULT_REGION);
        Self {
            endpoint: default_endpoint(&region),
            region,
            model_id: non_empty_or(model_id.into(), DEFAULT_MODEL_ID),
            api_key: api_key.into().trim().to_string(),
        }
    }

    /// Overrides the regional runtime endpoint, e.g. for a VPC endpoint or a test server.
    ///
    /// A blank value keeps the endpoint derived from the region.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim().trim_end_matches('/').to_string();
        if !endpoint.is_empty() {
            self.endpoint = endpoint;
        }
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

pub fn default_endpoint(region: &str) -> String {
    format!("https://bedrock-runtime.{region}.amazonaws.com")
}

fn non_empty_or(value: String, fallback: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_follows_region() {
        let config = InferenceConfig::new("eu-west-1", "amazon.titan-text-lite-v1", "key");
        assert_eq!(
            config.endpoint,
            "https://bedrock-runtime.eu-west-1.amazonaws.com"
        );
        assert_eq!(config.model_id, "amazon.titan-text-lite-v1");
    }

    #[test]
    fn blank_fields_fall_back_to_defaults() {
        let config = InferenceConfig::new("  ", "", " secret \n");
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.api_key, "secret");
        assert!(config.has_api_key());
    }

    #[test]
    fn endpoint_override_strips_trailing_slash_and_ignores_blank() {
        let config =
            InferenceConfig::new("us-east-1", "m", "k").with_endpoint("http://127.0.0.1:9000/");
        assert_eq!(config.endpoint, "http://127.0.0.1:9000");

        let config = InferenceConfig::new("us-west-2", "m", "k").with_endpoint("   ");
        assert_eq!(config.endpoint, default_endpoint("us-west-2"));
    }
}
