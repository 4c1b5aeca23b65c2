use futures::FutureExt;
use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use snafu::{ResultExt, ensure};

use crate::client::{
    BoxFuture, InferenceClient, InferenceRequest, InferenceResponse, JSON_CONTENT_TYPE,
};
use crate::config::InferenceConfig;
use crate::error::{
    BuildHttpClientSnafu, InferenceResult, InvalidEndpointSnafu, MissingApiKeySnafu,
    ReadResponseSnafu, ResponseStatusSnafu, SendRequestSnafu,
};

/// Calls the Bedrock runtime `InvokeModel` route with a Bedrock API key.
pub struct BedrockClient {
    config: InferenceConfig,
    http: reqwest::Client,
}

impl BedrockClient {
    pub fn new(config: InferenceConfig) -> InferenceResult<Self> {
        ensure!(
            config.has_api_key(),
            MissingApiKeySnafu {
                stage: "bedrock-client-new",
                model_id: config.model_id.clone(),
            }
        );

        let http = reqwest::Client::builder()
            .build()
            .context(BuildHttpClientSnafu {
                stage: "build-client",
            })?;

        Ok(Self { config, http })
    }

    /// `{endpoint}/model/{model_id}/invoke`, with the model id encoded as one segment
    /// so ARNs and inference-profile ids survive intact.
    pub fn invoke_url(&self, model_id: &str) -> InferenceResult<Url> {
        let mut url = Url::parse(&self.config.endpoint).map_err(|_| {
            InvalidEndpointSnafu {
                stage: "parse-endpoint",
                endpoint: self.config.endpoint.clone(),
            }
            .build()
        })?;

        url.path_segments_mut()
            .map_err(|()| {
                InvalidEndpointSnafu {
                    stage: "build-invoke-path",
                    endpoint: self.config.endpoint.clone(),
                }
                .build()
            })?
            .pop_if_empty()
            .extend(["model", model_id, "invoke"]);

        Ok(url)
    }

    async fn send_invoke(&self, request: InferenceRequest) -> InferenceResult<InferenceResponse> {
        let url = self.invoke_url(&request.model_id)?;

        tracing::debug!(
            model_id = %request.model_id,
            input_len = request.input_text.len(),
            "invoking model"
        );

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, request.content_type)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .bearer_auth(&self.config.api_key)
            .json(&request.payload())
            .send()
            .await
            .context(SendRequestSnafu {
                stage: "send-invoke-request",
            })?;

        let status = response.status();
        let body = response.bytes().await.context(ReadResponseSnafu {
            stage: "read-invoke-response",
        })?;

        if !status.is_success() {
            return ResponseStatusSnafu {
                stage: "invoke-http-status",
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            }
            .fail();
        }

        InferenceResponse::from_body(&request.model_id, &body)
    }
}

impl InferenceClient for BedrockClient {
    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    fn invoke<'a>(
        &'a self,
        request: InferenceRequest,
    ) -> BoxFuture<'a, InferenceResult<InferenceResponse>> {
        self.send_invoke(request).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InferenceError;

    fn client(endpoint: &str) -> BedrockClient {
        let config = InferenceConfig::new("us-east-1", "amazon.titan-text-express-v1", "key")
            .with_endpoint(endpoint);
        BedrockClient::new(config).unwrap()
    }

    #[test]
    fn rejects_missing_api_key() {
        let config = InferenceConfig::new("us-east-1", "m", "   ");
        let error = BedrockClient::new(config).err().unwrap();
        assert!(matches!(error, InferenceError::MissingApiKey { .. }));
    }

    #[test]
    fn invoke_url_uses_regional_endpoint() {
        let config = InferenceConfig::new("us-east-1", "amazon.titan-text-express-v1", "key");
        let client = BedrockClient::new(config).unwrap();
        let url = client.invoke_url(client.model_id()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://bedrock-runtime.us-east-1.amazonaws.com/model/amazon.titan-text-express-v1/invoke"
        );
    }

    #[test]
    fn invoke_url_encodes_arn_as_single_segment() {
        let client = client("http://localhost:8080/proxy");
        let url = client
            .invoke_url("arn:aws:bedrock:us-east-1::foundation-model/amazon.titan")
            .unwrap();
        assert_eq!(
            url.path(),
            "/proxy/model/arn:aws:bedrock:us-east-1::foundation-model%2Famazon.titan/invoke"
        );
    }

    #[test]
    fn invalid_endpoint_is_reported() {
        let client = client("not a url");
        let error = client.invoke_url("m").unwrap_err();
        assert!(matches!(error, InferenceError::InvalidEndpoint { .. }));
    }
}
