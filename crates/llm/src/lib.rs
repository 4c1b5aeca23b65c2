#![deny(unsafe_code)]

//! Client side of the single inference call the chat widget makes.

use std::sync::Arc;

mod bedrock;
mod client;
mod config;
mod error;

pub use bedrock::BedrockClient;
pub use client::{
    BoxFuture, InferenceClient, InferenceRequest, InferenceResponse, JSON_CONTENT_TYPE,
    UnconfiguredClient,
};
pub use config::{DEFAULT_MODEL_ID, DEFAULT_REGION, InferenceConfig, default_endpoint};
pub use error::{InferenceError, InferenceResult};

pub fn create_client(config: InferenceConfig) -> InferenceResult<Arc<dyn InferenceClient>> {
    Ok(Arc::new(BedrockClient::new(config)?))
}
