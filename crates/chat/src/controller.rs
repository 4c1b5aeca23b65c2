use std::sync::Arc;

use askamy_llm::{InferenceClient, InferenceRequest};

use crate::action::{Action, Effect};
use crate::state::WidgetState;

/// Owns a [`WidgetState`] and the client that answers its submits.
pub struct WidgetController {
    state: WidgetState,
    client: Arc<dyn InferenceClient>,
}

impl WidgetController {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self {
            state: WidgetState::new(),
            client,
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn toggle_open(&mut self) {
        self.state.dispatch(Action::ToggleOpen);
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.state.dispatch(Action::UpdateDraft(text.into()));
    }

    /// Records the user turn and hands back the call to make, if the draft was sendable.
    ///
    /// The returned request does not borrow the controller, so several may be in
    /// flight at once; their results land in whatever order they are applied.
    pub fn submit(&mut self) -> Option<PendingInference> {
        let effect = self.state.dispatch(Action::Submit)?;
        Some(PendingInference::from_effect(self.client.clone(), effect))
    }

    /// Takes the input's current text as the draft and submits it.
    ///
    /// `None` means nothing was sent and the draft still holds `text`, so the
    /// input should keep it too.
    pub fn submit_text(&mut self, text: impl Into<String>) -> Option<PendingInference> {
        self.update_draft(text);
        self.submit()
    }

    pub fn apply(&mut self, action: Action) {
        let effect = self.state.dispatch(action);
        debug_assert!(effect.is_none(), "only submits produce effects");
    }

    /// Submits and waits for the reply in one go.
    pub async fn submit_and_wait(&mut self) {
        let Some(pending) = self.submit() else {
            return;
        };
        let action = pending.resolve().await;
        self.apply(action);
    }
}

/// One inference call that has been requested but not yet made.
pub struct PendingInference {
    client: Arc<dyn InferenceClient>,
    request: InferenceRequest,
}

impl PendingInference {
    pub fn from_effect(client: Arc<dyn InferenceClient>, effect: Effect) -> Self {
        let Effect::Infer { input_text } = effect;
        let request = InferenceRequest::new(client.model_id(), input_text);
        Self { client, request }
    }

    pub fn request(&self) -> &InferenceRequest {
        &self.request
    }

    /// Makes the call and turns its outcome into the action that records it.
    ///
    /// Failures never propagate: they are logged and become the fallback notice.
    pub async fn resolve(self) -> Action {
        let model_id = self.request.model_id.clone();
        match self.client.invoke(self.request).await {
            Ok(response) => Action::InferenceSucceeded(response.output_text),
            Err(error) => {
                tracing::error!(
                    model_id = %model_id,
                    error = %error,
                    "inference call failed, answering with fallback notice"
                );
                Action::InferenceFailed
            }
        }
    }
}
