/// Everything that can change a [`WidgetState`](crate::WidgetState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Shows or hides the panel.
    ToggleOpen,
    /// Mirrors the current input content.
    UpdateDraft(String),
    /// Sends the draft if it has any non-whitespace content.
    Submit,
    /// The model answered with this text.
    InferenceSucceeded(String),
    /// The inference call failed for any reason.
    InferenceFailed,
}

/// Work the reducer asks its owner to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one inference call with exactly this input.
    Infer { input_text: String },
}

impl Action {
    /// Returns true for actions that only ever append to the conversation.
    pub fn is_reply(&self) -> bool {
        matches!(self, Self::InferenceSucceeded(_) | Self::InferenceFailed)
    }
}
