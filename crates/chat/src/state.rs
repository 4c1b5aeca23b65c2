use crate::action::{Action, Effect};
use crate::message::{Message, fallback_notice};

/// Everything the widget shows, owned by whoever mounts it.
///
/// Created fresh on every mount and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    is_open: bool,
    draft: String,
    show_welcome_banner: bool,
    messages: Vec<Message>,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            is_open: false,
            draft: String::new(),
            show_welcome_banner: true,
            messages: Vec::new(),
        }
    }
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// `true` until the first accepted submit, then `false` for good.
    pub fn show_welcome_banner(&self) -> bool {
        self.show_welcome_banner
    }

    /// Conversation in append order. Read-only: turns are only added through actions.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Computes the next state without touching `self`.
    pub fn reduce(&self, action: Action) -> (Self, Option<Effect>) {
        let mut next = self.clone();
        let effect = next.dispatch(action);
        (next, effect)
    }

    /// Applies one action in place.
    ///
    /// `messages` only ever grows, and `show_welcome_banner` only ever goes from
    /// `true` to `false`.
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::ToggleOpen => {
                self.is_open = !self.is_open;
                None
            }
            Action::UpdateDraft(text) => {
                self.draft = text;
                None
            }
            Action::Submit => self.apply_submit(),
            Action::InferenceSucceeded(output_text) => {
                self.messages.push(Message::bot(output_text));
                None
            }
            Action::InferenceFailed => {
                self.messages.push(Message::bot_notice(fallback_notice()));
                None
            }
        }
    }

    fn apply_submit(&mut self) -> Option<Effect> {
        if !self.can_submit() {
            return None;
        }

        self.show_welcome_banner = false;

        // The untrimmed draft is both displayed and sent; trimming is only the emptiness check.
        let input_text = std::mem::take(&mut self.draft);
        self.messages.push(Message::user(input_text.clone()));

        Some(Effect::Infer { input_text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{MessageText, Sender};

    fn state_with_draft(draft: &str) -> WidgetState {
        let mut state = WidgetState::new();
        state.dispatch(Action::UpdateDraft(draft.to_string()));
        state
    }

    #[test]
    fn starts_closed_with_banner_and_no_messages() {
        let state = WidgetState::new();
        assert!(!state.is_open());
        assert!(state.show_welcome_banner());
        assert!(state.draft().is_empty());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn whitespace_draft_submit_is_a_no_op() {
        let state = state_with_draft("  ");
        let (next, effect) = state.reduce(Action::Submit);

        assert_eq!(effect, None);
        assert_eq!(next, state);
        assert_eq!(next.draft(), "  ");
        assert!(next.show_welcome_banner());
    }

    #[test]
    fn empty_draft_submit_is_a_no_op() {
        let state = WidgetState::new();
        let (next, effect) = state.reduce(Action::Submit);
        assert_eq!(effect, None);
        assert_eq!(next, state);
    }

    #[test]
    fn submit_appends_untrimmed_user_turn_and_requests_inference() {
        let mut state = state_with_draft("  Hello \n");
        let effect = state.dispatch(Action::Submit);

        assert_eq!(
            effect,
            Some(Effect::Infer {
                input_text: "  Hello \n".to_string()
            })
        );
        assert_eq!(state.messages(), &[Message::user("  Hello \n")]);
        assert!(state.draft().is_empty());
        assert!(!state.show_welcome_banner());
    }

    #[test]
    fn replies_append_bot_turns() {
        let mut state = state_with_draft("Hello");
        state.dispatch(Action::Submit);
        state.dispatch(Action::InferenceSucceeded("Hi there".to_string()));
        state.dispatch(Action::InferenceFailed);

        let messages = state.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], Message::bot("Hi there"));
        assert_eq!(messages[2].sender, Sender::Bot);
        assert_eq!(messages[2].text, MessageText::Notice(fallback_notice()));
    }

    #[test]
    fn toggling_never_touches_messages_or_banner() {
        let mut state = state_with_draft("Hello");
        state.dispatch(Action::Submit);
        let messages_before = state.messages().to_vec();

        for expected_open in [true, false, true, false] {
            assert_eq!(state.dispatch(Action::ToggleOpen), None);
            assert_eq!(state.is_open(), expected_open);
            assert_eq!(state.messages(), messages_before.as_slice());
            assert!(!state.show_welcome_banner());
        }
    }

    #[test]
    fn banner_stays_hidden_after_later_submits() {
        let mut state = state_with_draft("first");
        state.dispatch(Action::Submit);
        state.dispatch(Action::InferenceFailed);
        state.dispatch(Action::UpdateDraft("   ".to_string()));
        state.dispatch(Action::Submit);
        state.dispatch(Action::UpdateDraft("second".to_string()));
        state.dispatch(Action::Submit);

        assert!(!state.show_welcome_banner());
        assert_eq!(state.messages().len(), 3);
    }

    #[test]
    fn reduce_leaves_the_original_state_untouched() {
        let state = state_with_draft("Hello");
        let (next, _) = state.reduce(Action::Submit);

        assert_eq!(state.draft(), "Hello");
        assert!(state.messages().is_empty());
        assert_eq!(next.messages().len(), 1);
    }

    #[test]
    fn banner_never_returns_once_hidden() {
        let mut state = state_with_draft("Hello");
        state.dispatch(Action::Submit);
        assert!(!state.show_welcome_banner());

        let actions = [
            Action::ToggleOpen,
            Action::UpdateDraft("again".to_string()),
            Action::InferenceSucceeded("Hi there".to_string()),
            Action::InferenceFailed,
            Action::Submit,
            Action::UpdateDraft(String::new()),
            Action::Submit,
            Action::ToggleOpen,
        ];
        for action in actions {
            state.dispatch(action);
            assert!(!state.show_welcome_banner());
        }
        assert!(!state.is_open());
        assert_eq!(state.draft(), "");
    }
}
