use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
};

pub const INPUT_PLACEHOLDER: &str = "Ask questions about Amy...";

/// Emitted whenever the text in the input changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftChanged {
    pub text: String,
}

/// Emitted when the user presses Enter or the send button.
///
/// Carries whatever is in the input; deciding whether it is sendable is left
/// to the widget state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSubmitted {
    pub text: String,
}

/// What a `PressEnter` from the input should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterOutcome {
    /// Secondary Enter, or the echo of a Shift+Enter that already inserted its newline.
    Ignore,
    Submit,
}

/// Decides a `PressEnter`, clearing the pending Shift+Enter marker on the way.
pub fn classify_enter(secondary: bool, pending_newline: &mut bool) -> EnterOutcome {
    let was_pending = std::mem::take(pending_newline);
    if secondary || was_pending {
        EnterOutcome::Ignore
    } else {
        EnterOutcome::Submit
    }
}

/// The input already holds the newline a plain Enter typed; drop it before sending.
pub fn strip_submitted_newline(value: &str) -> Option<&str> {
    value.strip_suffix('\n')
}

pub struct MessageInput {
    input_state: Entity<InputState>,
    pending_newline: bool,
}

impl EventEmitter<DraftChanged> for MessageInput {}
impl EventEmitter<DraftSubmitted> for MessageInput {}

impl MessageInput {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder(INPUT_PLACEHOLDER)
                .auto_grow(1, 4)
        });

        cx.subscribe_in(
            &input_state,
            window,
            |this, _, event: &InputEvent, window, cx| match event {
                InputEvent::PressEnter { secondary } => {
                    // Shift+Enter inserts the newline itself and still emits PressEnter.
                    if classify_enter(*secondary, &mut this.pending_newline)
                        == EnterOutcome::Submit
                    {
                        this.trim_trailing_newline(window, cx);
                        this.handle_submit(cx);
                    }
                }
                InputEvent::Change { .. } => {
                    let text = this.value(cx);
                    cx.emit(DraftChanged { text });
                }
                _ => {}
            },
        )
        .detach();

        Self {
            input_state,
            pending_newline: false,
        }
    }

    pub fn value(&self, cx: &App) -> String {
        self.input_state.read(cx).value().to_string()
    }

    /// Replaces the input content without emitting a submit.
    pub fn set_value(&mut self, text: &str, window: &mut Window, cx: &mut Context<Self>) {
        let text = text.to_string();
        self.input_state.update(cx, |state, cx| {
            state.set_value(text, window, cx);
        });
        self.pending_newline = false;
    }

    fn handle_shift_enter(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.pending_newline = true;
        self.input_state.update(cx, |state, cx| {
            state.insert("\n", window, cx);
        });
        cx.notify();
    }

    fn trim_trailing_newline(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            let value = state.value().to_string();
            if let Some(trimmed) = strip_submitted_newline(&value) {
                state.set_value(trimmed.to_string(), window, cx);
            }
        });
    }

    fn handle_submit(&mut self, cx: &mut Context<Self>) {
        let text = self.value(cx);
        cx.emit(DraftSubmitted { text });
    }
}

impl Render for MessageInput {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .w_full()
            .gap_2()
            .p_3()
            .items_end()
            .child(
                div()
                    .flex_1()
                    .px_3()
                    .py_2()
                    .rounded_md()
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.background)
                    .on_key_down(cx.listener(|this, event: &KeyDownEvent, window, cx| {
                        if event.keystroke.key == "enter" && event.keystroke.modifiers.shift {
                            this.handle_shift_enter(window, cx);
                        }
                    }))
                    .child(Input::new(&self.input_state).w_full()),
            )
            .child(
                Button::new("send")
                    .small()
                    .primary()
                    .icon(IconName::ArrowUp)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.handle_submit(cx);
                    })),
            )
    }
}
