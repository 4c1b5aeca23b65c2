use std::path::PathBuf;
use std::sync::Arc;

use askamy_chat::{Action, PendingInference, WidgetController, WidgetState};
use askamy_llm::{InferenceClient, UnconfiguredClient, create_client};
use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{
    ActiveTheme, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex, v_flex,
};
use gpui_tokio_bridge::Tokio;

use super::message_input::{DraftChanged, DraftSubmitted, MessageInput};
use super::message_list::render_message;
use super::palette;
use crate::settings::WidgetSettings;

pub const WIDGET_TITLE: &str = "Ask Amy";
pub const WELCOME_TEXT: &str = "Welcome to my AI Chatbot";

/// Preferred panel width before the viewport cap applies.
pub const PANEL_WIDTH: f32 = 425.0;
pub const PANEL_HEIGHT: f32 = 600.0;
/// Largest share of the viewport width the panel may take.
pub const PANEL_MAX_VIEWPORT_FRACTION: f32 = 0.9;
const PANEL_BOTTOM_OFFSET: f32 = 80.0;
const PANEL_RIGHT_OFFSET: f32 = 20.0;
const WELCOME_IMAGE_SIZE: f32 = 150.0;
const LAUNCHER_VERTICAL_PADDING: f32 = 64.0;

const _: () = {
    assert!(PANEL_MAX_VIEWPORT_FRACTION > 0.0);
    assert!(PANEL_MAX_VIEWPORT_FRACTION <= 1.0);
    assert!(PANEL_WIDTH > 0.0);
};

/// Panel width for a viewport: the preferred width, capped at 90% of the viewport.
pub fn compute_panel_width(viewport_width: f32) -> f32 {
    PANEL_WIDTH
        .min(viewport_width * PANEL_MAX_VIEWPORT_FRACTION)
        .max(0.0)
}

/// Optional branding images shown by the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAppearance {
    pub welcome_image: Option<PathBuf>,
    pub avatar_image: Option<PathBuf>,
}

impl WidgetAppearance {
    pub fn from_settings(settings: &WidgetSettings) -> Self {
        Self {
            welcome_image: settings.welcome_image.clone(),
            avatar_image: settings.avatar_image.clone(),
        }
    }
}

/// The chat widget: a launcher tab while closed, the conversation panel while open.
pub struct ChatWidget {
    controller: WidgetController,
    message_input: Entity<MessageInput>,
    scroll_handle: ScrollHandle,
    appearance: WidgetAppearance,
}

impl ChatWidget {
    pub fn new(settings: &WidgetSettings, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let client = Self::client_from_settings(settings);
        let message_input = cx.new(|cx| MessageInput::new(window, cx));

        cx.subscribe(&message_input, |this, _, event: &DraftChanged, _cx| {
            this.controller.update_draft(event.text.clone());
        })
        .detach();

        cx.subscribe_in(
            &message_input,
            window,
            |this, _, event: &DraftSubmitted, window, cx| {
                this.handle_draft_submitted(event, window, cx);
            },
        )
        .detach();

        Self {
            controller: WidgetController::new(client),
            message_input,
            scroll_handle: ScrollHandle::new(),
            appearance: WidgetAppearance::from_settings(settings),
        }
    }

    /// Builds the inference client for these settings.
    ///
    /// Without a usable configuration the widget still works; every reply is
    /// then the fallback notice.
    pub fn client_from_settings(settings: &WidgetSettings) -> Arc<dyn InferenceClient> {
        let Some(config) = settings.to_inference_config() else {
            tracing::warn!(
                model_id = %settings.model_id,
                "no inference API key configured, replies will use the fallback notice"
            );
            return Arc::new(UnconfiguredClient::new(settings.model_id.clone()));
        };

        let model_id = config.model_id.clone();
        let region = config.region.clone();
        match create_client(config) {
            Ok(client) => {
                tracing::info!(model_id = %model_id, region = %region, "initialized inference client");
                client
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to initialize inference client");
                Arc::new(UnconfiguredClient::new(model_id))
            }
        }
    }

    pub fn state(&self) -> &WidgetState {
        self.controller.state()
    }

    pub fn toggle_open(&mut self, cx: &mut Context<Self>) {
        self.controller.toggle_open();
        cx.notify();
    }

    fn handle_draft_submitted(
        &mut self,
        event: &DraftSubmitted,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let Some(pending) = self.controller.submit_text(event.text.clone()) else {
            return;
        };

        self.message_input.update(cx, |input, cx| {
            input.set_value("", window, cx);
        });
        self.scroll_handle.scroll_to_bottom();
        self.spawn_inference(pending, cx);
        cx.notify();
    }

    fn spawn_inference(&mut self, pending: PendingInference, cx: &mut Context<Self>) {
        let call = Tokio::spawn(cx, pending.resolve());

        cx.spawn(async move |this, cx| {
            let action = match call.await {
                Ok(action) => action,
                Err(error) => {
                    tracing::error!(error = ?error, "inference task ended without a result");
                    Action::InferenceFailed
                }
            };

            // Replies for a widget that has since been released are dropped here.
            let _ = this.update(cx, |this, cx| {
                this.apply_reply(action, cx);
            });
        })
        .detach();
    }

    fn apply_reply(&mut self, action: Action, cx: &mut Context<Self>) {
        debug_assert!(action.is_reply());
        self.controller.apply(action);
        self.scroll_handle.scroll_to_bottom();
        cx.notify();
    }
}

impl Render for ChatWidget {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if self.controller.state().is_open() {
            self.render_panel(window, cx).into_any_element()
        } else {
            self.render_launcher(cx).into_any_element()
        }
    }
}

impl ChatWidget {
    fn render_launcher(&self, cx: &Context<Self>) -> impl IntoElement {
        div()
            .id("ask-amy-launcher")
            .absolute()
            .top(relative(0.5))
            .right_0()
            .px_2()
            .py(px(LAUNCHER_VERTICAL_PADDING))
            .rounded_l_lg()
            .bg(rgb(palette::BRAND))
            .text_color(white())
            .text_sm()
            .font_weight(FontWeight::BOLD)
            .cursor_pointer()
            .child(WIDGET_TITLE)
            .on_click(cx.listener(|this, _, _window, cx| {
                this.toggle_open(cx);
            }))
    }

    fn render_panel(&self, window: &Window, cx: &Context<Self>) -> impl IntoElement {
        let border = cx.theme().border;
        let state = self.controller.state();
        let viewport_width = f32::from(window.viewport_size().width);
        let avatar_image = self.appearance.avatar_image.as_ref();

        v_flex()
            .id("ask-amy-panel")
            .absolute()
            .bottom(px(PANEL_BOTTOM_OFFSET))
            .right(px(PANEL_RIGHT_OFFSET))
            .w(px(compute_panel_width(viewport_width)))
            .h(px(PANEL_HEIGHT))
            .bg(white())
            .border_1()
            .border_color(border)
            .rounded(px(10.))
            .shadow_lg()
            .overflow_hidden()
            .child(self.render_banner(cx))
            .when(state.show_welcome_banner(), |el| el.child(self.render_welcome()))
            .child(
                div()
                    .id("ask-amy-messages")
                    .flex_1()
                    .min_h_0()
                    .p_2()
                    .overflow_y_scroll()
                    .track_scroll(&self.scroll_handle)
                    .children(
                        state
                            .messages()
                            .iter()
                            .enumerate()
                            .map(|(index, message)| render_message(index, message, avatar_image)),
                    ),
            )
            .child(
                div()
                    .flex_shrink_0()
                    .w_full()
                    .border_t_1()
                    .border_color(border)
                    .child(self.message_input.clone()),
            )
    }

    fn render_banner(&self, cx: &Context<Self>) -> impl IntoElement {
        h_flex()
            .flex_shrink_0()
            .justify_between()
            .items_center()
            .p(px(10.))
            .bg(rgb(palette::BRAND))
            .text_color(white())
            .child(
                div()
                    .pl(px(10.))
                    .font_weight(FontWeight::BOLD)
                    .child(WIDGET_TITLE),
            )
            .child(
                Button::new("close-widget")
                    .ghost()
                    .small()
                    .icon(IconName::Close)
                    .on_click(cx.listener(|this, _, _window, cx| {
                        this.toggle_open(cx);
                    })),
            )
    }

    fn render_welcome(&self) -> impl IntoElement {
        v_flex()
            .flex_shrink_0()
            .items_center()
            .my_4()
            .when_some(self.appearance.welcome_image.clone(), |el, path| {
                el.child(img(path).size(px(WELCOME_IMAGE_SIZE)))
            })
            .child(
                div()
                    .mt_2()
                    .text_color(rgb(palette::WELCOME_TEXT))
                    .child(WELCOME_TEXT),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_keeps_preferred_width_on_wide_viewports() {
        assert_eq!(compute_panel_width(1200.0), PANEL_WIDTH);
    }

    #[test]
    fn panel_is_capped_on_narrow_viewports() {
        assert!((compute_panel_width(400.0) - 360.0).abs() < 0.01);
        assert_eq!(compute_panel_width(0.0), 0.0);
    }

    #[test]
    fn appearance_comes_from_settings() {
        let settings = WidgetSettings {
            avatar_image: Some(PathBuf::from("images/AmyAvatar.jpg")),
            ..WidgetSettings::default()
        };
        let appearance = WidgetAppearance::from_settings(&settings);
        assert_eq!(appearance.welcome_image, None);
        assert_eq!(
            appearance.avatar_image,
            Some(PathBuf::from("images/AmyAvatar.jpg"))
        );
    }

    #[tokio::test]
    async fn unconfigured_settings_still_answer_with_fallback() {
        let client = ChatWidget::client_from_settings(&WidgetSettings::default());
        let mut controller = WidgetController::new(client);
        controller.update_draft("Hello");
        controller.submit_and_wait().await;

        assert_eq!(controller.state().messages().len(), 2);
        assert_eq!(
            controller.state().messages()[1],
            askamy_chat::Message::bot_notice(askamy_chat::fallback_notice())
        );
    }
}
