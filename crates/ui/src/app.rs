use std::sync::Arc;

use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::{ActiveTheme, v_flex};

use crate::settings::WidgetSettings;
use crate::widget::ChatWidget;

/// Default host window size.
pub const HOST_WINDOW_WIDTH: f32 = 1200.0;
pub const HOST_WINDOW_HEIGHT: f32 = 800.0;

const _: () = {
    assert!(HOST_WINDOW_WIDTH > crate::widget::view::PANEL_WIDTH);
    assert!(HOST_WINDOW_HEIGHT > crate::widget::view::PANEL_HEIGHT);
};

gpui::actions!(askamy, [ToggleWidget, Quit]);

/// Minimal page that hosts the floating widget.
pub struct HostShell {
    widget: Entity<ChatWidget>,
}

impl HostShell {
    pub fn new(settings: Arc<WidgetSettings>, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let widget = cx.new(|cx| ChatWidget::new(&settings, window, cx));
        cx.observe(&widget, |_, _, cx| cx.notify()).detach();
        Self { widget }
    }

    pub fn toggle_widget(&mut self, cx: &mut Context<Self>) {
        self.widget
            .update(cx, |widget, cx| widget.toggle_open(cx));
    }
}

impl Render for HostShell {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let widget_open = self.widget.read(cx).state().is_open();

        div()
            .id("host-shell")
            .size_full()
            .relative()
            .bg(theme.background)
            .text_color(theme.foreground)
            .child(
                v_flex()
                    .size_full()
                    .items_center()
                    .justify_center()
                    .gap_2()
                    .child(div().text_xl().font_weight(FontWeight::SEMIBOLD).child("Amy"))
                    .when(!widget_open, |el| {
                        el.child(
                            div()
                                .text_sm()
                                .text_color(theme.muted_foreground)
                                .child("Questions? Open \"Ask Amy\" on the right."),
                        )
                    }),
            )
            .child(self.widget.clone())
    }
}
