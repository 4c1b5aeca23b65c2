use std::path::PathBuf;

use askamy_chat::{Message, MessageText, RichNotice, Sender};
use gpui::*;
use gpui_component::{h_flex, v_flex};

use super::palette;

const AVATAR_SIZE: Pixels = px(40.);
const BUBBLE_MAX_WIDTH_FRACTION: f32 = 0.8;

/// Renders one conversation turn: user turns as right-aligned bubbles, bot turns
/// left-aligned behind the avatar.
pub fn render_message(
    index: usize,
    message: &Message,
    avatar_image: Option<&PathBuf>,
) -> AnyElement {
    match message.sender {
        Sender::User => h_flex()
            .w_full()
            .justify_end()
            .child(
                div()
                    .max_w(relative(BUBBLE_MAX_WIDTH_FRACTION))
                    .my_1()
                    .px(px(15.))
                    .py(px(10.))
                    .rounded(px(15.))
                    .bg(rgb(palette::USER_BUBBLE))
                    .text_color(rgb(palette::TEXT))
                    .shadow_sm()
                    .child(render_text(index, &message.text)),
            )
            .into_any_element(),
        Sender::Bot => h_flex()
            .w_full()
            .justify_start()
            .items_start()
            .gap_2()
            .my_1()
            .pl_2()
            .child(render_avatar(avatar_image))
            .child(
                div()
                    .max_w(relative(BUBBLE_MAX_WIDTH_FRACTION))
                    .text_color(rgb(palette::TEXT))
                    .child(render_text(index, &message.text)),
            )
            .into_any_element(),
    }
}

fn render_text(index: usize, text: &MessageText) -> AnyElement {
    match text {
        MessageText::Plain(text) => div().child(text.clone()).into_any_element(),
        MessageText::Notice(notice) => render_notice(index, notice),
    }
}

fn render_notice(index: usize, notice: &RichNotice) -> AnyElement {
    let url = notice.link_url.clone();

    v_flex()
        .child(
            h_flex()
                .flex_wrap()
                .gap_1()
                .child(notice.message.clone())
                .child(
                    div()
                        .id(("notice-link", index))
                        .text_color(rgb(palette::ACCENT))
                        .underline()
                        .cursor_pointer()
                        .child(notice.link_label.clone())
                        .on_click(move |_, _window, cx| {
                            cx.open_url(&url);
                        }),
                )
                .child("."),
        )
        .child(div().child(notice.follow_up.clone()))
        .into_any_element()
}

fn render_avatar(avatar_image: Option<&PathBuf>) -> AnyElement {
    match avatar_image {
        Some(path) => img(path.clone())
            .size(AVATAR_SIZE)
            .flex_shrink_0()
            .rounded_full()
            .into_any_element(),
        None => div()
            .size(AVATAR_SIZE)
            .flex_shrink_0()
            .rounded_full()
            .bg(rgb(palette::BRAND))
            .text_color(white())
            .flex()
            .items_center()
            .justify_center()
            .child("A")
            .into_any_element(),
    }
}
