/// Text input with send control.
pub mod message_input;
pub mod message_list;
/// Launcher and conversation panel.
pub mod view;

pub use message_input::{DraftChanged, DraftSubmitted, MessageInput};
pub use view::{ChatWidget, WidgetAppearance};

/// Brand colors of the widget, as `0xRRGGBB`.
pub mod palette {
    pub const BRAND: u32 = 0x4a4354;
    pub const ACCENT: u32 = 0x6174bc;
    pub const USER_BUBBLE: u32 = 0xf7f7f9;
    pub const TEXT: u32 = 0x282c34;
    pub const WELCOME_TEXT: u32 = 0x282323;
}
