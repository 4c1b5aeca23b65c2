pub const FALLBACK_MESSAGE: &str = "Sorry, I hit my";
pub const FALLBACK_LINK_LABEL: &str = "AWS budget threshold";
pub const FALLBACK_LINK_URL: &str =
    "https://docs.aws.amazon.com/cost-management/latest/userguide/budgets-create.html";
pub const FALLBACK_FOLLOW_UP: &str = "Try again later.";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Bot,
}

/// Notice with one embedded link, kept as fields so each renderer decides
/// how a link looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichNotice {
    pub message: String,
    pub link_label: String,
    pub link_url: String,
    pub follow_up: String,
}

impl RichNotice {
    pub fn new(
        message: impl Into<String>,
        link_label: impl Into<String>,
        link_url: impl Into<String>,
        follow_up: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            link_label: link_label.into(),
            link_url: link_url.into(),
            follow_up: follow_up.into(),
        }
    }
}

/// Shown in place of a reply whenever the inference call fails.
pub fn fallback_notice() -> RichNotice {
    RichNotice::new(
        FALLBACK_MESSAGE,
        FALLBACK_LINK_LABEL,
        FALLBACK_LINK_URL,
        FALLBACK_FOLLOW_UP,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageText {
    Plain(String),
    Notice(RichNotice),
}

/// One turn in the conversation. Turns are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: MessageText,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: MessageText::Plain(text.into()),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: MessageText::Plain(text.into()),
            sender: Sender::Bot,
        }
    }

    pub fn bot_notice(notice: RichNotice) -> Self {
        Self {
            text: MessageText::Notice(notice),
            sender: Sender::Bot,
        }
    }
}
