pub mod issue_comment;
pub mod pull_request;

use crate::config::{AppConfig, OutputMode, Palette};
use crate::error::FormatError;
use crate::payload::Payload;
use crate::text::user_link;
use serde::Serialize;

/// One row of the attachment's field table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub short: bool,
    pub title: String,
    pub value: String,
}

impl Field {
    fn short(title: &str, value: impl Into<String>) -> Self {
        Self {
            short: true,
            title: title.to_string(),
            value: value.into(),
        }
    }
}

/// Mattermost/Slack message attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    pub author_name: String,
    pub author_icon: String,
    pub author_link: String,
    pub title: String,
    pub title_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub fields: Vec<Field>,
}

/// What gets handed to the delivery adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Text(String),
    Attachment(Attachment),
}

impl Notification {
    pub fn render(attachment: Attachment, mode: OutputMode) -> Self {
        match mode {
            OutputMode::Attachment => Notification::Attachment(attachment),
            OutputMode::Legacy => Notification::Text(attachment.fallback),
        }
    }
}

/// Renders payloads into attachments. Holds only immutable settings, so one
/// instance is shared by every request.
#[derive(Debug, Clone)]
pub struct Formatter {
    palette: Palette,
    show_avatars: bool,
}

impl Formatter {
    pub fn new(palette: Palette, show_avatars: bool) -> Self {
        Self {
            palette,
            show_avatars,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.palette.clone(), config.show_avatars)
    }

    fn user_link(&self, name: &str, url: &str, avatar: &str) -> String {
        user_link(name, url, avatar, self.show_avatars)
    }

    fn sender_link<P: Payload>(&self, payload: &P) -> Result<String, FormatError> {
        Ok(self.user_link(
            payload.sender_name()?,
            payload.sender_url()?,
            &payload.sender_avatar()?,
        ))
    }

    fn assignee_link<P: Payload>(&self, payload: &P) -> String {
        self.user_link(
            payload.assignee_name(),
            payload.assignee_url(),
            &payload.assignee_avatar(),
        )
    }

    /// `[#<number> <title>](<url>)`
    fn item_link<P: Payload>(payload: &P) -> Result<String, FormatError> {
        Ok(format!(
            "[#{} {}]({})",
            payload.number()?,
            payload.title()?,
            payload.url()?
        ))
    }

    /// Author block, title and field table shared by every action.
    fn attachment<P: Payload>(
        payload: &P,
        color: &str,
        fallback: String,
        text: Option<String>,
    ) -> Result<Attachment, FormatError> {
        let sender_name = payload.sender_name()?;

        Ok(Attachment {
            fallback,
            color: color.to_string(),
            author_name: sender_name.to_string(),
            author_icon: payload.sender_avatar()?,
            author_link: payload.sender_url()?.to_string(),
            title: format!("#{} {}", payload.number()?, payload.title()?),
            title_link: payload.url()?.to_string(),
            text,
            fields: vec![
                Field::short("Author", sender_name),
                Field::short("Assignee", payload.assignee_name()),
                Field::short("Labels", payload.labels_joined()),
            ],
        })
    }
}
