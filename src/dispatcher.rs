use crate::config::OutputMode;
use crate::error::FormatError;
use crate::formatters::{Attachment, Formatter, Notification};
use crate::payload::{IssueCommentPayload, PullRequestPayload};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Webhook categories this service renders (`X-GitHub-Event`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PullRequest,
    IssueComment,
}

impl EventKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "pull_request" => Some(EventKind::PullRequest),
            "issue_comment" => Some(EventKind::IssueComment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PullRequest => "pull_request",
            EventKind::IssueComment => "issue_comment",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Handler = fn(&Formatter, &Value) -> Result<Attachment, FormatError>;

fn issue_comment_created(formatter: &Formatter, value: &Value) -> Result<Attachment, FormatError> {
    formatter.issue_comment_created(&IssueCommentPayload::from_value(value)?)
}

fn pull_request_opened(formatter: &Formatter, value: &Value) -> Result<Attachment, FormatError> {
    formatter.pull_request_opened(&PullRequestPayload::from_value(value)?)
}

fn pull_request_assigned(formatter: &Formatter, value: &Value) -> Result<Attachment, FormatError> {
    formatter.pull_request_assigned(&PullRequestPayload::from_value(value)?)
}

fn pull_request_closed(formatter: &Formatter, value: &Value) -> Result<Attachment, FormatError> {
    formatter.pull_request_closed(&PullRequestPayload::from_value(value)?)
}

const ROUTES: &[(EventKind, &str, Handler)] = &[
    (
        EventKind::IssueComment,
        "created",
        issue_comment_created as Handler,
    ),
    (EventKind::PullRequest, "opened", pull_request_opened as Handler),
    (
        EventKind::PullRequest,
        "assigned",
        pull_request_assigned as Handler,
    ),
    (EventKind::PullRequest, "closed", pull_request_closed as Handler),
];

/// Picks the formatter operation for an `(event kind, action)` pair and
/// renders the result in the configured output mode.
#[derive(Clone)]
pub struct Dispatcher {
    formatter: Formatter,
    output_mode: OutputMode,
    routes: HashMap<EventKind, HashMap<&'static str, Handler>>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("formatter", &self.formatter)
            .field("output_mode", &self.output_mode)
            .field("routes", &ROUTES.len())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(formatter: Formatter, output_mode: OutputMode) -> Self {
        let mut routes: HashMap<EventKind, HashMap<&'static str, Handler>> = HashMap::new();
        for (kind, action, handler) in ROUTES {
            let previous = routes.entry(*kind).or_default().insert(*action, *handler);
            debug_assert!(previous.is_none(), "duplicate route {}/{}", kind, action);
            tracing::debug!("Registered route {}/{}", kind, action);
        }

        Self {
            formatter,
            output_mode,
            routes,
        }
    }

    fn handler(&self, kind: EventKind, action: &str) -> Option<Handler> {
        self.routes
            .get(&kind)
            .and_then(|actions| actions.get(action))
            .copied()
    }

    /// Actions accepted for `kind`, in registration order.
    pub fn actions(kind: EventKind) -> Vec<&'static str> {
        ROUTES
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, action, _)| *action)
            .collect()
    }

    pub fn dispatch(&self, kind: EventKind, payload: &Value) -> Result<Notification, FormatError> {
        let action = payload
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| FormatError::missing("action"))?;

        let handler = self
            .handler(kind, action)
            .ok_or_else(|| FormatError::UnknownAction {
                kind: kind.to_string(),
                action: action.to_string(),
            })?;

        let attachment = handler(&self.formatter, payload)?;
        Ok(Notification::render(attachment, self.output_mode))
    }
}
