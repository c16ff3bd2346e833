//! Typed views over GitHub webhook payloads.
//!
//! Every field is optional at the serde level so that a missing key never
//! fails deserialization. The [`Payload`] accessors decide what is required
//! (and report the path with [`FormatError::MissingField`]) and what falls
//! back to a placeholder.

use crate::error::FormatError;
use crate::text::sized_avatar;
use serde::Deserialize;
use serde_json::Value;

pub const NOBODY: &str = "(Nobody)";
pub const NO_LABELS: &str = "(None)";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    pub full_name: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    pub login: Option<String>,
    pub html_url: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Issue {
    pub number: Option<i64>,
    pub title: Option<String>,
    pub assignee: Option<User>,
    pub labels: Option<Vec<Label>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comment {
    pub html_url: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    pub number: Option<i64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub html_url: Option<String>,
    pub merged: Option<bool>,
    pub assignee: Option<User>,
    pub labels: Option<Vec<Label>>,
}

/// `issue_comment` event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueCommentPayload {
    pub action: Option<String>,
    pub issue: Option<Issue>,
    pub comment: Option<Comment>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

/// `pull_request` event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestPayload {
    pub action: Option<String>,
    pub pull_request: Option<PullRequest>,
    /// Only sent with `assigned`/`unassigned`.
    pub assignee: Option<User>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

fn required<'a>(value: Option<&'a str>, path: &str) -> Result<&'a str, FormatError> {
    value.ok_or_else(|| FormatError::missing(path))
}

/// Accessors shared by every event kind the formatters understand.
///
/// Implementors provide the kind-specific pieces (which object holds the
/// number, title, body and link); everything else is derived here.
pub trait Payload {
    fn repository(&self) -> Option<&Repository>;
    fn sender(&self) -> Option<&User>;
    fn assignee(&self) -> Option<&User>;
    fn labels(&self) -> Option<&[Label]>;

    fn number(&self) -> Result<i64, FormatError>;
    fn title(&self) -> Result<&str, FormatError>;
    /// Empty when the body is absent or null.
    fn body(&self) -> &str;
    fn url(&self) -> Result<&str, FormatError>;

    fn repo_name(&self) -> Result<&str, FormatError> {
        let repository = self
            .repository()
            .ok_or_else(|| FormatError::missing("repository"))?;
        required(repository.full_name.as_deref(), "repository.full_name")
    }

    fn repo_url(&self) -> Result<&str, FormatError> {
        let repository = self
            .repository()
            .ok_or_else(|| FormatError::missing("repository"))?;
        required(repository.html_url.as_deref(), "repository.html_url")
    }

    fn repo_link(&self) -> Result<String, FormatError> {
        Ok(format!("[{}]({})", self.repo_name()?, self.repo_url()?))
    }

    fn sender_name(&self) -> Result<&str, FormatError> {
        let sender = self.sender().ok_or_else(|| FormatError::missing("sender"))?;
        required(sender.login.as_deref(), "sender.login")
    }

    fn sender_url(&self) -> Result<&str, FormatError> {
        let sender = self.sender().ok_or_else(|| FormatError::missing("sender"))?;
        required(sender.html_url.as_deref(), "sender.html_url")
    }

    fn sender_avatar(&self) -> Result<String, FormatError> {
        let sender = self.sender().ok_or_else(|| FormatError::missing("sender"))?;
        let avatar = required(sender.avatar_url.as_deref(), "sender.avatar_url")?;
        Ok(sized_avatar(avatar))
    }

    fn assignee_name(&self) -> &str {
        self.assignee()
            .and_then(|user| user.login.as_deref())
            .unwrap_or(NOBODY)
    }

    fn assignee_url(&self) -> &str {
        self.assignee()
            .and_then(|user| user.html_url.as_deref())
            .unwrap_or("")
    }

    fn assignee_avatar(&self) -> String {
        self.assignee()
            .and_then(|user| user.avatar_url.as_deref())
            .map(sized_avatar)
            .unwrap_or_default()
    }

    fn labels_joined(&self) -> String {
        match self.labels() {
            Some(labels) if !labels.is_empty() => labels
                .iter()
                .map(|label| label.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => NO_LABELS.to_string(),
        }
    }
}

impl IssueCommentPayload {
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        Ok(Self::deserialize(value)?)
    }

    fn issue(&self) -> Result<&Issue, FormatError> {
        self.issue.as_ref().ok_or_else(|| FormatError::missing("issue"))
    }

    fn comment(&self) -> Result<&Comment, FormatError> {
        self.comment
            .as_ref()
            .ok_or_else(|| FormatError::missing("comment"))
    }
}

impl Payload for IssueCommentPayload {
    fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }

    fn sender(&self) -> Option<&User> {
        self.sender.as_ref()
    }

    fn assignee(&self) -> Option<&User> {
        self.issue.as_ref().and_then(|issue| issue.assignee.as_ref())
    }

    fn labels(&self) -> Option<&[Label]> {
        self.issue
            .as_ref()
            .and_then(|issue| issue.labels.as_deref())
    }

    fn number(&self) -> Result<i64, FormatError> {
        self.issue()?
            .number
            .ok_or_else(|| FormatError::missing("issue.number"))
    }

    fn title(&self) -> Result<&str, FormatError> {
        required(self.issue()?.title.as_deref(), "issue.title")
    }

    fn body(&self) -> &str {
        self.comment
            .as_ref()
            .and_then(|comment| comment.body.as_deref())
            .unwrap_or("")
    }

    fn url(&self) -> Result<&str, FormatError> {
        required(self.comment()?.html_url.as_deref(), "comment.html_url")
    }
}

impl PullRequestPayload {
    pub fn from_value(value: &Value) -> Result<Self, FormatError> {
        Ok(Self::deserialize(value)?)
    }

    fn pull_request(&self) -> Result<&PullRequest, FormatError> {
        self.pull_request
            .as_ref()
            .ok_or_else(|| FormatError::missing("pull_request"))
    }

    pub fn merged(&self) -> bool {
        self.pull_request
            .as_ref()
            .and_then(|pr| pr.merged)
            .unwrap_or(false)
    }
}

impl Payload for PullRequestPayload {
    fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }

    fn sender(&self) -> Option<&User> {
        self.sender.as_ref()
    }

    fn assignee(&self) -> Option<&User> {
        self.assignee.as_ref().or_else(|| {
            self.pull_request
                .as_ref()
                .and_then(|pr| pr.assignee.as_ref())
        })
    }

    fn labels(&self) -> Option<&[Label]> {
        self.pull_request
            .as_ref()
            .and_then(|pr| pr.labels.as_deref())
    }

    fn number(&self) -> Result<i64, FormatError> {
        self.pull_request()?
            .number
            .ok_or_else(|| FormatError::missing("pull_request.number"))
    }

    fn title(&self) -> Result<&str, FormatError> {
        required(self.pull_request()?.title.as_deref(), "pull_request.title")
    }

    fn body(&self) -> &str {
        self.pull_request
            .as_ref()
            .and_then(|pr| pr.body.as_deref())
            .unwrap_or("")
    }

    fn url(&self) -> Result<&str, FormatError> {
        required(
            self.pull_request()?.html_url.as_deref(),
            "pull_request.html_url",
        )
    }
}
