use super::{Attachment, Formatter};
use crate::error::FormatError;
use crate::payload::{Payload, PullRequestPayload};
use crate::text::preview;

impl Formatter {
    /// `pull_request` / `opened`
    pub fn pull_request_opened(
        &self,
        payload: &PullRequestPayload,
    ) -> Result<Attachment, FormatError> {
        let preview = preview(payload.body());
        let fallback = format!(
            "{} opened new pull request {} in {}:\n > {}",
            self.sender_link(payload)?,
            Self::item_link(payload)?,
            payload.repo_link()?,
            preview
        );

        Self::attachment(payload, &self.palette.opened, fallback, Some(preview))
    }

    /// `pull_request` / `assigned`. Fails unless the payload names the
    /// assignee by login.
    pub fn pull_request_assigned(
        &self,
        payload: &PullRequestPayload,
    ) -> Result<Attachment, FormatError> {
        match payload.assignee() {
            None => return Err(FormatError::missing("assignee")),
            Some(assignee) if assignee.login.is_none() => {
                return Err(FormatError::missing("assignee.login"))
            }
            Some(_) => {}
        }

        let fallback = format!(
            "{} assigned {} to pull request {}.",
            self.sender_link(payload)?,
            self.assignee_link(payload),
            Self::item_link(payload)?
        );

        Self::attachment(payload, &self.palette.assigned, fallback, None)
    }

    /// `pull_request` / `closed`. Merged and unmerged share the merged color.
    pub fn pull_request_closed(
        &self,
        payload: &PullRequestPayload,
    ) -> Result<Attachment, FormatError> {
        let action = if payload.merged() { "merged" } else { "closed" };
        let fallback = format!(
            "{} {} pull request {}",
            self.sender_link(payload)?,
            action,
            Self::item_link(payload)?
        );

        Self::attachment(payload, &self.palette.merged, fallback, None)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{repository, user};
    use super::*;
    use crate::config::Palette;
    use serde_json::{json, Value};

    fn pull_request_event(action: &str) -> Value {
        json!({
            "action": action,
            "number": 5,
            "pull_request": {
                "number": 5,
                "title": "Add widgets",
                "body": "This adds widgets.\r\nAnd more.",
                "html_url": "https://github.com/octo/widgets/pull/5",
                "merged": false,
                "labels": [{"name": "enhancement"}, {"name": "ui"}]
            },
            "repository": repository(),
            "sender": user("alice")
        })
    }

    fn formatter() -> Formatter {
        Formatter::new(Palette::default(), false)
    }

    fn parse(event: &Value) -> PullRequestPayload {
        PullRequestPayload::from_value(event).unwrap()
    }

    #[test]
    fn test_opened() {
        let attachment = formatter()
            .pull_request_opened(&parse(&pull_request_event("opened")))
            .unwrap();

        assert_eq!(attachment.color, "#F86864");
        assert_eq!(attachment.title, "#5 Add widgets");
        assert_eq!(attachment.title_link, "https://github.com/octo/widgets/pull/5");
        assert_eq!(attachment.text.as_deref(), Some("This adds widgets. [...]"));
        assert_eq!(attachment.fields[1].value, "(Nobody)");
        assert_eq!(attachment.fields[2].value, "enhancement, ui");
        assert_eq!(
            attachment.fallback,
            "[alice](https://github.com/alice) opened new pull request \
             [#5 Add widgets](https://github.com/octo/widgets/pull/5) \
             in [octo/widgets](https://github.com/octo/widgets):\n > This adds widgets. [...]"
        );
    }

    #[test]
    fn test_assigned() {
        let mut event = pull_request_event("assigned");
        event["assignee"] = user("bob");

        let attachment = formatter().pull_request_assigned(&parse(&event)).unwrap();

        assert_eq!(attachment.color, "#F8A864");
        assert_eq!(attachment.text, None);
        assert_eq!(attachment.fields[1].value, "bob");
        assert_eq!(
            attachment.fallback,
            "[alice](https://github.com/alice) assigned [bob](https://github.com/bob) \
             to pull request [#5 Add widgets](https://github.com/octo/widgets/pull/5)."
        );
    }

    #[test]
    fn test_assigned_with_avatars() {
        let mut event = pull_request_event("assigned");
        event["assignee"] = user("bob");

        let attachment = Formatter::new(Palette::default(), true)
            .pull_request_assigned(&parse(&event))
            .unwrap();

        assert!(attachment.fallback.contains(
            "assigned ![](https://avatars.githubusercontent.com/bob?v=4&s=18) [bob](https://github.com/bob)"
        ));
    }

    #[test]
    fn test_assigned_without_assignee_fails() {
        let result = formatter().pull_request_assigned(&parse(&pull_request_event("assigned")));
        assert_eq!(result, Err(FormatError::MissingField("assignee".into())));
    }

    #[test]
    fn test_assigned_without_assignee_login_fails() {
        let mut event = pull_request_event("assigned");
        event["assignee"] = json!({"html_url": "https://github.com/bob"});

        let result = formatter().pull_request_assigned(&parse(&event));
        assert_eq!(
            result,
            Err(FormatError::MissingField("assignee.login".into()))
        );
    }

    #[test]
    fn test_closed_merged_and_unmerged_share_color() {
        let mut merged_event = pull_request_event("closed");
        merged_event["pull_request"]["merged"] = json!(true);
        let merged = formatter()
            .pull_request_closed(&parse(&merged_event))
            .unwrap();

        let closed = formatter()
            .pull_request_closed(&parse(&pull_request_event("closed")))
            .unwrap();

        assert_eq!(
            merged.fallback,
            "[alice](https://github.com/alice) merged pull request \
             [#5 Add widgets](https://github.com/octo/widgets/pull/5)"
        );
        assert_eq!(
            closed.fallback,
            "[alice](https://github.com/alice) closed pull request \
             [#5 Add widgets](https://github.com/octo/widgets/pull/5)"
        );
        assert_eq!(merged.color, "#4EC356");
        assert_eq!(closed.color, merged.color);
        assert_eq!(closed.text, None);
    }

    #[test]
    fn test_custom_palette() {
        let palette = Palette {
            merged: "#123456".into(),
            ..Palette::default()
        };
        let attachment = Formatter::new(palette, false)
            .pull_request_closed(&parse(&pull_request_event("closed")))
            .unwrap();

        assert_eq!(attachment.color, "#123456");
    }

    #[test]
    fn test_missing_pull_request() {
        let mut event = pull_request_event("opened");
        event.as_object_mut().unwrap().remove("pull_request");

        assert_eq!(
            formatter().pull_request_opened(&parse(&event)),
            Err(FormatError::MissingField("pull_request".into()))
        );
    }
}
