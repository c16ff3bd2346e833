use super::{Attachment, Formatter};
use crate::error::FormatError;
use crate::payload::{IssueCommentPayload, Payload};
use crate::text::preview;

impl Formatter {
    /// `issue_comment` / `created`
    pub fn issue_comment_created(
        &self,
        payload: &IssueCommentPayload,
    ) -> Result<Attachment, FormatError> {
        let preview = preview(payload.body());
        let fallback = format!(
            "{} commented on an issue {} in {}:\n > {}",
            self.sender_link(payload)?,
            Self::item_link(payload)?,
            payload.repo_link()?,
            preview
        );

        Self::attachment(payload, &self.palette.commented, fallback, Some(preview))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{repository, user};
    use super::*;
    use crate::config::Palette;
    use serde_json::{json, Value};

    fn comment_event() -> Value {
        json!({
            "action": "created",
            "issue": {
                "number": 42,
                "title": "Bug",
                "labels": [{"name": "bug"}],
                "assignee": user("bob")
            },
            "comment": {
                "html_url": "https://github.com/octo/widgets/issues/42#issuecomment-1",
                "body": "Found it.\nDetails below."
            },
            "repository": repository(),
            "sender": user("alice")
        })
    }

    #[test]
    fn test_created_attachment() {
        let formatter = Formatter::new(Palette::default(), true);
        let payload = IssueCommentPayload::from_value(&comment_event()).unwrap();
        let attachment = formatter.issue_comment_created(&payload).unwrap();

        assert_eq!(attachment.color, "#3D9296");
        assert_eq!(attachment.title, "#42 Bug");
        assert_eq!(attachment.text.as_deref(), Some("Found it. [...]"));
        assert_eq!(attachment.author_name, "alice");
        assert_eq!(
            attachment.author_icon,
            "https://avatars.githubusercontent.com/alice?v=4&s=18"
        );
        assert_eq!(attachment.author_link, "https://github.com/alice");
        assert_eq!(
            attachment.title_link,
            "https://github.com/octo/widgets/issues/42#issuecomment-1"
        );

        let fields: Vec<(&str, &str)> = attachment
            .fields
            .iter()
            .map(|f| (f.title.as_str(), f.value.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![("Author", "alice"), ("Assignee", "bob"), ("Labels", "bug")]
        );
    }

    #[test]
    fn test_created_fallback_text() {
        let formatter = Formatter::new(Palette::default(), false);
        let payload = IssueCommentPayload::from_value(&comment_event()).unwrap();
        let attachment = formatter.issue_comment_created(&payload).unwrap();

        assert_eq!(
            attachment.fallback,
            "[alice](https://github.com/alice) commented on an issue \
             [#42 Bug](https://github.com/octo/widgets/issues/42#issuecomment-1) \
             in [octo/widgets](https://github.com/octo/widgets):\n > Found it. [...]"
        );
    }

    #[test]
    fn test_created_with_avatars_in_fallback() {
        let formatter = Formatter::new(Palette::default(), true);
        let payload = IssueCommentPayload::from_value(&comment_event()).unwrap();
        let attachment = formatter.issue_comment_created(&payload).unwrap();

        assert!(attachment.fallback.starts_with(
            "![](https://avatars.githubusercontent.com/alice?v=4&s=18) [alice](https://github.com/alice) commented"
        ));
    }

    #[test]
    fn test_created_without_assignee_or_labels() {
        let mut event = comment_event();
        event["issue"] = json!({"number": 7, "title": "Question", "labels": []});
        event["comment"]["body"] = Value::Null;

        let formatter = Formatter::new(Palette::default(), false);
        let payload = IssueCommentPayload::from_value(&event).unwrap();
        let attachment = formatter.issue_comment_created(&payload).unwrap();

        assert_eq!(attachment.fields[1].value, "(Nobody)");
        assert_eq!(attachment.fields[2].value, "(None)");
        assert_eq!(attachment.text.as_deref(), Some(""));
    }

    #[test]
    fn test_created_missing_sender() {
        let mut event = comment_event();
        event.as_object_mut().unwrap().remove("sender");

        let formatter = Formatter::new(Palette::default(), false);
        let payload = IssueCommentPayload::from_value(&event).unwrap();

        assert_eq!(
            formatter.issue_comment_created(&payload),
            Err(FormatError::MissingField("sender".into()))
        );
    }

    #[test]
    fn test_created_missing_comment_url() {
        let mut event = comment_event();
        event["comment"] = json!({"body": "hi"});

        let formatter = Formatter::new(Palette::default(), false);
        let payload = IssueCommentPayload::from_value(&event).unwrap();

        assert_eq!(
            formatter.issue_comment_created(&payload),
            Err(FormatError::MissingField("comment.html_url".into()))
        );
    }
}
