//! Publish form text and request assembly.

use crate::{MediaStagingArea, TargetSelectionSet};
use pagecast_core::{MediaAsset, PublishRequest};
use pagecast_error::{ValidationError, ValidationErrorKind};

/// Message and link as typed in the publish form.
///
/// # Examples
///
/// ```
/// use pagecast_workflow::PublishRequestBuilder;
///
/// let request = PublishRequestBuilder::from_parts(
///     "  New menu  ",
///     Some("  "),
///     &["p1".to_string()],
///     &[],
/// )
/// .unwrap();
///
/// assert_eq!(request.message(), "New menu");
/// assert!(request.link().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishRequestBuilder {
    message: String,
    link: String,
}

impl PublishRequestBuilder {
    /// Replace the message text.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Replace the link text.
    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = link.into();
    }

    /// Raw message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw link text.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Empty both fields.
    pub fn clear(&mut self) {
        self.message.clear();
        self.link.clear();
    }

    /// Snapshot the form together with the current selection and staged media.
    pub fn build(
        &self,
        selection: &TargetSelectionSet,
        staging: &MediaStagingArea,
    ) -> Result<PublishRequest, ValidationError> {
        Self::from_parts(
            &self.message,
            Some(&self.link),
            &selection.ids(),
            staging.assets(),
        )
    }

    /// Validate raw inputs and assemble an owned request.
    ///
    /// The message is checked before the targets. The link is trimmed and an
    /// empty link is dropped; it is not otherwise validated.
    pub fn from_parts(
        raw_message: &str,
        raw_link: Option<&str>,
        targets: &[String],
        media: &[MediaAsset],
    ) -> Result<PublishRequest, ValidationError> {
        let message = raw_message.trim();
        if message.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::EmptyMessage));
        }

        let mut unique: Vec<String> = Vec::with_capacity(targets.len());
        for id in targets {
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }
        if unique.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::NoTargetsSelected));
        }

        let link = raw_link
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        Ok(PublishRequest::new(message, link, unique, media.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t1() -> Vec<String> {
        vec!["t1".to_string()]
    }

    #[test]
    fn empty_message_is_reported_first() {
        let err = PublishRequestBuilder::from_parts("   ", Some("https://x.fr"), &[], &[])
            .unwrap_err();
        assert_eq!(*err.kind(), ValidationErrorKind::EmptyMessage);

        let err = PublishRequestBuilder::from_parts("", Some("https://x.fr"), &t1(), &[])
            .unwrap_err();
        assert_eq!(*err.kind(), ValidationErrorKind::EmptyMessage);
    }

    #[test]
    fn missing_targets_are_reported() {
        let err = PublishRequestBuilder::from_parts("hi", Some("https://x.fr"), &[], &[])
            .unwrap_err();
        assert_eq!(*err.kind(), ValidationErrorKind::NoTargetsSelected);
    }

    #[test]
    fn link_is_optional() {
        let request = PublishRequestBuilder::from_parts("hi", None, &t1(), &[]).unwrap();
        assert_eq!(request.targets(), &t1());
        assert!(request.link().is_none());
    }

    #[test]
    fn link_is_trimmed_not_validated() {
        let request =
            PublishRequestBuilder::from_parts("hi", Some(" not a url "), &t1(), &[]).unwrap();
        assert_eq!(request.link().as_deref(), Some("not a url"));
    }

    #[test]
    fn request_is_a_snapshot_of_the_form() {
        let mut form = PublishRequestBuilder::default();
        let mut selection = TargetSelectionSet::new();
        selection.toggle("t1");
        form.set_message("first");

        let request = form.build(&selection, &MediaStagingArea::default()).unwrap();
        form.set_message("second");
        selection.toggle("t2");

        assert_eq!(request.message(), "first");
        assert_eq!(request.targets().len(), 1);
    }
}
