//! How failures are shown to the user.
//!
//! # Design
//! - Gateway failures surface the problem `detail`, then its `title`, then a
//!   caller-supplied fallback. Transport and decode errors always use the
//!   fallback.
//! - A 401 is never shown as a message; the caller clears the session and
//!   every session-aware view falls back to its signed-out state.
//! - Messages are inline notices the user can dismiss.

use microflix_client::ApiError;

/// What a view should do with a failed call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// The token was rejected; clear the stored session.
    AuthExpired,
    /// Show this message.
    Message(String),
}

/// Classify a failure, using `fallback` when the gateway said nothing useful.
#[must_use]
pub fn classify(err: &ApiError, fallback: &str) -> Feedback {
    if err.is_unauthorized() {
        return Feedback::AuthExpired;
    }
    Feedback::Message(failure_message(err, fallback))
}

/// Message for a failure, ignoring the 401 special case.
#[must_use]
pub fn failure_message(err: &ApiError, fallback: &str) -> String {
    err.failure()
        .and_then(|failure| failure.user_message())
        .unwrap_or(fallback)
        .to_string()
}

/// Tone of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something failed.
    Error,
    /// Something worked.
    Success,
}

/// Dismissable inline message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Identifier used to dismiss the notice.
    pub id: u64,
    /// Tone.
    pub kind: NoticeKind,
    /// Text shown to the user.
    pub message: String,
}

/// Edits a form page makes to its notices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoticeAction {
    /// Replace whatever is shown with one error.
    ShowError(String),
    /// Remove every notice.
    Clear,
    /// The user closed a notice.
    Dismiss(u64),
}

/// Ordered notices with stable ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notices {
    next_id: u64,
    items: Vec<Notice>,
}

impl Notices {
    /// Append a notice and return its id.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(Notice {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Append an error notice.
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message)
    }

    /// Remove a notice. Returns whether it was present.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|notice| notice.id != id);
        self.items.len() != before
    }

    /// Drop every notice. Ids keep increasing.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Notices in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    /// Next notices after `action`.
    #[must_use]
    pub fn apply(mut self, action: NoticeAction) -> Self {
        match action {
            NoticeAction::ShowError(message) => {
                self.clear();
                self.error(message);
            }
            NoticeAction::Clear => self.clear(),
            NoticeAction::Dismiss(id) => {
                self.dismiss(id);
            }
        }
        self
    }

    /// True when nothing is shown.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microflix_api_models::ProblemDetails;
    use microflix_client::TypedFailure;

    fn status(code: u16, title: Option<&str>, detail: Option<&str>) -> ApiError {
        let problem = ProblemDetails {
            title: title.map(str::to_string),
            detail: detail.map(str::to_string),
            ..ProblemDetails::default()
        };
        ApiError::from(TypedFailure::new(code, Some(problem)))
    }

    #[test]
    fn detail_wins_over_title() {
        let err = status(409, Some("Conflict"), Some("Already rated"));
        assert_eq!(
            classify(&err, "Failed to save rating."),
            Feedback::Message("Already rated".into())
        );
    }

    #[test]
    fn title_then_fallback() {
        assert_eq!(
            failure_message(&status(500, Some("Server Error"), Some("  ")), "Oops."),
            "Server Error"
        );
        assert_eq!(failure_message(&status(500, None, None), "Oops."), "Oops.");
        let bare = ApiError::from(TypedFailure::new(502, None));
        assert_eq!(failure_message(&bare, "Oops."), "Oops.");
    }

    #[test]
    fn non_status_errors_use_fallback() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(
            classify(&err, "Failed to load movies."),
            Feedback::Message("Failed to load movies.".into())
        );
    }

    #[test]
    fn unauthorized_expires_the_session() {
        let err = status(401, Some("Unauthorized"), Some("Token expired"));
        assert_eq!(classify(&err, "ignored"), Feedback::AuthExpired);
    }

    #[test]
    fn notices_dismiss_by_id() {
        let mut notices = Notices::default();
        let first = notices.error("one");
        let second = notices.push(NoticeKind::Success, "two");
        assert_ne!(first, second);

        assert!(notices.dismiss(first));
        assert!(!notices.dismiss(first));
        assert_eq!(notices.items().len(), 1);
        assert_eq!(notices.items()[0].message, "two");

        notices.clear();
        assert!(notices.is_empty());
        assert!(notices.error("three") > second);
    }

    #[test]
    fn form_errors_replace_each_other_and_can_be_closed() {
        let notices = Notices::default()
            .apply(NoticeAction::ShowError("Please enter your password.".into()))
            .apply(NoticeAction::ShowError("Invalid credentials".into()));
        assert_eq!(notices.items().len(), 1);
        assert_eq!(notices.items()[0].message, "Invalid credentials");

        let id = notices.items()[0].id;
        let notices = notices.apply(NoticeAction::Dismiss(id));
        assert!(notices.is_empty());

        let notices = notices
            .apply(NoticeAction::ShowError("Login failed.".into()))
            .apply(NoticeAction::Clear);
        assert!(notices.is_empty());
    }
}
