//! Client-side view of the server-held session.
//!
//! The server is the authority on authentication; this struct only mirrors
//! what the client has been told. It is set on a successful login and
//! cleared on logout or whenever an authenticated call comes back
//! unauthorized (implicit expiry).

/// Severity of a transient user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational (registration succeeded, logged out).
    Info,
    /// Something went wrong (bad credentials, session expired).
    Error,
}

/// A transient message shown on the auth screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text, often sourced verbatim from the server.
    pub text: String,
    /// Display severity.
    pub level: NoticeLevel,
}

/// Session state mirrored from the server.
#[derive(Debug, Default)]
pub struct Session {
    authenticated: bool,
    username: Option<String>,
    notice: Option<Notice>,
}

impl Session {
    /// Creates an unauthenticated session with no notice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the client believes it holds a valid session.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Display name of the authenticated user, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Current transient notice, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Marks the session established for `username` and clears any notice.
    pub fn establish(&mut self, username: String) {
        self.authenticated = true;
        self.username = Some(username);
        self.notice = None;
    }

    /// Clears the session after an explicit logout.
    pub fn clear(&mut self, notice: impl Into<String>) {
        self.authenticated = false;
        self.username = None;
        self.set_info(notice);
    }

    /// Clears the session after the server rejected an authenticated call.
    pub fn expire(&mut self) {
        self.authenticated = false;
        self.username = None;
        self.set_error("Your session has expired. Please log in again.");
    }

    /// Shows an informational notice.
    pub fn set_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            level: NoticeLevel::Info,
        });
    }

    /// Shows an error notice.
    pub fn set_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            level: NoticeLevel::Error,
        });
    }

    /// Drops the current notice, if any.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
