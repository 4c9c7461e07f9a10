//! Explicit session identity passed to remote adapters.

use std::fmt;

/// Authentication state of the current board session.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// A bearer token is available and attached to every request.
    Authenticated {
        /// Bearer token.
        token: String,
    },
    /// No credentials; requests go out without an `Authorization` header.
    #[default]
    Anonymous,
    /// Credentials are still being resolved.
    Pending,
}

impl Session {
    /// Creates a session from an optional token. Blank tokens count as
    /// anonymous.
    #[must_use]
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(value) if !value.trim().is_empty() => Self::Authenticated {
                token: value.trim().to_owned(),
            },
            _ => Self::Anonymous,
        }
    }

    /// Returns the bearer token when authenticated.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token } => Some(token),
            Self::Anonymous | Self::Pending => None,
        }
    }

    /// Returns `true` when credentials are available.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated { .. } => f.write_str("Authenticated { token: <redacted> }"),
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Pending => f.write_str("Pending"),
        }
    }
}
