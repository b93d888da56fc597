// src/api/session.rs

/// Client-side session context: the signed-in user's bearer token and
/// display name. Injected into [`super::HttpApi`] at construction; the
/// attempt and progress modules read it through the API layer and never
/// mutate it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
}

impl Session {
    /// A session with no credentials. Mutating calls will be rejected by
    /// the server with 401.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Value for the 'Authorization' header, if the session has a token.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }
}
