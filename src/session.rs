//! Per-connection session state (spec.md §3/§4.5).

/// Where a session sits in the `AUTHINFO` handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    None,
    /// `AUTHINFO USER` received; waiting for `AUTHINFO PASS`.
    UserPending,
    Authenticated,
}

/// Per-connection state. Strictly private to one session (spec.md §5).
#[derive(Debug, Clone)]
pub struct Session {
    /// False until the greeting has been sent.
    pub initialized: bool,
    pub auth_state: AuthState,
    /// Set once `auth_state` is `UserPending` or `Authenticated`.
    pub username: Option<String>,
    /// Opaque token set on successful authentication.
    pub auth_token: Option<Vec<u8>>,
    pub selected_group: Option<String>,
    pub selected_article_number: Option<u64>,
    /// Whether this connection is carried over TLS (affects `AUTHINFO`
    /// gating under `AuthMode::SecureOnly`).
    pub is_tls: bool,
}

impl Session {
    #[must_use]
    pub fn new(is_tls: bool) -> Self {
        Self {
            initialized: false,
            auth_state: AuthState::None,
            username: None,
            auth_token: None,
            selected_group: None,
            selected_article_number: None,
            is_tls,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth_state == AuthState::Authenticated
    }

    /// Selects a group, setting the current article to `low` (or clearing
    /// it if the group is empty), per spec.md §4.4 `GROUP`.
    pub fn select_group(&mut self, name: &str, low: u64, count: u64) {
        self.selected_group = Some(name.to_string());
        self.selected_article_number = if count > 0 { Some(low) } else { None };
    }

    pub fn set_pending_username(&mut self, username: &str) {
        self.username = Some(username.to_string());
        self.auth_state = AuthState::UserPending;
        self.auth_token = None;
    }

    pub fn authenticate(&mut self, token: Vec<u8>) {
        self.auth_state = AuthState::Authenticated;
        self.auth_token = Some(token);
    }
}
