//! Capability block assembly (spec.md §4.4).

use crate::backend::{AuthMode, PostMode};
use crate::responses;
use crate::session::{AuthState, Session};

/// Whether posting is permitted right now, accounting for the session's
/// auth state — this is also used to decide the greeting line and the
/// `POST` command's own permission check, so the capability block, the
/// greeting, and the `POST` handler never disagree.
#[must_use]
pub fn can_post(post_mode: PostMode, session: &Session) -> bool {
    match post_mode {
        PostMode::Disabled => false,
        PostMode::Open => true,
        PostMode::RequiresAuth => session.is_authenticated(),
    }
}

/// Whether `AUTHINFO USER` should be advertised: the server offers auth,
/// the session isn't authenticated yet, and (if auth is secure-only) the
/// transport is TLS.
#[must_use]
pub fn can_offer_authinfo(auth_mode: AuthMode, session: &Session) -> bool {
    if session.auth_state == AuthState::Authenticated {
        return false;
    }
    match auth_mode {
        AuthMode::Disabled => false,
        AuthMode::Any => true,
        AuthMode::SecureOnly => session.is_tls,
    }
}

/// Builds the full capability block, `101 Capability list:` through the
/// terminating `.`, as a flat line sequence ready for `wire::write_lines`.
#[must_use]
pub fn build_capabilities(
    post_mode: PostMode,
    auth_mode: AuthMode,
    session: &Session,
) -> Vec<String> {
    let mut lines = vec![responses::CAPABILITY_LIST.to_string()];
    lines.extend(responses::CAPABILITY_FIXED_LINES.iter().map(|s| s.to_string()));
    if can_post(post_mode, session) {
        lines.push(responses::CAPABILITY_POST.to_string());
    }
    if can_offer_authinfo(auth_mode, session) {
        lines.push(responses::CAPABILITY_AUTHINFO_USER.to_string());
    }
    lines.push(responses::DOT.to_string());
    lines
}
