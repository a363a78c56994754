//! Domain error types for the NNTP protocol engine.
//!
//! Errors are structured internally but the dispatcher only ever exposes
//! the generic, spec-mandated text to the client; the taxonomy exists so
//! the dispatch boundary can translate backend failures into the right
//! status code without backends needing to know about wire formatting.

use thiserror::Error;

/// What kind of lookup produced an [`NntpError::ArticleNotFound`]; the
/// dispatcher needs this to choose between `423`, `430` and `420`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Lookup by article number.
    Number,
    /// Lookup by message-id.
    MessageId,
    /// The session's current article number was unset or invalid.
    Current,
}

/// Top-level engine error type.
#[derive(Error, Debug)]
pub enum NntpError {
    /// Malformed framing, an oversize line, or premature EOF. Always fatal:
    /// the caller emits `205 Connection closing` and ends the session.
    #[error("data error: {0}")]
    DataError(String),

    /// `GROUP`/`LISTGROUP` named a group the backend doesn't have.
    #[error("no such newsgroup")]
    NoSuchGroup,

    /// A command requiring a selected group was issued with none selected.
    #[error("no newsgroup selected")]
    NoGroupSelected,

    /// An article lookup failed; see [`LookupKind`] for which status code
    /// applies.
    #[error("no such article")]
    ArticleNotFound(LookupKind),

    /// `AUTHINFO PASS` or a backend credential check failed.
    #[error("authentication failed: {0}")]
    AuthenticationError(String),

    /// Backend rejected a posted article.
    #[error("posting failed: {0}")]
    PostError(String),

    /// Command syntax was malformed.
    #[error("syntax error")]
    SyntaxError,

    /// First token did not match any known command.
    #[error("unknown command")]
    UnknownCommand,

    /// A facility isn't available in the current configuration (e.g.
    /// `LIST SUBSCRIPTIONS` when the backend exposes none, or `AUTHINFO`
    /// when auth isn't offered).
    #[error("command unavailable")]
    Unavailable,

    /// `AUTHINFO PASS` issued before `AUTHINFO USER`.
    #[error("authentication commands issued out of sequence")]
    AuthOutOfSequence,

    /// Generic backend failure not covered by the above.
    #[error("server error: {0}")]
    ServerError(String),
}

impl NntpError {
    /// Whether this error must terminate the session.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, NntpError::DataError(_))
    }

    /// Generic, client-safe message used where spec.md doesn't mandate
    /// exact wording (errors that carry backend-supplied reason text use
    /// that text instead; see `handlers::utils::handle_error`).
    #[must_use]
    pub fn client_message(&self) -> &'static str {
        match self {
            NntpError::DataError(_) => "Connection closing",
            NntpError::NoSuchGroup => "No such newsgroup",
            NntpError::NoGroupSelected => "No newsgroup selected",
            NntpError::ArticleNotFound(LookupKind::Number) => "No article with that number",
            NntpError::ArticleNotFound(LookupKind::MessageId) => {
                "No article with that message-id"
            }
            NntpError::ArticleNotFound(LookupKind::Current) => "Current article number is invalid",
            NntpError::AuthenticationError(_) => "Authentication failed",
            NntpError::PostError(_) => "Posting failed",
            NntpError::SyntaxError => "Syntax Error",
            NntpError::UnknownCommand => "Unknown command",
            NntpError::Unavailable => "Command unavailable",
            NntpError::AuthOutOfSequence => "Authentication commands issued out of sequence",
            NntpError::ServerError(_) => "Service temporarily unavailable",
        }
    }
}
