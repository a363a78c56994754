//! The backend contract (spec.md §4.6) and the data model it traffics in
//! (spec.md §3).
//!
//! A single capability object, not a split storage/auth pair — per
//! spec.md §9's first Design Notes bullet, which calls for reifying the
//! source's abstract base class as one trait with clearly-typed methods,
//! optional capabilities expressed as `Option`-returning "use default"
//! methods rather than via inheritance.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::NntpError;

/// An immutable article summary. Backends may regenerate these on each
/// call; no identity is guaranteed across calls (spec.md §3 Lifecycle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInfo {
    /// Article number, unique across the server-wide aggregate, monotone
    /// with arrival. A group's `low..high` bounds which numbers fall
    /// within it, but lookups by number are not scoped to a group.
    pub number: u64,
    pub subject: String,
    /// RFC 5322 address text.
    pub from: String,
    pub date: DateTime<Utc>,
    /// Message-id text, enclosed in `<…>`, globally unique.
    pub message_id: String,
    /// Possibly-empty message-id list text.
    pub references: String,
    /// Size of the body in octets.
    pub bytes: u64,
    /// Count of LF-separated lines in the body.
    pub lines: u64,
    /// Additional headers, ordered; case-insensitive on lookup, case
    /// preserved on output.
    pub headers: Vec<(String, String)>,
}

impl ArticleInfo {
    /// Case-insensitive lookup of an extra header's value.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An article: its summary plus body. Body lines are separated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub info: ArticleInfo,
    pub body: String,
}

/// A newsgroup.
#[derive(Debug, Clone)]
pub struct Group {
    /// Dotted token per RFC 3977; used verbatim as a wildmat match target.
    pub name: String,
    pub short_description: String,
    /// Count of present articles.
    pub number: u64,
    /// Low watermark; `low <= min(numbers)` when non-empty.
    pub low: u64,
    /// High watermark; `high >= max(numbers)` when non-empty.
    pub high: u64,
    pub created: DateTime<Utc>,
    pub posting_permitted: bool,
}

/// Whether the server offers/requires authentication, and under what
/// transport constraint (spec.md §4.4 capability/AUTHINFO gating rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// No authentication offered; `AUTHINFO` always `502`.
    Disabled,
    /// Authentication offered over any transport.
    Any,
    /// Authentication offered only once the transport is TLS.
    SecureOnly,
}

/// Whether posting requires prior authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostMode {
    /// Posting is never permitted.
    Disabled,
    /// Posting permitted without authentication.
    Open,
    /// Posting permitted only once the session is authenticated.
    RequiresAuth,
}

/// The capability object a host application implements to expose its data
/// through the NNTP surface.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Updates the backend's view of the world. Invoked before dispatching
    /// most commands (§4.4); must be idempotent and may be a no-op.
    async fn refresh(&self) {}

    /// All groups, by name.
    async fn groups(&self) -> Vec<Group>;

    /// A single group by name.
    async fn group(&self, name: &str) -> Option<Group> {
        self.groups().await.into_iter().find(|g| g.name == name)
    }

    /// Looks up an article summary by number, across the server-wide
    /// aggregate (spec.md §3/§4.6 — article numbers are not scoped to a
    /// group; a group's `low..high` only bounds which numbers it spans).
    async fn article_info_by_number(&self, number: u64) -> Result<ArticleInfo, NntpError>;

    /// Looks up an article summary by message-id, across all groups.
    async fn article_info_by_message_id(&self, message_id: &str) -> Result<ArticleInfo, NntpError>;

    /// Full article (summary + body) by number, across the server-wide
    /// aggregate.
    async fn article_by_number(&self, number: u64) -> Result<Article, NntpError>;

    /// Full article (summary + body) by message-id, across all groups.
    async fn article_by_message_id(&self, message_id: &str) -> Result<Article, NntpError>;

    /// Current UTC time, as observed by the backend (`DATE` command).
    fn date(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Ordered header names for `LIST OVERVIEW.FMT`.
    fn overview_format(&self) -> Vec<String> {
        [
            "Subject",
            "From",
            "Date",
            "Message-ID",
            "References",
            "Bytes",
            "Lines",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Subscribed group names, if the backend tracks a subscription list.
    async fn subscriptions(&self) -> Option<Vec<String>> {
        None
    }

    /// Overrides the default `NEWNEWS` scan. `None` means "use default":
    /// scan groups whose name exactly equals `wildmat` (spec.md §9 Open
    /// Question — no wildcard expansion in the default path) and collect
    /// every article with `date >= since`.
    async fn newnews(&self, _wildmat: &str, _since: DateTime<Utc>) -> Option<Vec<String>> {
        None
    }

    /// Overrides the default `NEWGROUPS` scan. `None` means "use default":
    /// groups with `created >= since`.
    async fn newgroups(&self, _since: DateTime<Utc>) -> Option<Vec<Group>> {
        None
    }

    /// Verifies credentials, returning an opaque auth token on success.
    async fn auth_user(&self, _user: &str, _pass: &str) -> Result<Vec<u8>, NntpError> {
        Err(NntpError::AuthenticationError(
            "authentication not supported".into(),
        ))
    }

    /// Accepts a posted article (already dot-unstuffed raw text).
    async fn post(&self, _auth_token: Option<&[u8]>, _article_text: &str) -> Result<(), NntpError> {
        Err(NntpError::PostError("posting not supported".into()))
    }

    /// Whether posting is ever permitted, and under what auth condition.
    fn post_mode(&self) -> PostMode {
        PostMode::Disabled
    }

    /// Whether/how authentication is offered.
    fn auth_mode(&self) -> AuthMode {
        AuthMode::Disabled
    }

    /// Optional help text body; `None` means "use the library default".
    fn help(&self) -> Option<Vec<String>> {
        None
    }

    /// Optional verbose-logging flag.
    fn debugging(&self) -> bool {
        false
    }
}

pub type DynBackend = std::sync::Arc<dyn Backend>;
