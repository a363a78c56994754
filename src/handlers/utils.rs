//! Shared helpers used by several command-family handlers: article-key
//! classification, not-found response selection, and header formatting.

use crate::backend::ArticleInfo;
use crate::error::{LookupKind, NntpError};
use crate::overview::{format_rfc5322, sanitize};
use crate::responses;

/// How a wire argument names an article.
#[derive(Debug, Clone)]
pub enum ArticleKey {
    Number(u64),
    MessageId(String),
}

/// Classifies a bracketed `<...>` argument as a message-id and anything
/// parseable as a decimal integer as a number; anything else is `None`
/// (malformed key, `501`).
#[must_use]
pub fn classify_key(arg: &str) -> Option<ArticleKey> {
    if arg.starts_with('<') && arg.ends_with('>') && arg.len() > 1 {
        Some(ArticleKey::MessageId(arg.to_string()))
    } else {
        arg.parse::<u64>().ok().map(ArticleKey::Number)
    }
}

/// Which command family is asking, to select `423` vs `430` wording on a
/// message-id miss (spec.md §4.4: ARTICLE family uses `423` uniformly,
/// OVER/HDR family uses `430` for message-id lookups).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Article,
    Overview,
}

/// Picks the exact response line for an [`LookupKind`] failure.
#[must_use]
pub fn not_found_response(kind: LookupKind, family: Family) -> &'static str {
    match (kind, family) {
        (LookupKind::Number, _) => responses::NO_ARTICLE_WITH_NUMBER,
        (LookupKind::MessageId, Family::Article) => responses::NO_ARTICLE_WITH_NUMBER,
        (LookupKind::MessageId, Family::Overview) => responses::NO_ARTICLE_WITH_MESSAGE_ID,
        (LookupKind::Current, _) => responses::NO_CURRENT_ARTICLE,
    }
}

/// Builds the article header block written by `ARTICLE`/`HEAD`:
/// `From:`, `Subject:`, `Date:`, `Message-ID:`, optional `References:`,
/// then extra headers verbatim. Per DESIGN.md's Open Question 4, `from`
/// is emitted as-is (it is already RFC 5322 address text, not wrapped in
/// extra angle brackets).
#[must_use]
pub fn header_block(info: &ArticleInfo) -> Vec<String> {
    let mut lines = vec![
        format!("From: {}", sanitize(&info.from)),
        format!("Subject: {}", sanitize(&info.subject)),
        format!("Date: {}", format_rfc5322(info.date)),
        format!("Message-ID: {}", sanitize(&info.message_id)),
    ];
    if !info.references.is_empty() {
        lines.push(format!("References: {}", sanitize(&info.references)));
    }
    for (name, value) in &info.headers {
        lines.push(format!("{name}: {value}"));
    }
    lines
}

/// Extracts a single field's value for `HDR`/`XHDR`, per spec.md §4.4's
/// field table. Unknown header names return an empty string; recognized
/// pseudo-fields are `:bytes`/`:lines`.
#[must_use]
pub fn field_value(info: &ArticleInfo, field: &str) -> String {
    let value = if field.eq_ignore_ascii_case(":bytes") {
        info.bytes.to_string()
    } else if field.eq_ignore_ascii_case(":lines") {
        info.lines.to_string()
    } else if field.eq_ignore_ascii_case("subject") {
        info.subject.clone()
    } else if field.eq_ignore_ascii_case("from") {
        info.from.clone()
    } else if field.eq_ignore_ascii_case("date") {
        format_rfc5322(info.date)
    } else if field.eq_ignore_ascii_case("message-id") {
        info.message_id.clone()
    } else if field.eq_ignore_ascii_case("references") {
        info.references.clone()
    } else {
        info.header(field).map(str::to_string).unwrap_or_default()
    };
    sanitize(&value)
}

/// Maps any [`NntpError`] that reaches the connection loop without having
/// already written its own response (i.e. everything except `DataError`,
/// which is fatal and handled separately) to its exact wire line.
#[must_use]
pub fn reason_response(err: &NntpError) -> String {
    match err {
        NntpError::AuthenticationError(reason) => format!("481 {reason}"),
        NntpError::PostError(reason) => format!("441 Posting failed: {reason}"),
        NntpError::NoSuchGroup => responses::NO_SUCH_NEWSGROUP.to_string(),
        NntpError::NoGroupSelected => responses::NO_NEWSGROUP_SELECTED.to_string(),
        NntpError::ArticleNotFound(kind) => not_found_response(*kind, Family::Article).to_string(),
        NntpError::SyntaxError => responses::SYNTAX_ERROR.to_string(),
        NntpError::UnknownCommand => responses::UNKNOWN_COMMAND.to_string(),
        NntpError::Unavailable => responses::FACILITY_UNAVAILABLE.to_string(),
        NntpError::AuthOutOfSequence => responses::AUTH_OUT_OF_SEQUENCE.to_string(),
        NntpError::ServerError(reason) => format!("503 {reason}"),
        NntpError::DataError(_) => responses::CLOSING.to_string(),
    }
}
