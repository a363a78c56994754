//! Pure OVERVIEW record serialization (spec.md §4.3).

use crate::backend::ArticleInfo;

/// Strips CR/LF and turns TAB into a single space, per spec.md §4.3/§4.4's
/// field sanitization rule.
#[must_use]
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect()
}

/// Formats a UTC instant as RFC 5322 (used for the `Date:` header and for
/// the overview record's date field).
#[must_use]
pub fn format_rfc5322(date: chrono::DateTime<chrono::Utc>) -> String {
    date.to_rfc2822()
}

/// Builds the tab-separated OVERVIEW line for one article: number,
/// subject, from, date, message-id, references, bytes, lines, then one
/// field per extra header formatted as `Name: value`.
#[must_use]
pub fn generate_overview_line(info: &ArticleInfo) -> String {
    let mut fields = vec![
        info.number.to_string(),
        sanitize(&info.subject),
        sanitize(&info.from),
        sanitize(&format_rfc5322(info.date)),
        sanitize(&info.message_id),
        sanitize(&info.references),
        info.bytes.to_string(),
        info.lines.to_string(),
    ];
    for (name, value) in &info.headers {
        fields.push(sanitize(&format!("{name}: {value}")));
    }
    fields.join("\t")
}
