//! CRLF line framing and dot-stuffing for the NNTP wire protocol.
//!
//! This is the one place that knows about line termination and the
//! dot-stuffing convention; handlers never touch raw bytes directly.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::NntpError;

/// Maximum accepted line length, including the terminating CRLF (spec.md §6).
/// Used as the default when a backend/config doesn't override it.
pub const MAX_LINE_LENGTH: usize = 2048;

/// Reads one CRLF- (or bare-LF-) terminated line, stripped of its
/// terminator. Returns `Ok(None)` on a clean end-of-stream (no bytes read
/// and nothing buffered). Fails with [`NntpError::DataError`] if the line
/// grows past `max_len` without a terminator.
pub async fn read_line<R>(reader: &mut R, max_len: usize) -> Result<Option<String>, NntpError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = reader
        .read_until(b'\n', &mut buf)
        .await
        .map_err(|e| NntpError::DataError(e.to_string()))?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&b'\n') {
        return Err(NntpError::DataError(
            "connection closed mid-line".to_string(),
        ));
    }
    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if buf.len() > max_len {
        return Err(NntpError::DataError("line too long".to_string()));
    }
    let text =
        String::from_utf8(buf).map_err(|e| NntpError::DataError(format!("invalid utf-8: {e}")))?;
    Ok(Some(text))
}

/// Reads a dot-terminated multi-line block (used only after a `340`
/// prompt), dot-unstuffing as it goes, and joins the result with `\n`
/// (no trailing newline). Fails the same way `read_line` does.
pub async fn read_multiline<R>(reader: &mut R, max_len: usize) -> Result<String, NntpError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = Vec::new();
    loop {
        let line = read_line(reader, max_len)
            .await?
            .ok_or_else(|| NntpError::DataError("connection closed during multiline".into()))?;
        if line == "." {
            break;
        }
        lines.push(dot_unstuff_line(&line));
    }
    Ok(lines.join("\n"))
}

/// Removes one leading `.` from a line that starts with `..`; otherwise
/// returns the line unchanged.
#[must_use]
pub fn dot_unstuff_line(line: &str) -> String {
    if let Some(rest) = line.strip_prefix("..") {
        format!(".{rest}")
    } else {
        line.to_string()
    }
}

/// Dot-stuffs a single line for output: a line starting with `.` gets an
/// extra `.` prepended.
#[must_use]
pub fn dot_stuff_line(line: &str) -> String {
    if line.starts_with('.') {
        format!(".{line}")
    } else {
        line.to_string()
    }
}

/// Dot-stuffs an entire body (lines separated by `\n`) for wire output.
#[must_use]
pub fn dot_stuff(body: &str) -> Vec<String> {
    body.split('\n').map(dot_stuff_line).collect()
}

/// Reverses [`dot_stuff`] for a body already split into a flat sequence of
/// still-stuffed lines; returns the unstuffed `\n`-joined body.
#[must_use]
pub fn dot_unstuff(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| dot_unstuff_line(l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes a flat sequence of already-formatted lines, each trimmed of
/// trailing whitespace and CRLF-terminated.
pub async fn write_lines<W, I, S>(writer: &mut W, lines: I) -> Result<(), NntpError>
where
    W: AsyncWrite + Unpin,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref().trim_end());
        out.push_str("\r\n");
    }
    writer
        .write_all(out.as_bytes())
        .await
        .map_err(|e| NntpError::DataError(e.to_string()))?;
    writer
        .flush()
        .await
        .map_err(|e| NntpError::DataError(e.to_string()))
}

/// Writes a single line.
pub async fn write_line<W>(writer: &mut W, line: &str) -> Result<(), NntpError>
where
    W: AsyncWrite + Unpin,
{
    write_lines(writer, std::iter::once(line)).await
}
