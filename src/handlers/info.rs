//! `CAPABILITIES`, `MODE READER`, `DATE`, `HELP`.
//!
//! `QUIT` is handled directly in the connection loop (`engine.rs`), not
//! here, since it must close the socket rather than return to dispatch.

use tokio::io::{AsyncBufRead, AsyncWrite};

use super::HandlerContext;
use crate::capabilities;
use crate::error::NntpError;
use crate::parse::format_datetime;
use crate::responses;
use crate::wire;

pub async fn handle_capabilities<R, W>(ctx: &mut HandlerContext<'_, R, W>) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let lines = capabilities::build_capabilities(
        ctx.backend.post_mode(),
        ctx.backend.auth_mode(),
        ctx.session,
    );
    wire::write_lines(ctx.writer, lines).await
}

pub async fn handle_mode<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    match args.first().map(String::as_str) {
        Some(m) if m.eq_ignore_ascii_case("READER") => {
            let line = if capabilities::can_post(ctx.backend.post_mode(), ctx.session) {
                responses::READY_POSTING_ALLOWED
            } else {
                responses::READY_POSTING_PROHIBITED
            };
            wire::write_line(ctx.writer, line).await
        }
        _ => Err(NntpError::SyntaxError),
    }
}

pub async fn handle_date<R, W>(ctx: &mut HandlerContext<'_, R, W>) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let (date, time) = format_datetime(ctx.backend.date(), false);
    wire::write_line(ctx.writer, &format!("{} {date}{time}", responses::DATE_PREFIX)).await
}

pub async fn handle_help<R, W>(ctx: &mut HandlerContext<'_, R, W>) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let body = ctx
        .backend
        .help()
        .unwrap_or_else(|| responses::DEFAULT_HELP_BODY.iter().map(|s| s.to_string()).collect());
    let mut lines = vec![responses::HELP_FOLLOWS.to_string()];
    lines.extend(body);
    lines.push(responses::DOT.to_string());
    wire::write_lines(ctx.writer, lines).await
}
