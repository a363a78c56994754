//! `POST` (spec.md §4.4).

use tokio::io::{AsyncBufRead, AsyncWrite};

use super::HandlerContext;
use crate::capabilities::can_post;
use crate::error::NntpError;
use crate::responses;
use crate::wire;

pub async fn handle_post<R, W>(ctx: &mut HandlerContext<'_, R, W>) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    if !can_post(ctx.backend.post_mode(), ctx.session) {
        return wire::write_line(ctx.writer, responses::POSTING_NOT_PERMITTED).await;
    }

    wire::write_line(ctx.writer, responses::SEND_ARTICLE).await?;

    let body = match wire::read_multiline(ctx.reader, ctx.max_line_length).await {
        Ok(text) => text,
        Err(e) if e.is_fatal() => {
            wire::write_line(ctx.writer, responses::CLOSING).await.ok();
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    match ctx
        .backend
        .post(ctx.session.auth_token.as_deref(), &body)
        .await
    {
        Ok(()) => wire::write_line(ctx.writer, responses::ARTICLE_RECEIVED).await,
        Err(NntpError::PostError(reason)) => {
            wire::write_line(ctx.writer, &format!("441 Posting failed: {reason}")).await
        }
        Err(other) => Err(other),
    }
}
