//! `AUTHINFO USER`/`AUTHINFO PASS` (spec.md §4.4).

use tokio::io::{AsyncBufRead, AsyncWrite};

use super::HandlerContext;
use crate::backend::AuthMode;
use crate::error::NntpError;
use crate::responses;
use crate::session::AuthState;
use crate::wire;

pub async fn handle_authinfo<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    if ctx.backend.auth_mode() == AuthMode::Disabled || ctx.session.is_authenticated() {
        return wire::write_line(ctx.writer, responses::COMMAND_UNAVAILABLE).await;
    }

    let (Some(sub), Some(value)) = (args.first(), args.get(1)) else {
        return Err(NntpError::SyntaxError);
    };

    if sub.eq_ignore_ascii_case("USER") {
        ctx.session.set_pending_username(value);
        wire::write_line(ctx.writer, responses::ENTER_PASSPHRASE).await
    } else if sub.eq_ignore_ascii_case("PASS") {
        if ctx.session.auth_state != AuthState::UserPending {
            return wire::write_line(ctx.writer, responses::AUTH_OUT_OF_SEQUENCE).await;
        }
        let username = ctx.session.username.clone().unwrap_or_default();
        match ctx.backend.auth_user(&username, value).await {
            Ok(token) => {
                ctx.session.authenticate(token);
                wire::write_line(ctx.writer, responses::AUTH_ACCEPTED).await
            }
            Err(NntpError::AuthenticationError(reason)) => {
                wire::write_line(ctx.writer, &format!("481 {reason}")).await
            }
            Err(other) => wire::write_line(ctx.writer, &format!("481 {}", other.client_message())).await,
        }
    } else {
        Err(NntpError::SyntaxError)
    }
}
