//! The per-connection read-dispatch-write loop (spec.md §5).

use std::time::Duration;

use tokio::io::{split, AsyncRead, AsyncWrite, BufReader};
use tracing::debug;

use crate::backend::DynBackend;
use crate::capabilities::can_post;
use crate::error::NntpError;
use crate::handlers::utils::reason_response;
use crate::handlers::{dispatch, HandlerContext};
use crate::parse::parse_command;
use crate::responses;
use crate::session::Session;
use crate::wire;

/// Services one client connection end to end: sends the greeting, then
/// loops reading a command, dispatching it, and writing a response until
/// `QUIT`, a fatal framing error, or the idle timeout.
#[tracing::instrument(skip(socket, backend))]
pub async fn handle_connection<S>(
    socket: S,
    backend: DynBackend,
    is_tls: bool,
    idle_timeout: Duration,
    max_line_length: usize,
) -> Result<(), NntpError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (read_half, write_half) = split(socket);
    let mut reader = BufReader::new(read_half);
    let mut writer = write_half;
    let mut session = Session::new(is_tls);

    let greeting = if can_post(backend.post_mode(), &session) {
        responses::READY_POSTING_ALLOWED
    } else {
        responses::READY_POSTING_PROHIBITED
    };
    wire::write_line(&mut writer, greeting).await?;
    session.initialized = true;

    loop {
        let line = match tokio::time::timeout(
            idle_timeout,
            wire::read_line(&mut reader, max_line_length),
        )
        .await
        {
            Ok(Ok(Some(line))) => line,
            Ok(Ok(None)) => break,
            Ok(Err(e)) => {
                wire::write_line(&mut writer, responses::CLOSING).await.ok();
                return Err(e);
            }
            Err(_) => {
                debug!("connection idle for {:?}, closing", idle_timeout);
                break;
            }
        };

        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        if cmd.name == "QUIT" {
            wire::write_line(&mut writer, responses::CLOSING).await?;
            break;
        }

        if cmd.name != "CAPABILITIES" {
            backend.refresh().await;
        }

        let mut ctx = HandlerContext {
            reader: &mut reader,
            writer: &mut writer,
            backend: &backend,
            session: &mut session,
            max_line_length,
        };

        if let Err(e) = dispatch(&mut ctx, &cmd).await {
            if e.is_fatal() {
                wire::write_line(&mut writer, responses::CLOSING).await.ok();
                return Err(e);
            }
            debug!("command {} failed: {}", cmd.name, e);
            wire::write_line(&mut writer, &reason_response(&e)).await?;
        }
    }

    Ok(())
}
