//! NNTP command handlers, organized by command family (spec.md §4.4),
//! dispatched from a single table per spec.md §9's "replace the giant
//! conditional chain" Design Notes bullet.

pub mod article;
pub mod auth;
pub mod group;
pub mod info;
pub mod post;
pub mod utils;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::backend::DynBackend;
use crate::error::NntpError;
use crate::parse::Command;
use crate::session::Session;

/// Everything a handler needs for one command: the framed connection,
/// the backend, and the mutable session.
pub struct HandlerContext<'a, R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub reader: &'a mut R,
    pub writer: &'a mut W,
    pub backend: &'a DynBackend,
    pub session: &'a mut Session,
    /// Maximum accepted line length, from [`crate::config::Config`]
    /// (`crate::wire::MAX_LINE_LENGTH` if no config was loaded).
    pub max_line_length: usize,
}

/// Dispatches one parsed command to its handler. `QUIT` is handled by the
/// caller (the connection loop), never reaching this table.
pub async fn dispatch<R, W>(ctx: &mut HandlerContext<'_, R, W>, cmd: &Command) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    match cmd.name.as_str() {
        "CAPABILITIES" => info::handle_capabilities(ctx).await,
        "MODE" => info::handle_mode(ctx, &cmd.args).await,
        "DATE" => info::handle_date(ctx).await,
        "HELP" => info::handle_help(ctx).await,
        "LIST" => group::handle_list(ctx, &cmd.args).await,
        "GROUP" => group::handle_group(ctx, &cmd.args).await.map(|_| ()),
        "LISTGROUP" => group::handle_listgroup(ctx, &cmd.args).await,
        "NEWGROUPS" => group::handle_newgroups(ctx, &cmd.args).await,
        "NEWNEWS" => group::handle_newnews(ctx, &cmd.args).await,
        "ARTICLE" => article::handle_retrieval(ctx, &cmd.args, article::Operation::Full).await,
        "HEAD" => article::handle_retrieval(ctx, &cmd.args, article::Operation::Headers).await,
        "BODY" => article::handle_retrieval(ctx, &cmd.args, article::Operation::Body).await,
        "STAT" => article::handle_retrieval(ctx, &cmd.args, article::Operation::Stat).await,
        "OVER" | "XOVER" => article::handle_over(ctx, &cmd.args).await,
        "HDR" | "XHDR" => article::handle_hdr(ctx, &cmd.args).await,
        "POST" => post::handle_post(ctx).await,
        "AUTHINFO" => auth::handle_authinfo(ctx, &cmd.args).await,
        _ => Err(NntpError::UnknownCommand),
    }
}
