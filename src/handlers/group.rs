//! `GROUP`, `LISTGROUP`, `LIST`, `NEWGROUPS`, `NEWNEWS` (spec.md §4.4).

use tokio::io::{AsyncBufRead, AsyncWrite};

use super::HandlerContext;
use crate::error::NntpError;
use crate::parse::{self, Range};
use crate::responses;
use crate::wildmat::wildmat;
use crate::wire;

/// Selects `name` if present in the backend, updating session state and
/// writing the `211`/`411` response. Returns the group on success, for
/// callers (`LISTGROUP`) that need it without re-querying the backend.
pub async fn handle_group<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> Result<Option<crate::backend::Group>, NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let Some(name) = args.first() else {
        return Err(NntpError::SyntaxError);
    };
    match ctx.backend.group(name).await {
        Some(group) => {
            ctx.session.select_group(&group.name, group.low, group.number);
            wire::write_line(
                ctx.writer,
                &format!("211 {} {} {} {}", group.number, group.low, group.high, group.name),
            )
            .await?;
            Ok(Some(group))
        }
        None => {
            wire::write_line(ctx.writer, responses::NO_SUCH_NEWSGROUP).await?;
            Ok(None)
        }
    }
}

pub async fn handle_listgroup<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let group = if let Some(name) = args.first() {
        match ctx.backend.group(name).await {
            Some(g) => {
                ctx.session.select_group(&g.name, g.low, g.number);
                g
            }
            None => return wire::write_line(ctx.writer, responses::NO_SUCH_NEWSGROUP).await,
        }
    } else {
        let Some(name) = ctx.session.selected_group.clone() else {
            return wire::write_line(ctx.writer, responses::NO_NEWSGROUP_SELECTED).await;
        };
        ctx.backend
            .group(&name)
            .await
            .ok_or(NntpError::NoSuchGroup)?
    };

    let (lo, hi) = match args.get(1).map(String::as_str).and_then(parse::parse_range) {
        Some(Range::Single(n)) => (n, n),
        Some(Range::Open(n)) => (n, group.high),
        Some(Range::Closed(n, m)) => (n, m),
        None => (group.low, group.high),
    };

    let mut lines = vec![format!(
        "211 {} {} {} {}",
        group.number, group.low, group.high, group.name
    )];
    if hi >= lo {
        for n in lo..=hi {
            if ctx.backend.article_info_by_number(n).await.is_ok() {
                lines.push(n.to_string());
            }
        }
    }
    lines.push(responses::DOT.to_string());
    wire::write_lines(ctx.writer, lines).await
}

pub async fn handle_list<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let keyword = args.first().map(|s| s.to_uppercase());
    let pattern = args.get(1).cloned();
    match keyword.as_deref() {
        None | Some("ACTIVE") => list_active(ctx, pattern.as_deref()).await,
        Some("NEWSGROUPS") => list_newsgroups(ctx, pattern.as_deref()).await,
        Some("OVERVIEW.FMT") => list_overview_fmt(ctx).await,
        Some("SUBSCRIPTIONS") => list_subscriptions(ctx).await,
        _ => wire::write_line(ctx.writer, responses::SYNTAX_ERROR).await,
    }
}

async fn list_active<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    pattern: Option<&str>,
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let mut lines = vec![responses::LIST_FOLLOWS.to_string()];
    for g in ctx.backend.groups().await {
        if pattern.is_some_and(|p| !wildmat(p, &g.name)) {
            continue;
        }
        let posting = if g.posting_permitted { "True" } else { "False" };
        lines.push(format!("{} {} {} {posting}", g.name, g.high, g.low));
    }
    lines.push(responses::DOT.to_string());
    wire::write_lines(ctx.writer, lines).await
}

async fn list_newsgroups<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    pattern: Option<&str>,
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let mut lines = vec![responses::LIST_FOLLOWS.to_string()];
    for g in ctx.backend.groups().await {
        if pattern.is_some_and(|p| !wildmat(p, &g.name)) {
            continue;
        }
        lines.push(format!("{}\t{}", g.name, g.short_description));
    }
    lines.push(responses::DOT.to_string());
    wire::write_lines(ctx.writer, lines).await
}

async fn list_overview_fmt<R, W>(ctx: &mut HandlerContext<'_, R, W>) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let mut lines = vec![responses::LIST_FOLLOWS.to_string()];
    lines.extend(ctx.backend.overview_format());
    lines.push(responses::DOT.to_string());
    wire::write_lines(ctx.writer, lines).await
}

async fn list_subscriptions<R, W>(ctx: &mut HandlerContext<'_, R, W>) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    match ctx.backend.subscriptions().await {
        Some(names) => {
            let mut lines = vec![responses::LIST_FOLLOWS.to_string()];
            lines.extend(names);
            lines.push(responses::DOT.to_string());
            wire::write_lines(ctx.writer, lines).await
        }
        None => Err(NntpError::Unavailable),
    }
}

pub async fn handle_newgroups<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let (Some(date), Some(time)) = (args.first(), args.get(1)) else {
        return Err(NntpError::SyntaxError);
    };
    let since =
        parse::parse_datetime(date, Some(time)).map_err(|_| NntpError::SyntaxError)?;

    let groups = match ctx.backend.newgroups(since).await {
        Some(groups) => groups,
        None => ctx
            .backend
            .groups()
            .await
            .into_iter()
            .filter(|g| g.created >= since)
            .collect(),
    };

    let mut lines = vec![responses::NEWGROUPS_FOLLOWS.to_string()];
    for g in groups {
        lines.push(format!("{} {} {} n", g.name, g.high, g.low));
    }
    lines.push(responses::DOT.to_string());
    wire::write_lines(ctx.writer, lines).await
}

pub async fn handle_newnews<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let (Some(wildmat_arg), Some(date), Some(time)) = (args.first(), args.get(1), args.get(2))
    else {
        return Err(NntpError::SyntaxError);
    };
    let since =
        parse::parse_datetime(date, Some(time)).map_err(|_| NntpError::SyntaxError)?;

    let message_ids = match ctx.backend.newnews(wildmat_arg, since).await {
        Some(ids) => ids,
        None => {
            let mut ids = Vec::new();
            for g in ctx.backend.groups().await {
                if g.name != *wildmat_arg {
                    continue;
                }
                for n in g.low..=g.high {
                    if let Ok(info) = ctx.backend.article_info_by_number(n).await {
                        if info.date >= since {
                            ids.push(info.message_id);
                        }
                    }
                }
            }
            ids
        }
    };

    let mut lines = vec![responses::NEWNEWS_FOLLOWS.to_string()];
    lines.extend(message_ids);
    lines.push(responses::DOT.to_string());
    wire::write_lines(ctx.writer, lines).await
}
