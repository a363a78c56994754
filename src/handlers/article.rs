//! `ARTICLE`/`HEAD`/`BODY`/`STAT`, `OVER`/`XOVER`, `HDR`/`XHDR`
//! (spec.md §4.4).

use tokio::io::{AsyncBufRead, AsyncWrite};

use super::utils::{classify_key, field_value, header_block, not_found_response, ArticleKey, Family};
use super::HandlerContext;
use crate::backend::{Article, ArticleInfo};
use crate::error::{LookupKind, NntpError};
use crate::overview::generate_overview_line;
use crate::parse::{self, Range};
use crate::responses;
use crate::wire;

/// Which of ARTICLE/HEAD/BODY/STAT is being serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Full,
    Headers,
    Body,
    Stat,
}

impl Operation {
    fn code(self) -> &'static str {
        match self {
            Operation::Full => responses::ARTICLE_FOLLOWS,
            Operation::Headers => responses::HEAD_FOLLOWS,
            Operation::Body => responses::BODY_FOLLOWS,
            Operation::Stat => responses::ARTICLE_EXISTS,
        }
    }
}

/// Resolves the current-article-number case: requires a selected group
/// and a valid `selected_article_number`.
fn current_article_number<R, W>(ctx: &HandlerContext<'_, R, W>) -> Result<(String, u64), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let group = ctx
        .session
        .selected_group
        .clone()
        .ok_or(NntpError::NoGroupSelected)?;
    let number = ctx
        .session
        .selected_article_number
        .ok_or(NntpError::ArticleNotFound(LookupKind::Current))?;
    Ok((group, number))
}

pub async fn handle_retrieval<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
    op: Operation,
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let article = match args.first() {
        None => {
            let (_group, number) = match current_article_number(ctx) {
                Ok(v) => v,
                Err(NntpError::NoGroupSelected) => {
                    return wire::write_line(ctx.writer, responses::NO_NEWSGROUP_SELECTED).await
                }
                Err(NntpError::ArticleNotFound(LookupKind::Current)) => {
                    return wire::write_line(ctx.writer, responses::NO_CURRENT_ARTICLE).await
                }
                Err(e) => return Err(e),
            };
            match ctx.backend.article_by_number(number).await {
                Ok(a) => a,
                Err(_) => {
                    return wire::write_line(ctx.writer, responses::NO_CURRENT_ARTICLE).await
                }
            }
        }
        Some(arg) => match classify_key(arg) {
            Some(ArticleKey::Number(0)) => {
                return wire::write_line(ctx.writer, responses::NO_ARTICLE_WITH_NUMBER).await
            }
            Some(ArticleKey::Number(n)) => match ctx.backend.article_by_number(n).await {
                Ok(a) => a,
                Err(_) => {
                    return wire::write_line(
                        ctx.writer,
                        not_found_response(LookupKind::Number, Family::Article),
                    )
                    .await
                }
            },
            Some(ArticleKey::MessageId(id)) => match ctx.backend.article_by_message_id(&id).await {
                Ok(a) => a,
                Err(_) => {
                    return wire::write_line(
                        ctx.writer,
                        not_found_response(LookupKind::MessageId, Family::Article),
                    )
                    .await
                }
            },
            None => return Err(NntpError::SyntaxError),
        },
    };

    write_article(ctx, &article, op).await
}

async fn write_article<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    article: &Article,
    op: Operation,
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let status = format!(
        "{} {} {}",
        op.code(),
        article.info.number,
        article.info.message_id
    );
    let mut lines = vec![status];
    match op {
        Operation::Full => {
            lines.extend(header_block(&article.info));
            lines.push(String::new());
            lines.extend(wire::dot_stuff(&article.body));
            lines.push(responses::DOT.to_string());
        }
        Operation::Headers => {
            lines.extend(header_block(&article.info));
            lines.push(responses::DOT.to_string());
        }
        Operation::Body => {
            lines.extend(wire::dot_stuff(&article.body));
            lines.push(responses::DOT.to_string());
        }
        Operation::Stat => {}
    }
    wire::write_lines(ctx.writer, lines).await
}

/// Resolves a range/message-id argument for `OVER`/`HDR` into a list of
/// matching `(number, ArticleInfo)` pairs within the selected group.
async fn resolve_range<R, W>(
    ctx: &HandlerContext<'_, R, W>,
    group: &str,
    spec: &str,
) -> Vec<(u64, ArticleInfo)>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let group_info = ctx.backend.group(group).await;
    let (lo, hi) = match parse::parse_range(spec) {
        Some(Range::Single(n)) => (n, n),
        Some(Range::Open(n)) => (n, group_info.map(|g| g.high).unwrap_or(n)),
        Some(Range::Closed(n, m)) => (n, m),
        None => return Vec::new(),
    };
    let mut out = Vec::new();
    if hi >= lo {
        for n in lo..=hi {
            if let Ok(info) = ctx.backend.article_info_by_number(n).await {
                out.push((n, info));
            }
        }
    }
    out
}

pub async fn handle_over<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let Some(group) = ctx.session.selected_group.clone() else {
        return wire::write_line(ctx.writer, responses::NO_NEWSGROUP_SELECTED).await;
    };

    let records: Vec<ArticleInfo> = match args.first() {
        None => {
            let Some(n) = ctx.session.selected_article_number else {
                return wire::write_line(ctx.writer, responses::NO_CURRENT_ARTICLE).await;
            };
            match ctx.backend.article_info_by_number(n).await {
                Ok(info) => vec![info],
                Err(_) => return wire::write_line(ctx.writer, responses::NO_CURRENT_ARTICLE).await,
            }
        }
        Some(arg) => match classify_key(arg) {
            Some(ArticleKey::MessageId(id)) => match ctx.backend.article_info_by_message_id(&id).await {
                Ok(info) => vec![info],
                Err(_) => {
                    return wire::write_line(
                        ctx.writer,
                        not_found_response(LookupKind::MessageId, Family::Overview),
                    )
                    .await
                }
            },
            _ => resolve_range(ctx, &group, arg)
                .await
                .into_iter()
                .map(|(_, info)| info)
                .collect(),
        },
    };

    let mut lines = vec![responses::OVERVIEW_FOLLOWS.to_string()];
    lines.extend(records.iter().map(generate_overview_line));
    lines.push(responses::DOT.to_string());
    wire::write_lines(ctx.writer, lines).await
}

pub async fn handle_hdr<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    args: &[String],
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let Some(field) = args.first().cloned() else {
        return Err(NntpError::SyntaxError);
    };

    match args.get(1) {
        None => {
            if ctx.session.selected_group.is_none() {
                return wire::write_line(ctx.writer, responses::NO_NEWSGROUP_SELECTED).await;
            }
            let Some(n) = ctx.session.selected_article_number else {
                return wire::write_line(ctx.writer, responses::NO_CURRENT_ARTICLE).await;
            };
            match ctx.backend.article_info_by_number(n).await {
                Ok(info) => write_hdr_lines(ctx, &[(n, info)], &field).await,
                Err(_) => wire::write_line(ctx.writer, responses::NO_CURRENT_ARTICLE).await,
            }
        }
        Some(arg) => match classify_key(arg) {
            Some(ArticleKey::MessageId(id)) => {
                match ctx.backend.article_info_by_message_id(&id).await {
                    Ok(info) => {
                        let number = info.number;
                        write_hdr_lines(ctx, &[(number, info)], &field).await
                    }
                    Err(_) => {
                        wire::write_line(
                            ctx.writer,
                            not_found_response(LookupKind::MessageId, Family::Overview),
                        )
                        .await
                    }
                }
            }
            _ => {
                let Some(group) = ctx.session.selected_group.clone() else {
                    return wire::write_line(ctx.writer, responses::NO_NEWSGROUP_SELECTED).await;
                };
                let matches = resolve_range(ctx, &group, arg).await;
                if matches.is_empty() {
                    wire::write_line(ctx.writer, responses::NO_ARTICLES_IN_RANGE).await
                } else {
                    write_hdr_lines(ctx, &matches, &field).await
                }
            }
        },
    }
}

async fn write_hdr_lines<R, W>(
    ctx: &mut HandlerContext<'_, R, W>,
    articles: &[(u64, ArticleInfo)],
    field: &str,
) -> Result<(), NntpError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let mut lines = vec![responses::HEADERS_FOLLOW.to_string()];
    for (number, info) in articles {
        lines.push(format!("{number} {}", field_value(info, field)));
    }
    lines.push(responses::DOT.to_string());
    wire::write_lines(ctx.writer, lines).await
}
