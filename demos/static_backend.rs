//! A minimal, fully in-memory `Backend` exposing one group with one
//! article, wired up to a plain-TCP listener. Run with:
//!
//!     cargo run --example static_backend

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use nntpd::{
    Article, ArticleInfo, AuthMode, Backend, DynBackend, Group, NntpError, PostMode,
};

struct StaticBackend {
    group: Group,
    article: Article,
}

#[async_trait]
impl Backend for StaticBackend {
    async fn groups(&self) -> Vec<Group> {
        vec![self.group.clone()]
    }

    async fn article_info_by_number(&self, number: u64) -> Result<ArticleInfo, NntpError> {
        if number == self.article.info.number {
            Ok(self.article.info.clone())
        } else {
            Err(NntpError::ArticleNotFound(nntpd::LookupKind::Number))
        }
    }

    async fn article_info_by_message_id(
        &self,
        message_id: &str,
    ) -> Result<ArticleInfo, NntpError> {
        if message_id == self.article.info.message_id {
            Ok(self.article.info.clone())
        } else {
            Err(NntpError::ArticleNotFound(nntpd::LookupKind::MessageId))
        }
    }

    async fn article_by_number(&self, number: u64) -> Result<Article, NntpError> {
        if number == self.article.info.number {
            Ok(self.article.clone())
        } else {
            Err(NntpError::ArticleNotFound(nntpd::LookupKind::Number))
        }
    }

    async fn article_by_message_id(&self, message_id: &str) -> Result<Article, NntpError> {
        if message_id == self.article.info.message_id {
            Ok(self.article.clone())
        } else {
            Err(NntpError::ArticleNotFound(nntpd::LookupKind::MessageId))
        }
    }

    fn post_mode(&self) -> PostMode {
        PostMode::Open
    }

    fn auth_mode(&self) -> AuthMode {
        AuthMode::Disabled
    }

    async fn post(&self, _auth_token: Option<&[u8]>, _article_text: &str) -> Result<(), NntpError> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = nntpd::config::Config::from_file("demos/static_backend.toml")
        .unwrap_or_else(|_| toml::from_str(r#"addr = "127.0.0.1:1119""#).unwrap());
    cfg.init_logging();

    let article = Article {
        info: ArticleInfo {
            number: 1,
            subject: "Hello world!".to_string(),
            from: "poster@example.com".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 12).unwrap(),
            message_id: "<unique@example.com>".to_string(),
            references: String::new(),
            bytes: 17,
            lines: 1,
            headers: Vec::new(),
        },
        body: "Hello from NNTP.".to_string(),
    };

    let backend: DynBackend = std::sync::Arc::new(StaticBackend {
        group: Group {
            name: "example.all".to_string(),
            short_description: "Everything".to_string(),
            number: 1,
            low: 1,
            high: 1,
            created: article.info.date,
            posting_permitted: true,
        },
        article,
    });

    let server = nntpd::server::Server::new(backend);
    server.run(&cfg).await
}
