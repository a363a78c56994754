use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use nntpd::{Article, ArticleInfo, AuthMode, Backend, DynBackend, Group, LookupKind, NntpError, PostMode};
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

/// A single group, single article backend matching the fixture used
/// throughout `spec.md` §8's worked examples.
pub struct FixtureBackend {
    pub group: Group,
    pub article: Article,
    pub post_mode: PostMode,
    pub auth_mode: AuthMode,
    pub valid_user: &'static str,
    pub valid_pass: &'static str,
}

impl Default for FixtureBackend {
    fn default() -> Self {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 12).unwrap();
        let article = Article {
            info: ArticleInfo {
                number: 1,
                subject: "Hello world!".to_string(),
                from: "poster@example.com".to_string(),
                date,
                message_id: "<unique@example.com>".to_string(),
                references: String::new(),
                bytes: 17,
                lines: 1,
                headers: Vec::new(),
            },
            body: "Hello from NNTP.".to_string(),
        };
        Self {
            group: Group {
                name: "example.all".to_string(),
                short_description: "Everything".to_string(),
                number: 1,
                low: 1,
                high: 1,
                created: date,
                posting_permitted: true,
            },
            article,
            post_mode: PostMode::Open,
            auth_mode: AuthMode::Disabled,
            valid_user: "alice",
            valid_pass: "hunter2",
        }
    }
}

#[async_trait]
impl Backend for FixtureBackend {
    async fn groups(&self) -> Vec<Group> {
        vec![self.group.clone()]
    }

    async fn article_info_by_number(&self, number: u64) -> Result<ArticleInfo, NntpError> {
        if number == self.article.info.number {
            Ok(self.article.info.clone())
        } else {
            Err(NntpError::ArticleNotFound(LookupKind::Number))
        }
    }

    async fn article_info_by_message_id(&self, message_id: &str) -> Result<ArticleInfo, NntpError> {
        if message_id == self.article.info.message_id {
            Ok(self.article.info.clone())
        } else {
            Err(NntpError::ArticleNotFound(LookupKind::MessageId))
        }
    }

    async fn article_by_number(&self, number: u64) -> Result<Article, NntpError> {
        if number == self.article.info.number {
            Ok(self.article.clone())
        } else {
            Err(NntpError::ArticleNotFound(LookupKind::Number))
        }
    }

    async fn article_by_message_id(&self, message_id: &str) -> Result<Article, NntpError> {
        if message_id == self.article.info.message_id {
            Ok(self.article.clone())
        } else {
            Err(NntpError::ArticleNotFound(LookupKind::MessageId))
        }
    }

    async fn auth_user(&self, user: &str, pass: &str) -> Result<Vec<u8>, NntpError> {
        if user == self.valid_user && pass == self.valid_pass {
            Ok(b"token".to_vec())
        } else {
            Err(NntpError::AuthenticationError("invalid credentials".into()))
        }
    }

    async fn post(&self, _auth_token: Option<&[u8]>, _article_text: &str) -> Result<(), NntpError> {
        Ok(())
    }

    fn post_mode(&self) -> PostMode {
        self.post_mode
    }

    fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }
}

/// Spawns a loopback TCP listener servicing exactly one connection with
/// `backend`, returning its address and the accept task's handle.
pub async fn spawn(backend: DynBackend) -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        nntpd::engine::handle_connection(
            socket,
            backend,
            false,
            Duration::from_secs(5),
            nntpd::wire::MAX_LINE_LENGTH,
        )
        .await
        .ok();
    });
    (addr, handle)
}

pub async fn connect(
    addr: std::net::SocketAddr,
) -> (
    BufReader<tokio::net::tcp::OwnedReadHalf>,
    tokio::net::tcp::OwnedWriteHalf,
) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (r, w) = stream.into_split();
    (BufReader::new(r), w)
}

pub fn backend(fixture: FixtureBackend) -> DynBackend {
    Arc::new(fixture)
}
