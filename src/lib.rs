//! Embeddable NNTP (RFC 3977) reader-mode server.
//!
//! Implement [`backend::Backend`] for your data source, then hand a
//! connected socket to [`engine::handle_connection`] or let [`server::Server`]
//! own the listeners for you.

pub mod backend;
pub mod capabilities;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod overview;
pub mod parse;
pub mod responses;
pub mod server;
pub mod session;
pub mod wildmat;
pub mod wire;

pub use backend::{Article, ArticleInfo, AuthMode, Backend, DynBackend, Group, PostMode};
pub use error::{LookupKind, NntpError};
pub use session::Session;
