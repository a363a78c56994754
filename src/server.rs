//! TCP/TLS listener shell: binds the configured addresses and spawns
//! [`engine::handle_connection`] per accepted socket.

use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use rustls_pemfile::{certs, pkcs8_private_keys};
use tokio::net::TcpListener;
use tokio_rustls::{rustls, TlsAcceptor};
use tracing::{error, info};

use crate::backend::DynBackend;
use crate::config::Config;
use crate::engine::handle_connection;

type ServerResult<T> = anyhow::Result<T>;

/// Owns the listeners for one backend and runs until `ctrl_c`.
pub struct Server {
    backend: DynBackend,
}

impl Server {
    #[must_use]
    pub fn new(backend: DynBackend) -> Self {
        Self { backend }
    }

    /// Binds the plain and (if configured) TLS listeners from `cfg` and
    /// serves connections until a `ctrl_c` signal arrives. The idle timeout
    /// and maximum line length applied to every connection come from `cfg`,
    /// not from construction time.
    ///
    /// # Errors
    ///
    /// Returns an error if either listener fails to bind, or the TLS
    /// certificate/key cannot be loaded.
    pub async fn run(self, cfg: &Config) -> ServerResult<()> {
        let idle_timeout = Duration::from_secs(cfg.idle_timeout_secs);
        let max_line_length = cfg.max_line_length;

        let _tcp_handle = self
            .start_tcp_listener(&cfg.addr, idle_timeout, max_line_length)
            .await?;
        let _tls_handle = self
            .start_tls_listener(cfg, idle_timeout, max_line_length)
            .await?;

        tokio::signal::ctrl_c().await?;
        info!("shutdown signal received");

        Ok(())
    }

    async fn start_tcp_listener(
        &self,
        addr: &str,
        idle_timeout: Duration,
        max_line_length: usize,
    ) -> ServerResult<tokio::task::JoinHandle<()>> {
        let listener = bind(addr).await?;
        let backend = self.backend.clone();

        Ok(tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, peer)) => {
                        info!(%peer, "accepted connection");
                        let backend = backend.clone();
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(
                                socket,
                                backend,
                                false,
                                idle_timeout,
                                max_line_length,
                            )
                            .await
                            {
                                error!("client error: {e}");
                            }
                        });
                    }
                    Err(e) => error!("failed to accept connection: {e}"),
                }
            }
        }))
    }

    async fn start_tls_listener(
        &self,
        cfg: &Config,
        idle_timeout: Duration,
        max_line_length: usize,
    ) -> ServerResult<Option<tokio::task::JoinHandle<()>>> {
        let Some((tls_addr, cert, key)) = (|| {
            Some((cfg.tls_addr.as_deref()?, cfg.tls_cert.as_ref()?, cfg.tls_key.as_ref()?))
        })() else {
            return Ok(None);
        };

        let listener = bind(tls_addr).await?;
        let acceptor = TlsAcceptor::from(Arc::new(load_tls_config(cert, key)?));
        let backend = self.backend.clone();

        Ok(Some(tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, peer)) => {
                        info!(%peer, "accepted TLS connection");
                        let backend = backend.clone();
                        let acceptor = acceptor.clone();
                        tokio::spawn(async move {
                            match acceptor.accept(socket).await {
                                Ok(stream) => {
                                    if let Err(e) = handle_connection(
                                        stream,
                                        backend,
                                        true,
                                        idle_timeout,
                                        max_line_length,
                                    )
                                    .await
                                    {
                                        error!("client error: {e}");
                                    }
                                }
                                Err(e) => error!("tls handshake error: {e}"),
                            }
                        });
                    }
                    Err(e) => error!("failed to accept TLS connection: {e}"),
                }
            }
        })))
    }
}

fn listen_addr(raw: &str) -> String {
    if raw.parse::<SocketAddr>().is_ok() {
        raw.to_string()
    } else if let Some(port) = raw.strip_prefix(':') {
        format!("0.0.0.0:{port}")
    } else {
        format!("0.0.0.0:{raw}")
    }
}

async fn bind(raw: &str) -> ServerResult<TcpListener> {
    let addr = listen_addr(raw);
    info!("listening on {addr}");
    TcpListener::bind(&addr).await.map_err(|e| {
        anyhow::anyhow!(
            "failed to bind to address '{addr}': {e}\n\n\
             this usually means another process already holds the port, \
             the port needs privileges (<1024), or the address is malformed"
        )
    })
}

fn load_tls_config(cert_path: &str, key_path: &str) -> ServerResult<rustls::ServerConfig> {
    let cert_file = &mut BufReader::new(File::open(cert_path).map_err(|e| {
        anyhow::anyhow!("failed to open TLS certificate file '{cert_path}': {e}")
    })?);
    let key_file = &mut BufReader::new(File::open(key_path).map_err(|e| {
        anyhow::anyhow!("failed to open TLS private key file '{key_path}': {e}")
    })?);

    let certs = certs(cert_file)
        .map_err(|e| anyhow::anyhow!("failed to parse TLS certificate file '{cert_path}': {e}"))?
        .into_iter()
        .map(rustls::Certificate)
        .collect();

    let mut keys = pkcs8_private_keys(key_file)
        .map_err(|e| anyhow::anyhow!("failed to parse TLS private key file '{key_path}': {e}"))?;
    if keys.is_empty() {
        return Err(anyhow::anyhow!(
            "no PKCS#8 private key found in '{key_path}'"
        ));
    }
    let key = rustls::PrivateKey(keys.remove(0));

    rustls::ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| anyhow::anyhow!("failed to build TLS configuration: {e}"))
}
