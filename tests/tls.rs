//! TLS loopback test: posting gated to secure transport (`AuthMode::SecureOnly`).

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::FixtureBackend;
use nntpd::AuthMode;
use rcgen::{generate_simple_self_signed, CertifiedKey};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::{rustls, TlsAcceptor, TlsConnector};

async fn read_line(reader: &mut (impl AsyncBufReadExt + Unpin)) -> String {
    let mut line = String::new();
    reader.read_line(&mut line).await.unwrap();
    line.trim_end_matches(['\r', '\n']).to_string()
}

async fn send(writer: &mut (impl AsyncWriteExt + Unpin), line: &str) {
    writer.write_all(line.as_bytes()).await.unwrap();
    writer.write_all(b"\r\n").await.unwrap();
}

#[tokio::test]
async fn authinfo_over_tls_is_offered_capability() {
    let CertifiedKey { cert, signing_key } =
        generate_simple_self_signed(["localhost".to_string()]).unwrap();
    let cert_der = cert.der().to_vec();
    let key_der = signing_key.serialize_der();

    let tls_config = rustls::ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth()
        .with_single_cert(
            vec![rustls::Certificate(cert_der.clone())],
            rustls::PrivateKey(key_der),
        )
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(tls_config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut fixture = FixtureBackend::default();
    fixture.auth_mode = AuthMode::SecureOnly;
    let backend: nntpd::DynBackend = Arc::new(fixture);

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let stream = acceptor.accept(socket).await.unwrap();
        nntpd::engine::handle_connection(
            stream,
            backend,
            true,
            Duration::from_secs(5),
            nntpd::wire::MAX_LINE_LENGTH,
        )
        .await
        .ok();
    });

    let mut root_store = rustls::RootCertStore::empty();
    root_store.add(&rustls::Certificate(cert_der)).unwrap();
    let client_config = rustls::ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let connector = TlsConnector::from(Arc::new(client_config));

    let tcp = TcpStream::connect(addr).await.unwrap();
    let server_name = rustls::ServerName::try_from("localhost").unwrap();
    let tls_stream = connector.connect(server_name, tcp).await.unwrap();
    let (r, mut writer) = tokio::io::split(tls_stream);
    let mut reader = BufReader::new(r);

    read_line(&mut reader).await; // greeting
    send(&mut writer, "CAPABILITIES").await;
    read_line(&mut reader).await; // 101
    let mut saw_authinfo = false;
    loop {
        let line = read_line(&mut reader).await;
        if line == "." {
            break;
        }
        if line == "AUTHINFO USER" {
            saw_authinfo = true;
        }
    }
    assert!(saw_authinfo);
}
