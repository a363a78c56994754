//! End-to-end loopback tests covering spec.md §8's worked scenarios.

mod common;

use common::{backend, connect, spawn, FixtureBackend};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

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
async fn greeting_then_quit() {
    let (addr, handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;

    assert_eq!(
        read_line(&mut reader).await,
        "200 NNTP Service Ready, posting allowed"
    );
    send(&mut writer, "QUIT").await;
    assert_eq!(read_line(&mut reader).await, "205 Connection closing");
    handle.await.unwrap();
}

#[tokio::test]
async fn group_then_article_by_number() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await; // greeting

    send(&mut writer, "GROUP example.all").await;
    assert_eq!(read_line(&mut reader).await, "211 1 1 1 example.all");

    send(&mut writer, "ARTICLE 1").await;
    assert_eq!(
        read_line(&mut reader).await,
        "220 1 <unique@example.com>"
    );
    assert_eq!(read_line(&mut reader).await, "From: poster@example.com");
    assert_eq!(read_line(&mut reader).await, "Subject: Hello world!");
    let date_line = read_line(&mut reader).await;
    assert!(date_line.starts_with("Date: "));
    assert_eq!(
        read_line(&mut reader).await,
        "Message-ID: <unique@example.com>"
    );
    assert_eq!(read_line(&mut reader).await, "");
    assert_eq!(read_line(&mut reader).await, "Hello from NNTP.");
    assert_eq!(read_line(&mut reader).await, ".");

    send(&mut writer, "QUIT").await;
    assert_eq!(read_line(&mut reader).await, "205 Connection closing");
}

#[tokio::test]
async fn article_by_message_id_without_group() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "STAT <unique@example.com>").await;
    assert_eq!(
        read_line(&mut reader).await,
        "223 1 <unique@example.com>"
    );
}

#[tokio::test]
async fn unknown_group_is_411() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "GROUP nonexistent.group").await;
    assert_eq!(read_line(&mut reader).await, "411 No such newsgroup");
}

#[tokio::test]
async fn body_with_explicit_number_ignores_group_selection() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    // A numeric BODY/ARTICLE/HEAD/STAT argument resolves against the
    // server-wide aggregate, not the selected group, so this succeeds
    // with no GROUP issued first.
    send(&mut writer, "BODY 1").await;
    assert_eq!(read_line(&mut reader).await, "222 1 <unique@example.com>");
    assert_eq!(read_line(&mut reader).await, "Hello from NNTP.");
    assert_eq!(read_line(&mut reader).await, ".");
}

#[tokio::test]
async fn body_no_args_without_selected_group_is_412() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "BODY").await;
    assert_eq!(read_line(&mut reader).await, "412 No newsgroup selected");
}

#[tokio::test]
async fn post_flow_accepts_article() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    assert_eq!(
        read_line(&mut reader).await,
        "200 NNTP Service Ready, posting allowed"
    );

    send(&mut writer, "POST").await;
    assert_eq!(
        read_line(&mut reader).await,
        "340 Input article; end with <CR-LF>.<CR-LF>"
    );
    send(&mut writer, "Subject: test").await;
    send(&mut writer, "").await;
    send(&mut writer, "body text").await;
    send(&mut writer, ".").await;
    assert_eq!(read_line(&mut reader).await, "240 Article received OK");
}

#[tokio::test]
async fn post_disabled_is_440() {
    let mut fixture = FixtureBackend::default();
    fixture.post_mode = nntpd::PostMode::Disabled;
    let (addr, _handle) = spawn(backend(fixture)).await;
    let (mut reader, mut writer) = connect(addr).await;
    assert_eq!(
        read_line(&mut reader).await,
        "201 NNTP Service Ready, posting prohibited"
    );

    send(&mut writer, "POST").await;
    assert_eq!(read_line(&mut reader).await, "440 Posting not permitted");
}

#[tokio::test]
async fn authinfo_user_pass_accepted() {
    let mut fixture = FixtureBackend::default();
    fixture.auth_mode = nntpd::AuthMode::Any;
    let (addr, _handle) = spawn(backend(fixture)).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "AUTHINFO USER alice").await;
    assert_eq!(read_line(&mut reader).await, "381 Enter passphrase");
    send(&mut writer, "AUTHINFO PASS hunter2").await;
    assert_eq!(read_line(&mut reader).await, "281 Authentication accepted");
}

#[tokio::test]
async fn authinfo_wrong_password_is_481() {
    let mut fixture = FixtureBackend::default();
    fixture.auth_mode = nntpd::AuthMode::Any;
    let (addr, _handle) = spawn(backend(fixture)).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "AUTHINFO USER alice").await;
    read_line(&mut reader).await;
    send(&mut writer, "AUTHINFO PASS wrong").await;
    assert_eq!(
        read_line(&mut reader).await,
        "481 invalid credentials"
    );
}

#[tokio::test]
async fn group_then_over_by_range() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "GROUP example.all").await;
    assert_eq!(read_line(&mut reader).await, "211 1 1 1 example.all");

    send(&mut writer, "XOVER 1-1").await;
    assert_eq!(
        read_line(&mut reader).await,
        "224 Overview information follows (multi-line)"
    );
    assert_eq!(
        read_line(&mut reader).await,
        "1\tHello world!\tposter@example.com\tMon, 15 Jan 2024 09:30:12 +0000\t<unique@example.com>\t\t17\t1"
    );
    assert_eq!(read_line(&mut reader).await, ".");
}

#[tokio::test]
async fn over_unknown_range_is_empty() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "GROUP example.all").await;
    read_line(&mut reader).await;

    send(&mut writer, "OVER 2-5").await;
    assert_eq!(
        read_line(&mut reader).await,
        "224 Overview information follows (multi-line)"
    );
    assert_eq!(read_line(&mut reader).await, ".");
}

#[tokio::test]
async fn group_then_hdr_subject_by_range() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "GROUP example.all").await;
    read_line(&mut reader).await;

    send(&mut writer, "XHDR Subject 1-1").await;
    assert_eq!(read_line(&mut reader).await, "225 Headers follow(multi-line)");
    assert_eq!(read_line(&mut reader).await, "1 Hello world!");
    assert_eq!(read_line(&mut reader).await, ".");
}

#[tokio::test]
async fn listgroup_reports_article_numbers() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "LISTGROUP example.all").await;
    assert_eq!(read_line(&mut reader).await, "211 1 1 1 example.all");
    assert_eq!(read_line(&mut reader).await, "1");
    assert_eq!(read_line(&mut reader).await, ".");
}

#[tokio::test]
async fn newgroups_reports_literal_n_field() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "NEWGROUPS 19990101 000000").await;
    assert_eq!(
        read_line(&mut reader).await,
        "231 list of new newsgroups follows"
    );
    assert_eq!(read_line(&mut reader).await, "example.all 1 1 n");
    assert_eq!(read_line(&mut reader).await, ".");
}

#[tokio::test]
async fn newnews_reports_matching_message_ids() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "NEWNEWS example.all 19990101 000000").await;
    assert_eq!(
        read_line(&mut reader).await,
        "230 list of new articles by message-id follows"
    );
    assert_eq!(read_line(&mut reader).await, "<unique@example.com>");
    assert_eq!(read_line(&mut reader).await, ".");
}

#[tokio::test]
async fn capabilities_lists_fixed_lines() {
    let (addr, _handle) = spawn(backend(FixtureBackend::default())).await;
    let (mut reader, mut writer) = connect(addr).await;
    read_line(&mut reader).await;

    send(&mut writer, "CAPABILITIES").await;
    assert_eq!(read_line(&mut reader).await, "101 Capability list:");
    assert_eq!(read_line(&mut reader).await, "VERSION 2");
    let mut saw_post = false;
    loop {
        let line = read_line(&mut reader).await;
        if line == "." {
            break;
        }
        if line == "POST" {
            saw_post = true;
        }
    }
    assert!(saw_post);
}
