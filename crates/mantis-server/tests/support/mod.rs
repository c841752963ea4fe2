// SPDX-License-Identifier: Apache-2.0
//! Raw-HTTP harness: spawn the router on an ephemeral port and drive it over
//! a plain TCP stream, one request per connection.
#![allow(dead_code)]

use mantis_server::{build_router, AppState};
use mantis_store::MemoryStore;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub async fn spawn_server() -> SocketAddr {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    let app = build_router(state);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });
    addr
}

pub async fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<&Value>,
) -> (u16, Value) {
    let payload = body.map(Value::to_string).unwrap_or_default();
    let mut stream = TcpStream::connect(addr).await.expect("connect server");
    let raw = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );
    stream.write_all(raw.as_bytes()).await.expect("write request");

    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");

    let status = response
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status code");
    let body_raw = response
        .split_once("\r\n\r\n")
        .map(|(_, b)| b.trim())
        .unwrap_or("");
    let body = if body_raw.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body_raw).expect("json body")
    };
    (status, body)
}

pub async fn get(addr: SocketAddr, path: &str) -> (u16, Value) {
    request(addr, "GET", path, None).await
}

pub async fn post(addr: SocketAddr, path: &str, body: &Value) -> (u16, Value) {
    request(addr, "POST", path, Some(body)).await
}

pub async fn patch(addr: SocketAddr, path: &str, body: &Value) -> (u16, Value) {
    request(addr, "PATCH", path, Some(body)).await
}
