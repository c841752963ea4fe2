// SPDX-License-Identifier: Apache-2.0

mod support;

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use support::{get, patch, post};

async fn create_notification(addr: SocketAddr, title: &str, recipient: &str) -> Value {
    let (status, created) = post(
        addr,
        "/api/notifications",
        &json!({
            "type": "system",
            "title": title,
            "message": "scheduled downtime",
            "recipients": [recipient]
        }),
    )
    .await;
    assert_eq!(status, 201);
    created
}

#[tokio::test]
async fn integration_read_trail_does_not_deduplicate() {
    let addr = support::spawn_server().await;
    let created = create_notification(addr, "window", "ops").await;
    let id = created["id"].as_str().expect("id");

    let (status, read) = patch(
        addr,
        &format!("/api/notifications/{id}/read"),
        &json!({"userId": "ops"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(read["status"], "read");
    assert_eq!(read["readBy"].as_array().expect("readBy").len(), 1);

    // Marking read again appends a second receipt for the same user; the
    // audit trail records every call rather than deduplicating.
    let (status, read) = patch(
        addr,
        &format!("/api/notifications/{id}/read"),
        &json!({"userId": "ops"}),
    )
    .await;
    assert_eq!(status, 200);
    let trail = read["readBy"].as_array().expect("readBy");
    assert_eq!(trail.len(), 2);
    assert!(trail.iter().all(|r| r["userId"] == "ops"));
}

#[tokio::test]
async fn integration_archive_is_unconditional() {
    let addr = support::spawn_server().await;
    let created = create_notification(addr, "window", "ops").await;
    let id = created["id"].as_str().expect("id");

    // Straight from unread, no read step required.
    let (status, archived) = patch(
        addr,
        &format!("/api/notifications/{id}/archive"),
        &json!({}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(archived["status"], "archived");
}

#[tokio::test]
async fn integration_unread_listing_is_per_recipient() {
    let addr = support::spawn_server().await;
    let for_ops = create_notification(addr, "a", "ops").await;
    let _for_other = create_notification(addr, "b", "purchasing").await;
    let read_one = create_notification(addr, "c", "ops").await;

    let read_id = read_one["id"].as_str().expect("id");
    let (_, _) = patch(
        addr,
        &format!("/api/notifications/{read_id}/read"),
        &json!({"userId": "ops"}),
    )
    .await;

    let (status, unread) = get(addr, "/api/notifications/unread/ops").await;
    assert_eq!(status, 200);
    let unread = unread.as_array().expect("array");
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0]["id"], for_ops["id"]);
}

#[tokio::test]
async fn integration_summary_counts() {
    let addr = support::spawn_server().await;

    create_notification(addr, "a", "ops").await;
    let (status, urgent) = post(
        addr,
        "/api/notifications",
        &json!({
            "type": "inventory",
            "title": "stockout",
            "message": "part missing",
            "priority": "urgent",
            "recipients": ["inventory-manager"]
        }),
    )
    .await;
    assert_eq!(status, 201);
    let read_me = create_notification(addr, "b", "ops").await;
    let read_id = read_me["id"].as_str().expect("id");
    let (_, _) = patch(
        addr,
        &format!("/api/notifications/{read_id}/read"),
        &json!({"userId": "ops"}),
    )
    .await;
    assert_eq!(urgent["priority"], "urgent");

    let (status, summary) = get(addr, "/api/notifications/summary").await;
    assert_eq!(status, 200);
    assert_eq!(summary["unread"], 2);
    assert_eq!(summary["urgent"], 1);
    assert_eq!(summary["byType"]["system"], 2);
    assert_eq!(summary["byType"]["inventory"], 1);
}

#[tokio::test]
async fn integration_bulk_read_reports_matched_count() {
    let addr = support::spawn_server().await;
    let a = create_notification(addr, "a", "ops").await;
    let b = create_notification(addr, "b", "ops").await;
    let _untouched = create_notification(addr, "c", "ops").await;

    let ghost = "00000000-0000-4000-8000-000000000000";
    let (status, outcome) = post(
        addr,
        "/api/notifications/bulk-read",
        &json!({
            "notificationIds": [a["id"], b["id"], ghost],
            "userId": "ops"
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(outcome["updated"], 2);

    let (_, unread) = get(addr, "/api/notifications/unread/ops").await;
    assert_eq!(unread.as_array().expect("array").len(), 1);

    // Malformed ids fail the whole request up front.
    let (status, _) = post(
        addr,
        "/api/notifications/bulk-read",
        &json!({"notificationIds": ["nope"], "userId": "ops"}),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn integration_listing_filters_and_limit() {
    let addr = support::spawn_server().await;

    for title in ["first", "second", "third"] {
        create_notification(addr, title, "ops").await;
        // Distinct creation instants keep the newest-first order deterministic.
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, limited) = get(addr, "/api/notifications?limit=2").await;
    assert_eq!(status, 200);
    let limited = limited.as_array().expect("array");
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0]["title"], "third");
    assert_eq!(limited[1]["title"], "second");

    let (status, filtered) = get(addr, "/api/notifications?recipient=ops&status=unread").await;
    assert_eq!(status, 200);
    assert_eq!(filtered.as_array().expect("array").len(), 3);

    let (status, _) = get(addr, "/api/notifications?status=seen").await;
    assert_eq!(status, 400);

    let (status, _) = get(addr, "/api/notifications?limit=0").await;
    assert_eq!(status, 400);
}
