// SPDX-License-Identifier: Apache-2.0

mod support;

use serde_json::json;
use support::{get, patch, post};

async fn create_item(addr: std::net::SocketAddr) -> (String, serde_json::Value) {
    let (status, item) = post(
        addr,
        "/api/inventory",
        &json!({
            "partNumber": "BRG-6204",
            "name": "Bearing 6204",
            "category": "bearings",
            "currentStock": 10,
            "minimumStock": 2,
            "reorderPoint": 5,
            "unitPrice": 4.5,
            "location": {"warehouse": "W1", "shelf": "S3", "bin": "B12"},
            "supplier": {"name": "SKF", "leadTime": 7}
        }),
    )
    .await;
    assert_eq!(status, 201);
    let id = item["id"].as_str().expect("item id").to_string();
    (id, item)
}

async fn related_notifications(
    addr: std::net::SocketAddr,
    item_id: &str,
) -> Vec<serde_json::Value> {
    let (_, notifications) = get(addr, "/api/notifications").await;
    notifications
        .as_array()
        .expect("notification array")
        .iter()
        .filter(|n| n["relatedTo"]["id"] == item_id)
        .cloned()
        .collect()
}

#[tokio::test]
async fn integration_threshold_crossings_fan_out() {
    let addr = support::spawn_server().await;
    let (id, item) = create_item(addr).await;
    assert_eq!(item["status"], "in-stock");

    // Creation itself is silent.
    assert!(related_notifications(addr, &id).await.is_empty());

    // Into the reorder band but above the minimum: exactly one notification.
    let (status, updated) = patch(
        addr,
        &format!("/api/inventory/{id}"),
        &json!({"currentStock": 4}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["status"], "in-stock");
    let related = related_notifications(addr, &id).await;
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["title"], "Reorder point reached");
    assert_eq!(related[0]["priority"], "high");
    assert_eq!(related[0]["actionRequired"], true);
    assert_eq!(related[0]["actionType"], "reorder");
    assert_eq!(
        related[0]["recipients"],
        json!(["inventory-manager", "purchasing"])
    );

    // At or below the minimum: both thresholds fire from one update.
    let (status, updated) = patch(
        addr,
        &format!("/api/inventory/{id}"),
        &json!({"currentStock": 1}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["status"], "low-stock");
    let related = related_notifications(addr, &id).await;
    assert_eq!(related.len(), 3);
    let minimum = related
        .iter()
        .find(|n| n["title"] == "Minimum stock reached")
        .expect("minimum stock notification");
    assert_eq!(minimum["priority"], "urgent");
    assert_eq!(minimum["actionRequired"], false);
    assert_eq!(
        minimum["recipients"],
        json!(["inventory-manager", "maintenance-supervisor"])
    );
}

#[tokio::test]
async fn integration_explicit_status_assignment_wins() {
    let addr = support::spawn_server().await;
    let (id, _) = create_item(addr).await;

    let (status, updated) = patch(
        addr,
        &format!("/api/inventory/{id}"),
        &json!({"status": "ordered"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["status"], "ordered");

    // The next stock write recomputes from the counters again.
    let (_, updated) = patch(
        addr,
        &format!("/api/inventory/{id}"),
        &json!({"currentStock": 9}),
    )
    .await;
    assert_eq!(updated["status"], "in-stock");
}

#[tokio::test]
async fn integration_duplicate_part_number_is_rejected() {
    let addr = support::spawn_server().await;
    let (_, _) = create_item(addr).await;

    let (status, body) = post(
        addr,
        "/api/inventory",
        &json!({
            "partNumber": "BRG-6204",
            "name": "Bearing 6204 spare",
            "category": "bearings",
            "currentStock": 1,
            "minimumStock": 0,
            "reorderPoint": 1,
            "unitPrice": 4.5
        }),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("duplicate partNumber"));
}

#[tokio::test]
async fn integration_search_and_reorder_listings() {
    let addr = support::spawn_server().await;
    for (part, name, category, stock) in [
        ("BRG-1", "Bearing small", "bearings", 1),
        ("BRG-2", "Bearing large", "bearings", 9),
        ("SEAL-1", "Shaft seal", "seals", 3),
    ] {
        let (status, _) = post(
            addr,
            "/api/inventory",
            &json!({
                "partNumber": part,
                "name": name,
                "category": category,
                "currentStock": stock,
                "minimumStock": 1,
                "reorderPoint": 4,
                "unitPrice": 2.0
            }),
        )
        .await;
        assert_eq!(status, 201);
    }

    let (status, found) = get(addr, "/api/inventory/search?category=bearings").await;
    assert_eq!(status, 200);
    assert_eq!(found.as_array().expect("array").len(), 2);

    let (_, found) = get(addr, "/api/inventory/search?name=SEAL").await;
    assert_eq!(found.as_array().expect("array").len(), 1);
    assert_eq!(found[0]["partNumber"], "SEAL-1");

    // Stock at or under the reorder point, lowest first.
    let (status, reorder) = get(addr, "/api/inventory/reorder").await;
    assert_eq!(status, 200);
    let parts: Vec<_> = reorder
        .as_array()
        .expect("array")
        .iter()
        .map(|i| i["partNumber"].as_str().expect("part"))
        .collect();
    assert_eq!(parts, ["BRG-1", "SEAL-1"]);
}

#[tokio::test]
async fn integration_history_joins_related_notifications() {
    let addr = support::spawn_server().await;
    let (id, _) = create_item(addr).await;

    let (_, _) = patch(
        addr,
        &format!("/api/inventory/{id}"),
        &json!({"currentStock": 0}),
    )
    .await;

    let (status, history) = get(addr, &format!("/api/inventory/{id}/history")).await;
    assert_eq!(status, 200);
    assert_eq!(history["item"]["id"], id.as_str());
    let alerts = history["alerts"].as_array().expect("alerts");
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a["type"] == "inventory"));
}

#[tokio::test]
async fn integration_unknown_and_malformed_ids() {
    let addr = support::spawn_server().await;

    let ghost = "00000000-0000-4000-8000-000000000000";
    let (status, _) = get(addr, &format!("/api/inventory/{ghost}")).await;
    assert_eq!(status, 404);

    let (status, _) = get(addr, "/api/inventory/not-a-uuid").await;
    assert_eq!(status, 400);

    let (status, body) = post(
        addr,
        "/api/inventory",
        &json!({
            "partNumber": "NEG-1",
            "name": "Negative",
            "category": "misc",
            "currentStock": -2,
            "minimumStock": 0,
            "reorderPoint": 1,
            "unitPrice": 1.0
        }),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["message"].as_str().expect("message").contains(">= 0"));
}
