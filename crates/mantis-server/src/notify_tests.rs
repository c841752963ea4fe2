use crate::notify::{
    build_notification, consume_parts, dispatch, stock_events, NotifyEvent, INVENTORY_MANAGER,
    MAINTENANCE_SUPERVISOR, MAINTENANCE_TEAM, OPERATIONS_MANAGER, PURCHASING, SUPERVISOR,
};
use chrono::Utc;
use mantis_model::{
    ActionType, CorrectivePriority, CorrectiveStatus, CorrectiveTask, InventoryItem,
    NotificationPriority, NotificationStatus, NotificationType, PartUsage, PreventiveStatus,
    PreventiveTask, RecordId, RecordKind, StockStatus,
};
use mantis_store::{DocumentStore, MemoryStore, NotificationFilter};

fn sample_preventive() -> PreventiveTask {
    let now = Utc::now();
    PreventiveTask {
        id: RecordId::generate(),
        equipment: "Conveyor-3".to_string(),
        task_description: "Grease the drive chain".to_string(),
        frequency: 250.0,
        frequency_unit: mantis_model::FrequencyUnit::Hours,
        last_maintenance: now,
        next_maintenance: now,
        current_usage: 0.0,
        status: PreventiveStatus::Pending,
        work_order: format!("PM-{}", now.timestamp_millis()),
        assigned_to: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn sample_corrective(priority: CorrectivePriority) -> CorrectiveTask {
    let now = Utc::now();
    CorrectiveTask {
        id: RecordId::generate(),
        equipment: "Pump-1".to_string(),
        component: "Seal".to_string(),
        failure_description: "Leak".to_string(),
        diagnosis: None,
        corrective_actions: Vec::new(),
        priority,
        status: CorrectiveStatus::Reported,
        start_date: now,
        completion_date: None,
        parts_used: Vec::new(),
        downtime: 0.0,
        cost: None,
        technician: None,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn sample_item(current_stock: i64, minimum_stock: i64, reorder_point: i64) -> InventoryItem {
    let now = Utc::now();
    InventoryItem {
        id: RecordId::generate(),
        part_number: "SKF-6204".to_string(),
        name: "Bearing 6204".to_string(),
        description: None,
        category: "bearings".to_string(),
        manufacturer: None,
        current_stock,
        minimum_stock,
        reorder_point,
        unit_price: 4.5,
        location: None,
        compatible_equipment: Vec::new(),
        supplier: None,
        last_restock_date: None,
        status: mantis_model::derive_status(current_stock, minimum_stock),
        alerts: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn corrective_reported_mirrors_task_priority() {
    let task = sample_corrective(CorrectivePriority::High);
    let n = build_notification(
        &NotifyEvent::CorrectiveReported(&task),
        RecordId::generate(),
        Utc::now(),
    );
    assert_eq!(n.kind, NotificationType::Corrective);
    assert_eq!(n.priority, NotificationPriority::High);
    assert!(n.action_required);
    assert_eq!(n.action_type, Some(ActionType::Review));
    assert_eq!(n.recipients, vec![MAINTENANCE_TEAM, SUPERVISOR]);
    assert_eq!(n.status, NotificationStatus::Unread);
    let related = n.related_to.expect("related record");
    assert_eq!(related.model, RecordKind::Corrective);
    assert_eq!(related.id, task.id);
}

#[test]
fn critical_fault_priority_caps_at_urgent() {
    let task = sample_corrective(CorrectivePriority::Critical);
    let n = build_notification(
        &NotifyEvent::CorrectiveReported(&task),
        RecordId::generate(),
        Utc::now(),
    );
    assert_eq!(n.priority, NotificationPriority::Urgent);
}

#[test]
fn corrective_completed_is_medium_with_no_action() {
    let task = sample_corrective(CorrectivePriority::Critical);
    let n = build_notification(
        &NotifyEvent::CorrectiveCompleted(&task),
        RecordId::generate(),
        Utc::now(),
    );
    assert_eq!(n.priority, NotificationPriority::Medium);
    assert!(!n.action_required);
    assert_eq!(n.action_type, None);
    assert_eq!(n.recipients, vec![MAINTENANCE_SUPERVISOR, OPERATIONS_MANAGER]);
}

#[test]
fn preventive_events_map_to_team_and_supervisor() {
    let task = sample_preventive();
    let created = build_notification(
        &NotifyEvent::PreventiveCreated(&task),
        RecordId::generate(),
        Utc::now(),
    );
    assert_eq!(created.kind, NotificationType::Preventive);
    assert_eq!(created.priority, NotificationPriority::Medium);
    assert_eq!(created.recipients, vec![MAINTENANCE_TEAM]);
    assert!(!created.action_required);

    let completed = build_notification(
        &NotifyEvent::PreventiveCompleted(&task),
        RecordId::generate(),
        Utc::now(),
    );
    assert_eq!(completed.priority, NotificationPriority::Low);
    assert_eq!(completed.recipients, vec![MAINTENANCE_SUPERVISOR]);
}

#[test]
fn inventory_events_carry_reorder_and_minimum_semantics() {
    let item = sample_item(1, 2, 5);
    let reorder = build_notification(
        &NotifyEvent::ReorderReached(&item),
        RecordId::generate(),
        Utc::now(),
    );
    assert_eq!(reorder.kind, NotificationType::Inventory);
    assert_eq!(reorder.priority, NotificationPriority::High);
    assert_eq!(reorder.action_type, Some(ActionType::Reorder));
    assert_eq!(reorder.recipients, vec![INVENTORY_MANAGER, PURCHASING]);

    let minimum = build_notification(
        &NotifyEvent::MinimumStockReached(&item),
        RecordId::generate(),
        Utc::now(),
    );
    assert_eq!(minimum.priority, NotificationPriority::Urgent);
    assert!(!minimum.action_required);
    assert_eq!(minimum.recipients, vec![INVENTORY_MANAGER, MAINTENANCE_SUPERVISOR]);
}

#[test]
fn stock_events_fire_independently() {
    // Above both thresholds: silent.
    assert!(stock_events(&sample_item(6, 2, 5)).is_empty());

    // Inside the reorder band only.
    let item = sample_item(4, 2, 5);
    let events = stock_events(&item);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], NotifyEvent::ReorderReached(_)));

    // At the minimum: both fire from one update.
    let item = sample_item(2, 2, 5);
    let events = stock_events(&item);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], NotifyEvent::ReorderReached(_)));
    assert!(matches!(events[1], NotifyEvent::MinimumStockReached(_)));
}

#[tokio::test]
async fn dispatch_inserts_exactly_one_document() {
    let store = MemoryStore::new();
    let task = sample_corrective(CorrectivePriority::Medium);
    dispatch(&store, NotifyEvent::CorrectiveReported(&task))
        .await
        .expect("dispatch");

    let all = store
        .list_notifications(&NotificationFilter::default(), None)
        .await
        .expect("list notifications");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].related_to.expect("related").id, task.id);
}

#[tokio::test]
async fn consume_parts_decrements_without_floor() {
    let store = MemoryStore::new();
    let item = sample_item(3, 1, 5);
    let id = item.id;
    store.insert_inventory(item).await.expect("insert item");

    let parts = vec![PartUsage {
        part_id: id,
        quantity: 5,
    }];
    consume_parts(&store, &parts, Utc::now())
        .await
        .expect("consume parts");

    let stored = store.get_inventory(id).await.expect("get item");
    assert_eq!(stored.current_stock, -2);
    assert_eq!(stored.status, StockStatus::LowStock);
}

#[tokio::test]
async fn consume_parts_recomputes_status_on_save() {
    let store = MemoryStore::new();
    let item = sample_item(10, 2, 5);
    let id = item.id;
    store.insert_inventory(item).await.expect("insert item");

    consume_parts(
        &store,
        &[PartUsage {
            part_id: id,
            quantity: 3,
        }],
        Utc::now(),
    )
    .await
    .expect("consume parts");

    let stored = store.get_inventory(id).await.expect("get item");
    assert_eq!(stored.current_stock, 7);
    assert_eq!(stored.status, StockStatus::InStock);
}

#[tokio::test]
async fn consume_parts_skips_unknown_part_ids() {
    let store = MemoryStore::new();
    let known = sample_item(4, 1, 5);
    let known_id = known.id;
    store.insert_inventory(known).await.expect("insert item");

    let parts = vec![
        PartUsage {
            part_id: RecordId::generate(),
            quantity: 2,
        },
        PartUsage {
            part_id: known_id,
            quantity: 1,
        },
    ];
    consume_parts(&store, &parts, Utc::now())
        .await
        .expect("unknown part id must not fail the batch");

    let stored = store.get_inventory(known_id).await.expect("get item");
    assert_eq!(stored.current_stock, 3);
}
