//! The notification side-effect engine.
//!
//! Write paths call [`dispatch`] after the triggering persist; a failed
//! insert surfaces to the caller but never rolls the triggering write back.

use chrono::{DateTime, Utc};
use mantis_model::{
    derive_status, ActionType, CorrectiveTask, InventoryItem, Notification, NotificationPriority,
    NotificationStatus, NotificationType, PartUsage, PreventiveTask, RecordId, RecordKind,
    RelatedRecord,
};
use mantis_store::{DocumentStore, StoreError};
use tracing::{info, warn};

pub(crate) const MAINTENANCE_TEAM: &str = "maintenance-team";
pub(crate) const SUPERVISOR: &str = "supervisor";
pub(crate) const MAINTENANCE_SUPERVISOR: &str = "maintenance-supervisor";
pub(crate) const OPERATIONS_MANAGER: &str = "operations-manager";
pub(crate) const INVENTORY_MANAGER: &str = "inventory-manager";
pub(crate) const PURCHASING: &str = "purchasing";

#[derive(Debug, Clone, Copy)]
pub(crate) enum NotifyEvent<'a> {
    PreventiveCreated(&'a PreventiveTask),
    PreventiveCompleted(&'a PreventiveTask),
    CorrectiveReported(&'a CorrectiveTask),
    CorrectiveCompleted(&'a CorrectiveTask),
    ReorderReached(&'a InventoryItem),
    MinimumStockReached(&'a InventoryItem),
}

/// The event-to-notification table. `action_required` is exactly "an action
/// type is set"; every notification starts unread with an empty read trail.
pub(crate) fn build_notification(
    event: &NotifyEvent<'_>,
    id: RecordId,
    now: DateTime<Utc>,
) -> Notification {
    let (kind, title, message, priority, recipients, related, action): (
        NotificationType,
        &str,
        String,
        NotificationPriority,
        &[&str],
        RelatedRecord,
        Option<ActionType>,
    ) = match event {
        NotifyEvent::PreventiveCreated(task) => (
            NotificationType::Preventive,
            "New maintenance task scheduled",
            format!("Maintenance has been scheduled for {}", task.equipment),
            NotificationPriority::Medium,
            &[MAINTENANCE_TEAM],
            RelatedRecord {
                model: RecordKind::Preventive,
                id: task.id,
            },
            None,
        ),
        NotifyEvent::PreventiveCompleted(task) => (
            NotificationType::Preventive,
            "Maintenance completed",
            format!("Maintenance for {} has been completed", task.equipment),
            NotificationPriority::Low,
            &[MAINTENANCE_SUPERVISOR],
            RelatedRecord {
                model: RecordKind::Preventive,
                id: task.id,
            },
            None,
        ),
        NotifyEvent::CorrectiveReported(task) => (
            NotificationType::Corrective,
            "New fault reported",
            format!(
                "A fault has been reported on {} - {}",
                task.equipment, task.component
            ),
            task.priority.into(),
            &[MAINTENANCE_TEAM, SUPERVISOR],
            RelatedRecord {
                model: RecordKind::Corrective,
                id: task.id,
            },
            Some(ActionType::Review),
        ),
        NotifyEvent::CorrectiveCompleted(task) => (
            NotificationType::Corrective,
            "Corrective maintenance completed",
            format!("The repair of {} has been completed", task.equipment),
            NotificationPriority::Medium,
            &[MAINTENANCE_SUPERVISOR, OPERATIONS_MANAGER],
            RelatedRecord {
                model: RecordKind::Corrective,
                id: task.id,
            },
            None,
        ),
        NotifyEvent::ReorderReached(item) => (
            NotificationType::Inventory,
            "Reorder point reached",
            format!("Part {} has reached its reorder point", item.name),
            NotificationPriority::High,
            &[INVENTORY_MANAGER, PURCHASING],
            RelatedRecord {
                model: RecordKind::Inventory,
                id: item.id,
            },
            Some(ActionType::Reorder),
        ),
        NotifyEvent::MinimumStockReached(item) => (
            NotificationType::Inventory,
            "Minimum stock reached",
            format!("Part {} has reached its minimum stock level", item.name),
            NotificationPriority::Urgent,
            &[INVENTORY_MANAGER, MAINTENANCE_SUPERVISOR],
            RelatedRecord {
                model: RecordKind::Inventory,
                id: item.id,
            },
            None,
        ),
    };

    Notification {
        id,
        kind,
        title: title.to_string(),
        message,
        priority,
        status: NotificationStatus::Unread,
        recipients: recipients.iter().map(|r| (*r).to_string()).collect(),
        related_to: Some(related),
        action_required: action.is_some(),
        action_type: action,
        due_date: None,
        read_by: Vec::new(),
        metadata: None,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) async fn dispatch(
    store: &dyn DocumentStore,
    event: NotifyEvent<'_>,
) -> Result<Notification, StoreError> {
    let notification = build_notification(&event, RecordId::generate(), Utc::now());
    store.insert_notification(notification.clone()).await?;
    info!(
        notification = %notification.id,
        kind = notification.kind.as_str(),
        priority = notification.priority.as_str(),
        "notification dispatched"
    );
    Ok(notification)
}

/// Threshold checks for a just-persisted inventory item. The two conditions
/// are evaluated independently and are not mutually exclusive: one update can
/// emit both events.
pub(crate) fn stock_events(item: &InventoryItem) -> Vec<NotifyEvent<'_>> {
    let mut events = Vec::new();
    if item.current_stock <= item.reorder_point {
        events.push(NotifyEvent::ReorderReached(item));
    }
    if item.current_stock <= item.minimum_stock {
        events.push(NotifyEvent::MinimumStockReached(item));
    }
    events
}

/// Decrements stock for each recorded part usage, persisting item by item.
/// Unknown part ids are skipped, stock has no floor at zero, and there is no
/// atomicity with the task save that follows: a failure partway leaves the
/// earlier decrements in place.
pub(crate) async fn consume_parts(
    store: &dyn DocumentStore,
    parts: &[PartUsage],
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    for part in parts {
        let mut item = match store.get_inventory(part.part_id).await {
            Ok(item) => item,
            Err(StoreError::NotFound { .. }) => {
                warn!(part = %part.part_id, "parts usage references unknown inventory item");
                continue;
            }
            Err(e) => return Err(e),
        };
        item.current_stock -= part.quantity;
        item.status = derive_status(item.current_stock, item.minimum_stock);
        item.updated_at = now;
        store.update_inventory(item).await?;
    }
    Ok(())
}
