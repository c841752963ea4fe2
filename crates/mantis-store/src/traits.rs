use async_trait::async_trait;

use crate::error::StoreError;
use mantis_model::{
    CorrectiveTask, InventoryItem, Notification, NotificationStatus, NotificationType,
    PreventiveTask, RecordId, RelatedRecord,
};

pub(crate) const PREVENTIVE: &str = "preventive";
pub(crate) const CORRECTIVE: &str = "corrective";
pub(crate) const INVENTORY: &str = "inventory";
pub(crate) const NOTIFICATIONS: &str = "notifications";

/// Field-match filter for notification listings. All present fields must
/// match; `recipient` matches membership in the recipients list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    pub status: Option<NotificationStatus>,
    pub kind: Option<NotificationType>,
    pub recipient: Option<String>,
    pub related: Option<RelatedRecord>,
}

impl NotificationFilter {
    #[must_use]
    pub fn unread_for(user_id: &str) -> Self {
        Self {
            status: Some(NotificationStatus::Unread),
            recipient: Some(user_id.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn related(related: RelatedRecord) -> Self {
        Self {
            related: Some(related),
            ..Self::default()
        }
    }

    pub(crate) fn matches(&self, n: &Notification) -> bool {
        if let Some(status) = self.status {
            if n.status != status {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if n.kind != kind {
                return false;
            }
        }
        if let Some(recipient) = &self.recipient {
            if !n.recipients.iter().any(|r| r == recipient) {
                return false;
            }
        }
        if let Some(related) = self.related {
            if n.related_to != Some(related) {
                return false;
            }
        }
        true
    }
}

/// The document store facade.
///
/// Updates are full-document replacements keyed by id; there is no
/// cross-document transaction, and callers sequence multi-document writes
/// themselves. Implementations must be `Send + Sync + 'static` to live in
/// axum application state.
///
/// Orderings are part of the contract:
/// - preventive: `next_maintenance` ascending
/// - corrective: `priority` descending, then `start_date` descending
/// - corrective-by-equipment: `start_date` descending
/// - inventory: `part_number` ascending; reorder listing: `current_stock`
///   ascending
/// - notifications: `created_at` descending
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    // preventive tasks

    /// Rejects a duplicate `work_order` with `StoreError::Duplicate`.
    async fn insert_preventive(&self, task: PreventiveTask) -> Result<(), StoreError>;
    async fn get_preventive(&self, id: RecordId) -> Result<PreventiveTask, StoreError>;
    async fn update_preventive(&self, task: PreventiveTask) -> Result<(), StoreError>;
    async fn delete_preventive(&self, id: RecordId) -> Result<(), StoreError>;
    async fn list_preventive(&self) -> Result<Vec<PreventiveTask>, StoreError>;

    // corrective tasks

    async fn insert_corrective(&self, task: CorrectiveTask) -> Result<(), StoreError>;
    async fn get_corrective(&self, id: RecordId) -> Result<CorrectiveTask, StoreError>;
    async fn update_corrective(&self, task: CorrectiveTask) -> Result<(), StoreError>;
    async fn list_corrective(&self) -> Result<Vec<CorrectiveTask>, StoreError>;
    async fn list_corrective_by_equipment(
        &self,
        equipment: &str,
    ) -> Result<Vec<CorrectiveTask>, StoreError>;

    // inventory items

    /// Rejects a duplicate `part_number` with `StoreError::Duplicate`.
    async fn insert_inventory(&self, item: InventoryItem) -> Result<(), StoreError>;
    async fn get_inventory(&self, id: RecordId) -> Result<InventoryItem, StoreError>;
    async fn update_inventory(&self, item: InventoryItem) -> Result<(), StoreError>;
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, StoreError>;
    /// Items with `current_stock <= reorder_point`.
    async fn list_inventory_reorder(&self) -> Result<Vec<InventoryItem>, StoreError>;
    /// Exact `category` match, case-insensitive `name` substring match.
    async fn search_inventory(
        &self,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<InventoryItem>, StoreError>;

    // notifications

    async fn insert_notification(&self, notification: Notification) -> Result<(), StoreError>;
    async fn get_notification(&self, id: RecordId) -> Result<Notification, StoreError>;
    async fn update_notification(&self, notification: Notification) -> Result<(), StoreError>;
    /// Filtered listing, newest first. `limit: None` returns everything.
    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Notification>, StoreError>;

    /// Explicit teardown; the handle must not be used afterwards.
    async fn close(&self) -> Result<(), StoreError>;
}
