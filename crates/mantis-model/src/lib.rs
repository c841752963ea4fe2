#![forbid(unsafe_code)]
//! Mantis entity model SSOT.
//!
//! Wire contract: struct fields serialize camelCase, enum values kebab-case,
//! matching the mobile client's JSON. Entities carry server-managed `id`,
//! `createdAt`, and `updatedAt` fields; input types (`New*`) and patch types
//! (`*Patch`) carry only client-settable fields.

mod corrective;
mod ids;
mod inventory;
mod notification;
mod preventive;
mod validate;

pub use corrective::{
    CorrectiveAction, CorrectivePriority, CorrectiveStatus, CorrectiveTask, CorrectiveTaskPatch,
    CostBreakdown, NewCorrectiveTask, PartUsage,
};
pub use ids::RecordId;
pub use inventory::{
    derive_status, AlertStatus, InventoryItem, InventoryItemPatch, NewInventoryItem, StockAlert,
    StockStatus, StorageLocation, Supplier,
};
pub use notification::{
    ActionType, NewNotification, Notification, NotificationPriority, NotificationStatus,
    NotificationType, ReadReceipt, RecordKind, RelatedRecord,
};
pub use preventive::{
    FrequencyUnit, NewPreventiveTask, PreventiveStatus, PreventiveTask, PreventiveTaskPatch,
};
pub use validate::ValidationError;

pub const CRATE_NAME: &str = "mantis-model";
