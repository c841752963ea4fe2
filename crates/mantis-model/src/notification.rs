// SPDX-License-Identifier: Apache-2.0

use crate::corrective::CorrectivePriority;
use crate::ids::RecordId;
use crate::validate::{require_text, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    Preventive,
    Corrective,
    Inventory,
    System,
}

impl NotificationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preventive => "preventive",
            Self::Corrective => "corrective",
            Self::Inventory => "inventory",
            Self::System => "system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl NotificationPriority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// Fault priorities map one-to-one onto notification priorities, except
/// `critical`: the notification scale tops out at `urgent`.
impl From<CorrectivePriority> for NotificationPriority {
    fn from(value: CorrectivePriority) -> Self {
        match value {
            CorrectivePriority::Low => Self::Low,
            CorrectivePriority::Medium => Self::Medium,
            CorrectivePriority::High => Self::High,
            CorrectivePriority::Critical => Self::Urgent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationStatus {
    Unread,
    Read,
    Archived,
}

impl NotificationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    Review,
    Approve,
    Schedule,
    Reorder,
}

/// The entity kinds a notification may point back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Preventive,
    Corrective,
    Inventory,
}

impl RecordKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preventive => "preventive",
            Self::Corrective => "corrective",
            Self::Inventory => "inventory",
        }
    }
}

/// Weak reference to the triggering entity: used for lookup and display only,
/// never for cascade deletes or integrity enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedRecord {
    pub model: RecordKind,
    pub id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadReceipt {
    pub user_id: String,
    pub read_at: DateTime<Utc>,
}

/// Created as a side effect of writes to the other entities (or by explicit
/// POST); mutated only by read/archive/bulk-read; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub status: NotificationStatus,
    pub recipients: Vec<String>,
    pub related_to: Option<RelatedRecord>,
    pub action_required: bool,
    pub action_type: Option<ActionType>,
    pub due_date: Option<DateTime<Utc>>,
    pub read_by: Vec<ReadReceipt>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Marks read for `user_id`. Every call appends a receipt, including
    /// repeat calls by the same user: the audit trail does not deduplicate.
    pub fn mark_read(&mut self, user_id: &str, now: DateTime<Utc>) {
        self.status = NotificationStatus::Read;
        self.read_by.push(ReadReceipt {
            user_id: user_id.to_string(),
            read_at: now,
        });
        self.updated_at = now;
    }

    /// Archives unconditionally, whatever the current status.
    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.status = NotificationStatus::Archived;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub priority: Option<NotificationPriority>,
    #[serde(default)]
    pub status: Option<NotificationStatus>,
    pub recipients: Vec<String>,
    #[serde(default)]
    pub related_to: Option<RelatedRecord>,
    #[serde(default)]
    pub action_required: Option<bool>,
    #[serde(default)]
    pub action_type: Option<ActionType>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl NewNotification {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("message", &self.message)?;
        if self.recipients.is_empty() {
            return Err(ValidationError::EmptyRecipients);
        }
        Ok(())
    }

    #[must_use]
    pub fn into_notification(self, id: RecordId, now: DateTime<Utc>) -> Notification {
        Notification {
            id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            priority: self.priority.unwrap_or(NotificationPriority::Medium),
            status: self.status.unwrap_or(NotificationStatus::Unread),
            recipients: self.recipients,
            related_to: self.related_to,
            action_required: self.action_required.unwrap_or(false),
            action_type: self.action_type,
            due_date: self.due_date,
            read_by: Vec::new(),
            metadata: self.metadata,
            created_at: now,
            updated_at: now,
        }
    }
}
