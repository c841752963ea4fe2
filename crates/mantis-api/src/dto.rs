// SPDX-License-Identifier: Apache-2.0

use mantis_model::{InventoryItem, Notification, PreventiveTask};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Preventive control board: status counts plus the pending tasks due within
/// the next seven days, soonest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreventiveDashboard {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub upcoming_tasks: Vec<PreventiveTask>,
}

/// Corrective aggregate counters. Map keys are the wire enum values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectiveStats {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_priority: BTreeMap<String, u64>,
    pub average_downtime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSummary {
    pub unread: u64,
    /// Unread notifications at `urgent` priority.
    pub urgent: u64,
    pub by_type: BTreeMap<String, u64>,
}

/// An inventory item joined with its related notifications, newest first.
/// The join is explicit at read time; the stored reference stays weak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryHistory {
    pub item: InventoryItem,
    pub alerts: Vec<Notification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReadOutcome {
    pub updated: u64,
}
