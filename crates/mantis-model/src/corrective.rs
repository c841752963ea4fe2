// SPDX-License-Identifier: Apache-2.0

use crate::ids::RecordId;
use crate::validate::{require_text, require_text_opt, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fault severity. `Ord` follows semantic rank (`low < medium < high <
/// critical`); corrective listings sort descending on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrectivePriority {
    Low,
    Medium,
    High,
    Critical,
}

impl CorrectivePriority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrectiveStatus {
    Reported,
    Diagnosed,
    InRepair,
    Completed,
}

impl CorrectiveStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::Diagnosed => "diagnosed",
            Self::InRepair => "in-repair",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectiveAction {
    pub action: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub performed_by: Option<String>,
}

/// Reference to an inventory part consumed by a repair. Recording one on
/// update decrements the referenced item's stock by `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartUsage {
    pub part_id: RecordId,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    #[serde(default)]
    pub labor: Option<f64>,
    #[serde(default)]
    pub parts: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
}

/// A corrective maintenance record, opened by a fault report.
///
/// `completion_date` is set only when the caller supplies it; patching status
/// to `completed` does not populate it automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectiveTask {
    pub id: RecordId,
    pub equipment: String,
    pub component: String,
    pub failure_description: String,
    pub diagnosis: Option<String>,
    pub corrective_actions: Vec<CorrectiveAction>,
    pub priority: CorrectivePriority,
    pub status: CorrectiveStatus,
    pub start_date: DateTime<Utc>,
    pub completion_date: Option<DateTime<Utc>>,
    pub parts_used: Vec<PartUsage>,
    pub downtime: f64,
    pub cost: Option<CostBreakdown>,
    pub technician: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCorrectiveTask {
    pub equipment: String,
    pub component: String,
    pub failure_description: String,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub corrective_actions: Vec<CorrectiveAction>,
    #[serde(default)]
    pub priority: Option<CorrectivePriority>,
    #[serde(default)]
    pub status: Option<CorrectiveStatus>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub parts_used: Vec<PartUsage>,
    #[serde(default)]
    pub downtime: Option<f64>,
    #[serde(default)]
    pub cost: Option<CostBreakdown>,
    #[serde(default)]
    pub technician: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewCorrectiveTask {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("equipment", &self.equipment)?;
        require_text("component", &self.component)?;
        require_text("failureDescription", &self.failure_description)?;
        Ok(())
    }

    #[must_use]
    pub fn into_task(self, id: RecordId, now: DateTime<Utc>) -> CorrectiveTask {
        CorrectiveTask {
            id,
            equipment: self.equipment,
            component: self.component,
            failure_description: self.failure_description,
            diagnosis: self.diagnosis,
            corrective_actions: self.corrective_actions,
            priority: self.priority.unwrap_or(CorrectivePriority::Medium),
            status: self.status.unwrap_or(CorrectiveStatus::Reported),
            start_date: self.start_date.unwrap_or(now),
            completion_date: self.completion_date,
            parts_used: self.parts_used,
            downtime: self.downtime.unwrap_or(0.0),
            cost: self.cost,
            technician: self.technician,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. A `parts_used` value replaces the stored list; the server
/// decrements the referenced inventory stock for each entry before saving.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CorrectiveTaskPatch {
    pub equipment: Option<String>,
    pub component: Option<String>,
    pub failure_description: Option<String>,
    pub diagnosis: Option<String>,
    pub corrective_actions: Option<Vec<CorrectiveAction>>,
    pub priority: Option<CorrectivePriority>,
    pub status: Option<CorrectiveStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub parts_used: Option<Vec<PartUsage>>,
    pub downtime: Option<f64>,
    pub cost: Option<CostBreakdown>,
    pub technician: Option<String>,
    pub notes: Option<String>,
}

impl CorrectiveTaskPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text_opt("equipment", self.equipment.as_deref())?;
        require_text_opt("component", self.component.as_deref())?;
        require_text_opt("failureDescription", self.failure_description.as_deref())?;
        Ok(())
    }

    pub fn apply(&self, task: &mut CorrectiveTask, now: DateTime<Utc>) {
        if let Some(v) = &self.equipment {
            task.equipment = v.clone();
        }
        if let Some(v) = &self.component {
            task.component = v.clone();
        }
        if let Some(v) = &self.failure_description {
            task.failure_description = v.clone();
        }
        if let Some(v) = &self.diagnosis {
            task.diagnosis = Some(v.clone());
        }
        if let Some(v) = &self.corrective_actions {
            task.corrective_actions = v.clone();
        }
        if let Some(v) = self.priority {
            task.priority = v;
        }
        if let Some(v) = self.status {
            task.status = v;
        }
        if let Some(v) = self.start_date {
            task.start_date = v;
        }
        if let Some(v) = self.completion_date {
            task.completion_date = Some(v);
        }
        if let Some(v) = &self.parts_used {
            task.parts_used = v.clone();
        }
        if let Some(v) = self.downtime {
            task.downtime = v;
        }
        if let Some(v) = &self.cost {
            task.cost = Some(v.clone());
        }
        if let Some(v) = &self.technician {
            task.technician = Some(v.clone());
        }
        if let Some(v) = &self.notes {
            task.notes = Some(v.clone());
        }
        task.updated_at = now;
    }
}
