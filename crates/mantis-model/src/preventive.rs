// SPDX-License-Identifier: Apache-2.0

use crate::ids::RecordId;
use crate::validate::{require_text, require_text_opt, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrequencyUnit {
    Hours,
    Kilometers,
}

impl FrequencyUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Kilometers => "kilometers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreventiveStatus {
    Pending,
    InProgress,
    Completed,
}

impl PreventiveStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// A scheduled preventive maintenance task. `work_order` is server-populated
/// at creation (`PM-<unix millis>`) and unique across the collection.
///
/// Status carries no transition guard: callers may reassign it arbitrarily,
/// and `next_maintenance >= last_maintenance` is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreventiveTask {
    pub id: RecordId,
    pub equipment: String,
    pub task_description: String,
    pub frequency: f64,
    pub frequency_unit: FrequencyUnit,
    pub last_maintenance: DateTime<Utc>,
    pub next_maintenance: DateTime<Utc>,
    pub current_usage: f64,
    pub status: PreventiveStatus,
    pub work_order: String,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPreventiveTask {
    pub equipment: String,
    pub task_description: String,
    pub frequency: f64,
    pub frequency_unit: FrequencyUnit,
    #[serde(default)]
    pub last_maintenance: Option<DateTime<Utc>>,
    pub next_maintenance: DateTime<Utc>,
    #[serde(default)]
    pub current_usage: Option<f64>,
    #[serde(default)]
    pub status: Option<PreventiveStatus>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewPreventiveTask {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("equipment", &self.equipment)?;
        require_text("taskDescription", &self.task_description)?;
        Ok(())
    }

    #[must_use]
    pub fn into_task(self, id: RecordId, work_order: String, now: DateTime<Utc>) -> PreventiveTask {
        PreventiveTask {
            id,
            equipment: self.equipment,
            task_description: self.task_description,
            frequency: self.frequency,
            frequency_unit: self.frequency_unit,
            last_maintenance: self.last_maintenance.unwrap_or(now),
            next_maintenance: self.next_maintenance,
            current_usage: self.current_usage.unwrap_or(0.0),
            status: self.status.unwrap_or(PreventiveStatus::Pending),
            work_order,
            assigned_to: self.assigned_to,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Only fields present in the request body are validated and
/// applied; everything else keeps its stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreventiveTaskPatch {
    pub equipment: Option<String>,
    pub task_description: Option<String>,
    pub frequency: Option<f64>,
    pub frequency_unit: Option<FrequencyUnit>,
    pub last_maintenance: Option<DateTime<Utc>>,
    pub next_maintenance: Option<DateTime<Utc>>,
    pub current_usage: Option<f64>,
    pub status: Option<PreventiveStatus>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
}

impl PreventiveTaskPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text_opt("equipment", self.equipment.as_deref())?;
        require_text_opt("taskDescription", self.task_description.as_deref())?;
        Ok(())
    }

    pub fn apply(&self, task: &mut PreventiveTask, now: DateTime<Utc>) {
        if let Some(v) = &self.equipment {
            task.equipment = v.clone();
        }
        if let Some(v) = &self.task_description {
            task.task_description = v.clone();
        }
        if let Some(v) = self.frequency {
            task.frequency = v;
        }
        if let Some(v) = self.frequency_unit {
            task.frequency_unit = v;
        }
        if let Some(v) = self.last_maintenance {
            task.last_maintenance = v;
        }
        if let Some(v) = self.next_maintenance {
            task.next_maintenance = v;
        }
        if let Some(v) = self.current_usage {
            task.current_usage = v;
        }
        if let Some(v) = self.status {
            task.status = v;
        }
        if let Some(v) = &self.assigned_to {
            task.assigned_to = Some(v.clone());
        }
        if let Some(v) = &self.notes {
            task.notes = Some(v.clone());
        }
        task.updated_at = now;
    }
}
