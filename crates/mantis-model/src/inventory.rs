// SPDX-License-Identifier: Apache-2.0

use crate::ids::RecordId;
use crate::validate::{require_non_negative, require_text, require_text_opt, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    Ordered,
}

impl StockStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::LowStock => "low-stock",
            Self::OutOfStock => "out-of-stock",
            Self::Ordered => "ordered",
        }
    }
}

/// Derived stock status. Pure function of the two counters, independent of the
/// storage call; write paths invoke it on every save that does not assign
/// `status` explicitly. `OutOfStock` and `Ordered` are never derived — they are
/// reachable only through an explicit status assignment.
#[must_use]
pub const fn derive_status(current_stock: i64, minimum_stock: i64) -> StockStatus {
    if current_stock <= minimum_stock {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertStatus {
    Active,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub status: AlertStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageLocation {
    #[serde(default)]
    pub warehouse: Option<String>,
    #[serde(default)]
    pub shelf: Option<String>,
    #[serde(default)]
    pub bin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    /// Delivery lead time in days.
    #[serde(default)]
    pub lead_time: Option<i64>,
}

/// A spare part in the warehouse. `part_number` is unique across the
/// collection. Stock may go negative through parts consumption: the repair
/// write path applies decrements with no floor at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: RecordId,
    pub part_number: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub manufacturer: Option<String>,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub reorder_point: i64,
    pub unit_price: f64,
    pub location: Option<StorageLocation>,
    pub compatible_equipment: Vec<String>,
    pub supplier: Option<Supplier>,
    pub last_restock_date: Option<DateTime<Utc>>,
    pub status: StockStatus,
    pub alerts: Vec<StockAlert>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub part_number: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    pub current_stock: i64,
    pub minimum_stock: i64,
    pub reorder_point: i64,
    pub unit_price: f64,
    #[serde(default)]
    pub location: Option<StorageLocation>,
    #[serde(default)]
    pub compatible_equipment: Vec<String>,
    #[serde(default)]
    pub supplier: Option<Supplier>,
    #[serde(default)]
    pub last_restock_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<StockStatus>,
    #[serde(default)]
    pub alerts: Vec<StockAlert>,
}

impl NewInventoryItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("partNumber", &self.part_number)?;
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        require_non_negative("currentStock", self.current_stock)?;
        require_non_negative("minimumStock", self.minimum_stock)?;
        Ok(())
    }

    #[must_use]
    pub fn into_item(self, id: RecordId, now: DateTime<Utc>) -> InventoryItem {
        let status = self
            .status
            .unwrap_or_else(|| derive_status(self.current_stock, self.minimum_stock));
        InventoryItem {
            id,
            part_number: self.part_number,
            name: self.name,
            description: self.description,
            category: self.category,
            manufacturer: self.manufacturer,
            current_stock: self.current_stock,
            minimum_stock: self.minimum_stock,
            reorder_point: self.reorder_point,
            unit_price: self.unit_price,
            location: self.location,
            compatible_equipment: self.compatible_equipment,
            supplier: self.supplier,
            last_restock_date: self.last_restock_date,
            status,
            alerts: self.alerts,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Unless the patch assigns `status` itself, the saved status
/// is recomputed from the post-patch stock counters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItemPatch {
    pub part_number: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub current_stock: Option<i64>,
    pub minimum_stock: Option<i64>,
    pub reorder_point: Option<i64>,
    pub unit_price: Option<f64>,
    pub location: Option<StorageLocation>,
    pub compatible_equipment: Option<Vec<String>>,
    pub supplier: Option<Supplier>,
    pub last_restock_date: Option<DateTime<Utc>>,
    pub status: Option<StockStatus>,
    pub alerts: Option<Vec<StockAlert>>,
}

impl InventoryItemPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text_opt("partNumber", self.part_number.as_deref())?;
        require_text_opt("name", self.name.as_deref())?;
        require_text_opt("category", self.category.as_deref())?;
        if let Some(v) = self.current_stock {
            require_non_negative("currentStock", v)?;
        }
        if let Some(v) = self.minimum_stock {
            require_non_negative("minimumStock", v)?;
        }
        Ok(())
    }

    pub fn apply(&self, item: &mut InventoryItem, now: DateTime<Utc>) {
        if let Some(v) = &self.part_number {
            item.part_number = v.clone();
        }
        if let Some(v) = &self.name {
            item.name = v.clone();
        }
        if let Some(v) = &self.description {
            item.description = Some(v.clone());
        }
        if let Some(v) = &self.category {
            item.category = v.clone();
        }
        if let Some(v) = &self.manufacturer {
            item.manufacturer = Some(v.clone());
        }
        if let Some(v) = self.current_stock {
            item.current_stock = v;
        }
        if let Some(v) = self.minimum_stock {
            item.minimum_stock = v;
        }
        if let Some(v) = self.reorder_point {
            item.reorder_point = v;
        }
        if let Some(v) = self.unit_price {
            item.unit_price = v;
        }
        if let Some(v) = &self.location {
            item.location = Some(v.clone());
        }
        if let Some(v) = &self.compatible_equipment {
            item.compatible_equipment = v.clone();
        }
        if let Some(v) = &self.supplier {
            item.supplier = Some(v.clone());
        }
        if let Some(v) = self.last_restock_date {
            item.last_restock_date = Some(v);
        }
        if let Some(v) = &self.alerts {
            item.alerts = v.clone();
        }
        item.status = match self.status {
            Some(explicit) => explicit,
            None => derive_status(item.current_stock, item.minimum_stock),
        };
        item.updated_at = now;
    }
}
