// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::order;
use crate::traits::{
    DocumentStore, NotificationFilter, CORRECTIVE, INVENTORY, NOTIFICATIONS, PREVENTIVE,
};
use async_trait::async_trait;
use mantis_model::{CorrectiveTask, InventoryItem, Notification, PreventiveTask, RecordId};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::sync::Mutex;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS preventive_tasks (
    id TEXT PRIMARY KEY,
    work_order TEXT NOT NULL UNIQUE,
    body TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS corrective_tasks (
    id TEXT PRIMARY KEY,
    body TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS inventory_items (
    id TEXT PRIMARY KEY,
    part_number TEXT NOT NULL UNIQUE,
    body TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS notifications (
    id TEXT PRIMARY KEY,
    body TEXT NOT NULL
);
";

/// Durable backend: one JSON document per row, unique keys promoted to real
/// columns so the constraint lives in the database. Field-match queries
/// deserialize the collection and filter in process, matching the memory
/// backend's semantics exactly; none of the listings paginate.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Backend(e.to_string()))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError::Backend(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn map_unique_violation(
    err: rusqlite::Error,
    collection: &'static str,
    field: &'static str,
    value: &str,
) -> StoreError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        if code.code == ErrorCode::ConstraintViolation {
            return StoreError::Duplicate {
                collection,
                field,
                value: value.to_string(),
            };
        }
    }
    StoreError::Backend(err.to_string())
}

fn fetch_one<T: DeserializeOwned>(
    conn: &Connection,
    table: &str,
    collection: &'static str,
    id: RecordId,
) -> Result<T, StoreError> {
    let sql = format!("SELECT body FROM {table} WHERE id = ?1");
    let raw: Option<String> = conn
        .query_row(&sql, params![id.to_string()], |row| row.get(0))
        .optional()
        .map_err(|e| StoreError::Backend(e.to_string()))?;
    match raw {
        Some(raw) => decode(&raw),
        None => Err(StoreError::NotFound {
            collection,
            id: id.to_string(),
        }),
    }
}

fn fetch_all<T: DeserializeOwned>(conn: &Connection, table: &str) -> Result<Vec<T>, StoreError> {
    let sql = format!("SELECT body FROM {table}");
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| StoreError::Backend(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| StoreError::Backend(e.to_string()))?;
    let mut out = Vec::new();
    for raw in rows {
        let raw = raw.map_err(|e| StoreError::Backend(e.to_string()))?;
        out.push(decode(&raw)?);
    }
    Ok(out)
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert_preventive(&self, task: PreventiveTask) -> Result<(), StoreError> {
        let body = encode(&task)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO preventive_tasks (id, work_order, body) VALUES (?1, ?2, ?3)",
            params![task.id.to_string(), task.work_order, body],
        )
        .map_err(|e| map_unique_violation(e, PREVENTIVE, "workOrder", &task.work_order))?;
        Ok(())
    }

    async fn get_preventive(&self, id: RecordId) -> Result<PreventiveTask, StoreError> {
        let conn = self.conn.lock().await;
        fetch_one(&conn, "preventive_tasks", PREVENTIVE, id)
    }

    async fn update_preventive(&self, task: PreventiveTask) -> Result<(), StoreError> {
        let body = encode(&task)?;
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE preventive_tasks SET work_order = ?2, body = ?3 WHERE id = ?1",
                params![task.id.to_string(), task.work_order, body],
            )
            .map_err(|e| map_unique_violation(e, PREVENTIVE, "workOrder", &task.work_order))?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: PREVENTIVE,
                id: task.id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_preventive(&self, id: RecordId) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "DELETE FROM preventive_tasks WHERE id = ?1",
                params![id.to_string()],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: PREVENTIVE,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_preventive(&self) -> Result<Vec<PreventiveTask>, StoreError> {
        let conn = self.conn.lock().await;
        let mut tasks: Vec<PreventiveTask> = fetch_all(&conn, "preventive_tasks")?;
        order::sort_preventive(&mut tasks);
        Ok(tasks)
    }

    async fn insert_corrective(&self, task: CorrectiveTask) -> Result<(), StoreError> {
        let body = encode(&task)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO corrective_tasks (id, body) VALUES (?1, ?2)",
            params![task.id.to_string(), body],
        )
        .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn get_corrective(&self, id: RecordId) -> Result<CorrectiveTask, StoreError> {
        let conn = self.conn.lock().await;
        fetch_one(&conn, "corrective_tasks", CORRECTIVE, id)
    }

    async fn update_corrective(&self, task: CorrectiveTask) -> Result<(), StoreError> {
        let body = encode(&task)?;
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE corrective_tasks SET body = ?2 WHERE id = ?1",
                params![task.id.to_string(), body],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: CORRECTIVE,
                id: task.id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_corrective(&self) -> Result<Vec<CorrectiveTask>, StoreError> {
        let conn = self.conn.lock().await;
        let mut tasks: Vec<CorrectiveTask> = fetch_all(&conn, "corrective_tasks")?;
        order::sort_corrective(&mut tasks);
        Ok(tasks)
    }

    async fn list_corrective_by_equipment(
        &self,
        equipment: &str,
    ) -> Result<Vec<CorrectiveTask>, StoreError> {
        let conn = self.conn.lock().await;
        let mut tasks: Vec<CorrectiveTask> = fetch_all(&conn, "corrective_tasks")?;
        tasks.retain(|t| t.equipment == equipment);
        order::sort_corrective_by_start(&mut tasks);
        Ok(tasks)
    }

    async fn insert_inventory(&self, item: InventoryItem) -> Result<(), StoreError> {
        let body = encode(&item)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO inventory_items (id, part_number, body) VALUES (?1, ?2, ?3)",
            params![item.id.to_string(), item.part_number, body],
        )
        .map_err(|e| map_unique_violation(e, INVENTORY, "partNumber", &item.part_number))?;
        Ok(())
    }

    async fn get_inventory(&self, id: RecordId) -> Result<InventoryItem, StoreError> {
        let conn = self.conn.lock().await;
        fetch_one(&conn, "inventory_items", INVENTORY, id)
    }

    async fn update_inventory(&self, item: InventoryItem) -> Result<(), StoreError> {
        let body = encode(&item)?;
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE inventory_items SET part_number = ?2, body = ?3 WHERE id = ?1",
                params![item.id.to_string(), item.part_number, body],
            )
            .map_err(|e| map_unique_violation(e, INVENTORY, "partNumber", &item.part_number))?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: INVENTORY,
                id: item.id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let conn = self.conn.lock().await;
        let mut items: Vec<InventoryItem> = fetch_all(&conn, "inventory_items")?;
        order::sort_inventory(&mut items);
        Ok(items)
    }

    async fn list_inventory_reorder(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let conn = self.conn.lock().await;
        let mut items: Vec<InventoryItem> = fetch_all(&conn, "inventory_items")?;
        items.retain(|i| i.current_stock <= i.reorder_point);
        order::sort_inventory_by_stock(&mut items);
        Ok(items)
    }

    async fn search_inventory(
        &self,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<InventoryItem>, StoreError> {
        let conn = self.conn.lock().await;
        let mut items: Vec<InventoryItem> = fetch_all(&conn, "inventory_items")?;
        let needle = name.map(str::to_lowercase);
        items.retain(|i| category.is_none_or(|c| i.category == c));
        items.retain(|i| {
            needle
                .as_deref()
                .is_none_or(|n| i.name.to_lowercase().contains(n))
        });
        order::sort_inventory(&mut items);
        Ok(items)
    }

    async fn insert_notification(&self, notification: Notification) -> Result<(), StoreError> {
        let body = encode(&notification)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO notifications (id, body) VALUES (?1, ?2)",
            params![notification.id.to_string(), body],
        )
        .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn get_notification(&self, id: RecordId) -> Result<Notification, StoreError> {
        let conn = self.conn.lock().await;
        fetch_one(&conn, "notifications", NOTIFICATIONS, id)
    }

    async fn update_notification(&self, notification: Notification) -> Result<(), StoreError> {
        let body = encode(&notification)?;
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE notifications SET body = ?2 WHERE id = ?1",
                params![notification.id.to_string(), body],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: NOTIFICATIONS,
                id: notification.id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Notification>, StoreError> {
        let conn = self.conn.lock().await;
        let mut out: Vec<Notification> = fetch_all(&conn, "notifications")?;
        out.retain(|n| filter.matches(n));
        order::sort_notifications(&mut out);
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    async fn close(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute_batch("PRAGMA optimize;")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}
