// SPDX-License-Identifier: Apache-2.0

use crate::error::StoreError;
use crate::order;
use crate::traits::{
    DocumentStore, NotificationFilter, CORRECTIVE, INVENTORY, NOTIFICATIONS, PREVENTIVE,
};
use async_trait::async_trait;
use mantis_model::{CorrectiveTask, InventoryItem, Notification, PreventiveTask, RecordId};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-memory backend: one mutex-guarded map per collection. Backs the test
/// suites and the `MANTIS_STORE=memory` configuration; nothing survives a
/// restart.
#[derive(Default)]
pub struct MemoryStore {
    preventive: Mutex<HashMap<RecordId, PreventiveTask>>,
    corrective: Mutex<HashMap<RecordId, CorrectiveTask>>,
    inventory: Mutex<HashMap<RecordId, InventoryItem>>,
    notifications: Mutex<HashMap<RecordId, Notification>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_preventive(&self, task: PreventiveTask) -> Result<(), StoreError> {
        let mut map = self.preventive.lock().await;
        if map.values().any(|t| t.work_order == task.work_order) {
            return Err(StoreError::Duplicate {
                collection: PREVENTIVE,
                field: "workOrder",
                value: task.work_order,
            });
        }
        map.insert(task.id, task);
        Ok(())
    }

    async fn get_preventive(&self, id: RecordId) -> Result<PreventiveTask, StoreError> {
        self.preventive
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: PREVENTIVE,
                id: id.to_string(),
            })
    }

    async fn update_preventive(&self, task: PreventiveTask) -> Result<(), StoreError> {
        let mut map = self.preventive.lock().await;
        if !map.contains_key(&task.id) {
            return Err(StoreError::NotFound {
                collection: PREVENTIVE,
                id: task.id.to_string(),
            });
        }
        if map
            .values()
            .any(|t| t.id != task.id && t.work_order == task.work_order)
        {
            return Err(StoreError::Duplicate {
                collection: PREVENTIVE,
                field: "workOrder",
                value: task.work_order,
            });
        }
        map.insert(task.id, task);
        Ok(())
    }

    async fn delete_preventive(&self, id: RecordId) -> Result<(), StoreError> {
        self.preventive
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                collection: PREVENTIVE,
                id: id.to_string(),
            })
    }

    async fn list_preventive(&self) -> Result<Vec<PreventiveTask>, StoreError> {
        let mut tasks: Vec<_> = self.preventive.lock().await.values().cloned().collect();
        order::sort_preventive(&mut tasks);
        Ok(tasks)
    }

    async fn insert_corrective(&self, task: CorrectiveTask) -> Result<(), StoreError> {
        self.corrective.lock().await.insert(task.id, task);
        Ok(())
    }

    async fn get_corrective(&self, id: RecordId) -> Result<CorrectiveTask, StoreError> {
        self.corrective
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: CORRECTIVE,
                id: id.to_string(),
            })
    }

    async fn update_corrective(&self, task: CorrectiveTask) -> Result<(), StoreError> {
        let mut map = self.corrective.lock().await;
        if !map.contains_key(&task.id) {
            return Err(StoreError::NotFound {
                collection: CORRECTIVE,
                id: task.id.to_string(),
            });
        }
        map.insert(task.id, task);
        Ok(())
    }

    async fn list_corrective(&self) -> Result<Vec<CorrectiveTask>, StoreError> {
        let mut tasks: Vec<_> = self.corrective.lock().await.values().cloned().collect();
        order::sort_corrective(&mut tasks);
        Ok(tasks)
    }

    async fn list_corrective_by_equipment(
        &self,
        equipment: &str,
    ) -> Result<Vec<CorrectiveTask>, StoreError> {
        let mut tasks: Vec<_> = self
            .corrective
            .lock()
            .await
            .values()
            .filter(|t| t.equipment == equipment)
            .cloned()
            .collect();
        order::sort_corrective_by_start(&mut tasks);
        Ok(tasks)
    }

    async fn insert_inventory(&self, item: InventoryItem) -> Result<(), StoreError> {
        let mut map = self.inventory.lock().await;
        if map.values().any(|i| i.part_number == item.part_number) {
            return Err(StoreError::Duplicate {
                collection: INVENTORY,
                field: "partNumber",
                value: item.part_number,
            });
        }
        map.insert(item.id, item);
        Ok(())
    }

    async fn get_inventory(&self, id: RecordId) -> Result<InventoryItem, StoreError> {
        self.inventory
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: INVENTORY,
                id: id.to_string(),
            })
    }

    async fn update_inventory(&self, item: InventoryItem) -> Result<(), StoreError> {
        let mut map = self.inventory.lock().await;
        if !map.contains_key(&item.id) {
            return Err(StoreError::NotFound {
                collection: INVENTORY,
                id: item.id.to_string(),
            });
        }
        if map
            .values()
            .any(|i| i.id != item.id && i.part_number == item.part_number)
        {
            return Err(StoreError::Duplicate {
                collection: INVENTORY,
                field: "partNumber",
                value: item.part_number,
            });
        }
        map.insert(item.id, item);
        Ok(())
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let mut items: Vec<_> = self.inventory.lock().await.values().cloned().collect();
        order::sort_inventory(&mut items);
        Ok(items)
    }

    async fn list_inventory_reorder(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let mut items: Vec<_> = self
            .inventory
            .lock()
            .await
            .values()
            .filter(|i| i.current_stock <= i.reorder_point)
            .cloned()
            .collect();
        order::sort_inventory_by_stock(&mut items);
        Ok(items)
    }

    async fn search_inventory(
        &self,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<InventoryItem>, StoreError> {
        let needle = name.map(str::to_lowercase);
        let mut items: Vec<_> = self
            .inventory
            .lock()
            .await
            .values()
            .filter(|i| category.is_none_or(|c| i.category == c))
            .filter(|i| {
                needle
                    .as_deref()
                    .is_none_or(|n| i.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        order::sort_inventory(&mut items);
        Ok(items)
    }

    async fn insert_notification(&self, notification: Notification) -> Result<(), StoreError> {
        self.notifications
            .lock()
            .await
            .insert(notification.id, notification);
        Ok(())
    }

    async fn get_notification(&self, id: RecordId) -> Result<Notification, StoreError> {
        self.notifications
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: NOTIFICATIONS,
                id: id.to_string(),
            })
    }

    async fn update_notification(&self, notification: Notification) -> Result<(), StoreError> {
        let mut map = self.notifications.lock().await;
        if !map.contains_key(&notification.id) {
            return Err(StoreError::NotFound {
                collection: NOTIFICATIONS,
                id: notification.id.to_string(),
            });
        }
        map.insert(notification.id, notification);
        Ok(())
    }

    async fn list_notifications(
        &self,
        filter: &NotificationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Notification>, StoreError> {
        let mut out: Vec<_> = self
            .notifications
            .lock()
            .await
            .values()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        order::sort_notifications(&mut out);
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
