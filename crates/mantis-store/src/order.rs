//! Collection orderings shared by the backends.

use mantis_model::{CorrectiveTask, InventoryItem, Notification, PreventiveTask};

pub(crate) fn sort_preventive(tasks: &mut [PreventiveTask]) {
    tasks.sort_by(|a, b| a.next_maintenance.cmp(&b.next_maintenance));
}

pub(crate) fn sort_corrective(tasks: &mut [CorrectiveTask]) {
    tasks.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(b.start_date.cmp(&a.start_date))
    });
}

pub(crate) fn sort_corrective_by_start(tasks: &mut [CorrectiveTask]) {
    tasks.sort_by(|a, b| b.start_date.cmp(&a.start_date));
}

pub(crate) fn sort_inventory(items: &mut [InventoryItem]) {
    items.sort_by(|a, b| a.part_number.cmp(&b.part_number));
}

pub(crate) fn sort_inventory_by_stock(items: &mut [InventoryItem]) {
    items.sort_by(|a, b| a.current_stock.cmp(&b.current_stock));
}

pub(crate) fn sort_notifications(notifications: &mut [Notification]) {
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
