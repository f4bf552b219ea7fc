use journeysync_notifier_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity<ID>>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection
        .iter()
        .find(|item| item.id() == *val_id)
        .cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

/// Applies `update` to the item with the given id while the collection lock
/// is held, so check-then-mutate updates are atomic. Returns what `update`
/// returned, or `false` when no item matched.
pub fn update_one<T, F>(val_id: &ID, collection: &Mutex<Vec<T>>, update: F) -> bool
where
    T: Entity<ID>,
    F: FnOnce(&mut T) -> bool,
{
    let mut collection = collection.lock().unwrap();
    match collection.iter_mut().find(|item| item.id() == *val_id) {
        Some(item) => update(item),
        None => false,
    }
}
