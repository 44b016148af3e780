/// Useful functions for creating inmemory repositories
use medly_domain::{Entity, ID};
use std::sync::Mutex;

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    for i in 0..collection.len() {
        if collection[i].id() == val.id() {
            collection.splice(i..i + 1, vec![val.clone()]);
        }
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|v| v.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: Fn(&T) -> bool>(collection: &Mutex<Vec<T>>, compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|v| compare(v)).cloned().collect()
}

pub fn update_by<T, F: Fn(&mut T)>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    apply: F,
) -> Option<()>
where
    T: Entity,
{
    let mut collection = collection.lock().unwrap();
    let val = collection.iter_mut().find(|v| v.id() == val_id)?;
    apply(val);
    Some(())
}
