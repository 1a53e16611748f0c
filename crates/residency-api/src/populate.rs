//! Expands the `user_id` reference of residents and notifications.

use std::collections::HashMap;

use anyhow::Result;
use residency_db::UserStore;
use residency_types::ObjectId;
use residency_types::models::{OwnedByUser, Populated, User};

/// Pair each record with its user, using one lookup for the whole batch.
/// Order is preserved.
pub fn populate<T: OwnedByUser>(users: &dyn UserStore, records: Vec<T>) -> Result<Vec<Populated<T>>> {
    let mut ids: Vec<ObjectId> = records.iter().map(|r| r.user_id().clone()).collect();
    ids.sort();
    ids.dedup();

    let by_id: HashMap<ObjectId, User> = users
        .find_users(&ids)?
        .into_iter()
        .map(|u| (u.id.clone(), u))
        .collect();

    Ok(records
        .into_iter()
        .map(|record| {
            let user = by_id.get(record.user_id()).cloned();
            Populated { record, user }
        })
        .collect())
}

pub fn populate_one<T: OwnedByUser>(users: &dyn UserStore, record: T) -> Result<Populated<T>> {
    let user = users
        .find_users(std::slice::from_ref(record.user_id()))?
        .into_iter()
        .next();
    Ok(Populated { record, user })
}
