use std::collections::BTreeMap;

use crate::models::Id;

/// One entity kind: rows keyed by id plus the counter for the next id.
///
/// Ids start at 1 and are never handed out twice, even after the row that
/// held one is removed. Iteration follows id order, which is insertion order.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    #[cfg(test)]
    fn starting_at(next_id: Id) -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id,
        }
    }

    pub fn insert_with(&mut self, build: impl FnOnce(Id) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: Id) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn update_with(&mut self, id: Id, merge: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        merge(row);
        Some(row.clone())
    }

    pub fn remove(&mut self, id: Id) -> bool {
        self.rows.remove(&id).is_some()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.rows.contains_key(&id)
    }

    /// Removes every row matching `doomed`, returning how many went.
    pub fn remove_where(&mut self, mut doomed: impl FnMut(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !doomed(row));
        before - self.rows.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
