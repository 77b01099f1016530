//! In-memory table used by the memory storage backend.
//!
//! Rows are kept in id order behind a `tokio` `RwLock`. Unique constraints are
//! checked under the write lock, so concurrent inserts behave like a database
//! with a unique index.

use std::collections::BTreeMap;

use serde_json::json;
use tokio::sync::RwLock;

use crate::error::AppError;

#[derive(Debug)]
struct Rows<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

/// An id-keyed table with serial ids starting at 1.
#[derive(Debug)]
pub struct MemoryTable<T> {
    inner: RwLock<Rows<T>>,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Rows {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<T: Clone> MemoryTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the row built by `build`.
    ///
    /// `explicit_id` overrides the serial id; the serial continues after the
    /// largest id seen. `conflicts(existing, new)` plays the role of unique
    /// indexes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is taken or `conflicts` matches any row,
    /// and [`AppError::Validation`] if the serial cannot continue past `explicit_id`.
    pub async fn insert<B, C>(
        &self,
        explicit_id: Option<i64>,
        conflicts: C,
        build: B,
    ) -> Result<T, AppError>
    where
        B: FnOnce(i64) -> T,
        C: Fn(&T, &T) -> bool,
    {
        let mut inner = self.inner.write().await;

        let id = explicit_id.unwrap_or(inner.next_id);
        let next_id = id.checked_add(1).ok_or_else(|| {
            AppError::bad_request("Id out of range", json!({ "id": id }))
        })?;
        if inner.rows.contains_key(&id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "primary_key", "id": id }),
            ));
        }

        let row = build(id);
        if inner.rows.values().any(|existing| conflicts(existing, &row)) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({}),
            ));
        }

        inner.rows.insert(id, row.clone());
        inner.next_id = inner.next_id.max(next_id);
        Ok(row)
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    /// First row, in id order, matching `predicate`.
    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .rows
            .values()
            .find(|row| predicate(row))
            .cloned()
    }

    /// Rows matching `predicate`, in id order, after skipping `offset` and
    /// keeping at most `limit`.
    pub async fn select<P>(&self, predicate: P, offset: i64, limit: i64) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        self.inner
            .read()
            .await
            .rows
            .values()
            .filter(|row| predicate(row))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Every row matching `predicate`, in id order.
    pub async fn select_all<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.select(predicate, 0, i64::MAX).await
    }

    /// Applies `change` to the row with `id` and returns the updated row.
    pub async fn update<F>(&self, id: i64, change: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut inner = self.inner.write().await;
        let row = inner.rows.get_mut(&id)?;
        change(row);
        Some(row.clone())
    }

    /// Removes the row with `id`; returns whether it existed.
    pub async fn remove(&self, id: i64) -> bool {
        self.inner.write().await.rows.remove(&id).is_some()
    }

    /// Removes every row matching `predicate`; returns how many were removed.
    pub async fn remove_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let mut inner = self.inner.write().await;
        let before = inner.rows.len();
        inner.rows.retain(|_, row| !predicate(row));
        before - inner.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        code: String,
    }

    fn row(code: &str) -> impl FnOnce(i64) -> Row + '_ {
        move |id| Row {
            id,
            code: code.to_string(),
        }
    }

    fn same_code(a: &Row, b: &Row) -> bool {
        a.code == b.code
    }

    #[tokio::test]
    async fn test_serial_ids() {
        let table = MemoryTable::new();
        let a = table.insert(None, same_code, row("a")).await.unwrap();
        let b = table.insert(None, same_code, row("b")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_explicit_id_advances_serial() {
        let table = MemoryTable::new();
        table.insert(Some(10), same_code, row("a")).await.unwrap();
        let next = table.insert(None, same_code, row("b")).await.unwrap();

        assert_eq!(next.id, 11);
    }

    #[tokio::test]
    async fn test_explicit_max_id_is_rejected() {
        let table = MemoryTable::new();

        let err = table
            .insert(Some(i64::MAX), same_code, row("a"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "validation_error");

        let next = table.insert(None, same_code, row("a")).await.unwrap();
        assert_eq!(next.id, 1);
    }

    #[tokio::test]
    async fn test_unique_conflict() {
        let table = MemoryTable::new();
        table.insert(None, same_code, row("a")).await.unwrap();

        let err = table.insert(None, same_code, row("a")).await.unwrap_err();
        assert_eq!(err.code(), "conflict");

        let err = table.insert(Some(1), same_code, row("z")).await.unwrap_err();
        assert_eq!(err.code(), "conflict");
    }

    #[tokio::test]
    async fn test_select_paging_and_remove() {
        let table = MemoryTable::new();
        for code in ["a", "b", "c", "d"] {
            table.insert(None, same_code, row(code)).await.unwrap();
        }

        let page = table.select(|_| true, 1, 2).await;
        assert_eq!(
            page.iter().map(|r| r.code.as_str()).collect::<Vec<_>>(),
            vec!["b", "c"]
        );

        assert!(table.remove(2).await);
        assert!(!table.remove(2).await);
        assert_eq!(table.remove_where(|r| r.code != "a").await, 2);
        assert_eq!(table.select_all(|_| true).await.len(), 1);
    }

    #[tokio::test]
    async fn test_update() {
        let table = MemoryTable::new();
        table.insert(None, same_code, row("a")).await.unwrap();

        let updated = table.update(1, |r| r.code = "z".to_string()).await;
        assert_eq!(updated.unwrap().code, "z");
        assert!(table.update(99, |_| {}).await.is_none());
    }
}
