//! In-memory repositories for router tests

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tradebook_server::db::{DbError, Repository};
use tradebook_server::models::{
    Keyed, LineItem, Note, NotePatch, NoteWithProductLists, Product, ProductPatch,
};

/// Table kept in a `BTreeMap`; keys are assigned like a SERIAL column.
pub struct MemoryRepository<T, P> {
    rows: Mutex<BTreeMap<i32, T>>,
    patches: Mutex<Vec<P>>,
}

impl<T, P> MemoryRepository<T, P> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            patches: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Patches accepted by `update`, in arrival order.
    pub fn patches(&self) -> Vec<P>
    where
        P: Clone,
    {
        self.patches.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T, P> Repository for MemoryRepository<T, P>
where
    T: Clone + Keyed + Send + Sync + 'static,
    P: Keyed + Send + Sync + 'static,
{
    type Record = T;
    type Patch = P;
    type View = T;

    async fn create(&self, record: &mut T) -> Result<i32, DbError> {
        let mut rows = self.rows.lock().unwrap();
        let key = rows.keys().next_back().map_or(1, |last| last + 1);
        record.set_key(key);
        rows.insert(key, record.clone());
        Ok(key)
    }

    async fn find_all(&self) -> Result<Vec<T>, DbError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn find_one(&self, key: i32) -> Result<T, DbError> {
        self.rows
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn update(&self, patch: P) -> Result<(), DbError> {
        if !self.rows.lock().unwrap().contains_key(&patch.key()) {
            return Err(DbError::NoRowAffected { op: "update" });
        }
        self.patches.lock().unwrap().push(patch);
        Ok(())
    }

    async fn delete(&self, key: i32) -> Result<(), DbError> {
        self.rows
            .lock()
            .unwrap()
            .remove(&key)
            .map(|_| ())
            .ok_or(DbError::NoRowAffected { op: "delete" })
    }
}

/// Notes with fixed line items, standing in for the joined read.
pub struct NoteFixture {
    pub notes: Vec<(Note, Vec<LineItem>)>,
}

#[async_trait]
impl Repository for NoteFixture {
    type Record = Note;
    type Patch = NotePatch;
    type View = NoteWithProductLists;

    async fn create(&self, _record: &mut Note) -> Result<i32, DbError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn find_all(&self) -> Result<Vec<NoteWithProductLists>, DbError> {
        Ok(self
            .notes
            .iter()
            .cloned()
            .map(|(note, items)| NoteWithProductLists::new(note, items))
            .collect())
    }

    async fn find_one(&self, key: i32) -> Result<NoteWithProductLists, DbError> {
        self.notes
            .iter()
            .find(|(note, _)| note.number == key)
            .cloned()
            .map(|(note, items)| NoteWithProductLists::new(note, items))
            .ok_or(DbError::NotFound)
    }

    async fn update(&self, _patch: NotePatch) -> Result<(), DbError> {
        Err(DbError::NoRowAffected { op: "update" })
    }

    async fn delete(&self, _key: i32) -> Result<(), DbError> {
        Err(DbError::NoRowAffected { op: "delete" })
    }
}

/// Product store that answers every call only after `delay`.
pub struct StalledProducts {
    pub delay: Duration,
}

#[async_trait]
impl Repository for StalledProducts {
    type Record = Product;
    type Patch = ProductPatch;
    type View = Product;

    async fn create(&self, _record: &mut Product) -> Result<i32, DbError> {
        tokio::time::sleep(self.delay).await;
        Ok(1)
    }

    async fn find_all(&self) -> Result<Vec<Product>, DbError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn find_one(&self, _key: i32) -> Result<Product, DbError> {
        tokio::time::sleep(self.delay).await;
        Err(DbError::NotFound)
    }

    async fn update(&self, _patch: ProductPatch) -> Result<(), DbError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn delete(&self, _key: i32) -> Result<(), DbError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
