pub mod fixtures;
pub mod latency;

pub use latency::{LatencySimulator, Operation};

use std::sync::Arc;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{EntityKind, Result, StoreError};

/// An entity that can live in a [`RecordStore`]
pub trait Record: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

/// In-memory ordered collection backing one entity kind.
///
/// Every operation first waits out the simulated latency, then applies.
/// Reads hand out clones so callers never share state with the store.
#[derive(Debug)]
pub struct RecordStore<T> {
    records: RwLock<Vec<T>>,
    latency: LatencySimulator,
}

impl<T: Record + DeserializeOwned> RecordStore<T> {
    /// Build a store from a JSON array fixture document
    pub fn seeded(fixture: &str, latency: LatencySimulator) -> anyhow::Result<Self> {
        let kind = T::KIND;
        let records: Vec<T> = serde_json::from_str(fixture)
            .with_context(|| format!("Failed to parse {} fixture data", kind))?;
        debug!(%kind, count = records.len(), "seeded record store");
        Ok(Self::new(records, latency))
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new(records: Vec<T>, latency: LatencySimulator) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }

    pub fn empty(latency: LatencySimulator) -> Self {
        Self::new(Vec::new(), latency)
    }

    /// Current record count, without simulated latency
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Run `f` against a read-only view of the records
    pub async fn read<R>(&self, op: Operation, f: impl FnOnce(&[T]) -> R) -> R {
        self.latency.pause(op).await;
        let records = self.records.read().await;
        f(&records)
    }

    /// Run `f` against the records with exclusive access.
    ///
    /// The delay and the mutation run on a spawned task: once the delay
    /// has started, dropping the returned future does not cancel the write.
    pub async fn write<R, F>(self: &Arc<Self>, op: Operation, f: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let store = Arc::clone(self);
        let task = tokio::spawn(async move {
            store.latency.pause(op).await;
            let mut records = store.records.write().await;
            f(&mut records)
        });

        match task.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(StoreError::Aborted { kind: T::KIND }),
        }
    }

    pub async fn all(&self) -> Vec<T> {
        self.read(Operation::List, |records| records.to_vec()).await
    }

    pub async fn get(&self, id: &str) -> Result<T> {
        self.read(Operation::Lookup, |records| {
            records.iter().find(|r| r.id() == id).cloned()
        })
        .await
        .ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    /// Every record matching `predicate`, in insertion order
    pub async fn select(&self, op: Operation, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.read(op, |records| {
            records.iter().filter(|&r| predicate(r)).cloned().collect()
        })
        .await
    }

    /// Append a record and return a copy of what was stored
    pub async fn insert(self: &Arc<Self>, record: T) -> Result<T> {
        self.write(Operation::Create, move |records| {
            records.push(record.clone());
            Ok(record)
        })
        .await
    }

    /// Mutate the record with the given id in place and return a copy
    pub async fn modify<F>(self: &Arc<Self>, id: &str, op: Operation, f: F) -> Result<T>
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        let id = id.to_string();
        self.write(op, move |records| {
            let record = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or_else(|| StoreError::not_found(T::KIND, id.as_str()))?;
            f(record);
            Ok(record.clone())
        })
        .await
    }

    /// Remove the record with the given id and return it
    pub async fn remove(self: &Arc<Self>, id: &str) -> Result<T> {
        let id = id.to_string();
        self.write(Operation::Delete, move |records| {
            let index = records
                .iter()
                .position(|r| r.id() == id)
                .ok_or_else(|| StoreError::not_found(T::KIND, id.as_str()))?;
            Ok(records.remove(index))
        })
        .await
    }

    /// Remove every record matching `predicate`, returning them in order
    pub async fn remove_where<P>(self: &Arc<Self>, predicate: P) -> Result<Vec<T>>
    where
        P: Fn(&T) -> bool + Send + 'static,
    {
        self.write(Operation::Delete, move |records| {
            let (removed, kept): (Vec<T>, Vec<T>) =
                records.drain(..).partition(|r| predicate(r));
            *records = kept;
            Ok(removed)
        })
        .await
    }

    /// Apply `f` to every record, returning how many reported a change
    pub async fn modify_each<F>(self: &Arc<Self>, op: Operation, f: F) -> Result<usize>
    where
        F: Fn(&mut T) -> bool + Send + 'static,
    {
        self.write(op, move |records| {
            Ok(records.iter_mut().map(|r| f(r)).filter(|changed| *changed).count())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, serde::Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl Record for Note {
        const KIND: EntityKind = EntityKind::Inquiry;

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.into(),
            body: body.into(),
        }
    }

    fn store(notes: Vec<Note>) -> Arc<RecordStore<Note>> {
        Arc::new(RecordStore::new(notes, LatencySimulator::disabled()))
    }

    #[tokio::test]
    async fn returned_records_are_independent_copies() {
        let store = store(vec![note("a", "first")]);

        let mut copy = store.get("a").await.unwrap();
        copy.body = "tampered".into();

        assert_eq!(store.get("a").await.unwrap().body, "first");
    }

    #[tokio::test]
    async fn modify_missing_id_is_not_found() {
        let store = store(vec![]);
        let err = store
            .modify("nope", Operation::Update, |n| n.body.clear())
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::not_found(EntityKind::Inquiry, "nope"));
    }

    #[tokio::test]
    async fn remove_where_keeps_order_of_survivors() {
        let store = store(vec![note("a", "x"), note("b", "y"), note("c", "x")]);

        let removed = store.remove_where(|n| n.body == "x").await.unwrap();

        assert_eq!(removed, vec![note("a", "x"), note("c", "x")]);
        assert_eq!(store.all().await, vec![note("b", "y")]);
    }

    #[tokio::test]
    async fn seeded_reports_malformed_fixture() {
        let err = RecordStore::<Note>::seeded("{not json", LatencySimulator::disabled())
            .unwrap_err();
        assert!(err.to_string().contains("Inquiry fixture data"));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_write_still_completes() {
        let store = Arc::new(RecordStore::empty(LatencySimulator::default()));

        let pending = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.insert(note("late", "still lands")).await })
        };
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        pending.abort();

        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        assert_eq!(store.len().await, 1);
    }
}
