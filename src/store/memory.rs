use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Entity, Repository, StoreResult};

struct Slot<T> {
    seq: u64,
    item: T,
}

struct Inner<T: Entity> {
    next_seq: u64,
    items: HashMap<T::Id, Slot<T>>,
}

/// Process-local repository. Queries return records in insertion order;
/// replacing a record keeps its original position.
pub struct InMemoryRepository<T: Entity> {
    inner: RwLock<Inner<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_seq: 0,
                items: HashMap::new(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, id: &T::Id) -> StoreResult<Option<T>> {
        let inner = self.inner.read().await;
        Ok(inner.items.get(id).map(|slot| slot.item.clone()))
    }

    async fn put(&self, item: T) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let id = item.id();
        let seq = match inner.items.get(&id) {
            Some(existing) => existing.seq,
            None => {
                inner.next_seq += 1;
                inner.next_seq
            }
        };
        inner.items.insert(id, Slot { seq, item });
        Ok(())
    }

    async fn query(&self, filter: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> StoreResult<Vec<T>> {
        let inner = self.inner.read().await;
        let mut matched: Vec<&Slot<T>> = inner.items.values().filter(|slot| filter(&slot.item)).collect();
        matched.sort_by_key(|slot| slot.seq);
        Ok(matched.into_iter().map(|slot| slot.item.clone()).collect())
    }

    async fn remove(&self, id: &T::Id) -> StoreResult<Option<T>> {
        let mut inner = self.inner.write().await;
        Ok(inner.items.remove(id).map(|slot| slot.item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        body: &'static str,
    }

    impl Entity for Note {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    #[tokio::test]
    async fn query_keeps_insertion_order_across_replacements() {
        let repo = InMemoryRepository::<Note>::new();
        for (id, body) in [(3, "c"), (1, "a"), (2, "b")] {
            repo.put(Note { id, body }).await.unwrap();
        }
        repo.put(Note { id: 3, body: "c2" }).await.unwrap();

        let all = repo.query(&|_| true).await.unwrap();
        let ids: Vec<u32> = all.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(all[0].body, "c2");
    }

    #[tokio::test]
    async fn get_put_remove() {
        let repo = InMemoryRepository::<Note>::new();
        assert!(repo.get(&7).await.unwrap().is_none());

        repo.put(Note { id: 7, body: "x" }).await.unwrap();
        assert_eq!(repo.get(&7).await.unwrap().map(|n| n.body), Some("x"));
        assert_eq!(repo.len().await, 1);

        assert!(repo.remove(&7).await.unwrap().is_some());
        assert!(repo.is_empty().await);
    }
}
