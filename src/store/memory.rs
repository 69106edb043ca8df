//! In-process store for tests and database-less runs. Ids come from per-table
//! counters that only grow, so deleted ids are never handed out again.

use super::BakeryStore;
use crate::error::AppError;
use crate::model::{BakedGood, Bakery, NewBakedGood};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    bakeries: BTreeMap<i64, Bakery>,
    baked_goods: BTreeMap<i64, BakedGood>,
    last_bakery_id: i64,
    last_baked_good_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BakeryStore for MemoryStore {
    async fn list_bakeries(&self) -> Result<Vec<Bakery>, AppError> {
        Ok(self.read().bakeries.values().cloned().collect())
    }

    async fn get_bakery(&self, id: i64) -> Result<Option<Bakery>, AppError> {
        Ok(self.read().bakeries.get(&id).cloned())
    }

    async fn create_bakery(&self, name: &str) -> Result<Bakery, AppError> {
        let mut tables = self.write();
        tables.last_bakery_id += 1;
        let bakery = Bakery {
            id: tables.last_bakery_id,
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.bakeries.insert(bakery.id, bakery.clone());
        Ok(bakery)
    }

    async fn update_bakery_name(&self, id: i64, name: Option<&str>) -> Result<Option<Bakery>, AppError> {
        let mut tables = self.write();
        let Some(bakery) = tables.bakeries.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = name {
            bakery.name = name.to_string();
            bakery.updated_at = Some(Utc::now());
        }
        Ok(Some(bakery.clone()))
    }

    async fn list_baked_goods(&self) -> Result<Vec<BakedGood>, AppError> {
        Ok(self.read().baked_goods.values().cloned().collect())
    }

    async fn get_baked_good(&self, id: i64) -> Result<Option<BakedGood>, AppError> {
        Ok(self.read().baked_goods.get(&id).cloned())
    }

    async fn create_baked_good(&self, new: &NewBakedGood) -> Result<BakedGood, AppError> {
        let mut tables = self.write();
        tables.last_baked_good_id += 1;
        let good = BakedGood {
            id: tables.last_baked_good_id,
            name: new.name.clone(),
            price: new.price,
            bakery_id: new.bakery_id,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.baked_goods.insert(good.id, good.clone());
        Ok(good)
    }

    async fn delete_baked_good(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write().baked_goods.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn croissant(bakery_id: i64) -> NewBakedGood {
        NewBakedGood {
            name: "Croissant".into(),
            price: 3.5,
            bakery_id,
        }
    }

    #[tokio::test]
    async fn update_without_name_keeps_row() {
        let store = MemoryStore::new();
        let b = store.create_bakery("Bread & Butter").await.unwrap();
        let same = store.update_bakery_name(b.id, None).await.unwrap().unwrap();
        assert_eq!(same.name, "Bread & Butter");
        assert!(same.updated_at.is_none());

        let renamed = store.update_bakery_name(b.id, Some("Crumbs")).await.unwrap().unwrap();
        assert_eq!(renamed.name, "Crumbs");
        assert!(renamed.updated_at.is_some());
        assert_eq!(store.get_bakery(b.id).await.unwrap().unwrap().name, "Crumbs");
    }

    #[tokio::test]
    async fn update_missing_bakery_is_none() {
        let store = MemoryStore::new();
        assert!(store.update_bakery_name(42, Some("x")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn baked_good_may_reference_unknown_bakery() {
        let store = MemoryStore::new();
        let g = store.create_baked_good(&croissant(999)).await.unwrap();
        assert_eq!(g.bakery_id, 999);
        assert_eq!(store.get_baked_good(g.id).await.unwrap(), Some(g));
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = MemoryStore::new();
        let first = store.create_baked_good(&croissant(1)).await.unwrap();
        assert!(store.delete_baked_good(first.id).await.unwrap());
        assert!(!store.delete_baked_good(first.id).await.unwrap());
        let second = store.create_baked_good(&croissant(1)).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn lists_are_in_insertion_order() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            store.create_bakery(name).await.unwrap();
        }
        let names: Vec<_> = store
            .list_bakeries()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
