use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::debug;

use models::land_parcel::{self, Entity as LandParcelEntity, LandParcel, NewLandParcel};

use crate::errors::ServiceError;

/// Storage contract for land parcels.
///
/// Lookups never fail for a missing id; they return `None`. `save` and
/// `delete_by_id` perform no existence check of their own, that policy
/// belongs to [`crate::land_parcel::ParcelService`].
#[async_trait]
pub trait LandParcelRepository: Send + Sync {
    /// Every stored parcel, ordered by id.
    async fn find_all(&self) -> Result<Vec<LandParcel>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<LandParcel>, ServiceError>;
    /// Persist a parcel without an identifier; the store assigns one.
    async fn insert(&self, parcel: NewLandParcel) -> Result<LandParcel, ServiceError>;
    /// Overwrite the parcel stored under `parcel.id`.
    async fn save(&self, parcel: LandParcel) -> Result<LandParcel, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmLandParcelRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmLandParcelRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl LandParcelRepository for SeaOrmLandParcelRepository {
    async fn find_all(&self) -> Result<Vec<LandParcel>, ServiceError> {
        let rows = LandParcelEntity::find()
            .order_by_asc(land_parcel::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LandParcel>, ServiceError> {
        Ok(LandParcelEntity::find_by_id(id).one(&self.db).await?)
    }

    async fn insert(&self, parcel: NewLandParcel) -> Result<LandParcel, ServiceError> {
        Ok(land_parcel::create(&self.db, parcel).await?)
    }

    async fn save(&self, parcel: LandParcel) -> Result<LandParcel, ServiceError> {
        Ok(land_parcel::overwrite(&self.db, parcel).await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let res = LandParcelEntity::delete_by_id(id).exec(&self.db).await?;
        debug!(id, rows_affected = res.rows_affected, "land_parcel_delete_exec");
        Ok(())
    }
}

/// Process-local repository for tests, doc examples and benchmarks.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        by_id: BTreeMap<i64, LandParcel>,
        last_id: i64,
    }

    /// Ids start at 1 and are never reused, like a database sequence.
    /// `save` on an unknown id writes the row under that id.
    #[derive(Default)]
    pub struct InMemoryLandParcelRepository {
        rows: Mutex<Rows>,
    }

    impl InMemoryLandParcelRepository {
        pub fn new() -> Self { Self::default() }

        /// Seed the store; ids are assigned in iteration order.
        pub fn with_parcels<I: IntoIterator<Item = NewLandParcel>>(parcels: I) -> Self {
            let repo = Self::default();
            if let Ok(mut rows) = repo.rows.lock() {
                for p in parcels {
                    rows.last_id += 1;
                    let id = rows.last_id;
                    rows.by_id.insert(id, p.into_parcel(id));
                }
            }
            repo
        }

        pub fn len(&self) -> usize {
            self.rows.lock().map(|r| r.by_id.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn lock(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("in-memory store poisoned".into()))
        }
    }

    #[async_trait]
    impl LandParcelRepository for InMemoryLandParcelRepository {
        async fn find_all(&self) -> Result<Vec<LandParcel>, ServiceError> {
            Ok(self.lock()?.by_id.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<LandParcel>, ServiceError> {
            Ok(self.lock()?.by_id.get(&id).cloned())
        }

        async fn insert(&self, parcel: NewLandParcel) -> Result<LandParcel, ServiceError> {
            let mut rows = self.lock()?;
            rows.last_id += 1;
            let stored = parcel.into_parcel(rows.last_id);
            rows.by_id.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn save(&self, parcel: LandParcel) -> Result<LandParcel, ServiceError> {
            let mut rows = self.lock()?;
            rows.last_id = rows.last_id.max(parcel.id);
            rows.by_id.insert(parcel.id, parcel.clone());
            Ok(parcel)
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            self.lock()?.by_id.remove(&id);
            Ok(())
        }
    }
}
