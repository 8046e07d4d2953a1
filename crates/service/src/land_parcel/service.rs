use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use models::land_parcel::{LandParcel, LandParcelResponse, NewLandParcel};

use crate::errors::ServiceError;
use crate::land_parcel::repository::LandParcelRepository;

/// Application service encapsulating land parcel business rules.
/// Update and delete must target an existing record; everything else is
/// delegated to the repository and its errors are passed through untouched.
pub struct ParcelService<R: LandParcelRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: LandParcelRepository + ?Sized> ParcelService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All stored parcels wrapped in the list envelope.
    #[instrument(skip(self))]
    pub async fn list_parcels(&self) -> Result<LandParcelResponse, ServiceError> {
        let parcels = self.repo.find_all().await?;
        debug!(count = parcels.len(), "land_parcels_listed");
        Ok(LandParcelResponse::new(parcels))
    }

    /// `None` is a normal outcome for an unknown id.
    #[instrument(skip(self))]
    pub async fn get_parcel(&self, id: i64) -> Result<Option<LandParcel>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Persist a new parcel and return it with its assigned id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::{NewLandParcel, Status};
    /// use service::land_parcel::{InMemoryLandParcelRepository, ParcelService};
    ///
    /// let svc = ParcelService::new(Arc::new(InMemoryLandParcelRepository::new()));
    /// let candidate = NewLandParcel::new("Test", Status::Saved, 15.2, false).unwrap();
    /// let created = tokio_test::block_on(svc.create_parcel(candidate)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.name, "Test");
    /// ```
    #[instrument(skip(self, candidate), fields(name = %candidate.name()))]
    pub async fn create_parcel(&self, candidate: NewLandParcel) -> Result<LandParcel, ServiceError> {
        let created = self.repo.insert(candidate).await?;
        info!(id = created.id, status = %created.status, "land_parcel_created");
        Ok(created)
    }

    /// Replace the mutable fields of the stored parcel with `candidate`'s.
    ///
    /// The stored record is the one written back, so its id is kept.
    /// Fails with `NotFound` when `candidate.id` is unknown.
    #[instrument(skip(self, candidate), fields(id = candidate.id))]
    pub async fn update_parcel(&self, candidate: LandParcel) -> Result<LandParcel, ServiceError> {
        let Some(mut existing) = self.repo.find_by_id(candidate.id).await? else {
            warn!("land_parcel_update_missing");
            return Err(ServiceError::parcel_not_found(candidate.id));
        };
        existing.apply(NewLandParcel::from(candidate));
        let updated = self.repo.save(existing).await?;
        info!(id = updated.id, status = %updated.status, "land_parcel_updated");
        Ok(updated)
    }

    /// Fails with `NotFound` when `id` is unknown.
    ///
    /// A row removed concurrently between the lookup and the delete still
    /// counts as deleted.
    #[instrument(skip(self))]
    pub async fn delete_parcel(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.find_by_id(id).await?.is_none() {
            warn!("land_parcel_delete_missing");
            return Err(ServiceError::parcel_not_found_for_deletion(id));
        }
        self.repo.delete_by_id(id).await?;
        info!(id, "land_parcel_deleted");
        Ok(())
    }
}

impl<R: LandParcelRepository + ?Sized> Clone for ParcelService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use models::Status;

    use crate::land_parcel::repository::memory::InMemoryLandParcelRepository;

    fn service(repo: InMemoryLandParcelRepository) -> ParcelService<InMemoryLandParcelRepository> {
        ParcelService::new(Arc::new(repo))
    }

    fn first_parcel() -> NewLandParcel {
        NewLandParcel::new("FirstParcel", Status::Saved, 9.5, true).unwrap()
    }

    fn second_parcel() -> NewLandParcel {
        NewLandParcel::new("SecondParcel", Status::ShortListed, 4.0, false).unwrap()
    }

    /// Records calls and fails every storage operation.
    #[derive(Default)]
    struct BrokenRepository {
        calls: Mutex<Vec<&'static str>>,
    }

    impl BrokenRepository {
        fn fail(&self, op: &'static str) -> ServiceError {
            self.calls.lock().unwrap().push(op);
            ServiceError::Db(format!("{op}: connection refused"))
        }
    }

    #[async_trait]
    impl LandParcelRepository for BrokenRepository {
        async fn find_all(&self) -> Result<Vec<LandParcel>, ServiceError> { Err(self.fail("find_all")) }
        async fn find_by_id(&self, _id: i64) -> Result<Option<LandParcel>, ServiceError> { Err(self.fail("find_by_id")) }
        async fn insert(&self, _p: NewLandParcel) -> Result<LandParcel, ServiceError> { Err(self.fail("insert")) }
        async fn save(&self, _p: LandParcel) -> Result<LandParcel, ServiceError> { Err(self.fail("save")) }
        async fn delete_by_id(&self, _id: i64) -> Result<(), ServiceError> { Err(self.fail("delete_by_id")) }
    }

    /// Reports a parcel on lookup that a concurrent request has already deleted.
    #[derive(Default)]
    struct VanishingRepository {
        deletes: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl LandParcelRepository for VanishingRepository {
        async fn find_all(&self) -> Result<Vec<LandParcel>, ServiceError> { Ok(Vec::new()) }
        async fn find_by_id(&self, id: i64) -> Result<Option<LandParcel>, ServiceError> {
            Ok(Some(first_parcel().into_parcel(id)))
        }
        async fn insert(&self, p: NewLandParcel) -> Result<LandParcel, ServiceError> { Ok(p.into_parcel(1)) }
        async fn save(&self, p: LandParcel) -> Result<LandParcel, ServiceError> { Ok(p) }
        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            // the row is gone, so nothing is removed
            self.deletes.lock().unwrap().push(id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn list_returns_every_parcel_in_envelope() {
        let svc = service(InMemoryLandParcelRepository::with_parcels([first_parcel(), second_parcel()]));
        let response = svc.list_parcels().await.unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response.land_parcels[0].name, "FirstParcel");
        assert_eq!(response.land_parcels[1].status, Status::ShortListed);
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty_envelope() {
        let svc = service(InMemoryLandParcelRepository::new());
        let response = svc.list_parcels().await.unwrap();
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn get_returns_parcel_when_present() {
        let svc = service(InMemoryLandParcelRepository::with_parcels([first_parcel()]));
        let found = svc.get_parcel(1).await.unwrap();
        assert_eq!(found, Some(first_parcel().into_parcel(1)));
    }

    #[tokio::test]
    async fn get_returns_none_when_absent() {
        let svc = service(InMemoryLandParcelRepository::new());
        assert!(svc.get_parcel(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_assigns_fresh_id_and_echoes_fields() {
        let svc = service(InMemoryLandParcelRepository::with_parcels([second_parcel()]));
        let created = svc
            .create_parcel(NewLandParcel::new("Test", Status::Saved, 15.2, false).unwrap())
            .await
            .unwrap();
        assert_eq!(created.id, 2);
        assert_eq!(created.name, "Test");
        assert_eq!(created.status, Status::Saved);
        assert_eq!(created.area, 15.2);
        assert!(!created.has_constraints);
    }

    #[tokio::test]
    async fn create_from_full_record_ignores_its_identifier() {
        let svc = service(InMemoryLandParcelRepository::new());
        let client_record = first_parcel().into_parcel(77);
        let created = svc.create_parcel(NewLandParcel::from(client_record.clone())).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(NewLandParcel::from(created), NewLandParcel::from(client_record));
        assert!(svc.get_parcel(77).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_mutable_fields_and_keeps_id() {
        let svc = service(InMemoryLandParcelRepository::with_parcels([first_parcel()]));
        let candidate = NewLandParcel::new("Renamed", Status::Approved, 12.0, false).unwrap().into_parcel(1);

        let updated = svc.update_parcel(candidate.clone()).await.unwrap();
        assert_eq!(updated, candidate);
        assert_eq!(svc.get_parcel(1).await.unwrap(), Some(candidate));
        assert_eq!(svc.list_parcels().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found_with_exact_message() {
        let repo = Arc::new(InMemoryLandParcelRepository::new());
        let svc = ParcelService::new(Arc::clone(&repo));
        let candidate = NewLandParcel::new("X", Status::Approved, 1.0, true).unwrap().into_parcel(999);

        let err = svc.update_parcel(candidate).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Land Parcel with object ID:999 not found.");
        // no create-on-write
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_existing_parcel() {
        let svc = service(InMemoryLandParcelRepository::with_parcels([first_parcel()]));
        svc.delete_parcel(1).await.unwrap();
        assert!(svc.get_parcel(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_found_with_exact_message() {
        let svc = service(InMemoryLandParcelRepository::new());
        let err = svc.delete_parcel(1).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Land Parcel with object ID:1 not found for deletion.");
    }

    #[tokio::test]
    async fn delete_of_row_removed_after_lookup_still_succeeds() {
        let repo = Arc::new(VanishingRepository::default());
        let svc = ParcelService::new(Arc::clone(&repo));
        svc.delete_parcel(5).await.unwrap();
        assert_eq!(*repo.deletes.lock().unwrap(), vec![5]);
    }

    #[tokio::test]
    async fn second_delete_of_same_id_is_not_found() {
        let svc = service(InMemoryLandParcelRepository::with_parcels([first_parcel()]));
        svc.delete_parcel(1).await.unwrap();
        assert!(svc.delete_parcel(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn status_may_move_between_any_values() {
        let svc = service(InMemoryLandParcelRepository::with_parcels([first_parcel()]));
        for status in [Status::Approved, Status::Saved, Status::UnderConsideration, Status::ShortListed] {
            let candidate = NewLandParcel::new("FirstParcel", status, 9.5, true).unwrap().into_parcel(1);
            assert_eq!(svc.update_parcel(candidate).await.unwrap().status, status);
        }
    }

    #[tokio::test]
    async fn storage_failures_propagate_unchanged() {
        let repo = Arc::new(BrokenRepository::default());
        let svc = ParcelService::new(Arc::clone(&repo));

        assert!(matches!(svc.list_parcels().await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.get_parcel(1).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.create_parcel(first_parcel()).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.update_parcel(first_parcel().into_parcel(1)).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.delete_parcel(1).await, Err(ServiceError::Db(_))));

        // a failed existence check stops before any write
        let calls = repo.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["find_all", "find_by_id", "insert", "find_by_id", "find_by_id"]);
    }

    #[tokio::test]
    async fn works_behind_a_trait_object() {
        let repo: Arc<dyn LandParcelRepository> = Arc::new(InMemoryLandParcelRepository::new());
        let svc: ParcelService<dyn LandParcelRepository> = ParcelService::new(repo);
        let created = svc.create_parcel(first_parcel()).await.unwrap();
        assert_eq!(svc.get_parcel(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let svc = Arc::new(service(InMemoryLandParcelRepository::new()));
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move {
                    svc.create_parcel(NewLandParcel::new(format!("p{i}"), Status::Saved, i as f64, false).unwrap())
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
