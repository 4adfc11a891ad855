// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ListingStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use pawmarket_config::model::StorageConfig;
use pawmarket_core::types::{new_id, now_timestamp};
use pawmarket_core::{
    Dog, DogFields, HealthStatus, Inquiry, ListingStore, NewInquiry, PawmarketError, PluginAdapter,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed listing store.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
/// The database is opened on the first call to [`ListingStore::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage. Nothing is opened until `initialize`.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, PawmarketError> {
        self.db.get().ok_or_else(|| PawmarketError::Persistence {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, PawmarketError> {
        let Some(db) = self.db.get() else {
            return Ok(HealthStatus::Unhealthy("database not initialized".to_string()));
        };
        let verdict = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA quick_check", [], |row| row.get(0))
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        if verdict == "ok" {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(format!("quick_check: {verdict}")))
        }
    }

    async fn shutdown(&self) -> Result<(), PawmarketError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ListingStore for SqliteStorage {
    async fn initialize(&self) -> Result<(), PawmarketError> {
        let path = self.config.database_path.clone();
        let db = Database::open_with_options(&path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| PawmarketError::Persistence {
            source: "storage already initialized".into(),
        })?;
        info!(path = %self.config.database_path, "listing store ready");
        Ok(())
    }

    async fn close(&self) -> Result<(), PawmarketError> {
        self.db()?.checkpoint().await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn list_dogs(&self) -> Result<Vec<Dog>, PawmarketError> {
        queries::dogs::list_dogs(self.db()?).await
    }

    async fn get_dog(&self, id: &str) -> Result<Option<Dog>, PawmarketError> {
        queries::dogs::get_dog(self.db()?, id).await
    }

    async fn create_dog(
        &self,
        fields: DogFields,
        image: Option<String>,
    ) -> Result<String, PawmarketError> {
        let now = now_timestamp();
        let dog = Dog {
            id: new_id(),
            breed: fields.breed,
            age: fields.age,
            gender: fields.gender,
            price: fields.price,
            availability: fields.availability,
            description: fields.description,
            location: fields.location,
            image,
            created_at: now.clone(),
            updated_at: now,
        };
        queries::dogs::insert_dog(self.db()?, &dog).await?;
        debug!(id = %dog.id, breed = %dog.breed, "listing created");
        Ok(dog.id)
    }

    async fn update_dog(
        &self,
        id: &str,
        fields: DogFields,
        new_image: Option<String>,
    ) -> Result<(), PawmarketError> {
        let changed =
            queries::dogs::update_dog(self.db()?, id, fields, new_image, now_timestamp()).await?;
        if changed == 0 {
            return Err(PawmarketError::NotFound {
                entity: "dog",
                id: id.to_string(),
            });
        }
        debug!(id, "listing updated");
        Ok(())
    }

    async fn delete_dog(&self, id: &str) -> Result<bool, PawmarketError> {
        let removed = queries::dogs::delete_dog(self.db()?, id).await?;
        debug!(id, removed, "listing delete");
        Ok(removed > 0)
    }

    async fn create_inquiry(&self, inquiry: NewInquiry) -> Result<String, PawmarketError> {
        let record = Inquiry {
            id: new_id(),
            dog_id: inquiry.dog_id,
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            message: inquiry.message,
            created_at: now_timestamp(),
        };
        queries::inquiries::insert_inquiry(self.db()?, &record).await?;
        debug!(id = %record.id, dog_id = %record.dog_id, "inquiry recorded");
        Ok(record.id)
    }

    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, PawmarketError> {
        queries::inquiries::list_inquiries(self.db()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawmarket_core::{Availability, Gender};
    use std::time::Duration;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    async fn setup_storage() -> (SqliteStorage, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("dogs.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();
        (storage, dir)
    }

    fn beagle() -> DogFields {
        DogFields {
            breed: "Beagle".to_string(),
            age: 6,
            gender: Gender::Male,
            price: 500.0,
            availability: Availability::Available,
            description: Some("Loves walks".to_string()),
            location: "NY".to_string(),
        }
    }

    fn inquiry_for(dog_id: &str) -> NewInquiry {
        NewInquiry {
            dog_id: dog_id.to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            message: None,
        }
    }

    #[tokio::test]
    async fn sqlite_storage_implements_plugin_adapter() {
        let storage = SqliteStorage::new(make_config("unused.db"));
        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.version(), semver::Version::new(0, 1, 0));
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let (storage, _dir) = setup_storage().await;
        assert!(storage.initialize().await.is_err());
    }

    #[tokio::test]
    async fn health_check_reflects_initialization() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert!(matches!(
            storage.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
        storage.initialize().await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn operations_before_initialize_are_persistence_errors() {
        let storage = SqliteStorage::new(make_config("never-opened.db"));
        let result = storage.list_dogs().await;
        assert!(matches!(result, Err(PawmarketError::Persistence { .. })));
    }

    #[tokio::test]
    async fn created_listing_appears_in_list() {
        let (storage, _dir) = setup_storage().await;

        let id = storage
            .create_dog(beagle(), Some("aW1hZ2U=".to_string()))
            .await
            .unwrap();
        let dogs = storage.list_dogs().await.unwrap();
        assert_eq!(dogs.len(), 1);
        let dog = &dogs[0];
        assert_eq!(dog.id, id);
        assert_eq!(dog.fields(), beagle());
        assert_eq!(dog.image.as_deref(), Some("aW1hZ2U="));
        assert_eq!(dog.created_at, dog.updated_at);
    }

    #[tokio::test]
    async fn newest_listing_is_listed_first() {
        let (storage, _dir) = setup_storage().await;
        let first = storage.create_dog(beagle(), None).await.unwrap();
        let mut poodle = beagle();
        poodle.breed = "Poodle".to_string();
        let second = storage.create_dog(poodle, None).await.unwrap();

        let ids: Vec<String> = storage
            .list_dogs()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn marking_sold_bumps_updated_at() {
        let (storage, _dir) = setup_storage().await;
        let id = storage.create_dog(beagle(), Some("aW1n".into())).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let mut fields = beagle();
        fields.availability = Availability::Sold;
        storage.update_dog(&id, fields, None).await.unwrap();

        let dog = storage.get_dog(&id).await.unwrap().unwrap();
        assert_eq!(dog.availability, Availability::Sold);
        assert!(dog.updated_at > dog.created_at);
        assert_eq!(dog.image.as_deref(), Some("aW1n"), "image kept without upload");
    }

    #[tokio::test]
    async fn update_missing_listing_is_not_found() {
        let (storage, _dir) = setup_storage().await;
        let result = storage.update_dog("missing", beagle(), None).await;
        assert!(matches!(
            result,
            Err(PawmarketError::NotFound { entity: "dog", .. })
        ));
    }

    #[tokio::test]
    async fn delete_is_noop_for_missing_listing() {
        let (storage, _dir) = setup_storage().await;
        let id = storage.create_dog(beagle(), None).await.unwrap();

        assert!(storage.delete_dog(&id).await.unwrap());
        assert!(!storage.delete_dog(&id).await.unwrap());
        assert!(storage.get_dog(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inquiries_survive_listing_deletion() {
        let (storage, _dir) = setup_storage().await;
        let dog_id = storage.create_dog(beagle(), None).await.unwrap();
        let inquiry_id = storage.create_inquiry(inquiry_for(&dog_id)).await.unwrap();

        storage.delete_dog(&dog_id).await.unwrap();

        let inquiries = storage.list_inquiries().await.unwrap();
        assert_eq!(inquiries.len(), 1);
        assert_eq!(inquiries[0].id, inquiry_id);
        assert_eq!(inquiries[0].dog_id, dog_id);
        assert_eq!(inquiries[0].phone.as_deref(), Some("555-0100"));
    }

    #[tokio::test]
    async fn data_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        let path = db_path.to_str().unwrap();

        let storage = SqliteStorage::new(make_config(path));
        storage.initialize().await.unwrap();
        let id = storage.create_dog(beagle(), None).await.unwrap();
        storage.close().await.unwrap();
        drop(storage);

        let reopened = SqliteStorage::new(make_config(path));
        reopened.initialize().await.unwrap();
        assert!(reopened.get_dog(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn shutdown_runs_checkpoint() {
        let (storage, _dir) = setup_storage().await;
        storage.create_dog(beagle(), None).await.unwrap();
        storage.shutdown().await.unwrap();
    }
}
