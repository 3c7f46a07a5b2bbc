//! In-memory store for tests and doc examples.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use models::record::Record;
use models::user;
use uuid::Uuid;

use super::RecordStore;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;

pub struct MemoryStore<R: Record> {
    records: Mutex<HashMap<Uuid, R>>,
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self { records: Mutex::new(HashMap::new()) }
    }
}

impl<R: Record> MemoryStore<R> {
    fn with_records<T>(
        &self,
        f: impl FnOnce(&mut HashMap<Uuid, R>) -> T,
    ) -> Result<T, ServiceError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| ServiceError::Db("store mutex poisoned".into()))?;
        Ok(f(&mut records))
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn get(&self, id: Uuid) -> Result<Option<R>, ServiceError> {
        self.with_records(|records| records.get(&id).cloned())
    }

    async fn create(&self, record: R) -> Result<R, ServiceError> {
        self.with_records(|records| {
            if records.contains_key(&record.id()) {
                return Err(ServiceError::Conflict(format!("{} already exists", R::KIND)));
            }
            records.insert(record.id(), record.clone());
            Ok(record)
        })?
    }

    async fn update(&self, record: R) -> Result<R, ServiceError> {
        self.with_records(|records| {
            if !records.contains_key(&record.id()) {
                return Err(ServiceError::not_found(R::KIND));
            }
            records.insert(record.id(), record.clone());
            Ok(record)
        })?
    }

    async fn delete(&self, id: Uuid) -> Result<R, ServiceError> {
        self.with_records(|records| {
            let record = records.get_mut(&id).ok_or_else(|| ServiceError::not_found(R::KIND))?;
            record.mark_deleted(Utc::now().into());
            Ok(record.clone())
        })?
    }

    async fn list(&self) -> Result<Vec<R>, ServiceError> {
        self.with_records(|records| {
            records.values().filter(|r| r.deleted_at().is_none()).cloned().collect()
        })
    }
}

#[async_trait]
impl AuthRepository for MemoryStore<user::Model> {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError> {
        self.with_records(|records| {
            records
                .values()
                .find(|u| u.deleted_at.is_none() && u.email == email)
                .cloned()
        })
        .map_err(|e| AuthError::Repository(e.to_string()))
    }

    async fn insert_user(&self, user: user::Model) -> Result<user::Model, AuthError> {
        self.with_records(|records| {
            let duplicate =
                records.values().any(|u| u.deleted_at.is_none() && u.email == user.email);
            if duplicate {
                return Err(AuthError::Conflict);
            }
            records.insert(user.id, user.clone());
            Ok(user)
        })
        .map_err(|e| AuthError::Repository(e.to_string()))?
    }
}
