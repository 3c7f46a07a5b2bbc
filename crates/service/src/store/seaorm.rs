//! SeaORM-backed store implementations, one impl block per entity.

use async_trait::async_trait;
use chrono::Utc;
use models::record::Record;
use models::{appointment, invoice, service as service_record, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::RecordStore;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::errors::ServiceError;

pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> ServiceError {
    let msg = e.to_string();
    if msg.contains("duplicate key") || msg.contains("UNIQUE constraint") {
        ServiceError::Conflict("record violates a unique constraint".into())
    } else {
        ServiceError::Db(msg)
    }
}

fn map_update_err(kind: &str, e: DbErr) -> ServiceError {
    if matches!(e, DbErr::RecordNotUpdated) {
        ServiceError::not_found(kind)
    } else {
        map_db_err(e)
    }
}

#[async_trait]
impl RecordStore<user::Model> for SeaOrmStore {
    async fn get(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find_by_id(id).one(&self.db).await.map_err(map_db_err)
    }

    async fn create(&self, record: user::Model) -> Result<user::Model, ServiceError> {
        user::active(record).insert(&self.db).await.map_err(map_db_err)
    }

    async fn update(&self, record: user::Model) -> Result<user::Model, ServiceError> {
        user::active(record)
            .update(&self.db)
            .await
            .map_err(|e| map_update_err(user::Model::KIND, e))
    }

    async fn delete(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        let mut found = <Self as RecordStore<user::Model>>::get(self, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(user::Model::KIND))?;
        found.mark_deleted(Utc::now().into());
        user::active(found).update(&self.db).await.map_err(map_db_err)
    }

    async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl RecordStore<service_record::Model> for SeaOrmStore {
    async fn get(&self, id: Uuid) -> Result<Option<service_record::Model>, ServiceError> {
        service_record::Entity::find_by_id(id).one(&self.db).await.map_err(map_db_err)
    }

    async fn create(
        &self,
        record: service_record::Model,
    ) -> Result<service_record::Model, ServiceError> {
        service_record::active(record).insert(&self.db).await.map_err(map_db_err)
    }

    async fn update(
        &self,
        record: service_record::Model,
    ) -> Result<service_record::Model, ServiceError> {
        service_record::active(record)
            .update(&self.db)
            .await
            .map_err(|e| map_update_err(service_record::Model::KIND, e))
    }

    async fn delete(&self, id: Uuid) -> Result<service_record::Model, ServiceError> {
        let mut found = <Self as RecordStore<service_record::Model>>::get(self, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(service_record::Model::KIND))?;
        found.mark_deleted(Utc::now().into());
        service_record::active(found).update(&self.db).await.map_err(map_db_err)
    }

    async fn list(&self) -> Result<Vec<service_record::Model>, ServiceError> {
        service_record::Entity::find()
            .filter(service_record::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl RecordStore<appointment::Model> for SeaOrmStore {
    async fn get(&self, id: Uuid) -> Result<Option<appointment::Model>, ServiceError> {
        appointment::Entity::find_by_id(id).one(&self.db).await.map_err(map_db_err)
    }

    async fn create(
        &self,
        record: appointment::Model,
    ) -> Result<appointment::Model, ServiceError> {
        appointment::active(record).insert(&self.db).await.map_err(map_db_err)
    }

    async fn update(
        &self,
        record: appointment::Model,
    ) -> Result<appointment::Model, ServiceError> {
        appointment::active(record)
            .update(&self.db)
            .await
            .map_err(|e| map_update_err(appointment::Model::KIND, e))
    }

    async fn delete(&self, id: Uuid) -> Result<appointment::Model, ServiceError> {
        let mut found = <Self as RecordStore<appointment::Model>>::get(self, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(appointment::Model::KIND))?;
        found.mark_deleted(Utc::now().into());
        appointment::active(found).update(&self.db).await.map_err(map_db_err)
    }

    async fn list(&self) -> Result<Vec<appointment::Model>, ServiceError> {
        appointment::Entity::find()
            .filter(appointment::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl RecordStore<invoice::Model> for SeaOrmStore {
    async fn get(&self, id: Uuid) -> Result<Option<invoice::Model>, ServiceError> {
        invoice::Entity::find_by_id(id).one(&self.db).await.map_err(map_db_err)
    }

    async fn create(&self, record: invoice::Model) -> Result<invoice::Model, ServiceError> {
        invoice::active(record).insert(&self.db).await.map_err(map_db_err)
    }

    async fn update(&self, record: invoice::Model) -> Result<invoice::Model, ServiceError> {
        invoice::active(record)
            .update(&self.db)
            .await
            .map_err(|e| map_update_err(invoice::Model::KIND, e))
    }

    async fn delete(&self, id: Uuid) -> Result<invoice::Model, ServiceError> {
        let mut found = <Self as RecordStore<invoice::Model>>::get(self, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(invoice::Model::KIND))?;
        found.mark_deleted(Utc::now().into());
        invoice::active(found).update(&self.db).await.map_err(map_db_err)
    }

    async fn list(&self) -> Result<Vec<invoice::Model>, ServiceError> {
        invoice::Entity::find()
            .filter(invoice::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl AuthRepository for SeaOrmStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }

    async fn insert_user(&self, user: user::Model) -> Result<user::Model, AuthError> {
        user::active(user).insert(&self.db).await.map_err(|e| match map_db_err(e) {
            ServiceError::Conflict(_) => AuthError::Conflict,
            other => AuthError::Repository(other.to_string()),
        })
    }
}
