use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::patch::Field;
use crate::record::Record;

/// Account classification. Business accounts own services; individual
/// accounts book appointments against them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[sea_orm(string_value = "individual")]
    Individual,
    #[sea_orm(string_value = "business")]
    Business,
    #[sea_orm(string_value = "system")]
    System,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    /// Argon2 hash; the plaintext never reaches the store and the hash is
    /// never serialized into a response.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub account_type: AccountType,
    pub first_name: String,
    pub last_name: String,
    pub business_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("no relations defined here")
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

/// Registration fields, minus the credential material which the auth
/// workflow hashes before the record is built.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub account_type: AccountType,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub business_id: Option<Uuid>,
}

impl Model {
    pub fn new(input: NewUser, password_hash: String) -> Result<Model, ModelError> {
        validate_email(&input.email)?;
        validate_name(&input.first_name)?;
        validate_name(&input.last_name)?;
        if password_hash.trim().is_empty() {
            return Err(ModelError::Validation("password hash required".into()));
        }
        let now = Utc::now().into();
        Ok(Model {
            id: Uuid::new_v4(),
            email: input.email,
            password_hash,
            account_type: input.account_type,
            first_name: input.first_name,
            last_name: input.last_name,
            business_id: input.business_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }
}

/// Fully-set active model for insert/update of a complete record.
pub fn active(m: Model) -> ActiveModel {
    ActiveModel {
        id: Set(m.id),
        email: Set(m.email),
        password_hash: Set(m.password_hash),
        account_type: Set(m.account_type),
        first_name: Set(m.first_name),
        last_name: Set(m.last_name),
        business_id: Set(m.business_id),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
        deleted_at: Set(m.deleted_at),
    }
}

/// Partial update. Absent keys leave fields untouched; the password hash is
/// deliberately not patchable through this path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserPatch {
    pub email: Field<String>,
    pub account_type: Field<AccountType>,
    pub first_name: Field<String>,
    pub last_name: Field<String>,
    pub business_id: Field<Uuid>,
}

impl Record for Model {
    type Patch = UserPatch;

    const KIND: &'static str = "user";

    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<DateTimeWithTimeZone> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTimeWithTimeZone) {
        self.deleted_at = Some(at);
        self.updated_at = at;
    }

    fn touch(&mut self, at: DateTimeWithTimeZone) {
        self.updated_at = at;
    }

    fn apply(&mut self, patch: UserPatch) -> Result<(), ModelError> {
        match patch.email {
            Field::Set(email) => {
                validate_email(&email)?;
                self.email = email;
            }
            Field::Null => return Err(ModelError::Validation("email cannot be cleared".into())),
            Field::Absent => {}
        }
        match patch.account_type {
            Field::Set(kind) => self.account_type = kind,
            Field::Null => {
                return Err(ModelError::Validation("account_type cannot be cleared".into()))
            }
            Field::Absent => {}
        }
        match patch.first_name {
            Field::Set(name) => {
                validate_name(&name)?;
                self.first_name = name;
            }
            Field::Null => self.first_name.clear(),
            Field::Absent => {}
        }
        match patch.last_name {
            Field::Set(name) => {
                validate_name(&name)?;
                self.last_name = name;
            }
            Field::Null => self.last_name.clear(),
            Field::Absent => {}
        }
        match patch.business_id {
            Field::Set(id) => self.business_id = Some(id),
            Field::Null => self.business_id = None,
            Field::Absent => {}
        }
        Ok(())
    }
}
