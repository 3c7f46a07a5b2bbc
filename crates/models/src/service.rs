use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::patch::Field;
use crate::record::Record;
use crate::user::validate_name;

/// A bookable offering published by a business account: a class or session
/// with a start time, a length in minutes, and pricing in cents.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date_time: DateTimeWithTimeZone,
    /// Length of the service in minutes.
    pub length: i32,
    /// Number of users that can book the service.
    pub capacity: i32,
    /// Fee in cents for cancelling past the notice cutoff.
    pub cancel_fee: i64,
    /// Price in cents.
    pub price: i64,
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

#[derive(Debug, Clone, Deserialize)]
pub struct NewService {
    pub business_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date_time: DateTimeWithTimeZone,
    pub length: i32,
    pub capacity: i32,
    #[serde(default)]
    pub cancel_fee: i64,
    pub price: i64,
}

fn validate_durations(length: i32, capacity: i32) -> Result<(), ModelError> {
    if length <= 0 {
        return Err(ModelError::Validation("length must be positive minutes".into()));
    }
    if capacity <= 0 {
        return Err(ModelError::Validation("capacity must be positive".into()));
    }
    Ok(())
}

fn validate_amounts(cancel_fee: i64, price: i64) -> Result<(), ModelError> {
    if cancel_fee < 0 || price < 0 {
        return Err(ModelError::Validation("fees must not be negative".into()));
    }
    Ok(())
}

impl Model {
    pub fn new(input: NewService) -> Result<Model, ModelError> {
        validate_name(&input.name)?;
        validate_durations(input.length, input.capacity)?;
        validate_amounts(input.cancel_fee, input.price)?;
        let now = Utc::now().into();
        Ok(Model {
            id: Uuid::new_v4(),
            business_id: input.business_id,
            name: input.name,
            description: input.description,
            start_date_time: input.start_date_time,
            length: input.length,
            capacity: input.capacity,
            cancel_fee: input.cancel_fee,
            price: input.price,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }
}

pub fn active(m: Model) -> ActiveModel {
    ActiveModel {
        id: Set(m.id),
        business_id: Set(m.business_id),
        name: Set(m.name),
        description: Set(m.description),
        start_date_time: Set(m.start_date_time),
        length: Set(m.length),
        capacity: Set(m.capacity),
        cancel_fee: Set(m.cancel_fee),
        price: Set(m.price),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
        deleted_at: Set(m.deleted_at),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServicePatch {
    pub business_id: Field<Uuid>,
    pub name: Field<String>,
    pub description: Field<String>,
    pub start_date_time: Field<DateTimeWithTimeZone>,
    pub length: Field<i32>,
    pub capacity: Field<i32>,
    pub cancel_fee: Field<i64>,
    pub price: Field<i64>,
}

impl Record for Model {
    type Patch = ServicePatch;

    const KIND: &'static str = "service";

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

    fn apply(&mut self, patch: ServicePatch) -> Result<(), ModelError> {
        match patch.business_id {
            Field::Set(id) => self.business_id = id,
            Field::Null => {
                return Err(ModelError::Validation("business_id cannot be cleared".into()))
            }
            Field::Absent => {}
        }
        match patch.name {
            Field::Set(name) => {
                validate_name(&name)?;
                self.name = name;
            }
            Field::Null => self.name.clear(),
            Field::Absent => {}
        }
        match patch.description {
            Field::Set(desc) => self.description = desc,
            Field::Null => self.description.clear(),
            Field::Absent => {}
        }
        match patch.start_date_time {
            Field::Set(at) => self.start_date_time = at,
            Field::Null => {
                return Err(ModelError::Validation("start_date_time cannot be cleared".into()))
            }
            Field::Absent => {}
        }
        match patch.length {
            Field::Set(length) => self.length = length,
            Field::Null => return Err(ModelError::Validation("length cannot be cleared".into())),
            Field::Absent => {}
        }
        match patch.capacity {
            Field::Set(capacity) => self.capacity = capacity,
            Field::Null => return Err(ModelError::Validation("capacity cannot be cleared".into())),
            Field::Absent => {}
        }
        match patch.cancel_fee {
            Field::Set(fee) => self.cancel_fee = fee,
            Field::Null => self.cancel_fee = 0,
            Field::Absent => {}
        }
        match patch.price {
            Field::Set(price) => self.price = price,
            Field::Null => self.price = 0,
            Field::Absent => {}
        }
        validate_durations(self.length, self.capacity)?;
        validate_amounts(self.cancel_fee, self.price)
    }
}
