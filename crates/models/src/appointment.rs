use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::patch::Field;
use crate::record::Record;
use crate::{service, user};

/// A booking of one user against one service. Invariant: an active
/// appointment has no cancellation timestamp; cancelling flips `active` and
/// stamps `cancel_date_time` together.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: Uuid,
    pub user_id: Uuid,
    pub cancel_date_time: Option<DateTimeWithTimeZone>,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Service,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::belongs_to(service::Entity)
                .from(Column::ServiceId)
                .to(service::Column::Id)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointment {
    pub service_id: Uuid,
    pub user_id: Uuid,
}

impl Model {
    /// New bookings start active with no cancellation timestamp.
    pub fn new(input: NewAppointment) -> Model {
        let now = Utc::now().into();
        Model {
            id: Uuid::new_v4(),
            service_id: input.service_id,
            user_id: input.user_id,
            cancel_date_time: None,
            active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

pub fn active(m: Model) -> ActiveModel {
    ActiveModel {
        id: Set(m.id),
        service_id: Set(m.service_id),
        user_id: Set(m.user_id),
        cancel_date_time: Set(m.cancel_date_time),
        active: Set(m.active),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
        deleted_at: Set(m.deleted_at),
    }
}

/// Partial update. The service/user references are fixed at booking time and
/// are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppointmentPatch {
    pub active: Field<bool>,
    pub cancel_date_time: Field<DateTimeWithTimeZone>,
}

impl Record for Model {
    type Patch = AppointmentPatch;

    const KIND: &'static str = "appointment";

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

    fn apply(&mut self, patch: AppointmentPatch) -> Result<(), ModelError> {
        match patch.active {
            Field::Set(active) => self.active = active,
            Field::Null => return Err(ModelError::Validation("active cannot be null".into())),
            Field::Absent => {}
        }
        match patch.cancel_date_time {
            Field::Set(at) => self.cancel_date_time = Some(at),
            Field::Null => self.cancel_date_time = None,
            Field::Absent => {}
        }
        // Re-establish the pairing invariant after the merge.
        if self.active {
            self.cancel_date_time = None;
        } else if self.cancel_date_time.is_none() {
            self.cancel_date_time = Some(Utc::now().into());
        }
        Ok(())
    }
}
