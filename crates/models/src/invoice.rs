use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::appointment;
use crate::errors::ModelError;
use crate::patch::Field;
use crate::record::Record;

/// Derived from the remaining balance, never client-settable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum InvoiceStatus {
    #[sea_orm(string_value = "Unpaid")]
    Unpaid,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "Overpaid")]
    Overpaid,
}

impl InvoiceStatus {
    pub fn for_balance(remaining_balance: i64) -> InvoiceStatus {
        if remaining_balance > 0 {
            InvoiceStatus::Unpaid
        } else if remaining_balance == 0 {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Overpaid
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub appointment_id: Uuid,
    /// Total original balance in cents.
    pub original_balance: i64,
    /// Remaining balance in cents; may go negative on overpayment.
    pub remaining_balance: i64,
    pub status: InvoiceStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Appointment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Appointment => Entity::belongs_to(appointment::Entity)
                .from(Column::AppointmentId)
                .to(appointment::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub appointment_id: Uuid,
    pub original_balance: i64,
    pub remaining_balance: i64,
}

impl Model {
    pub fn new(input: NewInvoice) -> Result<Model, ModelError> {
        if input.original_balance < 0 {
            return Err(ModelError::Validation("original_balance must not be negative".into()));
        }
        let now = Utc::now().into();
        Ok(Model {
            id: Uuid::new_v4(),
            appointment_id: input.appointment_id,
            original_balance: input.original_balance,
            remaining_balance: input.remaining_balance,
            status: InvoiceStatus::for_balance(input.remaining_balance),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }
}

pub fn active(m: Model) -> ActiveModel {
    ActiveModel {
        id: Set(m.id),
        appointment_id: Set(m.appointment_id),
        original_balance: Set(m.original_balance),
        remaining_balance: Set(m.remaining_balance),
        status: Set(m.status),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
        deleted_at: Set(m.deleted_at),
    }
}

/// Partial update. `status` is intentionally absent: patching a balance
/// recomputes it, and an explicit `status` key is rejected at decode time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvoicePatch {
    pub original_balance: Field<i64>,
    pub remaining_balance: Field<i64>,
}

impl Record for Model {
    type Patch = InvoicePatch;

    const KIND: &'static str = "invoice";

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

    fn apply(&mut self, patch: InvoicePatch) -> Result<(), ModelError> {
        match patch.original_balance {
            Field::Set(balance) => {
                if balance < 0 {
                    return Err(ModelError::Validation(
                        "original_balance must not be negative".into(),
                    ));
                }
                self.original_balance = balance;
            }
            Field::Null => {
                return Err(ModelError::Validation("original_balance cannot be cleared".into()))
            }
            Field::Absent => {}
        }
        match patch.remaining_balance {
            Field::Set(balance) => self.remaining_balance = balance,
            Field::Null => self.remaining_balance = 0,
            Field::Absent => {}
        }
        self.status = InvoiceStatus::for_balance(self.remaining_balance);
        Ok(())
    }
}
