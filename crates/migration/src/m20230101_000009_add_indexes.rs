use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Service: index on owning business
        manager
            .create_index(
                Index::create()
                    .name("idx_service_business")
                    .table(Service::Table)
                    .col(Service::BusinessId)
                    .to_owned(),
            )
            .await?;

        // Appointment: lookups by user and by service
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_user")
                    .table(Appointment::Table)
                    .col(Appointment::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_service")
                    .table(Appointment::Table)
                    .col(Appointment::ServiceId)
                    .to_owned(),
            )
            .await?;

        // Invoice: lookup by appointment
        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_appointment")
                    .table(Invoice::Table)
                    .col(Invoice::AppointmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_business").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_appointment_user").table(Appointment::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_appointment_service").table(Appointment::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_invoice_appointment").table(Invoice::Table).to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Service {
    Table,
    BusinessId,
}

#[derive(DeriveIden)]
enum Appointment {
    Table,
    UserId,
    ServiceId,
}

#[derive(DeriveIden)]
enum Invoice {
    Table,
    AppointmentId,
}
