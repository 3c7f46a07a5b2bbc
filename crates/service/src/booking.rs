//! Cross-entity booking queries: a user's appointments and the services
//! they are booked against.

use models::{appointment, service as service_record};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::store::RecordStore;

/// An appointment joined with the service it books.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceAppointment {
    pub appointment: appointment::Model,
    pub service: service_record::Model,
}

pub async fn appointments_for_user(
    appointments: &dyn RecordStore<appointment::Model>,
    user_id: Uuid,
) -> Result<Vec<appointment::Model>, ServiceError> {
    let all = appointments.list().await?;
    Ok(all.into_iter().filter(|a| a.user_id == user_id).collect())
}

pub async fn service_appointments_for_user(
    appointments: &dyn RecordStore<appointment::Model>,
    services: &dyn RecordStore<service_record::Model>,
    user_id: Uuid,
) -> Result<Vec<ServiceAppointment>, ServiceError> {
    let booked = appointments_for_user(appointments, user_id).await?;
    let mut joined = Vec::with_capacity(booked.len());
    for appointment in booked {
        let service = services.get(appointment.service_id).await?.ok_or_else(|| {
            ServiceError::Db(format!(
                "service {} referenced by appointment {} is missing",
                appointment.service_id, appointment.id
            ))
        })?;
        joined.push(ServiceAppointment { appointment, service });
    }
    Ok(joined)
}

pub async fn has_service_appointment(
    appointments: &dyn RecordStore<appointment::Model>,
    user_id: Uuid,
    service_id: Uuid,
) -> Result<bool, ServiceError> {
    let booked = appointments_for_user(appointments, user_id).await?;
    Ok(booked.iter().any(|a| a.service_id == service_id))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use models::appointment::NewAppointment;
    use models::service::NewService;

    use super::*;
    use crate::lifecycle;
    use crate::store::memory::MemoryStore;

    fn sample_service(business_id: Uuid) -> service_record::Model {
        service_record::Model::new(NewService {
            business_id,
            name: "Yoga class".into(),
            description: "30 minute beginner yoga class".into(),
            start_date_time: Utc::now().into(),
            length: 30,
            capacity: 20,
            cancel_fee: 0,
            price: 2000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn joins_appointments_with_their_services() {
        let services = MemoryStore::<service_record::Model>::default();
        let appointments = MemoryStore::<appointment::Model>::default();
        let user_id = Uuid::new_v4();

        let svc = lifecycle::create(&services, sample_service(Uuid::new_v4())).await.unwrap();
        lifecycle::create(
            &appointments,
            appointment::Model::new(NewAppointment { service_id: svc.id, user_id }),
        )
        .await
        .unwrap();
        // A booking by someone else must not show up.
        lifecycle::create(
            &appointments,
            appointment::Model::new(NewAppointment {
                service_id: svc.id,
                user_id: Uuid::new_v4(),
            }),
        )
        .await
        .unwrap();

        let joined =
            service_appointments_for_user(&appointments, &services, user_id).await.unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].service.id, svc.id);
        assert_eq!(joined[0].appointment.user_id, user_id);
    }

    #[tokio::test]
    async fn has_service_appointment_checks_membership() {
        let appointments = MemoryStore::<appointment::Model>::default();
        let user_id = Uuid::new_v4();
        let service_id = Uuid::new_v4();

        assert!(!has_service_appointment(&appointments, user_id, service_id).await.unwrap());

        lifecycle::create(
            &appointments,
            appointment::Model::new(NewAppointment { service_id, user_id }),
        )
        .await
        .unwrap();

        assert!(has_service_appointment(&appointments, user_id, service_id).await.unwrap());
        assert!(!has_service_appointment(&appointments, user_id, Uuid::new_v4()).await.unwrap());
    }
}
