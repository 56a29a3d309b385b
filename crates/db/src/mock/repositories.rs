use chrono::{NaiveDate, NaiveTime};
use fieldsync_core::models::availability::AvailabilityDay;
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAvailabilityDay, DbNotification, DbScheduledEvent, DbTechnician};

// Mock repositories for testing
mock! {
    pub TechnicianRepo {
        pub async fn create_technician(
            &self,
            name: &'static str,
            specialty: Option<&'static str>,
        ) -> eyre::Result<DbTechnician>;

        pub async fn get_technician_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbTechnician>>;

        pub async fn list_technicians(&self) -> eyre::Result<Vec<DbTechnician>>;
    }
}

mock! {
    pub AvailabilityRepo {
        pub async fn get_availability_by_technician_id(
            &self,
            technician_id: Uuid,
        ) -> eyre::Result<Vec<DbAvailabilityDay>>;

        pub async fn replace_availability(
            &self,
            technician_id: Uuid,
            days: Vec<AvailabilityDay>,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub ScheduledEventRepo {
        pub async fn create_scheduled_event(
            &self,
            technician_id: Uuid,
            date: NaiveDate,
            start_time: NaiveTime,
            end_time: NaiveTime,
            kind: &'static str,
            location: &'static str,
        ) -> eyre::Result<DbScheduledEvent>;

        pub async fn get_events_by_technician_id(
            &self,
            technician_id: Uuid,
            start: NaiveDate,
            end: NaiveDate,
        ) -> eyre::Result<Vec<DbScheduledEvent>>;
    }
}

mock! {
    pub NotificationRepo {
        pub async fn create_notification(
            &self,
            technician_id: Uuid,
            body: &'static str,
        ) -> eyre::Result<DbNotification>;

        pub async fn get_notifications_by_technician_id(
            &self,
            technician_id: Uuid,
            unread_only: bool,
        ) -> eyre::Result<Vec<DbNotification>>;

        pub async fn mark_notification_read(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbNotification>>;
    }
}
