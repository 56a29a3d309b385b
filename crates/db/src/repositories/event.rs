use crate::models::DbScheduledEvent;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_scheduled_event(
    pool: &Pool<Postgres>,
    technician_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    kind: &str,
    location: &str,
) -> Result<DbScheduledEvent> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating scheduled event: id={}, technician={}, date={}, kind={}",
        id,
        technician_id,
        date,
        kind
    );

    let event = sqlx::query_as::<_, DbScheduledEvent>(
        r#"
        INSERT INTO scheduled_events (id, technician_id, date, start_time, end_time, kind, location, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, technician_id, date, start_time, end_time, kind, location, created_at
        "#,
    )
    .bind(id)
    .bind(technician_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(kind)
    .bind(location)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(event)
}

pub async fn get_events_by_technician_id(
    pool: &Pool<Postgres>,
    technician_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DbScheduledEvent>> {
    let events = sqlx::query_as::<_, DbScheduledEvent>(
        r#"
        SELECT id, technician_id, date, start_time, end_time, kind, location, created_at
        FROM scheduled_events
        WHERE technician_id = $1 AND date BETWEEN $2 AND $3
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(technician_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(events)
}
