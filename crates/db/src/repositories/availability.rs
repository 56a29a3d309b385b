use crate::models::DbAvailabilityDay;
use chrono::Utc;
use eyre::Result;
use fieldsync_core::models::availability::AvailabilityDay;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_availability_by_technician_id(
    pool: &Pool<Postgres>,
    technician_id: Uuid,
) -> Result<Vec<DbAvailabilityDay>> {
    tracing::debug!("Loading availability for technician {}", technician_id);

    let days = sqlx::query_as::<_, DbAvailabilityDay>(
        r#"
        SELECT technician_id, date, morning, afternoon, created_at
        FROM availability_days
        WHERE technician_id = $1
        ORDER BY date ASC
        "#,
    )
    .bind(technician_id)
    .fetch_all(pool)
    .await?;

    Ok(days)
}

/// Whole-set replace: delete every stored day for the technician and insert
/// the new ones inside a single transaction. A failed round trip rolls back
/// and leaves the previous rows fully intact; old and new records never
/// interleave.
pub async fn replace_availability(
    pool: &Pool<Postgres>,
    technician_id: Uuid,
    days: &[AvailabilityDay],
) -> Result<()> {
    tracing::debug!(
        "Replacing availability for technician {}: {} day(s)",
        technician_id,
        days.len()
    );

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        DELETE FROM availability_days
        WHERE technician_id = $1
        "#,
    )
    .bind(technician_id)
    .execute(&mut *tx)
    .await?;

    let now = Utc::now();
    for day in days {
        sqlx::query(
            r#"
            INSERT INTO availability_days (technician_id, date, morning, afternoon, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(technician_id)
        .bind(day.date)
        .bind(day.slots.morning)
        .bind(day.slots.afternoon)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
