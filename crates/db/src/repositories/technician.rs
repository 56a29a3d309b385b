use crate::models::DbTechnician;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_technician(
    pool: &Pool<Postgres>,
    name: &str,
    specialty: Option<&str>,
) -> Result<DbTechnician> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating technician: id={}, name={}", id, name);

    let technician = sqlx::query_as::<_, DbTechnician>(
        r#"
        INSERT INTO technicians (id, name, specialty, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, specialty, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(specialty)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(technician)
}

pub async fn get_technician_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTechnician>> {
    let technician = sqlx::query_as::<_, DbTechnician>(
        r#"
        SELECT id, name, specialty, created_at
        FROM technicians
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(technician)
}

pub async fn list_technicians(pool: &Pool<Postgres>) -> Result<Vec<DbTechnician>> {
    let technicians = sqlx::query_as::<_, DbTechnician>(
        r#"
        SELECT id, name, specialty, created_at
        FROM technicians
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(technicians)
}
