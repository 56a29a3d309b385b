use crate::models::DbNotification;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_notification(
    pool: &Pool<Postgres>,
    technician_id: Uuid,
    body: &str,
) -> Result<DbNotification> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications (id, technician_id, body, is_read, created_at)
        VALUES ($1, $2, $3, FALSE, $4)
        RETURNING id, technician_id, body, is_read, created_at
        "#,
    )
    .bind(id)
    .bind(technician_id)
    .bind(body)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(notification)
}

pub async fn get_notifications_by_technician_id(
    pool: &Pool<Postgres>,
    technician_id: Uuid,
    unread_only: bool,
) -> Result<Vec<DbNotification>> {
    let notifications = if unread_only {
        sqlx::query_as::<_, DbNotification>(
            r#"
            SELECT id, technician_id, body, is_read, created_at
            FROM notifications
            WHERE technician_id = $1 AND is_read = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(technician_id)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, DbNotification>(
            r#"
            SELECT id, technician_id, body, is_read, created_at
            FROM notifications
            WHERE technician_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(technician_id)
        .fetch_all(pool)
        .await?
    };

    Ok(notifications)
}

pub async fn mark_notification_read(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbNotification>> {
    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        UPDATE notifications
        SET is_read = TRUE
        WHERE id = $1
        RETURNING id, technician_id, body, is_read, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(notification)
}
