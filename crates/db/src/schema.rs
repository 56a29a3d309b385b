use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create technicians table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS technicians (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            specialty VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availability_days table. One row per open day; the check
    // constraint mirrors the model invariant that a stored day has at
    // least one open slot.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_days (
            technician_id UUID NOT NULL REFERENCES technicians(id),
            date DATE NOT NULL,
            morning BOOLEAN NOT NULL DEFAULT FALSE,
            afternoon BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (technician_id, date),
            CONSTRAINT at_least_one_slot CHECK (morning OR afternoon)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create scheduled_events table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS scheduled_events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            technician_id UUID NOT NULL REFERENCES technicians(id),
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            kind VARCHAR(32) NOT NULL,
            location VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create notifications table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            technician_id UUID NOT NULL REFERENCES technicians(id),
            body TEXT NOT NULL,
            is_read BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_availability_days_technician_id ON availability_days(technician_id);",
        "CREATE INDEX IF NOT EXISTS idx_availability_days_date ON availability_days(date);",
        "CREATE INDEX IF NOT EXISTS idx_scheduled_events_technician_id ON scheduled_events(technician_id);",
        "CREATE INDEX IF NOT EXISTS idx_scheduled_events_date ON scheduled_events(date);",
        "CREATE INDEX IF NOT EXISTS idx_notifications_technician_id ON notifications(technician_id);",
        "CREATE INDEX IF NOT EXISTS idx_notifications_unread ON notifications(technician_id, is_read);",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
