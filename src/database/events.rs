// file: src/database/events.rs
use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::Event;

pub async fn insert(pool: &SqlitePool, event: &Event) -> Result<()> {
    sqlx::query(
        "INSERT INTO events (id, name, timezone, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&event.id)
    .bind(&event.name)
    .bind(&event.timezone)
    .bind(event.created_at)
    .bind(event.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get(pool: &SqlitePool, event_id: &str) -> Result<Option<Event>> {
    let event = sqlx::query_as::<_, Event>(
        "SELECT id, name, timezone, created_at, updated_at FROM events WHERE id = ?",
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?;

    Ok(event)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>(
        "SELECT id, name, timezone, created_at, updated_at FROM events ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(events)
}

pub async fn delete(pool: &SqlitePool, event_id: &str) -> Result<()> {
    sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(event_id)
        .execute(pool)
        .await?;

    Ok(())
}
