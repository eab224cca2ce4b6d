// file: src/database/tracks.rs
use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::Track;

pub async fn insert(pool: &SqlitePool, track: &Track) -> Result<()> {
    sqlx::query("INSERT INTO tracks (id, event_id, name, position) VALUES (?, ?, ?, ?)")
        .bind(&track.id)
        .bind(&track.event_id)
        .bind(&track.name)
        .bind(track.position)
        .execute(pool)
        .await?;

    Ok(())
}

/// Tracks of an event in grid column order.
pub async fn list(pool: &SqlitePool, event_id: &str) -> Result<Vec<Track>> {
    let tracks = sqlx::query_as::<_, Track>(
        "SELECT id, event_id, name, position FROM tracks WHERE event_id = ? ORDER BY position ASC, id ASC",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(tracks)
}
