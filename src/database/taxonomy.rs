// file: src/database/taxonomy.rs
use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::{Category, Format};

pub async fn insert_category(pool: &SqlitePool, category: &Category) -> Result<()> {
    sqlx::query("INSERT INTO categories (id, event_id, name, color) VALUES (?, ?, ?, ?)")
        .bind(&category.id)
        .bind(&category.event_id)
        .bind(&category.name)
        .bind(&category.color)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_categories(pool: &SqlitePool, event_id: &str) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, event_id, name, color FROM categories WHERE event_id = ? ORDER BY name ASC",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

pub async fn insert_format(pool: &SqlitePool, format: &Format) -> Result<()> {
    sqlx::query("INSERT INTO formats (id, event_id, name, duration_minutes) VALUES (?, ?, ?, ?)")
        .bind(&format.id)
        .bind(&format.event_id)
        .bind(&format.name)
        .bind(format.duration_minutes)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn list_formats(pool: &SqlitePool, event_id: &str) -> Result<Vec<Format>> {
    let formats = sqlx::query_as::<_, Format>(
        "SELECT id, event_id, name, duration_minutes FROM formats WHERE event_id = ? ORDER BY name ASC",
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(formats)
}
