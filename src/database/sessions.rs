// file: src/database/sessions.rs
use anyhow::Result;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::batch::{BatchField, BatchUpdate};
use crate::models::{Session, SessionRow, TeasingStatus};

const SESSION_COLUMNS: &str = r#"
    id, event_id, title, abstract_text, start_time, end_time, track_id,
    category_id, format_id, speakers, teased_twitter, teased_linkedin,
    teased_bluesky, teaser_text, teaser_video_url, extend_width, extend_height,
    created_at, updated_at
"#;

pub async fn list(pool: &SqlitePool, event_id: &str) -> Result<Vec<Session>> {
    let rows = sqlx::query_as::<_, SessionRow>(&format!(
        "SELECT {} FROM sessions WHERE event_id = ? ORDER BY start_time IS NULL, start_time ASC, title ASC",
        SESSION_COLUMNS
    ))
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Session::from).collect())
}

pub async fn get(pool: &SqlitePool, session_id: &str) -> Result<Option<Session>> {
    let row = sqlx::query_as::<_, SessionRow>(&format!(
        "SELECT {} FROM sessions WHERE id = ?",
        SESSION_COLUMNS
    ))
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Session::from))
}

/// Inserts the session or replaces every field of an existing one.
pub async fn upsert(pool: &SqlitePool, session: &Session) -> Result<()> {
    let row = session.to_row();
    sqlx::query(&format!(
        r#"
        INSERT INTO sessions ({})
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            abstract_text = excluded.abstract_text,
            start_time = excluded.start_time,
            end_time = excluded.end_time,
            track_id = excluded.track_id,
            category_id = excluded.category_id,
            format_id = excluded.format_id,
            speakers = excluded.speakers,
            teased_twitter = excluded.teased_twitter,
            teased_linkedin = excluded.teased_linkedin,
            teased_bluesky = excluded.teased_bluesky,
            teaser_text = excluded.teaser_text,
            teaser_video_url = excluded.teaser_video_url,
            extend_width = excluded.extend_width,
            extend_height = excluded.extend_height,
            updated_at = excluded.updated_at
        "#,
        SESSION_COLUMNS
    ))
    .bind(&row.id)
    .bind(&row.event_id)
    .bind(&row.title)
    .bind(&row.abstract_text)
    .bind(&row.start_time)
    .bind(&row.end_time)
    .bind(&row.track_id)
    .bind(&row.category_id)
    .bind(&row.format_id)
    .bind(&row.speakers)
    .bind(row.teased_twitter)
    .bind(row.teased_linkedin)
    .bind(row.teased_bluesky)
    .bind(&row.teaser_text)
    .bind(&row.teaser_video_url)
    .bind(row.extend_width)
    .bind(row.extend_height)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Writes every field of `update` to the selected sessions of one event in a
/// single statement. Ids belonging to another event are left alone.
pub async fn batch_update(
    pool: &SqlitePool,
    event_id: &str,
    session_ids: &[String],
    update: &BatchUpdate,
) -> Result<u64> {
    if session_ids.is_empty() || update.is_empty() {
        return Ok(0);
    }

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE sessions SET ");
    {
        let mut set = query.separated(", ");
        for field in update.fields() {
            match field {
                BatchField::Category(value) => {
                    set.push("category_id = ").push_bind_unseparated(value.clone());
                }
                BatchField::Format(value) => {
                    set.push("format_id = ").push_bind_unseparated(value.clone());
                }
                BatchField::Track(value) => {
                    set.push("track_id = ").push_bind_unseparated(value.clone());
                }
                BatchField::ExtendWidth(value) => {
                    set.push("extend_width = ").push_bind_unseparated(value.map(i64::from));
                }
                BatchField::ExtendHeight(value) => {
                    set.push("extend_height = ").push_bind_unseparated(value.map(i64::from));
                }
                BatchField::ResetTeasing => {
                    set.push("teased_twitter = 0");
                    set.push("teased_linkedin = 0");
                    set.push("teased_bluesky = 0");
                }
            }
        }
        set.push("updated_at = ").push_bind_unseparated(Utc::now());
    }

    query.push(" WHERE event_id = ").push_bind(event_id.to_string());
    query.push(" AND id IN (");
    {
        let mut ids = query.separated(", ");
        for id in session_ids {
            ids.push_bind(id.clone());
        }
    }
    query.push(")");

    let result = query.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Returns the number of rows written, 0 when the session is gone.
pub async fn set_teaser_text(pool: &SqlitePool, session_id: &str, text: &str) -> Result<u64> {
    let result = sqlx::query("UPDATE sessions SET teaser_text = ?, updated_at = ? WHERE id = ?")
        .bind(text)
        .bind(Utc::now())
        .bind(session_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Returns the number of rows written, 0 when the session is gone.
pub async fn set_teaser_video_url(pool: &SqlitePool, session_id: &str, url: &str) -> Result<u64> {
    let result = sqlx::query("UPDATE sessions SET teaser_video_url = ?, updated_at = ? WHERE id = ?")
        .bind(url)
        .bind(Utc::now())
        .bind(session_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn set_teasing(pool: &SqlitePool, session_id: &str, teasing: TeasingStatus) -> Result<()> {
    sqlx::query(
        "UPDATE sessions SET teased_twitter = ?, teased_linkedin = ?, teased_bluesky = ?, updated_at = ? WHERE id = ?",
    )
    .bind(teasing.twitter)
    .bind(teasing.linkedin)
    .bind(teasing.bluesky)
    .bind(Utc::now())
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(())
}
