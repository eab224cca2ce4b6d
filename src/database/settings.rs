// file: src/database/settings.rs
use anyhow::Result;
use sqlx::SqlitePool;

pub async fn get(pool: &SqlitePool) -> Result<crate::models::Settings> {
    let settings = sqlx::query_as::<_, crate::models::Setting>("SELECT key, value FROM settings")
        .fetch_all(pool)
        .await?;

    let mut app_settings = crate::models::Settings::default();
    for setting in settings {
        match setting.key.as_str() {
            "default_export_format" => app_settings.default_export_format = setting.value,
            "default_timezone" => app_settings.default_timezone = setting.value,
            "slot_minutes_hint" => {
                app_settings.slot_minutes_hint = setting.value.parse().unwrap_or(30)
            }
            "confirm_batch_edits" => {
                app_settings.confirm_batch_edits = setting.value.parse().unwrap_or(true)
            }
            "last_event_id" => {
                app_settings.last_event_id = Some(setting.value).filter(|v| !v.is_empty())
            }
            _ => {}
        }
    }

    Ok(app_settings)
}

pub async fn update(pool: &SqlitePool, settings: &crate::models::Settings) -> Result<()> {
    let slot_minutes_hint_str = settings.slot_minutes_hint.to_string();
    let confirm_batch_edits_str = settings.confirm_batch_edits.to_string();

    let updates = vec![
        ("default_export_format", settings.default_export_format.as_str()),
        ("default_timezone", settings.default_timezone.as_str()),
        ("slot_minutes_hint", slot_minutes_hint_str.as_str()),
        ("confirm_batch_edits", confirm_batch_edits_str.as_str()),
        ("last_event_id", settings.last_event_id.as_deref().unwrap_or("")),
    ];

    let mut tx = pool.begin().await?;
    for (key, value) in updates {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?, ?) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    Ok(())
}
