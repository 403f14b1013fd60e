use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use takabox_catalog::DeliverySettings;
use tracing::info;

#[derive(Clone)]
pub struct DbClient {
    pub pool: SqlitePool,
}

impl DbClient {
    pub async fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// A migrated private in-memory database. Capped at one connection so
    /// the database lives exactly as long as the pool.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let client = Self { pool };
        client.migrate().await?;
        Ok(client)
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Config supplies the defaults; rows in `delivery_settings` override
    /// individual fields so admins can change rates without a redeploy.
    pub async fn fetch_delivery_settings(
        &self,
        defaults: DeliverySettings,
    ) -> Result<DeliverySettings, sqlx::Error> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT setting_key, setting_value FROM delivery_settings")
                .fetch_all(&self.pool)
                .await?;

        let mut settings = defaults;

        for (key, raw) in rows {
            let val: Value = match serde_json::from_str(&raw) {
                Ok(v) => v,
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "skipping malformed delivery setting");
                    continue;
                }
            };

            // Expected format: {"value": <number/bool>}
            if let Some(v) = val.get("value") {
                match key.as_str() {
                    "inside_dhaka_charge_bdt" => {
                        if let Some(n) = v.as_i64() {
                            settings.inside_dhaka_charge_bdt = n;
                        }
                    }
                    "outside_dhaka_charge_bdt" => {
                        if let Some(n) = v.as_i64() {
                            settings.outside_dhaka_charge_bdt = n;
                        }
                    }
                    "free_delivery_enabled" => {
                        if let Some(b) = v.as_bool() {
                            settings.free_delivery_enabled = b;
                        }
                    }
                    "free_delivery_min_bdt" => {
                        if let Some(n) = v.as_i64() {
                            settings.free_delivery_min_bdt = n;
                        }
                    }
                    "steadfast_enabled" => {
                        if let Some(b) = v.as_bool() {
                            settings.steadfast_enabled = b;
                        }
                    }
                    _ => {}
                }
            }
        }

        Ok(settings)
    }

    pub async fn upsert_delivery_setting(
        &self,
        key: &str,
        value: &Value,
    ) -> Result<(), sqlx::Error> {
        let raw = serde_json::json!({ "value": value }).to_string();
        sqlx::query(
            r#"
            INSERT INTO delivery_settings (setting_key, setting_value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(setting_key) DO UPDATE SET
                setting_value = excluded.setting_value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(raw)
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_defaults_pass_through_when_no_overrides() {
        let db = DbClient::in_memory().await.unwrap();
        let defaults = DeliverySettings::default();

        let settings = db.fetch_delivery_settings(defaults.clone()).await.unwrap();
        assert_eq!(settings, defaults);
    }

    #[tokio::test]
    async fn test_overrides_replace_individual_fields() {
        let db = DbClient::in_memory().await.unwrap();

        db.upsert_delivery_setting("inside_dhaka_charge_bdt", &json!(80))
            .await
            .unwrap();
        db.upsert_delivery_setting("free_delivery_enabled", &json!(true))
            .await
            .unwrap();
        // Unknown keys and wrong types are ignored, not fatal.
        db.upsert_delivery_setting("surge_multiplier", &json!(2.5))
            .await
            .unwrap();
        db.upsert_delivery_setting("outside_dhaka_charge_bdt", &json!("not a number"))
            .await
            .unwrap();

        let settings = db
            .fetch_delivery_settings(DeliverySettings::default())
            .await
            .unwrap();
        assert_eq!(settings.inside_dhaka_charge_bdt, 80);
        assert!(settings.free_delivery_enabled);
        assert_eq!(settings.outside_dhaka_charge_bdt, 120);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_previous_value() {
        let db = DbClient::in_memory().await.unwrap();

        db.upsert_delivery_setting("inside_dhaka_charge_bdt", &json!(70))
            .await
            .unwrap();
        db.upsert_delivery_setting("inside_dhaka_charge_bdt", &json!(90))
            .await
            .unwrap();

        let settings = db
            .fetch_delivery_settings(DeliverySettings::default())
            .await
            .unwrap();
        assert_eq!(settings.inside_dhaka_charge_bdt, 90);
    }
}
