use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use takabox_promo::{DiscountRule, PromoCode, PromoRepository};
use uuid::Uuid;

pub struct SqlitePromoRepository {
    pool: SqlitePool,
}

impl SqlitePromoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PromoRow {
    id: String,
    code: String,
    rule: String,
    min_order_bdt: i64,
    is_active: bool,
    starts_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl PromoRow {
    fn into_promo(self) -> Result<PromoCode, Box<dyn std::error::Error + Send + Sync>> {
        Ok(PromoCode {
            id: Uuid::parse_str(&self.id)?,
            code: self.code,
            rule: serde_json::from_str::<DiscountRule>(&self.rule)?,
            min_order_bdt: self.min_order_bdt,
            is_active: self.is_active,
            starts_at: self.starts_at,
            expires_at: self.expires_at,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl PromoRepository for SqlitePromoRepository {
    async fn upsert_code(
        &self,
        promo: &PromoCode,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let rule = serde_json::to_string(&promo.rule)?;

        sqlx::query(
            r#"
            INSERT INTO promo_codes (
                id, code, rule, min_order_bdt, is_active,
                starts_at, expires_at, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                code = excluded.code,
                rule = excluded.rule,
                min_order_bdt = excluded.min_order_bdt,
                is_active = excluded.is_active,
                starts_at = excluded.starts_at,
                expires_at = excluded.expires_at
            "#,
        )
        .bind(promo.id.to_string())
        .bind(&promo.code)
        .bind(rule)
        .bind(promo.min_order_bdt)
        .bind(promo.is_active)
        .bind(promo.starts_at)
        .bind(promo.expires_at)
        .bind(promo.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_code(
        &self,
        code: &str,
    ) -> Result<Option<PromoCode>, Box<dyn std::error::Error + Send + Sync>> {
        let normalized = code.trim().to_uppercase();
        let row: Option<PromoRow> = sqlx::query_as("SELECT * FROM promo_codes WHERE code = ?")
            .bind(normalized)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_promo()?)),
            None => Ok(None),
        }
    }

    async fn list_codes(&self) -> Result<Vec<PromoCode>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<PromoRow> =
            sqlx::query_as("SELECT * FROM promo_codes ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(PromoRow::into_promo).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbClient;

    async fn repo() -> (DbClient, SqlitePromoRepository) {
        let db = DbClient::in_memory().await.unwrap();
        let repo = SqlitePromoRepository::new(db.pool.clone());
        (db, repo)
    }

    #[tokio::test]
    async fn test_find_is_case_insensitive() {
        let (_db, repo) = repo().await;
        let promo = PromoCode::new("SAVE10", DiscountRule::Percentage { percent: 10 });
        repo.upsert_code(&promo).await.unwrap();

        let found = repo.find_code("save10").await.unwrap().unwrap();
        assert_eq!(found.code, "SAVE10");
        assert_eq!(found.rule, DiscountRule::Percentage { percent: 10 });

        assert!(repo.find_code("XXXX").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rule_survives_storage() {
        let (_db, repo) = repo().await;
        let mut promo = PromoCode::new("EID100", DiscountRule::FixedAmount { amount_bdt: 100 });
        promo.min_order_bdt = 1000;
        promo.expires_at = Some(Utc::now() + chrono::Duration::days(7));
        repo.upsert_code(&promo).await.unwrap();

        let found = repo.find_code("EID100").await.unwrap().unwrap();
        assert_eq!(found.rule, DiscountRule::FixedAmount { amount_bdt: 100 });
        assert_eq!(found.min_order_bdt, 1000);
        assert!(found.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_upsert_edits_in_place() {
        let (_db, repo) = repo().await;
        let mut promo = PromoCode::new("SAVE10", DiscountRule::Percentage { percent: 10 });
        repo.upsert_code(&promo).await.unwrap();

        promo.is_active = false;
        repo.upsert_code(&promo).await.unwrap();

        let all = repo.list_codes().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].is_active);
    }
}
