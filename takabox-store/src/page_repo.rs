use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use takabox_pages::{decode_sections_or_empty, encode_sections, LandingPage, PageRepository};
use uuid::Uuid;

pub struct SqlitePageRepository {
    pool: SqlitePool,
}

impl SqlitePageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PageRow {
    id: String,
    slug: String,
    title: String,
    headline: Option<String>,
    subheadline: Option<String>,
    cta_text: Option<String>,
    header_code: Option<String>,
    is_active: bool,
    sections: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PageRow {
    fn into_page(self) -> Result<LandingPage, Box<dyn std::error::Error + Send + Sync>> {
        Ok(LandingPage {
            id: Uuid::parse_str(&self.id)?,
            slug: self.slug,
            title: self.title,
            headline: self.headline,
            subheadline: self.subheadline,
            cta_text: self.cta_text,
            header_code: self.header_code,
            is_active: self.is_active,
            // Lenient by design: a corrupt column must not take down the
            // admin list or the public page.
            sections: decode_sections_or_empty(&self.sections),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl PageRepository for SqlitePageRepository {
    async fn upsert_page(
        &self,
        page: &LandingPage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let sections = encode_sections(&page.sections)?;

        sqlx::query(
            r#"
            INSERT INTO landing_pages (
                id, slug, title, headline, subheadline, cta_text,
                header_code, is_active, sections, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                slug = excluded.slug,
                title = excluded.title,
                headline = excluded.headline,
                subheadline = excluded.subheadline,
                cta_text = excluded.cta_text,
                header_code = excluded.header_code,
                is_active = excluded.is_active,
                sections = excluded.sections,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(page.id.to_string())
        .bind(&page.slug)
        .bind(&page.title)
        .bind(&page.headline)
        .bind(&page.subheadline)
        .bind(&page.cta_text)
        .bind(&page.header_code)
        .bind(page.is_active)
        .bind(sections)
        .bind(page.created_at)
        .bind(page.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_page(
        &self,
        id: &Uuid,
    ) -> Result<Option<LandingPage>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<PageRow> = sqlx::query_as("SELECT * FROM landing_pages WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_page()?)),
            None => Ok(None),
        }
    }

    async fn get_page_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<LandingPage>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<PageRow> = sqlx::query_as("SELECT * FROM landing_pages WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_page()?)),
            None => Ok(None),
        }
    }

    async fn list_pages(
        &self,
    ) -> Result<Vec<LandingPage>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<PageRow> =
            sqlx::query_as("SELECT * FROM landing_pages ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(PageRow::into_page).collect()
    }

    async fn delete_page(
        &self,
        id: &Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("DELETE FROM landing_pages WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbClient;
    use takabox_pages::{PageSection, SectionKind};

    fn sample_page(slug: &str) -> LandingPage {
        let mut page = LandingPage::new(slug.to_string(), "Eid Mega Offer".to_string());
        page.headline = Some("ঈদ মেগা অফার".to_string());
        page.cta_text = Some("Order now".to_string());
        page.sections = vec![
            PageSection {
                kind: SectionKind::Hero,
                title: "Up to 40% off".to_string(),
                content: String::new(),
                image_url: Some("https://cdn.example.com/hero.jpg".to_string()),
                order: 1,
                is_active: true,
            },
            PageSection {
                kind: SectionKind::CallToAction,
                title: "Grab yours".to_string(),
                content: "Limited stock".to_string(),
                image_url: None,
                order: 2,
                is_active: true,
            },
        ];
        page
    }

    async fn repo() -> (DbClient, SqlitePageRepository) {
        let db = DbClient::in_memory().await.unwrap();
        let repo = SqlitePageRepository::new(db.pool.clone());
        (db, repo)
    }

    #[tokio::test]
    async fn test_upsert_and_get_round_trip() {
        let (_db, repo) = repo().await;
        let page = sample_page("eid-offer");

        repo.upsert_page(&page).await.unwrap();
        let loaded = repo.get_page(&page.id).await.unwrap().unwrap();

        assert_eq!(loaded.slug, "eid-offer");
        assert_eq!(loaded.headline.as_deref(), Some("ঈদ মেগা অফার"));
        assert_eq!(loaded.sections, page.sections);
    }

    #[tokio::test]
    async fn test_lookup_by_slug() {
        let (_db, repo) = repo().await;
        let page = sample_page("winter-sale");
        repo.upsert_page(&page).await.unwrap();

        let loaded = repo.get_page_by_slug("winter-sale").await.unwrap().unwrap();
        assert_eq!(loaded.id, page.id);
        assert!(repo.get_page_by_slug("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_edit_replaces_record_wholesale() {
        let (_db, repo) = repo().await;
        let mut page = sample_page("eid-offer");
        repo.upsert_page(&page).await.unwrap();

        page.title = "Eid Offer v2".to_string();
        page.sections.truncate(1);
        page.touch();
        repo.upsert_page(&page).await.unwrap();

        let all = repo.list_pages().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Eid Offer v2");
        assert_eq!(all[0].sections.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_sections_column_reads_as_empty() {
        let (db, repo) = repo().await;
        let page = sample_page("eid-offer");
        repo.upsert_page(&page).await.unwrap();

        sqlx::query("UPDATE landing_pages SET sections = '{broken' WHERE id = ?")
            .bind(page.id.to_string())
            .execute(&db.pool)
            .await
            .unwrap();

        let loaded = repo.get_page(&page.id).await.unwrap().unwrap();
        assert_eq!(loaded.sections, vec![]);
        assert_eq!(loaded.title, "Eid Mega Offer");
    }

    #[tokio::test]
    async fn test_slug_is_unique() {
        let (_db, repo) = repo().await;
        repo.upsert_page(&sample_page("eid-offer")).await.unwrap();

        // A different page id with the same slug is refused by the store.
        let clash = sample_page("eid-offer");
        assert!(repo.upsert_page(&clash).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_page() {
        let (_db, repo) = repo().await;
        let page = sample_page("eid-offer");
        repo.upsert_page(&page).await.unwrap();

        assert!(repo.delete_page(&page.id).await.unwrap());
        assert!(!repo.delete_page(&page.id).await.unwrap());
        assert!(repo.get_page(&page.id).await.unwrap().is_none());
    }
}
