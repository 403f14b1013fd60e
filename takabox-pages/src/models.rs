use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of content blocks the page renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Text,
    Image,
    Hero,
    Features,
    Testimonials,
    CallToAction,
}

/// One ordered content block on a landing page.
///
/// Sections travel as a JSON array; most fields are lenient with defaults so
/// hand-edited payloads survive, but `type` must name a known kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// An admin-built marketing page, addressed publicly by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingPage {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub cta_text: Option<String>,
    /// Raw markup injected into the page head (pixels, analytics snippets).
    pub header_code: Option<String>,
    pub is_active: bool,
    pub sections: Vec<PageSection>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LandingPage {
    pub fn new(slug: String, title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug,
            title,
            headline: None,
            subheadline: None,
            cta_text: None,
            header_code: None,
            is_active: true,
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sections as the storefront renders them: active only, by display
    /// order, insertion order breaking ties.
    pub fn display_sections(&self) -> Vec<&PageSection> {
        let mut sections: Vec<&PageSection> =
            self.sections.iter().filter(|s| s.is_active).collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Slugs are the public URL key: lowercase ASCII, digits, and hyphens only.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[async_trait::async_trait]
pub trait PageRepository: Send + Sync {
    /// Upsert keyed on `page.id`. Each edit replaces the record wholesale.
    async fn upsert_page(
        &self,
        page: &LandingPage,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_page(
        &self,
        id: &Uuid,
    ) -> Result<Option<LandingPage>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_page_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<LandingPage>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_pages(
        &self,
    ) -> Result<Vec<LandingPage>, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `false` when no page had that id.
    async fn delete_page(
        &self,
        id: &Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
