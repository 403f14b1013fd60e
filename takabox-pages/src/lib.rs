//! Landing page documents and the JSON-string section codec.

pub mod codec;
pub mod models;

pub use codec::{decode_sections, decode_sections_or_empty, encode_sections, SectionCodecError};
pub use models::{is_valid_slug, LandingPage, PageRepository, PageSection, SectionKind};
