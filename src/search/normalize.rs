//! Mapping from loosely-typed upstream records to [`ProjectRecord`].
//!
//! Every output field is read through an ordered chain of source fields; the
//! first non-empty one wins. The chains are plain data so their precedence
//! can be inspected and tested on its own.

use crate::models::{ProjectRecord, RawRecord};

/// Shown when a record has no usable link.
pub const NO_LINK: &str = "#";

/// String-valued source fields of a [`RawRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    FullName,
    Name,
    Title,
    HtmlUrl,
    Url,
    Repository,
    Homepage,
    Description,
}

impl TextField {
    pub fn read(self, record: &RawRecord) -> Option<&str> {
        let value = match self {
            Self::FullName => &record.full_name,
            Self::Name => &record.name,
            Self::Title => &record.title,
            Self::HtmlUrl => &record.html_url,
            Self::Url => &record.url,
            Self::Repository => &record.repository,
            Self::Homepage => &record.homepage,
            Self::Description => &record.description,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// Star-count source fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    StargazersCount,
    Stars,
}

impl CountField {
    /// Zero and negative counts are treated as absent.
    pub fn read(self, record: &RawRecord) -> Option<u64> {
        let value = match self {
            Self::StargazersCount => record.stargazers_count,
            Self::Stars => record.stars,
        };
        value.filter(|v| *v > 0).map(|v| v as u64)
    }
}

/// Label-list source fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Topics,
    Tags,
}

impl ListField {
    pub fn read(self, record: &RawRecord) -> Option<&[String]> {
        let value = match self {
            Self::Topics => &record.topics,
            Self::Tags => &record.tags,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

pub const NAME_CHAIN: &[TextField] = &[TextField::Name, TextField::FullName, TextField::Title];
pub const URL_CHAIN: &[TextField] = &[
    TextField::HtmlUrl,
    TextField::Url,
    TextField::Repository,
    TextField::Homepage,
];
pub const DESCRIPTION_CHAIN: &[TextField] = &[TextField::Description];
pub const STARS_CHAIN: &[CountField] = &[CountField::StargazersCount, CountField::Stars];
pub const TAGS_CHAIN: &[ListField] = &[ListField::Topics, ListField::Tags];

fn first_text<'a>(record: &'a RawRecord, chain: &[TextField]) -> Option<&'a str> {
    chain.iter().find_map(|field| field.read(record))
}

/// Stable identity used for deduplication: full name, then numeric id, then
/// short name, then a fingerprint of the whole record.
pub fn identity_key(record: &RawRecord) -> String {
    if let Some(full_name) = TextField::FullName.read(record) {
        return full_name.to_string();
    }
    if let Some(id) = record.id {
        return id.to_string();
    }
    if let Some(name) = TextField::Name.read(record) {
        return name.to_string();
    }
    fingerprint(record)
}

/// Canonical JSON of the record. Object keys are ordered, so equal records
/// always produce equal fingerprints.
pub fn fingerprint(record: &RawRecord) -> String {
    serde_json::to_value(record)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

pub fn normalize(record: &RawRecord) -> ProjectRecord {
    let id = identity_key(record);

    let name = first_text(record, NAME_CHAIN)
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());
    let url = first_text(record, URL_CHAIN).unwrap_or(NO_LINK).to_string();
    let stars = STARS_CHAIN
        .iter()
        .find_map(|field| field.read(record))
        .unwrap_or(0);
    let description = first_text(record, DESCRIPTION_CHAIN)
        .unwrap_or_default()
        .to_string();
    let tags = TAGS_CHAIN
        .iter()
        .find_map(|field| field.read(record))
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    ProjectRecord {
        id,
        name,
        url,
        stars,
        description,
        tags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_record() -> RawRecord {
        serde_json::from_value(serde_json::json!({
            "id": 724712,
            "name": "rust",
            "full_name": "rust-lang/rust",
            "html_url": "https://github.com/rust-lang/rust",
            "url": "https://api.github.com/repos/rust-lang/rust",
            "homepage": "https://www.rust-lang.org",
            "stargazers_count": 99000,
            "description": "Empowering everyone to build reliable and efficient software.",
            "topics": ["rust", "compiler"],
            "forks_count": 12000
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_github_record() {
        let project = normalize(&github_record());
        assert_eq!(project.id, "rust-lang/rust");
        assert_eq!(project.name, "rust");
        assert_eq!(project.url, "https://github.com/rust-lang/rust");
        assert_eq!(project.stars, 99000);
        assert_eq!(project.tags, vec!["rust", "compiler"]);
        assert!(project.description.starts_with("Empowering"));
    }

    #[test]
    fn test_empty_record_uses_all_fallbacks() {
        let project = normalize(&RawRecord::default());
        assert_eq!(project.url, NO_LINK);
        assert_eq!(project.stars, 0);
        assert_eq!(project.description, "");
        assert!(project.tags.is_empty());
        // Name falls back to the identity key, which is the fingerprint here.
        assert_eq!(project.name, project.id);
        assert_eq!(project.id, "{}");
    }

    #[test]
    fn test_name_chain_order() {
        let rec = RawRecord {
            full_name: Some("owner/thing".to_string()),
            title: Some("Thing".to_string()),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&rec).name, "owner/thing");

        let rec = RawRecord {
            name: Some("  ".to_string()),
            title: Some("Thing".to_string()),
            id: Some(7),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&rec).name, "Thing");
    }

    #[test]
    fn test_url_chain_skips_empty_values() {
        let rec = RawRecord {
            html_url: Some(String::new()),
            repository: Some("https://example.com/repo".to_string()),
            homepage: Some("https://example.com".to_string()),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&rec).url, "https://example.com/repo");
    }

    #[test]
    fn test_stars_fall_back_and_never_go_negative() {
        let rec = RawRecord {
            stargazers_count: Some(0),
            stars: Some(42),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&rec).stars, 42);

        let rec = RawRecord {
            stargazers_count: Some(-5),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&rec).stars, 0);
    }

    #[test]
    fn test_tags_fall_back_to_generic_field() {
        let rec = RawRecord {
            topics: Some(vec![]),
            tags: Some(vec!["cli".to_string()]),
            ..RawRecord::default()
        };
        assert_eq!(normalize(&rec).tags, vec!["cli"]);
    }

    #[test]
    fn test_identity_key_chain() {
        let mut rec = github_record();
        assert_eq!(identity_key(&rec), "rust-lang/rust");
        rec.full_name = None;
        assert_eq!(identity_key(&rec), "724712");
        rec.id = None;
        assert_eq!(identity_key(&rec), "rust");
        rec.name = None;
        assert!(identity_key(&rec).starts_with('{'));
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = RawRecord {
            title: Some("x".to_string()),
            ..RawRecord::default()
        };
        let b = a.clone();
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_ne!(fingerprint(&a), fingerprint(&RawRecord::default()));
    }
}
