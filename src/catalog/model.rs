use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::tags;

/// Category as seen from a content row. A row whose category no longer
/// exists carries the zero value (id 0, empty title and slug).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: i64,
    pub title: String,
    pub slug: String,
}

/// Author as seen from a content row. Same zero-value rule as categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub name: String,
}

/// A content row as the store returns it: tags still flat, joins optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub description: String,
    pub image: String,
    pub tags: String,
    pub status: String,
    pub category_id: i64,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
    pub category: Option<CategorySummary>,
    pub author: Option<AuthorSummary>,
}

/// A content item ready for callers: tags decoded, joins resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub status: String,
    pub category_id: i64,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
    pub category: CategorySummary,
    pub author: AuthorSummary,
}

impl From<ContentRecord> for Content {
    fn from(record: ContentRecord) -> Self {
        Self {
            id: record.id,
            tags: tags::decode(&record.tags),
            title: record.title,
            excerpt: record.excerpt,
            description: record.description,
            image: record.image,
            status: record.status,
            category_id: record.category_id,
            created_by_id: record.created_by_id,
            created_at: record.created_at,
            category: record.category.unwrap_or_default(),
            author: record.author.unwrap_or_default(),
        }
    }
}

/// Wire shape of a content item.
#[derive(Debug, Clone, Serialize)]
pub struct ContentResponse {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub status: String,
    pub category_id: i64,
    pub created_by_id: i64,
    pub created_at: String,
    pub category_name: String,
    pub author: String,
}

impl From<Content> for ContentResponse {
    fn from(content: Content) -> Self {
        Self {
            id: content.id,
            title: content.title,
            excerpt: content.excerpt,
            description: content.description,
            image: content.image,
            tags: content.tags,
            status: content.status,
            category_id: content.category_id,
            created_by_id: content.created_by_id,
            created_at: content.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            category_name: content.category.title,
            author: content.author.name,
        }
    }
}

/// Inbound create/edit payload.
///
/// `tags` accepts either a JSON list or a single comma-joined string.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContentRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub excerpt: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub description: String,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "tags_from_list_or_string")]
    #[validate(length(min = 1))]
    pub tags: Vec<String>,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub status: String,

    #[serde(default)]
    #[validate(range(min = 1))]
    pub category_id: i64,
}

fn tags_from_list_or_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTags {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match RawTags::deserialize(deserializer)? {
        RawTags::List(list) => list,
        RawTags::Joined(joined) if joined.is_empty() => Vec::new(),
        RawTags::Joined(joined) => tags::decode(&joined),
    })
}

/// Column values for an insert or update, tags already encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraft {
    pub title: String,
    pub excerpt: String,
    pub description: String,
    /// `None` on update leaves the stored image untouched.
    pub image: Option<String>,
    pub tags: String,
    pub status: String,
    pub category_id: i64,
}

impl From<ContentRequest> for ContentDraft {
    fn from(request: ContentRequest) -> Self {
        Self {
            tags: tags::encode(&request.tags),
            title: request.title,
            excerpt: request.excerpt,
            description: request.description,
            image: request.image.filter(|image| !image.is_empty()),
            status: request.status,
            category_id: request.category_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> ContentRecord {
        ContentRecord {
            id: 1,
            title: "Go basics".into(),
            excerpt: "e".into(),
            description: "d".into(),
            image: "".into(),
            tags: "go,intro".into(),
            status: "PUBLISH".into(),
            category_id: 2,
            created_by_id: 3,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            category: None,
            author: None,
        }
    }

    #[test]
    fn missing_joins_become_zero_values() {
        let content = Content::from(record());
        assert_eq!(content.category, CategorySummary::default());
        assert_eq!(content.author, AuthorSummary::default());
        assert_eq!(content.tags, vec!["go".to_string(), "intro".to_string()]);

        let response = ContentResponse::from(content);
        assert_eq!(response.category_name, "");
        assert_eq!(response.author, "");
        assert_eq!(response.created_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn request_accepts_joined_or_listed_tags() {
        let joined: ContentRequest = serde_json::from_str(r#"{"tags":"a,b"}"#).unwrap();
        assert_eq!(joined.tags, vec!["a".to_string(), "b".to_string()]);

        let listed: ContentRequest = serde_json::from_str(r#"{"tags":["a","b"]}"#).unwrap();
        assert_eq!(listed.tags, joined.tags);

        let empty: ContentRequest = serde_json::from_str(r#"{"tags":""}"#).unwrap();
        assert!(empty.tags.is_empty());
    }

    #[test]
    fn draft_encodes_tags_and_drops_empty_image() {
        let request = ContentRequest {
            title: "t".into(),
            image: Some(String::new()),
            tags: vec!["x".into(), "y".into()],
            ..Default::default()
        };
        let draft = ContentDraft::from(request);
        assert_eq!(draft.tags, "x,y");
        assert_eq!(draft.image, None);
    }
}
