use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Fixed upstream page size.
pub const PAGE_SIZE: u32 = 10;

/// Raw query string of `GET /api/projects`. Everything is optional and
/// parsed leniently by [`SearchParams::into_request`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub tags: Option<String>,
    pub page: Option<String>,
    pub all: Option<String>,
}

impl SearchParams {
    pub fn into_request(self) -> SearchRequest {
        let all = matches!(self.all.as_deref().map(str::trim), Some("true" | "1"));
        let mode = if all {
            FetchMode::All
        } else {
            FetchMode::SinglePage {
                page: parse_page(self.page.as_deref()),
            }
        };

        SearchRequest {
            keywords: self.q.unwrap_or_default(),
            tags: self.tags.as_deref().map(TagSet::parse).unwrap_or_default(),
            mode,
        }
    }
}

/// Reads the leading integer (`"27abc"` is 27, `"2.5"` is 2). Missing,
/// unparsable or zero pages fall back to 1; range clamping happens later.
fn parse_page(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else { return 1 };
    let raw = raw.trim_start();
    let (sign, rest) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 1;
    }

    match sign * digits.parse::<i64>().unwrap_or(i64::MAX) {
        0 => 1,
        page => page,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keywords: String,
    pub tags: TagSet,
    pub mode: FetchMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// One upstream page, as requested by the client (unclamped).
    SinglePage { page: i64 },
    /// Merge the first few upstream pages.
    All,
}

/// Insertion-ordered set of normalized tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Parse a comma-separated tag list. Each tag is trimmed and its internal
    /// whitespace collapsed; empty and repeated tags are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::default();
        for tag in raw.split(',') {
            set.insert(tag);
        }
        set
    }

    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.split_whitespace().collect::<Vec<_>>().join(" ");
        if tag.is_empty() || self.0.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Upstream item as returned by the search API. Only the fields read by
/// normalization are typed; everything else is kept in `extra` so the
/// structural fingerprint covers the whole record.
///
/// Deserialization never fails for a JSON object: a typed field holding an
/// unexpected type is treated as absent and its value stays in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stargazers_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawRecord {
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        Self {
            id: take(&mut map, "id", Value::as_u64),
            full_name: take(&mut map, "full_name", text),
            name: take(&mut map, "name", text),
            title: take(&mut map, "title", text),
            html_url: take(&mut map, "html_url", text),
            url: take(&mut map, "url", text),
            repository: take(&mut map, "repository", text),
            homepage: take(&mut map, "homepage", text),
            stargazers_count: take(&mut map, "stargazers_count", Value::as_i64),
            stars: take(&mut map, "stars", Value::as_i64),
            description: take(&mut map, "description", text),
            topics: take(&mut map, "topics", labels),
            tags: take(&mut map, "tags", labels),
            extra: map,
        }
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_map)
    }
}

/// Remove `key` from `map` when it is null or reads as `T`. Values of any
/// other type are left in place.
fn take<T>(map: &mut Map<String, Value>, key: &str, read: fn(&Value) -> Option<T>) -> Option<T> {
    let value = map.get(key)?;
    if value.is_null() {
        map.remove(key);
        return None;
    }
    let parsed = read(value)?;
    map.remove(key);
    Some(parsed)
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn labels(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}

/// One page returned by a [`crate::upstream::PageSource`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPage {
    pub items: Vec<RawRecord>,
    pub total_count: u64,
}

/// Normalized repository entry returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    pub stars: u64,
    pub description: String,
    pub tags: Vec<String>,
}

/// Search response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResult {
    pub items: Vec<ProjectRecord>,
    pub total_count: u64,
}

/// Page navigation for single-page responses: the clamped page, the number
/// of navigable pages and at most five page buttons around the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
    pub window: Vec<u32>,
}

/// Body of a successful `GET /api/projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub result: AggregatedResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: Value,
}
