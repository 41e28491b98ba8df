use crate::error::{HubError, HubResult};
use crate::store::auto_id;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Feed post handed to callers, `created_at` already normalised
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: String,
    pub content: String,
    pub likes: i64,
    pub created_at: String, // ISO-8601 UTC, millisecond precision
}

impl Post {
    /// Fresh post with a store-style id, zero likes and the current instant
    pub fn new(author: &str, content: &str) -> Self {
        NewPost {
            author: author.to_string(),
            content: content.to_string(),
        }
        .into_post()
    }

    /// Parse `created_at` back into an instant
    pub fn created_at_instant(&self) -> HubResult<DateTime<Utc>> {
        parse_iso_string(&self.created_at).map_err(|e| {
            HubError::InvalidInput(format!(
                "createdAt is not an RFC 3339 timestamp: {} ({})",
                self.created_at, e
            ))
        })
    }
}

/// Post input without store-assigned fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub author: String,
    pub content: String,
}

impl NewPost {
    pub fn into_post(self) -> Post {
        Post {
            id: auto_id(),
            author: self.author,
            content: self.content,
            likes: 0,
            created_at: to_iso_string(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub creator_slug: String,
}

/// Community input; the id is generated by the store on insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunity {
    pub name: String,
    pub image_url: String,
    pub creator_slug: String,
}

/// GitHub user payload. Fields not named here are kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub id: u64,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follower {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
}

/// Page of followers returned by the follower proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerResponse {
    pub followers: Vec<Follower>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub results_per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    pub has_more: bool,
}

/// Route parameter that may arrive as one id or as a list of ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdParam {
    Single(String),
    Many(Vec<String>),
}

impl IdParam {
    /// The single id, or the fixed input-validation error for a list
    pub fn single(&self) -> HubResult<&str> {
        match self {
            IdParam::Single(id) => Ok(id),
            IdParam::Many(_) => Err(HubError::multiple_ids()),
        }
    }
}

impl From<&str> for IdParam {
    fn from(id: &str) -> Self {
        IdParam::Single(id.to_string())
    }
}

impl From<String> for IdParam {
    fn from(id: String) -> Self {
        IdParam::Single(id)
    }
}

impl From<Vec<String>> for IdParam {
    fn from(ids: Vec<String>) -> Self {
        IdParam::Many(ids)
    }
}

impl From<Vec<&str>> for IdParam {
    fn from(ids: Vec<&str>) -> Self {
        IdParam::Many(ids.into_iter().map(str::to_string).collect())
    }
}

/// `2021-07-20T12:00:00.000Z`; sub-millisecond digits are truncated
pub fn to_iso_string(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_iso_string(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}
