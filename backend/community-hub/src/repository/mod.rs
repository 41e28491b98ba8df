pub mod communities;
pub mod posts;

pub use communities::CommunityRepository;
pub use posts::PostRepository;

use crate::error::{HubError, HubResult};
use crate::store::{Fields, Value};

pub const POSTS_COLLECTION: &str = "posts";
pub const COMMUNITIES_COLLECTION: &str = "communities";

/// String field of a document, or an `InvalidDocument` error naming it
fn required_string(fields: &Fields, collection: &str, id: &str, name: &str) -> HubResult<String> {
    match fields.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(HubError::invalid_document(
            collection,
            id,
            format!("{} is a {}, expected string", name, other.type_name()),
        )),
        None => Err(HubError::invalid_document(
            collection,
            id,
            format!("missing {}", name),
        )),
    }
}
