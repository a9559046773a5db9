//! Data Transfer Objects - request/response types for the API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scribe_core::pagination::Page;

/// Request to sign up a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

/// Submitted fields of the post form, for both create and edit.
///
/// Any `author` field a client might smuggle into the body is simply not
/// part of this type; authorship always comes from the authenticated
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormData {
    pub text: String,
    /// Id of the group to attach the post to, if any.
    #[serde(default)]
    pub group: Option<Uuid>,
    /// Base64-encoded image payload. Leaving the field out keeps an
    /// edited post's current image; an explicit `null` detaches it.
    #[serde(
        default,
        deserialize_with = "image_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
}

/// Keeps an absent field distinct from an explicit `null`: absence stays
/// `None` through `#[serde(default)]`, while a present value (`null`
/// included) lands in `Some`.
fn image_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// The post form handed back after a failed validation: the submitted
/// values, untouched, plus one message per offending field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormRerender {
    pub values: PostFormData,
    pub errors: BTreeMap<String, String>,
}

/// A post's author as embedded in post responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: Uuid,
    pub username: String,
}

/// A post's group as embedded in post responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

/// A single post as returned by listings and the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author: AuthorRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<Uuid>,
}

/// Full group details for group-scoped views and the group directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Site-wide listing.
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub title: String,
    pub page: Page<PostResponse>,
}

/// Group-scoped listing.
#[derive(Debug, Clone, Serialize)]
pub struct GroupPostsResponse {
    pub group: GroupResponse,
    pub page: Page<PostResponse>,
}

/// Author-scoped listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub author: UserResponse,
    pub title: String,
    pub post_count: u64,
    pub page: Page<PostResponse>,
}

/// Single post plus its derived display data.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    pub title: String,
    pub post: PostResponse,
    pub author_post_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_form_keeps_absent_and_null_image_apart() {
        let form: PostFormData = serde_json::from_str(r#"{"text": "t"}"#).unwrap();
        assert_eq!(form.image, None);

        let form: PostFormData = serde_json::from_str(r#"{"text": "t", "image": null}"#).unwrap();
        assert_eq!(form.image, Some(None));

        let form: PostFormData =
            serde_json::from_str(r#"{"text": "t", "image": "aGk="}"#).unwrap();
        assert_eq!(form.image, Some(Some("aGk=".to_string())));
    }

    #[test]
    fn post_form_rerender_round_trips_the_image_field() {
        let form = PostFormData {
            text: "t".to_string(),
            group: None,
            image: Some(None),
        };
        let back: PostFormData =
            serde_json::from_str(&serde_json::to_string(&form).unwrap()).unwrap();
        assert_eq!(back.image, Some(None));

        let form = PostFormData {
            text: "t".to_string(),
            group: None,
            image: None,
        };
        let back: PostFormData =
            serde_json::from_str(&serde_json::to_string(&form).unwrap()).unwrap();
        assert_eq!(back.image, None);
    }
}
