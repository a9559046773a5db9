//! Post form validation.
//!
//! Runs before any mutation: a submission either normalizes into a
//! [`ValidatedPost`] or comes back as per-field errors, with the entered
//! values preserved for the re-rendered form. Store failures during
//! validation (a group lookup that cannot run) are not validation errors
//! and propagate as [`AppError`].

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use scribe_core::domain::Group;
use scribe_core::ports::GroupRepository;
use scribe_infra::media::validate_image;
use scribe_shared::dto::PostFormData;

use crate::middleware::error::AppResult;

/// One message per offending field, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// A decoded, format-checked image payload.
pub struct ValidatedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// What the submission says about the post's image.
pub enum ImageField {
    /// Field absent. An edit keeps the current image; a create has none.
    Unchanged,
    /// Explicit `null`: detach the current image.
    Clear,
    /// A decoded, format-checked payload to attach.
    Replace(ValidatedImage),
}

/// A submission that passed validation, normalized and ready for the
/// repository.
pub struct ValidatedPost {
    pub text: String,
    pub group: Option<Group>,
    pub image: ImageField,
}

/// The two ways a submission can come out of validation.
pub enum FormOutcome {
    Valid(ValidatedPost),
    Invalid(FieldErrors),
}

/// Validate a submitted post form.
///
/// Rules: `text` must be non-empty after trimming; `group`, when given,
/// must resolve to an existing group; `image`, when given, must be valid
/// base64 holding a decodable image. An absent `image` field is not an
/// error, it means "leave the image alone".
pub async fn validate_post_form(
    groups: &dyn GroupRepository,
    form: &PostFormData,
) -> AppResult<FormOutcome> {
    let mut errors = FieldErrors::new();

    let text = form.text.trim();
    if text.is_empty() {
        errors.insert("text".to_string(), "Text must not be empty.".to_string());
    }

    let mut group = None;
    if let Some(group_id) = form.group {
        match groups.find_by_id(group_id).await? {
            Some(found) => group = Some(found),
            None => {
                errors.insert("group".to_string(), "Unknown group.".to_string());
            }
        }
    }

    let mut image = ImageField::Unchanged;
    match &form.image {
        None => {}
        Some(None) => image = ImageField::Clear,
        Some(Some(encoded)) => match BASE64.decode(encoded) {
            Ok(bytes) => match validate_image(&bytes) {
                Ok(content_type) => {
                    image = ImageField::Replace(ValidatedImage {
                        bytes,
                        content_type,
                    });
                }
                Err(_) => {
                    errors.insert(
                        "image".to_string(),
                        "Payload is not a decodable image.".to_string(),
                    );
                }
            },
            Err(_) => {
                errors.insert(
                    "image".to_string(),
                    "Image must be base64-encoded.".to_string(),
                );
            }
        },
    }

    if !errors.is_empty() {
        return Ok(FormOutcome::Invalid(errors));
    }

    Ok(FormOutcome::Valid(ValidatedPost {
        text: text.to_string(),
        group,
        image,
    }))
}
