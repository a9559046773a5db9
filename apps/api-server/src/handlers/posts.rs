//! Post listing, detail and authoring handlers.
//!
//! Listings are public; authoring requires an authenticated identity and,
//! for edits, ownership of the post. The ownership check runs before
//! validation, and a non-owner is redirected to the post's detail view
//! with no indication of what an edit would have done.

use std::collections::HashMap;

use actix_web::{HttpResponse, http::header, web};
use serde::Deserialize;
use uuid::Uuid;

use scribe_core::domain::{Post, PostChanges};
use scribe_core::pagination::{Page, paginate, parse_page};
use scribe_shared::dto::{
    AuthorRef, GroupPostsResponse, GroupRef, GroupResponse, IndexResponse, PostDetailResponse,
    PostFormData, PostFormRerender, PostResponse, ProfileResponse, UserResponse,
};

use crate::forms::{FormOutcome, ImageField, ValidatedPost, validate_post_form};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// The one query parameter listings accept.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn detail_location(post_id: Uuid) -> String {
    format!("/api/posts/{post_id}")
}

/// Resolve authors and groups for a page of posts, preserving the page
/// metadata. Lookups are memoized per request.
async fn render_page(state: &AppState, page: Page<Post>) -> AppResult<Page<PostResponse>> {
    let items = to_responses(state, page.items).await?;
    Ok(Page {
        items,
        number: page.number,
        total_pages: page.total_pages,
        total_items: page.total_items,
        has_previous: page.has_previous,
        has_next: page.has_next,
    })
}

async fn to_responses(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
    let mut authors: HashMap<Uuid, AuthorRef> = HashMap::new();
    let mut groups: HashMap<Uuid, Option<GroupRef>> = HashMap::new();
    let mut responses = Vec::with_capacity(posts.len());

    for post in posts {
        let author = match authors.get(&post.author_id) {
            Some(author) => author.clone(),
            None => {
                let user = state
                    .users
                    .find_by_id(post.author_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal(format!("author missing for post {}", post.id))
                    })?;
                let author = AuthorRef {
                    id: user.id,
                    username: user.username,
                };
                authors.insert(post.author_id, author.clone());
                author
            }
        };

        let group = match post.group_id {
            Some(group_id) => match groups.get(&group_id) {
                Some(cached) => cached.clone(),
                None => {
                    // A group deleted after the post was written reads as
                    // no group at all.
                    let resolved = state.groups.find_by_id(group_id).await?.map(|g| GroupRef {
                        id: g.id,
                        title: g.title,
                        slug: g.slug,
                    });
                    groups.insert(group_id, resolved.clone());
                    resolved
                }
            },
            None => None,
        };

        responses.push(PostResponse {
            id: post.id,
            text: post.text,
            pub_date: post.pub_date,
            author,
            group,
            image_id: post.image_id,
        });
    }

    Ok(responses)
}

/// GET /api/posts
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let page = paginate(posts, state.page_size, parse_page(query.page.as_deref()));
    let page = render_page(&state, page).await?;

    Ok(HttpResponse::Ok().json(IndexResponse {
        title: "Latest updates".to_string(),
        page,
    }))
}

/// GET /api/groups
pub async fn group_index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let groups: Vec<GroupResponse> = state
        .groups
        .list()
        .await?
        .into_iter()
        .map(|g| GroupResponse {
            id: g.id,
            title: g.title,
            slug: g.slug,
            description: g.description,
        })
        .collect();

    Ok(HttpResponse::Ok().json(groups))
}

/// GET /api/groups/{slug}/posts
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group '{slug}' not found")))?;

    let posts = state.posts.list_by_group(group.id).await?;
    let page = paginate(posts, state.page_size, parse_page(query.page.as_deref()));
    let page = render_page(&state, page).await?;

    Ok(HttpResponse::Ok().json(GroupPostsResponse {
        group: GroupResponse {
            id: group.id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        },
        page,
    }))
}

/// GET /api/profiles/{username}
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;

    let posts = state.posts.list_by_author(author.id).await?;
    let post_count = state.posts.count_by_author(author.id).await?;
    let page = paginate(posts, state.page_size, parse_page(query.page.as_deref()));
    let page = render_page(&state, page).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        title: format!("Profile of {}", author.username),
        author: UserResponse {
            id: author.id,
            username: author.username,
        },
        post_count,
        page,
    }))
}

/// GET /api/posts/{post_id}
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {post_id} not found")))?;

    let title = post.preview_title();
    let author_post_count = state.posts.count_by_author(post.author_id).await?;
    let post = to_responses(&state, vec![post])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("post vanished while rendering".to_string()))?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        title,
        post,
        author_post_count,
    }))
}

/// Build the repository-ready change set, storing the new image when the
/// submission carries one. An untouched image field keeps `current_image`.
async fn build_changes(
    state: &AppState,
    validated: ValidatedPost,
    current_image: Option<Uuid>,
) -> AppResult<PostChanges> {
    let image_id = match validated.image {
        ImageField::Replace(image) => {
            Some(state.media.put(image.bytes, image.content_type).await?)
        }
        ImageField::Clear => None,
        ImageField::Unchanged => current_image,
    };

    Ok(PostChanges {
        text: validated.text,
        group_id: validated.group.map(|g| g.id),
        image_id,
    })
}

/// POST /api/posts
///
/// The author is always the authenticated identity; nothing in the body
/// can claim authorship for someone else.
pub async fn post_create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<PostFormData>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();

    let validated = match validate_post_form(state.groups.as_ref(), &form).await? {
        FormOutcome::Valid(validated) => validated,
        FormOutcome::Invalid(errors) => {
            return Ok(HttpResponse::Ok().json(PostFormRerender {
                values: form,
                errors,
            }));
        }
    };

    let changes = build_changes(&state, validated, None).await?;
    let post = Post::new(
        identity.user_id,
        changes.text,
        changes.group_id,
        changes.image_id,
    );
    let post = state.posts.create(post).await?;

    tracing::info!(post_id = %post.id, author = %identity.username, "Post created");

    Ok(see_other(format!("/api/profiles/{}", identity.username)))
}

/// POST /api/posts/{post_id}/edit
///
/// A submission without an `image` field keeps the post's current image;
/// detaching one takes an explicit `"image": null`.
pub async fn post_edit(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostFormData>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {post_id} not found")))?;

    // Ownership gate, before validation even runs. Non-owners are sent to
    // the detail view with nothing changed and nothing disclosed.
    if post.author_id != identity.user_id {
        tracing::debug!(post_id = %post_id, user = %identity.username, "Edit refused: not the author");
        return Ok(see_other(detail_location(post_id)));
    }

    let form = body.into_inner();
    let validated = match validate_post_form(state.groups.as_ref(), &form).await? {
        FormOutcome::Valid(validated) => validated,
        FormOutcome::Invalid(errors) => {
            return Ok(HttpResponse::Ok().json(PostFormRerender {
                values: form,
                errors,
            }));
        }
    };

    let changes = build_changes(&state, validated, post.image_id).await?;
    state.posts.update(post_id, changes).await?;

    tracing::info!(post_id = %post_id, author = %identity.username, "Post edited");

    Ok(see_other(detail_location(post_id)))
}
