//! Post handlers.

use actix_web::{HttpResponse, web};

use vellum_core::DomainError;
use vellum_core::domain::{Category, NewPost};
use vellum_core::{ownership, slug};
use vellum_shared::dto::{CreatePostRequest, PostQuery, PostResponse, UpdatePostRequest};
use vellum_shared::{FieldError, ValidationError};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Load the related category for a response body, if one is assigned.
async fn load_category(
    state: &AppState,
    category_id: Option<i32>,
) -> Result<Option<Category>, AppError> {
    match category_id {
        Some(id) => Ok(state.categories.find_by_id(id).await?),
        None => Ok(None),
    }
}

/// Reject references to categories that do not exist.
async fn ensure_category_exists(state: &AppState, id: i32) -> Result<(), AppError> {
    if state.categories.find_by_id(id).await?.is_none() {
        return Err(ValidationError {
            errors: vec![FieldError {
                field: "category_id",
                message: "category does not exist".to_string(),
            }],
        }
        .into());
    }
    Ok(())
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostQuery>,
) -> AppResult<HttpResponse> {
    let filter = query.into_inner().into_filter()?;
    let posts = state.posts.list_published(&filter).await?;

    let mut responses = Vec::with_capacity(posts.len());
    for post in posts {
        let category = load_category(&state, post.category_id).await?;
        responses.push(PostResponse::from_parts(post, category));
    }

    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    // Drafts stay reachable by id; only the listing hides them.
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound { entity: "post" })?;

    let category = load_category(&state, post.category_id).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from_parts(post, category)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    if let Some(category_id) = req.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    // Slug from the title; on collision append the author id once. A
    // collision on the suffixed slug as well falls through to the unique
    // index and comes back as a duplicate error.
    let mut post_slug = slug::generate(&req.title);
    if state.posts.find_by_slug(&post_slug).await?.is_some() {
        post_slug = format!("{}-{}", post_slug, identity.user_id);
    }

    let post = state
        .posts
        .insert(NewPost {
            title: req.title,
            slug: post_slug,
            content: req.content,
            published: req.published,
            author_id: identity.user_id,
            category_id: req.category_id,
        })
        .await?;

    tracing::info!(post_id = post.id, author_id = post.author_id, "post created");

    let category = load_category(&state, post.category_id).await?;

    Ok(HttpResponse::Created().json(PostResponse::from_parts(post, category)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound { entity: "post" })?;

    ownership::require_owner(post.author_id, identity.user_id)?;

    if let Some(Some(category_id)) = req.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    let changes = req.into_changes();
    if changes.is_empty() {
        // Nothing to apply; leave updated_at untouched.
        let category = load_category(&state, post.category_id).await?;
        return Ok(HttpResponse::Ok().json(PostResponse::from_parts(post, category)));
    }

    let updated = state.posts.update_fields(id, changes).await?;
    let category = load_category(&state, updated.category_id).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from_parts(updated, category)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound { entity: "post" })?;

    ownership::require_owner(post.author_id, identity.user_id)?;

    state.posts.delete(id).await?;
    tracing::info!(post_id = id, "post deleted");

    Ok(HttpResponse::NoContent().finish())
}
