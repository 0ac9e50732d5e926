//! Category handlers.

use actix_web::{HttpResponse, web};

use vellum_core::DomainError;
use vellum_core::domain::NewCategory;
use vellum_shared::dto::{CategoryResponse, CreateCategoryRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;
    let response: Vec<CategoryResponse> = categories.into_iter().map(CategoryResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/categories
pub async fn create_category(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    if state.categories.find_by_slug(&req.slug).await?.is_some() {
        return Err(DomainError::DuplicateSlug(req.slug).into());
    }
    if state.categories.find_by_name(&req.name).await?.is_some() {
        return Err(DomainError::DuplicateName(req.name).into());
    }

    let category = state
        .categories
        .insert(NewCategory {
            name: req.name,
            slug: req.slug,
        })
        .await?;

    tracing::info!(category_id = category.id, "category created");

    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}

/// DELETE /api/categories/{id}
///
/// Any authenticated user may delete a category. Posts that referenced it
/// survive with their category cleared.
pub async fn delete_category(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if state.categories.find_by_id(id).await?.is_none() {
        return Err(DomainError::NotFound { entity: "category" }.into());
    }

    state.categories.delete(id).await?;
    tracing::info!(category_id = id, "category deleted");

    Ok(HttpResponse::NoContent().finish())
}
