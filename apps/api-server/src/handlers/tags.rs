//! Tag handlers.

use actix_web::{HttpResponse, web};
use blog_shared::dto::{CreateTagRequest, TagResponse, UpdateTagRequest};
use uuid::Uuid;
use validator::Validate;

use crate::mapper;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::validated::ValidatedJson;
use crate::state::AppState;

/// GET /api/tags
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags: Vec<TagResponse> = state
        .tags
        .list()
        .await?
        .into_iter()
        .map(mapper::tag_response)
        .collect();

    Ok(HttpResponse::Ok().json(tags))
}

/// GET /api/tags/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let tag = state.tags.get(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(mapper::tag_response(tag)))
}

/// POST /api/tags
pub async fn create(
    state: web::Data<AppState>,
    body: ValidatedJson<CreateTagRequest>,
) -> AppResult<HttpResponse> {
    let tag = state.tags.create(body.into_inner().name).await?;

    Ok(HttpResponse::Created().json(mapper::tag_response(tag)))
}

/// POST /api/tags/bulk
///
/// Every element is validated before anything is written.
pub async fn create_bulk(
    state: web::Data<AppState>,
    body: web::Json<Vec<CreateTagRequest>>,
) -> AppResult<HttpResponse> {
    let requests = body.into_inner();
    for (index, request) in requests.iter().enumerate() {
        request
            .validate()
            .map_err(|e| AppError::validation_at(index, &e))?;
    }

    let names = requests.into_iter().map(|r| r.name).collect();
    let tags: Vec<TagResponse> = state
        .tags
        .create_bulk(names)
        .await?
        .into_iter()
        .map(mapper::tag_response)
        .collect();

    Ok(HttpResponse::Created().json(tags))
}

/// PATCH /api/tags/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: ValidatedJson<UpdateTagRequest>,
) -> AppResult<HttpResponse> {
    let tag = state
        .tags
        .update(id.into_inner(), mapper::tag_changes(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(mapper::tag_response(tag)))
}

/// DELETE /api/tags/{id}
pub async fn delete(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    state.tags.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
