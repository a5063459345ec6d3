//! Comment handlers.

use actix_web::{HttpResponse, web};
use blog_shared::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use uuid::Uuid;

use crate::mapper;
use crate::middleware::error::AppResult;
use crate::middleware::validated::ValidatedJson;
use crate::state::AppState;

/// GET /api/comments
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let comments: Vec<CommentResponse> = state
        .comments
        .list()
        .await?
        .into_iter()
        .map(mapper::comment_response)
        .collect();

    Ok(HttpResponse::Ok().json(comments))
}

/// GET /api/comments/post/{post_id}
pub async fn list_by_post(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments: Vec<CommentResponse> = state
        .comments
        .list_by_post(post_id.into_inner())
        .await?
        .into_iter()
        .map(mapper::comment_response)
        .collect();

    Ok(HttpResponse::Ok().json(comments))
}

/// GET /api/comments/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let comment = state.comments.get(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(mapper::comment_response(comment)))
}

/// POST /api/comments
pub async fn create(
    state: web::Data<AppState>,
    body: ValidatedJson<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .create(mapper::new_comment(body.into_inner()))
        .await?;

    Ok(HttpResponse::Created().json(mapper::comment_response(comment)))
}

/// PUT /api/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: ValidatedJson<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .update(id.into_inner(), mapper::comment_changes(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(mapper::comment_response(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    state.comments.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
