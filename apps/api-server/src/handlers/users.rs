//! User handlers.

use actix_web::{HttpResponse, web};
use blog_shared::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use uuid::Uuid;

use crate::mapper;
use crate::middleware::error::AppResult;
use crate::middleware::validated::ValidatedJson;
use crate::state::AppState;

/// GET /api/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users: Vec<UserResponse> = state
        .users
        .list()
        .await?
        .into_iter()
        .map(mapper::user_response)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/users/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let user = state.users.get(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(mapper::user_response(user)))
}

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    body: ValidatedJson<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let user = state.users.create(mapper::new_user(body.into_inner())).await?;

    Ok(HttpResponse::Created().json(mapper::user_response(user)))
}

/// PUT /api/users/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: ValidatedJson<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let user = state
        .users
        .update(id.into_inner(), mapper::user_changes(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(mapper::user_response(user)))
}

/// DELETE /api/users/{id}
pub async fn delete(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    state.users.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
