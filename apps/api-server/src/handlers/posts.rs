//! Post handlers.

use actix_web::{HttpResponse, web};
use blog_shared::dto::{CreatePostRequest, PostListQuery, UpdatePostRequest};
use uuid::Uuid;

use crate::mapper;
use crate::middleware::error::AppResult;
use crate::middleware::validated::ValidatedJson;
use crate::state::AppState;

/// GET /api/posts?page=&size=&authorId=&createdAtGt=&createdAtLt=&tagId=&titleCont=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let (filter, page) = mapper::post_filter(&query);
    let posts = state.posts.list(&filter, page).await?;

    Ok(HttpResponse::Ok().json(mapper::page_response(posts, mapper::post_response)))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.get(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(mapper::post_response(post)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: ValidatedJson<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let input = mapper::new_post(body.into_inner())?;
    let post = state.posts.create(input).await?;

    Ok(HttpResponse::Created().json(mapper::post_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: ValidatedJson<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(id.into_inner(), mapper::post_changes(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(mapper::post_response(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, id: web::Path<Uuid>) -> AppResult<HttpResponse> {
    state.posts.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
