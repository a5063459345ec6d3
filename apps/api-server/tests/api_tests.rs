//! HTTP tests: the real app over an in-memory SQLite database.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};

use api_server::observability::RequestIdMiddleware;
use api_server::state::AppState;

async fn test_state() -> AppState {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");
    AppState::from_connection(db)
}

/// The production app (minus the tracing logger) on a fresh database.
macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(test_state().await))
                .configure(api_server::configure_app),
        )
        .await
    };
}

async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, json)
}

/// Send a request that must answer 201 and return the created body.
async fn created<S, R, B>(app: &S, req: R) -> Value
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

fn user_req(email: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/api/users").set_json(json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
    }))
}

fn tag_req(name: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/tags")
        .set_json(json!({ "name": name }))
}

fn post_req(author_id: &Value, slug: &str, tag_ids: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/api/posts").set_json(json!({
        "authorId": author_id,
        "slug": slug,
        "title": format!("Title {slug}"),
        "content": "Content long enough to pass validation.",
        "tagIds": tag_ids,
    }))
}

#[actix_rt::test]
async fn test_health_reports_database_and_request_id() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "req-123"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("x-request-id").unwrap(), "req-123");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["database"], "up");
    assert_eq!(body["requestId"], "req-123");
}

#[actix_rt::test]
async fn test_request_id_is_generated_when_missing() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/tags").to_request();
    let res = test::call_service(&app, req).await;

    let id = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[actix_rt::test]
async fn test_user_crud() {
    let app = test_app!();
    let user = created(&app, user_req("ada@example.com").to_request()).await;
    let id = user["id"].as_str().unwrap();
    assert_eq!(user["firstName"], "Ada");
    assert!(user.get("passwordDigest").is_none());

    let (status, updated) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/users/{id}"))
            .set_json(json!({ "lastName": "Byron", "birthday": "1815-12-10" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["firstName"], "Ada");
    assert_eq!(updated["lastName"], "Byron");
    assert_eq!(updated["birthday"], "1815-12-10");

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/users/{id}")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["title"], "Not Found");
}

#[actix_rt::test]
async fn test_duplicate_email_is_conflict() {
    let app = test_app!();
    created(&app, user_req("ada@example.com").to_request()).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/api/users").set_json(json!({
            "firstName": "Other",
            "lastName": "Person",
            "email": "ada@example.com",
        }))
        .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["type"], "about:blank");
    let (_, users) = send(&app, test::TestRequest::get().uri("/api/users").to_request()).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_invalid_body_is_unprocessable() {
    let app = test_app!();

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/api/users").set_json(json!({
            "firstName": "A",
            "lastName": "Lovelace",
            "email": "nope",
        }))
        .to_request(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("first_name"), "{detail}");
    assert!(detail.contains("email"), "{detail}");
}

#[actix_rt::test]
async fn test_malformed_input_is_bad_request() {
    let app = test_app!();

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/tags")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri("/api/posts/not-a-uuid").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        test::TestRequest::get().uri("/api/posts?page=minus-one").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_list_posts_with_unaddressable_page_is_bad_request() {
    let app = test_app!();

    let (status, body) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/posts?page=18446744073709551615&size=10")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/api/posts?page=3&size=10").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], json!([]));
}

#[actix_rt::test]
async fn test_post_with_tags_and_comments() {
    let app = test_app!();
    let author = created(&app, user_req("ada@example.com").to_request()).await;
    let tag_ids: Vec<Value> = {
        let mut ids = Vec::new();
        for name in ["rust", "sql", "web"] {
            ids.push(created(&app, tag_req(name).to_request()).await["id"].clone());
        }
        ids
    };

    let post = created(&app, post_req(&author["id"], "hello", json!(tag_ids)).to_request()).await;
    let post_id = post["id"].as_str().unwrap().to_string();
    assert_eq!(post["authorId"], author["id"]);
    assert_eq!(post["published"], false);
    assert_eq!(post["tags"].as_array().unwrap().len(), 3);

    let (status, comment) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/comments")
            .set_json(json!({ "body": "Great post", "postId": post_id }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["postId"], post_id.as_str());

    let (status, fetched) = send(
        &app,
        test::TestRequest::get().uri(&format!("/api/posts/{post_id}")).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["comments"][0]["body"], "Great post");

    let (_, by_post) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/comments/post/{post_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(by_post.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/tags/{}", tag_ids[0].as_str().unwrap()))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/posts/{post_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, comments) = send(
        &app,
        test::TestRequest::get().uri("/api/comments").to_request(),
    )
    .await;
    assert!(comments.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_post_update_tag_ids_null_clears() {
    let app = test_app!();
    let author = created(&app, user_req("ada@example.com").to_request()).await;
    let tag = created(&app, tag_req("rust").to_request()).await;
    let req = post_req(&author["id"], "hello", json!([tag["id"]]));
    let post = created(&app, req.to_request()).await;
    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());

    let (status, kept) = send(
        &app,
        test::TestRequest::put().uri(&uri).set_json(json!({
            "title": "New title",
            "content": "New content, still long enough.",
        }))
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kept["title"], "New title");
    assert_eq!(kept["tags"].as_array().unwrap().len(), 1);

    let (status, cleared) = send(
        &app,
        test::TestRequest::put().uri(&uri).set_json(json!({
            "title": "New title",
            "content": "New content, still long enough.",
            "tagIds": null,
        }))
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["tags"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_post_list_filters_and_pages() {
    let app = test_app!();
    let ada = created(&app, user_req("ada@example.com").to_request()).await;
    let grace = created(&app, user_req("grace@example.com").to_request()).await;
    let tag = created(&app, tag_req("rust").to_request()).await;
    created(&app, post_req(&ada["id"], "ada-1", json!([tag["id"]])).to_request()).await;
    created(&app, post_req(&ada["id"], "ada-2", json!([])).to_request()).await;
    created(&app, post_req(&grace["id"], "grace-1", json!([])).to_request()).await;

    let (status, page) = send(
        &app,
        test::TestRequest::get().uri(&format!(
            "/api/posts?authorId={}",
            ada["id"].as_str().unwrap()
        ))
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 2);
    for post in page["content"].as_array().unwrap() {
        assert_eq!(post["authorId"], ada["id"]);
    }

    let (_, page) = send(
        &app,
        test::TestRequest::get().uri("/api/posts?page=1&size=2").to_request(),
    )
    .await;
    assert_eq!(page["page"], 1);
    assert_eq!(page["size"], 2);
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["content"].as_array().unwrap().len(), 1);

    let (_, page) = send(
        &app,
        test::TestRequest::get().uri(&format!(
            "/api/posts?tagId={}",
            tag["id"].as_str().unwrap()
        ))
        .to_request(),
    )
    .await;
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["content"][0]["slug"], "ada-1");

    let (_, page) = send(
        &app,
        test::TestRequest::get().uri("/api/posts?titleCont=GRACE").to_request(),
    )
    .await;
    assert_eq!(page["totalElements"], 1);

    let (_, page) = send(
        &app,
        test::TestRequest::get().uri("/api/posts?createdAtLt=2000-01-01").to_request(),
    )
    .await;
    assert_eq!(page["totalElements"], 0);
}

#[actix_rt::test]
async fn test_comment_requires_post_id() {
    let app = test_app!();

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/comments")
            .set_json(json!({ "body": "Orphan" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Post ID is required");

    let (status, _) = send(
        &app,
        test::TestRequest::post().uri("/api/comments").set_json(json!({
            "body": "Orphan",
            "postId": uuid::Uuid::new_v4(),
        }))
        .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_tag_patch_and_bulk() {
    let app = test_app!();
    let tag = created(&app, tag_req("rust").to_request()).await;
    let uri = format!("/api/tags/{}", tag["id"].as_str().unwrap());

    let (status, same) = send(
        &app,
        test::TestRequest::patch().uri(&uri).set_json(json!({})).to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(same["name"], "rust");

    let (status, _) = send(
        &app,
        test::TestRequest::patch()
            .uri(&uri)
            .set_json(json!({ "name": null }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, renamed) = send(
        &app,
        test::TestRequest::patch()
            .uri(&uri)
            .set_json(json!({ "name": "rustlang" }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "rustlang");

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/tags/bulk")
            .set_json(json!([{ "name": "web" }, { "name": "rustlang" }]))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/tags/bulk")
            .set_json(json!([{ "name": "web" }, { "name": "x" }]))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("[1].name"));

    let (status, created) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/tags/bulk")
            .set_json(json!([{ "name": "web" }, { "name": "sql" }]))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().unwrap().len(), 2);

    let (_, all) = send(&app, test::TestRequest::get().uri("/api/tags").to_request()).await;
    let names: Vec<_> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["rustlang", "sql", "web"]);
}
