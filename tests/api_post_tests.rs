//! 帖子 API 集成测试

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

mod common;
use common::{create_test_app, first_error, register, send};

#[tokio::test]
async fn test_posts_require_token() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/api/posts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "No token, authorization denied");
}

#[tokio::test]
async fn test_create_and_list_posts() {
    let app = create_test_app();
    let token = register(&app, "Ana", "a@x.com").await;

    let (status, post) = send(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({"text": "first"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(post["text"], "first");
    assert_eq!(post["name"], "Ana");
    assert_eq!(post["likes"], json!([]));

    send(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({"text": "second"})),
    )
    .await;

    let (status, posts) = send(&app, "GET", "/api/posts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["text"], "second");

    let id = post["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/posts/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], post["id"]);
}

#[tokio::test]
async fn test_create_post_requires_text() {
    let app = create_test_app();
    let token = register(&app, "Ana", "a@x.com").await;

    let (status, body) = send(&app, "POST", "/api/posts", Some(&token), Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(first_error(&body), "Text is required");
}

#[tokio::test]
async fn test_get_missing_or_invalid_post() {
    let app = create_test_app();
    let token = register(&app, "Ana", "a@x.com").await;

    for id in [Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let (status, body) = send(&app, "GET", &format!("/api/posts/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"msg": "Post not found"}));
    }
}

#[tokio::test]
async fn test_delete_post_ownership() {
    let app = create_test_app();
    let ana = register(&app, "Ana", "a@x.com").await;
    let bob = register(&app, "Bob", "b@x.com").await;

    let (_, post) = send(&app, "POST", "/api/posts", Some(&ana), Some(json!({"text": "mine"}))).await;
    let uri = format!("/api/posts/{}", post["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"msg": "User not authorized"}));

    let (status, body) = send(&app, "DELETE", &uri, Some(&ana), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"msg": "Post removed"}));

    // 资源不存在时先返回 404，而不是 401
    let (status, _) = send(&app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_like_and_unlike() {
    let app = create_test_app();
    let ana = register(&app, "Ana", "a@x.com").await;
    let bob = register(&app, "Bob", "b@x.com").await;

    let (_, post) = send(&app, "POST", "/api/posts", Some(&ana), Some(json!({"text": "hi"}))).await;
    let id = post["id"].as_str().unwrap();

    let (status, likes) = send(&app, "PUT", &format!("/api/posts/like/{}", id), Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(likes.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "PUT", &format!("/api/posts/like/{}", id), Some(&bob), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(first_error(&body), "Post already liked");

    let (status, body) = send(&app, "PUT", &format!("/api/posts/unlike/{}", id), Some(&ana), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(first_error(&body), "Post has not been liked");

    let (status, likes) = send(&app, "PUT", &format!("/api/posts/unlike/{}", id), Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(likes, json!([]));

    let missing = Uuid::new_v4();
    let (status, _) = send(&app, "PUT", &format!("/api/posts/like/{}", missing), Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let app = create_test_app();
    let ana = register(&app, "Ana", "a@x.com").await;
    let bob = register(&app, "Bob", "b@x.com").await;

    let (_, post) = send(&app, "POST", "/api/posts", Some(&ana), Some(json!({"text": "hi"}))).await;
    let id = post["id"].as_str().unwrap();

    let (status, comments) = send(
        &app,
        "POST",
        &format!("/api/posts/comment/{}", id),
        Some(&bob),
        Some(json!({"text": "hello Ana"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments[0]["name"], "Bob");
    let comment_id = comments[0]["id"].as_str().unwrap();
    let uri = format!("/api/posts/comment/{}/{}", id, comment_id);

    let (status, body) = send(&app, "DELETE", &uri, Some(&ana), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "User not authorized");

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/posts/comment/{}/{}", id, Uuid::new_v4()),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Comment not found");

    let (status, comments) = send(&app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments, json!([]));
}
