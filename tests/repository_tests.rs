//! 仓库层测试
//!
//! 同一组契约测试分别运行在内存存储和 PostgreSQL 存储上。
//! PostgreSQL 测试默认忽略，需要设置 TEST_DATABASE_URL 后使用 `--ignored` 运行。

use serial_test::serial;
use social_api::{
    db,
    models::{
        post::{NewComment, NewPost},
        profile::Profile,
        user::NewUser,
    },
    repository::{StoreError, Stores},
};
use uuid::Uuid;

mod common;
use common::create_test_config;

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        avatar: "https://www.gravatar.com/avatar/abc".to_string(),
    }
}

fn new_post(user: Uuid, text: &str) -> NewPost {
    NewPost {
        user,
        text: text.to_string(),
        name: "Test User".to_string(),
        avatar: String::new(),
    }
}

fn new_comment(user: Uuid, text: &str) -> NewComment {
    NewComment {
        user,
        text: text.to_string(),
        name: "Commenter".to_string(),
        avatar: String::new(),
    }
}

// ==================== 契约测试 ====================

async fn user_store_contract(stores: &Stores) {
    let user = stores.users.create(new_user("ana@example.com")).await.unwrap();

    let by_email = stores
        .users
        .find_by_email("ana@example.com")
        .await
        .unwrap()
        .expect("user by email");
    assert_eq!(by_email.id, user.id);

    let by_id = stores.users.find_by_id(&user.id).await.unwrap().expect("user by id");
    assert_eq!(by_id.email, "ana@example.com");

    let duplicate = stores.users.create(new_user("ana@example.com")).await;
    assert!(matches!(duplicate, Err(StoreError::Conflict(_))));

    assert!(stores.users.delete(&user.id).await.unwrap());
    assert!(!stores.users.delete(&user.id).await.unwrap());
    assert!(stores.users.find_by_id(&user.id).await.unwrap().is_none());

    // 删除后邮箱可以重新使用
    stores.users.create(new_user("ana@example.com")).await.unwrap();

    stores.users.ping().await.unwrap();
}

async fn post_store_contract(stores: &Stores) {
    let author = stores.users.create(new_user("author@example.com")).await.unwrap();
    let reader = stores.users.create(new_user("reader@example.com")).await.unwrap();

    let first = stores.posts.create(new_post(author.id, "first")).await.unwrap();
    let second = stores.posts.create(new_post(author.id, "second")).await.unwrap();

    let posts = stores.posts.list().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, second.id);
    assert_eq!(posts[1].id, first.id);

    // 点赞
    let likes = stores.posts.add_like(&first.id, &reader.id).await.unwrap();
    assert_eq!(likes.len(), 1);
    let likes = stores.posts.add_like(&first.id, &author.id).await.unwrap();
    assert_eq!(likes[0].user, author.id);

    let again = stores.posts.add_like(&first.id, &reader.id).await;
    assert!(matches!(again, Err(StoreError::Conflict(_))));

    let likes = stores.posts.remove_like(&first.id, &reader.id).await.unwrap();
    assert_eq!(likes.len(), 1);
    let not_liked = stores.posts.remove_like(&first.id, &reader.id).await;
    assert!(matches!(not_liked, Err(StoreError::NotFound)));

    let missing = stores.posts.add_like(&Uuid::new_v4(), &reader.id).await;
    assert!(matches!(missing, Err(StoreError::NotFound)));

    // 评论
    stores
        .posts
        .add_comment(&first.id, new_comment(reader.id, "one"))
        .await
        .unwrap();
    let comments = stores
        .posts
        .add_comment(&first.id, new_comment(reader.id, "two"))
        .await
        .unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "two");

    let comments = stores
        .posts
        .remove_comment(&first.id, &comments[0].id)
        .await
        .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].text, "one");

    let missing = stores.posts.remove_comment(&first.id, &Uuid::new_v4()).await;
    assert!(matches!(missing, Err(StoreError::NotFound)));

    let stored = stores.posts.find_by_id(&first.id).await.unwrap().expect("post");
    assert!(stored.is_liked_by(&author.id));
    assert_eq!(stored.comments.len(), 1);

    // 删除
    assert!(stores.posts.delete(&second.id).await.unwrap());
    assert!(!stores.posts.delete(&second.id).await.unwrap());
    assert_eq!(stores.posts.delete_by_user(&author.id).await.unwrap(), 1);
    assert!(stores.posts.list().await.unwrap().is_empty());
}

async fn profile_store_contract(stores: &Stores) {
    let user = stores.users.create(new_user("profile@example.com")).await.unwrap();
    assert!(stores.profiles.find_by_user(&user.id).await.unwrap().is_none());

    let profile = Profile::new(user.id, "Developer".to_string(), vec!["rust".to_string()]);
    let saved = stores.profiles.save(&profile).await.unwrap();
    assert_eq!(saved.status, "Developer");

    let mut updated = saved.clone();
    updated.status = "Senior Developer".to_string();
    updated.skills.push("sql".to_string());
    stores.profiles.save(&updated).await.unwrap();

    let found = stores
        .profiles
        .find_by_user(&user.id)
        .await
        .unwrap()
        .expect("profile");
    assert_eq!(found.id, saved.id);
    assert_eq!(found.status, "Senior Developer");
    assert_eq!(found.skills, vec!["rust", "sql"]);
    assert_eq!(stores.profiles.list().await.unwrap().len(), 1);

    assert!(stores.profiles.delete_by_user(&user.id).await.unwrap());
    assert!(!stores.profiles.delete_by_user(&user.id).await.unwrap());
    assert!(stores.profiles.list().await.unwrap().is_empty());
}

// ==================== 内存存储 ====================

#[tokio::test]
async fn test_memory_user_store() {
    user_store_contract(&Stores::memory()).await;
}

#[tokio::test]
async fn test_memory_post_store() {
    post_store_contract(&Stores::memory()).await;
}

#[tokio::test]
async fn test_memory_profile_store() {
    profile_store_contract(&Stores::memory()).await;
}

// ==================== PostgreSQL 存储 ====================

async fn postgres_stores() -> Stores {
    let config = create_test_config();
    let pool = db::create_pool(&config.database)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE post_comments, post_likes, posts, profiles, users CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to clean test database");

    Stores::postgres(pool)
}

#[tokio::test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_postgres_user_store() {
    user_store_contract(&postgres_stores().await).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_postgres_post_store() {
    post_store_contract(&postgres_stores().await).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_postgres_profile_store() {
    profile_store_contract(&postgres_stores().await).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_postgres_account_delete_cascades() {
    let stores = postgres_stores().await;
    let user = stores.users.create(new_user("gone@example.com")).await.unwrap();
    stores.posts.create(new_post(user.id, "bye")).await.unwrap();
    stores
        .profiles
        .save(&Profile::new(user.id, "Developer".to_string(), vec![]))
        .await
        .unwrap();

    stores.users.delete(&user.id).await.unwrap();

    assert!(stores.posts.list().await.unwrap().is_empty());
    assert!(stores.profiles.find_by_user(&user.id).await.unwrap().is_none());
}
