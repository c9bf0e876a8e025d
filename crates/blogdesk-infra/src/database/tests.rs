use std::collections::BTreeMap;

use blogdesk_core::domain::{Author, AuthorFilter, Post, PostFilter, PostStatus};
use blogdesk_core::error::RepoError;
use blogdesk_core::ports::{AuthorRepository, BaseRepository, PostRepository};
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use crate::database::entity::{author, post};
use crate::database::postgres_repo::{PostgresAuthorRepository, PostgresPostRepository};

fn author_model(name: &str, is_active: bool) -> author::Model {
    let now = Utc::now();
    author::Model {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        bio: String::new(),
        img: String::new(),
        is_active,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn post_model(author_id: Uuid) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        title: "Test Post".to_owned(),
        metadesc: String::new(),
        slug: "test-post".to_owned(),
        content: "Content".to_owned(),
        img: String::new(),
        tags: serde_json::json!(["rust", "web"]),
        author_id,
        status: "published".to_owned(),
        view_count: 7,
        published_at: Some(now.into()),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let author_id = Uuid::new_v4();
    let model = post_model(author_id);
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.tags, vec!["rust", "web"]);
    assert_eq!(post.status, PostStatus::Published);
    assert_eq!(post.author_id, author_id);
    assert!(post.published_at.is_some());
}

#[tokio::test]
async fn test_find_missing_author_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<author::Model>::new()])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);

    let result: Option<Author> = repo.find_by_id(Uuid::new_v4()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_insert_author_returns_stored_row() {
    let model = author_model("Jane Doe", true);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model.clone()]])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);

    let saved = repo.insert(Author::from(model.clone())).await.unwrap();
    assert_eq!(saved.id, model.id);
    assert_eq!(saved.name, "Jane Doe");
}

#[tokio::test]
async fn test_list_authors_filters_and_sorts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            author_model("Newer", true),
            author_model("Older", true),
        ]])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);

    let authors = repo
        .list(&AuthorFilter {
            is_active: Some(true),
        })
        .await
        .unwrap();
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0].name, "Newer");

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(log.contains("is_active"));
    assert!(log.contains("DESC"));
}

#[tokio::test]
async fn test_list_posts_by_status() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(Uuid::new_v4())]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo
        .list(&PostFilter {
            status: Some(PostStatus::Published),
            author_id: None,
        })
        .await
        .unwrap();
    assert_eq!(posts.len(), 1);

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(log.contains("status"));
    assert!(log.contains("published"));
}

#[tokio::test]
async fn test_count_by_authors() {
    let author_id = Uuid::new_v4();
    let row: BTreeMap<&str, Value> = [
        ("author_id", Value::from(author_id)),
        ("posts_count", Value::from(2i64)),
    ]
    .into_iter()
    .collect();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let counts = repo.count_by_authors(&[author_id]).await.unwrap();
    assert_eq!(counts.get(&author_id), Some(&2));
}

#[tokio::test]
async fn test_count_by_authors_skips_query_for_empty_input() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = PostgresPostRepository::new(db);

    assert!(repo.count_by_authors(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_by_author_reports_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 3,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert_eq!(repo.delete_by_author(Uuid::new_v4()).await.unwrap(), 3);
}
