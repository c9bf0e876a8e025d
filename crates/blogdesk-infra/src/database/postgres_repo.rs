//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use blogdesk_core::domain::{Author, AuthorFilter, Post, PostFilter};
use blogdesk_core::error::RepoError;
use blogdesk_core::ports::{AuthorRepository, PostRepository};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL author repository.
pub type PostgresAuthorRepository = PostgresBaseRepository<AuthorEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn list(&self, filter: &AuthorFilter) -> Result<Vec<Author>, RepoError> {
        let mut query = AuthorEntity::find();
        if let Some(is_active) = filter.is_active {
            query = query.filter(author::Column::IsActive.eq(is_active));
        }

        let result = query
            .order_by_desc(author::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = AuthorEntity::find()
            .filter(author::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();
        if let Some(status) = filter.status {
            query = query.filter(post::Column::Status.eq(status.as_str()));
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(post::Column::AuthorId.eq(author_id));
        }

        tracing::debug!(?filter, "Listing posts");

        let result = query
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_authors(&self, author_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, RepoError> {
        if author_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, i64)> = PostEntity::find()
            .select_only()
            .column(post::Column::AuthorId)
            .column_as(Expr::col(post::Column::Id).count(), "posts_count")
            .filter(post::Column::AuthorId.is_in(author_ids.iter().copied()))
            .group_by(post::Column::AuthorId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(rows
            .into_iter()
            .map(|(author_id, count)| (author_id, count.max(0) as u64))
            .collect())
    }

    async fn delete_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .filter(post::Column::AuthorId.eq(author_id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected)
    }
}
