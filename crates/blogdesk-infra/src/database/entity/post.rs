//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blogdesk_core::domain::Post;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub metadesc: String,
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub img: String,
    /// JSON array of lowercase tags.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub author_id: Uuid,
    pub status: String,
    pub view_count: i64,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        // Rows are only ever written through `From<Post>`, so both fallbacks
        // are unreachable for data this service stored itself.
        let tags = serde_json::from_value(model.tags).unwrap_or_default();
        let status = model.status.parse().unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            metadesc: model.metadesc,
            slug: model.slug,
            content: model.content,
            img: model.img,
            tags,
            author_id: model.author_id,
            status,
            view_count: model.view_count,
            published_at: model.published_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            metadesc: Set(post.metadesc),
            slug: Set(post.slug),
            content: Set(post.content),
            img: Set(post.img),
            tags: Set(Json::from(post.tags)),
            author_id: Set(post.author_id),
            status: Set(post.status.as_str().to_string()),
            view_count: Set(post.view_count),
            published_at: Set(post.published_at.map(Into::into)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
