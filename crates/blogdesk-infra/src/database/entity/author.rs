//! Author entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blogdesk_core::domain::Author;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub img: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            bio: model.bio,
            img: model.img,
            is_active: model.is_active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Author> for ActiveModel {
    fn from(author: Author) -> Self {
        Self {
            id: Set(author.id),
            name: Set(author.name),
            bio: Set(author.bio),
            img: Set(author.img),
            is_active: Set(author.is_active),
            created_at: Set(author.created_at.into()),
            updated_at: Set(author.updated_at.into()),
        }
    }
}
