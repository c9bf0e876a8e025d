use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // author_id carries no foreign key; deleting an author leaves it dangling.
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::Title).string().not_null())
                    .col(ColumnDef::new(Posts::Metadesc).text().not_null().default(""))
                    .col(ColumnDef::new(Posts::Slug).string().not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::Img).string().not_null().default(""))
                    .col(ColumnDef::new(Posts::Tags).json_binary().not_null())
                    .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Posts::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Posts::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Posts::PublishedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for index in post_indexes() {
            manager.create_index(index).await?;
        }

        manager
            .get_connection()
            .execute_unprepared(TAGS_GIN_INDEX)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

/// Containment lookups on the JSONB tag array.
const TAGS_GIN_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_posts_tags ON posts USING GIN (tags)";

fn post_indexes() -> Vec<IndexCreateStatement> {
    [
        ("idx_posts_slug", Posts::Slug),
        ("idx_posts_author_id", Posts::AuthorId),
        ("idx_posts_status", Posts::Status),
        ("idx_posts_published_at", Posts::PublishedAt),
        ("idx_posts_view_count", Posts::ViewCount),
    ]
    .into_iter()
    .map(|(name, column)| {
        Index::create()
            .name(name)
            .table(Posts::Table)
            .col(column)
            .to_owned()
    })
    .collect()
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Metadesc,
    Slug,
    Content,
    Img,
    Tags,
    AuthorId,
    Status,
    ViewCount,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_indexes() {
        let sql: Vec<String> = post_indexes()
            .iter()
            .map(|index| index.to_string(PostgresQueryBuilder))
            .collect();

        assert_eq!(sql.len(), 5);
        assert!(sql.iter().all(|s| !s.contains("UNIQUE")));
        assert!(sql[0].contains(r#""idx_posts_slug""#));
        assert!(sql[4].contains(r#""view_count""#));
        assert!(TAGS_GIN_INDEX.contains("USING GIN (tags)"));
    }
}
