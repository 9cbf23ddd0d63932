//! Migration: course requests submitted by managers.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseRequests::Title).string().not_null())
                    .col(ColumnDef::new(CourseRequests::Description).text().not_null())
                    .col(ColumnDef::new(CourseRequests::Concept).text().not_null())
                    .col(ColumnDef::new(CourseRequests::Duration).string().not_null())
                    .col(
                        ColumnDef::new(CourseRequests::Status)
                            .string_len(16)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(CourseRequests::ManagerId).uuid().not_null())
                    .col(
                        ColumnDef::new(CourseRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_requests_manager")
                            .from(CourseRequests::Table, CourseRequests::ManagerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_requests_manager_id")
                    .table(CourseRequests::Table)
                    .col(CourseRequests::ManagerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum CourseRequests {
    Table,
    Id,
    Title,
    Description,
    Concept,
    Duration,
    Status,
    ManagerId,
    CreatedAt,
}
