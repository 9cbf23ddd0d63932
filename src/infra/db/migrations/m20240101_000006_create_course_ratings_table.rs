//! Migration: course ratings, one per employee and course.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000003_create_courses_table::Courses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseRatings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseRatings::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseRatings::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(CourseRatings::Rating).integer().not_null())
                    .col(
                        ColumnDef::new(CourseRatings::Review)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(CourseRatings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CourseRatings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_ratings_course")
                            .from(CourseRatings::Table, CourseRatings::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_ratings_employee")
                            .from(CourseRatings::Table, CourseRatings::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_course_ratings_course_employee")
                    .table(CourseRatings::Table)
                    .col(CourseRatings::CourseId)
                    .col(CourseRatings::EmployeeId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseRatings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CourseRatings {
    Table,
    Id,
    CourseId,
    EmployeeId,
    Rating,
    Review,
    CreatedAt,
    UpdatedAt,
}
