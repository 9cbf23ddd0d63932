//! Migration: course assignments and employee progress.

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
                    .table(AssignedCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignedCourses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AssignedCourses::CourseId).uuid().not_null())
                    .col(ColumnDef::new(AssignedCourses::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(AssignedCourses::AssignedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(AssignedCourses::AssignedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AssignedCourses::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AssignedCourses::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AssignedCourses::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assigned_courses_course")
                            .from(AssignedCourses::Table, AssignedCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assigned_courses_employee")
                            .from(AssignedCourses::Table, AssignedCourses::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assigned_courses_course_employee")
                    .table(AssignedCourses::Table)
                    .col(AssignedCourses::CourseId)
                    .col(AssignedCourses::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assigned_courses_employee_id")
                    .table(AssignedCourses::Table)
                    .col(AssignedCourses::EmployeeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AssignedCourses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AssignedCourses {
    Table,
    Id,
    CourseId,
    EmployeeId,
    AssignedBy,
    AssignedAt,
    Progress,
    IsCompleted,
    CompletedAt,
}
