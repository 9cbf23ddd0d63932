//! Migration: assessments and their attempts.

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
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Assessments::TotalMarks).double().not_null())
                    .col(ColumnDef::new(Assessments::PassingMarks).double().not_null())
                    .col(
                        ColumnDef::new(Assessments::NumberOfQuestions)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::Questions).json_binary().not_null())
                    .col(
                        ColumnDef::new(Assessments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Assessments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessments_course")
                            .from(Assessments::Table, Assessments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assessments_course_id")
                    .table(Assessments::Table)
                    .col(Assessments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AssessmentAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssessmentAttempts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::AssessmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssessmentAttempts::EmployeeId).uuid().not_null())
                    .col(
                        ColumnDef::new(AssessmentAttempts::Answers)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::TotalMarks)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::PassingMarks)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssessmentAttempts::Score).double().not_null())
                    .col(
                        ColumnDef::new(AssessmentAttempts::IsPassed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::IsAssessmentCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AssessmentAttempts::SubmissionDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessment_attempts_assessment")
                            .from(AssessmentAttempts::Table, AssessmentAttempts::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessment_attempts_employee")
                            .from(AssessmentAttempts::Table, AssessmentAttempts::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assessment_attempts_assessment_employee")
                    .table(AssessmentAttempts::Table)
                    .col(AssessmentAttempts::AssessmentId)
                    .col(AssessmentAttempts::EmployeeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AssessmentAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Assessments {
    Table,
    Id,
    CourseId,
    TotalMarks,
    PassingMarks,
    NumberOfQuestions,
    Questions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssessmentAttempts {
    Table,
    Id,
    AssessmentId,
    EmployeeId,
    Answers,
    TotalMarks,
    PassingMarks,
    Score,
    IsPassed,
    IsAssessmentCompleted,
    SubmissionDate,
}
