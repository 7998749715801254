use sea_orm_migration::prelude::*;

use crate::m20220101_000001_create_student::Student;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing by name is the common admin view
        manager
            .create_index(
                Index::create()
                    .name("idx_student_name")
                    .table(Student::Table)
                    .col(Student::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_student_name").table(Student::Table).to_owned())
            .await
    }
}
