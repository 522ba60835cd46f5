use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create subjects table
        manager
            .create_table(
                with_audit(
                    Table::create()
                        .table(Subjects::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Subjects::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Subjects::CodeName).string_len(16).not_null())
                        .col(ColumnDef::new(Subjects::Name).string_len(100).not_null())
                        .col(
                            ColumnDef::new(Subjects::Credits)
                                .small_integer()
                                .not_null()
                                .check(Expr::col(Subjects::Credits).between(1, 5)),
                        )
                        .col(ColumnDef::new(Subjects::SubjectType).string().not_null()),
                )
                .to_owned(),
            )
            .await?;

        // Create trimesters table
        manager
            .create_table(
                with_audit(
                    Table::create()
                        .table(Trimesters::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Trimesters::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Trimesters::Year)
                                .integer()
                                .not_null()
                                .check(Expr::col(Trimesters::Year).gte(2003)),
                        )
                        .col(ColumnDef::new(Trimesters::Season).string().not_null())
                        .col(ColumnDef::new(Trimesters::Code).integer().not_null())
                        .col(ColumnDef::new(Trimesters::Status).string().not_null())
                        .col(ColumnDef::new(Trimesters::CourseSelectionStart).timestamp_with_time_zone())
                        .col(ColumnDef::new(Trimesters::CourseSelectionEnd).timestamp_with_time_zone())
                        .col(
                            ColumnDef::new(Trimesters::SectionRegistrationStart)
                                .timestamp_with_time_zone(),
                        )
                        .col(
                            ColumnDef::new(Trimesters::SectionRegistrationEnd)
                                .timestamp_with_time_zone(),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // Create space_times table
        manager
            .create_table(
                with_audit(
                    Table::create()
                        .table(SpaceTimes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(SpaceTimes::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(SpaceTimes::RoomNumber).string_len(32).not_null())
                        .col(ColumnDef::new(SpaceTimes::DayOfWeek).string().not_null())
                        .col(ColumnDef::new(SpaceTimes::RoomType).string().not_null())
                        .col(
                            ColumnDef::new(SpaceTimes::TimeSlot)
                                .small_integer()
                                .not_null()
                                .check(Expr::col(SpaceTimes::TimeSlot).between(1, 6)),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                with_audit(
                    Table::create()
                        .table(Students::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Students::UniversityId)
                                .big_integer()
                                .not_null()
                                .check(Expr::col(Students::UniversityId).gte(0)),
                        )
                        .col(ColumnDef::new(Students::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Students::Email).string_len(100).not_null()),
                )
                .to_owned(),
            )
            .await?;

        // Create faculties table
        manager
            .create_table(
                with_audit(
                    Table::create()
                        .table(Faculties::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Faculties::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Faculties::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Faculties::Email).string_len(100).not_null())
                        .col(ColumnDef::new(Faculties::UserType).string().not_null()),
                )
                .to_owned(),
            )
            .await?;

        // Create prerequisites table (subject requires required_subject)
        manager
            .create_table(
                with_audit(
                    Table::create()
                        .table(Prerequisites::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Prerequisites::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Prerequisites::SubjectId).uuid().not_null())
                        .col(ColumnDef::new(Prerequisites::RequiredSubjectId).uuid().not_null())
                        .col(
                            ColumnDef::new(Prerequisites::MinGrade)
                                .float()
                                .not_null()
                                .check(Expr::col(Prerequisites::MinGrade).between(0.0, 4.0)),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-prerequisites-subject_id")
                                .from(Prerequisites::Table, Prerequisites::SubjectId)
                                .to(Subjects::Table, Subjects::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-prerequisites-required_subject_id")
                                .from(Prerequisites::Table, Prerequisites::RequiredSubjectId)
                                .to(Subjects::Table, Subjects::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // Create sections table
        manager
            .create_table(
                with_audit(
                    Table::create()
                        .table(Sections::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Sections::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Sections::SubjectId).uuid().not_null())
                        .col(ColumnDef::new(Sections::TrimesterId).uuid().not_null())
                        .col(
                            ColumnDef::new(Sections::MaxCapacity)
                                .integer()
                                .not_null()
                                .check(Expr::col(Sections::MaxCapacity).gt(0)),
                        )
                        .col(
                            ColumnDef::new(Sections::CurrentCapacity)
                                .integer()
                                .not_null()
                                .default(0)
                                .check(Expr::col(Sections::CurrentCapacity).gte(0)),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-sections-subject_id")
                                .from(Sections::Table, Sections::SubjectId)
                                .to(Subjects::Table, Subjects::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-sections-trimester_id")
                                .from(Sections::Table, Sections::TrimesterId)
                                .to(Trimesters::Table, Trimesters::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // Create section_space_times junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(SectionSpaceTimes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SectionSpaceTimes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SectionSpaceTimes::SectionId).uuid().not_null())
                    .col(ColumnDef::new(SectionSpaceTimes::SpaceTimeId).uuid().not_null())
                    .col(ColumnDef::new(SectionSpaceTimes::TrimesterId).uuid().not_null())
                    .col(
                        ColumnDef::new(SectionSpaceTimes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-section_space_times-section_id")
                            .from(SectionSpaceTimes::Table, SectionSpaceTimes::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-section_space_times-space_time_id")
                            .from(SectionSpaceTimes::Table, SectionSpaceTimes::SpaceTimeId)
                            .to(SpaceTimes::Table, SpaceTimes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-section_space_times-trimester_id")
                            .from(SectionSpaceTimes::Table, SectionSpaceTimes::TrimesterId)
                            .to(Trimesters::Table, Trimesters::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create section_teachers junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(SectionTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SectionTeachers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SectionTeachers::SectionId).uuid().not_null())
                    .col(ColumnDef::new(SectionTeachers::FacultyId).uuid().not_null())
                    .col(
                        ColumnDef::new(SectionTeachers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-section_teachers-section_id")
                            .from(SectionTeachers::Table, SectionTeachers::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-section_teachers-faculty_id")
                            .from(SectionTeachers::Table, SectionTeachers::FacultyId)
                            .to(Faculties::Table, Faculties::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                with_audit(
                    Table::create()
                        .table(Courses::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Courses::StudentId).uuid().not_null())
                        .col(ColumnDef::new(Courses::SubjectId).uuid().not_null())
                        .col(ColumnDef::new(Courses::TrimesterId).uuid().not_null())
                        .col(ColumnDef::new(Courses::Status).string().not_null())
                        .col(ColumnDef::new(Courses::SectionId).uuid())
                        .col(
                            ColumnDef::new(Courses::Grade)
                                .float()
                                .check(Expr::col(Courses::Grade).between(0.0, 4.0)),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-courses-student_id")
                                .from(Courses::Table, Courses::StudentId)
                                .to(Students::Table, Students::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-courses-subject_id")
                                .from(Courses::Table, Courses::SubjectId)
                                .to(Subjects::Table, Subjects::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-courses-trimester_id")
                                .from(Courses::Table, Courses::TrimesterId)
                                .to(Trimesters::Table, Trimesters::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-courses-section_id")
                                .from(Courses::Table, Courses::SectionId)
                                .to(Sections::Table, Sections::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await?;

        // Create notifications table; target_user_id may name a student or a faculty
        manager
            .create_table(
                with_audit(
                    Table::create()
                        .table(Notifications::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Notifications::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Notifications::Scope).string().not_null())
                        .col(ColumnDef::new(Notifications::Title).string_len(128).not_null())
                        .col(ColumnDef::new(Notifications::Content).text().not_null())
                        .col(ColumnDef::new(Notifications::TrimesterId).uuid())
                        .col(ColumnDef::new(Notifications::SectionId).uuid())
                        .col(ColumnDef::new(Notifications::TargetUserId).uuid())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-notifications-trimester_id")
                                .from(Notifications::Table, Notifications::TrimesterId)
                                .to(Trimesters::Table, Trimesters::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk-notifications-section_id")
                                .from(Notifications::Table, Notifications::SectionId)
                                .to(Sections::Table, Sections::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        ),
                )
                .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop dependents before the tables they reference
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SectionTeachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SectionSpaceTimes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Prerequisites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Faculties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SpaceTimes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trimesters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// Appends the audit columns every entity table carries
fn with_audit(table: &mut TableCreateStatement) -> &mut TableCreateStatement {
    table
        .col(
            ColumnDef::new(Audit::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Audit::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(ColumnDef::new(Audit::CreatedBy).string().not_null())
        .col(ColumnDef::new(Audit::UpdatedBy).string().not_null())
        .col(ColumnDef::new(Audit::Version).integer().not_null().default(0))
}

#[derive(DeriveIden)]
enum Audit {
    CreatedAt,
    UpdatedAt,
    CreatedBy,
    UpdatedBy,
    Version,
}

#[derive(DeriveIden)]
pub enum Subjects {
    Table,
    Id,
    CodeName,
    Name,
    Credits,
    SubjectType,
}

#[derive(DeriveIden)]
pub enum Prerequisites {
    Table,
    Id,
    SubjectId,
    RequiredSubjectId,
    MinGrade,
}

#[derive(DeriveIden)]
pub enum Trimesters {
    Table,
    Id,
    Year,
    Season,
    Code,
    Status,
    CourseSelectionStart,
    CourseSelectionEnd,
    SectionRegistrationStart,
    SectionRegistrationEnd,
}

#[derive(DeriveIden)]
pub enum SpaceTimes {
    Table,
    Id,
    RoomNumber,
    DayOfWeek,
    RoomType,
    TimeSlot,
}

#[derive(DeriveIden)]
pub enum Sections {
    Table,
    Id,
    SubjectId,
    TrimesterId,
    MaxCapacity,
    CurrentCapacity,
}

#[derive(DeriveIden)]
pub enum SectionSpaceTimes {
    Table,
    Id,
    SectionId,
    SpaceTimeId,
    TrimesterId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum SectionTeachers {
    Table,
    Id,
    SectionId,
    FacultyId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Courses {
    Table,
    Id,
    StudentId,
    SubjectId,
    TrimesterId,
    Status,
    SectionId,
    Grade,
}

#[derive(DeriveIden)]
pub enum Notifications {
    Table,
    Id,
    Scope,
    Title,
    Content,
    TrimesterId,
    SectionId,
    TargetUserId,
}

#[derive(DeriveIden)]
pub enum Students {
    Table,
    Id,
    UniversityId,
    Name,
    Email,
}

#[derive(DeriveIden)]
pub enum Faculties {
    Table,
    Id,
    Name,
    Email,
    UserType,
}
