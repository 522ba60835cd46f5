use super::m20251018_create_enrollment_tables::{
    Courses, Notifications, Prerequisites, SectionSpaceTimes, SectionTeachers, Sections,
    SpaceTimes, Students, Subjects, Trimesters,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Uniqueness the validators check, enforced again by the store
        manager
            .create_index(
                Index::create()
                    .name("idx_subjects_code_name")
                    .table(Subjects::Table)
                    .col(Subjects::CodeName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_prerequisites_edge")
                    .table(Prerequisites::Table)
                    .col(Prerequisites::SubjectId)
                    .col(Prerequisites::RequiredSubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trimesters_code")
                    .table(Trimesters::Table)
                    .col(Trimesters::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_space_times_slot")
                    .table(SpaceTimes::Table)
                    .col(SpaceTimes::RoomNumber)
                    .col(SpaceTimes::DayOfWeek)
                    .col(SpaceTimes::TimeSlot)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // A space time is booked by at most one section per trimester
        manager
            .create_index(
                Index::create()
                    .name("idx_section_space_times_booking")
                    .table(SectionSpaceTimes::Table)
                    .col(SectionSpaceTimes::TrimesterId)
                    .col(SectionSpaceTimes::SpaceTimeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_section_teachers_assignment")
                    .table(SectionTeachers::Table)
                    .col(SectionTeachers::SectionId)
                    .col(SectionTeachers::FacultyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_enrollment")
                    .table(Courses::Table)
                    .col(Courses::StudentId)
                    .col(Courses::SubjectId)
                    .col(Courses::TrimesterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_university_id")
                    .table(Students::Table)
                    .col(Students::UniversityId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Lookup indexes for the rows loaded before each write
        manager
            .create_index(
                Index::create()
                    .name("idx_sections_trimester_id")
                    .table(Sections::Table)
                    .col(Sections::TrimesterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_section_space_times_section_id")
                    .table(SectionSpaceTimes::Table)
                    .col(SectionSpaceTimes::SectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_section_id")
                    .table(Courses::Table)
                    .col(Courses::SectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_scope")
                    .table(Notifications::Table)
                    .col(Notifications::Scope)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_notifications_scope",
            "idx_courses_section_id",
            "idx_section_space_times_section_id",
            "idx_sections_trimester_id",
            "idx_students_university_id",
            "idx_courses_enrollment",
            "idx_section_teachers_assignment",
            "idx_section_space_times_booking",
            "idx_space_times_slot",
            "idx_trimesters_code",
            "idx_prerequisites_edge",
            "idx_subjects_code_name",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
