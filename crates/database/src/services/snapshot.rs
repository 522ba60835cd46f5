use crate::{
    convert::section_from,
    entities::{
        courses, faculties, notifications, prerequisites, section_space_times, section_teachers,
        sections, space_times, students, subjects, trimesters,
    },
};
use futures::try_join;
use models::{
    Entity, EntityKind,
    course::Course,
    notification::Notification,
    schedule::{Section, SpaceTime},
    subject::{Prerequisite, Subject},
    trimester::Trimester,
    user::{Faculty, Student},
};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    sea_query::IntoCondition,
};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use validation::Snapshot;

/// Loads the rows a validator consults, from inside the writing transaction
pub struct SnapshotService;

impl SnapshotService {
    /// Everything the rules for writing `entity` may look up.
    ///
    /// `stored` is the current row on update; its references are loaded too so
    /// seat accounting can release the old section.
    pub async fn load_for<C: ConnectionTrait>(
        db: &C,
        entity: &Entity,
        stored: Option<&Entity>,
    ) -> Result<Snapshot, DbErr> {
        let mut snapshot = Snapshot::new();

        match entity {
            Entity::Subject(subject) => {
                let same_code = subjects::Column::CodeName.eq(subject.code_name.as_str());
                snapshot.extend(Self::subjects(db, same_code).await?);
            }
            Entity::Prerequisite(edge) => {
                let roots = [edge.subject_id, edge.required_subject_id]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>();
                let (edges, visited) = Self::prerequisite_closure(db, roots).await?;
                snapshot.extend(edges);
                snapshot.extend(Self::subjects(db, subjects::Column::Id.is_in(visited)).await?);
            }
            Entity::Trimester(trimester) => {
                snapshot.extend(
                    Self::trimesters(db, trimesters::Column::Code.eq(trimester.code)).await?,
                );
            }
            Entity::SpaceTime(space_time) => {
                if let Some(key) = space_time.slot_key() {
                    let at_slot = Condition::all()
                        .add(space_times::Column::RoomNumber.eq(key.room_number))
                        .add(space_times::Column::DayOfWeek.eq(key.day_of_week.as_str()))
                        .add(space_times::Column::TimeSlot.eq(key.time_slot));
                    snapshot.extend(Self::space_times(db, at_slot).await?);
                }
            }
            Entity::Section(section) => {
                let subject = section.subject_id.into_iter().collect::<Vec<_>>();
                let trimester = section.trimester_id.into_iter().collect::<Vec<_>>();

                let (subjects, trimesters, space_times, faculties, siblings) = try_join!(
                    Self::subjects(db, subjects::Column::Id.is_in(subject)),
                    Self::trimesters(db, trimesters::Column::Id.is_in(trimester.clone())),
                    Self::space_times(
                        db,
                        space_times::Column::Id.is_in(section.space_time_ids.clone())
                    ),
                    Self::faculties(db, faculties::Column::Id.is_in(section.teacher_ids.clone())),
                    Self::sections(db, sections::Column::TrimesterId.is_in(trimester)),
                )?;

                snapshot.extend(subjects);
                snapshot.extend(trimesters);
                snapshot.extend(space_times);
                snapshot.extend(faculties);
                snapshot.extend(siblings);
            }
            Entity::Course(course) => {
                let old_section = match stored {
                    Some(Entity::Course(old)) => old.section_id,
                    _ => None,
                };
                let section_ids = [course.section_id, old_section]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>();

                let (students, subjects, trimesters, sections, courses) = try_join!(
                    Self::students(db, students::Column::Id.is_in(course.student_id)),
                    Self::subjects(db, subjects::Column::Id.is_in(course.subject_id)),
                    Self::trimesters(db, trimesters::Column::Id.is_in(course.trimester_id)),
                    Self::sections(db, sections::Column::Id.is_in(section_ids)),
                    Self::courses_like(db, course),
                )?;

                snapshot.extend(students);
                snapshot.extend(subjects);
                snapshot.extend(trimesters);
                snapshot.extend(sections);
                snapshot.extend(courses);
            }
            Entity::Notification(notification) => {
                let user = notification.target_user_id;

                let (trimesters, sections, students, faculties) = try_join!(
                    Self::trimesters(db, trimesters::Column::Id.is_in(notification.trimester_id)),
                    Self::sections(db, sections::Column::Id.is_in(notification.section_id)),
                    Self::students(db, students::Column::Id.is_in(user)),
                    Self::faculties(db, faculties::Column::Id.is_in(user)),
                )?;

                snapshot.extend(trimesters);
                snapshot.extend(sections);
                snapshot.extend(students);
                snapshot.extend(faculties);
            }
            Entity::Student(student) => {
                snapshot.extend(
                    Self::students(
                        db,
                        students::Column::UniversityId.eq(student.university_id),
                    )
                    .await?,
                );
            }
            Entity::Faculty(_) => {}
        }

        log::debug!(
            "loaded {} rows to validate {} {}",
            snapshot.len(),
            entity.kind(),
            entity.audit().id
        );
        Ok(snapshot)
    }

    /// The stored row of the given kind, if any
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        kind: EntityKind,
        id: Uuid,
    ) -> Result<Option<Entity>, DbErr> {
        let found: Option<Entity> = match kind {
            EntityKind::Subject => {
                Self::subjects(db, subjects::Column::Id.eq(id)).await?.pop().map(Into::into)
            }
            EntityKind::Prerequisite => prerequisites::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|model| Prerequisite::from(model).into()),
            EntityKind::Trimester => {
                Self::trimesters(db, trimesters::Column::Id.eq(id)).await?.pop().map(Into::into)
            }
            EntityKind::Section => {
                Self::sections(db, sections::Column::Id.eq(id)).await?.pop().map(Into::into)
            }
            EntityKind::SpaceTime => {
                Self::space_times(db, space_times::Column::Id.eq(id)).await?.pop().map(Into::into)
            }
            EntityKind::Course => courses::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(Course::try_from)
                .transpose()?
                .map(Into::into),
            EntityKind::Notification => notifications::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(Notification::try_from)
                .transpose()?
                .map(Into::into),
            EntityKind::Student => {
                Self::students(db, students::Column::Id.eq(id)).await?.pop().map(Into::into)
            }
            EntityKind::Faculty => {
                Self::faculties(db, faculties::Column::Id.eq(id)).await?.pop().map(Into::into)
            }
        };

        Ok(found)
    }

    /// Every edge reachable from `roots`, one query per level, plus the visited subject ids
    async fn prerequisite_closure<C: ConnectionTrait>(
        db: &C,
        roots: Vec<Uuid>,
    ) -> Result<(Vec<Prerequisite>, Vec<Uuid>), DbErr> {
        let mut visited = roots.iter().copied().collect::<HashSet<_>>();
        let mut frontier = roots;
        let mut edges = Vec::new();

        while !frontier.is_empty() {
            let level = prerequisites::Entity::find()
                .filter(prerequisites::Column::SubjectId.is_in(frontier))
                .all(db)
                .await?;

            frontier = level
                .iter()
                .map(|edge| edge.required_subject_id)
                .filter(|id| visited.insert(*id))
                .collect();
            edges.extend(level.into_iter().map(Prerequisite::from));
        }

        Ok((edges, visited.into_iter().collect()))
    }

    async fn subjects<C: ConnectionTrait>(
        db: &C,
        filter: impl IntoCondition,
    ) -> Result<Vec<Subject>, DbErr> {
        subjects::Entity::find()
            .filter(filter)
            .all(db)
            .await?
            .into_iter()
            .map(Subject::try_from)
            .collect()
    }

    async fn trimesters<C: ConnectionTrait>(
        db: &C,
        filter: impl IntoCondition,
    ) -> Result<Vec<Trimester>, DbErr> {
        trimesters::Entity::find()
            .filter(filter)
            .all(db)
            .await?
            .into_iter()
            .map(Trimester::try_from)
            .collect()
    }

    async fn space_times<C: ConnectionTrait>(
        db: &C,
        filter: impl IntoCondition,
    ) -> Result<Vec<SpaceTime>, DbErr> {
        space_times::Entity::find()
            .filter(filter)
            .all(db)
            .await?
            .into_iter()
            .map(SpaceTime::try_from)
            .collect()
    }

    async fn students<C: ConnectionTrait>(
        db: &C,
        filter: impl IntoCondition,
    ) -> Result<Vec<Student>, DbErr> {
        Ok(students::Entity::find()
            .filter(filter)
            .all(db)
            .await?
            .into_iter()
            .map(Student::from)
            .collect())
    }

    async fn faculties<C: ConnectionTrait>(
        db: &C,
        filter: impl IntoCondition,
    ) -> Result<Vec<Faculty>, DbErr> {
        faculties::Entity::find()
            .filter(filter)
            .all(db)
            .await?
            .into_iter()
            .map(Faculty::try_from)
            .collect()
    }

    /// Courses of the same student, subject and trimester as `course`
    async fn courses_like<C: ConnectionTrait>(db: &C, course: &Course) -> Result<Vec<Course>, DbErr> {
        let (Some(student), Some(subject), Some(trimester)) =
            (course.student_id, course.subject_id, course.trimester_id)
        else {
            return Ok(vec![]);
        };

        courses::Entity::find()
            .filter(courses::Column::StudentId.eq(student))
            .filter(courses::Column::SubjectId.eq(subject))
            .filter(courses::Column::TrimesterId.eq(trimester))
            .all(db)
            .await?
            .into_iter()
            .map(Course::try_from)
            .collect()
    }

    /// Section rows joined with their space time and teacher ids
    pub async fn sections<C: ConnectionTrait>(
        db: &C,
        filter: impl IntoCondition,
    ) -> Result<Vec<Section>, DbErr> {
        let rows = sections::Entity::find().filter(filter).all(db).await?;
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
        let (slots, teachers) = try_join!(
            section_space_times::Entity::find()
                .filter(section_space_times::Column::SectionId.is_in(ids.clone()))
                .all(db),
            section_teachers::Entity::find()
                .filter(section_teachers::Column::SectionId.is_in(ids))
                .all(db),
        )?;

        let mut slots_by_section: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for slot in slots {
            slots_by_section
                .entry(slot.section_id)
                .or_default()
                .push(slot.space_time_id);
        }

        let mut teachers_by_section: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for teacher in teachers {
            teachers_by_section
                .entry(teacher.section_id)
                .or_default()
                .push(teacher.faculty_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let space_time_ids = slots_by_section.remove(&row.id).unwrap_or_default();
                let teacher_ids = teachers_by_section.remove(&row.id).unwrap_or_default();
                section_from(row, space_time_ids, teacher_ids)
            })
            .collect())
    }
}
