use crate::{
    entities::{
        courses, faculties, notifications, prerequisites, section_space_times, section_teachers,
        sections, space_times, students, subjects, trimesters,
    },
    error::ServiceError,
    services::snapshot::SnapshotService,
};
use chrono::{DateTime, Utc};
use models::{Entity, EntityKind, course::Course, schedule::Section};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, TransactionTrait,
};
use uuid::Uuid;
use validation::{Clock, Lookup, SeatChange, Snapshot, ValidationError, Validator};

/// Tables whose rows carry an `id` and an optimistic `version` column
trait Versioned: EntityTrait {
    fn id_column() -> Self::Column;
    fn version_column() -> Self::Column;
}

macro_rules! impl_versioned {
    ($($module:ident),* $(,)?) => {
        $(
            impl Versioned for $module::Entity {
                fn id_column() -> Self::Column {
                    $module::Column::Id
                }

                fn version_column() -> Self::Column {
                    $module::Column::Version
                }
            }
        )*
    };
}

impl_versioned!(
    subjects,
    prerequisites,
    trimesters,
    sections,
    space_times,
    courses,
    notifications,
    students,
    faculties,
);

/// The only way entities reach the database: every write is validated
/// against a snapshot read in the same serializable transaction.
pub struct WriteService;

impl WriteService {
    async fn begin(db: &DatabaseConnection) -> Result<DatabaseTransaction, ServiceError> {
        Ok(db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?)
    }

    /// Validates and inserts a new entity
    pub async fn create<C: Clock>(
        db: &DatabaseConnection,
        validator: &Validator<C>,
        entity: Entity,
    ) -> Result<Entity, ServiceError> {
        let txn = Self::begin(db).await?;

        let snapshot = SnapshotService::load_for(&txn, &entity, None).await?;
        validator.validate_for_insert(&entity, &snapshot)?;

        if let Entity::Course(course) = &entity {
            let now = validator.clock().now();
            Self::move_seats(&txn, &snapshot, None, course, now).await?;
        }
        Self::insert(&txn, &entity).await?;

        txn.commit().await?;
        log::debug!("created {} {}", entity.kind(), entity.audit().id);
        Ok(entity)
    }

    /// Validates and stores a new revision of an existing entity.
    ///
    /// `entity` carries the version it was read at; the stored revision gets the next one.
    pub async fn update<C: Clock>(
        db: &DatabaseConnection,
        validator: &Validator<C>,
        entity: Entity,
    ) -> Result<Entity, ServiceError> {
        let (kind, id) = (entity.kind(), entity.audit().id);
        let txn = Self::begin(db).await?;

        let stored = SnapshotService::find(&txn, kind, id)
            .await?
            .ok_or(ServiceError::NotFound { kind, id })?;
        let snapshot = SnapshotService::load_for(&txn, &entity, Some(&stored)).await?;
        validator.validate_for_update(&stored, &entity, &snapshot)?;

        let now = validator.clock().now();
        let read_version = stored.audit().version;
        let mut next = entity;
        let actor = next.audit().updated_by.clone();
        *next.audit_mut() = stored.audit().touched(&actor, now);

        if let (Entity::Course(old), Entity::Course(new)) = (&stored, &next) {
            Self::move_seats(&txn, &snapshot, Some(old), new, now).await?;
        }
        Self::update_row(&txn, &next, read_version).await?;

        txn.commit().await?;
        log::debug!("updated {kind} {id} to version {}", read_version + 1);
        Ok(next)
    }

    /// Deletes an entity by id.
    ///
    /// Rows still referenced elsewhere are refused by the store. Deleting a
    /// course gives its seat back.
    pub async fn delete(
        db: &DatabaseConnection,
        clock: &impl Clock,
        kind: EntityKind,
        id: Uuid,
        actor: &str,
    ) -> Result<(), ServiceError> {
        let txn = Self::begin(db).await?;

        let stored = SnapshotService::find(&txn, kind, id)
            .await?
            .ok_or(ServiceError::NotFound { kind, id })?;

        match &stored {
            Entity::Course(course) => {
                let seat = course.state().ok().and_then(|state| state.seat());
                if let Some(section_id) = seat {
                    let change = SeatChange {
                        release: Some(section_id),
                        take: None,
                    };
                    let section = Self::section(&txn, section_id).await?;
                    Self::save_seats(&txn, &change, section, actor, clock.now()).await?;
                }
            }
            Entity::Section(_) => Self::unlink_section(&txn, id).await?,
            _ => {}
        }

        let deleted = match kind {
            EntityKind::Subject => subjects::Entity::delete_by_id(id).exec(&txn).await?,
            EntityKind::Prerequisite => prerequisites::Entity::delete_by_id(id).exec(&txn).await?,
            EntityKind::Trimester => trimesters::Entity::delete_by_id(id).exec(&txn).await?,
            EntityKind::Section => sections::Entity::delete_by_id(id).exec(&txn).await?,
            EntityKind::SpaceTime => space_times::Entity::delete_by_id(id).exec(&txn).await?,
            EntityKind::Course => courses::Entity::delete_by_id(id).exec(&txn).await?,
            EntityKind::Notification => notifications::Entity::delete_by_id(id).exec(&txn).await?,
            EntityKind::Student => students::Entity::delete_by_id(id).exec(&txn).await?,
            EntityKind::Faculty => faculties::Entity::delete_by_id(id).exec(&txn).await?,
        };
        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound { kind, id });
        }

        txn.commit().await?;
        log::debug!("{actor} deleted {kind} {id}");
        Ok(())
    }

    async fn section(txn: &DatabaseTransaction, id: Uuid) -> Result<Section, ServiceError> {
        SnapshotService::sections(txn, sections::Column::Id.eq(id))
            .await?
            .pop()
            .ok_or(ServiceError::NotFound {
                kind: EntityKind::Section,
                id,
            })
    }

    /// Applies the seat change between `old` and `new` to the section counters
    async fn move_seats(
        txn: &DatabaseTransaction,
        snapshot: &Snapshot,
        old: Option<&Course>,
        new: &Course,
        now: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        let before = old.and_then(|course| course.state().ok());
        let after = new
            .state()
            .map_err(|err| ValidationError::rule(err.to_string()))?;

        let change = SeatChange::between(before.as_ref(), &after);
        for section_id in change.sections() {
            let section = match snapshot.section(section_id) {
                Some(section) => section,
                None => Self::section(txn, section_id).await?,
            };
            Self::save_seats(txn, &change, section, &new.audit.updated_by, now).await?;
        }

        Ok(())
    }

    async fn save_seats(
        txn: &DatabaseTransaction,
        change: &SeatChange,
        mut section: Section,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        let read_version = section.audit.version;
        change.apply_to(&mut section)?;
        section.audit = section.audit.touched(actor, now);

        log::debug!(
            "section {} now has {} of {} seats taken",
            section.audit.id,
            section.current_capacity,
            section.max_capacity
        );
        Self::update_versioned(
            txn,
            sections::ActiveModel::try_from(&section)?,
            section.audit.id,
            read_version,
        )
        .await
    }

    /// `UPDATE … WHERE id = ? AND version = ?`; no matching row means someone else wrote first
    async fn update_versioned<E, A>(
        txn: &DatabaseTransaction,
        model: A,
        id: Uuid,
        read_version: i32,
    ) -> Result<(), ServiceError>
    where
        E: Versioned,
        A: ActiveModelTrait<Entity = E>,
    {
        let result = E::update_many()
            .set(model)
            .filter(E::id_column().eq(id))
            .filter(E::version_column().eq(read_version))
            .exec(txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ValidationError::conflict(format!(
                "{id} was modified after version {read_version} was read"
            ))
            .into());
        }
        Ok(())
    }

    async fn insert(txn: &DatabaseTransaction, entity: &Entity) -> Result<(), ServiceError> {
        match entity {
            Entity::Subject(e) => {
                subjects::Entity::insert(subjects::ActiveModel::from(e))
                    .exec(txn)
                    .await?;
            }
            Entity::Prerequisite(e) => {
                prerequisites::Entity::insert(prerequisites::ActiveModel::try_from(e)?)
                    .exec(txn)
                    .await?;
            }
            Entity::Trimester(e) => {
                trimesters::Entity::insert(trimesters::ActiveModel::from(e))
                    .exec(txn)
                    .await?;
            }
            Entity::Section(e) => {
                sections::Entity::insert(sections::ActiveModel::try_from(e)?)
                    .exec(txn)
                    .await?;
                Self::link_section(txn, e).await?;
            }
            Entity::SpaceTime(e) => {
                space_times::Entity::insert(space_times::ActiveModel::try_from(e)?)
                    .exec(txn)
                    .await?;
            }
            Entity::Course(e) => {
                courses::Entity::insert(courses::ActiveModel::try_from(e)?)
                    .exec(txn)
                    .await?;
            }
            Entity::Notification(e) => {
                notifications::Entity::insert(notifications::ActiveModel::from(e))
                    .exec(txn)
                    .await?;
            }
            Entity::Student(e) => {
                students::Entity::insert(students::ActiveModel::from(e))
                    .exec(txn)
                    .await?;
            }
            Entity::Faculty(e) => {
                faculties::Entity::insert(faculties::ActiveModel::from(e))
                    .exec(txn)
                    .await?;
            }
        }
        Ok(())
    }

    async fn update_row(
        txn: &DatabaseTransaction,
        entity: &Entity,
        read_version: i32,
    ) -> Result<(), ServiceError> {
        let id = entity.audit().id;
        match entity {
            Entity::Subject(e) => {
                Self::update_versioned(txn, subjects::ActiveModel::from(e), id, read_version).await
            }
            Entity::Prerequisite(e) => {
                let model = prerequisites::ActiveModel::try_from(e)?;
                Self::update_versioned(txn, model, id, read_version).await
            }
            Entity::Trimester(e) => {
                let model = trimesters::ActiveModel::from(e);
                Self::update_versioned(txn, model, id, read_version).await
            }
            Entity::Section(e) => {
                let model = sections::ActiveModel::try_from(e)?;
                Self::update_versioned(txn, model, id, read_version).await?;
                Self::unlink_section(txn, id).await?;
                Self::link_section(txn, e).await
            }
            Entity::SpaceTime(e) => {
                let model = space_times::ActiveModel::try_from(e)?;
                Self::update_versioned(txn, model, id, read_version).await
            }
            Entity::Course(e) => {
                let model = courses::ActiveModel::try_from(e)?;
                Self::update_versioned(txn, model, id, read_version).await
            }
            Entity::Notification(e) => {
                let model = notifications::ActiveModel::from(e);
                Self::update_versioned(txn, model, id, read_version).await
            }
            Entity::Student(e) => {
                Self::update_versioned(txn, students::ActiveModel::from(e), id, read_version).await
            }
            Entity::Faculty(e) => {
                Self::update_versioned(txn, faculties::ActiveModel::from(e), id, read_version).await
            }
        }
    }

    /// Writes the junction rows for a section's space times and teachers
    async fn link_section(txn: &DatabaseTransaction, section: &Section) -> Result<(), ServiceError> {
        let trimester_id = section
            .trimester_id
            .ok_or_else(|| ValidationError::field("trimester", "is required"))?;
        let (section_id, now) = (section.audit.id, section.audit.updated_at);

        let slots = section
            .space_time_ids
            .iter()
            .map(|&space_time_id| section_space_times::ActiveModel {
                id: Set(Uuid::new_v4()),
                section_id: Set(section_id),
                space_time_id: Set(space_time_id),
                trimester_id: Set(trimester_id),
                created_at: Set(now),
            })
            .collect::<Vec<_>>();
        if !slots.is_empty() {
            section_space_times::Entity::insert_many(slots)
                .exec(txn)
                .await?;
        }

        let teachers = section
            .teacher_ids
            .iter()
            .map(|&faculty_id| section_teachers::ActiveModel {
                id: Set(Uuid::new_v4()),
                section_id: Set(section_id),
                faculty_id: Set(faculty_id),
                created_at: Set(now),
            })
            .collect::<Vec<_>>();
        if !teachers.is_empty() {
            section_teachers::Entity::insert_many(teachers)
                .exec(txn)
                .await?;
        }

        Ok(())
    }

    async fn unlink_section(txn: &DatabaseTransaction, section_id: Uuid) -> Result<(), ServiceError> {
        section_space_times::Entity::delete_many()
            .filter(section_space_times::Column::SectionId.eq(section_id))
            .exec(txn)
            .await?;
        section_teachers::Entity::delete_many()
            .filter(section_teachers::Column::SectionId.eq(section_id))
            .exec(txn)
            .await?;
        Ok(())
    }
}
