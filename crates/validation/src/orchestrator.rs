use crate::{
    context::{Clock, Context, Lookup, SystemClock},
    error::ValidationError,
    fields::Fields,
    rules::Rules,
};
use models::{Audit, Entity};

/// Gatekeeper every write goes through before it is committed.
///
/// All field violations of a candidate are reported together. Business rules
/// and conflicts are only evaluated on a structurally sound candidate, and the
/// first one found is returned.
#[derive(Debug, Clone, Default)]
pub struct Validator<C: Clock = SystemClock> {
    clock: C,
}

fn check_audit(audit: &Audit, fields: &mut Fields) {
    fields.check("created_by", !audit.created_by.trim().is_empty(), || {
        "must not be blank".to_string()
    });
    fields.check("updated_by", !audit.updated_by.trim().is_empty(), || {
        "must not be blank".to_string()
    });
}

fn insert<T: Rules>(entity: &T, audit: &Audit, ctx: &Context<'_>) -> Result<(), ValidationError> {
    let mut fields = Fields::new();
    check_audit(audit, &mut fields);
    entity.check_fields(&mut fields);
    fields.finish()?;

    entity.check_insert(ctx)
}

fn update<T: Rules>(
    old: &T,
    new: &T,
    audit: &Audit,
    ctx: &Context<'_>,
) -> Result<(), ValidationError> {
    let mut fields = Fields::new();
    check_audit(audit, &mut fields);
    new.check_fields(&mut fields);
    fields.finish()?;

    new.check_update(old, ctx)
}

/// Identity and version invariants every stored entity keeps across updates
fn check_base(old: &Entity, new: &Entity) -> Result<(), ValidationError> {
    if old.kind() != new.kind() {
        return Err(ValidationError::rule(format!(
            "a {} cannot be replaced by a {}",
            old.kind(),
            new.kind()
        )));
    }

    let (stored, candidate) = (old.audit(), new.audit());
    if !stored.same_origin(candidate) {
        return Err(ValidationError::rule(
            "id, created_at and created_by cannot change",
        ));
    }
    if stored.version != candidate.version {
        return Err(ValidationError::conflict(format!(
            "{} {} was modified concurrently (version {} is stale, stored version is {})",
            old.kind(),
            stored.id,
            candidate.version,
            stored.version
        )));
    }

    Ok(())
}

impl<C: Clock> Validator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validates a candidate that has never been persisted
    pub fn validate_for_insert(
        &self,
        entity: &Entity,
        lookup: &dyn Lookup,
    ) -> Result<(), ValidationError> {
        let ctx = Context::new(lookup, &self.clock);
        let audit = entity.audit();

        let result = match entity {
            Entity::Subject(e) => insert(e, audit, &ctx),
            Entity::Prerequisite(e) => insert(e, audit, &ctx),
            Entity::Trimester(e) => insert(e, audit, &ctx),
            Entity::Section(e) => insert(e, audit, &ctx),
            Entity::SpaceTime(e) => insert(e, audit, &ctx),
            Entity::Course(e) => insert(e, audit, &ctx),
            Entity::Notification(e) => insert(e, audit, &ctx),
            Entity::Student(e) => insert(e, audit, &ctx),
            Entity::Faculty(e) => insert(e, audit, &ctx),
        };

        report("insert", entity, &result);
        result
    }

    /// Validates replacing the stored `old` with `new`
    pub fn validate_for_update(
        &self,
        old: &Entity,
        new: &Entity,
        lookup: &dyn Lookup,
    ) -> Result<(), ValidationError> {
        let result = check_base(old, new).and_then(|()| {
            let ctx = Context::new(lookup, &self.clock).replacing(old.audit().id);
            let audit = new.audit();

            match (old, new) {
                (Entity::Subject(o), Entity::Subject(n)) => update(o, n, audit, &ctx),
                (Entity::Prerequisite(o), Entity::Prerequisite(n)) => update(o, n, audit, &ctx),
                (Entity::Trimester(o), Entity::Trimester(n)) => update(o, n, audit, &ctx),
                (Entity::Section(o), Entity::Section(n)) => update(o, n, audit, &ctx),
                (Entity::SpaceTime(o), Entity::SpaceTime(n)) => update(o, n, audit, &ctx),
                (Entity::Course(o), Entity::Course(n)) => update(o, n, audit, &ctx),
                (Entity::Notification(o), Entity::Notification(n)) => update(o, n, audit, &ctx),
                (Entity::Student(o), Entity::Student(n)) => update(o, n, audit, &ctx),
                (Entity::Faculty(o), Entity::Faculty(n)) => update(o, n, audit, &ctx),
                // check_base already rejected mismatched kinds
                _ => Err(ValidationError::rule("entity kind cannot change")),
            }
        });

        report("update", new, &result);
        result
    }
}

fn report(operation: &str, entity: &Entity, result: &Result<(), ValidationError>) {
    let (kind, id) = (entity.kind(), entity.audit().id);
    match result {
        Ok(()) => log::debug!("accepted {operation} of {kind} {id}"),
        Err(err) => log::warn!("rejected {operation} of {kind} {id}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        snapshot::Snapshot,
        testing::{at, clock, student, subject},
    };

    #[test]
    fn test_blank_actor_is_structural() {
        let mut candidate = subject("CSE1111");
        candidate.audit.created_by = " ".to_string();
        candidate.credits = 0;

        let err = Validator::new(clock())
            .validate_for_insert(&candidate.into(), &Snapshot::new())
            .unwrap_err();
        assert_eq!(err.fields(), vec!["created_by", "credits"]);
    }

    #[test]
    fn test_stale_version_conflicts() {
        let stored = subject("CSE1111");
        let snapshot = Snapshot::new().with(stored.clone());
        let validator = Validator::new(clock());

        let mut fresh = stored.clone();
        fresh.name = "Structured Programming".to_string();
        assert_eq!(
            validator.validate_for_update(&stored.clone().into(), &fresh.clone().into(), &snapshot),
            Ok(())
        );

        let mut newer = stored.clone();
        newer.audit = stored.audit.touched("admin", at(2));

        let err = validator
            .validate_for_update(&newer.into(), &fresh.into(), &snapshot)
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_creation_fields_are_immutable() {
        let stored = subject("CSE1111");
        let snapshot = Snapshot::new().with(stored.clone());
        let validator = Validator::new(clock());

        let mut reauthored = stored.clone();
        reauthored.audit.created_by = "someone else".to_string();
        let err = validator
            .validate_for_update(&stored.clone().into(), &reauthored.into(), &snapshot)
            .unwrap_err();
        assert!(err.is_business_rule());

        let mut backdated = stored.clone();
        backdated.audit.created_at = at(2);
        let err = validator
            .validate_for_update(&stored.into(), &backdated.into(), &snapshot)
            .unwrap_err();
        assert!(err.is_business_rule());
    }

    #[test]
    fn test_kind_cannot_change() {
        let stored = subject("CSE1111");
        let mut other = student(7);
        other.audit = stored.audit.clone();

        let err = Validator::new(clock())
            .validate_for_update(&stored.into(), &other.into(), &Snapshot::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid operation: a Subject cannot be replaced by a Student"
        );
    }

    #[test]
    fn test_default_validator_uses_the_system_clock() {
        let validator = Validator::<SystemClock>::default();
        assert!(validator.clock().now() > at(1));
    }
}
