use crate::{
    capacity::SeatChange,
    context::Context,
    error::ValidationError,
    fields::Fields,
    rules::{Rules, present},
};
use models::{
    course::{Course, CourseState},
    subject::GRADE_RANGE,
};

/// Rules shared by insert and update; `old` is the stored state on update
fn check_course(
    course: &Course,
    old: Option<&CourseState>,
    ctx: &Context<'_>,
) -> Result<(), ValidationError> {
    let student = present(course.student_id, "student")?;
    let subject = present(course.subject_id, "subject")?;
    let trimester = present(course.trimester_id, "trimester")?;
    let state = course
        .state()
        .map_err(|err| ValidationError::rule(err.to_string()))?;

    if ctx.lookup.student(student).is_none() {
        return Err(ValidationError::rule(format!(
            "student {student} does not exist"
        )));
    }
    if ctx.lookup.subject(subject).is_none() {
        return Err(ValidationError::rule(format!(
            "subject {subject} does not exist"
        )));
    }
    if ctx.lookup.trimester(trimester).is_none() {
        return Err(ValidationError::rule(format!(
            "trimester {trimester} does not exist"
        )));
    }

    if let Some(section_id) = state.section() {
        let Some(section) = ctx.lookup.section(section_id) else {
            return Err(ValidationError::rule(format!(
                "section {section_id} does not exist"
            )));
        };
        if section.trimester_id != Some(trimester) {
            return Err(ValidationError::rule(format!(
                "section {section_id} is not offered in trimester {trimester}"
            )));
        }
        if section.subject_id != Some(subject) {
            return Err(ValidationError::rule(format!(
                "section {section_id} does not teach subject {subject}"
            )));
        }
    }

    match ctx.lookup.course_for(student, subject, trimester) {
        Some(other) if ctx.collides(other.audit.id) => {
            return Err(ValidationError::conflict(format!(
                "student {student} already has a course for subject {subject} this trimester"
            )));
        }
        _ => {}
    }

    let change = SeatChange::between(old, &state);
    if let Some(mut section) = change.take.and_then(|id| ctx.lookup.section(id)) {
        change.apply_to(&mut section)?;
    }

    Ok(())
}

impl Rules for Course {
    fn check_fields(&self, fields: &mut Fields) {
        fields.required("student", &self.student_id);
        fields.required("subject", &self.subject_id);
        fields.required("trimester", &self.trimester_id);
        if let Some(grade) = self.grade {
            fields.in_range("grade", grade, GRADE_RANGE);
        }
    }

    fn check_insert(&self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        check_course(self, None, ctx)
    }

    fn check_update(&self, old: &Self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        // A stored row in an illegal state holds no seat worth releasing
        let previous = old.state().ok();
        check_course(self, previous.as_ref(), ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Validator,
        snapshot::Snapshot,
        testing::{World, clock},
    };
    use models::course::CourseStatus;
    use uuid::Uuid;

    #[test]
    fn test_selected_course() {
        let world = World::new();
        let validator = Validator::new(clock());

        let selected = world.course(CourseStatus::Selected, None, None);
        assert_eq!(
            validator.validate_for_insert(&selected.into(), &world.snapshot),
            Ok(())
        );

        let with_section = world.course(CourseStatus::Selected, Some(world.section.audit.id), None);
        let err = validator
            .validate_for_insert(&with_section.into(), &world.snapshot)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid operation: a SELECTED course cannot be assigned a section"
        );
    }

    #[test]
    fn test_completed_course_needs_section_and_grade() {
        let world = World::new();
        let validator = Validator::new(clock());
        let section = Some(world.section.audit.id);

        let completed = world.course(CourseStatus::Completed, section, Some(3.5));
        assert_eq!(
            validator.validate_for_insert(&completed.into(), &world.snapshot),
            Ok(())
        );

        let ungraded = world.course(CourseStatus::Completed, section, None);
        let err = validator
            .validate_for_insert(&ungraded.into(), &world.snapshot)
            .unwrap_err();
        assert!(err.is_business_rule());

        let unsectioned = world.course(CourseStatus::Completed, None, Some(3.5));
        let err = validator
            .validate_for_insert(&unsectioned.into(), &world.snapshot)
            .unwrap_err();
        assert!(err.is_business_rule());
    }

    #[test]
    fn test_grade_range_is_structural() {
        let world = World::new();
        let section = Some(world.section.audit.id);

        for grade in [-0.5, 4.01] {
            let course = world.course(CourseStatus::Completed, section, Some(grade));
            let err = Validator::new(clock())
                .validate_for_insert(&course.into(), &world.snapshot)
                .unwrap_err();
            assert_eq!(err.fields(), vec!["grade"]);
        }
    }

    #[test]
    fn test_registered_and_dropped_without_grade() {
        let world = World::new();
        let validator = Validator::new(clock());
        let section = Some(world.section.audit.id);

        for status in [CourseStatus::Registered, CourseStatus::Dropped] {
            let ok = world.course(status, section, None);
            assert_eq!(validator.validate_for_insert(&ok.into(), &world.snapshot), Ok(()));

            let graded = world.course(status, section, Some(2.0));
            let err = validator
                .validate_for_insert(&graded.into(), &world.snapshot)
                .unwrap_err();
            assert!(err.is_business_rule());
        }
    }

    #[test]
    fn test_missing_references_are_structural() {
        let world = World::new();
        let mut course = world.course(CourseStatus::Selected, None, None);
        course.student_id = None;
        course.trimester_id = None;

        let err = Validator::new(clock())
            .validate_for_insert(&course.into(), &Snapshot::new())
            .unwrap_err();
        assert_eq!(err.fields(), vec!["student", "trimester"]);
    }

    #[test]
    fn test_section_must_match_course() {
        let world = World::new();
        let validator = Validator::new(clock());

        let unknown = world.course(CourseStatus::Registered, Some(Uuid::new_v4()), None);
        let err = validator
            .validate_for_insert(&unknown.into(), &world.snapshot)
            .unwrap_err();
        assert!(err.is_business_rule());

        let mut elsewhere = world.section.clone();
        elsewhere.audit.id = Uuid::new_v4();
        elsewhere.trimester_id = Some(Uuid::new_v4());
        let snapshot = world.snapshot.clone().with(elsewhere.clone());

        let mismatched = world.course(CourseStatus::Registered, Some(elsewhere.audit.id), None);
        let err = validator
            .validate_for_insert(&mismatched.into(), &snapshot)
            .unwrap_err();
        assert!(err.is_business_rule());
    }

    #[test]
    fn test_one_course_per_subject_and_trimester() {
        let world = World::new();
        let stored = world.course(CourseStatus::Selected, None, None);
        let snapshot = world.snapshot.clone().with(stored);

        let again = world.course(CourseStatus::Selected, None, None);
        let err = Validator::new(clock())
            .validate_for_insert(&again.into(), &snapshot)
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_status_moves_follow_the_table() {
        let world = World::new();
        let validator = Validator::new(clock());
        let stored = world.course(CourseStatus::Selected, None, None);
        let snapshot = world.snapshot.clone().with(stored.clone());

        let mut registered = stored.clone();
        registered.status = CourseStatus::Registered;
        registered.section_id = Some(world.section.audit.id);
        assert_eq!(
            validator.validate_for_update(&stored.clone().into(), &registered.clone().into(), &snapshot),
            Ok(())
        );

        let mut completed = registered.clone();
        completed.status = CourseStatus::Completed;
        completed.grade = Some(4.0);
        assert_eq!(
            validator.validate_for_update(&registered.into(), &completed.into(), &snapshot),
            Ok(())
        );
    }

    #[test]
    fn test_full_section_rejects_registration() {
        let mut world = World::new();
        world.section.current_capacity = world.section.max_capacity;
        let snapshot = world.snapshot.clone().with(world.section.clone());
        let validator = Validator::new(clock());

        let stored = world.course(CourseStatus::Selected, None, None);
        let snapshot = snapshot.with(stored.clone());

        let mut registered = stored.clone();
        registered.status = CourseStatus::Registered;
        registered.section_id = Some(world.section.audit.id);
        let err = validator
            .validate_for_update(&stored.into(), &registered.clone().into(), &snapshot)
            .unwrap_err();
        assert!(err.is_business_rule());

        // Already holding the seat, a full section is no obstacle
        let mut completed = registered.clone();
        completed.status = CourseStatus::Completed;
        completed.grade = Some(3.0);
        assert_eq!(
            validator.validate_for_update(&registered.into(), &completed.into(), &snapshot),
            Ok(())
        );
    }
}
