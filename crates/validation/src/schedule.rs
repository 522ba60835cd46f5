use crate::{
    context::Context,
    error::ValidationError,
    fields::Fields,
    rules::{Rules, present},
};
use models::schedule::{Section, SpaceTime};
use std::collections::HashSet;

pub const MAX_ROOM_NUMBER_LEN: usize = 32;

impl Rules for SpaceTime {
    fn check_fields(&self, fields: &mut Fields) {
        fields.text("room_number", &self.room_number, MAX_ROOM_NUMBER_LEN);
        fields.required("time_slot", &self.time_slot);
    }

    fn check_insert(&self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        let time_slot = present(self.time_slot, "time_slot")?;
        let range = self.room_type.slot_range();
        if !range.contains(&time_slot) {
            return Err(ValidationError::rule(format!(
                "a {} room only has slots {} to {}, got {time_slot}",
                self.room_type.as_str(),
                range.start(),
                range.end()
            )));
        }

        let Some(key) = self.slot_key() else {
            return Ok(());
        };
        let taken = ctx
            .lookup
            .space_times_at(&key)
            .into_iter()
            .any(|other| ctx.collides(other.audit.id));
        if taken {
            return Err(ValidationError::conflict(format!("{key} already exists")));
        }

        Ok(())
    }
}

impl Rules for Section {
    fn check_fields(&self, fields: &mut Fields) {
        fields.required("subject", &self.subject_id);
        fields.required("trimester", &self.trimester_id);
        fields.check("max_capacity", self.max_capacity > 0, || {
            "must be greater than 0".to_string()
        });
        fields.check("current_capacity", self.current_capacity >= 0, || {
            "must not be negative".to_string()
        });
        fields.check("space_times", !self.space_time_ids.is_empty(), || {
            "must contain at least one slot".to_string()
        });
    }

    fn check_insert(&self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        let subject = present(self.subject_id, "subject")?;
        let trimester = present(self.trimester_id, "trimester")?;

        if self.current_capacity > self.max_capacity {
            return Err(ValidationError::rule(format!(
                "current capacity {} exceeds max capacity {}",
                self.current_capacity, self.max_capacity
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

        let mut seen = HashSet::new();
        for &id in &self.space_time_ids {
            if !seen.insert(id) {
                return Err(ValidationError::rule(format!(
                    "space time {id} is listed twice"
                )));
            }
            if ctx.lookup.space_time(id).is_none() {
                return Err(ValidationError::rule(format!(
                    "space time {id} does not exist"
                )));
            }
        }

        for &teacher in &self.teacher_ids {
            match ctx.lookup.faculty(teacher) {
                Some(faculty) if faculty.can_teach() => {}
                Some(faculty) => {
                    return Err(ValidationError::rule(format!(
                        "{} is {} and cannot teach a section",
                        faculty.name,
                        faculty.user_type.as_str()
                    )));
                }
                None => {
                    return Err(ValidationError::rule(format!(
                        "teacher {teacher} does not exist"
                    )));
                }
            }
        }

        let booked = ctx
            .lookup
            .sections_in_trimester(trimester)
            .into_iter()
            .filter(|other| ctx.collides(other.audit.id))
            .find_map(|other| {
                self.space_time_ids
                    .iter()
                    .find(|&&id| other.uses(id))
                    .map(|&id| (other.audit.id, id))
            });
        if let Some((other, space_time)) = booked {
            let slot = ctx
                .lookup
                .space_time(space_time)
                .and_then(|st| st.slot_key())
                .map(|key| key.to_string())
                .unwrap_or_else(|| space_time.to_string());
            return Err(ValidationError::conflict(format!(
                "{slot} is already booked by section {other} this trimester"
            )));
        }

        Ok(())
    }

    fn check_update(&self, old: &Self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        // Seats are only taken and released by course writes
        if self.current_capacity != old.current_capacity {
            return Err(ValidationError::rule(format!(
                "current capacity of section {} is maintained by course registrations \
                 and cannot be set from {} to {}",
                self.audit.id, old.current_capacity, self.current_capacity
            )));
        }
        self.check_insert(ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Validator,
        snapshot::Snapshot,
        testing::{clock, faculty, section, space_time, subject, trimester},
    };
    use models::{
        schedule::{DayOfWeek, RoomType},
        trimester::{Season, TrimesterStatus},
        user::UserType,
    };

    #[test]
    fn test_theory_slot_range() {
        let validator = Validator::new(clock());

        for slot in 1..=6 {
            let candidate = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(slot));
            assert_eq!(
                validator.validate_for_insert(&candidate.into(), &Snapshot::new()),
                Ok(())
            );
        }

        for slot in [0, 7] {
            let candidate = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(slot));
            let err = validator
                .validate_for_insert(&candidate.into(), &Snapshot::new())
                .unwrap_err();
            assert!(err.is_business_rule());
        }
    }

    #[test]
    fn test_lab_slot_range() {
        let validator = Validator::new(clock());

        for slot in 1..=3 {
            let candidate = space_time("L1", DayOfWeek::Friday, RoomType::Lab, Some(slot));
            assert_eq!(
                validator.validate_for_insert(&candidate.into(), &Snapshot::new()),
                Ok(())
            );
        }

        for slot in [0, 4] {
            let candidate = space_time("L1", DayOfWeek::Friday, RoomType::Lab, Some(slot));
            let err = validator
                .validate_for_insert(&candidate.into(), &Snapshot::new())
                .unwrap_err();
            assert!(err.is_business_rule());
        }
    }

    #[test]
    fn test_missing_slot_is_structural() {
        let candidate = space_time("101", DayOfWeek::Monday, RoomType::Theory, None);

        let err = Validator::new(clock())
            .validate_for_insert(&candidate.into(), &Snapshot::new())
            .unwrap_err();
        assert_eq!(err.fields(), vec!["time_slot"]);
    }

    #[test]
    fn test_duplicate_space_time_conflicts() {
        let stored = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(2));
        let snapshot = Snapshot::new().with(stored.clone());
        let validator = Validator::new(clock());

        let twin = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(2));
        let err = validator
            .validate_for_insert(&twin.into(), &snapshot)
            .unwrap_err();
        assert_eq!(err.to_string(), "conflict: room 101 on M slot 2 already exists");

        // Re-validating the stored row itself is not a collision
        assert_eq!(
            validator.validate_for_update(&stored.clone().into(), &stored.into(), &snapshot),
            Ok(())
        );
    }

    #[test]
    fn test_inserting_a_stored_space_time_again_conflicts() {
        let stored = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(2));
        let snapshot = Snapshot::new().with(stored.clone());

        let err = Validator::new(clock())
            .validate_for_insert(&stored.into(), &snapshot)
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_section_update_keeps_seat_counter() {
        let subject = subject("CSE1111");
        let trimester = trimester(2024, Season::Fall, TrimesterStatus::SectionCreation);
        let slot = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(1));
        let mut stored = section(&subject, &trimester, &[&slot]);
        stored.current_capacity = stored.max_capacity;
        let snapshot = Snapshot::new()
            .with(subject.clone())
            .with(trimester.clone())
            .with(slot.clone())
            .with(stored.clone());
        let validator = Validator::new(clock());

        let mut reset = stored.clone();
        reset.current_capacity = 0;
        let err = validator
            .validate_for_update(&stored.clone().into(), &reset.into(), &snapshot)
            .unwrap_err();
        assert!(err.is_business_rule());

        let mut enlarged = stored.clone();
        enlarged.max_capacity += 10;
        assert_eq!(
            validator.validate_for_update(&stored.into(), &enlarged.into(), &snapshot),
            Ok(())
        );
    }

    #[test]
    fn test_capacity_bounds() {
        let subject = subject("CSE1111");
        let trimester = trimester(2024, Season::Fall, TrimesterStatus::SectionCreation);
        let slot = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(1));
        let snapshot = Snapshot::new()
            .with(subject.clone())
            .with(trimester.clone())
            .with(slot.clone());
        let validator = Validator::new(clock());

        let mut empty = section(&subject, &trimester, &[&slot]);
        empty.max_capacity = 0;
        let err = validator
            .validate_for_insert(&empty.into(), &snapshot)
            .unwrap_err();
        assert_eq!(err.fields(), vec!["max_capacity"]);

        let mut overfull = section(&subject, &trimester, &[&slot]);
        overfull.current_capacity = overfull.max_capacity + 1;
        let err = validator
            .validate_for_insert(&overfull.into(), &snapshot)
            .unwrap_err();
        assert!(err.is_business_rule());

        let unscheduled = section(&subject, &trimester, &[]);
        let err = validator
            .validate_for_insert(&unscheduled.into(), &snapshot)
            .unwrap_err();
        assert_eq!(err.fields(), vec!["space_times"]);
    }

    #[test]
    fn test_double_booking_within_trimester() {
        let subject = subject("CSE1111");
        let fall = trimester(2024, Season::Fall, TrimesterStatus::SectionCreation);
        let spring = trimester(2025, Season::Spring, TrimesterStatus::Upcoming);
        let slot = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(1));
        let validator = Validator::new(clock());

        let first = section(&subject, &fall, &[&slot]);
        let mut snapshot = Snapshot::new()
            .with(subject.clone())
            .with(fall.clone())
            .with(spring.clone())
            .with(slot.clone());
        assert_eq!(validator.validate_for_insert(&first.clone().into(), &snapshot), Ok(()));
        snapshot.insert(first);

        let second = section(&subject, &fall, &[&slot]);
        let err = validator
            .validate_for_insert(&second.into(), &snapshot)
            .unwrap_err();
        assert!(err.is_conflict());

        let next_trimester = section(&subject, &spring, &[&slot]);
        assert_eq!(
            validator.validate_for_insert(&next_trimester.into(), &snapshot),
            Ok(())
        );
    }

    #[test]
    fn test_teachers_must_be_teaching_faculty() {
        let subject = subject("CSE1111");
        let trimester = trimester(2024, Season::Fall, TrimesterStatus::SectionCreation);
        let slot = space_time("101", DayOfWeek::Monday, RoomType::Theory, Some(1));
        let teacher = faculty("Ada", UserType::Teacher);
        let admin = faculty("Grace", UserType::Admin);
        let snapshot = Snapshot::new()
            .with(subject.clone())
            .with(trimester.clone())
            .with(slot.clone())
            .with(teacher.clone())
            .with(admin.clone());
        let validator = Validator::new(clock());

        let mut taught = section(&subject, &trimester, &[&slot]);
        taught.teacher_ids = vec![teacher.audit.id];
        assert_eq!(validator.validate_for_insert(&taught.into(), &snapshot), Ok(()));

        let mut administered = section(&subject, &trimester, &[&slot]);
        administered.teacher_ids = vec![admin.audit.id];
        let err = validator
            .validate_for_insert(&administered.into(), &snapshot)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid operation: Grace is ADMIN and cannot teach a section"
        );
    }
}
