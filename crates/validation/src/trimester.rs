use crate::{context::Context, error::ValidationError, fields::Fields, rules::Rules};
use chrono::{DateTime, Utc};
use models::{
    temporal::{Window, has_passed, is_future},
    trimester::{Calendar, MIN_YEAR, Trimester, TrimesterStatus},
};

/// Checks that `status` is the one the calendar allows at `now`
pub fn check_status(
    status: TrimesterStatus,
    calendar: &Calendar,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    let window = |start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>, what: &str| {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(ValidationError::rule(format!(
                "{} requires the {what} boundaries to be set",
                status.as_str()
            )));
        };
        match Window::new(start, end) {
            Some(window) if window.contains(now) => Ok(()),
            _ => Err(ValidationError::rule(format!(
                "{} is only valid between {start} and {end}",
                status.as_str()
            ))),
        }
    };

    match status {
        TrimesterStatus::Upcoming => match calendar.course_selection_start {
            Some(start) if !is_future(start, now) => Err(ValidationError::rule(format!(
                "UPCOMING is only valid before course selection starts at {start}"
            ))),
            _ => Ok(()),
        },
        TrimesterStatus::CourseSelection => window(
            calendar.course_selection_start,
            calendar.course_selection_end,
            "course selection start and end",
        ),
        TrimesterStatus::SectionCreation => window(
            calendar.course_selection_end,
            calendar.section_registration_start,
            "course selection end and section registration start",
        ),
        TrimesterStatus::SectionSelection => window(
            calendar.section_registration_start,
            calendar.section_registration_end,
            "section registration start and end",
        ),
        TrimesterStatus::Ongoing | TrimesterStatus::Completed => {
            match calendar.section_registration_end {
                None => Err(ValidationError::rule(format!(
                    "{} requires the section registration end to be set",
                    status.as_str()
                ))),
                Some(end) if !has_passed(end, now) => Err(ValidationError::rule(format!(
                    "{} is only valid after section registration ends at {end}",
                    status.as_str()
                ))),
                Some(_) => Ok(()),
            }
        }
    }
}

impl Rules for Trimester {
    fn check_fields(&self, fields: &mut Fields) {
        fields.check("year", self.year >= MIN_YEAR, || {
            format!("must be {MIN_YEAR} or later")
        });
    }

    fn check_insert(&self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        let expected = self.expected_code();
        if self.code != *expected {
            return Err(ValidationError::rule(format!(
                "code {} does not match {} {} (expected {expected})",
                self.code,
                self.season.as_str(),
                self.year
            )));
        }

        if !self.calendar.is_chronological() {
            return Err(ValidationError::rule(
                "calendar boundaries must run course selection start, course selection end, \
                 section registration start, section registration end",
            ));
        }

        check_status(self.status, &self.calendar, ctx.now)?;

        match ctx.lookup.trimester_by_code(self.code) {
            Some(other) if ctx.collides(other.audit.id) => Err(ValidationError::conflict(
                format!("trimester {expected} already exists"),
            )),
            _ => Ok(()),
        }
    }
}
