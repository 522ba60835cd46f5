use crate::{
    context::Context, error::ValidationError, fields::Fields, rules::Rules, subject::MAX_NAME_LEN,
};
use models::user::{Faculty, Student, UserType};

pub const MAX_EMAIL_LEN: usize = 100;

fn check_contact(fields: &mut Fields, name: &str, email: &str) {
    fields.text("name", name, MAX_NAME_LEN);
    fields.text("email", email, MAX_EMAIL_LEN);
    fields.check("email", email.trim().is_empty() || email.contains('@'), || {
        "must be an email address".to_string()
    });
}

impl Rules for Student {
    fn check_fields(&self, fields: &mut Fields) {
        check_contact(fields, &self.name, &self.email);
        fields.check("university_id", self.university_id >= 0, || {
            "must not be negative".to_string()
        });
    }

    fn check_insert(&self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        match ctx.lookup.student_by_university_id(self.university_id) {
            Some(other) if ctx.collides(other.audit.id) => Err(ValidationError::conflict(
                format!("university id {} is already taken", self.university_id),
            )),
            _ => Ok(()),
        }
    }
}

impl Rules for Faculty {
    fn check_fields(&self, fields: &mut Fields) {
        check_contact(fields, &self.name, &self.email);
    }

    fn check_insert(&self, _ctx: &Context<'_>) -> Result<(), ValidationError> {
        match self.user_type {
            UserType::Teacher | UserType::Admin => Ok(()),
            UserType::Student => Err(ValidationError::rule(
                "faculty must be a TEACHER or an ADMIN, not a STUDENT",
            )),
        }
    }
}
