use crate::{context::Context, error::ValidationError, fields::Fields, rules::Rules};
use models::notification::{MAX_CONTENT_LEN, MAX_TITLE_LEN, Notification, NotificationTarget};

impl Rules for Notification {
    fn check_fields(&self, fields: &mut Fields) {
        fields.text("title", &self.title, MAX_TITLE_LEN);
        fields.text("content", &self.content, MAX_CONTENT_LEN);
    }

    fn check_insert(&self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        let target = self
            .target()
            .map_err(|err| ValidationError::rule(err.to_string()))?;

        let exists = match target {
            NotificationTarget::Global => true,
            NotificationTarget::Trimester(id) => ctx.lookup.trimester(id).is_some(),
            NotificationTarget::Section(id) => ctx.lookup.section(id).is_some(),
            NotificationTarget::User(id) => {
                ctx.lookup.student(id).is_some() || ctx.lookup.faculty(id).is_some()
            }
        };
        if !exists {
            return Err(ValidationError::rule(format!(
                "the {} this notification targets does not exist",
                target.scope().as_str().to_lowercase()
            )));
        }

        Ok(())
    }

    fn check_update(&self, old: &Self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        if self.scope != old.scope {
            return Err(ValidationError::rule(format!(
                "notification scope cannot change from {} to {}",
                old.scope.as_str(),
                self.scope.as_str()
            )));
        }
        self.check_insert(ctx)
    }
}
