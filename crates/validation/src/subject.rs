use crate::{
    context::Context,
    error::ValidationError,
    fields::Fields,
    graph::PrerequisiteGraph,
    rules::{Rules, present},
};
use models::subject::{CREDIT_RANGE, GRADE_RANGE, Prerequisite, Subject};
use uuid::Uuid;

pub const MAX_CODE_NAME_LEN: usize = 16;
pub const MAX_NAME_LEN: usize = 100;

impl Rules for Subject {
    fn check_fields(&self, fields: &mut Fields) {
        fields.text("code_name", &self.code_name, MAX_CODE_NAME_LEN);
        fields.text("name", &self.name, MAX_NAME_LEN);
        fields.in_range("credits", self.credits, CREDIT_RANGE);
    }

    fn check_insert(&self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        match ctx.lookup.subject_by_code(&self.code_name) {
            Some(other) if ctx.collides(other.audit.id) => Err(ValidationError::conflict(
                format!("subject code {} is already taken", self.code_name),
            )),
            _ => Ok(()),
        }
    }
}

/// Human readable name of a subject for error messages
fn describe(ctx: &Context<'_>, id: Uuid) -> String {
    ctx.lookup
        .subject(id)
        .map(|subject| subject.code_name)
        .unwrap_or_else(|| id.to_string())
}

impl Rules for Prerequisite {
    fn check_fields(&self, fields: &mut Fields) {
        fields.required("subject", &self.subject_id);
        fields.required("required_subject", &self.required_subject_id);
        fields.in_range("min_grade", self.min_grade, GRADE_RANGE);
    }

    fn check_insert(&self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        let subject = present(self.subject_id, "subject")?;
        let required = present(self.required_subject_id, "required_subject")?;

        if subject == required {
            return Err(ValidationError::rule(format!(
                "subject {} cannot require itself",
                describe(ctx, subject)
            )));
        }

        for id in [subject, required] {
            if ctx.lookup.subject(id).is_none() {
                return Err(ValidationError::rule(format!("subject {id} does not exist")));
            }
        }

        let duplicate = ctx.lookup.prerequisites_of(subject).into_iter().any(|edge| {
            edge.required_subject_id == Some(required) && ctx.collides(edge.audit.id)
        });
        if duplicate {
            return Err(ValidationError::conflict(format!(
                "{} already requires {}",
                describe(ctx, subject),
                describe(ctx, required)
            )));
        }

        let graph = PrerequisiteGraph::reachable_from(ctx.lookup, required);
        if let Some(cycle) = graph.cycle_through(subject, required) {
            let chain = cycle
                .into_iter()
                .map(|id| describe(ctx, id))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ValidationError::rule(format!(
                "prerequisite would create a cycle: {chain}"
            )));
        }

        Ok(())
    }

    fn check_update(&self, old: &Self, _ctx: &Context<'_>) -> Result<(), ValidationError> {
        // Only the minimum grade of an edge may change
        if self.edge() != old.edge() {
            return Err(ValidationError::rule(
                "the subjects of a prerequisite cannot change; delete and recreate it instead",
            ));
        }
        Ok(())
    }
}
