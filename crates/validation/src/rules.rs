use crate::{context::Context, error::ValidationError, fields::Fields};

/// The invariants one entity type must satisfy before it is written
pub trait Rules {
    /// Constraints on the entity's own fields, independent of any other row
    fn check_fields(&self, fields: &mut Fields);

    /// State machine, graph, capacity and uniqueness rules for a new row.
    ///
    /// Only called once [`Rules::check_fields`] reported nothing.
    fn check_insert(&self, ctx: &Context<'_>) -> Result<(), ValidationError>;

    /// Rules for replacing `old` with `self`; by default the insert rules apply
    fn check_update(&self, old: &Self, ctx: &Context<'_>) -> Result<(), ValidationError> {
        let _ = old;
        self.check_insert(ctx)
    }
}

/// Unwraps a reference that [`Rules::check_fields`] already required
pub(crate) fn present<T: Copy>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::field(field, "is required"))
}
