use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bookkeeping fields shared by every persisted entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
    /// Optimistic concurrency counter, bumped on every stored update
    pub version: i32,
}

impl Audit {
    /// Audit block for an entity that has never been persisted
    pub fn new(actor: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            created_by: actor.to_owned(),
            updated_by: actor.to_owned(),
            version: 0,
        }
    }

    /// The audit block of the next stored revision
    pub fn touched(&self, actor: &str, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: now,
            updated_by: actor.to_owned(),
            version: self.version + 1,
            ..self.clone()
        }
    }

    /// Whether the creation fields match, i.e. `other` describes the same first persist
    pub fn same_origin(&self, other: &Self) -> bool {
        self.id == other.id
            && self.created_at == other.created_at
            && self.created_by == other.created_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_touched_bumps_version() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        let audit = Audit::new("registrar", t0);
        let next = audit.touched("advisor", t1);

        assert_eq!(next.version, audit.version + 1);
        assert_eq!(next.updated_by, "advisor");
        assert_eq!(next.updated_at, t1);
        assert!(next.same_origin(&audit));
    }

    #[test]
    fn test_same_origin_detects_creator_change() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let audit = Audit::new("registrar", t0);

        let mut forged = audit.clone();
        forged.created_by = "someone-else".to_string();

        assert!(!forged.same_origin(&audit));
    }
}
