use crate::audit::Audit;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

pub const MAX_TITLE_LEN: usize = 128;
pub const MAX_CONTENT_LEN: usize = 4000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationScope {
    Global,
    Trimester,
    Section,
    User,
}

impl NotificationScope {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

/// The relation fields a notification can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    Trimester,
    Section,
    TargetUser,
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Trimester => write!(f, "trimester"),
            Self::Section => write!(f, "section"),
            Self::TargetUser => write!(f, "target user"),
        }
    }
}

/// Why a scope cannot carry the given relation fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScopeError {
    Required(NotificationScope, Relation),
    NotAllowed(NotificationScope, Relation),
}

impl Display for ScopeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Required(scope, relation) => {
                write!(f, "a {} notification requires a {relation}", scope.as_str())
            }
            Self::NotAllowed(scope, relation) => {
                write!(f, "a {} notification cannot have a {relation}", scope.as_str())
            }
        }
    }
}

/// Who a notification is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationTarget {
    Global,
    Trimester(Uuid),
    Section(Uuid),
    User(Uuid),
}

impl NotificationTarget {
    /// Builds the target from the flat stored relations; exactly the scope's relation may be set
    pub fn new(
        scope: NotificationScope,
        trimester: Option<Uuid>,
        section: Option<Uuid>,
        target_user: Option<Uuid>,
    ) -> Result<Self, ScopeError> {
        let present = [
            (Relation::Trimester, trimester),
            (Relation::Section, section),
            (Relation::TargetUser, target_user),
        ];
        let wanted = match scope {
            NotificationScope::Global => None,
            NotificationScope::Trimester => Some(Relation::Trimester),
            NotificationScope::Section => Some(Relation::Section),
            NotificationScope::User => Some(Relation::TargetUser),
        };

        // Stray relations are reported before a missing one
        if let Some((relation, _)) = present
            .iter()
            .find(|(relation, id)| id.is_some() && Some(*relation) != wanted)
        {
            return Err(ScopeError::NotAllowed(scope, *relation));
        }

        match (scope, trimester, section, target_user) {
            (NotificationScope::Global, ..) => Ok(Self::Global),
            (NotificationScope::Trimester, Some(id), _, _) => Ok(Self::Trimester(id)),
            (NotificationScope::Section, _, Some(id), _) => Ok(Self::Section(id)),
            (NotificationScope::User, _, _, Some(id)) => Ok(Self::User(id)),
            (NotificationScope::Trimester, ..) => {
                Err(ScopeError::Required(scope, Relation::Trimester))
            }
            (NotificationScope::Section, ..) => Err(ScopeError::Required(scope, Relation::Section)),
            (NotificationScope::User, ..) => Err(ScopeError::Required(scope, Relation::TargetUser)),
        }
    }

    pub fn scope(&self) -> NotificationScope {
        match self {
            Self::Global => NotificationScope::Global,
            Self::Trimester(_) => NotificationScope::Trimester,
            Self::Section(_) => NotificationScope::Section,
            Self::User(_) => NotificationScope::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub audit: Audit,
    pub scope: NotificationScope,
    pub title: String,
    pub content: String,
    pub trimester_id: Option<Uuid>,
    pub section_id: Option<Uuid>,
    pub target_user_id: Option<Uuid>,
}

impl Notification {
    pub fn target(&self) -> Result<NotificationTarget, ScopeError> {
        NotificationTarget::new(
            self.scope,
            self.trimester_id,
            self.section_id,
            self.target_user_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_target() {
        assert_eq!(
            NotificationTarget::new(NotificationScope::Global, None, None, None),
            Ok(NotificationTarget::Global)
        );
        assert_eq!(
            NotificationTarget::new(NotificationScope::Global, Some(Uuid::new_v4()), None, None),
            Err(ScopeError::NotAllowed(
                NotificationScope::Global,
                Relation::Trimester
            ))
        );
    }

    #[test]
    fn test_scoped_targets() {
        let id = Uuid::new_v4();

        assert_eq!(
            NotificationTarget::new(NotificationScope::Trimester, Some(id), None, None),
            Ok(NotificationTarget::Trimester(id))
        );
        assert_eq!(
            NotificationTarget::new(NotificationScope::Section, None, Some(id), None),
            Ok(NotificationTarget::Section(id))
        );
        assert_eq!(
            NotificationTarget::new(NotificationScope::User, None, None, Some(id)),
            Ok(NotificationTarget::User(id))
        );
    }

    #[test]
    fn test_missing_relation() {
        assert_eq!(
            NotificationTarget::new(NotificationScope::Section, None, None, None),
            Err(ScopeError::Required(
                NotificationScope::Section,
                Relation::Section
            ))
        );
    }

    #[test]
    fn test_extra_relation() {
        let id = Uuid::new_v4();

        assert_eq!(
            NotificationTarget::new(NotificationScope::User, None, Some(id), Some(id)),
            Err(ScopeError::NotAllowed(
                NotificationScope::User,
                Relation::Section
            ))
        );
    }

    #[test]
    fn test_scope_error_display() {
        let err = ScopeError::Required(NotificationScope::Trimester, Relation::Trimester);
        assert_eq!(
            err.to_string(),
            "a TRIMESTER notification requires a trimester"
        );
    }
}
