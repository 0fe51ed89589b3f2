//! Soft-delete flags, audit stamps and the acting user.

use chrono::{DateTime, Utc};

/// Columns every entity carries.
///
/// `is_deleted` is a logical delete: such rows stay in storage but are
/// excluded from every read and update path.
#[derive(Debug, Clone, PartialEq)]
pub struct Audit {
    pub is_active: bool,
    pub is_deleted: bool,
    pub c_by: Option<String>,
    pub u_by: Option<String>,
    pub c_time: DateTime<Utc>,
    pub u_time: Option<DateTime<Utc>>,
}

impl Audit {
    /// Audit block of a freshly created, active record.
    pub fn created(stamp: &Stamp) -> Self {
        Self {
            is_active: true,
            is_deleted: false,
            c_by: Some(stamp.user.clone()),
            u_by: None,
            c_time: stamp.at,
            u_time: None,
        }
    }
}

/// The authenticated user a request runs on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Who wrote a record and when.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    pub user: String,
    pub at: DateTime<Utc>,
}

impl Stamp {
    pub fn by(actor: &Actor) -> Self {
        Self {
            user: actor.id.clone(),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_records_actor() {
        let before = Utc::now();
        let stamp = Stamp::by(&Actor::new("user-1"));

        assert_eq!(stamp.user, "user-1");
        assert!(stamp.at >= before);
    }

    #[test]
    fn test_created_audit_is_live() {
        let stamp = Stamp::by(&Actor::new("user-1"));
        let audit = Audit::created(&stamp);

        assert!(audit.is_active);
        assert!(!audit.is_deleted);
        assert_eq!(audit.c_by.as_deref(), Some("user-1"));
        assert_eq!(audit.c_time, stamp.at);
        assert!(audit.u_by.is_none());
    }
}
