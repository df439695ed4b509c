use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Join code length in digits (range 00000–99999, leading zeros allowed).
pub const JOIN_CODE_LEN: usize = 5;

/// Join code validity window in days.
pub const JOIN_CODE_TTL_DAYS: i64 = 3;

/// Upper bound on silent regeneration attempts when a freshly generated
/// code collides with another school's active code.
pub const MAX_CODE_GENERATION_ATTEMPTS: usize = 20;

/// A school's active join code. A school holds at most one at a time;
/// issuing a new one replaces the old in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCode {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl JoinCode {
    /// An expired code is indistinguishable from an unknown one to callers;
    /// `expires_at <= now` counts as expired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// School (tenant) record.
#[derive(Debug, Clone)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub abbreviation: String,
    pub join_code: JoinCode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Staff,
    Admin,
}

impl UserRole {
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Staff => 0,
            Self::Admin => 1,
        }
    }

    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Staff),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Gateway identity headers carry the role as a plain integer.
    pub fn as_u8(self) -> u8 {
        self.as_i16() as u8
    }
}

/// Lifecycle status of a user account. `Pending` transitions exactly once
/// to `Active` or `Rejected`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Pending,
    Active,
    Rejected,
}

impl UserStatus {
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Pending => 0,
            Self::Active => 1,
            Self::Rejected => 2,
        }
    }

    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Pending),
            1 => Some(Self::Active),
            2 => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Rejected => "rejected",
        }
    }
}

/// User account scoped to a school. `school_id` is resolved from the join
/// code at submission time and never changes afterwards.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub school_id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The admin performing a privileged onboarding action. Cross-school checks
/// compare against `school_id`.
#[derive(Debug, Clone, Copy)]
pub struct Admin {
    pub user_id: Uuid,
    pub school_id: Uuid,
}

/// Admin decision on a pending user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveAction {
    Approve,
    Reject,
}
