use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Access level carried by a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::User => 0,
            Self::Admin => 1,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl TryFrom<i32> for Role {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::User),
            1 => Ok(Self::Admin),
            v if v < 0 => Err(ValidationError::Negative { field: "role" }),
            _ => Err(ValidationError::Invalid { field: "role", expected: "0 or 1" }),
        }
    }
}

impl From<Role> for i32 {
    fn from(role: Role) -> Self {
        role.as_i32()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}
