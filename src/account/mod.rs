mod manager;
mod profile;
mod repository;

pub use manager::*;
pub use profile::*;
pub use repository::*;

use serde::{Deserialize, Serialize};

/// Coarse classification of a principal.
///
/// Informational only: the authorization predicates never consult it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i16)]
pub enum Role {
    Restaurant = 1,
    Customer = 2,
}

/// User as saved on database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    /// Login identifier. Unique, domain part lowercased at creation.
    pub email: String,
    pub phone_number: Option<String>,
    pub role: Option<Role>,
    /// PHC hash string. `None` means no usable credential.
    #[serde(skip)]
    pub password: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub is_superadmin: bool,
    pub is_staff: bool,
    pub date_joined: chrono::DateTime<chrono::Utc>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_date: chrono::DateTime<chrono::Utc>,
    pub modified_date: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// Coarse permission check used by the host access-control layer.
    pub fn has_elevated_permission(&self) -> bool {
        self.is_admin || self.is_superadmin || self.is_staff
    }

    /// Whether the principal may enter administrative modules at all.
    ///
    /// Same flag union as [`Self::has_elevated_permission`]; callers needing
    /// per-module authorization must build it on top.
    pub fn has_module_access(&self) -> bool {
        self.is_staff || self.is_admin || self.is_superadmin
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.email)
    }
}
