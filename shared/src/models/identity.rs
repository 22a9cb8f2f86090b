//! Identity Model (user accounts)

use serde::{Deserialize, Serialize};

use crate::form::Choice;

/// Account role; decides which panel an identity may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Role {
    Admin,
    Employee,
}

impl Choice for Role {
    const ALL: &'static [Self] = &[Self::Admin, Self::Employee];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Employee => "EMPLOYEE",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Employee => "Employee",
        }
    }
}

/// Identity entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Company employee number, unique when present
    pub employee_id: Option<String>,
    pub department: String,
    pub phone: String,
    /// Stored reference to an uploaded picture
    pub profile_picture: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }

    /// "First Last", falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Create identity payload (password already hashed)
#[derive(Debug, Clone)]
pub struct IdentityCreate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub employee_id: Option<String>,
    pub department: String,
    pub phone: String,
    pub profile_picture: Option<String>,
    pub password_hash: String,
}

/// Admin edit of an employee account
///
/// `password_hash` is only replaced when a new password was submitted.
#[derive(Debug, Clone)]
pub struct IdentityUpdate {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub employee_id: Option<String>,
    pub department: String,
    pub phone: String,
    pub profile_picture: Option<String>,
    pub password_hash: Option<String>,
}

/// Self-service profile edit
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub profile_picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Identity {
        Identity {
            id: 1,
            username: "jdoe".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::Employee,
            employee_id: None,
            department: String::new(),
            phone: String::new(),
            profile_picture: None,
            password_hash: "$argon2id$secret".into(),
            is_active: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut identity = sample();
        assert_eq!(identity.display_name(), "jdoe");
        identity.first_name = "Jane".into();
        identity.last_name = "Doe".into();
        assert_eq!(identity.display_name(), "Jane Doe");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "EMPLOYEE");
    }

    #[test]
    fn test_role_choice() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::Employee.label(), "Employee");
        assert!(sample().is_employee());
    }
}
