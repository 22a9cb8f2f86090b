//! Login, registration and profile forms

use serde::{Deserialize, Serialize};
use shared::error::ErrorCode;
use shared::form::Choice;
use shared::models::{Identity, IdentityCreate, ProfileUpdate, Role};
use shared::{AppError, FieldErrors};
use sqlx::SqlitePool;
use validator::Validate;

use super::employee::check_identity;
use super::{FieldSpec, FormError, Widget, choice, collect, optional, optional_email, required, trim};
use crate::util::hash_password;

pub const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("username", "Username", Widget::Text).required(),
    FieldSpec::new("password", "Password", Widget::Password).required(),
];

pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl LoginForm {
    /// Presence checks only; credentials are verified by the controller
    pub fn clean(mut self) -> Result<Self, FormError> {
        trim([&mut self.username]);
        let mut errors = FieldErrors::new();
        required(&mut errors, "username", &self.username);
        required(&mut errors, "password", &self.password);
        Ok(errors.finish(self)?)
    }
}

pub const REGISTRATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("username", "Username", Widget::Text).required(),
    FieldSpec::new("email", "Email address", Widget::Email).required(),
    FieldSpec::new("first_name", "First name", Widget::Text),
    FieldSpec::new("last_name", "Last name", Widget::Text),
    FieldSpec::new("role", "Role", Widget::Select).required(),
    FieldSpec::new("employee_id", "Employee ID", Widget::Text),
    FieldSpec::new("department", "Department", Widget::Text),
    FieldSpec::new("phone", "Phone", Widget::Text),
    FieldSpec::new("password1", "Password", Widget::Password).required(),
    FieldSpec::new("password2", "Password confirmation", Widget::Password).required(),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationForm {
    #[validate(
        length(max = 150, message = "Ensure this value has at most 150 characters."),
        custom(function = "crate::forms::validate_username")
    )]
    pub username: String,
    pub email: String,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub first_name: String,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub last_name: String,
    pub role: String,
    #[validate(length(max = 20, message = "Ensure this value has at most 20 characters."))]
    pub employee_id: String,
    #[validate(length(max = 100, message = "Ensure this value has at most 100 characters."))]
    pub department: String,
    #[validate(length(max = 15, message = "Ensure this value has at most 15 characters."))]
    pub phone: String,
    #[serde(skip_serializing)]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,
}

impl RegistrationForm {
    /// Validated new identity with its password hashed.
    ///
    /// The Admin role is accepted only when `allow_admin` is set.
    pub async fn clean(
        mut self,
        pool: &SqlitePool,
        allow_admin: bool,
    ) -> Result<IdentityCreate, FormError> {
        trim([
            &mut self.username,
            &mut self.email,
            &mut self.first_name,
            &mut self.last_name,
            &mut self.role,
            &mut self.employee_id,
            &mut self.department,
            &mut self.phone,
        ]);

        let mut errors = collect(self.validate());
        check_identity(
            &mut errors,
            pool,
            &self.username,
            &self.email,
            &self.employee_id,
            None,
        )
        .await?;
        required(&mut errors, "email", &self.email);

        let role = choice::<Role>(&mut errors, "role", &self.role, None);
        if role == Some(Role::Admin) && !allow_admin {
            errors.add_code("role", ErrorCode::RoleNotAllowed);
        }

        if required(&mut errors, "password1", &self.password1)
            && self.password1.chars().count() < 8
        {
            errors.add_code("password1", ErrorCode::PasswordTooShort);
        }
        if required(&mut errors, "password2", &self.password2) && self.password1 != self.password2
        {
            errors.add_code("password2", ErrorCode::PasswordMismatch);
        }

        let role = errors.finish(role)?.unwrap_or(Role::Employee);
        let password_hash = hash_password(&self.password1)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

        Ok(IdentityCreate {
            employee_id: optional(&self.employee_id),
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            department: self.department,
            phone: self.phone,
            profile_picture: None,
            password_hash,
        })
    }
}

/// Role choices offered at registration
pub fn registration_roles(allow_admin: bool) -> Vec<shared::ChoiceOption> {
    Role::ALL
        .iter()
        .filter(|r| allow_admin || **r != Role::Admin)
        .map(|r| shared::ChoiceOption::new(r.as_str(), r.label()))
        .collect()
}

pub const PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("first_name", "First name", Widget::Text),
    FieldSpec::new("last_name", "Last name", Widget::Text),
    FieldSpec::new("email", "Email address", Widget::Email),
    FieldSpec::new("phone", "Phone", Widget::Text),
    FieldSpec::new("department", "Department", Widget::Text),
    FieldSpec::new("profile_picture", "Profile picture", Widget::Text),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProfileForm {
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub first_name: String,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub last_name: String,
    pub email: String,
    #[validate(length(max = 15, message = "Ensure this value has at most 15 characters."))]
    pub phone: String,
    #[validate(length(max = 100, message = "Ensure this value has at most 100 characters."))]
    pub department: String,
    /// Reference to an already stored image (path or URL)
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub profile_picture: String,
}

impl ProfileForm {
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            email: identity.email.clone(),
            phone: identity.phone.clone(),
            department: identity.department.clone(),
            profile_picture: identity.profile_picture.clone().unwrap_or_default(),
        }
    }

    pub fn clean(mut self) -> Result<ProfileUpdate, FormError> {
        trim([
            &mut self.first_name,
            &mut self.last_name,
            &mut self.email,
            &mut self.phone,
            &mut self.department,
            &mut self.profile_picture,
        ]);
        let mut errors = collect(self.validate());
        optional_email(&mut errors, "email", &self.email);
        errors.finish(())?;

        Ok(ProfileUpdate {
            profile_picture: optional(&self.profile_picture),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            department: self.department,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{identity, pool};
    use crate::forms::{INVALID_EMAIL, REQUIRED};

    fn registration(role: &str) -> RegistrationForm {
        RegistrationForm {
            username: "newbie".into(),
            email: "newbie@example.com".into(),
            first_name: "New".into(),
            last_name: "Bie".into(),
            role: role.into(),
            employee_id: String::new(),
            department: String::new(),
            phone: String::new(),
            password1: "long-enough".into(),
            password2: "long-enough".into(),
        }
    }

    fn invalid<T: std::fmt::Debug>(result: Result<T, FormError>) -> FieldErrors {
        match result {
            Err(FormError::Invalid(errors)) => errors,
            other => panic!("expected invalid form, got {other:?}"),
        }
    }

    #[test]
    fn test_login_requires_both() {
        let errors = invalid(LoginForm::default().clean());
        assert_eq!(errors.get("username").unwrap(), [REQUIRED]);
        assert_eq!(errors.get("password").unwrap(), [REQUIRED]);

        let form = LoginForm {
            username: " jdoe ".into(),
            password: "x".into(),
        };
        assert_eq!(form.clean().unwrap().username, "jdoe");
    }

    #[tokio::test]
    async fn test_registration_ok() {
        let pool = pool().await;
        let data = registration("EMPLOYEE").clean(&pool, false).await.unwrap();
        assert_eq!(data.role, Role::Employee);
        assert!(data.employee_id.is_none());
        assert!(data.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_registration_admin_role_gated() {
        let pool = pool().await;
        let errors = invalid(registration("ADMIN").clean(&pool, false).await);
        assert_eq!(
            errors.get("role").unwrap(),
            [ErrorCode::RoleNotAllowed.message()]
        );

        let data = registration("ADMIN").clean(&pool, true).await.unwrap();
        assert_eq!(data.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_registration_password_and_email_rules() {
        let pool = pool().await;
        identity(&pool, "newbie", Role::Employee).await;

        let mut form = registration("MANAGER");
        form.email.clear();
        form.password1 = "short".into();
        form.password2 = "different".into();

        let errors = invalid(form.clean(&pool, false).await);
        assert!(errors.contains("username"));
        assert_eq!(errors.get("email").unwrap(), [REQUIRED]);
        assert!(errors.contains("role"));
        assert_eq!(
            errors.get("password1").unwrap(),
            [ErrorCode::PasswordTooShort.message()]
        );
        assert_eq!(
            errors.get("password2").unwrap(),
            [ErrorCode::PasswordMismatch.message()]
        );
    }

    #[test]
    fn test_registration_roles() {
        assert_eq!(registration_roles(false).len(), 1);
        assert_eq!(registration_roles(true).len(), 2);
    }

    #[test]
    fn test_profile_clean() {
        let form = ProfileForm {
            first_name: " Jane ".into(),
            email: "bad".into(),
            ..Default::default()
        };
        let errors = invalid(form.clean());
        assert_eq!(errors.get("email").unwrap(), [INVALID_EMAIL]);

        let form = ProfileForm {
            first_name: "Jane".into(),
            profile_picture: "profiles/jane.png".into(),
            ..Default::default()
        };
        let data = form.clean().unwrap();
        assert_eq!(data.profile_picture.as_deref(), Some("profiles/jane.png"));
        assert!(data.email.is_empty());
    }
}
