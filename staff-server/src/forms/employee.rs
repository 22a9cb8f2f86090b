//! Employee add / edit form (admin surface)

use serde::{Deserialize, Serialize};
use shared::error::ErrorCode;
use shared::models::{Identity, IdentityCreate, IdentityUpdate, Role};
use shared::{AppError, FieldErrors};
use sqlx::SqlitePool;
use validator::Validate;

use super::{FieldSpec, FormError, Widget, collect, optional, optional_email, required, trim};
use crate::db::{RepoError, RepoResult, identities};
use crate::util::hash_password;

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("username", "Username", Widget::Text).required(),
    FieldSpec::new("email", "Email address", Widget::Email),
    FieldSpec::new("first_name", "First name", Widget::Text),
    FieldSpec::new("last_name", "Last name", Widget::Text),
    FieldSpec::new("employee_id", "Employee ID", Widget::Text),
    FieldSpec::new("department", "Department", Widget::Text),
    FieldSpec::new("phone", "Phone", Widget::Text),
    FieldSpec::new("profile_picture", "Profile picture", Widget::Text),
    FieldSpec::new("password", "Password", Widget::Password),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EmployeeForm {
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
    #[validate(length(max = 20, message = "Ensure this value has at most 20 characters."))]
    pub employee_id: String,
    #[validate(length(max = 100, message = "Ensure this value has at most 100 characters."))]
    pub department: String,
    #[validate(length(max = 15, message = "Ensure this value has at most 15 characters."))]
    pub phone: String,
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub profile_picture: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl EmployeeForm {
    /// Prefill for the edit view; the password is never echoed
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            username: identity.username.clone(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            employee_id: identity.employee_id.clone().unwrap_or_default(),
            department: identity.department.clone(),
            phone: identity.phone.clone(),
            profile_picture: identity.profile_picture.clone().unwrap_or_default(),
            password: String::new(),
        }
    }

    async fn check(
        &self,
        errors: &mut FieldErrors,
        pool: &SqlitePool,
        except: Option<i64>,
    ) -> RepoResult<()> {
        check_identity(errors, pool, &self.username, &self.email, &self.employee_id, except).await
    }

    fn normalize(&mut self) {
        trim([
            &mut self.username,
            &mut self.email,
            &mut self.first_name,
            &mut self.last_name,
            &mut self.employee_id,
            &mut self.department,
            &mut self.phone,
            &mut self.profile_picture,
        ]);
    }

    /// New Employee-role identity; a password is required
    pub async fn clean_create(mut self, pool: &SqlitePool) -> Result<IdentityCreate, FormError> {
        self.normalize();
        let mut errors = collect(self.validate());
        self.check(&mut errors, pool, None).await?;
        required(&mut errors, "password", &self.password);
        errors.finish(())?;

        Ok(IdentityCreate {
            password_hash: hash(&self.password)?,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role: Role::Employee,
            employee_id: optional(&self.employee_id),
            profile_picture: optional(&self.profile_picture),
            department: self.department,
            phone: self.phone,
        })
    }

    /// Changes to an existing employee; a blank password keeps the current one
    pub async fn clean_update(mut self, pool: &SqlitePool, id: i64) -> Result<IdentityUpdate, FormError> {
        self.normalize();
        let mut errors = collect(self.validate());
        self.check(&mut errors, pool, Some(id)).await?;
        errors.finish(())?;

        let password_hash = if self.password.is_empty() {
            None
        } else {
            Some(hash(&self.password)?)
        };
        Ok(IdentityUpdate {
            employee_id: optional(&self.employee_id),
            profile_picture: optional(&self.profile_picture),
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            department: self.department,
            phone: self.phone,
            password_hash,
        })
    }
}

/// Username, email and employee id rules shared by every account form,
/// including uniqueness against the store
pub(crate) async fn check_identity(
    errors: &mut FieldErrors,
    pool: &SqlitePool,
    username: &str,
    email: &str,
    employee_id: &str,
    except: Option<i64>,
) -> RepoResult<()> {
    if required(errors, "username", username)
        && identities::username_taken(pool, username, except).await?
    {
        errors.add_code("username", ErrorCode::UsernameExists);
    }
    optional_email(errors, "email", email);
    if let Some(employee_id) = optional(employee_id) {
        if identities::employee_id_taken(pool, &employee_id, except).await? {
            errors.add_code("employee_id", ErrorCode::EmployeeIdExists);
        }
    }
    Ok(())
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Map a unique-constraint race on username / employee id back onto the form
pub fn duplicate_from(err: RepoError) -> FormError {
    let field = if err.is_duplicate_of("identity.username") {
        ("username", ErrorCode::UsernameExists)
    } else if err.is_duplicate_of("identity.employee_id") {
        ("employee_id", ErrorCode::EmployeeIdExists)
    } else {
        return err.into();
    };
    let mut errors = FieldErrors::new();
    errors.add_code(field.0, field.1);
    FormError::Invalid(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{identity, pool};
    use crate::forms::REQUIRED;
    use crate::util::verify_password;

    fn form(username: &str) -> EmployeeForm {
        EmployeeForm {
            username: username.into(),
            email: "jdoe@example.com".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            employee_id: " E-100 ".into(),
            department: "Ops".into(),
            phone: "555-0100".into(),
            profile_picture: String::new(),
            password: "s3cret-pass".into(),
        }
    }

    fn invalid(result: Result<impl std::fmt::Debug, FormError>) -> FieldErrors {
        match result {
            Err(FormError::Invalid(errors)) => errors,
            other => panic!("expected invalid form, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_forces_employee_role_and_hashes() {
        let pool = pool().await;
        let data = form(" jdoe ").clean_create(&pool).await.unwrap();

        assert_eq!(data.role, Role::Employee);
        assert_eq!(data.username, "jdoe");
        assert_eq!(data.employee_id.as_deref(), Some("E-100"));
        assert!(data.profile_picture.is_none());
        assert!(verify_password("s3cret-pass", &data.password_hash));
    }

    #[tokio::test]
    async fn test_profile_picture_reference() {
        let pool = pool().await;
        let existing = identity(&pool, "jdoe", Role::Employee).await;

        let mut edit = form("jdoe");
        edit.employee_id.clear();
        edit.profile_picture = " profiles/jdoe.png ".into();
        let data = edit.clone().clean_update(&pool, existing.id).await.unwrap();
        assert_eq!(data.profile_picture.as_deref(), Some("profiles/jdoe.png"));

        edit.profile_picture = "p".repeat(256);
        let errors = invalid(edit.clean_update(&pool, existing.id).await);
        assert!(errors.contains("profile_picture"));
    }

    #[tokio::test]
    async fn test_create_collects_every_error() {
        let pool = pool().await;
        let mut bad = form("j doe");
        bad.email = "nope".into();
        bad.phone = "1".repeat(16);
        bad.password.clear();

        let errors = invalid(bad.clean_create(&pool).await);
        assert!(errors.contains("username"));
        assert!(errors.contains("email"));
        assert!(errors.contains("phone"));
        assert_eq!(errors.get("password").unwrap(), [REQUIRED]);
    }

    #[tokio::test]
    async fn test_uniqueness_checks() {
        let pool = pool().await;
        let existing = identity(&pool, "jdoe", Role::Employee).await;
        let errors = invalid(form("jdoe").clean_create(&pool).await);
        assert_eq!(
            errors.get("username").unwrap(),
            [ErrorCode::UsernameExists.message()]
        );

        let data = form("other").clean_create(&pool).await.unwrap();
        identities::create(&pool, data).await.unwrap();
        let errors = invalid(form("third").clean_create(&pool).await);
        assert!(errors.contains("employee_id"));

        // editing an identity may keep its own username
        let errors = invalid(form("jdoe").clean_update(&pool, existing.id).await);
        assert!(!errors.contains("username"));
        assert!(errors.contains("employee_id"));
    }

    #[tokio::test]
    async fn test_update_blank_password_keeps_current() {
        let pool = pool().await;
        let existing = identity(&pool, "jdoe", Role::Employee).await;
        let mut edit = form("jdoe");
        edit.password.clear();

        let data = edit.clean_update(&pool, existing.id).await.unwrap();
        assert!(data.password_hash.is_none());
        assert_eq!(data.employee_id.as_deref(), Some("E-100"));
    }

    #[test]
    fn test_duplicate_from_constraint() {
        let err = RepoError::Duplicate("UNIQUE constraint failed: identity.employee_id".into());
        let errors = invalid(Err::<(), _>(duplicate_from(err)));
        assert!(errors.contains("employee_id"));

        let other = duplicate_from(RepoError::Database("disk".into()));
        assert!(matches!(other, FormError::Failed(_)));
    }

    #[test]
    fn test_values_never_echo_password() {
        let value = serde_json::to_value(form("jdoe")).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "jdoe");
    }
}
