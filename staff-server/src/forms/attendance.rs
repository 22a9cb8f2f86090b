//! Attendance form
//!
//! One record per employee and day. A collision found while validating is
//! reported as a conflict on `date`; the storage constraint reports the same
//! way when two submissions race past validation.

use serde::{Deserialize, Serialize};
use shared::error::ErrorCode;
use shared::models::{Attendance, AttendanceInput, AttendanceStatus};
use shared::FieldErrors;
use sqlx::SqlitePool;

use super::{FieldSpec, FormError, Widget, choice, date, id, optional_time, trim};
use crate::db::{RepoError, attendance, identities};

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("employee", "Employee", Widget::Select).required(),
    FieldSpec::new("date", "Date", Widget::Date).required(),
    FieldSpec::new("check_in", "Check in", Widget::Time),
    FieldSpec::new("check_out", "Check out", Widget::Time),
    FieldSpec::new("status", "Status", Widget::Select).required(),
    FieldSpec::new("notes", "Notes", Widget::Textarea),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceForm {
    pub employee: String,
    pub date: String,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
    pub notes: String,
}

impl AttendanceForm {
    /// Blank add form with the default status selected
    pub fn initial() -> Self {
        Self {
            status: shared::Choice::as_str(&AttendanceStatus::default()).to_string(),
            ..Default::default()
        }
    }

    pub fn from_record(record: &Attendance) -> Self {
        Self {
            employee: record.employee.to_string(),
            date: record.date.to_string(),
            check_in: record.check_in.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            check_out: record.check_out.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            status: shared::Choice::as_str(&record.status).to_string(),
            notes: record.notes.clone(),
        }
    }

    /// Validate against the store; `except` is the record being edited
    pub async fn clean(
        mut self,
        pool: &SqlitePool,
        except: Option<i64>,
    ) -> Result<AttendanceInput, FormError> {
        trim([&mut self.notes]);
        let mut errors = FieldErrors::new();

        let employee = match id(&mut errors, "employee", &self.employee) {
            Some(employee) => {
                let found = identities::find_employee(pool, employee).await?;
                if found.is_none() {
                    errors.add_code("employee", ErrorCode::NotAnEmployee);
                }
                found.map(|e| e.id)
            }
            None => None,
        };
        let day = date(&mut errors, "date", &self.date);
        let check_in = optional_time(&mut errors, "check_in", &self.check_in);
        let check_out = optional_time(&mut errors, "check_out", &self.check_out);
        if let (Some(a), Some(b)) = (check_in, check_out) {
            if b < a {
                errors.add_code("check_out", ErrorCode::AttendanceTimeOrder);
            }
        }
        let status = choice::<AttendanceStatus>(&mut errors, "status", &self.status, None);

        let (Some(employee), Some(day), Some(status)) = (employee, day, status) else {
            return Err(FormError::Invalid(errors));
        };

        let taken = attendance::exists_for(pool, employee, day, except).await?;
        if taken {
            if errors.is_empty() {
                return Err(conflict());
            }
            errors.add_code("date", ErrorCode::AttendanceExists);
        }
        errors.finish(())?;

        Ok(AttendanceInput {
            employee,
            date: day,
            check_in,
            check_out,
            status,
            notes: self.notes,
        })
    }
}

fn conflict() -> FormError {
    let mut errors = FieldErrors::new();
    errors.add_code("date", ErrorCode::AttendanceExists);
    FormError::Conflict(errors)
}

/// Map the (employee, date) constraint onto the form; other errors propagate
pub fn conflict_from(err: RepoError) -> FormError {
    if err.is_duplicate_of(attendance::UNIQUE_EMPLOYEE_DATE) {
        conflict()
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{identity, pool};
    use shared::models::Role;

    fn form(employee: i64, date: &str) -> AttendanceForm {
        AttendanceForm {
            employee: employee.to_string(),
            date: date.into(),
            check_in: "09:00".into(),
            check_out: "17:00".into(),
            status: "PRESENT".into(),
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_clean_ok() {
        let pool = pool().await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;

        let data = form(emp.id, "2024-03-04").clean(&pool, None).await.unwrap();
        assert_eq!(data.employee, emp.id);
        assert_eq!(data.status, AttendanceStatus::Present);
        assert!(data.check_in < data.check_out);
    }

    #[tokio::test]
    async fn test_employee_must_hold_employee_role() {
        let pool = pool().await;
        let admin = identity(&pool, "boss", Role::Admin).await;

        match form(admin.id, "2024-03-04").clean(&pool, None).await {
            Err(FormError::Invalid(errors)) => {
                assert_eq!(
                    errors.get("employee").unwrap(),
                    [ErrorCode::NotAnEmployee.message()]
                );
            }
            other => panic!("expected invalid form, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_day_is_conflict() {
        let pool = pool().await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;
        let first = form(emp.id, "2024-03-04").clean(&pool, None).await.unwrap();
        let record = attendance::create(&pool, first).await.unwrap();

        match form(emp.id, "2024-03-04").clean(&pool, None).await {
            Err(FormError::Conflict(errors)) => assert!(errors.contains("date")),
            other => panic!("expected conflict, got {other:?}"),
        }

        // editing the record itself is not a conflict
        assert!(form(emp.id, "2024-03-04").clean(&pool, Some(record.id)).await.is_ok());

        // other failures alongside the collision keep the form invalid
        let mut bad = form(emp.id, "2024-03-04");
        bad.check_out = "08:00".into();
        match bad.clean(&pool, None).await {
            Err(FormError::Invalid(errors)) => {
                assert!(errors.contains("date"));
                assert!(errors.contains("check_out"));
            }
            other => panic!("expected invalid form, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_constraint_race_maps_to_conflict() {
        let pool = pool().await;
        let emp = identity(&pool, "jdoe", Role::Employee).await;
        let data = form(emp.id, "2024-03-04").clean(&pool, None).await.unwrap();
        attendance::create(&pool, data.clone()).await.unwrap();

        let err = attendance::create(&pool, data).await.unwrap_err();
        assert!(matches!(conflict_from(err), FormError::Conflict(_)));
        assert!(matches!(
            conflict_from(RepoError::Database("x".into())),
            FormError::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_every_field_reported() {
        let pool = pool().await;
        let form = AttendanceForm {
            employee: String::new(),
            date: "tomorrow".into(),
            check_in: "9am".into(),
            check_out: String::new(),
            status: "LATE".into(),
            notes: String::new(),
        };
        match form.clean(&pool, None).await {
            Err(FormError::Invalid(errors)) => {
                let fields: Vec<_> = errors.fields().collect();
                assert_eq!(fields, vec!["check_in", "date", "employee", "status"]);
            }
            other => panic!("expected invalid form, got {other:?}"),
        }
    }
}
