//! Work assignment forms: create (admin) and progress update (assignee)

use serde::{Deserialize, Serialize};
use shared::error::ErrorCode;
use shared::form::Choice;
use shared::models::{Priority, Work, WorkCreate, WorkProgress, WorkStatus};
use shared::FieldErrors;
use sqlx::SqlitePool;
use validator::Validate;

use super::{FieldSpec, FormError, Widget, choice, collect, date, id, required, trim};
use crate::db::identities;

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", Widget::Text).required(),
    FieldSpec::new("description", "Description", Widget::Textarea).required(),
    FieldSpec::new("assigned_to", "Assigned to", Widget::Select).required(),
    FieldSpec::new("due_date", "Due date", Widget::Date).required(),
    FieldSpec::new("priority", "Priority", Widget::Select).required(),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WorkForm {
    #[validate(length(max = 200, message = "Ensure this value has at most 200 characters."))]
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: String,
    pub priority: String,
}

impl WorkForm {
    pub fn initial() -> Self {
        Self {
            priority: Priority::default().as_str().to_string(),
            ..Default::default()
        }
    }

    pub async fn clean(mut self, pool: &SqlitePool) -> Result<WorkCreate, FormError> {
        trim([&mut self.title, &mut self.description]);
        let mut errors = collect(self.validate());
        required(&mut errors, "title", &self.title);
        required(&mut errors, "description", &self.description);

        let assigned_to = match id(&mut errors, "assigned_to", &self.assigned_to) {
            Some(assignee) => {
                let found = identities::find_employee(pool, assignee).await?;
                if found.is_none() {
                    errors.add_code("assigned_to", ErrorCode::NotAnEmployee);
                }
                found.map(|e| e.id)
            }
            None => None,
        };
        let due_date = date(&mut errors, "due_date", &self.due_date);
        let priority = choice(&mut errors, "priority", &self.priority, Some(Priority::default()));

        match (assigned_to, due_date, priority) {
            (Some(assigned_to), Some(due_date), Some(priority)) if errors.is_empty() => {
                Ok(WorkCreate {
                    title: self.title,
                    description: self.description,
                    assigned_to,
                    due_date,
                    priority,
                })
            }
            _ => Err(FormError::Invalid(errors)),
        }
    }
}

pub const PROGRESS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("status", "Status", Widget::Select).required(),
    FieldSpec::new("remarks", "Remarks", Widget::Textarea),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkProgressForm {
    pub status: String,
    pub remarks: String,
}

impl WorkProgressForm {
    pub fn from_work(work: &Work) -> Self {
        Self {
            status: work.status.as_str().to_string(),
            remarks: work.remarks.clone(),
        }
    }

    pub fn clean(mut self) -> Result<WorkProgress, FormError> {
        trim([&mut self.remarks]);
        let mut errors = FieldErrors::new();
        match choice::<WorkStatus>(&mut errors, "status", &self.status, None) {
            Some(status) => Ok(WorkProgress {
                status,
                remarks: self.remarks,
            }),
            None => Err(FormError::Invalid(errors)),
        }
    }
}
