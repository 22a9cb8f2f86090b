//! Notice form

use serde::{Deserialize, Serialize};
use shared::models::{Notice, NoticeInput};
use validator::Validate;

use super::{FieldSpec, FormError, Widget, checkbox, collect, required, trim};

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", Widget::Text).required(),
    FieldSpec::new("content", "Content", Widget::Textarea).required(),
    FieldSpec::new("is_active", "Active", Widget::Checkbox),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NoticeForm {
    #[validate(length(max = 200, message = "Ensure this value has at most 200 characters."))]
    pub title: String,
    pub content: String,
    /// Checkbox; absent when unchecked
    pub is_active: String,
}

impl NoticeForm {
    /// Blank create form; new notices start active
    pub fn initial() -> Self {
        Self {
            is_active: "on".into(),
            ..Default::default()
        }
    }

    pub fn from_notice(notice: &Notice) -> Self {
        Self {
            title: notice.title.clone(),
            content: notice.content.clone(),
            is_active: if notice.is_active { "on".into() } else { String::new() },
        }
    }

    pub fn clean(mut self) -> Result<NoticeInput, FormError> {
        trim([&mut self.title, &mut self.content]);
        let mut errors = collect(self.validate());
        required(&mut errors, "title", &self.title);
        required(&mut errors, "content", &self.content);
        errors.finish(())?;

        Ok(NoticeInput {
            is_active: checkbox(&self.is_active),
            title: self.title,
            content: self.content,
        })
    }
}
