//! Employee request forms: submit (employee) and respond (admin)

use serde::{Deserialize, Serialize};
use shared::form::Choice;
use shared::models::{EmployeeRequest, RequestCreate, RequestReply, RequestStatus, RequestType};
use shared::FieldErrors;
use validator::Validate;

use super::{FieldSpec, FormError, Widget, choice, collect, required, trim};

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("request_type", "Request type", Widget::Select).required(),
    FieldSpec::new("subject", "Subject", Widget::Text).required(),
    FieldSpec::new("description", "Description", Widget::Textarea).required(),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RequestForm {
    pub request_type: String,
    #[validate(length(max = 200, message = "Ensure this value has at most 200 characters."))]
    pub subject: String,
    pub description: String,
}

impl RequestForm {
    pub fn clean(mut self) -> Result<RequestCreate, FormError> {
        trim([&mut self.subject, &mut self.description]);
        let mut errors = collect(self.validate());
        let request_type = choice::<RequestType>(&mut errors, "request_type", &self.request_type, None);
        required(&mut errors, "subject", &self.subject);
        required(&mut errors, "description", &self.description);

        match request_type {
            Some(request_type) if errors.is_empty() => Ok(RequestCreate {
                request_type,
                subject: self.subject,
                description: self.description,
            }),
            _ => Err(FormError::Invalid(errors)),
        }
    }
}

pub const REPLY_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("status", "Status", Widget::Select).required(),
    FieldSpec::new("admin_response", "Response", Widget::Textarea),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyForm {
    pub status: String,
    pub admin_response: String,
}

impl ReplyForm {
    pub fn from_request(request: &EmployeeRequest) -> Self {
        Self {
            status: request.status.as_str().to_string(),
            admin_response: request.admin_response.clone(),
        }
    }

    pub fn clean(mut self) -> Result<RequestReply, FormError> {
        trim([&mut self.admin_response]);
        let mut errors = FieldErrors::new();
        match choice::<RequestStatus>(&mut errors, "status", &self.status, None) {
            Some(status) => Ok(RequestReply {
                status,
                admin_response: self.admin_response,
            }),
            None => Err(FormError::Invalid(errors)),
        }
    }
}
