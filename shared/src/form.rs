//! Enumerated form choices
//!
//! Every enum a form can select from (role, statuses, priority, request type)
//! implements [`Choice`], which gives the stored value, the display label and
//! the full option list rendered into selector widgets.

use serde::Serialize;

/// An enumerated value selectable from a fixed list
pub trait Choice: Copy + Sized + 'static {
    /// All options in display order
    const ALL: &'static [Self];

    /// Stored / submitted value (e.g. `IN_PROGRESS`)
    fn as_str(&self) -> &'static str;

    /// Human-readable label (e.g. `In Progress`)
    fn label(&self) -> &'static str;

    /// Parse a submitted value; only exact stored values are accepted
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    /// Option list for selector widgets
    fn options() -> Vec<ChoiceOption> {
        Self::ALL
            .iter()
            .map(|c| ChoiceOption {
                value: c.as_str().to_string(),
                label: c.label().to_string(),
            })
            .collect()
    }
}

/// One selectable option as presented to a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, RequestType, WorkStatus};

    #[test]
    fn test_parse_exact_values_only() {
        assert_eq!(WorkStatus::parse("IN_PROGRESS"), Some(WorkStatus::InProgress));
        assert_eq!(WorkStatus::parse("in_progress"), None);
        assert_eq!(WorkStatus::parse(""), None);
        assert_eq!(Priority::parse("URGENT"), Some(Priority::Urgent));
    }

    #[test]
    fn test_options_in_declared_order() {
        let options = RequestType::options();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0], ChoiceOption::new("LEAVE", "Leave Request"));
        assert_eq!(options[2], ChoiceOption::new("ADVANCE", "Salary Advance"));
    }
}
