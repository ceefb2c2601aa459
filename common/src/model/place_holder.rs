use serde::{Deserialize, Serialize};

/// Kind of value a contact list column appears to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceholderType {
    Text,
    Number,
    Currency,
    Email,
    Phone,
}

impl PlaceholderType {
    pub fn label(&self) -> &'static str {
        match self {
            PlaceholderType::Text => "Text",
            PlaceholderType::Number => "Number",
            PlaceholderType::Currency => "Currency",
            PlaceholderType::Email => "Email",
            PlaceholderType::Phone => "Phone",
        }
    }
}
