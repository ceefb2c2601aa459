use serde::{Deserialize, Serialize};

use crate::model::csv::CsvPreview;

/// A contact list picked in the upload step, already read as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactFile {
    pub name: String,
    pub size_bytes: u64,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub text: String,
}

impl ContactFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            name: name.into(),
            size_bytes: text.len() as u64,
            text,
        }
    }

    /// Size rounded to the nearest kilobyte, as shown next to the file name.
    pub fn size_kb(&self) -> u64 {
        (self.size_bytes + 512) / 1024
    }

    pub fn preview(&self, limit: usize) -> CsvPreview {
        CsvPreview::parse_with_limit(&self.text, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_rounded_to_kilobytes() {
        let mut file = ContactFile::new("contacts.csv", "phone\n");
        assert_eq!(file.size_bytes, 6);
        assert_eq!(file.size_kb(), 0);
        file.size_bytes = 1536;
        assert_eq!(file.size_kb(), 2);
        file.size_bytes = 1535;
        assert_eq!(file.size_kb(), 1);
    }

    #[test]
    fn serialized_handle_omits_content() {
        let file = ContactFile::new("contacts.csv", "phone,name\n1,A");
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["name"], "contacts.csv");
        assert!(json.get("text").is_none());
    }
}
