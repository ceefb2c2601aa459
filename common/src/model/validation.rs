//! Advisory checks shown next to the template editor.
//!
//! Nothing here blocks an edit or a save; the approval service is the final
//! judge. The limits mirror what the messaging platform documents for
//! template components.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::model::section::{ButtonGroup, ContentSection, HeaderFormat, UrlKind};
use crate::model::template::{PLACEHOLDER_RE, Template};

pub const NAME_MAX: usize = 512;
pub const HEADER_TEXT_MAX: usize = 60;
pub const BODY_MAX: usize = 1024;
pub const FOOTER_MAX: usize = 60;
pub const BUTTON_TEXT_MAX: usize = 25;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("template name regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    HeaderText,
    Body,
    Footer,
    Button(usize),
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => write!(f, "Name"),
            Field::HeaderText => write!(f, "Header text"),
            Field::Body => write!(f, "Body"),
            Field::Footer => write!(f, "Footer"),
            Field::Button(index) => write!(f, "Button {}", index + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("Name is required")]
    MissingName,

    #[error("Name can only contain lowercase letters, numbers and underscores")]
    InvalidName,

    #[error("A body section is required")]
    MissingBody,

    #[error("{field} must not be empty")]
    Empty { field: Field },

    #[error("{field} is {len} characters long (max {max})")]
    TooLong { field: Field, len: usize, max: usize },

    #[error("Media headers need an example URL")]
    MissingMediaExample,

    #[error("Variables must be numbered consecutively from {{{{1}}}}")]
    NonSequentialVariables,

    #[error("Button {} needs a URL", .button + 1)]
    MissingUrl { button: usize },

    #[error("Button {} is dynamic and must contain exactly one {{{{1}}}}", .button + 1)]
    DynamicUrlPlaceholder { button: usize },
}

fn check_length(issues: &mut Vec<ValidationIssue>, field: Field, text: &str, max: usize) {
    let len = text.chars().count();
    if len > max {
        issues.push(ValidationIssue::TooLong { field, len, max });
    }
}

/// Collects every advisory issue of `template`, in section order.
pub fn validate(template: &Template) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if template.name.is_empty() {
        issues.push(ValidationIssue::MissingName);
    } else {
        if !NAME_RE.is_match(&template.name) {
            issues.push(ValidationIssue::InvalidName);
        }
        check_length(&mut issues, Field::Name, &template.name, NAME_MAX);
    }

    if template.body_text().is_none() {
        issues.push(ValidationIssue::MissingBody);
    }

    for section in &template.sections {
        match section {
            ContentSection::Header { format } => match format {
                HeaderFormat::None => {}
                HeaderFormat::Text { text } => {
                    check_length(&mut issues, Field::HeaderText, text, HEADER_TEXT_MAX)
                }
                HeaderFormat::Image(media)
                | HeaderFormat::Video(media)
                | HeaderFormat::Document(media) => {
                    if media.example.trim().is_empty() {
                        issues.push(ValidationIssue::MissingMediaExample);
                    }
                }
            },
            ContentSection::Body { text } => {
                if text.trim().is_empty() {
                    issues.push(ValidationIssue::Empty { field: Field::Body });
                }
                check_length(&mut issues, Field::Body, text, BODY_MAX);
                let variables = template.variables();
                let sequential = variables
                    .iter()
                    .enumerate()
                    .all(|(i, n)| *n as usize == i + 1);
                if !sequential {
                    issues.push(ValidationIssue::NonSequentialVariables);
                }
            }
            ContentSection::Footer { text } => {
                check_length(&mut issues, Field::Footer, text, FOOTER_MAX)
            }
            ContentSection::Buttons { group } => validate_buttons(&mut issues, group),
        }
    }

    issues
}

fn validate_buttons(issues: &mut Vec<ValidationIssue>, group: &ButtonGroup) {
    for (index, text) in group.texts().into_iter().enumerate() {
        if text.trim().is_empty() {
            issues.push(ValidationIssue::Empty {
                field: Field::Button(index),
            });
        }
        check_length(issues, Field::Button(index), text, BUTTON_TEXT_MAX);
    }

    if let ButtonGroup::Url(buttons) = group {
        for (index, button) in buttons.iter().enumerate() {
            if button.url.trim().is_empty() {
                issues.push(ValidationIssue::MissingUrl { button: index });
                continue;
            }
            if button.url_kind == UrlKind::Dynamic {
                let placeholders = PLACEHOLDER_RE.find_iter(&button.url).count();
                if placeholders != 1 || !button.url.contains("{{1}}") {
                    issues.push(ValidationIssue::DynamicUrlPlaceholder { button: index });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::section::{
        HeaderFormatKind, MediaHeader, SectionKind, SectionPatch, UrlButton,
    };

    fn valid_template() -> Template {
        let mut template = Template::new_draft();
        template.name = "order_update".into();
        template.update_section(0, SectionPatch::Text("Hi {{1}}, your order shipped.".into()));
        template
    }

    #[test]
    fn valid_template_has_no_issues() {
        assert!(validate(&valid_template()).is_empty());
    }

    #[test]
    fn name_charset_is_reported() {
        let mut template = valid_template();
        template.name = "Order Update".into();
        assert_eq!(validate(&template), vec![ValidationIssue::InvalidName]);
    }

    #[test]
    fn missing_body_is_reported() {
        let mut template = valid_template();
        template.remove_section(0);
        assert!(validate(&template).contains(&ValidationIssue::MissingBody));
    }

    #[test]
    fn header_text_limit_counts_chars() {
        let mut template = valid_template();
        template.add_section(SectionKind::Header);
        let index = template.position(SectionKind::Header).unwrap();
        template.update_section(index, SectionPatch::Text("é".repeat(61)));
        assert_eq!(
            validate(&template),
            vec![ValidationIssue::TooLong {
                field: Field::HeaderText,
                len: 61,
                max: HEADER_TEXT_MAX
            }]
        );
    }

    #[test]
    fn media_header_needs_example() {
        let mut template = valid_template();
        template.sections.insert(
            0,
            ContentSection::Header {
                format: HeaderFormat::empty(HeaderFormatKind::Image),
            },
        );
        assert_eq!(validate(&template), vec![ValidationIssue::MissingMediaExample]);

        template.sections[0] = ContentSection::Header {
            format: HeaderFormat::Image(MediaHeader {
                asset: None,
                example: "https://cdn.example.com/banner.png".into(),
            }),
        };
        assert!(validate(&template).is_empty());
    }

    #[test]
    fn gaps_in_variable_numbers_are_reported() {
        let mut template = valid_template();
        template.update_section(0, SectionPatch::Text("Hi {{1}} and {{3}}".into()));
        assert_eq!(validate(&template), vec![ValidationIssue::NonSequentialVariables]);
    }

    #[test]
    fn dynamic_url_needs_one_placeholder() {
        let mut template = valid_template();
        template.sections.push(ContentSection::Buttons {
            group: ButtonGroup::Url(vec![
                UrlButton {
                    text: "Track".into(),
                    url: "https://t.example.com/{{1}}".into(),
                    url_kind: UrlKind::Dynamic,
                },
                UrlButton {
                    text: "Shop".into(),
                    url: "https://shop.example.com".into(),
                    url_kind: UrlKind::Dynamic,
                },
                UrlButton {
                    text: "".into(),
                    url: "".into(),
                    url_kind: UrlKind::Static,
                },
            ]),
        });
        assert_eq!(
            validate(&template),
            vec![
                ValidationIssue::Empty {
                    field: Field::Button(2)
                },
                ValidationIssue::DynamicUrlPlaceholder { button: 1 },
                ValidationIssue::MissingUrl { button: 2 },
            ]
        );
    }

    #[test]
    fn issue_messages_render() {
        assert_eq!(
            ValidationIssue::DynamicUrlPlaceholder { button: 0 }.to_string(),
            "Button 1 is dynamic and must contain exactly one {{1}}"
        );
        assert_eq!(
            ValidationIssue::TooLong {
                field: Field::Footer,
                len: 70,
                max: 60
            }
            .to_string(),
            "Footer is 70 characters long (max 60)"
        );
    }
}
