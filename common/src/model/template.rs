use std::collections::BTreeSet;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::section::{
    ButtonType, ContentSection, HeaderFormatKind, SectionKind, SectionPatch,
};

/// Matches numbered body placeholders such as `{{1}}`.
pub(crate) static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\d+)\}\}").expect("placeholder regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateCategory {
    #[default]
    Marketing,
    Utility,
    Authentication,
}

impl TemplateCategory {
    pub fn all() -> [TemplateCategory; 3] {
        [
            TemplateCategory::Marketing,
            TemplateCategory::Utility,
            TemplateCategory::Authentication,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateCategory::Marketing => "Marketing",
            TemplateCategory::Utility => "Utility",
            TemplateCategory::Authentication => "Authentication",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TemplateCategory::Marketing => "MARKETING",
            TemplateCategory::Utility => "UTILITY",
            TemplateCategory::Authentication => "AUTHENTICATION",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.code() == code)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStatus {
    #[default]
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl TemplateStatus {
    pub fn all() -> [TemplateStatus; 4] {
        [
            TemplateStatus::Draft,
            TemplateStatus::Pending,
            TemplateStatus::Approved,
            TemplateStatus::Rejected,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateStatus::Draft => "Draft",
            TemplateStatus::Pending => "Pending",
            TemplateStatus::Approved => "Approved",
            TemplateStatus::Rejected => "Rejected",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TemplateStatus::Draft => "draft",
            TemplateStatus::Pending => "pending",
            TemplateStatus::Approved => "approved",
            TemplateStatus::Rejected => "rejected",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}

/// Locales a template can be registered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[default]
    #[serde(rename = "en_US")]
    EnglishUs,
    #[serde(rename = "en_GB")]
    EnglishUk,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "es_MX")]
    SpanishMexico,
    #[serde(rename = "pt_BR")]
    PortugueseBrazil,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "id")]
    Indonesian,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    pub fn all() -> [Language; 12] {
        [
            Language::English,
            Language::EnglishUs,
            Language::EnglishUk,
            Language::Spanish,
            Language::SpanishMexico,
            Language::PortugueseBrazil,
            Language::French,
            Language::German,
            Language::Italian,
            Language::Indonesian,
            Language::Hindi,
            Language::Arabic,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::EnglishUs => "en_US",
            Language::EnglishUk => "en_GB",
            Language::Spanish => "es",
            Language::SpanishMexico => "es_MX",
            Language::PortugueseBrazil => "pt_BR",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Indonesian => "id",
            Language::Hindi => "hi",
            Language::Arabic => "ar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::EnglishUs => "English (US)",
            Language::EnglishUk => "English (UK)",
            Language::Spanish => "Spanish",
            Language::SpanishMexico => "Spanish (MEX)",
            Language::PortugueseBrazil => "Portuguese (BR)",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Indonesian => "Indonesian",
            Language::Hindi => "Hindi",
            Language::Arabic => "Arabic",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|l| l.code() == code)
    }
}

/// A message template draft and its ordered content sections.
///
/// All editing operations are total: an edit that would break a structural
/// rule (a second header, a fourth button, a URL on a quick reply) is dropped
/// and reported through the `bool` return value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: TemplateCategory,
    pub language: Language,
    pub status: TemplateStatus,
    /// `YYYY-MM-DD`, informational only.
    #[serde(default)]
    pub created_at: String,
    pub sections: Vec<ContentSection>,
}

impl Template {
    /// A fresh draft with a new id and a single empty body section.
    pub fn new_draft() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            category: TemplateCategory::default(),
            language: Language::default(),
            status: TemplateStatus::Draft,
            created_at: String::new(),
            sections: vec![ContentSection::with_defaults(SectionKind::Body)],
        }
    }

    pub fn position(&self, kind: SectionKind) -> Option<usize> {
        self.sections.iter().position(|s| s.kind() == kind)
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.position(kind).is_some()
    }

    pub fn section_count(&self, kind: SectionKind) -> usize {
        self.sections.iter().filter(|s| s.kind() == kind).count()
    }

    /// Appends a default section of `kind`. Every kind is a singleton.
    pub fn add_section(&mut self, kind: SectionKind) -> bool {
        if self.has_section(kind) {
            debug!("template {}: {} section already present", self.id, kind.label());
            return false;
        }
        self.sections.push(ContentSection::with_defaults(kind));
        true
    }

    pub fn update_section(&mut self, index: usize, patch: SectionPatch) -> bool {
        let applied = match self.sections.get_mut(index) {
            Some(section) => section.apply(patch),
            None => false,
        };
        if !applied {
            debug!("template {}: patch for section {} ignored", self.id, index);
        }
        applied
    }

    /// Removes the section at `index`. Keeping at least a body around is the
    /// caller's business.
    pub fn remove_section(&mut self, index: usize) -> Option<ContentSection> {
        (index < self.sections.len()).then(|| self.sections.remove(index))
    }

    pub fn add_button(&mut self, section_index: usize) -> bool {
        match self.sections.get_mut(section_index) {
            Some(ContentSection::Buttons { group }) => {
                let added = group.push_empty();
                if !added {
                    debug!("template {}: button limit reached", self.id);
                }
                added
            }
            _ => false,
        }
    }

    pub fn remove_button(&mut self, section_index: usize, button_index: usize) -> bool {
        match self.sections.get_mut(section_index) {
            Some(ContentSection::Buttons { group }) => group.remove(button_index),
            _ => false,
        }
    }

    pub fn change_button_type(&mut self, section_index: usize, to: ButtonType) -> bool {
        match self.sections.get_mut(section_index) {
            Some(ContentSection::Buttons { group }) => {
                group.convert(to);
                true
            }
            _ => false,
        }
    }

    pub fn change_header_format(&mut self, section_index: usize, kind: HeaderFormatKind) -> bool {
        match self.sections.get_mut(section_index) {
            Some(ContentSection::Header { format }) => format.switch_to(kind),
            _ => false,
        }
    }

    /// Optimistic local transition; the approval service owns the rest of the
    /// lifecycle.
    pub fn submit_for_approval(&mut self) {
        self.status = TemplateStatus::Pending;
    }

    pub fn body_text(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            ContentSection::Body { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Distinct `{{n}}` numbers used in the body, ascending.
    pub fn variables(&self) -> Vec<u32> {
        let Some(body) = self.body_text() else {
            return Vec::new();
        };
        PLACEHOLDER_RE
            .captures_iter(body)
            .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()))
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect()
    }

    pub fn variable_count(&self) -> usize {
        self.variables().len()
    }

    /// Number for the next `{{n}}` inserted into the body, one past the
    /// highest in use. `None` once the highest is `u32::MAX`.
    pub fn next_variable(&self) -> Option<u32> {
        match self.variables().last() {
            Some(last) => last.checked_add(1),
            None => Some(1),
        }
    }

    /// MD5 of the serialized template, used to detect unsaved edits.
    pub fn fingerprint(&self) -> String {
        let serialized = serde_json::to_string(self).unwrap_or_default();
        format!("{:x}", md5::compute(serialized))
    }
}

/// Criteria of the template list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateFilter {
    /// Case-insensitive substring of the template name.
    pub search: String,
    /// `None` means "all statuses".
    pub status: Option<TemplateStatus>,
    /// `None` means "all categories".
    pub category: Option<TemplateCategory>,
}

impl TemplateFilter {
    /// Filter used by the campaign wizard's template picker.
    pub fn approved() -> Self {
        Self {
            status: Some(TemplateStatus::Approved),
            ..Self::default()
        }
    }

    pub fn matches(&self, template: &Template) -> bool {
        let matches_search = template
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        let matches_status = self.status.is_none_or(|s| s == template.status);
        let matches_category = self.category.is_none_or(|c| c == template.category);
        matches_search && matches_status && matches_category
    }

    pub fn apply<'a>(&self, templates: &'a [Template]) -> Vec<&'a Template> {
        templates.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::section::{ButtonGroup, HeaderFormat, UrlButton, UrlKind};

    fn buttons_of(template: &Template) -> &ButtonGroup {
        template
            .sections
            .iter()
            .find_map(|s| match s {
                ContentSection::Buttons { group } => Some(group),
                _ => None,
            })
            .expect("buttons section")
    }

    // ========================================================================
    // Section cardinality
    // ========================================================================

    #[test]
    fn new_draft_has_single_body() {
        let template = Template::new_draft();
        assert_eq!(template.status, TemplateStatus::Draft);
        assert_eq!(template.sections.len(), 1);
        assert_eq!(template.section_count(SectionKind::Body), 1);
        assert!(!template.id.is_empty());
    }

    #[test]
    fn every_kind_is_a_singleton() {
        let mut template = Template::new_draft();
        for kind in SectionKind::all() {
            template.add_section(kind);
            assert!(!template.add_section(kind));
            assert_eq!(template.section_count(kind), 1, "{:?}", kind);
        }
        assert_eq!(template.sections.len(), 4);
    }

    #[test]
    fn buttons_never_exceed_three() {
        let mut template = Template::new_draft();
        template.add_section(SectionKind::Buttons);
        let index = template.position(SectionKind::Buttons).unwrap();
        for _ in 0..4 {
            template.add_button(index);
        }
        assert_eq!(buttons_of(&template).len(), 3);
        assert!(!template.add_button(index));
    }

    #[test]
    fn add_button_on_non_button_section_is_ignored() {
        let mut template = Template::new_draft();
        assert!(!template.add_button(0));
        assert!(!template.add_button(42));
    }

    #[test]
    fn remove_section_is_unconditional() {
        let mut template = Template::new_draft();
        let removed = template.remove_section(0);
        assert!(matches!(removed, Some(ContentSection::Body { .. })));
        assert!(template.sections.is_empty());
        assert_eq!(template.remove_section(0), None);
    }

    // ========================================================================
    // Button type switching
    // ========================================================================

    #[test]
    fn url_to_quick_reply_and_back_resets_url() {
        let mut template = Template::new_draft();
        template.sections.push(ContentSection::Buttons {
            group: ButtonGroup::Url(vec![UrlButton {
                text: "Visit".into(),
                url: "https://shop.example.com".into(),
                url_kind: UrlKind::Static,
            }]),
        });
        let index = template.position(SectionKind::Buttons).unwrap();

        assert!(template.change_button_type(index, ButtonType::QuickReply));
        assert!(template.change_button_type(index, ButtonType::Url));

        match buttons_of(&template) {
            ButtonGroup::Url(buttons) => {
                assert_eq!(buttons.len(), 1);
                assert_eq!(buttons[0].text, "Visit");
                assert_eq!(buttons[0].url, "");
            }
            other => panic!("expected url group, got {:?}", other),
        }
    }

    // ========================================================================
    // Header format switching
    // ========================================================================

    #[test]
    fn header_format_change_clears_payload() {
        let mut template = Template::new_draft();
        template.add_section(SectionKind::Header);
        let index = template.position(SectionKind::Header).unwrap();
        assert!(template.update_section(index, SectionPatch::Text("Big sale".into())));

        assert!(template.change_header_format(index, HeaderFormatKind::Image));
        assert!(template.update_section(
            index,
            SectionPatch::HeaderExample("https://cdn.example.com/a.png".into())
        ));
        assert!(template.change_header_format(index, HeaderFormatKind::Document));

        match &template.sections[index] {
            ContentSection::Header { format } => {
                assert_eq!(format, &HeaderFormat::empty(HeaderFormatKind::Document));
            }
            other => panic!("expected header, got {:?}", other),
        }

        assert!(template.change_header_format(index, HeaderFormatKind::Text));
        match &template.sections[index] {
            ContentSection::Header { format } => assert_eq!(format.text(), Some("")),
            other => panic!("expected header, got {:?}", other),
        }
    }

    #[test]
    fn header_format_change_on_body_is_ignored() {
        let mut template = Template::new_draft();
        assert!(!template.change_header_format(0, HeaderFormatKind::Image));
    }

    // ========================================================================
    // Variables, status, fingerprint
    // ========================================================================

    #[test]
    fn variables_are_distinct_and_sorted() {
        let mut template = Template::new_draft();
        template.update_section(
            0,
            SectionPatch::Text("Hi {{2}}, order {{1}} ships to {{2}}".into()),
        );
        assert_eq!(template.variables(), vec![1, 2]);
        assert_eq!(template.variable_count(), 2);
    }

    #[test]
    fn next_variable_follows_the_highest() {
        let mut template = Template::new_draft();
        assert_eq!(template.next_variable(), Some(1));

        template.update_section(0, SectionPatch::Text("Hi {{1}} and {{3}}".into()));
        assert_eq!(template.next_variable(), Some(4));
    }

    #[test]
    fn next_variable_stops_at_u32_max() {
        let mut template = Template::new_draft();
        template.update_section(0, SectionPatch::Text("Code {{4294967295}}".into()));
        assert_eq!(template.next_variable(), None);

        template.update_section(0, SectionPatch::Text("Code {{4294967294}}".into()));
        assert_eq!(template.next_variable(), Some(u32::MAX));
    }

    #[test]
    fn submit_flips_to_pending() {
        let mut template = Template::new_draft();
        template.submit_for_approval();
        assert_eq!(template.status, TemplateStatus::Pending);
    }

    #[test]
    fn fingerprint_tracks_edits() {
        let mut template = Template::new_draft();
        let before = template.fingerprint();
        assert_eq!(before, template.fingerprint());
        template.update_section(0, SectionPatch::Text("Hello".into()));
        assert_ne!(before, template.fingerprint());
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    fn named(name: &str, status: TemplateStatus, category: TemplateCategory) -> Template {
        Template {
            name: name.into(),
            status,
            category,
            ..Template::new_draft()
        }
    }

    #[test]
    fn filter_combines_search_status_and_category() {
        let templates = vec![
            named("Welcome Message", TemplateStatus::Approved, TemplateCategory::Marketing),
            named("Order Confirmation", TemplateStatus::Approved, TemplateCategory::Utility),
            named("Shipping Update", TemplateStatus::Pending, TemplateCategory::Utility),
        ];

        let filter = TemplateFilter {
            search: "ORDER".into(),
            ..TemplateFilter::default()
        };
        assert_eq!(filter.apply(&templates).len(), 1);

        let filter = TemplateFilter {
            category: Some(TemplateCategory::Utility),
            ..TemplateFilter::default()
        };
        assert_eq!(filter.apply(&templates).len(), 2);

        let names: Vec<&str> = TemplateFilter::approved()
            .apply(&templates)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Welcome Message", "Order Confirmation"]);
    }

    #[test]
    fn codes_round_trip() {
        for language in Language::all() {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(TemplateCategory::from_code("UTILITY"), Some(TemplateCategory::Utility));
        assert_eq!(TemplateStatus::from_code("all"), None);
    }
}
