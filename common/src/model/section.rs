//! Structural sections of a message template.
//!
//! A template is an ordered list of [`ContentSection`]s. Each kind carries only
//! the payload that makes sense for it, so a header can never hold buttons and
//! a quick reply can never hold a URL. Format-dependent payloads are nested
//! tagged unions ([`HeaderFormat`], [`ButtonGroup`]).

use serde::{Deserialize, Serialize};

/// Hard cap imposed by the messaging platform on buttons per template.
pub const MAX_BUTTONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Body,
    Footer,
    Buttons,
}

impl SectionKind {
    pub fn all() -> [SectionKind; 4] {
        [
            SectionKind::Header,
            SectionKind::Body,
            SectionKind::Footer,
            SectionKind::Buttons,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Header => "Header",
            SectionKind::Body => "Body",
            SectionKind::Footer => "Footer",
            SectionKind::Buttons => "Buttons",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSection {
    Header { format: HeaderFormat },
    Body { text: String },
    Footer { text: String },
    Buttons { group: ButtonGroup },
}

impl ContentSection {
    /// Builds a freshly added section of `kind`.
    ///
    /// Headers start as empty text, buttons start as a quick reply group with
    /// a single empty button.
    pub fn with_defaults(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Header => ContentSection::Header {
                format: HeaderFormat::Text {
                    text: String::new(),
                },
            },
            SectionKind::Body => ContentSection::Body {
                text: String::new(),
            },
            SectionKind::Footer => ContentSection::Footer {
                text: String::new(),
            },
            SectionKind::Buttons => ContentSection::Buttons {
                group: ButtonGroup::QuickReply(vec![QuickReplyButton::default()]),
            },
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            ContentSection::Header { .. } => SectionKind::Header,
            ContentSection::Body { .. } => SectionKind::Body,
            ContentSection::Footer { .. } => SectionKind::Footer,
            ContentSection::Buttons { .. } => SectionKind::Buttons,
        }
    }

    /// Shallow-merges `patch` into this section.
    ///
    /// Returns `false` and leaves the section untouched when the patch does not
    /// fit the section's variant (e.g. a button patch on a footer).
    pub fn apply(&mut self, patch: SectionPatch) -> bool {
        match (self, patch) {
            (ContentSection::Header { format }, SectionPatch::Text(new_text)) => match format {
                HeaderFormat::Text { text } => {
                    *text = new_text;
                    true
                }
                _ => false,
            },
            (ContentSection::Body { text }, SectionPatch::Text(new_text))
            | (ContentSection::Footer { text }, SectionPatch::Text(new_text)) => {
                *text = new_text;
                true
            }
            (ContentSection::Header { format }, SectionPatch::HeaderExample(example)) => {
                match format.media_mut() {
                    Some(media) => {
                        media.example = example;
                        true
                    }
                    None => false,
                }
            }
            (ContentSection::Header { format }, SectionPatch::HeaderAsset(asset)) => {
                match format.media_mut() {
                    Some(media) => {
                        media.asset = asset;
                        true
                    }
                    None => false,
                }
            }
            (ContentSection::Buttons { group }, SectionPatch::ButtonText { index, text }) => {
                group.set_text(index, text)
            }
            (ContentSection::Buttons { group }, SectionPatch::ButtonUrl { index, url }) => {
                group.set_url(index, url)
            }
            (ContentSection::Buttons { group }, SectionPatch::ButtonUrlKind { index, kind }) => {
                group.set_url_kind(index, kind)
            }
            _ => false,
        }
    }
}

/// Field-level edit sent by a section editor.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionPatch {
    /// Text of a text header, body or footer.
    Text(String),
    HeaderExample(String),
    HeaderAsset(Option<AssetRef>),
    ButtonText { index: usize, text: String },
    ButtonUrl { index: usize, url: String },
    ButtonUrlKind { index: usize, kind: UrlKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderFormatKind {
    None,
    Text,
    Image,
    Video,
    Document,
}

impl HeaderFormatKind {
    pub fn all() -> [HeaderFormatKind; 5] {
        [
            HeaderFormatKind::None,
            HeaderFormatKind::Text,
            HeaderFormatKind::Image,
            HeaderFormatKind::Video,
            HeaderFormatKind::Document,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeaderFormatKind::None => "None",
            HeaderFormatKind::Text => "Text",
            HeaderFormatKind::Image => "Image",
            HeaderFormatKind::Video => "Video",
            HeaderFormatKind::Document => "Document",
        }
    }

    /// Value used for `<option>` elements and parsing them back.
    pub fn code(&self) -> &'static str {
        match self {
            HeaderFormatKind::None => "none",
            HeaderFormatKind::Text => "text",
            HeaderFormatKind::Image => "image",
            HeaderFormatKind::Video => "video",
            HeaderFormatKind::Document => "document",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.code() == code)
    }

    /// MIME filter for the asset picker.
    pub fn accept(&self) -> Option<&'static str> {
        match self {
            HeaderFormatKind::Image => Some("image/jpeg,image/png"),
            HeaderFormatKind::Video => Some("video/mp4"),
            HeaderFormatKind::Document => Some("application/pdf"),
            HeaderFormatKind::None | HeaderFormatKind::Text => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum HeaderFormat {
    None,
    Text { text: String },
    Image(MediaHeader),
    Video(MediaHeader),
    Document(MediaHeader),
}

impl HeaderFormat {
    pub fn empty(kind: HeaderFormatKind) -> Self {
        match kind {
            HeaderFormatKind::None => HeaderFormat::None,
            HeaderFormatKind::Text => HeaderFormat::Text {
                text: String::new(),
            },
            HeaderFormatKind::Image => HeaderFormat::Image(MediaHeader::default()),
            HeaderFormatKind::Video => HeaderFormat::Video(MediaHeader::default()),
            HeaderFormatKind::Document => HeaderFormat::Document(MediaHeader::default()),
        }
    }

    pub fn kind(&self) -> HeaderFormatKind {
        match self {
            HeaderFormat::None => HeaderFormatKind::None,
            HeaderFormat::Text { .. } => HeaderFormatKind::Text,
            HeaderFormat::Image(_) => HeaderFormatKind::Image,
            HeaderFormat::Video(_) => HeaderFormatKind::Video,
            HeaderFormat::Document(_) => HeaderFormatKind::Document,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            HeaderFormat::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn media(&self) -> Option<&MediaHeader> {
        match self {
            HeaderFormat::Image(media) | HeaderFormat::Video(media) | HeaderFormat::Document(media) => {
                Some(media)
            }
            HeaderFormat::None | HeaderFormat::Text { .. } => None,
        }
    }

    pub fn media_mut(&mut self) -> Option<&mut MediaHeader> {
        match self {
            HeaderFormat::Image(media) | HeaderFormat::Video(media) | HeaderFormat::Document(media) => {
                Some(media)
            }
            HeaderFormat::None | HeaderFormat::Text { .. } => None,
        }
    }

    /// Switches to `kind`, discarding the old payload: leaving `Text` drops the
    /// text, entering a media format starts without an asset or example.
    /// Selecting the current format keeps everything and returns `false`.
    pub fn switch_to(&mut self, kind: HeaderFormatKind) -> bool {
        if self.kind() == kind {
            return false;
        }
        *self = HeaderFormat::empty(kind);
        true
    }
}

/// Payload of image, video and document headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaHeader {
    pub asset: Option<AssetRef>,
    /// Sample media URL the approval process asks for on media headers.
    pub example: String,
}

/// An uploaded header asset kept inline as base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
    pub id: String,
    pub file_name: String,
    pub mime_type: String,
    pub data_base64: String,
}

impl AssetRef {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonType {
    QuickReply,
    Url,
}

impl ButtonType {
    pub fn label(&self) -> &'static str {
        match self {
            ButtonType::QuickReply => "Quick reply",
            ButtonType::Url => "Visit website",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ButtonType::QuickReply => "quick_reply",
            ButtonType::Url => "url",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "quick_reply" => Some(ButtonType::QuickReply),
            "url" => Some(ButtonType::Url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlKind {
    #[default]
    Static,
    /// The URL ends with a single `{{1}}` filled in per recipient.
    Dynamic,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickReplyButton {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlButton {
    pub text: String,
    pub url: String,
    pub url_kind: UrlKind,
}

/// Buttons of a template. Every button in a group shares the group's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "buttons", rename_all = "snake_case")]
pub enum ButtonGroup {
    QuickReply(Vec<QuickReplyButton>),
    Url(Vec<UrlButton>),
}

impl ButtonGroup {
    pub fn button_type(&self) -> ButtonType {
        match self {
            ButtonGroup::QuickReply(_) => ButtonType::QuickReply,
            ButtonGroup::Url(_) => ButtonType::Url,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ButtonGroup::QuickReply(buttons) => buttons.len(),
            ButtonGroup::Url(buttons) => buttons.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= MAX_BUTTONS
    }

    pub fn texts(&self) -> Vec<&str> {
        match self {
            ButtonGroup::QuickReply(buttons) => buttons.iter().map(|b| b.text.as_str()).collect(),
            ButtonGroup::Url(buttons) => buttons.iter().map(|b| b.text.as_str()).collect(),
        }
    }

    /// Appends an empty button unless the group is already full.
    pub fn push_empty(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        match self {
            ButtonGroup::QuickReply(buttons) => buttons.push(QuickReplyButton::default()),
            ButtonGroup::Url(buttons) => buttons.push(UrlButton::default()),
        }
        true
    }

    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        match self {
            ButtonGroup::QuickReply(buttons) => {
                buttons.remove(index);
            }
            ButtonGroup::Url(buttons) => {
                buttons.remove(index);
            }
        }
        true
    }

    /// Rebuilds the group as `to`, keeping each button's text. URL buttons
    /// always come out with an empty static URL.
    pub fn convert(&mut self, to: ButtonType) {
        let texts: Vec<String> = match self {
            ButtonGroup::QuickReply(buttons) => buttons.drain(..).map(|b| b.text).collect(),
            ButtonGroup::Url(buttons) => buttons.drain(..).map(|b| b.text).collect(),
        };
        *self = match to {
            ButtonType::QuickReply => ButtonGroup::QuickReply(
                texts
                    .into_iter()
                    .map(|text| QuickReplyButton { text })
                    .collect(),
            ),
            ButtonType::Url => ButtonGroup::Url(
                texts
                    .into_iter()
                    .map(|text| UrlButton {
                        text,
                        ..UrlButton::default()
                    })
                    .collect(),
            ),
        };
    }

    pub fn set_text(&mut self, index: usize, text: String) -> bool {
        let slot = match self {
            ButtonGroup::QuickReply(buttons) => buttons.get_mut(index).map(|b| &mut b.text),
            ButtonGroup::Url(buttons) => buttons.get_mut(index).map(|b| &mut b.text),
        };
        match slot {
            Some(slot) => {
                *slot = text;
                true
            }
            None => false,
        }
    }

    pub fn set_url(&mut self, index: usize, url: String) -> bool {
        match self {
            ButtonGroup::Url(buttons) => match buttons.get_mut(index) {
                Some(button) => {
                    button.url = url;
                    true
                }
                None => false,
            },
            ButtonGroup::QuickReply(_) => false,
        }
    }

    pub fn set_url_kind(&mut self, index: usize, kind: UrlKind) -> bool {
        match self {
            ButtonGroup::Url(buttons) => match buttons.get_mut(index) {
                Some(button) => {
                    button.url_kind = kind;
                    true
                }
                None => false,
            },
            ButtonGroup::QuickReply(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_group(texts: &[&str]) -> ButtonGroup {
        ButtonGroup::Url(
            texts
                .iter()
                .map(|t| UrlButton {
                    text: t.to_string(),
                    url: "https://example.com".into(),
                    url_kind: UrlKind::Dynamic,
                })
                .collect(),
        )
    }

    #[test]
    fn defaults_per_kind() {
        assert_eq!(
            ContentSection::with_defaults(SectionKind::Header),
            ContentSection::Header {
                format: HeaderFormat::Text { text: String::new() }
            }
        );
        match ContentSection::with_defaults(SectionKind::Buttons) {
            ContentSection::Buttons { group } => {
                assert_eq!(group.button_type(), ButtonType::QuickReply);
                assert_eq!(group.len(), 1);
            }
            other => panic!("unexpected section {:?}", other),
        }
    }

    #[test]
    fn push_empty_stops_at_three() {
        let mut group = ButtonGroup::QuickReply(vec![]);
        for _ in 0..5 {
            group.push_empty();
        }
        assert_eq!(group.len(), MAX_BUTTONS);
        assert!(!group.push_empty());
    }

    #[test]
    fn convert_to_quick_reply_keeps_text() {
        let mut group = url_group(&["Shop", "Track"]);
        group.convert(ButtonType::QuickReply);
        assert_eq!(
            group,
            ButtonGroup::QuickReply(vec![
                QuickReplyButton { text: "Shop".into() },
                QuickReplyButton { text: "Track".into() },
            ])
        );
    }

    #[test]
    fn convert_to_url_resets_url_even_from_url() {
        let mut group = url_group(&["Shop"]);
        group.convert(ButtonType::Url);
        assert_eq!(
            group,
            ButtonGroup::Url(vec![UrlButton {
                text: "Shop".into(),
                url: String::new(),
                url_kind: UrlKind::Static,
            }])
        );
    }

    #[test]
    fn url_patch_does_not_fit_quick_reply() {
        let mut section = ContentSection::with_defaults(SectionKind::Buttons);
        let before = section.clone();
        assert!(!section.apply(SectionPatch::ButtonUrl {
            index: 0,
            url: "https://example.com".into()
        }));
        assert_eq!(section, before);
    }

    #[test]
    fn text_patch_on_media_header_is_ignored() {
        let mut section = ContentSection::Header {
            format: HeaderFormat::empty(HeaderFormatKind::Image),
        };
        assert!(!section.apply(SectionPatch::Text("hello".into())));
        assert!(section.apply(SectionPatch::HeaderExample("https://cdn/x.png".into())));
        match section {
            ContentSection::Header { format } => {
                assert_eq!(format.media().map(|m| m.example.as_str()), Some("https://cdn/x.png"))
            }
            other => panic!("unexpected section {:?}", other),
        }
    }

    #[test]
    fn switching_header_format() {
        let mut format = HeaderFormat::Text { text: "Hi".into() };
        assert!(!format.switch_to(HeaderFormatKind::Text));
        assert_eq!(format.text(), Some("Hi"));

        assert!(format.switch_to(HeaderFormatKind::Video));
        assert_eq!(format, HeaderFormat::Video(MediaHeader::default()));

        if let Some(media) = format.media_mut() {
            media.example = "https://cdn/v.mp4".into();
        }
        assert!(format.switch_to(HeaderFormatKind::Image));
        assert_eq!(format, HeaderFormat::Image(MediaHeader::default()));

        assert!(format.switch_to(HeaderFormatKind::None));
        assert_eq!(format, HeaderFormat::None);
    }

    #[test]
    fn section_serializes_with_kind_tag() {
        let section = ContentSection::Buttons {
            group: ButtonGroup::QuickReply(vec![QuickReplyButton { text: "Yes".into() }]),
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["type"], "buttons");
        assert_eq!(json["group"]["type"], "quick_reply");
        let back: ContentSection = serde_json::from_value(json).unwrap();
        assert_eq!(back, section);
    }
}
