//! Helpers for the template editor.
//!
//! The preview bubble shows a template body the way a recipient would see it
//! in WhatsApp. WhatsApp only knows four inline styles (`*bold*`, `_italic_`,
//! `~strike~` and ```` ```mono``` ````), so the body is rewritten into the
//! matching Markdown, parsed with `pulldown_cmark`, and every block or link
//! construct WhatsApp does not have is flattened back into plain text before
//! the HTML is produced. Headings keep their `#` marks, list items keep their
//! markers, and links or images keep only their visible text.
//!
//! The module also holds the small browser side effects the editor needs:
//! toast notifications and the `window.app_dirty` flag read by the unload
//! guard.

use std::sync::LazyLock;

use js_sys::Reflect;
use log::warn;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").expect("bold regex"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_\n]+)_").expect("italic regex"));
static STRIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~([^~\n]+)~").expect("strike regex"));
static MONO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```([^`]+)```").expect("monospace regex"));
static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\d+)\}\}").expect("variable regex"));

/// Escapes the five HTML-significant characters.
///
/// # Arguments
/// * `input` - Text typed by the user.
///
/// # Returns
/// The text, safe to place inside an element or a quoted attribute.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Rewrites WhatsApp markup (`*bold*`, `_italic_`, `~strike~`,
/// ```` ```mono``` ````) as Markdown. Raw HTML is escaped first and every
/// newline becomes a hard break.
fn whatsapp_to_markdown(text: &str) -> String {
    let text = escape_html(&text.replace("\r\n", "\n"));
    let text = BOLD_RE.replace_all(&text, "**$1**");
    let text = ITALIC_RE.replace_all(&text, "*$1*");
    let text = STRIKE_RE.replace_all(&text, "~~$1~~");
    let text = MONO_RE.replace_all(&text, "`$1`");
    text.replace('\n', "  \n")
}

/// Replaces Markdown constructs WhatsApp has no rendering for with the text
/// a recipient would actually see.
fn flatten_events<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut out = Vec::new();
    for event in events {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                out.push(Event::Start(Tag::Paragraph));
                out.push(Event::Text(CowStr::from(format!("{} ", "#".repeat(level as usize)))));
            }
            Event::End(TagEnd::Heading(_)) => out.push(Event::End(TagEnd::Paragraph)),
            Event::Start(Tag::List(start)) => lists.push(start),
            Event::End(TagEnd::List(_)) => {
                lists.pop();
            }
            Event::Start(Tag::Item) => {
                let marker = match lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "- ".to_string(),
                };
                out.push(Event::Text(CowStr::from(marker)));
            }
            Event::End(TagEnd::Item) => out.push(Event::HardBreak),
            Event::Start(Tag::Link { .. } | Tag::Image { .. })
            | Event::End(TagEnd::Link | TagEnd::Image) => {}
            Event::Html(raw) | Event::InlineHtml(raw) => out.push(Event::Text(raw)),
            other => out.push(other),
        }
    }
    out
}

/// Renders a template body for the preview bubble.
///
/// # Arguments
/// * `text` - Body text with WhatsApp markup and `{{n}}` placeholders.
///
/// # Returns
/// HTML with the inline styles applied, placeholders wrapped in
/// `<span class="variable">`, and no links, images, headings or lists.
pub fn whatsapp_to_html(text: &str) -> String {
    let markdown = whatsapp_to_markdown(text);
    let parser = Parser::new_ext(&markdown, Options::ENABLE_STRIKETHROUGH);
    let mut output = String::new();
    html::push_html(&mut output, flatten_events(parser).into_iter());
    VARIABLE_RE
        .replace_all(&output, r#"<span class="variable">{{$1}}</span>"#)
        .into_owned()
}

/// `YYYY-MM-DD` in the browser's local time.
pub fn today() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

/// Shows a message at the bottom of the page.
///
/// # Arguments
/// * `message` - Text of the toast.
/// * `duration_ms` - How long the toast stays before it is removed.
pub fn show_toast(message: &str, duration_ms: u32) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    let toast: HtmlElement = toast.unchecked_into();
    let style = toast.style();
    for (property, value) in [
        ("position", "fixed"),
        ("bottom", "20px"),
        ("left", "50%"),
        ("transform", "translateX(-50%)"),
        ("background", "rgba(0, 0, 0, 0.8)"),
        ("color", "#fff"),
        ("padding", "10px 20px"),
        ("border-radius", "4px"),
        ("z-index", "10000"),
    ] {
        style.set_property(property, value).ok();
    }

    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(duration_ms).await;
            toast.remove();
        });
    }
}

/// Publishes `window.app_dirty`, read by the `beforeunload` guard installed
/// in `main.rs` to warn about unsaved edits.
///
/// # Arguments
/// * `dirty` - Whether the current template differs from its saved
///   fingerprint.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        ) {
            warn!("could not publish dirty flag: {err:?}");
        }
    }
}
