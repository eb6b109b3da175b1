use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use super::content::{flatten_text, heading_text, normalize};

static PREAMBLE_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".section > h1").unwrap());
static ANY_H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static SECTION_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".section > h2").unwrap());

/// One indexable slice of a page. `id` is empty when the container carries
/// no anchor attribute.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// Extract the ordered section list from a page body: the preamble under the
/// top-level heading, if it has any content, then one section per top-level
/// `h2`. Never fails; markup that matches nothing yields an empty list.
pub fn extract_sections(body: &str) -> Vec<Section> {
    let doc = Html::parse_fragment(body);
    let mut sections = Vec::new();

    if let Some(preamble) = preamble_section(&doc) {
        sections.push(preamble);
    }

    for heading in doc.select(&SECTION_HEADING) {
        // The child combinator guarantees a parent container element.
        let Some(container) = parent_element(heading) else {
            continue;
        };
        sections.push(Section {
            id: container_id(container),
            title: heading_text(heading),
            content: normalize(&flatten_text(container)),
        });
    }

    sections
}

/// Content between the page's `h1` and the first nested sectioning container,
/// captured under the heading's own title and anchor. Only the first `h1`
/// match is used; pages with several top-level headings are unsupported.
fn preamble_section(doc: &Html) -> Option<Section> {
    let heading = doc.select(&PREAMBLE_HEADING).next()?;
    let container = parent_element(heading)?;

    let mut content = String::new();
    if let Some(anchor) = doc.select(&ANY_H1).next() {
        for node in anchor.next_siblings() {
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };
            if is_section_container(el) {
                break;
            }
            content.push_str(&normalize(&flatten_text(el)));
        }
    }

    if content.is_empty() {
        return None;
    }
    Some(Section {
        id: container_id(container),
        title: heading_text(heading),
        content,
    })
}

/// Sectioning containers are divs carrying `section` in their class list,
/// possibly among other classes.
pub fn is_section_container(el: ElementRef) -> bool {
    el.value().name() == "div" && el.value().classes().any(|c| c == "section")
}

fn parent_element(el: ElementRef) -> Option<ElementRef> {
    el.parent().and_then(ElementRef::wrap)
}

fn container_id(el: ElementRef) -> String {
    el.value().attr("id").unwrap_or_default().to_string()
}

// ── Tests ──
