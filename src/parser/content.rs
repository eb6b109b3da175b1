use scraper::{ElementRef, Html, Node};

/// Permalink glyph the doc toolchain appends to headings and titles.
const ANCHOR_GLYPH: char = '¶';

/// Tags that do not break the current line while flattening.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "dfn", "em", "i", "kbd", "mark", "q", "s",
    "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
];

const SKIP_TAGS: &[&str] = &["script", "style"];

/// Flatten an element's subtree to rendered text: one line per block element,
/// whitespace runs squashed to single spaces, no blank lines.
pub fn flatten_text(el: ElementRef) -> String {
    let mut out = String::new();
    collect(el, &mut out);
    while out.ends_with(' ') || out.ends_with('\n') {
        out.pop();
    }
    out
}

fn collect(el: ElementRef, out: &mut String) {
    let name = el.value().name();
    if SKIP_TAGS.contains(&name) {
        return;
    }
    if name == "br" {
        break_line(out);
        return;
    }

    let block = !INLINE_TAGS.contains(&name);
    if block {
        break_line(out);
    }
    for child in el.children() {
        match child.value() {
            Node::Text(t) => push_squashed(out, t),
            _ => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect(child_el, out);
                }
            }
        }
    }
    if block {
        break_line(out);
    }
}

fn push_squashed(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') && !out.ends_with('\n') {
                out.push(' ');
            }
        } else {
            out.push(ch);
        }
    }
}

fn break_line(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Strip anchor glyphs, drop the leading line when it echoes the section
/// title, and join the remaining lines into one ". "-delimited sentence line.
///
/// Not idempotent for arbitrary input (a second pass would drop another
/// leading line from multi-line text), but output carries no newlines, so
/// re-applying it to its own output is in practice a no-op.
pub fn normalize(raw: &str) -> String {
    let cleaned = raw.replace(ANCHOR_GLYPH, "");
    let cleaned = cleaned.trim();

    let mut lines: Vec<&str> = cleaned.split('\n').collect();
    if lines.len() > 1 {
        lines.remove(0);
    }

    lines
        .iter()
        .map(|line| line.trim().trim_end_matches('.'))
        .collect::<Vec<_>>()
        .join(". ")
}

/// Visible heading text with the anchor glyph removed.
pub fn heading_text(el: ElementRef) -> String {
    let flat = flatten_text(el).replace(ANCHOR_GLYPH, "");
    flat.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title fields sometimes carry markup; parse and flatten them like headings.
pub fn fragment_title(markup: &str) -> String {
    let doc = Html::parse_fragment(markup);
    heading_text(doc.root_element())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(html: &str) -> String {
        let doc = Html::parse_fragment(html);
        flatten_text(doc.root_element())
    }

    #[test]
    fn strips_glyph_and_joins_lines() {
        assert_eq!(
            normalize("Usage¶\nInstall it.\nRun it."),
            "Install it. Run it"
        );
    }

    #[test]
    fn single_line_kept_without_dropping() {
        assert_eq!(normalize("Usage text."), "Usage text");
    }

    #[test]
    fn all_trailing_periods_stripped() {
        assert_eq!(normalize("wait.."), "wait");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn idempotent_on_own_output() {
        let inputs = [
            "Usage¶\nInstall it.\nRun it.",
            "One line.",
            "Heading\nbody text",
            "",
        ];
        for raw in inputs {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn block_elements_become_lines() {
        assert_eq!(flatten("<p>one</p><p>two</p>"), "one\ntwo");
    }

    #[test]
    fn inline_markup_stays_on_one_line() {
        assert_eq!(
            flatten(r#"<p>See <a href="x">the <code>docs</code></a> here</p>"#),
            "See the docs here"
        );
    }

    #[test]
    fn whitespace_runs_squashed() {
        assert_eq!(flatten("<p>a\n   b\t c</p>"), "a b c");
    }

    #[test]
    fn list_items_one_line_each() {
        assert_eq!(
            flatten("<ul><li><p>one</p></li><li><p>two</p></li></ul>"),
            "one\ntwo"
        );
    }

    #[test]
    fn script_and_style_skipped() {
        assert_eq!(flatten("<p>text</p><script>var x = 1;</script>"), "text");
        assert_eq!(flatten("<style>p { color: red }</style><p>text</p>"), "text");
    }

    #[test]
    fn br_breaks_the_line() {
        assert_eq!(flatten("<p>a<br>b</p>"), "a\nb");
    }

    #[test]
    fn title_fragment_with_markup() {
        assert_eq!(
            fragment_title("Install <code>pip</code>¶"),
            "Install pip"
        );
        assert_eq!(fragment_title("Plain title"), "Plain title");
    }
}
