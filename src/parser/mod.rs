pub mod content;
pub mod sections;

use serde::Serialize;

use crate::loader::Document;
use sections::Section;

/// Search-ready record for one documentation page.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub path: String,
    pub title: String,
    pub sections: Vec<Section>,
}

/// Assemble the indexable record for a loaded page.
pub fn build_record(doc: &Document) -> PageRecord {
    PageRecord {
        path: doc.path.clone(),
        title: doc.title.clone(),
        sections: sections::extract_sections(&doc.body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Loader;
    use crate::storage::FsStorage;

    #[test]
    fn record_mirrors_document_metadata() {
        let doc = Document {
            path: "guides/install".into(),
            title: "Installation".into(),
            body: r#"<div class="section" id="install"><h2>Steps¶</h2><p>Run make.</p></div>"#
                .into(),
        };
        let record = build_record(&doc);
        assert_eq!(record.path, "guides/install");
        assert_eq!(record.title, "Installation");
        assert_eq!(record.sections.len(), 1);
        assert_eq!(record.sections[0].content, "Run make");
    }

    #[test]
    fn empty_body_yields_no_sections() {
        let doc = Document {
            path: "p".into(),
            title: String::new(),
            body: String::new(),
        };
        assert!(build_record(&doc).sections.is_empty());
    }

    #[test]
    fn tutorial_fixture_end_to_end() {
        let loader = Loader::new(FsStorage::new("tests/fixtures"));
        let doc = loader.load("tutorial.fjson").unwrap();
        let record = build_record(&doc);

        assert_eq!(record.path, "tutorial");
        assert_eq!(record.title, "Library Tutorial");

        let ids: Vec<_> = record.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["library-tutorial", "installation", "first-steps"]);

        assert_eq!(
            record.sections[0].content,
            "This guide walks through the library from scratch"
        );
        assert_eq!(
            record.sections[1].content,
            "Install the package with pip. Works on Linux. Works on macOS"
        );
        assert_eq!(
            record.sections[2].content,
            "Import the module and call run()"
        );

        for s in &record.sections {
            assert!(!s.title.contains('¶') && !s.title.contains('\n'));
            assert!(!s.content.contains('¶') && !s.content.contains('\n'));
        }
    }
}
