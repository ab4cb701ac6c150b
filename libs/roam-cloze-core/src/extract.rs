//! Walks a Roam export and turns blocks containing clozes into notes.

use crate::export::{Block, Node, Page};
use crate::format::make_anki_note;
use crate::parser::roam::{contains_cloze, parse_roam_block};
use crate::source::{find_source, SourceFormatter};
use crate::time::{TimeFormatter, TimeZoneSetting};
use crate::types::{AnkiNote, RoamBlock};

/// Extracts cloze notes from pages in tree pre-order: a block comes before
/// its children and siblings keep their listed order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteExtractor {
    source_formatter: SourceFormatter,
}

impl NoteExtractor {
    pub fn new(zone: TimeZoneSetting) -> Self {
        Self {
            source_formatter: SourceFormatter::new(TimeFormatter::new(zone)),
        }
    }

    pub fn extract_blocks(&self, pages: &[Page]) -> Vec<RoamBlock> {
        let mut blocks = Vec::new();

        for page in pages {
            let found = blocks.len();
            self.walk(&page.children, &[Node::Page(page)], &mut blocks);
            tracing::debug!(
                "Found {} cloze blocks on page '{}'",
                blocks.len() - found,
                page.title
            );
        }

        blocks
    }

    pub fn extract_notes(&self, pages: &[Page]) -> Vec<AnkiNote> {
        self.extract_blocks(pages).iter().map(make_anki_note).collect()
    }

    /// Parse one block and attach its citation. `ancestors` runs from the page
    /// down to the block's parent.
    pub fn build_block<'a>(&self, block: &'a Block, ancestors: &[Node<'a>]) -> Option<RoamBlock> {
        if !might_contain_cloze(&block.string) {
            return None;
        }

        let parts = match parse_roam_block(&block.string) {
            Ok(parts) => parts,
            Err(error) => {
                tracing::warn!("Skipping block that could not be parsed: {}", error);
                return None;
            }
        };
        if !contains_cloze(&parts) {
            tracing::debug!("Skipping block without clozes: {:?}", block.string);
            return None;
        }

        let page_title = ancestors
            .first()
            .and_then(Node::as_page)
            .map_or("", |page| page.title.as_str());
        let source = find_source(block, ancestors);

        Some(RoamBlock {
            parts,
            source: self.source_formatter.format(block, source, page_title),
        })
    }

    fn walk<'a>(&self, blocks: &'a [Block], ancestors: &[Node<'a>], found: &mut Vec<RoamBlock>) {
        for block in blocks {
            found.extend(self.build_block(block, ancestors));

            if !block.children.is_empty() {
                let mut path = ancestors.to_vec();
                path.push(Node::Block(block));
                self.walk(&block.children, &path, found);
            }
        }
    }
}

/// A cloze needs both braces, so anything else can skip the grammar.
fn might_contain_cloze(text: &str) -> bool {
    text.contains('{') && text.contains('}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cloze, ClozePart, RoamPart};
    use pretty_assertions::assert_eq;

    fn extractor() -> NoteExtractor {
        NoteExtractor::new(TimeZoneSetting::Utc)
    }

    fn contents(notes: &[AnkiNote]) -> Vec<&str> {
        notes.iter().map(|note| note.content.as_str()).collect()
    }

    #[test]
    fn test_block_with_cloze_becomes_roam_block() {
        let pages = vec![Page::new("title", vec![Block::new("{cloze} text")])];

        assert_eq!(
            extractor().extract_blocks(&pages),
            vec![RoamBlock {
                parts: vec![
                    RoamPart::Cloze(Cloze::new(vec![ClozePart::text("cloze")])),
                    RoamPart::text(" text"),
                ],
                source: "Note from Roam page 'title'.".to_string(),
            }]
        );
    }

    #[test]
    fn test_blocks_without_clozes_are_skipped() {
        let pages = vec![Page::new(
            "title",
            vec![
                Block::new("plain text"),
                Block::new("{{embed}}"),
                Block::new("```{not cloze}```"),
                Block::new("} backwards {"),
                Block::new(""),
            ],
        )];

        assert_eq!(extractor().extract_blocks(&pages), vec![]);
    }

    #[test]
    fn test_notes_are_in_pre_order() {
        let pages = vec![
            Page::new(
                "first",
                vec![
                    Block::new("{a}").with_children(vec![
                        Block::new("{b}").with_children(vec![Block::new("{c}")]),
                        Block::new("{d}"),
                    ]),
                    Block::new("{e}"),
                ],
            ),
            Page::new("second", vec![Block::new("{f}")]),
        ];

        let notes = extractor().extract_notes(&pages);

        assert_eq!(
            contents(&notes),
            vec![
                "{{c1::a}}",
                "{{c1::b}}",
                "{{c1::c}}",
                "{{c1::d}}",
                "{{c1::e}}",
                "{{c1::f}}"
            ]
        );
    }

    #[test]
    fn test_nested_block_uses_page_title_and_parent_source() {
        let pages = vec![Page::new(
            "page",
            vec![Block::new("source: a book").with_children(vec![
                Block::new("{answer}").with_times(Some(1543212345678), None),
            ])],
        )];

        let notes = extractor().extract_notes(&pages);

        assert_eq!(
            notes,
            vec![AnkiNote::new(
                "{{c1::answer}}",
                "a book<br/>Note from Roam page 'page', created at 2018-11-26T06:05:45.678+00:00."
            )]
        );
    }

    #[test]
    fn test_build_block_without_ancestors_has_empty_title() {
        let block = Block::new("{a}");
        let roam_block = extractor().build_block(&block, &[]).unwrap();
        assert_eq!(roam_block.source, "Note from Roam page ''.");
    }

    #[test]
    fn test_pre_filter_requires_both_braces() {
        assert!(might_contain_cloze("{a}"));
        assert!(!might_contain_cloze("{a"));
        assert!(!might_contain_cloze("a}"));
        assert!(!might_contain_cloze("$$a$$"));
    }
}
