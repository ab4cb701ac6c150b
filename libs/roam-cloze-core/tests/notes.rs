//! End-to-end extraction from Roam export JSON to Anki notes.

use pretty_assertions::assert_eq;
use roam_cloze_core::{AnkiNote, NoteExtractor, Page, TimeZoneSetting};
use serde_json::json;

fn pages(value: serde_json::Value) -> Vec<Page> {
    serde_json::from_value(value).expect("valid export")
}

fn extract(value: serde_json::Value) -> Vec<AnkiNote> {
    NoteExtractor::new(TimeZoneSetting::Utc).extract_notes(&pages(value))
}

fn single_block(text: &str) -> serde_json::Value {
    json!([{"title": "title", "children": [{"string": text}]}])
}

#[test]
fn test_cloze_block_becomes_note() {
    assert_eq!(
        extract(single_block("{cloze} text")),
        vec![AnkiNote::new(
            "{{c1::cloze}} text",
            "Note from Roam page 'title'."
        )]
    );
}

#[test]
fn test_cloze_inside_code_block_is_not_a_note() {
    assert_eq!(extract(single_block("```{not cloze}```")), vec![]);
}

#[test]
fn test_block_without_cloze_is_not_a_note() {
    assert_eq!(extract(single_block("{{[[TODO]]}} no cloze here")), vec![]);
}

#[test]
fn test_explicit_numbers_are_kept() {
    assert_eq!(
        extract(single_block("{c2::answer} and {other}"))[0].content,
        "{{c2::answer}} and {{c1::other}}"
    );
}

#[test]
fn test_math_and_code_are_translated() {
    assert_eq!(
        extract(single_block("{$$x^2$$} is `square` {c2::y::a hint}"))[0].content,
        "{{c1::\\(x^2\\)}} is <code>square</code> {{c2::y::a hint}}"
    );
}

#[test]
fn test_double_spaces_in_cloze_become_nbsp() {
    assert_eq!(
        extract(single_block("{<cloze>  } text"))[0].content,
        "{{c1::&lt;cloze&gt;&nbsp;&nbsp;}} text"
    );
}

#[test]
fn test_source_from_child_and_timestamps() {
    let notes = extract(json!([{
        "title": "Biology",
        "children": [
            {"string": "source: sibling"},
            {
                "string": "{Mitochondria} make ATP",
                "create-time": 1543212345678_i64,
                "edit-time": 1543212345678_i64,
                "children": [{"string": "Source:: Alberts, ch. 14"}]
            }
        ]
    }]));

    assert_eq!(
        notes,
        vec![AnkiNote::new(
            "{{c1::Mitochondria}} make ATP",
            "Alberts, ch. 14<br/>Note from Roam page 'Biology', \
             created at 2018-11-26T06:05:45.678+00:00, \
             edited at 2018-11-26T06:05:45.678+00:00."
        )]
    );
}

#[test]
fn test_source_is_html_escaped() {
    let notes = extract(json!([{
        "title": "<Page>",
        "children": [{"string": "{a}"}, {"string": "source: Tom & Jerry"}]
    }]));

    assert_eq!(
        notes[0].source,
        "Tom &amp; Jerry<br/>Note from Roam page '&lt;Page&gt;'."
    );
}

#[test]
fn test_notes_follow_tree_order_across_pages() {
    let notes = extract(json!([
        {"title": "one", "children": [
            {"string": "{a}", "children": [{"string": "{b}"}]},
            {"string": "{c}"}
        ]},
        {"title": "empty"},
        {"title": "two", "children": [{"string": "{d}"}]}
    ]));

    let contents: Vec<&str> = notes.iter().map(|note| note.content.as_str()).collect();
    assert_eq!(contents, vec!["{{c1::a}}", "{{c1::b}}", "{{c1::c}}", "{{c1::d}}"]);
}
