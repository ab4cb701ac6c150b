//! Roam Research JSON export model.
//!
//! An export is a JSON array of pages:
//!
//! ```json
//! [{"title": "Page", "children": [
//!     {"string": "{answer} text", "create-time": 1543212345678,
//!      "children": [{"string": "source:: a book"}]}
//! ]}]
//! ```

use serde::{Deserialize, Serialize};

/// A Roam page: a title and its top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

/// A Roam block with optional nested blocks and timestamps in epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub string: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
    #[serde(rename = "create-time", default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(rename = "edit-time", default, skip_serializing_if = "Option::is_none")]
    pub edit_time: Option<i64>,
}

impl Page {
    pub fn new(title: impl Into<String>, children: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            children,
        }
    }
}

impl Block {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    pub fn with_times(mut self, create_time: Option<i64>, edit_time: Option<i64>) -> Self {
        self.create_time = create_time;
        self.edit_time = edit_time;
        self
    }
}

/// Borrowed view of either a page or a block in the outline tree.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Page(&'a Page),
    Block(&'a Block),
}

impl<'a> Node<'a> {
    /// Text of the node. Pages carry a title but no text of their own.
    pub fn text(&self) -> Option<&'a str> {
        match self {
            Self::Page(_) => None,
            Self::Block(block) => Some(block.string.as_str()),
        }
    }

    pub fn children(&self) -> &'a [Block] {
        match self {
            Self::Page(page) => &page.children,
            Self::Block(block) => &block.children,
        }
    }

    pub fn as_page(&self) -> Option<&'a Page> {
        match self {
            Self::Page(page) => Some(page),
            Self::Block(_) => None,
        }
    }
}
