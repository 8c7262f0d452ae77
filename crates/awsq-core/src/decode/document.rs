//! Generic element tree for operations without a typed result.

use super::cursor::XmlCursor;
use crate::error::DecodeError;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Element> + 's {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow child names from this element.
    pub fn path(&self, names: &[&str]) -> Option<&Element> {
        names.iter().try_fold(self, |el, name| el.child(name))
    }

    /// Text of the named child, if present.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.text.as_deref())
    }

    /// Depth-first search for the first element called `name`.
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

/// Whole response as a tree; serializes to JSON with its root element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Reducer that keeps every element.
    pub fn reduce(c: &mut XmlCursor<'_>) -> Result<Document, DecodeError> {
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;
        while c.read()? {
            if c.is_start_element() {
                stack.push(Element {
                    name: c.name().to_string(),
                    attributes: c.attributes().iter().cloned().collect(),
                    ..Element::default()
                });
            } else if let Some(t) = c.text() {
                if let Some(top) = stack.last_mut() {
                    top.text.get_or_insert_with(String::new).push_str(t);
                }
            } else if c.is_end_element() {
                let Some(done) = stack.pop() else {
                    continue;
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(done),
                    None => root = Some(done),
                }
            }
        }
        root.map(|root| Document { root })
            .ok_or(DecodeError::Empty)
    }

    /// `ResponseMetadata/RequestId`, or a top-level `RequestId`/`RequestID`.
    pub fn request_id(&self) -> Option<&str> {
        self.root
            .path(&["ResponseMetadata", "RequestId"])
            .or_else(|| self.root.child("RequestId"))
            .or_else(|| self.root.child("RequestID"))
            .and_then(|e| e.text.as_deref())
    }
}
