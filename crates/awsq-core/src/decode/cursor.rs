//! Forward-only pull cursor over a response body.
//!
//! Depths follow the nesting level: the root element is at depth 1, its
//! children at depth 2, and text at one level below its element. An end tag
//! reports the same depth as its start tag. Empty elements (`<a/>`) are
//! reported as a start followed by an end. Whitespace-only text is dropped
//! between elements but kept as the value of an element with no children.

use crate::error::DecodeError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    None,
    Start {
        name: String,
        attributes: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text(String),
}

pub struct XmlCursor<'a> {
    reader: Reader<&'a [u8]>,
    node: Node,
    node_depth: usize,
    open: usize,
    pending_end: Option<String>,
    /// Whitespace read right after a start tag, held until the next event.
    pending_space: Option<String>,
    seen_root: bool,
    done: bool,
}

impl<'a> XmlCursor<'a> {
    pub fn new(body: &'a str) -> Self {
        Self {
            reader: Reader::from_str(body),
            node: Node::None,
            node_depth: 0,
            open: 0,
            pending_end: None,
            pending_space: None,
            seen_root: false,
            done: false,
        }
    }

    /// Advance to the next start tag, end tag or text node.
    ///
    /// Returns `false` once the whole document has been read. Fails if the
    /// markup is not well-formed, including a document cut off before its
    /// root element closes.
    pub fn read(&mut self) -> Result<bool, DecodeError> {
        if self.done {
            return Ok(false);
        }
        if let Some(name) = self.pending_end.take() {
            self.close(name)?;
            return Ok(true);
        }
        loop {
            let event = self.reader.read_event().map_err(|e| self.malformed(e))?;
            match event {
                Event::Start(e) => {
                    self.pending_space = None;
                    self.open_element(&e)?;
                    return Ok(true);
                }
                Event::Empty(e) => {
                    self.pending_space = None;
                    self.open_element(&e)?;
                    if let Node::Start { name, .. } = &self.node {
                        self.pending_end = Some(name.clone());
                    }
                    return Ok(true);
                }
                Event::End(e) => {
                    let name = local_name(e.local_name().as_ref())?;
                    if let Some(space) = self.pending_space.take() {
                        self.set_text(space);
                        self.pending_end = Some(name);
                        return Ok(true);
                    }
                    self.close(name)?;
                    return Ok(true);
                }
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| self.malformed(e))?;
                    if text.trim().is_empty() {
                        // Kept only if the element closes before any child starts.
                        if self.is_start_element() || self.is_text() {
                            self.pending_space
                                .get_or_insert_with(String::new)
                                .push_str(&text);
                        }
                        continue;
                    }
                    if self.open == 0 {
                        return Err(self.malformed_msg("text outside the root element"));
                    }
                    let mut value = self.pending_space.take().unwrap_or_default();
                    value.push_str(&text);
                    self.set_text(value);
                    return Ok(true);
                }
                Event::CData(c) => {
                    if self.open == 0 {
                        return Err(self.malformed_msg("CDATA outside the root element"));
                    }
                    let mut value = self.pending_space.take().unwrap_or_default();
                    value.push_str(&String::from_utf8_lossy(&c));
                    self.set_text(value);
                    return Ok(true);
                }
                Event::Eof => {
                    self.done = true;
                    self.node = Node::None;
                    if self.open > 0 {
                        return Err(DecodeError::UnexpectedEof);
                    }
                    if !self.seen_root {
                        return Err(DecodeError::Empty);
                    }
                    return Ok(false);
                }
                // Declarations, comments, processing instructions, doctype.
                _ => continue,
            }
        }
    }

    fn open_element(&mut self, e: &BytesStart<'_>) -> Result<(), DecodeError> {
        if self.open == 0 && self.seen_root {
            return Err(self.malformed_msg("more than one root element"));
        }
        let name = local_name(e.local_name().as_ref())?;
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| self.malformed(err))?;
            let key = local_name(attr.key.local_name().as_ref())?;
            let value = attr.unescape_value().map_err(|err| self.malformed(err))?;
            attributes.push((key, value.into_owned()));
        }
        self.seen_root = true;
        self.open += 1;
        self.node_depth = self.open;
        self.node = Node::Start { name, attributes };
        Ok(())
    }

    fn set_text(&mut self, text: String) {
        self.node = Node::Text(text);
        self.node_depth = self.open + 1;
    }

    fn close(&mut self, name: String) -> Result<(), DecodeError> {
        if self.open == 0 {
            return Err(self.malformed_msg("end tag without a start tag"));
        }
        self.node_depth = self.open;
        self.open -= 1;
        self.node = Node::End { name };
        Ok(())
    }

    fn malformed(&self, e: impl std::fmt::Display) -> DecodeError {
        self.malformed_msg(&e.to_string())
    }

    fn malformed_msg(&self, message: &str) -> DecodeError {
        DecodeError::Malformed {
            position: self.reader.buffer_position() as u64,
            message: message.to_string(),
        }
    }

    pub fn is_start_element(&self) -> bool {
        matches!(self.node, Node::Start { .. })
    }

    pub fn is_end_element(&self) -> bool {
        matches!(self.node, Node::End { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self.node, Node::Text(_))
    }

    /// Element name of the current start or end tag; empty for text.
    pub fn name(&self) -> &str {
        match &self.node {
            Node::Start { name, .. } | Node::End { name } => name.as_str(),
            Node::Text(_) | Node::None => "",
        }
    }

    pub fn depth(&self) -> usize {
        self.node_depth
    }

    pub fn text(&self) -> Option<&str> {
        match &self.node {
            Node::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }

    /// True when positioned on the start tag `name` at `depth`.
    pub fn test_expression(&self, name: &str, depth: usize) -> bool {
        self.is_start_element() && self.node_depth == depth && self.name() == name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        match &self.node {
            Node::Start { attributes, .. } => attributes.as_slice(),
            _ => &[],
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text content of the current start tag; leaves the cursor on its end tag.
    ///
    /// Text of nested elements is skipped. On anything but a start tag this
    /// returns the current text node, or an empty string.
    pub fn read_text(&mut self) -> Result<String, DecodeError> {
        if !self.is_start_element() {
            return Ok(self.text().unwrap_or_default().to_string());
        }
        let depth = self.node_depth;
        let mut out = String::new();
        loop {
            if !self.read()? {
                return Err(DecodeError::UnexpectedEof);
            }
            match &self.node {
                Node::Text(t) if self.node_depth == depth + 1 => out.push_str(t),
                Node::End { .. } if self.node_depth == depth => return Ok(out),
                _ => {}
            }
        }
    }

    /// Advance within the element whose start tag is at `depth`.
    ///
    /// Returns `false` on that element's end tag.
    pub fn next_in(&mut self, depth: usize) -> Result<bool, DecodeError> {
        if !self.read()? {
            return Ok(false);
        }
        Ok(!(self.is_end_element() && self.node_depth == depth))
    }

    /// Read the rest of the document so malformed trailing markup is reported.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        while self.read()? {}
        Ok(())
    }
}

fn local_name(raw: &[u8]) -> Result<String, DecodeError> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|_| DecodeError::Malformed {
            position: 0,
            message: "invalid UTF-8 in name".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<?xml version="1.0"?>
<ListDomainsResponse xmlns="http://sdb.amazonaws.com/doc/2009-04-15/">
  <ListDomainsResult>
    <DomainName>alpha</DomainName>
    <DomainName>beta &amp; co</DomainName>
    <Empty/>
  </ListDomainsResult>
  <ResponseMetadata><RequestId>r-1</RequestId></ResponseMetadata>
</ListDomainsResponse>"#;

    #[test]
    fn depths_and_text() {
        let mut c = XmlCursor::new(BODY);
        let mut domains = Vec::new();
        let mut request_id = None;
        while c.read().unwrap() {
            if c.test_expression("DomainName", 3) {
                domains.push(c.read_text().unwrap());
                assert!(c.is_end_element());
                assert_eq!(c.depth(), 3);
            } else if c.test_expression("RequestId", 3) {
                request_id = Some(c.read_text().unwrap());
            }
        }
        assert_eq!(domains, ["alpha", "beta & co"]);
        assert_eq!(request_id.as_deref(), Some("r-1"));
    }

    #[test]
    fn empty_element_is_start_then_end() {
        let mut c = XmlCursor::new("<a><b x=\"1\"/></a>");
        assert!(c.read().unwrap() && c.test_expression("a", 1));
        assert!(c.read().unwrap() && c.test_expression("b", 2));
        assert_eq!(c.attribute("x"), Some("1"));
        assert_eq!(c.read_text().unwrap(), "");
        assert!(c.is_end_element() && c.name() == "b");
        assert!(c.read().unwrap() && c.is_end_element() && c.depth() == 1);
        assert!(!c.read().unwrap());
    }

    #[test]
    fn next_in_stops_at_parent_end() {
        let mut c = XmlCursor::new("<r><m><k>1</k><skip><k>2</k></skip></m><k>3</k></r>");
        c.read().unwrap();
        c.read().unwrap();
        assert!(c.test_expression("m", 2));
        let mut seen = Vec::new();
        while c.next_in(2).unwrap() {
            if c.test_expression("k", 3) {
                seen.push(c.read_text().unwrap());
            }
        }
        assert_eq!(seen, ["1"]);
        assert!(c.is_end_element() && c.name() == "m");
        assert!(c.read().unwrap() && c.test_expression("k", 2));
    }

    #[test]
    fn read_text_skips_nested_elements() {
        let mut c = XmlCursor::new("<a>x<b>y</b>z</a>");
        c.read().unwrap();
        assert_eq!(c.read_text().unwrap(), "xz");
    }

    #[test]
    fn malformed_documents() {
        assert!(matches!(XmlCursor::new("<a><b></a>").finish(), Err(DecodeError::Malformed { .. })));
        assert!(matches!(
            XmlCursor::new("<a><b>").finish(),
            Err(DecodeError::UnexpectedEof) | Err(DecodeError::Malformed { .. })
        ));
        assert_eq!(XmlCursor::new("").finish(), Err(DecodeError::Empty));
        assert_eq!(XmlCursor::new("  \n").finish(), Err(DecodeError::Empty));
        assert!(matches!(XmlCursor::new("not markup").finish(), Err(DecodeError::Malformed { .. })));
        assert!(matches!(XmlCursor::new("<a/><b/>").finish(), Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn text_values_keep_whitespace() {
        let mut c = XmlCursor::new("<a>\n  <v> padded </v>\n  <w> </w>\n  <x>\t<!-- c -->\n</x>\n</a>");
        let mut values = Vec::new();
        while c.read().unwrap() {
            if c.is_start_element() && c.depth() == 2 {
                values.push(c.read_text().unwrap());
            }
        }
        assert_eq!(values, [" padded ", " ", "\t\n"]);
    }

    #[test]
    fn indentation_between_elements_is_not_text() {
        let mut c = XmlCursor::new("<a>\n  <b>1</b>\n  <c/>\n</a>\n");
        let mut texts = Vec::new();
        while c.read().unwrap() {
            if let Some(t) = c.text() {
                texts.push((t.to_string(), c.depth()));
            }
        }
        assert_eq!(texts, [("1".to_string(), 3)]);
    }

    #[test]
    fn read_after_end_stays_false() {
        let mut c = XmlCursor::new("<a/>");
        c.finish().unwrap();
        assert!(!c.read().unwrap());
    }
}
