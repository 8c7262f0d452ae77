//! Declarative rewrites of a success body before it is decoded.
//!
//! A transform is a static list of rules attached to an operation. It runs
//! only when the trimmed body ends with `<Action>Response>`, so error pages
//! and truncated bodies reach the decoder untouched.

use crate::error::DecodeError;
use base64::Engine;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformRule {
    /// Rename every element called `from`.
    Rename { from: &'static str, to: &'static str },
    /// Drop the tags of `element`, keeping its children in place.
    Unwrap { element: &'static str },
    /// Base64-decode the text of elements carrying `attribute="value"`, and
    /// drop that attribute.
    DecodeBase64 {
        attribute: &'static str,
        value: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTransform {
    pub name: &'static str,
    pub rules: &'static [TransformRule],
}

/// SimpleDB `GetAttributes` / `Select`: names and values sent back with
/// `encoding="base64"` are decoded in place.
pub const SDB_BASE64: ResponseTransform = ResponseTransform {
    name: "sdb-base64",
    rules: &[TransformRule::DecodeBase64 {
        attribute: "encoding",
        value: "base64",
    }],
};

struct Frame {
    /// `None` when the element was unwrapped.
    out_name: Option<String>,
    decode: bool,
}

impl ResponseTransform {
    /// Whether `body` is a complete `<Action>Response` document.
    pub fn applies_to(&self, action: &str, body: &str) -> bool {
        let trimmed = body.trim_end();
        trimmed
            .strip_suffix("Response>")
            .is_some_and(|rest| rest.ends_with(action))
    }

    fn renamed<'n>(&self, name: &'n str) -> &'n str {
        for rule in self.rules {
            if let TransformRule::Rename { from, to } = rule {
                if *from == name {
                    return *to;
                }
            }
        }
        name
    }

    fn unwraps(&self, name: &str) -> bool {
        self.rules
            .iter()
            .any(|r| matches!(r, TransformRule::Unwrap { element } if *element == name))
    }

    fn decode_marker(&self, key: &str, value: &str) -> bool {
        self.rules.iter().any(|r| {
            matches!(r, TransformRule::DecodeBase64 { attribute, value: v }
                if *attribute == key && *v == value)
        })
    }

    /// Rewrite a start tag: rename and strip the decode marker.
    /// Returns `None` for unwrapped elements.
    fn rewrite_start(
        &self,
        e: &BytesStart<'_>,
    ) -> Result<Option<(BytesStart<'static>, bool)>, DecodeError> {
        let local = e.local_name();
        let name = utf8(local.as_ref())?;
        if self.unwraps(name) {
            return Ok(None);
        }
        let mut out = BytesStart::new(self.renamed(name).to_string());
        let mut decode = false;
        for attr in e.attributes() {
            let attr = attr.map_err(malformed)?;
            let marker = {
                let local = attr.key.local_name();
                let key = utf8(local.as_ref())?;
                let value = attr.unescape_value().map_err(malformed)?;
                self.decode_marker(key, &value)
            };
            if marker {
                decode = true;
                continue;
            }
            out.push_attribute(attr);
        }
        Ok(Some((out, decode)))
    }

    /// Apply every rule in one streaming pass.
    pub fn apply(&self, body: &str) -> Result<String, DecodeError> {
        let mut reader = Reader::from_str(body);
        let mut writer = Writer::new(Vec::with_capacity(body.len()));
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            let event = reader.read_event().map_err(malformed)?;
            match event {
                Event::Start(e) => match self.rewrite_start(&e)? {
                    Some((start, decode)) => {
                        let out_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                        writer.write_event(Event::Start(start)).map_err(malformed)?;
                        stack.push(Frame {
                            out_name: Some(out_name),
                            decode,
                        });
                    }
                    None => stack.push(Frame {
                        out_name: None,
                        decode: false,
                    }),
                },
                Event::Empty(e) => {
                    if let Some((start, _)) = self.rewrite_start(&e)? {
                        writer.write_event(Event::Empty(start)).map_err(malformed)?;
                    }
                }
                Event::End(_) => {
                    let frame = stack.pop().ok_or_else(|| DecodeError::Malformed {
                        position: reader.buffer_position() as u64,
                        message: "end tag without a start tag".to_string(),
                    })?;
                    if let Some(name) = frame.out_name {
                        writer.write_event(Event::End(BytesEnd::new(name))).map_err(malformed)?;
                    }
                }
                Event::Text(t) if stack.last().is_some_and(|f| f.decode) => {
                    let encoded = t.unescape().map_err(malformed)?;
                    let decoded = base64::engine::general_purpose::STANDARD
                        .decode(encoded.trim().as_bytes())
                        .map_err(|e| DecodeError::InvalidValue {
                            element: stack
                                .last()
                                .and_then(|f| f.out_name.clone())
                                .unwrap_or_default(),
                            message: format!("invalid base64: {}", e),
                        })?;
                    let text = String::from_utf8_lossy(&decoded);
                    writer
                        .write_event(Event::Text(BytesText::new(&text)))
                        .map_err(malformed)?;
                }
                Event::Eof => break,
                other => writer.write_event(other).map_err(malformed)?,
            }
        }
        if !stack.is_empty() {
            return Err(DecodeError::UnexpectedEof);
        }
        String::from_utf8(writer.into_inner()).map_err(malformed)
    }
}

fn utf8(raw: &[u8]) -> Result<&str, DecodeError> {
    std::str::from_utf8(raw).map_err(malformed)
}

fn malformed(e: impl std::fmt::Display) -> DecodeError {
    DecodeError::Malformed {
        position: 0,
        message: e.to_string(),
    }
}
