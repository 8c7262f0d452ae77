use crate::decode::XmlCursor;
use crate::error::DecodeError;
use serde::Serialize;

/// `<ResponseMetadata>` carried by every success response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseMetadata {
    pub request_id: Option<String>,
    /// SimpleDB machine-hour usage.
    pub box_usage: Option<String>,
}

impl ResponseMetadata {
    /// Reduce from the `<ResponseMetadata>` start tag; stops on its end tag.
    pub fn reduce(c: &mut XmlCursor<'_>) -> Result<Self, DecodeError> {
        let depth = c.depth();
        let mut out = Self::default();
        while c.next_in(depth)? {
            if c.test_expression("RequestId", depth + 1) {
                out.request_id = Some(c.read_text()?);
            } else if c.test_expression("BoxUsage", depth + 1) {
                out.box_usage = Some(c.read_text()?);
            }
        }
        Ok(out)
    }
}
