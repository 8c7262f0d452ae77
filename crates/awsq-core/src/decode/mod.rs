//! Response decoding: success bodies through an operation's reducer, error
//! bodies through the envelope decoder and the operation's error reducer.

mod cursor;
mod document;
mod envelope;
mod transform;

pub use cursor::XmlCursor;
pub use document::{Document, Element};
pub use envelope::decode_error;
pub use transform::{ResponseTransform, TransformRule, SDB_BASE64};

use crate::error::{DecodeError, InvokeError, ServiceError};
use std::borrow::Cow;
use std::fmt;

/// Turns a success body into a typed result.
pub type Reducer<T> = fn(&mut XmlCursor<'_>) -> Result<T, DecodeError>;

/// Maps the generic service error to an operation-specific one.
pub type ErrorReducer<E> = fn(ServiceError) -> E;

/// One API action: its name, reducers and optional response transform.
///
/// Typed façades declare operations as constants; the registry builds them
/// at runtime for arbitrary action names.
pub struct Operation<T, E = ServiceError> {
    pub name: Cow<'static, str>,
    pub reduce: Reducer<T>,
    pub reduce_error: ErrorReducer<E>,
    pub transform: Option<&'static ResponseTransform>,
}

impl<T, E> Clone for Operation<T, E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            reduce: self.reduce,
            reduce_error: self.reduce_error,
            transform: self.transform,
        }
    }
}

impl<T, E> fmt::Debug for Operation<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("transform", &self.transform.map(|t| t.name))
            .finish()
    }
}

impl<T, E> Operation<T, E> {
    pub const fn new(name: &'static str, reduce: Reducer<T>, reduce_error: ErrorReducer<E>) -> Self {
        Self {
            name: Cow::Borrowed(name),
            reduce,
            reduce_error,
            transform: None,
        }
    }

    pub const fn transformed(
        name: &'static str,
        reduce: Reducer<T>,
        reduce_error: ErrorReducer<E>,
        transform: &'static ResponseTransform,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            reduce,
            reduce_error,
            transform: Some(transform),
        }
    }

    /// Operation for an action name only known at runtime.
    pub fn named(name: impl Into<Cow<'static, str>>, reduce: Reducer<T>, reduce_error: ErrorReducer<E>) -> Self {
        Self {
            name: name.into(),
            reduce,
            reduce_error,
            transform: None,
        }
    }

    /// Decode a 2xx body: transform if it applies, reduce, then read to the
    /// end so trailing malformed markup is still reported.
    pub fn decode_success(&self, body: &str) -> Result<T, DecodeError> {
        let rewritten;
        let body = match self.transform {
            Some(t) if t.applies_to(&self.name, body) => {
                tracing::debug!(operation = %self.name, transform = t.name, "applying response transform");
                rewritten = t.apply(body)?;
                rewritten.as_str()
            }
            _ => body,
        };
        let mut cursor = XmlCursor::new(body);
        let value = (self.reduce)(&mut cursor)?;
        cursor.finish()?;
        Ok(value)
    }

    /// Decode a non-2xx response through the envelope and the error reducer.
    pub fn decode_failure(&self, status: u16, body: Option<&str>) -> E {
        (self.reduce_error)(decode_error(status, body))
    }

    /// Route a retries-exhausted or other pre-built service error through
    /// the error reducer.
    pub fn reduce_service_error(&self, error: ServiceError) -> E {
        (self.reduce_error)(error)
    }
}

/// Identity error reducer.
pub fn generic_error(e: ServiceError) -> ServiceError {
    e
}

/// Decode one final response: 2xx through the success path, anything else
/// through the error path.
pub fn decode<T, E>(op: &Operation<T, E>, status: u16, body: Option<&str>) -> Result<T, InvokeError<E>> {
    if (200..300).contains(&status) {
        op.decode_success(body.unwrap_or_default())
            .map_err(InvokeError::MalformedResponse)
    } else {
        Err(InvokeError::Service(op.decode_failure(status, body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceErrorKind;

    #[derive(Debug, Default, PartialEq)]
    struct Shape {
        name: Option<String>,
        nested: Option<String>,
    }

    fn reduce_shape(c: &mut XmlCursor<'_>) -> Result<Shape, DecodeError> {
        let mut out = Shape::default();
        while c.read()? {
            if c.test_expression("Name", 3) {
                out.name = Some(c.read_text()?);
            } else if c.test_expression("Value", 4) {
                out.nested = Some(c.read_text()?);
            }
        }
        Ok(out)
    }

    const OP: Operation<Shape> = Operation::new("Describe", reduce_shape, generic_error);

    #[test]
    fn missing_optional_nested_element_leaves_field_unset() {
        let body = "<DescribeResponse><DescribeResult><Name>n</Name><Extra><Unknown/></Extra>\
                    </DescribeResult></DescribeResponse>";
        let v = decode(&OP, 200, Some(body)).unwrap();
        assert_eq!(v, Shape { name: Some("n".to_string()), nested: None });
    }

    #[test]
    fn undecodable_success_body_is_malformed() {
        assert!(matches!(
            decode(&OP, 200, Some("<DescribeResponse><DescribeResult>")),
            Err(InvokeError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode(&OP, 200, None),
            Err(InvokeError::MalformedResponse(DecodeError::Empty))
        ));
    }

    #[test]
    fn error_status_goes_through_envelope() {
        let body = "<ErrorResponse><Error><Code>Throttling</Code><Message>slow</Message></Error>\
                    <RequestId>r</RequestId></ErrorResponse>";
        match decode(&OP, 400, Some(body)) {
            Err(InvokeError::Service(e)) => {
                assert_eq!(e.kind, ServiceErrorKind::Service);
                assert_eq!(e.code(), Some("Throttling"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn transform_runs_only_for_complete_action_response() {
        const OP_T: Operation<Shape> =
            Operation::transformed("Describe", reduce_shape, generic_error, &SDB_BASE64);
        let body = "<DescribeResponse><DescribeResult><Name encoding=\"base64\">Y29sb3I=</Name>\
                    </DescribeResult></DescribeResponse>";
        assert_eq!(OP_T.decode_success(body).unwrap().name.as_deref(), Some("color"));
        // Without the transform the encoded text is passed through.
        assert_eq!(OP.decode_success(body).unwrap().name.as_deref(), Some("Y29sb3I="));
    }
}
