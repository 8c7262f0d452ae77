//! Error envelopes of non-2xx responses.
//!
//! Two shapes are recognized:
//!
//! ```text
//! <ErrorResponse><Error><Type/><Code/><Message/></Error><RequestId/></ErrorResponse>
//! <Response><Errors><Error><Code/><Message/><BoxUsage/></Error></Errors><RequestID/></Response>
//! ```
//!
//! Both reduce to "the first `<Error>` element plus a request id anywhere",
//! which also covers a bare `<Error>` root.

use super::cursor::XmlCursor;
use crate::error::{DecodeError, ServiceError, ServiceErrorKind};

#[derive(Debug, Default)]
struct Envelope {
    code: Option<String>,
    message: Option<String>,
    error_type: Option<String>,
    box_usage: Option<String>,
    request_id: Option<String>,
}

fn walk(body: &str) -> Result<Envelope, DecodeError> {
    let mut c = XmlCursor::new(body);
    let mut env = Envelope::default();
    let mut error_depth: Option<usize> = None;
    let mut error_seen = false;

    while c.read()? {
        if c.is_end_element() {
            if error_depth == Some(c.depth()) && c.name() == "Error" {
                error_depth = None;
            }
            continue;
        }
        if !c.is_start_element() {
            continue;
        }
        let name = c.name().to_string();
        match (name.as_str(), error_depth) {
            ("Error", None) if !error_seen => {
                error_seen = true;
                error_depth = Some(c.depth());
            }
            ("Code", Some(d)) if c.depth() == d + 1 => env.code = Some(c.read_text()?),
            ("Message", Some(d)) if c.depth() == d + 1 => env.message = Some(c.read_text()?),
            ("Type", Some(d)) if c.depth() == d + 1 => env.error_type = Some(c.read_text()?),
            ("BoxUsage", Some(d)) if c.depth() == d + 1 => env.box_usage = Some(c.read_text()?),
            ("RequestId" | "RequestID", _) if env.request_id.is_none() => {
                env.request_id = Some(c.read_text()?)
            }
            _ => {}
        }
    }
    Ok(env)
}

/// Decode a non-2xx response into a [`ServiceError`].
///
/// - matched envelope: [`ServiceErrorKind::Service`] with code, message,
///   type, request id and box usage;
/// - well-formed markup without an error code: [`ServiceErrorKind::Unrecognized`];
/// - absent or unparseable body: [`ServiceErrorKind::InternalError`].
pub fn decode_error(status: u16, body: Option<&str>) -> ServiceError {
    let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
        return ServiceError::internal(status, None);
    };
    let env = match walk(body) {
        Ok(env) => env,
        Err(e) => {
            tracing::debug!(status, error = %e, "error body is not well-formed");
            return ServiceError::internal(status, Some(body.to_string()));
        }
    };
    let Some(code) = env.code.filter(|c| !c.is_empty()) else {
        let mut err = ServiceError::unrecognized(status, body.to_string());
        err.request_id = env.request_id;
        return err;
    };
    ServiceError {
        kind: ServiceErrorKind::Service,
        code: Some(code),
        message: env.message.unwrap_or_default(),
        error_type: env.error_type,
        request_id: env.request_id,
        status,
        box_usage: env.box_usage,
        raw_body: Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_shape() {
        let body = "<ErrorResponse xmlns=\"https://iam.amazonaws.com/doc/2010-05-08/\">\
            <Error><Type>Sender</Type><Code>NoSuchEntity</Code><Message>x</Message></Error>\
            <RequestId>req-42</RequestId></ErrorResponse>";
        let e = decode_error(404, Some(body));
        assert_eq!(e.kind, ServiceErrorKind::Service);
        assert_eq!(e.code(), Some("NoSuchEntity"));
        assert_eq!(e.message, "x");
        assert_eq!(e.error_type.as_deref(), Some("Sender"));
        assert_eq!(e.request_id.as_deref(), Some("req-42"));
        assert_eq!(e.status, 404);
        assert_eq!(e.raw_body.as_deref(), Some(body));
    }

    #[test]
    fn errors_list_shape_first_error_wins() {
        let body = "<?xml version=\"1.0\"?>\n<Response><Errors>\
            <Error><Code>NoSuchDomain</Code><Message>The specified domain does not exist.</Message>\
            <BoxUsage>0.0000219907</BoxUsage></Error>\
            <Error><Code>Second</Code><Message>ignored</Message></Error>\
            </Errors><RequestID>abc-123</RequestID></Response>";
        let e = decode_error(400, Some(body));
        assert_eq!(e.code(), Some("NoSuchDomain"));
        assert_eq!(e.message, "The specified domain does not exist.");
        assert_eq!(e.box_usage.as_deref(), Some("0.0000219907"));
        assert_eq!(e.request_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn absent_or_unparseable_body_is_internal_error() {
        let e = decode_error(502, None);
        assert_eq!(e.kind, ServiceErrorKind::InternalError);
        assert_eq!(e.message, "Internal Error");
        assert_eq!(e.status, 502);

        let e = decode_error(500, Some("<html><body>oops"));
        assert_eq!(e.kind, ServiceErrorKind::InternalError);
        assert_eq!(e.raw_body.as_deref(), Some("<html><body>oops"));

        assert_eq!(decode_error(400, Some("   ")).kind, ServiceErrorKind::InternalError);
    }

    #[test]
    fn well_formed_but_unknown_shape_is_unrecognized() {
        let body = "<Fault><Reason>throttled</Reason><RequestId>r9</RequestId></Fault>";
        let e = decode_error(400, Some(body));
        assert_eq!(e.kind, ServiceErrorKind::Unrecognized);
        assert!(e.code.is_none());
        assert_eq!(e.request_id.as_deref(), Some("r9"));
        assert_eq!(e.raw_body.as_deref(), Some(body));
    }

    #[test]
    fn nested_code_elements_outside_error_are_ignored() {
        let body = "<Response><Detail><Code>NotThis</Code></Detail>\
            <Errors><Error><Code>Real</Code><Message>m</Message></Error></Errors></Response>";
        assert_eq!(decode_error(400, Some(body)).code(), Some("Real"));
    }
}
