//! RFC 3986 percent-encoding for parameter names, values and paths.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the RFC 3986 unreserved set `A-Z a-z 0-9 - _ . ~`.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode with upper-case hex; space becomes `%20`, never `+`.
pub fn url_encode(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED).to_string()
}

/// Percent-encode a URL path, keeping `/` separators.
pub fn url_encode_path(path: &str) -> String {
    path.split('/').map(url_encode).collect::<Vec<_>>().join("/")
}
