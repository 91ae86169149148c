use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left intact when encoding a file name for a request path.
///
/// Same unreserved set as a browser's `encodeURIComponent`, so `/`, `%`,
/// `?` and `#` inside a name are always escaped.
const NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Text after the final `/` (the whole input when there is none).
///
/// A trailing slash yields an empty name, e.g. for `../`.
pub fn last_segment(href: &str) -> &str {
    href.rsplit('/').next().unwrap_or(href)
}

/// Percent-encode a raw file name for use as one path segment.
///
/// Must be applied exactly once to the raw name; encoding an already encoded
/// name turns `%20` into `%2520`.
pub fn encode_name(name: &str) -> String {
    utf8_percent_encode(name, NAME_ENCODE_SET).to_string()
}

/// Join a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
