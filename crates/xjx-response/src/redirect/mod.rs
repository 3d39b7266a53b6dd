//! URL normalisation for redirect commands.
//!
//! Redirect targets arrive as relative or absolute URLs whose query values may
//! contain raw spaces or reserved characters. Before the URL is written into a
//! navigation script, its query is decoded pair by pair and every key and value
//! is re-escaped with raw percent encoding. Decoding works on bytes, so escapes
//! that are not valid UTF-8 survive unchanged. The path and fragment are left
//! exactly as given.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};

/// Everything except the RFC 3986 unreserved characters.
const RAW_URL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const MILLIS_PER_SECOND: u64 = 1000;

/// Re-escapes the query portion of `url`.
///
/// A query made of `key=value` segments is rebuilt pair by pair. A query that
/// cannot be split into pairs is escaped as a single opaque string.
///
/// # Example
///
/// ```
/// use xjx_response::redirect::reencode_query;
///
/// assert_eq!(
///     reencode_query("/page?a=1&b=two words#top"),
///     "/page?a=1&b=two%20words#top",
/// );
/// ```
#[must_use]
pub fn reencode_query(url: &str) -> String {
    let Some((start, end)) = query_bounds(url) else {
        return url.to_owned();
    };
    let (Some(head), Some(query), Some(tail)) =
        (url.get(..start), url.get(start..end), url.get(end..))
    else {
        return url.to_owned();
    };
    let encoded = reencode_pairs(query).unwrap_or_else(|| escape(query));
    let mut rebuilt = String::with_capacity(head.len() + encoded.len() + tail.len());
    rebuilt.push_str(head);
    rebuilt.push_str(&encoded);
    rebuilt.push_str(tail);
    rebuilt
}

/// Builds the client script that navigates to `url`.
///
/// A zero delay assigns the location immediately; otherwise the assignment is
/// scheduled with `window.setTimeout`.
#[must_use]
pub fn navigation_script(url: &str, delay_secs: u32) -> String {
    if delay_secs == 0 {
        format!("window.location = \"{url}\";")
    } else {
        let delay_ms = u64::from(delay_secs) * MILLIS_PER_SECOND;
        format!("window.setTimeout(\"window.location = '{url}';\",{delay_ms});")
    }
}

/// Byte range of the query, excluding the `?` and any fragment.
fn query_bounds(url: &str) -> Option<(usize, usize)> {
    let delimiter = url.find(['?', '#'])?;
    if !url.get(delimiter..)?.starts_with('?') {
        return None;
    }
    let start = delimiter + 1;
    let end = url
        .get(start..)?
        .find('#')
        .map_or(url.len(), |offset| start + offset);
    Some((start, end))
}

fn reencode_pairs(query: &str) -> Option<String> {
    let segments: Vec<&str> = query.split('&').filter(|segment| !segment.is_empty()).collect();
    if segments.is_empty() {
        return None;
    }
    let pairs = segments
        .into_iter()
        .map(|segment| {
            let (key, value) = segment.split_once('=')?;
            if key.is_empty() {
                return None;
            }
            Some(format!("{}={}", reescape(key), reescape(value)))
        })
        .collect::<Option<Vec<String>>>()?;
    Some(pairs.join("&"))
}

/// Form-decodes `component` to raw bytes and escapes them again.
fn reescape(component: &str) -> String {
    let spaced = component.replace('+', " ");
    let bytes: Vec<u8> = percent_decode_str(&spaced).collect();
    percent_encode(&bytes, RAW_URL_ENCODE).to_string()
}

fn escape(text: &str) -> String {
    percent_encode(text.as_bytes(), RAW_URL_ENCODE).to_string()
}

#[cfg(test)]
mod tests;
