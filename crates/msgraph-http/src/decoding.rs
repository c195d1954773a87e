//! Query parameter name decoding.
//!
//! Templates carry names such as `%24select` so they survive expansion;
//! the service expects `$select`.

use percent_encoding::percent_decode_str;
use url::Url;

/// Decode the listed characters in every query parameter *name*; values are
/// left untouched.
pub fn decode_parameter_names(url: &mut Url, chars: &[char]) {
    let Some(query) = url.query() else { return };
    if chars.is_empty() || !query.contains('%') {
        return;
    }
    let decoded: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => format!("{}={}", decode_name(name, chars), value),
            None => decode_name(pair, chars),
        })
        .collect();
    url.set_query(Some(&decoded.join("&")));
}

fn decode_name(name: &str, chars: &[char]) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let triplet = rest.get(pos..pos + 3);
        let decoded = triplet
            .and_then(|t| percent_decode_str(t).decode_utf8().ok())
            .and_then(|s| s.chars().next())
            .filter(|c| chars.contains(c));
        match (decoded, triplet) {
            (Some(c), Some(_)) => {
                out.push(c);
                rest = &rest[pos + 3..];
            }
            _ => {
                out.push('%');
                rest = &rest[pos + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}
