//! Content hashes and delivery URLs for cache busting.
//!
//! Bundle URLs embed a short hash of the bundle content, so a content change
//! yields a new URL and clients re-fetch instead of reusing a stale copy.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Hex digits kept from the blake3 digest.
pub const HASH_LEN: usize = 8;

/// Characters escaped in a URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Short content hash (first [`HASH_LEN`] hex chars of blake3).
pub fn content_hash(content: &str) -> String {
    let hash = blake3::hash(content.as_bytes());
    hash.to_hex()[..HASH_LEN].to_owned()
}

/// `<prefix>/bundle/<name>_v<hash>.<extension>`
pub fn bundle_url(prefix: &str, name: &str, hash: &str, extension: &str) -> String {
    format!(
        "{prefix}/bundle/{}_v{hash}.{}",
        utf8_percent_encode(name, SEGMENT),
        utf8_percent_encode(extension, SEGMENT)
    )
}

/// `<prefix>/bundle/<name>/asset/<index>/<asset_name>`
///
/// `asset_name` may contain `/` (file assets in subdirectories).
pub fn asset_url(prefix: &str, name: &str, index: usize, asset_name: Option<&str>) -> String {
    let asset_name = asset_name
        .map(|n| {
            n.split('/')
                .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default();
    format!(
        "{prefix}/bundle/{}/asset/{index}/{asset_name}",
        utf8_percent_encode(name, SEGMENT)
    )
}
