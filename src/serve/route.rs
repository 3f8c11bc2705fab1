//! Delivery URL parsing.
//!
//! Two routes live under the URL prefix:
//!
//! ```text
//! <prefix>/bundle/<name>_v<hash>.<ext>              whole bundle
//! <prefix>/bundle/<name>/asset/<index>/[<name>]     one asset
//! ```
//!
//! Segments are split before percent-decoding, so an encoded `/` in a bundle
//! name never splits the path.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

static BUNDLE_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.+)_v(?P<hash>[0-9a-f]+)\.(?P<ext>.*)$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Whole bundle. Hash and extension are informational only.
    Bundle {
        name: String,
        hash: String,
        extension: String,
    },
    /// One asset of a bundle, by position.
    Asset {
        bundle: String,
        index: usize,
        name: Option<String>,
    },
}

/// Match a request URL against the delivery routes under `prefix`.
pub fn parse(url: &str, prefix: &str) -> Option<Route> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let rest = path.strip_prefix(prefix)?.strip_prefix("/bundle/")?;

    let mut segments = rest.split('/');
    let first = segments.next().filter(|s| !s.is_empty())?;

    match segments.next() {
        None => {
            let file = decode(first)?;
            let caps = BUNDLE_FILE.captures(&file)?;
            Some(Route::Bundle {
                name: caps["name"].to_owned(),
                hash: caps["hash"].to_owned(),
                extension: caps["ext"].to_owned(),
            })
        }
        Some("asset") => {
            let index = segments.next()?.parse().ok()?;
            let name = segments
                .map(decode)
                .collect::<Option<Vec<_>>>()?
                .join("/");
            Some(Route::Asset {
                bundle: decode(first)?,
                index,
                name: (!name.is_empty()).then_some(name),
            })
        }
        Some(_) => None,
    }
}

fn decode(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(name: &str, hash: &str, extension: &str) -> Option<Route> {
        Some(Route::Bundle {
            name: name.into(),
            hash: hash.into(),
            extension: extension.into(),
        })
    }

    fn asset(bundle: &str, index: usize, name: Option<&str>) -> Option<Route> {
        Some(Route::Asset {
            bundle: bundle.into(),
            index,
            name: name.map(Into::into),
        })
    }

    #[test]
    fn test_parse_bundle_route() {
        assert_eq!(
            parse("/_compressor/bundle/site_vabc12345.css", "/_compressor"),
            bundle("site", "abc12345", "css")
        );
        assert_eq!(
            parse("/_compressor/bundle/jquery.min_v00ff.js?x=1", "/_compressor"),
            bundle("jquery.min", "00ff", "js")
        );
        // Last `_v` separates the hash
        assert_eq!(
            parse("/_compressor/bundle/a_vb_v1234.txt", "/_compressor"),
            bundle("a_vb", "1234", "txt")
        );
    }

    #[test]
    fn test_parse_bundle_route_free_extension() {
        assert_eq!(
            parse("/_compressor/bundle/app_v316cbf3a.min.js", "/_compressor"),
            bundle("app", "316cbf3a", "min.js")
        );
        assert_eq!(
            parse("/_compressor/bundle/raw_v3ae7d805.", "/_compressor"),
            bundle("raw", "3ae7d805", "")
        );
    }

    #[test]
    fn test_parse_bundle_route_encoded_name() {
        assert_eq!(
            parse("/_compressor/bundle/my%20bundle_v12.css", "/_compressor"),
            bundle("my bundle", "12", "css")
        );
        assert_eq!(
            parse("/_compressor/bundle/a%2Fb_v12.css", "/_compressor"),
            bundle("a/b", "12", "css")
        );
    }

    #[test]
    fn test_parse_asset_route() {
        assert_eq!(
            parse("/_compressor/bundle/site/asset/0/", "/_compressor"),
            asset("site", 0, None)
        );
        assert_eq!(
            parse("/_compressor/bundle/site/asset/3", "/_compressor"),
            asset("site", 3, None)
        );
        assert_eq!(
            parse("/_compressor/bundle/site/asset/2/css/base.css", "/_compressor"),
            asset("site", 2, Some("css/base.css"))
        );
    }

    #[test]
    fn test_parse_empty_prefix() {
        assert_eq!(parse("/bundle/site_v1.css", ""), bundle("site", "1", "css"));
    }

    #[test]
    fn test_parse_rejects() {
        let prefix = "/_compressor";
        assert_eq!(parse("/", prefix), None);
        assert_eq!(parse("/other/bundle/site_v1.css", prefix), None);
        assert_eq!(parse("/_compressor/bundle/site.css", prefix), None);
        assert_eq!(parse("/_compressor/bundle/site_vxyz.css", prefix), None);
        assert_eq!(parse("/_compressor/bundle/", prefix), None);
        assert_eq!(parse("/_compressor/bundle/site/asset/x/", prefix), None);
        assert_eq!(parse("/_compressor/bundle/site/asset/-1/", prefix), None);
        assert_eq!(parse("/_compressor/bundle/site/other/0/", prefix), None);
        assert_eq!(parse("/_compressor/bundle/%FF_v1.css", prefix), None);
    }
}
