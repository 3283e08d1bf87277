//! `Link` header handling for page-numbered GitHub listings

use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

/// One `<url>; param=value; ...` entry of a Link header
static LINK_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(?P<url>[^>]+)>(?P<params>(?:\s*;\s*[^;,]*)*)"#).expect("link pattern is valid")
});

/// A `rel` parameter, quoted or bare
static REL_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*rel\s*=\s*"?(?P<rel>[^";]*)"?\s*$"#).expect("rel pattern is valid")
});

fn has_rel(params: &str, wanted: &str) -> bool {
    params
        .split(';')
        .filter_map(|param| REL_PARAM.captures(param))
        .any(|caps| caps["rel"].split_whitespace().any(|rel| rel.eq_ignore_ascii_case(wanted)))
}

/// Page number of the `rel="next"` link, if the header advertises one
pub fn next_page(link_header: &str) -> Option<u32> {
    LINK_ENTRY
        .captures_iter(link_header)
        .find(|caps| has_rel(&caps["params"], "next"))
        .and_then(|caps| Url::parse(&caps["url"]).ok())
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
}
