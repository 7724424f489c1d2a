use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

// The only origins the proxy will fetch from. Fixed at compile time.
pub const ALLOWED_DOMAINS: &[&str] = &["cdn.slateai.org"];

lazy_static! {
    // alphanumeric/dash/underscore/dot name with an approved extension;
    // path separators cannot match
    static ref FILENAME_RE: Regex =
        Regex::new(r"(?i)^[A-Za-z0-9\-_.]+\.(png|jpg|jpeg|svg|pdf)$").unwrap();
}

pub fn default_allowed_domains() -> Vec<String> {
    ALLOWED_DOMAINS.iter().map(|d| (*d).to_string()).collect()
}

// Hostname must match an allow-list entry exactly. Unparseable URLs are
// treated as not allowed; path and query never influence the decision.
pub fn is_allowed_domain(raw_url: &str, allowed: &[String]) -> bool {
    match Url::parse(raw_url) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| allowed.iter().any(|domain| domain == host))
            .unwrap_or(false),
        Err(_) => false,
    }
}

pub fn is_valid_filename(filename: &str) -> bool {
    FILENAME_RE.is_match(filename)
}
