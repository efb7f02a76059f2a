//! Turning user input into absolute inspection targets

const SC_DOMAIN_PREFIX: &str = "sc-domain:";

/// One URL per line, trimmed, blank lines dropped.
pub fn parse_url_list(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve `raw` against the property `site_url`.
///
/// - `http://` / `https://` URLs pass through unchanged.
/// - Input starting with the property's host (`example.com/a`) gets the
///   property's scheme.
/// - Anything else is a path joined to the property URL with exactly one `/`.
///
/// Domain properties (`sc-domain:example.com`) resolve against
/// `https://example.com`.
pub fn normalize_url(raw: &str, site_url: &str) -> String {
    let raw = raw.trim();
    if has_http_scheme(raw) {
        return raw.to_string();
    }

    let base = property_base(site_url);
    let (scheme, rest) = split_scheme(&base);
    let host = rest.split('/').next().unwrap_or("");

    if !host.is_empty() && starts_with_host(raw, host) {
        return format!("{scheme}{raw}");
    }

    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        raw.trim_start_matches('/')
    )
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn property_base(site_url: &str) -> String {
    match site_url.strip_prefix(SC_DOMAIN_PREFIX) {
        Some(domain) => format!("https://{}", domain.trim_matches('/')),
        None => site_url.to_string(),
    }
}

fn split_scheme(base: &str) -> (&str, &str) {
    match base.find("://") {
        Some(idx) => base.split_at(idx + 3),
        None => ("https://", base),
    }
}

fn starts_with_host(raw: &str, host: &str) -> bool {
    match raw.get(..host.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(host) => {
            matches!(raw[host.len()..].chars().next(), None | Some('/' | '?' | '#'))
        }
        _ => false,
    }
}
