//! Lexical authority (netloc) split, the same generic split the training data went through.
//! Userinfo and port stay attached; nothing is case-folded or percent-decoded.

use std::net::Ipv6Addr;

/// Raw authority component of `url`, or `""` when there is none or it is unparseable.
pub fn authority(url: &str) -> String {
    let cleaned: String = url
        .trim_start_matches(|c: char| c <= '\u{20}')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let rest = strip_scheme(&cleaned);
    let Some(after) = rest.strip_prefix("//") else {
        return String::new();
    };
    let end = after.find(['/', '?', '#']).unwrap_or(after.len());
    let netloc = &after[..end];

    if !brackets_valid(netloc) {
        return String::new();
    }
    netloc.to_string()
}

/// Drop `scheme:` when the prefix before the first ':' is a syntactically valid scheme.
fn strip_scheme(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    let mut chars = url[..colon].chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return url,
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        &url[colon + 1..]
    } else {
        url
    }
}

/// IPv6 literal brackets must balance and wrap a real address (or IPvFuture) at the host start.
fn brackets_valid(netloc: &str) -> bool {
    let open = netloc.contains('[');
    if open != netloc.contains(']') {
        return false;
    }
    if !open {
        return true;
    }

    let host_port = netloc.rsplit_once('@').map_or(netloc, |(_, hp)| hp);
    let Some((before, bracketed)) = host_port.split_once('[') else {
        return true;
    };
    if !before.is_empty() {
        return false;
    }
    let (host, port) = bracketed.split_once(']').unwrap_or((bracketed, ""));
    if !port.is_empty() && !port.starts_with(':') {
        return false;
    }
    is_ipvfuture(host) || host.parse::<Ipv6Addr>().is_ok()
}

fn is_ipvfuture(host: &str) -> bool {
    let Some(rest) = host.strip_prefix('v') else {
        return false;
    };
    match rest.split_once('.') {
        Some((version, tail)) => {
            !version.is_empty() && version.chars().all(|c| c.is_ascii_hexdigit()) && !tail.is_empty()
        }
        None => false,
    }
}
