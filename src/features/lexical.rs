//! Character-count features over the whole URL plus host-derived flags.

use super::{authority, FeatureVector};
use regex::Regex;
use std::sync::OnceLock;

static DOTTED_QUAD: OnceLock<Regex> = OnceLock::new();

fn dotted_quad() -> &'static Regex {
    DOTTED_QUAD.get_or_init(|| {
        Regex::new(r"^[0-9]{1,3}(\.[0-9]{1,3}){3}$").expect("static dotted-quad pattern")
    })
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Extract the feature vector for `url`. Never fails: an unparseable host degrades
/// to Num_Subdomains = 0 and Has_IP = 0.
pub fn extract(url: &str) -> FeatureVector {
    let mut length = 0u32;
    let mut dots = 0u32;
    let mut hyphens = 0u32;
    let mut underscores = 0u32;
    let mut digits = 0u32;
    let mut has_at = false;
    let mut has_tilde = false;

    for c in url.chars() {
        length += 1;
        match c {
            '.' => dots += 1,
            '-' => hyphens += 1,
            '_' => underscores += 1,
            '@' => has_at = true,
            '~' => has_tilde = true,
            c if c.is_ascii_digit() => digits += 1,
            _ => {}
        }
    }

    let host = authority(url);
    let subdomains = host.matches('.').count();

    FeatureVector {
        url_length: length as f64,
        num_dots: dots as f64,
        num_hyphens: hyphens as f64,
        num_underscores: underscores as f64,
        has_at: flag(has_at),
        has_tilde: flag(has_tilde),
        num_digits: digits as f64,
        num_subdomains: subdomains as f64,
        has_ip: flag(dotted_quad().is_match(&host)),
        // Lexical and case-sensitive on purpose: "HTTPS://" is 0 for the trained model.
        https: flag(url.starts_with("https://")),
    }
}
