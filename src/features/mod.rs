//! Lexical URL feature extraction: raw URL string → fixed-order 10-dim vector.

mod authority;
mod lexical;

pub use authority::authority;
pub use lexical::extract;

use serde::{Deserialize, Serialize};

/// Number of features the classifier was trained on
pub const FEATURE_COUNT: usize = 10;

/// Trained column names, in model input order. Reordering corrupts predictions.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "URL_Length",
    "Num_Dots",
    "Num_Hyphens",
    "Num_Underscores",
    "Has_At",
    "Has_Tilde",
    "Num_Digits",
    "Num_Subdomains",
    "Has_IP",
    "HTTPS",
];

/// One record per input URL. Flags are 0.0 / 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "URL_Length")]
    pub url_length: f64,
    #[serde(rename = "Num_Dots")]
    pub num_dots: f64,
    #[serde(rename = "Num_Hyphens")]
    pub num_hyphens: f64,
    #[serde(rename = "Num_Underscores")]
    pub num_underscores: f64,
    #[serde(rename = "Has_At")]
    pub has_at: f64,
    #[serde(rename = "Has_Tilde")]
    pub has_tilde: f64,
    #[serde(rename = "Num_Digits")]
    pub num_digits: f64,
    #[serde(rename = "Num_Subdomains")]
    pub num_subdomains: f64,
    #[serde(rename = "Has_IP")]
    pub has_ip: f64,
    #[serde(rename = "HTTPS")]
    pub https: f64,
}

impl FeatureVector {
    /// Values in [`FEATURE_NAMES`] order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.url_length,
            self.num_dots,
            self.num_hyphens,
            self.num_underscores,
            self.has_at,
            self.has_tilde,
            self.num_digits,
            self.num_subdomains,
            self.has_ip,
            self.https,
        ]
    }
}
