//! Brand classification from listing-code prefixes.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    #[serde(rename = "Qurvii+")]
    QurviiPlus,
    Roadstar,
    #[serde(rename = "Qurvii Desi")]
    QurviiDesi,
    Qurvii,
}

impl Brand {
    pub fn as_str(self) -> &'static str {
        match self {
            Brand::QurviiPlus => "Qurvii+",
            Brand::Roadstar => "Roadstar",
            Brand::QurviiDesi => "Qurvii Desi",
            Brand::Qurvii => "Qurvii",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type BrandRule = (fn(&str) -> bool, Brand);

/// Evaluated top to bottom, first match wins. Prefixes overlap under naive
/// matching, so the order here is the rule.
const BRAND_RULES: [BrandRule; 3] = [
    (|code| code.starts_with('8') || code.starts_with('5'), Brand::QurviiPlus),
    (|code| code.starts_with(['r', 'R']), Brand::Roadstar),
    (|code| code.starts_with("24"), Brand::QurviiDesi),
];

const DEFAULT_BRAND: Brand = Brand::Qurvii;

pub fn classify_brand(code: &str) -> Brand {
    let code = code.trim_start();
    BRAND_RULES
        .iter()
        .find(|(matches, _)| matches(code))
        .map(|(_, brand)| *brand)
        .unwrap_or(DEFAULT_BRAND)
}
