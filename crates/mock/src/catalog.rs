//! Static franchise/store catalog and the name filter applied to it.

use regex::Regex;

use crate::error::Result;
use crate::types::{Franchise, Store};

/// The read-only franchise fixture. No mock route ever mutates it; the
/// filtering route only narrows it by name.
pub fn default_catalog() -> Vec<Franchise> {
    vec![
        Franchise {
            id: 2,
            name: "LotaPizza".into(),
            stores: vec![
                Store { id: 4, name: "Lehi".into() },
                Store { id: 5, name: "Springville".into() },
                Store { id: 6, name: "American Fork".into() },
            ],
        },
        Franchise {
            id: 3,
            name: "PizzaCorp".into(),
            stores: vec![Store { id: 7, name: "Spanish Fork".into() }],
        },
        Franchise {
            id: 4,
            name: "topSpot".into(),
            stores: vec![],
        },
    ]
}

/// Translate a `*`-wildcard pattern into an anchored, case-folded regex.
///
/// Every regex metacharacter except `*` is escaped and `*` becomes `.*`,
/// anchored at both ends: `l` matches only the literal name "l", while
/// `*l*` matches any name containing an `l`. Anchoring is what makes the
/// dashboard filter hide non-matching rows instead of substring-matching
/// everything.
pub fn wildcard_to_regex(pattern: &str) -> Result<Regex> {
    let body = pattern
        .to_lowercase()
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Ok(Regex::new(&format!("^{body}$"))?)
}

/// Franchises whose lowercased name matches the wildcard pattern, each
/// with its nested store list intact.
pub fn filter(catalog: &[Franchise], pattern: &str) -> Result<Vec<Franchise>> {
    let re = wildcard_to_regex(pattern)?;
    Ok(catalog
        .iter()
        .filter(|f| re.is_match(&f.name.to_lowercase()))
        .cloned()
        .collect())
}
