//! Sibling comparers: the total order a folder's children are stored in.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Order used to keep siblings sorted and name-unique.
///
/// Two names comparing `Equal` are the same name as far as the namespace is
/// concerned, so implementations must be a total order.
pub trait SiblingComparer: Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Ordinal comparison after upper-casing each character.
///
/// Only one-to-one case mappings apply; a character whose uppercase form is
/// several characters (`ß`) compares as itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveOrdinal;

fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

impl SiblingComparer for CaseInsensitiveOrdinal {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.chars()
            .map(simple_uppercase)
            .cmp(b.chars().map(simple_uppercase))
    }
}

/// Plain byte-wise ordinal comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ordinal;

impl SiblingComparer for Ordinal {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// Configurable choice of built-in comparer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparerKind {
    #[default]
    CaseInsensitive,
    Ordinal,
}

impl ComparerKind {
    pub fn build(self) -> Box<dyn SiblingComparer> {
        match self {
            ComparerKind::CaseInsensitive => Box::new(CaseInsensitiveOrdinal),
            ComparerKind::Ordinal => Box::new(Ordinal),
        }
    }
}
