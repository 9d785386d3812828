//! Cosmetic decorations unlocked by rare-form discovery

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// Decoration tag, e.g. "crown"
///
/// The set of tags is open: rare-form tables may introduce new ones, and the
/// display collaborator ignores tags it has no geometry for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decoration(Cow<'static, str>);

impl Decoration {
    pub const CROWN: Decoration = Decoration(Cow::Borrowed("crown"));
    pub const HALO: Decoration = Decoration(Cow::Borrowed("halo"));
    pub const SPARKLES: Decoration = Decoration(Cow::Borrowed("sparkles"));

    /// Create a tag from any string
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only, insertion-ordered set of earned decorations
///
/// There is no removal: once earned, a decoration stays for the session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Decoration>", into = "Vec<Decoration>")]
pub struct DecorationSet {
    items: SmallVec<[Decoration; 4]>,
}

impl DecorationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decoration; returns false if it was already present
    pub fn insert(&mut self, decoration: Decoration) -> bool {
        if self.contains(&decoration) {
            return false;
        }
        self.items.push(decoration);
        true
    }

    pub fn contains(&self, decoration: &Decoration) -> bool {
        self.items.iter().any(|d| d == decoration)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<Decoration>> for DecorationSet {
    fn from(items: Vec<Decoration>) -> Self {
        let mut set = DecorationSet::new();
        for item in items {
            set.insert(item);
        }
        set
    }
}

impl From<DecorationSet> for Vec<Decoration> {
    fn from(set: DecorationSet) -> Self {
        set.items.into_vec()
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
