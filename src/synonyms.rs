//! Synonym index used by the equivalence test.
//!
//! Each line of a synonym source is one group of interchangeable words. Every
//! word is bound to the group it appeared in; when a word shows up in several
//! groups, the last group read wins.

use serde::Serialize;
use std::collections::HashMap;

use crate::tokenize::split_words;

/// Word -> synonym group mapping.
#[derive(Debug, Clone, Default)]
pub struct SynonymIndex {
    groups: Vec<Vec<String>>,
    bindings: HashMap<String, usize>,
}

/// Size of a synonym index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SynonymStats {
    pub groups: usize,
    pub words: usize,
}

impl SynonymIndex {
    /// Build an index from the lines of a synonym source.
    ///
    /// Empty lines, and lines of spaces that split into no words, are
    /// skipped. Words are split on single spaces and are not deduplicated or
    /// normalized.
    pub fn build<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = SynonymIndex::default();

        for line in lines {
            let words = split_words(line.as_ref());
            if words.is_empty() {
                continue;
            }

            let group: Vec<String> = words.into_iter().map(str::to_owned).collect();
            let group_idx = index.groups.len();
            for word in &group {
                index.bindings.insert(word.clone(), group_idx);
            }
            index.groups.push(group);
        }

        index
    }

    /// The group a word is currently bound to.
    pub fn group(&self, word: &str) -> Option<&[String]> {
        self.bindings
            .get(word)
            .map(|&idx| self.groups[idx].as_slice())
    }

    /// Whether two words are interchangeable.
    ///
    /// Identical strings always are. Otherwise the group of `a` is consulted
    /// first, and only when `a` is unbound the group of `b`.
    pub fn are_equivalent(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }

        if let Some(group) = self.group(a) {
            group.iter().any(|w| w == b)
        } else if let Some(group) = self.group(b) {
            group.iter().any(|w| w == a)
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn stats(&self) -> SynonymStats {
        SynonymStats {
            groups: self.groups.len(),
            words: self.bindings.len(),
        }
    }
}
