// engine.rs - The matching-engine boundary.
//
// A regex object never matches anything itself. It compiles once through an
// `Engine`, then maps the engine's raw `MatchSet` into its own result types.

use std::collections::BTreeMap;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::error::RegexError;
use crate::modifiers::Modifiers;

/// Capture values of one match, index 0 being the whole match.
pub type GroupVec = SmallVec<[Option<String>; 4]>;

/// Capture-name → value mapping. Groups that did not participate are `None`.
pub type NamedGroups = BTreeMap<String, Option<String>>;

bitflags! {
    /// What the caller wants extracted for each match, beyond its offsets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MatchRequest: u8 {
        /// Numbered capture substrings.
        const NUMBERED = 1;
        /// Named capture substrings.
        const NAMED = 1 << 1;
        /// The pattern's name → group-number table.
        const NAME_MAP = 1 << 2;
    }
}

impl MatchRequest {
    /// Offsets only; used by `test`.
    pub const OFFSETS: MatchRequest = MatchRequest::empty();
    /// Everything; used by `exec` and replacement.
    pub const FULL: MatchRequest = MatchRequest::all();
}

/// One match found by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchRecord {
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset where the match ends (exclusive).
    pub end: usize,
    /// Numbered captures; empty unless [`MatchRequest::NUMBERED`] was set.
    pub groups: GroupVec,
    /// Named captures; empty unless [`MatchRequest::NAMED`] was set.
    pub named: NamedGroups,
}

impl MatchRecord {
    /// The whole-match text, when numbered captures were requested.
    pub fn whole(&self) -> Option<&str> {
        self.groups.first().and_then(|g| g.as_deref())
    }

    /// Length of the match in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-length match.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Everything one `Engine::match_at` call found, in subject order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSet {
    /// The matches. At most one unless the call was global.
    pub matches: Vec<MatchRecord>,
    /// Capture name → group number; empty unless [`MatchRequest::NAME_MAP`] was set.
    pub name_to_index: BTreeMap<String, usize>,
}

impl MatchSet {
    /// Number of matches found.
    pub fn count(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// End offsets of every match, in order.
    pub fn end_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.matches.iter().map(|m| m.end)
    }

    /// The first match, if any.
    pub fn first(&self) -> Option<&MatchRecord> {
        self.matches.first()
    }
}

/// A pattern-matching engine a regex object can sit on.
///
/// Offsets are byte offsets into the subject. An engine that cannot fail at
/// match time simply never returns `Err` from `match_at`.
pub trait Engine {
    /// Compiled form of a pattern.
    type Pattern;

    /// Compile `source` with the compile-time part of `modifiers`.
    ///
    /// Must fail with [`RegexError::Compile`] on a malformed pattern.
    fn compile(&self, source: &str, modifiers: Modifiers) -> Result<Self::Pattern, RegexError>;

    /// Search `subject` starting at byte offset `start`.
    ///
    /// With [`Modifiers::GLOBAL`] every non-overlapping match from `start` to
    /// the end is returned; otherwise at most the first one.
    fn match_at(
        &self,
        pattern: &Self::Pattern,
        subject: &str,
        start: usize,
        modifiers: Modifiers,
        request: MatchRequest,
    ) -> Result<MatchSet, RegexError>;

    /// Substitute `template` for the first match (or every match, with
    /// [`Modifiers::GLOBAL`]) of `pattern` in `subject`, scanning from offset 0.
    fn replace_literal(
        &self,
        pattern: &Self::Pattern,
        subject: &str,
        modifiers: Modifiers,
        template: &str,
    ) -> Result<String, RegexError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn record(start: usize, end: usize, whole: &str) -> MatchRecord {
        MatchRecord {
            start,
            end,
            groups: smallvec![Some(whole.to_string())],
            named: NamedGroups::new(),
        }
    }

    #[test]
    fn record_accessors() {
        let m = record(3, 6, "abc");
        assert_eq!(m.whole(), Some("abc"));
        assert_eq!(m.len(), 3);
        assert!(!m.is_empty());
        assert!(record(2, 2, "").is_empty());
    }

    #[test]
    fn offsets_only_record_has_no_whole() {
        let m = MatchRecord {
            start: 0,
            end: 1,
            ..MatchRecord::default()
        };
        assert_eq!(m.whole(), None);
    }

    #[test]
    fn set_end_offsets() {
        let set = MatchSet {
            matches: vec![record(0, 3, "abc"), record(3, 6, "abc")],
            name_to_index: BTreeMap::new(),
        };
        assert_eq!(set.count(), 2);
        assert_eq!(set.end_offsets().collect::<Vec<_>>(), vec![3, 6]);
        assert_eq!(set.first().map(|m| m.start), Some(0));
    }

    #[test]
    fn request_presets() {
        assert!(MatchRequest::OFFSETS.is_empty());
        assert!(MatchRequest::FULL.contains(MatchRequest::NUMBERED | MatchRequest::NAMED));
    }
}
