// result.rs - Owned match results handed back to callers.
//
// Results are plain values: they own copies of every captured substring and
// of the subject, so later cursor changes on the regex object cannot affect
// them.

use std::ops::Range;

use crate::engine::{GroupVec, MatchRecord, NamedGroups};

/// Result of a successful `exec`.
///
/// # Examples
///
/// ```
/// use regexobj::RegexObject;
///
/// let mut re = RegexObject::new(r"a(b)c", "g").unwrap();
/// let m = re.exec("xabc").unwrap().unwrap();
/// assert_eq!(m.as_str(), "abc");
/// assert_eq!(m.get(1), Some("b"));
/// assert_eq!(m.index(), 1);
/// assert_eq!(m.input(), "xabc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    groups: GroupVec,
    named: NamedGroups,
    index: usize,
    input: String,
}

impl MatchResult {
    pub(crate) fn from_record(record: MatchRecord, input: &str) -> MatchResult {
        let MatchRecord {
            start,
            end,
            groups,
            named,
        } = record;
        let index = match groups.first() {
            Some(Some(whole)) => end - whole.len(),
            _ => start,
        };
        MatchResult {
            groups,
            named,
            index,
            input: input.to_string(),
        }
    }

    /// The whole match (group 0).
    pub fn as_str(&self) -> &str {
        self.get(0).unwrap_or("")
    }

    /// Capture group `i`, or `None` if it did not participate or does not exist.
    pub fn get(&self, i: usize) -> Option<&str> {
        self.groups.get(i).and_then(|g| g.as_deref())
    }

    /// Every group in order, index 0 being the whole match.
    pub fn groups(&self) -> &[Option<String>] {
        &self.groups
    }

    /// Named capture group `name`, or `None` if it did not participate or
    /// does not exist.
    pub fn name(&self, name: &str) -> Option<&str> {
        self.named.get(name).and_then(|g| g.as_deref())
    }

    /// Named groups, keyed by capture name.
    pub fn named_groups(&self) -> &NamedGroups {
        &self.named
    }

    /// Alias of [`named_groups`](Self::named_groups), under the key name
    /// older bindings used.
    pub fn named(&self) -> &NamedGroups {
        &self.named
    }

    /// Byte offset of the match start within [`input`](Self::input).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Byte offset just past the match.
    pub fn end(&self) -> usize {
        self.index + self.as_str().len()
    }

    /// Byte range of the whole match.
    pub fn range(&self) -> Range<usize> {
        self.index..self.end()
    }

    /// The subject the match was found in.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Number of groups, including group 0.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no groups (never the case for a real match).
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn sample() -> MatchResult {
        let mut named = NamedGroups::new();
        named.insert("mid".to_string(), Some("b".to_string()));
        named.insert("tail".to_string(), None);
        let record = MatchRecord {
            start: 3,
            end: 6,
            groups: smallvec![Some("abc".to_string()), Some("b".to_string()), None],
            named,
        };
        MatchResult::from_record(record, "abcabc")
    }

    #[test]
    fn offsets_from_end_and_length() {
        let m = sample();
        assert_eq!(m.index(), 3);
        assert_eq!(m.end(), 6);
        assert_eq!(m.range(), 3..6);
    }

    #[test]
    fn group_access() {
        let m = sample();
        assert_eq!(m.as_str(), "abc");
        assert_eq!(m.get(1), Some("b"));
        assert_eq!(m.get(2), None);
        assert_eq!(m.get(9), None);
        assert_eq!(m.len(), 3);
        assert!(!m.is_empty());
    }

    #[test]
    fn named_aliases_agree() {
        let m = sample();
        assert_eq!(m.name("mid"), Some("b"));
        assert_eq!(m.name("tail"), None);
        assert_eq!(m.named(), m.named_groups());
        assert_eq!(m.named_groups().len(), 2);
    }

    #[test]
    fn input_is_owned_copy() {
        let subject = String::from("abcabc");
        let m = {
            let record = MatchRecord {
                start: 0,
                end: 3,
                groups: smallvec![Some("abc".to_string())],
                named: NamedGroups::new(),
            };
            MatchResult::from_record(record, &subject)
        };
        drop(subject);
        assert_eq!(m.input(), "abcabc");
    }
}
