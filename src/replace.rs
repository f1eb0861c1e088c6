// replace.rs - Replacement values and callback-driven substitution.

use std::fmt;

use crate::engine::{MatchRecord, MatchSet, NamedGroups};
use crate::error::{CallbackError, RegexError};

type Callback<'r> = dyn FnMut(&ReplacerArgs<'_>) -> Result<String, CallbackError> + 'r;

/// What to substitute for each match in [`RegexObject::replace`].
///
/// The variant is chosen once, when the value is built.
///
/// [`RegexObject::replace`]: crate::RegexObject::replace
pub enum Replacement<'r> {
    /// A template that may reference groups (`$1`, `${name}`, `$$`, ...).
    Literal(&'r str),
    /// A function producing the replacement for each match.
    Callback(Box<Callback<'r>>),
}

impl<'r> Replacement<'r> {
    /// A literal template.
    pub fn literal(template: &'r str) -> Self {
        Replacement::Literal(template)
    }

    /// A callback. An `Err` aborts the whole replace call.
    ///
    /// ```
    /// use regexobj::{RegexObject, Replacement};
    ///
    /// let re = RegexObject::new(r"\d+", "g").unwrap();
    /// let out = re
    ///     .replace("1 2 3", Replacement::callback(|args| {
    ///         Ok((args.whole().parse::<u32>().unwrap() * 10).to_string())
    ///     }))
    ///     .unwrap();
    /// assert_eq!(out, "10 20 30");
    /// ```
    pub fn callback<F>(f: F) -> Self
    where
        F: FnMut(&ReplacerArgs<'_>) -> Result<String, CallbackError> + 'r,
    {
        Replacement::Callback(Box::new(f))
    }
}

impl<'r> From<&'r str> for Replacement<'r> {
    fn from(template: &'r str) -> Self {
        Replacement::Literal(template)
    }
}

impl<'r> From<&'r String> for Replacement<'r> {
    fn from(template: &'r String) -> Self {
        Replacement::Literal(template.as_str())
    }
}

impl fmt::Debug for Replacement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Literal(t) => f.debug_tuple("Literal").field(t).finish(),
            Replacement::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Arguments handed to a replacement callback for one match.
///
/// Mirrors the scripting-language argument list
/// `(match, p1, ..., pn, offset, subject, groups)`.
#[derive(Debug, Clone, Copy)]
pub struct ReplacerArgs<'a> {
    record: &'a MatchRecord,
    subject: &'a str,
}

impl<'a> ReplacerArgs<'a> {
    /// The whole match.
    pub fn whole(&self) -> &'a str {
        &self.subject[self.record.start..self.record.end]
    }

    /// Capture groups 1..=n, in order. `None` for groups that did not participate.
    pub fn captures(&self) -> &'a [Option<String>] {
        self.record.groups.get(1..).unwrap_or(&[])
    }

    /// Capture group `i` (1-based; 0 is the whole match).
    pub fn get(&self, i: usize) -> Option<&'a str> {
        if i == 0 {
            return Some(self.whole());
        }
        self.record.groups.get(i).and_then(|g| g.as_deref())
    }

    /// Byte offset of the match start in the subject.
    pub fn offset(&self) -> usize {
        self.record.start
    }

    /// The complete subject.
    pub fn subject(&self) -> &'a str {
        self.subject
    }

    /// Named capture groups.
    pub fn named_groups(&self) -> &'a NamedGroups {
        &self.record.named
    }

    /// Named capture group `name`.
    pub fn name(&self, name: &str) -> Option<&'a str> {
        self.record.named.get(name).and_then(|g| g.as_deref())
    }
}

/// Splice callback results into `subject` at every match in `set`.
///
/// The output is only returned once every callback has succeeded.
pub(crate) fn splice_with<F>(subject: &str, set: &MatchSet, mut f: F) -> Result<String, RegexError>
where
    F: FnMut(&ReplacerArgs<'_>) -> Result<String, CallbackError>,
{
    let mut out = String::with_capacity(subject.len());
    let mut last = 0;
    for record in &set.matches {
        let args = ReplacerArgs { record, subject };
        let replacement = f(&args).map_err(|err| {
            log::debug!("replacement callback failed at offset {}: {}", record.start, err);
            RegexError::Callback(err)
        })?;
        out.push_str(&subject[last..record.start]);
        out.push_str(&replacement);
        last = record.end;
    }
    out.push_str(&subject[last..]);
    Ok(out)
}
