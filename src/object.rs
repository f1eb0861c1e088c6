// object.rs - Scripting-style regex objects.
//
// A `RegexObject` owns one compiled pattern and a `lastIndex` cursor. The
// cursor is only read and advanced when the object is global; every method
// below states when it writes it.

use std::fmt;

use crate::engine::{Engine, MatchRequest};
use crate::error::RegexError;
use crate::fancy::FancyEngine;
use crate::modifiers::{self, Modifiers, JIT_MODIFIER};
use crate::replace::{splice_with, Replacement};
use crate::result::MatchResult;

/// Anything that exposes a regex source and the three classic boolean flags.
///
/// Used to construct a [`RegexObject`] from another regex-like value.
pub trait RegexLike {
    /// Pattern text.
    fn source(&self) -> &str;
    /// `i` flag.
    fn ignore_case(&self) -> bool;
    /// `m` flag.
    fn multiline(&self) -> bool;
    /// `g` flag.
    fn global(&self) -> bool;
}

/// Outcome of [`RegexObject::match_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Non-global object: the same result `exec` gives.
    Single(MatchResult),
    /// Global object: every whole match, in subject order.
    All(Vec<String>),
}

impl MatchOutcome {
    /// The whole-match strings, one per match.
    pub fn into_strings(self) -> Vec<String> {
        match self {
            MatchOutcome::Single(m) => vec![m.as_str().to_string()],
            MatchOutcome::All(all) => all,
        }
    }
}

/// A compiled pattern plus its modifiers and `lastIndex` cursor.
///
/// # Examples
///
/// ```
/// use regexobj::RegexObject;
///
/// let mut re = RegexObject::new(r"a(b)c", "g").unwrap();
///
/// let first = re.exec("abcabc").unwrap().unwrap();
/// assert_eq!(first.index(), 0);
/// assert_eq!(re.last_index(), 3);
///
/// let second = re.exec("abcabc").unwrap().unwrap();
/// assert_eq!(second.index(), 3);
/// assert_eq!(re.last_index(), 6);
///
/// assert!(re.exec("abcabc").unwrap().is_none());
/// assert_eq!(re.last_index(), 0);
/// ```
pub struct RegexObject<E: Engine = FancyEngine> {
    engine: E,
    pattern: E::Pattern,
    source: String,
    // User modifiers, followed by the JIT hint when the JIT variant added it.
    modifiers: String,
    user_len: usize,
    flags: Modifiers,
    global: bool,
    last_index: usize,
}

impl RegexObject<FancyEngine> {
    /// Compile `source` with `modifiers` on the default engine.
    pub fn new(source: &str, modifiers: &str) -> Result<Self, RegexError> {
        Self::builder(source).modifiers(modifiers).build()
    }

    /// Like [`new`](Self::new), with the engine's JIT hint appended.
    pub fn new_jit(source: &str, modifiers: &str) -> Result<Self, RegexError> {
        Self::builder(source).modifiers(modifiers).jit(true).build()
    }

    /// Copy source and `i`/`m`/`g` flags from another regex-like value.
    pub fn from_regex_like<R: RegexLike + ?Sized>(other: &R) -> Result<Self, RegexError> {
        let mut modifiers = String::new();
        if other.ignore_case() {
            modifiers.push('i');
        }
        if other.multiline() {
            modifiers.push('m');
        }
        if other.global() {
            modifiers.push('g');
        }
        Self::new(other.source(), &modifiers)
    }

    /// Start a [`RegexObjectBuilder`].
    pub fn builder(source: &str) -> RegexObjectBuilder<FancyEngine> {
        RegexObjectBuilder::new(source)
    }
}

impl<E: Engine> RegexObject<E> {
    /// Compile `source` on a specific engine.
    pub fn with_engine(
        engine: E,
        source: &str,
        user_modifiers: &str,
        jit: bool,
    ) -> Result<Self, RegexError> {
        let mut modifiers = user_modifiers.to_string();
        if jit {
            modifiers.push(JIT_MODIFIER);
        }
        let flags = Modifiers::parse(&modifiers)?;
        let pattern = engine.compile(source, flags)?;

        Ok(RegexObject {
            engine,
            pattern,
            source: source.to_string(),
            modifiers,
            user_len: user_modifiers.len(),
            global: flags.is_global(),
            flags,
            last_index: 0,
        })
    }

    // === Queries ===

    /// Whether `subject` matches, searching from `lastIndex` if global.
    ///
    /// On a match a global object moves `lastIndex` to the match end. A
    /// failed search leaves `lastIndex` untouched (unlike [`exec`](Self::exec)).
    pub fn test(&mut self, subject: &str) -> Result<bool, RegexError> {
        let set = self.engine.match_at(
            &self.pattern,
            subject,
            self.start_offset(),
            self.single_modifiers(),
            MatchRequest::OFFSETS,
        )?;
        match set.first() {
            Some(m) => {
                if self.global {
                    self.move_cursor(m.end);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The next match, searching from `lastIndex` if global.
    ///
    /// On a match a global object moves `lastIndex` to the match end. When
    /// nothing matches `lastIndex` is reset to 0.
    pub fn exec(&mut self, subject: &str) -> Result<Option<MatchResult>, RegexError> {
        let set = self.engine.match_at(
            &self.pattern,
            subject,
            self.start_offset(),
            self.single_modifiers(),
            MatchRequest::FULL,
        )?;
        match set.matches.into_iter().next() {
            Some(record) => {
                if self.global {
                    self.move_cursor(record.end);
                }
                Ok(Some(MatchResult::from_record(record, subject)))
            }
            None => {
                self.move_cursor(0);
                Ok(None)
            }
        }
    }

    /// Every match of a global object, or the `exec` result otherwise.
    ///
    /// A global object always scans from offset 0, whatever `lastIndex` is,
    /// and does not move `lastIndex` while scanning. If nothing matches,
    /// `lastIndex` is reset to 0.
    pub fn match_all(&mut self, subject: &str) -> Result<Option<MatchOutcome>, RegexError> {
        if !self.global {
            return Ok(self.exec(subject)?.map(MatchOutcome::Single));
        }

        let set = self.engine.match_at(
            &self.pattern,
            subject,
            0,
            Modifiers::GLOBAL,
            MatchRequest::NUMBERED,
        )?;
        if set.is_empty() {
            self.move_cursor(0);
            return Ok(None);
        }

        let all = set
            .matches
            .iter()
            .map(|m| m.whole().unwrap_or(&subject[m.start..m.end]).to_string())
            .collect();
        Ok(Some(MatchOutcome::All(all)))
    }

    /// Replace the first match, or every match when the modifiers contain `g`.
    ///
    /// Scans from offset 0 and never touches `lastIndex`. A failing callback
    /// aborts the call with [`RegexError::Callback`].
    pub fn replace<'r>(
        &self,
        subject: &str,
        replacement: impl Into<Replacement<'r>>,
    ) -> Result<String, RegexError> {
        match replacement.into() {
            Replacement::Literal(template) => {
                self.engine
                    .replace_literal(&self.pattern, subject, self.flags, template)
            }
            Replacement::Callback(mut callback) => {
                let set = self.engine.match_at(
                    &self.pattern,
                    subject,
                    0,
                    self.flags,
                    MatchRequest::FULL,
                )?;
                splice_with(subject, &set, |args| callback(args))
            }
        }
    }

    // === Introspection ===

    /// Pattern text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// User modifiers, with `g` appended if global and not already present.
    pub fn flags(&self) -> String {
        let mut flags = self.user_modifiers().to_string();
        if self.global && !flags.contains('g') {
            flags.push('g');
        }
        flags
    }

    /// The stored modifier string, engine hints included.
    pub fn modifiers(&self) -> &str {
        &self.modifiers
    }

    /// Modifiers as given by the caller.
    pub fn user_modifiers(&self) -> &str {
        &self.modifiers[..self.user_len]
    }

    /// Parsed modifiers.
    pub fn modifier_flags(&self) -> Modifiers {
        self.flags
    }

    /// Whether every character of `wanted` is in the stored modifier string.
    pub fn has_modifier(&self, wanted: &str) -> bool {
        modifiers::has_all(&self.modifiers, wanted)
    }

    /// `g` modifier.
    pub fn global(&self) -> bool {
        self.modifiers.contains('g')
    }

    /// `i` modifier.
    pub fn ignore_case(&self) -> bool {
        self.modifiers.contains('i')
    }

    /// `m` modifier.
    pub fn multiline(&self) -> bool {
        self.modifiers.contains('m')
    }

    /// Always `false`: there is no sticky mode.
    pub fn sticky(&self) -> bool {
        false
    }

    /// The cursor global searches resume from.
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// Set the cursor. Negative values are clamped to 0; returns the stored value.
    pub fn set_last_index(&mut self, value: i64) -> usize {
        let clamped = usize::try_from(value.max(0)).unwrap_or(usize::MAX);
        self.move_cursor(clamped);
        clamped
    }

    /// The compiled pattern.
    pub fn pattern(&self) -> &E::Pattern {
        &self.pattern
    }

    /// The engine this object matches with.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn start_offset(&self) -> usize {
        if self.global {
            self.last_index
        } else {
            0
        }
    }

    // Single-match queries only ever read the first match.
    fn single_modifiers(&self) -> Modifiers {
        self.flags.difference(Modifiers::GLOBAL)
    }

    fn move_cursor(&mut self, to: usize) {
        if self.last_index != to {
            log::trace!("/{}/ lastIndex {} -> {}", self.source, self.last_index, to);
        }
        self.last_index = to;
    }
}

impl<E: Engine> fmt::Display for RegexObject<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.user_modifiers())
    }
}

impl<E: Engine> fmt::Debug for RegexObject<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexObject")
            .field("source", &self.source)
            .field("modifiers", &self.modifiers)
            .field("last_index", &self.last_index)
            .finish_non_exhaustive()
    }
}

impl<E: Engine> RegexLike for RegexObject<E> {
    fn source(&self) -> &str {
        &self.source
    }

    fn ignore_case(&self) -> bool {
        self.modifiers.contains('i')
    }

    fn multiline(&self) -> bool {
        self.modifiers.contains('m')
    }

    fn global(&self) -> bool {
        self.global
    }
}

// === RegexObjectBuilder ===

/// Builder for a [`RegexObject`] with a custom engine or the JIT hint.
///
/// ```
/// use regexobj::{EngineConfig, FancyEngine, RegexObject};
///
/// let re = RegexObject::builder(r"\w+")
///     .modifiers("gi")
///     .engine(FancyEngine::with_config(EngineConfig {
///         backtrack_limit: Some(10_000),
///         ..EngineConfig::default()
///     }))
///     .build()
///     .unwrap();
/// assert_eq!(re.to_string(), r"/\w+/gi");
/// ```
#[derive(Debug, Clone)]
pub struct RegexObjectBuilder<E = FancyEngine> {
    source: String,
    modifiers: String,
    jit: bool,
    engine: E,
}

impl RegexObjectBuilder<FancyEngine> {
    /// Builder for `source` on the default engine, no modifiers.
    pub fn new(source: &str) -> Self {
        RegexObjectBuilder {
            source: source.to_string(),
            modifiers: String::new(),
            jit: false,
            engine: FancyEngine::default(),
        }
    }
}

impl<E: Engine> RegexObjectBuilder<E> {
    /// Set the modifier string (e.g. `"gim"`).
    pub fn modifiers(mut self, modifiers: &str) -> Self {
        self.modifiers = modifiers.to_string();
        self
    }

    /// Append the engine's JIT hint to the modifiers.
    pub fn jit(mut self, yes: bool) -> Self {
        self.jit = yes;
        self
    }

    /// Match with `engine` instead.
    pub fn engine<F: Engine>(self, engine: F) -> RegexObjectBuilder<F> {
        RegexObjectBuilder {
            source: self.source,
            modifiers: self.modifiers,
            jit: self.jit,
            engine,
        }
    }

    /// Compile. Fails with [`RegexError::Compile`] on a bad pattern or modifier.
    pub fn build(self) -> Result<RegexObject<E>, RegexError> {
        RegexObject::with_engine(self.engine, &self.source, &self.modifiers, self.jit)
    }
}
