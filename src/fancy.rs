// fancy.rs - Default engine binding, backed by the `fancy-regex` crate.
//
// fancy-regex supports backreferences and look-around on top of the `regex`
// crate, which covers the Perl-style patterns regex objects are written in.
// Compile-time modifiers are applied as a leading inline-flag group.

use std::collections::BTreeMap;

use fancy_regex::{Captures, Regex, RegexBuilder};

use crate::engine::{Engine, GroupVec, MatchRecord, MatchRequest, MatchSet, NamedGroups};
use crate::error::RegexError;
use crate::modifiers::Modifiers;
use crate::template::Template;

/// Tuning knobs for [`FancyEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Maximum backtracking steps per match attempt. `None` keeps the
    /// fancy-regex default.
    pub backtrack_limit: Option<usize>,
    /// Size limit for the compiled automata of delegated sub-patterns.
    pub delegate_size_limit: Option<usize>,
}

/// A pattern compiled by [`FancyEngine`].
#[derive(Debug, Clone)]
pub struct FancyPattern {
    regex: Regex,
    name_to_index: BTreeMap<String, usize>,
}

impl FancyPattern {
    /// Number of groups, including group 0.
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len()
    }

    /// The capture-name table.
    pub fn name_to_index(&self) -> &BTreeMap<String, usize> {
        &self.name_to_index
    }

    /// The pattern as handed to fancy-regex, inline flags included.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// The default [`Engine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FancyEngine {
    config: EngineConfig,
}

impl FancyEngine {
    /// Engine with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with explicit limits.
    pub fn with_config(config: EngineConfig) -> Self {
        FancyEngine { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run `f` on every match from `start`; stop after the first one unless
    /// `global`.
    fn scan<F>(
        &self,
        pattern: &FancyPattern,
        subject: &str,
        start: usize,
        global: bool,
        mut f: F,
    ) -> Result<(), RegexError>
    where
        F: FnMut(&Captures<'_>),
    {
        if start > subject.len() || !subject.is_char_boundary(start) {
            log::trace!("start offset {} is not a valid position, no match", start);
            return Ok(());
        }

        let mut pos = start;
        // End of the previous match, when that match was empty.
        let mut empty_at: Option<usize> = None;

        loop {
            let caps = pattern
                .regex
                .captures_from_pos(subject, pos)
                .map_err(|e| {
                    log::debug!("engine failure on /{}/: {}", pattern.as_str(), e);
                    RegexError::matching(e.to_string())
                })?;
            let Some(caps) = caps else { break };
            let Some(whole) = caps.get(0) else { break };

            if whole.start() == whole.end() && empty_at == Some(whole.start()) {
                // Same empty match again: step over one character.
                match subject[pos..].chars().next() {
                    Some(c) => {
                        pos += c.len_utf8();
                        continue;
                    }
                    None => break,
                }
            }

            f(&caps);
            if !global {
                break;
            }
            empty_at = (whole.start() == whole.end()).then_some(whole.end());
            pos = whole.end();
        }
        Ok(())
    }

    fn record(pattern: &FancyPattern, caps: &Captures<'_>, request: MatchRequest) -> MatchRecord {
        let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));

        let groups: GroupVec = if request.contains(MatchRequest::NUMBERED) {
            (0..caps.len())
                .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
                .collect()
        } else {
            GroupVec::new()
        };

        let named: NamedGroups = if request.contains(MatchRequest::NAMED) {
            pattern
                .name_to_index
                .iter()
                .map(|(name, &i)| (name.clone(), caps.get(i).map(|m| m.as_str().to_string())))
                .collect()
        } else {
            NamedGroups::new()
        };

        MatchRecord {
            start,
            end,
            groups,
            named,
        }
    }
}

impl Engine for FancyEngine {
    type Pattern = FancyPattern;

    fn compile(&self, source: &str, modifiers: Modifiers) -> Result<FancyPattern, RegexError> {
        let full = format!("{}{}", modifiers.inline_group(), source);

        let mut builder = RegexBuilder::new(&full);
        if let Some(limit) = self.config.backtrack_limit {
            builder.backtrack_limit(limit);
        }
        if let Some(limit) = self.config.delegate_size_limit {
            builder.delegate_size_limit(limit);
        }
        let regex = builder.build().map_err(|e| {
            log::debug!("failed to compile /{}/: {}", source, e);
            RegexError::compile(e.to_string())
        })?;

        let name_to_index = regex
            .capture_names()
            .enumerate()
            .filter_map(|(i, name)| name.map(|n| (n.to_string(), i)))
            .collect();

        log::debug!(
            "compiled /{}/ ({} groups)",
            source,
            regex.captures_len()
        );
        Ok(FancyPattern {
            regex,
            name_to_index,
        })
    }

    fn match_at(
        &self,
        pattern: &FancyPattern,
        subject: &str,
        start: usize,
        modifiers: Modifiers,
        request: MatchRequest,
    ) -> Result<MatchSet, RegexError> {
        let mut matches = Vec::new();
        self.scan(pattern, subject, start, modifiers.is_global(), |caps| {
            matches.push(Self::record(pattern, caps, request));
        })?;

        let name_to_index = if request.contains(MatchRequest::NAME_MAP) {
            pattern.name_to_index.clone()
        } else {
            BTreeMap::new()
        };
        Ok(MatchSet {
            matches,
            name_to_index,
        })
    }

    fn replace_literal(
        &self,
        pattern: &FancyPattern,
        subject: &str,
        modifiers: Modifiers,
        template: &str,
    ) -> Result<String, RegexError> {
        let template = Template::parse(template)?;
        template.validate(pattern.captures_len(), &pattern.name_to_index)?;

        let request = MatchRequest::NUMBERED | MatchRequest::NAMED;
        let mut out = String::with_capacity(subject.len());
        let mut last = 0;
        self.scan(pattern, subject, 0, modifiers.is_global(), |caps| {
            let record = Self::record(pattern, caps, request);
            out.push_str(&subject[last..record.start]);
            template.expand(&record, &mut out);
            last = record.end;
        })?;
        out.push_str(&subject[last..]);
        Ok(out)
    }
}
