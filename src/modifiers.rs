// modifiers.rs - Modifier strings ("gim", "iS", ...) and their typed form.

use bitflags::bitflags;

use crate::error::RegexError;

bitflags! {
    /// Matching options parsed from a modifier string.
    ///
    /// | Char | Flag |
    /// |------|------|
    /// | `i` | [`IGNORE_CASE`](Modifiers::IGNORE_CASE) |
    /// | `m` | [`MULTILINE`](Modifiers::MULTILINE) |
    /// | `s` | [`DOT_ALL`](Modifiers::DOT_ALL) |
    /// | `x` | [`EXTENDED`](Modifiers::EXTENDED) |
    /// | `g` | [`GLOBAL`](Modifiers::GLOBAL) |
    /// | `S` | [`JIT`](Modifiers::JIT) |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Case-insensitive matching.
        const IGNORE_CASE = 1;
        /// `^` and `$` match at line boundaries.
        const MULTILINE = 1 << 1;
        /// `.` also matches `\n`.
        const DOT_ALL = 1 << 2;
        /// Whitespace and `#` comments in the pattern are ignored.
        const EXTENDED = 1 << 3;
        /// Find every match instead of the first one.
        const GLOBAL = 1 << 4;
        /// Performance hint for the engine. Never changes what matches.
        const JIT = 1 << 5;
    }
}

/// Modifier character appended by the JIT-enabled constructors.
pub const JIT_MODIFIER: char = 'S';

impl Modifiers {
    /// Flags that are baked into the compiled pattern.
    pub const COMPILE_MASK: Modifiers = Modifiers::IGNORE_CASE
        .union(Modifiers::MULTILINE)
        .union(Modifiers::DOT_ALL)
        .union(Modifiers::EXTENDED);

    /// Parse a modifier string. Order does not matter and repeats are allowed.
    pub fn parse(modifiers: &str) -> Result<Modifiers, RegexError> {
        let mut flags = Modifiers::empty();
        for c in modifiers.chars() {
            flags |= Self::from_char(c)
                .ok_or_else(|| RegexError::compile(format!("invalid modifier '{}'", c)))?;
        }
        Ok(flags)
    }

    /// Map a single modifier character to its flag.
    pub fn from_char(c: char) -> Option<Modifiers> {
        match c {
            'i' => Some(Modifiers::IGNORE_CASE),
            'm' => Some(Modifiers::MULTILINE),
            's' => Some(Modifiers::DOT_ALL),
            'x' => Some(Modifiers::EXTENDED),
            'g' => Some(Modifiers::GLOBAL),
            JIT_MODIFIER => Some(Modifiers::JIT),
            _ => None,
        }
    }

    /// Inline-flag group (e.g. `(?im)`) for the compile-time flags, or `""`.
    pub fn inline_group(self) -> String {
        let mut group = String::new();
        for (flag, c) in [
            (Modifiers::IGNORE_CASE, 'i'),
            (Modifiers::MULTILINE, 'm'),
            (Modifiers::DOT_ALL, 's'),
            (Modifiers::EXTENDED, 'x'),
        ] {
            if self.contains(flag) {
                group.push(c);
            }
        }
        if group.is_empty() {
            group
        } else {
            format!("(?{})", group)
        }
    }

    /// Whether matching should continue past the first match.
    pub fn is_global(self) -> bool {
        self.contains(Modifiers::GLOBAL)
    }
}

/// Subset test: every character of `wanted` occurs in `modifiers`.
pub fn has_all(modifiers: &str, wanted: &str) -> bool {
    wanted.chars().all(|c| modifiers.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_order_insensitive() {
        let a = Modifiers::parse("gim").unwrap();
        let b = Modifiers::parse("mig").unwrap();
        assert_eq!(a, b);
        assert!(a.is_global());
        assert!(a.contains(Modifiers::IGNORE_CASE | Modifiers::MULTILINE));
    }

    #[test]
    fn parse_empty_and_repeats() {
        assert_eq!(Modifiers::parse("").unwrap(), Modifiers::empty());
        assert_eq!(Modifiers::parse("ii").unwrap(), Modifiers::IGNORE_CASE);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = Modifiers::parse("gq").unwrap_err();
        assert!(err.is_compile());
        assert!(err.to_string().contains("'q'"));
    }

    #[test]
    fn jit_is_not_compiled_in() {
        let flags = Modifiers::parse("iS").unwrap();
        assert!(flags.contains(Modifiers::JIT));
        assert_eq!(flags & Modifiers::COMPILE_MASK, Modifiers::IGNORE_CASE);
        assert_eq!(flags.inline_group(), "(?i)");
    }

    #[test]
    fn inline_group_skips_global() {
        assert_eq!(Modifiers::parse("g").unwrap().inline_group(), "");
        assert_eq!(Modifiers::parse("xsmi").unwrap().inline_group(), "(?imsx)");
    }

    #[test]
    fn subset_test() {
        assert!(has_all("gim", "im"));
        assert!(has_all("gim", "mi"));
        assert!(has_all("gim", ""));
        assert!(!has_all("g", "im"));
    }
}
