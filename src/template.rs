// template.rs - Literal replacement templates.
//
// Syntax follows PCRE2 substitution strings:
//
//   $$        a literal '$'
//   $n ${n}   numbered group n (group 0 is the whole match)
//   $name     named group
//   ${name}   named group
//
// Groups that did not participate expand to nothing. Any other use of '$'
// is an error, as is a reference to a group the pattern does not have.

use std::collections::BTreeMap;

use memchr::memchr;

use crate::engine::MatchRecord;
use crate::error::RegexError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece<'t> {
    Literal(&'t str),
    Index(usize),
    Name(&'t str),
}

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'t> {
    pieces: Vec<Piece<'t>>,
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn parse_index(digits: &str) -> Result<usize, RegexError> {
    digits
        .parse()
        .map_err(|_| RegexError::substitution(format!("group number {} is too large", digits)))
}

impl<'t> Template<'t> {
    /// Parse `template`, rejecting malformed `$` sequences.
    pub fn parse(template: &'t str) -> Result<Template<'t>, RegexError> {
        let bytes = template.as_bytes();
        let mut pieces = Vec::new();
        let mut pos = 0;

        while let Some(i) = memchr(b'$', &bytes[pos..]) {
            let at = pos + i;
            if at > pos {
                pieces.push(Piece::Literal(&template[pos..at]));
            }
            let after = at + 1;
            match bytes.get(after) {
                None => {
                    return Err(RegexError::substitution(
                        "dangling '$' at end of template",
                    ))
                }
                Some(b'$') => {
                    pieces.push(Piece::Literal("$"));
                    pos = after + 1;
                }
                Some(b) if b.is_ascii_digit() => {
                    let len = bytes[after..]
                        .iter()
                        .take_while(|b| b.is_ascii_digit())
                        .count();
                    let end = after + len;
                    pieces.push(Piece::Index(parse_index(&template[after..end])?));
                    pos = end;
                }
                Some(b'{') => {
                    let open = after + 1;
                    let close = memchr(b'}', &bytes[open..])
                        .map(|j| open + j)
                        .ok_or_else(|| RegexError::substitution("unterminated '${'"))?;
                    let inner = &template[open..close];
                    let inner_bytes = inner.as_bytes();
                    if !inner.is_empty() && inner_bytes.iter().all(u8::is_ascii_digit) {
                        pieces.push(Piece::Index(parse_index(inner)?));
                    } else if !inner.is_empty()
                        && is_name_start(inner_bytes[0])
                        && inner_bytes.iter().copied().all(is_name_char)
                    {
                        pieces.push(Piece::Name(inner));
                    } else {
                        return Err(RegexError::substitution(format!(
                            "invalid group reference '${{{}}}'",
                            inner
                        )));
                    }
                    pos = close + 1;
                }
                Some(&b) if is_name_start(b) => {
                    let len = bytes[after..]
                        .iter()
                        .copied()
                        .take_while(|&b| is_name_char(b))
                        .count();
                    let end = after + len;
                    pieces.push(Piece::Name(&template[after..end]));
                    pos = end;
                }
                Some(_) => {
                    let c = template[after..].chars().next().unwrap_or('$');
                    return Err(RegexError::substitution(format!(
                        "invalid escape '${}' at offset {}",
                        c, at
                    )));
                }
            }
        }
        if pos < bytes.len() {
            pieces.push(Piece::Literal(&template[pos..]));
        }
        Ok(Template { pieces })
    }

    /// Check every reference against the pattern's groups.
    ///
    /// `group_count` includes group 0.
    pub fn validate(
        &self,
        group_count: usize,
        names: &BTreeMap<String, usize>,
    ) -> Result<(), RegexError> {
        for piece in &self.pieces {
            match *piece {
                Piece::Index(n) if n >= group_count => {
                    return Err(RegexError::substitution(format!(
                        "reference to non-existent group {}",
                        n
                    )))
                }
                Piece::Name(name) if !names.contains_key(name) => {
                    return Err(RegexError::substitution(format!(
                        "reference to non-existent group '{}'",
                        name
                    )))
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Append the expansion for one match to `dst`.
    pub fn expand(&self, record: &MatchRecord, dst: &mut String) {
        for piece in &self.pieces {
            let text = match *piece {
                Piece::Literal(s) => Some(s),
                Piece::Index(n) => record.groups.get(n).and_then(|g| g.as_deref()),
                Piece::Name(name) => record.named.get(name).and_then(|g| g.as_deref()),
            };
            if let Some(text) = text {
                dst.push_str(text);
            }
        }
    }

    /// Returns `true` if the template contains no group references.
    pub fn is_literal(&self) -> bool {
        self.pieces.iter().all(|p| matches!(p, Piece::Literal(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn record() -> MatchRecord {
        let mut named = BTreeMap::new();
        named.insert("year".to_string(), Some("2024".to_string()));
        named.insert("day".to_string(), None);
        MatchRecord {
            start: 0,
            end: 7,
            groups: smallvec![
                Some("2024-05".to_string()),
                Some("2024".to_string()),
                Some("05".to_string()),
                None,
            ],
            named,
        }
    }

    fn names() -> BTreeMap<String, usize> {
        let mut names = BTreeMap::new();
        names.insert("year".to_string(), 1);
        names.insert("day".to_string(), 3);
        names
    }

    fn expand(template: &str) -> String {
        let t = Template::parse(template).unwrap();
        t.validate(4, &names()).unwrap();
        let mut out = String::new();
        t.expand(&record(), &mut out);
        out
    }

    #[test]
    fn numbered_references() {
        assert_eq!(expand("$2/$1"), "05/2024");
        assert_eq!(expand("${2}0"), "050");
        assert_eq!(expand("[$0]"), "[2024-05]");
    }

    #[test]
    fn named_references() {
        assert_eq!(expand("y=${year}"), "y=2024");
        assert_eq!(expand("y=$year!"), "y=2024!");
    }

    #[test]
    fn unset_groups_expand_empty() {
        assert_eq!(expand("<$3>"), "<>");
        assert_eq!(expand("<${day}>"), "<>");
    }

    #[test]
    fn dollar_escape() {
        assert_eq!(expand("$$1"), "$1");
        assert!(Template::parse("cost: $$").unwrap().is_literal());
    }

    #[test]
    fn plain_text_is_literal() {
        let t = Template::parse("no refs here").unwrap();
        assert!(t.is_literal());
        assert_eq!(expand("no refs here"), "no refs here");
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(expand("日本$1語"), "日本2024語");
    }

    #[test]
    fn malformed_templates() {
        assert!(Template::parse("abc$").is_err());
        assert!(Template::parse("${1").is_err());
        assert!(Template::parse("${}").is_err());
        assert!(Template::parse("${a-b}").is_err());
        assert!(Template::parse("$-").is_err());
        assert!(Template::parse("$99999999999999999999999").is_err());
    }

    #[test]
    fn unknown_groups_rejected() {
        let t = Template::parse("$4").unwrap();
        assert!(t.validate(4, &names()).is_err());
        let t = Template::parse("${month}").unwrap();
        assert!(t.validate(4, &names()).is_err());
    }
}
