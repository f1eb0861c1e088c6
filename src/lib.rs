//! # regexobj
//!
//! Scripting-style regular-expression objects on top of a pluggable matching
//! engine.
//!
//! A [`RegexObject`] compiles its pattern once and then behaves like the regex
//! objects of dynamic languages: [`test`](RegexObject::test),
//! [`exec`](RegexObject::exec), [`match_all`](RegexObject::match_all),
//! [`replace`](RegexObject::replace), a `Display` impl that prints
//! `/source/modifiers`, and a `lastIndex` cursor that global objects advance
//! as they go.
//!
//! ## Quick Start
//!
//! ```rust
//! use regexobj::prelude::*;
//!
//! let mut re = RegexObject::new(r"(?<year>\d{4})-(?<month>\d{2})", "g").unwrap();
//!
//! let m = re.exec("from 2024-05 to 2025-01").unwrap().unwrap();
//! assert_eq!(m.name("year"), Some("2024"));
//! assert_eq!(m.index(), 5);
//! assert_eq!(re.last_index(), 12);
//!
//! let swapped = re.replace("2024-05", "$2/$1").unwrap();
//! assert_eq!(swapped, "05/2024");
//! ```
//!
//! Replacement callbacks receive the match, its groups, offset and subject:
//!
//! ```rust
//! use regexobj::prelude::*;
//!
//! let re = RegexObject::new(r"\b\w", "g").unwrap();
//! let out = re
//!     .replace("hello big world", Replacement::callback(|args| Ok(args.whole().to_uppercase())))
//!     .unwrap();
//! assert_eq!(out, "Hello Big World");
//! ```
//!
//! ## Engines
//!
//! Matching is delegated to an [`Engine`]. The default, [`FancyEngine`], uses
//! the `fancy-regex` crate (backreferences, look-around). Other engines plug
//! in through [`RegexObject::builder`] and [`RegexObjectBuilder::engine`].
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`object`] | `RegexObject`, its builder, the `RegexLike` trait |
//! | [`engine`] | Engine trait and raw match sets |
//! | [`fancy`] | Default engine over `fancy-regex` |
//! | [`modifiers`] | Modifier-string parsing |
//! | [`result`] | Owned match results |
//! | [`replace`] | Literal/callback replacement |
//! | [`template`] | `$1` / `${name}` template expansion |
//! | [`host`] | Property access by host name |
//! | [`error`] | Error types |

pub mod engine;
pub mod error;
pub mod fancy;
pub mod host;
pub mod modifiers;
pub mod object;
pub mod prelude;
pub mod replace;
pub mod result;
pub mod template;

pub use engine::{Engine, MatchRecord, MatchRequest, MatchSet, NamedGroups};
pub use error::{CallbackError, RegexError};
pub use fancy::{EngineConfig, FancyEngine, FancyPattern};
pub use host::{Property, PropertyValue};
pub use modifiers::Modifiers;
pub use object::{MatchOutcome, RegexLike, RegexObject, RegexObjectBuilder};
pub use replace::{ReplacerArgs, Replacement};
pub use result::MatchResult;
