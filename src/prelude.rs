// prelude.rs - Convenient re-exports.
//
//! # Prelude
//!
//! ```
//! use regexobj::prelude::*;
//!
//! let mut re = RegexObject::new(r"\d+", "g").unwrap();
//! assert!(re.test("answer: 42").unwrap());
//! assert_eq!(re.last_index(), 10);
//! ```

pub use crate::error::{CallbackError, RegexError};
pub use crate::object::{MatchOutcome, RegexLike, RegexObject, RegexObjectBuilder};
pub use crate::replace::{ReplacerArgs, Replacement};
pub use crate::result::MatchResult;
