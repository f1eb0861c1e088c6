// error.rs - Error types for regex objects.
//
// Compilation is the only place a pattern can be rejected. Matching reports
// "no match" as a normal value; only genuine engine failures, bad replacement
// templates and failing replacement callbacks surface as errors.

use std::error::Error as StdError;
use std::fmt;

/// Error type for construction, matching and replacement.
#[derive(Debug)]
pub enum RegexError {
    /// The pattern or its modifier string was rejected at construction.
    Compile { message: String },
    /// The engine failed while matching (not the same as "no match").
    Match { message: String },
    /// A literal replacement template could not be expanded.
    Substitution { message: String },
    /// A replacement callback failed; the whole replace call is aborted.
    Callback(CallbackError),
}

impl RegexError {
    pub(crate) fn compile(message: impl Into<String>) -> Self {
        RegexError::Compile {
            message: message.into(),
        }
    }

    pub(crate) fn matching(message: impl Into<String>) -> Self {
        RegexError::Match {
            message: message.into(),
        }
    }

    pub(crate) fn substitution(message: impl Into<String>) -> Self {
        RegexError::Substitution {
            message: message.into(),
        }
    }

    /// Returns `true` for errors raised while compiling the pattern.
    pub fn is_compile(&self) -> bool {
        matches!(self, RegexError::Compile { .. })
    }
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegexError::Compile { message } => write!(f, "invalid pattern: {}", message),
            RegexError::Match { message } => write!(f, "match failed: {}", message),
            RegexError::Substitution { message } => {
                write!(f, "invalid replacement: {}", message)
            }
            RegexError::Callback(err) => write!(f, "replacement callback failed: {}", err),
        }
    }
}

impl StdError for RegexError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            RegexError::Callback(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CallbackError> for RegexError {
    fn from(err: CallbackError) -> Self {
        RegexError::Callback(err)
    }
}

/// Failure raised by a user replacement callback.
///
/// Either a plain message or a wrapped error from the callback's own domain.
#[derive(Debug)]
pub struct CallbackError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl CallbackError {
    /// Create an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        CallbackError {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an error produced inside the callback.
    pub fn from_source<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        CallbackError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for CallbackError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn StdError + 'static))
    }
}
