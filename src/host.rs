// host.rs - Property access by name, for scripting-host bindings.
//
// A host binding forwards property reads and writes as strings. Everything
// here routes back to the typed accessors on `RegexObject`.

use std::fmt;
use std::str::FromStr;

use crate::engine::Engine;
use crate::object::RegexObject;

/// A host-visible property of a regex object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// The pattern text as given.
    Source,
    /// The user-supplied modifier string.
    Flags,
    /// The read cursor of global objects (writable).
    LastIndex,
    /// Whether the `g` modifier is set.
    Global,
    /// Whether the `i` modifier is set.
    IgnoreCase,
    /// Whether the `m` modifier is set.
    Multiline,
    /// Always `false`; sticky matching is not supported.
    Sticky,
}

impl Property {
    /// Every property, in declaration order.
    pub const ALL: [Property; 7] = [
        Property::Source,
        Property::Flags,
        Property::LastIndex,
        Property::Global,
        Property::IgnoreCase,
        Property::Multiline,
        Property::Sticky,
    ];

    /// The host-side name.
    pub fn name(self) -> &'static str {
        match self {
            Property::Source => "source",
            Property::Flags => "flags",
            Property::LastIndex => "lastIndex",
            Property::Global => "global",
            Property::IgnoreCase => "ignoreCase",
            Property::Multiline => "multiline",
            Property::Sticky => "sticky",
        }
    }

    /// Only `lastIndex` can be written.
    pub fn is_writable(self) -> bool {
        self == Property::LastIndex
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProperty(pub String);

impl fmt::Display for UnknownProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown property '{}'", self.0)
    }
}

impl std::error::Error for UnknownProperty {}

impl FromStr for Property {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownProperty(s.to_string()))
    }
}

/// A property value as a host sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Integer(n)
    }
}

impl<E: Engine> RegexObject<E> {
    /// Read a property.
    pub fn property(&self, property: Property) -> PropertyValue {
        match property {
            Property::Source => self.source().to_string().into(),
            Property::Flags => self.flags().into(),
            Property::LastIndex => {
                PropertyValue::Integer(i64::try_from(self.last_index()).unwrap_or(i64::MAX))
            }
            Property::Global => self.global().into(),
            Property::IgnoreCase => self.ignore_case().into(),
            Property::Multiline => self.multiline().into(),
            Property::Sticky => self.sticky().into(),
        }
    }

    /// Read a property by host name; `None` for unknown names.
    pub fn get_property(&self, name: &str) -> Option<PropertyValue> {
        name.parse().ok().map(|p| self.property(p))
    }

    /// Write a property by host name.
    ///
    /// Only `lastIndex` accepts writes, and only integers; negative values are
    /// clamped to 0. Returns the value now stored, or `None` if the write was
    /// ignored.
    pub fn set_property(&mut self, name: &str, value: PropertyValue) -> Option<PropertyValue> {
        match (name.parse::<Property>().ok()?, value) {
            (Property::LastIndex, PropertyValue::Integer(n)) => {
                self.set_last_index(n);
                Some(self.property(Property::LastIndex))
            }
            (property, _) => {
                log::debug!("ignored write to property '{}'", property);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for p in Property::ALL {
            assert_eq!(p.name().parse::<Property>(), Ok(p));
        }
        assert!("lastindex".parse::<Property>().is_err());
    }

    #[test]
    fn reads() {
        let re = RegexObject::new("a.c", "gi").unwrap();
        assert_eq!(re.get_property("source"), Some(PropertyValue::String("a.c".into())));
        assert_eq!(re.get_property("flags"), Some(PropertyValue::String("gi".into())));
        assert_eq!(re.get_property("lastIndex"), Some(PropertyValue::Integer(0)));
        assert_eq!(re.get_property("global"), Some(PropertyValue::Boolean(true)));
        assert_eq!(re.get_property("ignoreCase"), Some(PropertyValue::Boolean(true)));
        assert_eq!(re.get_property("multiline"), Some(PropertyValue::Boolean(false)));
        assert_eq!(re.get_property("sticky"), Some(PropertyValue::Boolean(false)));
        assert_eq!(re.get_property("unicode"), None);
    }

    #[test]
    fn write_last_index() {
        let mut re = RegexObject::new("a", "g").unwrap();
        assert_eq!(
            re.set_property("lastIndex", PropertyValue::Integer(-3)),
            Some(PropertyValue::Integer(0))
        );
        assert_eq!(
            re.set_property("lastIndex", PropertyValue::Integer(2)),
            Some(PropertyValue::Integer(2))
        );
        assert_eq!(re.last_index(), 2);
    }

    #[test]
    fn read_only_writes_ignored() {
        let mut re = RegexObject::new("a", "").unwrap();
        assert_eq!(re.set_property("global", PropertyValue::Boolean(true)), None);
        assert_eq!(re.set_property("lastIndex", PropertyValue::Boolean(true)), None);
        assert_eq!(re.set_property("nope", PropertyValue::Integer(1)), None);
        assert!(!re.global());
        assert!(Property::LastIndex.is_writable());
        assert!(!Property::Source.is_writable());
    }
}
