//! Value types returned to the SNMP daemon.
//!
//! The pass_persist protocol sends each value as two lines: a type keyword
//! and the value text. [`ValueType`] is the fixed set of keywords net-snmp
//! accepts here; [`Value`] is the payload, either fixed at population time
//! or computed each time it is read.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Type keyword of a pass_persist response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// OCTET STRING
    String,
    /// INTEGER (signed 32-bit)
    Integer,
    /// Unsigned32
    Unsigned,
    /// OBJECT IDENTIFIER
    ObjectId,
    /// TimeTicks (hundredths of a second)
    TimeTicks,
    /// IpAddress (dotted quad)
    IpAddress,
    /// Counter32
    Counter,
    /// Gauge32
    Gauge,
}

impl ValueType {
    /// All supported type keywords.
    pub const ALL: [ValueType; 8] = [
        ValueType::String,
        ValueType::Integer,
        ValueType::Unsigned,
        ValueType::ObjectId,
        ValueType::TimeTicks,
        ValueType::IpAddress,
        ValueType::Counter,
        ValueType::Gauge,
    ];

    /// The keyword written on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned",
            Self::ObjectId => "objectid",
            Self::TimeTicks => "timeticks",
            Self::IpAddress => "ipaddress",
            Self::Counter => "counter",
            Self::Gauge => "gauge",
        }
    }

    /// Parse a keyword. Matching is exact and case-sensitive.
    pub fn parse(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::invalid_type(s))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ValueType {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Zero-argument function producing a value at read time.
pub type ValueFn = Arc<dyn Fn() -> String + Send + Sync>;

/// A triple's value: a fixed literal or a function evaluated on every read.
///
/// Computed values let a producer report live state (uptime, a counter that
/// ticks between refreshes) without rebuilding the whole set.
#[derive(Clone)]
pub enum Value {
    /// Fixed text rendered as-is.
    Literal(String),
    /// Re-evaluated each time the value is resolved. Never cached.
    Computed(ValueFn),
}

impl Value {
    /// Create a literal value from anything displayable.
    pub fn literal(value: impl fmt::Display) -> Self {
        Self::Literal(value.to_string())
    }

    /// Create a computed value.
    ///
    /// ```
    /// use pass_persist::value::Value;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicU32, Ordering};
    ///
    /// let hits = Arc::new(AtomicU32::new(0));
    /// let counter = hits.clone();
    /// let value = Value::computed(move || counter.fetch_add(1, Ordering::Relaxed) + 1);
    ///
    /// assert_eq!(value.resolve(), "1");
    /// assert_eq!(value.resolve(), "2");
    /// ```
    pub fn computed<F, T>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: fmt::Display,
    {
        Self::Computed(Arc::new(move || f().to_string()))
    }

    /// Resolve to the text sent on the wire, invoking the function if computed.
    pub fn resolve(&self) -> String {
        match self {
            Self::Literal(s) => s.clone(),
            Self::Computed(f) => f(),
        }
    }

    /// Whether this value is re-evaluated on each read.
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Self::Literal(n.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize);

impl From<std::net::Ipv4Addr> for Value {
    fn from(addr: std::net::Ipv4Addr) -> Self {
        Self::Literal(addr.to_string())
    }
}
