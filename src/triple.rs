//! OID / type / value triple.
//!
//! A triple is the pass_persist counterpart of a varbind: the three lines an
//! agent writes in answer to `get` or `getnext`.

use std::fmt;

use crate::error::Result;
use crate::oid::OidKey;
use crate::value::{Value, ValueType};

/// One object in a triple set.
#[derive(Debug, Clone)]
pub struct Triple {
    oid: OidKey,
    value_type: ValueType,
    value: Value,
}

impl Triple {
    /// Create a triple from a type keyword.
    ///
    /// Fails with [`Error::InvalidType`](crate::Error::InvalidType) when the
    /// keyword is not one of the supported [`ValueType`]s.
    ///
    /// ```
    /// use pass_persist::Triple;
    ///
    /// let t = Triple::new("1.3.6.1.4.1.8072.9999.1", "integer", 42).unwrap();
    /// assert_eq!(t.render(), ["1.3.6.1.4.1.8072.9999.1", "integer", "42"]);
    ///
    /// assert!(Triple::new("1.3.6.1", "float", 1).is_err());
    /// ```
    pub fn new(
        oid: impl Into<OidKey>,
        value_type: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let value_type = ValueType::parse(value_type)?;
        Ok(Self::typed(oid, value_type, value))
    }

    /// Create a triple from an already checked type.
    pub fn typed(oid: impl Into<OidKey>, value_type: ValueType, value: impl Into<Value>) -> Self {
        Self {
            oid: oid.into(),
            value_type,
            value: value.into(),
        }
    }

    /// The object identifier.
    pub fn oid(&self) -> &OidKey {
        &self.oid
    }

    /// The declared type.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// The unresolved value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Resolve the value, invoking it if it is computed.
    ///
    /// Line breaks are replaced with spaces: every value is exactly one
    /// protocol line.
    pub fn resolved_value(&self) -> String {
        single_line(self.value.resolve())
    }

    /// The three response lines: OID, type keyword, value.
    pub fn render(&self) -> [String; 3] {
        [
            single_line(self.oid.to_string()),
            self.value_type.to_string(),
            self.resolved_value(),
        ]
    }
}

fn single_line(s: String) -> String {
    if s.contains(['\r', '\n']) {
        s.replace(['\r', '\n'], " ")
    } else {
        s
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}: {}",
            self.oid,
            self.value_type,
            self.resolved_value()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_new_accepts_text_or_key() {
        let a = Triple::new("1.3.6.1.1", "string", "hello").unwrap();
        let b = Triple::new(OidKey::new("1.3.6.1.1"), "string", "hello").unwrap();
        assert_eq!(a.oid(), b.oid());
        assert_eq!(a.value_type(), ValueType::String);
    }

    #[test]
    fn test_new_rejects_bad_type() {
        let err = Triple::new("1.3.6.1.1", "octetstring", "x").unwrap_err();
        assert!(matches!(err, Error::InvalidType { ref input } if &**input == "octetstring"));
    }

    #[test]
    fn test_render_literal() {
        let t = Triple::typed("1.3.6.1.2", ValueType::Gauge, 7u32);
        assert_eq!(t.render(), ["1.3.6.1.2", "gauge", "7"]);
        assert_eq!(t.resolved_value(), "7");
        assert_eq!(t.resolved_value(), "7");
    }

    #[test]
    fn test_computed_reevaluated_per_render() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let t = Triple::typed(
            "1.3.6.1.3",
            ValueType::Counter,
            Value::computed(move || c.fetch_add(1, Ordering::SeqCst) + 1),
        );

        assert_eq!(t.render()[2], "1");
        assert_eq!(t.render()[2], "2");
        assert_eq!(t.resolved_value(), "3");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_multiline_value_stays_on_one_line() {
        let t = Triple::typed("1.3.6.1.5", ValueType::String, "line one\nline two\r\n");
        assert_eq!(t.render(), ["1.3.6.1.5", "string", "line one line two  "]);

        let t = Triple::typed(
            "1.3.6.1.6",
            ValueType::String,
            Value::computed(|| "a\nb"),
        );
        assert_eq!(t.to_string(), "1.3.6.1.6 = string: a b");
    }

    #[test]
    fn test_display() {
        let t = Triple::typed("1.3.6.1.4", ValueType::IpAddress, "10.0.0.1");
        assert_eq!(t.to_string(), "1.3.6.1.4 = ipaddress: 10.0.0.1");
    }
}
