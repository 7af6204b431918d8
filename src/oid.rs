//! Sortable object identifier key.
//!
//! OIDs arrive as dotted text on every protocol line. Rather than parsing them
//! into arcs and rejecting anything odd, [`OidKey`] keeps the original text and
//! derives a fixed-width comparable form from it, so ordering is numeric per
//! arc while the key itself stays exactly what the daemon sent.

use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};

/// Width of each arc in the comparable form (hex digits, enough for a `u32`).
pub const ARC_WIDTH: usize = 8;

/// Dotted-decimal object identifier with numeric ordering.
///
/// Equality and hashing use the original text. Ordering compares the derived
/// comparable form, in which every numeric arc is zero-padded to [`ARC_WIDTH`]
/// hex digits, so `1.2.9 < 1.2.10` and a prefix sorts before its descendants.
/// Keys with the same comparable form but different text (`.1.3` and `1.3`)
/// are ordered by text; use [`cmp_arcs`](OidKey::cmp_arcs) to treat them as
/// the same position.
///
/// # Examples
///
/// ```
/// use pass_persist::oid::OidKey;
///
/// let a = OidKey::new("1.3.6.1.2.9");
/// let b = OidKey::new("1.3.6.1.2.10");
/// assert!(a < b);
///
/// // Plain string comparison gets this wrong
/// assert!("1.3.6.1.2.9" > "1.3.6.1.2.10");
///
/// // Same position, different keys
/// let dotted = OidKey::new(".1.3.6.1");
/// assert_ne!(dotted, OidKey::new("1.3.6.1"));
/// assert!(dotted.cmp_arcs(&OidKey::new("1.3.6.1")).is_eq());
/// ```
#[derive(Clone)]
pub struct OidKey {
    text: Box<str>,
    comparable: Box<str>,
}

impl OidKey {
    /// Build a key from dotted text.
    ///
    /// Empty segments are dropped, so `".1.3.6."` orders like `"1.3.6"`.
    /// Segments are not validated. Decimal arcs above `u32::MAX` sort after
    /// every `u32` arc and among themselves by value; anything non-numeric is
    /// left-padded with `'0'` and compared as text.
    pub fn new(text: impl Into<Box<str>>) -> Self {
        let text = text.into();
        let comparable = comparable_form(&text).into_boxed_str();
        Self { text, comparable }
    }

    /// The original dotted text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The derived fixed-width form used for ordering.
    pub fn comparable_form(&self) -> &str {
        &self.comparable
    }

    /// Compare positions in the tree, ignoring how the text was written.
    ///
    /// Unlike [`Ord`], `.1.3.6` and `1.3.6` compare equal here.
    pub fn cmp_arcs(&self, other: &OidKey) -> Ordering {
        self.comparable.cmp(&other.comparable)
    }

    /// Non-empty segments of the original text.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.text.split('.').filter(|s| !s.is_empty())
    }

    /// Check whether this OID lies in the subtree rooted at `base`.
    ///
    /// This is an arc-wise test: `1.3.6.10` is not under `1.3.6.1` even though
    /// the text starts with it. Every OID is under itself and under the empty OID.
    ///
    /// ```
    /// use pass_persist::oid::OidKey;
    ///
    /// let base = OidKey::new("1.3.6.1");
    /// assert!(OidKey::new("1.3.6.1.4.1").starts_with(&base));
    /// assert!(OidKey::new(".1.3.6.1").starts_with(&base));
    /// assert!(!OidKey::new("1.3.6.10").starts_with(&base));
    /// ```
    pub fn starts_with(&self, base: &OidKey) -> bool {
        if base.comparable.is_empty() {
            return true;
        }
        match self.comparable.strip_prefix(&*base.comparable) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

/// Marks a decimal arc too large for [`ARC_WIDTH`] hex digits. Sorts after
/// every hex digit.
const OVERFLOW_MARK: char = 'G';

fn comparable_form(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, segment) in text.split('.').filter(|s| !s.is_empty()).enumerate() {
        if i > 0 {
            out.push('.');
        }
        if let Ok(arc) = segment.parse::<u32>() {
            // Writing to a String cannot fail
            let _ = write!(out, "{:0width$X}", arc, width = ARC_WIDTH);
        } else if segment.bytes().all(|b| b.is_ascii_digit()) {
            // Past u32: marker, digit count, digits. Longer means larger.
            let digits = segment.trim_start_matches('0');
            let _ = write!(
                out,
                "{}{:0width$X}{}",
                OVERFLOW_MARK,
                digits.len(),
                digits,
                width = ARC_WIDTH
            );
        } else {
            for _ in segment.len()..ARC_WIDTH {
                out.push('0');
            }
            out.push_str(segment);
        }
    }
    out
}

impl PartialEq for OidKey {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for OidKey {}

impl Hash for OidKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for OidKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OidKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Distinct texts can share a comparable form (".1.7" and "1.007");
        // falling back to the text keeps the order total and consistent with Eq.
        self.cmp_arcs(other)
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl fmt::Debug for OidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OidKey({})", self.text)
    }
}

impl fmt::Display for OidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for OidKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for OidKey {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for OidKey {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&OidKey> for OidKey {
    fn from(oid: &OidKey) -> Self {
        oid.clone()
    }
}
