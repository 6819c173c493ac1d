use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Bank code identifying an institution (e.g. "B1", "B7").
///
/// The transaction export tags every party with the code of the bank
/// holding its account. One distinguished code is the analyzed
/// institution's own; entities carrying it are that bank's customers.
///
/// # Examples
///
/// ```
/// use txflow::core::entity::BankCode;
///
/// let home = BankCode::new("B1");
/// let other = BankCode::new("B7");
/// assert_ne!(home, other);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BankCode(String);

impl BankCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BankCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BankCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A named party in the transaction network.
///
/// Identity is the pair of account-holder name and bank code; the display
/// label is `"{name} ({bank})"` and serves as the node identity in the
/// flow graph. The bank code is held as a typed field so membership checks
/// never re-scan the label text.
///
/// # Examples
///
/// ```
/// use txflow::core::entity::{BankCode, Entity};
///
/// let acme = Entity::new("ACME Corp", BankCode::new("B1"));
/// assert_eq!(acme.label(), "ACME Corp (B1)");
/// assert!(acme.is_customer_of(&BankCode::new("B1")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    name: String,
    bank: BankCode,
}

/// Matches "Name (CODE)" labels; the code is the trailing parenthesized token.
fn label_pattern() -> &'static Regex {
    static LABEL_RE: OnceLock<Regex> = OnceLock::new();
    LABEL_RE.get_or_init(|| Regex::new(r"^(.*\S)\s*\(([^()]+)\)$").expect("label pattern"))
}

impl Entity {
    pub fn new(name: impl Into<String>, bank: BankCode) -> Self {
        Self {
            name: name.into(),
            bank,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bank(&self) -> &BankCode {
        &self.bank
    }

    /// The display label, `"{name} ({bank})"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.bank)
    }

    /// Whether this entity holds its account at the given institution.
    pub fn is_customer_of(&self, home: &BankCode) -> bool {
        self.bank == *home
    }

    /// Recover an entity from a `"Name (CODE)"` label, as found in the
    /// precomputed node and edge tables. Labels without a trailing
    /// parenthesized code yield `None`.
    pub fn parse_label(label: &str) -> Option<Self> {
        let caps = label_pattern().captures(label.trim())?;
        Some(Self::new(caps[1].trim(), BankCode::new(&caps[2])))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.bank)
    }
}
