use std::collections::HashMap;

use crate::interpreter::value::Value;

/// A name → constant mapping owned by an evaluator.
///
/// The standard table knows only `pi`.
///
/// # Example
/// ```
/// use newton::interpreter::evaluator::keyword::KeywordTable;
///
/// let table = KeywordTable::standard();
/// assert_eq!(table.get("pi"), Some(std::f64::consts::PI));
/// assert_eq!(table.get("e"), None);
/// ```
#[derive(Debug, Clone)]
pub struct KeywordTable {
    constants: HashMap<String, Value>,
}

impl KeywordTable {
    /// Creates a table with no constants.
    #[must_use]
    pub fn empty() -> Self {
        Self { constants: HashMap::new() }
    }

    /// The built-in constants.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty().with_keyword("pi", std::f64::consts::PI)
    }

    /// Adds or replaces a constant.
    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<String>, value: Value) -> Self {
        self.constants.insert(name.into(), value);
        self
    }

    /// Looks up a constant by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.constants.get(name).copied()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::standard()
    }
}
