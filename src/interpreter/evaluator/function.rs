use std::{collections::HashMap, fmt};

use crate::interpreter::value::Value;

/// Signature of every callable function: one value in, one value out.
///
/// Plain function pointers keep tables `Send + Sync` and free of captured
/// state.
pub type UnaryFn = fn(Value) -> Value;

/// Number of arguments every table function takes.
pub const FUNCTION_ARITY: usize = 1;

/// Defines the built-in function list.
///
/// Each entry provides a string name and a function pointer. The macro
/// produces `BUILTIN_TABLE`, used to seed [`FunctionTable::standard`].
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $func:expr
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[(&str, UnaryFn)] = &[
            $(
                ($name, $func),
            )*
        ];
    };
}

// `sec`, `csc` and `cot` deliberately name the inverse functions here; this is
// the mapping existing expressions were written against. See
// `FunctionTable::conventional` for the reciprocal definitions.
builtin_functions! {
    "sin" => f64::sin,
    "cos" => f64::cos,
    "tan" => f64::tan,
    "sec" => f64::acos,
    "csc" => f64::asin,
    "cot" => f64::atan,
}

/// A name → function mapping owned by an evaluator.
///
/// # Example
/// ```
/// use newton::interpreter::evaluator::function::FunctionTable;
///
/// let table = FunctionTable::standard().with_function("sqrt", f64::sqrt);
/// let sqrt = table.get("sqrt").unwrap();
/// assert_eq!(sqrt(9.0), 3.0);
/// assert!(table.get("sinh").is_none());
/// ```
#[derive(Clone)]
pub struct FunctionTable {
    functions: HashMap<String, UnaryFn>,
}

impl FunctionTable {
    /// Creates a table with no functions.
    #[must_use]
    pub fn empty() -> Self {
        Self { functions: HashMap::new() }
    }

    /// The built-in set: `sin`, `cos`, `tan`, and `sec`/`csc`/`cot` mapped to
    /// arccosine/arcsine/arctangent.
    #[must_use]
    pub fn standard() -> Self {
        let functions = BUILTIN_TABLE.iter()
                                     .map(|(name, func)| ((*name).to_string(), *func))
                                     .collect();
        Self { functions }
    }

    /// The same names with the textbook definitions: `sec = 1/cos`,
    /// `csc = 1/sin` and `cot = 1/tan`.
    #[must_use]
    pub fn conventional() -> Self {
        Self::standard().with_function("sec", |v| 1.0 / v.cos())
                        .with_function("csc", |v| 1.0 / v.sin())
                        .with_function("cot", |v| 1.0 / v.tan())
    }

    /// Adds or replaces a function.
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>, func: UnaryFn) -> Self {
        self.functions.insert(name.into(), func);
        self
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<UnaryFn> {
        self.functions.get(name).copied()
    }

    /// Function names in alphabetical order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTable")
         .field("functions", &self.names())
         .finish()
    }
}
