//! Helper symbols required by rendered type hints.
//!
//! Every wrapper a [`TypeNode`](crate::ir::TypeNode) renders (`List`,
//! `Dict`, `Optional`, `Union`) and every non-builtin scalar a factory
//! picks (`Decimal`, `UUID`, `EmailStr`, ...) has to be imported by the
//! emitted module. Nodes record these as [`Import`] values; [`Imports`]
//! groups them into import statements.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;

/// A single importable symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Import {
    /// Module the symbol is imported from, `None` for a bare `import x`.
    pub from: Option<&'static str>,
    /// Imported name.
    pub import: &'static str,
}

impl Import {
    /// Create a `from module import name` symbol.
    pub const fn from_module(from: &'static str, import: &'static str) -> Self {
        Self {
            from: Some(from),
            import,
        }
    }

    /// Create a bare `import module` symbol.
    pub const fn module(import: &'static str) -> Self {
        Self { from: None, import }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => write!(f, "from {} import {}", from, self.import),
            None => write!(f, "import {}", self.import),
        }
    }
}

// typing
pub const IMPORT_ANY: Import = Import::from_module("typing", "Any");
pub const IMPORT_LIST: Import = Import::from_module("typing", "List");
pub const IMPORT_DICT: Import = Import::from_module("typing", "Dict");
pub const IMPORT_OPTIONAL: Import = Import::from_module("typing", "Optional");
pub const IMPORT_UNION: Import = Import::from_module("typing", "Union");

// standard library scalars
pub const IMPORT_DECIMAL: Import = Import::from_module("decimal", "Decimal");
pub const IMPORT_DATE: Import = Import::from_module("datetime", "date");
pub const IMPORT_DATETIME: Import = Import::from_module("datetime", "datetime");
pub const IMPORT_TIME: Import = Import::from_module("datetime", "time");
pub const IMPORT_UUID: Import = Import::from_module("uuid", "UUID");
pub const IMPORT_IPV4ADDRESS: Import = Import::from_module("ipaddress", "IPv4Address");
pub const IMPORT_IPV6ADDRESS: Import = Import::from_module("ipaddress", "IPv6Address");

// pydantic
pub const IMPORT_UUID1: Import = Import::from_module("pydantic", "UUID1");
pub const IMPORT_UUID2: Import = Import::from_module("pydantic", "UUID2");
pub const IMPORT_UUID3: Import = Import::from_module("pydantic", "UUID3");
pub const IMPORT_UUID4: Import = Import::from_module("pydantic", "UUID4");
pub const IMPORT_UUID5: Import = Import::from_module("pydantic", "UUID5");
pub const IMPORT_ANYURL: Import = Import::from_module("pydantic", "AnyUrl");
pub const IMPORT_EMAIL_STR: Import = Import::from_module("pydantic", "EmailStr");
pub const IMPORT_SECRET_STR: Import = Import::from_module("pydantic", "SecretStr");
pub const IMPORT_CONINT: Import = Import::from_module("pydantic", "conint");
pub const IMPORT_CONFLOAT: Import = Import::from_module("pydantic", "confloat");
pub const IMPORT_CONDECIMAL: Import = Import::from_module("pydantic", "condecimal");
pub const IMPORT_CONSTR: Import = Import::from_module("pydantic", "constr");

/// Collects imports and renders them as grouped import statements.
///
/// Modules keep first-seen order; names within a module are sorted.
///
/// # Example
///
/// ```rust
/// use typehint::imports::{Imports, IMPORT_LIST, IMPORT_OPTIONAL, IMPORT_UUID};
///
/// let imports: Imports = [IMPORT_OPTIONAL, IMPORT_UUID, IMPORT_LIST].iter().collect();
/// assert_eq!(
///     imports.dump(),
///     "from typing import List, Optional\nfrom uuid import UUID"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Imports {
    grouped: IndexMap<Option<&'static str>, BTreeSet<&'static str>>,
}

impl Imports {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single import.
    pub fn append(&mut self, import: &Import) {
        self.grouped
            .entry(import.from)
            .or_default()
            .insert(import.import);
    }

    /// Add every import from an iterator.
    pub fn extend<'a>(&mut self, imports: impl IntoIterator<Item = &'a Import>) {
        for import in imports {
            self.append(import);
        }
    }

    /// Check whether a symbol has been collected.
    pub fn contains(&self, import: &Import) -> bool {
        self.grouped
            .get(&import.from)
            .is_some_and(|names| names.contains(import.import))
    }

    /// Number of distinct symbols collected.
    pub fn len(&self) -> usize {
        self.grouped.values().map(BTreeSet::len).sum()
    }

    /// Check if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.grouped.is_empty()
    }

    /// Render the import block, one statement per line.
    pub fn dump(&self) -> String {
        let mut lines = Vec::new();
        for (from, names) in &self.grouped {
            match from {
                Some(from) => {
                    let names: Vec<&str> = names.iter().copied().collect();
                    lines.push(format!("from {} import {}", from, names.join(", ")));
                }
                None => lines.extend(names.iter().map(|name| format!("import {}", name))),
            }
        }
        lines.join("\n")
    }
}

impl<'a> FromIterator<&'a Import> for Imports {
    fn from_iter<T: IntoIterator<Item = &'a Import>>(iter: T) -> Self {
        let mut imports = Imports::new();
        imports.extend(iter);
        imports
    }
}

impl fmt::Display for Imports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
