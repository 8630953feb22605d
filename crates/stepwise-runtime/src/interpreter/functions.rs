//! Function table
//!
//! Maps function names to their declarations. Entries borrow the
//! declarations from the loaded program; nothing is copied.

use crate::ast::FunctionDecl;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct FunctionTable<'p> {
    functions: HashMap<&'p str, &'p FunctionDecl>,
}

impl<'p> FunctionTable<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration. The first registration of a name wins;
    /// returns `false` if the name was already taken.
    pub fn register(&mut self, decl: &'p FunctionDecl) -> bool {
        if self.functions.contains_key(decl.name.as_str()) {
            return false;
        }
        self.functions.insert(decl.name.as_str(), decl);
        true
    }

    pub fn get(&self, name: &str) -> Option<&'p FunctionDecl> {
        self.functions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
