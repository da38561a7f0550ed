//! Lexical scope tracking for the parser
//!
//! The stack holds one name set per open scope, outermost first. Lookups scan
//! from the innermost scope outward and stop at the first hit.

use rustc_hash::FxHashSet;

#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<FxHashSet<String>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.scopes.push(FxHashSet::default());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Number of open scopes
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Add `name` to the innermost scope. Re-declaring is not an error.
    pub fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string());
        }
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Index of the innermost scope that declares `name` (0 = global).
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.scopes.iter().rposition(|scope| scope.contains(name))
    }
}
