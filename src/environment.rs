use std::collections::HashMap;

use crate::error::ScopeError;
use crate::parser::Ident;

/// Lexically scoped symbol table, generic over the payload bound to each name.
///
/// The type checker instantiates it over [`Type`](crate::types::Type) and the
/// evaluator over [`Value`](crate::runtime::Value); each traversal owns its own.
#[derive(Debug, Clone)]
pub struct Environment<P> {
    /// Stack of nested scopes, outermost first
    scopes: Vec<HashMap<Ident, P>>,
}

impl<P> Environment<P> {
    /// Creates an environment holding just the global scope
    pub fn new() -> Self {
        Environment {
            scopes: vec![HashMap::new()],
        }
    }

    /// Enters a new nested scope
    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
        tracing::trace!(depth = self.scopes.len(), "entered scope");
    }

    /// Exits the innermost scope; the global scope is never removed
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            tracing::trace!(depth = self.scopes.len(), "exited scope");
        }
    }

    /// Binds `id` in the innermost scope; fails if that scope already has it
    pub fn declare(&mut self, id: Ident, payload: P) -> Result<(), ScopeError> {
        let scope = self.innermost_mut();
        if scope.contains_key(&id) {
            return Err(ScopeError::AlreadyDeclared(id));
        }
        scope.insert(id, payload);
        Ok(())
    }

    /// Finds the payload of `id`, searching from the innermost scope outward
    pub fn lookup(&self, id: &Ident) -> Result<&P, ScopeError> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(id))
            .ok_or_else(|| ScopeError::Undeclared(id.clone()))
    }

    /// Replaces the payload of `id` in the nearest scope declaring it and
    /// returns the previous payload
    pub fn update(&mut self, id: &Ident, payload: P) -> Result<P, ScopeError> {
        let slot = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(id))
            .ok_or_else(|| ScopeError::Undeclared(id.clone()))?;
        Ok(std::mem::replace(slot, payload))
    }

    fn innermost_mut(&mut self) -> &mut HashMap<Ident, P> {
        if self.scopes.is_empty() {
            self.scopes.push(HashMap::new());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

impl<P> Default for Environment<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Ident {
        Ident::new(name)
    }

    #[test]
    fn test_declare_and_lookup() {
        let mut env = Environment::new();
        env.declare(id("x"), 42).unwrap();

        assert_eq!(env.lookup(&id("x")), Ok(&42));
    }

    #[test]
    fn test_undeclared_lookup() {
        let env: Environment<i32> = Environment::new();
        assert_eq!(
            env.lookup(&id("missing")),
            Err(ScopeError::Undeclared(id("missing")))
        );
    }

    #[test]
    fn test_redeclaration_in_same_scope_fails() {
        let mut env = Environment::new();
        env.declare(id("x"), 1).unwrap();

        let result = env.declare(id("x"), 1);
        assert_eq!(result, Err(ScopeError::AlreadyDeclared(id("x"))));
        // The first binding is untouched
        assert_eq!(env.lookup(&id("x")), Ok(&1));
    }

    #[test]
    fn test_shadowing_and_restore() {
        let mut env = Environment::new();
        env.declare(id("x"), 10).unwrap();

        env.enter_scope();
        env.declare(id("x"), 20).unwrap();
        env.declare(id("y"), 30).unwrap();
        assert_eq!(env.lookup(&id("x")), Ok(&20));
        assert_eq!(env.lookup(&id("y")), Ok(&30));

        env.exit_scope();
        assert_eq!(env.lookup(&id("x")), Ok(&10));
        assert!(env.lookup(&id("y")).is_err());
    }

    #[test]
    fn test_update_targets_nearest_declaring_scope() {
        let mut env = Environment::new();
        env.declare(id("x"), 1).unwrap();

        env.enter_scope();
        env.enter_scope();
        assert_eq!(env.update(&id("x"), 5), Ok(1));
        assert!(!env.scopes[2].contains_key(&id("x")));

        env.exit_scope();
        env.exit_scope();
        assert_eq!(env.lookup(&id("x")), Ok(&5));
    }

    #[test]
    fn test_update_undeclared_fails() {
        let mut env = Environment::new();
        assert_eq!(
            env.update(&id("x"), 1),
            Err(ScopeError::Undeclared(id("x")))
        );
    }

    #[test]
    fn test_global_scope_is_never_popped() {
        let mut env = Environment::new();
        env.declare(id("x"), 1).unwrap();
        env.exit_scope();
        env.exit_scope();

        assert_eq!(env.scopes.len(), 1);
        assert_eq!(env.lookup(&id("x")), Ok(&1));
    }

    #[test]
    fn test_nested_scopes_stack() {
        let mut env: Environment<()> = Environment::new();
        assert_eq!(env.scopes.len(), 1);

        env.enter_scope();
        env.enter_scope();
        assert_eq!(env.scopes.len(), 3);

        env.exit_scope();
        assert_eq!(env.scopes.len(), 2);
    }
}
