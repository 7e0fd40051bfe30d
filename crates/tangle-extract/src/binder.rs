//! Scope identity for identifiers.
//!
//! Extraction only needs to answer "does this name belong to the scope being
//! analyzed?". [`Binder`] captures exactly that; [`OxcBinder`] answers it from
//! the scoping tables built by `oxc_semantic`.

use oxc_ast::ast::{ArrowFunctionExpression, BindingIdentifier, Function, IdentifierReference, Program};
use oxc_semantic::{ScopeId, Scoping};

/// Scope lookups the symbol extractor relies on.
pub trait Binder {
    /// Opaque scope handle.
    type Scope: Copy + Eq + std::fmt::Debug;

    /// Scope that declares `name` as seen from `scope` (searching outward).
    fn resolve_binding(&self, name: &str, scope: Self::Scope) -> Option<Self::Scope>;

    /// Scope that declares a binding identifier.
    fn binding_scope(&self, ident: &BindingIdentifier<'_>) -> Option<Self::Scope>;

    /// Scope that declares whatever a reference resolves to. `None` for
    /// globals and other unresolved references.
    fn reference_scope(&self, ident: &IdentifierReference<'_>) -> Option<Self::Scope>;

    fn scopes_equal(&self, a: Self::Scope, b: Self::Scope) -> bool {
        a == b
    }

    fn program_scope(&self, program: &Program<'_>) -> Option<Self::Scope>;

    fn function_scope(&self, function: &Function<'_>) -> Option<Self::Scope>;

    fn arrow_scope(&self, arrow: &ArrowFunctionExpression<'_>) -> Option<Self::Scope>;

    /// Whether `ident` refers to a binding declared directly in `root`.
    fn references_scope(&self, ident: &IdentifierReference<'_>, root: Self::Scope) -> bool {
        self.reference_scope(ident)
            .is_some_and(|scope| self.scopes_equal(scope, root))
    }
}

/// [`Binder`] over the scoping tables of an analyzed program.
#[derive(Clone, Copy)]
pub struct OxcBinder<'s> {
    scoping: &'s Scoping,
}

impl<'s> OxcBinder<'s> {
    pub fn new(scoping: &'s Scoping) -> Self {
        Self { scoping }
    }
}

impl Binder for OxcBinder<'_> {
    type Scope = ScopeId;

    fn resolve_binding(&self, name: &str, scope: ScopeId) -> Option<ScopeId> {
        self.scoping
            .find_binding(scope, name)
            .map(|symbol| self.scoping.symbol_scope_id(symbol))
    }

    fn binding_scope(&self, ident: &BindingIdentifier<'_>) -> Option<ScopeId> {
        ident
            .symbol_id
            .get()
            .map(|symbol| self.scoping.symbol_scope_id(symbol))
    }

    fn reference_scope(&self, ident: &IdentifierReference<'_>) -> Option<ScopeId> {
        let reference = ident.reference_id.get()?;
        let symbol = self.scoping.get_reference(reference).symbol_id()?;
        Some(self.scoping.symbol_scope_id(symbol))
    }

    fn program_scope(&self, program: &Program<'_>) -> Option<ScopeId> {
        program.scope_id.get()
    }

    fn function_scope(&self, function: &Function<'_>) -> Option<ScopeId> {
        function.scope_id.get()
    }

    fn arrow_scope(&self, arrow: &ArrowFunctionExpression<'_>) -> Option<ScopeId> {
        arrow.scope_id.get()
    }
}
