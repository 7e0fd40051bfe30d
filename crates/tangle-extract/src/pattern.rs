//! Flattening of declaration patterns into the names they bind.

use oxc_ast::ast::{BindingIdentifier, BindingPattern, BindingPatternKind};

use super::binder::Binder;

/// How a name was reached inside its pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingRole {
    /// `const name = …`
    Direct,
    /// A property or element of an object/array pattern
    Destructured,
    /// `...rest`
    Rest,
}

/// One name bound by a declaration pattern.
#[derive(Debug, Clone, Copy)]
pub struct FlatBinding<'p, 'a> {
    pub name: &'p str,
    pub ident: &'p BindingIdentifier<'a>,
    pub role: BindingRole,
}

/// Every name bound by `pattern` that lives in `root`, in source order.
///
/// Handles renaming (`{ a: b }` binds `b`), nesting, rest elements and
/// default values. Names declared anywhere else are dropped.
pub fn flatten_pattern<'p, 'a, B: Binder>(
    pattern: &'p BindingPattern<'a>,
    root: B::Scope,
    binder: &B,
) -> Vec<FlatBinding<'p, 'a>> {
    let mut bindings = Vec::new();
    collect(pattern, BindingRole::Direct, &mut bindings);
    bindings.retain(|binding| {
        binder
            .resolve_binding(binding.name, root)
            .is_some_and(|scope| binder.scopes_equal(scope, root))
    });
    bindings
}

fn collect<'p, 'a>(
    pattern: &'p BindingPattern<'a>,
    role: BindingRole,
    out: &mut Vec<FlatBinding<'p, 'a>>,
) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => out.push(FlatBinding {
            name: ident.name.as_str(),
            ident,
            role,
        }),
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                collect(&property.value, BindingRole::Destructured, out);
            }
            if let Some(rest) = &object.rest {
                collect(&rest.argument, BindingRole::Rest, out);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                collect(element, BindingRole::Destructured, out);
            }
            if let Some(rest) = &array.rest {
                collect(&rest.argument, BindingRole::Rest, out);
            }
        }
        BindingPatternKind::AssignmentPattern(assignment) => collect(&assignment.left, role, out),
    }
}
