//! Composition-style extraction: top-level declarations of one scope.
//!
//! Used for `<script setup>` programs, `setup()` bodies and render
//! functions. Every top-level variable declarator and function declaration
//! becomes a node; what its initializer or body touches in the same scope
//! becomes its edges. Top-level calls to lifecycle hooks and watchers tag the
//! declarations they reference.

use oxc_ast::ast::{CallExpression, Expression, FunctionBody, Statement, VariableDeclarator};
use oxc_ast_visit::Visit;
use tangle_graph::NodeKind;

use super::binder::Binder;
use super::builder::GraphBuilder;
use super::pattern::{BindingRole, flatten_pattern};
use super::source::SourceIndex;
use super::visitor::ScopeReferences;

/// Calls whose arguments mark declarations as used outside the template.
pub const HOOKS: &[&str] = &[
    "onBeforeMount",
    "onMounted",
    "onBeforeUpdate",
    "onUpdated",
    "onBeforeUnmount",
    "onUnmounted",
    "onActivated",
    "onDeactivated",
    "onErrorCaptured",
    "onRenderTracked",
    "onRenderTriggered",
    "onServerPrefetch",
    "watch",
    "watchEffect",
    "watchPostEffect",
    "watchSyncEffect",
    "provide",
    "defineExpose",
];

/// Arrow functions and function expressions (through parentheses and type
/// assertions).
pub(crate) fn is_function_like(expression: &Expression<'_>) -> bool {
    matches!(
        expression.get_inner_expression(),
        Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_)
    )
}

/// Body and scope of a function or arrow expression. The flag is set for
/// expression-bodied arrows, whose single statement is the returned value.
pub(crate) fn function_body<'b, 'a, B: Binder>(
    expression: &'b Expression<'a>,
    binder: &B,
) -> Option<(&'b FunctionBody<'a>, B::Scope, bool)> {
    match expression.get_inner_expression() {
        Expression::FunctionExpression(function) => Some((
            function.body.as_deref()?,
            binder.function_scope(function)?,
            false,
        )),
        Expression::ArrowFunctionExpression(arrow) => {
            Some((&arrow.body, binder.arrow_scope(arrow)?, arrow.expression))
        }
        _ => None,
    }
}

/// Value returned by a function body: the last top-level `return`, or the
/// expression of an expression-bodied arrow.
pub(crate) fn returned_expression<'b, 'a>(
    body: &'b FunctionBody<'a>,
    expression_body: bool,
) -> Option<&'b Expression<'a>> {
    if expression_body {
        return match body.statements.first() {
            Some(Statement::ExpressionStatement(statement)) => Some(&statement.expression),
            _ => None,
        };
    }
    body.statements.iter().rev().find_map(|statement| match statement {
        Statement::ReturnStatement(ret) => ret.argument.as_ref(),
        _ => None,
    })
}

fn declarator_kind(declarator: &VariableDeclarator<'_>, role: BindingRole) -> NodeKind {
    let function_init = declarator.init.as_ref().is_some_and(is_function_like);
    if role == BindingRole::Direct && function_init {
        NodeKind::Function
    } else {
        NodeKind::Variable
    }
}

/// Name of the hook when `expression` is a call to one.
pub(crate) fn hook_call<'b, 'a>(
    expression: &'b Expression<'a>,
) -> Option<(&'b str, &'b CallExpression<'a>)> {
    let Expression::CallExpression(call) = expression.get_inner_expression() else {
        return None;
    };
    let Expression::Identifier(callee) = call.callee.get_inner_expression() else {
        return None;
    };
    let name = callee.name.as_str();
    HOOKS.contains(&name).then_some((name, &**call))
}

/// Register the top-level declarations of `statements` (declared in `root`)
/// and wire their edges.
pub(crate) fn extract_statements<B: Binder>(
    statements: &[Statement<'_>],
    root: B::Scope,
    binder: &B,
    index: &SourceIndex<'_>,
    builder: &mut GraphBuilder,
) {
    for statement in statements {
        match statement {
            Statement::VariableDeclaration(declaration) => {
                for declarator in &declaration.declarations {
                    for binding in flatten_pattern(&declarator.id, root, binder) {
                        builder.declare(
                            binding.name,
                            declarator_kind(declarator, binding.role),
                            index.declaration(binding.ident.span.start, declaration.span.start),
                        );
                    }
                }
            }
            Statement::FunctionDeclaration(function) => {
                let Some(id) = &function.id else { continue };
                let declared_here = binder
                    .binding_scope(id)
                    .is_some_and(|scope| binder.scopes_equal(scope, root));
                if declared_here {
                    builder.declare(
                        id.name.as_str(),
                        NodeKind::Function,
                        index.declaration(id.span.start, function.span.start),
                    );
                }
            }
            _ => {}
        }
    }

    for statement in statements {
        match statement {
            Statement::VariableDeclaration(declaration) => {
                for declarator in &declaration.declarations {
                    let mut collector = ScopeReferences::new(binder, root);
                    collector.visit_variable_declarator(declarator);

                    let bindings = flatten_pattern(&declarator.id, root, binder);
                    for binding in &bindings {
                        builder.link(binding.name, &collector.references);
                    }

                    if let Some((hook, _)) = declarator.init.as_ref().and_then(|init| hook_call(init)) {
                        builder.tag(hook, collector.references.keys());
                    }
                }
            }
            Statement::FunctionDeclaration(function) => {
                let Some(id) = &function.id else { continue };
                if !builder.is_declared(id.name.as_str()) {
                    continue;
                }
                let mut collector = ScopeReferences::new(binder, root);
                collector.visit_formal_parameters(&function.params);
                if let Some(body) = &function.body {
                    collector.visit_function_body(body);
                }
                builder.link(id.name.as_str(), &collector.references);
            }
            Statement::ExpressionStatement(statement) => {
                let Some((hook, call)) = hook_call(&statement.expression) else {
                    continue;
                };
                let mut collector = ScopeReferences::new(binder, root);
                for argument in &call.arguments {
                    collector.visit_argument(argument);
                }
                tracing::trace!(
                    hook,
                    line = index.location(statement.span.start).0,
                    references = collector.references.len(),
                    "hook call"
                );
                builder.tag(hook, collector.references.keys());
            }
            _ => {}
        }
    }
}
