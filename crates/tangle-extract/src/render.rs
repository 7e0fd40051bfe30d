//! Render functions and class components written in TSX/JSX.

use indexmap::IndexSet;
use oxc_ast::ast::{
    Class, ClassElement, Declaration, ExportDefaultDeclarationKind, Expression, Function,
    FunctionBody, ObjectExpression, Program, Statement,
};
use oxc_ast_visit::Visit;

use super::binder::Binder;
use super::builder::GraphBuilder;
use super::composition::{extract_statements, function_body};
use super::options::{analyze_options_object, component_object};
use super::source::SourceIndex;
use super::visitor::ScopeReferences;

/// Graph of the component found in a TSX program and the names its JSX uses.
#[derive(Debug, Default)]
pub(crate) struct RenderOutcome {
    pub builder: GraphBuilder,
    pub used: IndexSet<String>,
}

#[derive(Clone, Copy)]
enum Candidate<'b, 'a> {
    Function(&'b Function<'a>),
    Class(&'b Class<'a>),
    Expression(&'b Expression<'a>),
}

enum Target<'b, 'a, S> {
    Body(&'b FunctionBody<'a>, S, bool),
    Options(&'b ObjectExpression<'a>),
}

/// Top-level named functions, classes and initialized constants, exported or
/// not, in source order.
fn named_candidates<'b, 'a>(program: &'b Program<'a>) -> Vec<(&'b str, Candidate<'b, 'a>)> {
    let mut candidates = Vec::new();
    for statement in &program.body {
        let declaration = match statement {
            Statement::ExportNamedDeclaration(export) => export.declaration.as_ref(),
            other => other.as_declaration(),
        };
        match declaration {
            Some(Declaration::FunctionDeclaration(function)) => {
                if let Some(id) = &function.id {
                    candidates.push((id.name.as_str(), Candidate::Function(function)));
                }
            }
            Some(Declaration::ClassDeclaration(class)) => {
                if let Some(id) = &class.id {
                    candidates.push((id.name.as_str(), Candidate::Class(class)));
                }
            }
            Some(Declaration::VariableDeclaration(variables)) => {
                for declarator in &variables.declarations {
                    if let (Some(id), Some(init)) = (declarator.id.get_binding_identifier(), &declarator.init) {
                        candidates.push((id.name.as_str(), Candidate::Expression(init)));
                    }
                }
            }
            _ => {}
        }
    }
    candidates
}

fn class_render<'b, 'a>(class: &'b Class<'a>) -> Option<&'b Function<'a>> {
    class.body.body.iter().find_map(|element| match element {
        ClassElement::MethodDefinition(method)
            if method.key.static_name().is_some_and(|name| name == "render") =>
        {
            Some(&*method.value)
        }
        _ => None,
    })
}

fn function_target<'b, 'a, B: Binder>(
    function: &'b Function<'a>,
    binder: &B,
) -> Option<Target<'b, 'a, B::Scope>> {
    Some(Target::Body(
        function.body.as_deref()?,
        binder.function_scope(function)?,
        false,
    ))
}

fn resolve<'b, 'a, B: Binder>(
    candidate: Candidate<'b, 'a>,
    binder: &B,
) -> Option<Target<'b, 'a, B::Scope>> {
    match candidate {
        Candidate::Function(function) => function_target(function, binder),
        Candidate::Class(class) => function_target(class_render(class)?, binder),
        Candidate::Expression(expression) => {
            if let Some((body, scope, expression_body)) = function_body(expression, binder) {
                return Some(Target::Body(body, scope, expression_body));
            }
            if let Expression::ClassExpression(class) = expression.get_inner_expression() {
                return function_target(class_render(class)?, binder);
            }
            component_object(expression).map(Target::Options)
        }
    }
}

/// The component of a program: its default export, or else the first
/// capitalized top-level function.
fn find_component<'b, 'a, B: Binder>(
    program: &'b Program<'a>,
    binder: &B,
) -> Option<Target<'b, 'a, B::Scope>> {
    let candidates = named_candidates(program);

    let default_export = program.body.iter().find_map(|statement| match statement {
        Statement::ExportDefaultDeclaration(export) => Some(&export.declaration),
        _ => None,
    });

    if let Some(kind) = default_export {
        let candidate = match kind {
            ExportDefaultDeclarationKind::FunctionDeclaration(function) => Candidate::Function(function),
            ExportDefaultDeclarationKind::ClassDeclaration(class) => Candidate::Class(class),
            other => {
                let expression = other.as_expression()?;
                if let Expression::Identifier(ident) = expression.get_inner_expression() {
                    let (_, named) = candidates
                        .into_iter()
                        .find(|(name, _)| *name == ident.name.as_str())?;
                    return resolve(named, binder);
                }
                Candidate::Expression(expression)
            }
        };
        return resolve(candidate, binder);
    }

    candidates
        .iter()
        .filter(|(name, _)| name.starts_with(|c: char| c.is_ascii_uppercase()))
        .find_map(|(_, candidate)| match resolve(*candidate, binder)? {
            target @ Target::Body(..) => Some(target),
            Target::Options(_) => None,
        })
}

/// Whether a returned expression produces JSX on some branch.
fn returns_jsx(expression: &Expression<'_>) -> bool {
    match expression.get_inner_expression() {
        Expression::JSXElement(_) | Expression::JSXFragment(_) => true,
        Expression::ConditionalExpression(conditional) => {
            returns_jsx(&conditional.consequent) || returns_jsx(&conditional.alternate)
        }
        Expression::LogicalExpression(logical) => returns_jsx(&logical.right),
        _ => false,
    }
}

/// Root-scope names referenced by JSX returned directly from `body`.
fn jsx_usage<B: Binder>(
    body: &FunctionBody<'_>,
    scope: B::Scope,
    expression_body: bool,
    binder: &B,
) -> IndexSet<String> {
    let mut collector = ScopeReferences::new(binder, scope);
    for statement in &body.statements {
        let returned = match statement {
            Statement::ReturnStatement(ret) => ret.argument.as_ref(),
            Statement::ExpressionStatement(statement) if expression_body => Some(&statement.expression),
            _ => None,
        };
        if let Some(returned) = returned.filter(|returned| returns_jsx(returned)) {
            collector.visit_expression(returned);
        }
    }
    collector.references.into_keys().collect()
}

/// Extract the component defined by a TSX program.
pub(crate) fn analyze_render_program<B: Binder>(
    program: &Program<'_>,
    binder: &B,
    index: &SourceIndex<'_>,
    line_offset: u32,
) -> RenderOutcome {
    match find_component(program, binder) {
        Some(Target::Body(body, scope, expression_body)) => {
            let mut builder = GraphBuilder::new(line_offset);
            extract_statements(&body.statements, scope, binder, index, &mut builder);
            let used = jsx_usage(body, scope, expression_body, binder);
            RenderOutcome { builder, used }
        }
        Some(Target::Options(object)) => {
            let outcome = analyze_options_object(object, binder, index, line_offset);
            RenderOutcome {
                builder: outcome.builder,
                used: outcome.used,
            }
        }
        None => {
            tracing::debug!("no component found in tsx source");
            RenderOutcome::default()
        }
    }
}
