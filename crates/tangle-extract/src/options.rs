//! Options-style components: `export default { data, computed, methods, … }`.

use indexmap::IndexSet;
use oxc_ast::ast::{
    Expression, ObjectExpression, ObjectProperty, ObjectPropertyKind, Program, Statement,
};
use oxc_ast_visit::Visit;
use oxc_span::GetSpan;
use tangle_graph::{NodeKind, Relation};

use super::binder::Binder;
use super::builder::GraphBuilder;
use super::composition::{function_body, returned_expression};
use super::setup::analyze_setup;
use super::source::SourceIndex;
use super::visitor::ThisMembers;

/// Option names whose bodies run as lifecycle hooks.
pub const LIFECYCLE_OPTIONS: &[&str] = &[
    "beforeCreate",
    "created",
    "beforeMount",
    "mounted",
    "beforeUpdate",
    "updated",
    "activated",
    "deactivated",
    "beforeUnmount",
    "unmounted",
    "beforeDestroy",
    "destroyed",
    "errorCaptured",
    "renderTracked",
    "renderTriggered",
    "serverPrefetch",
];

/// Graph of one options object plus what its `render` option (or the render
/// function returned from `setup`) uses.
#[derive(Debug, Default)]
pub(crate) struct OptionsOutcome {
    pub builder: GraphBuilder,
    pub used: IndexSet<String>,
}

/// The object literal of `{ … }` or `defineComponent({ … })`.
pub(crate) fn component_object<'b, 'a>(
    expression: &'b Expression<'a>,
) -> Option<&'b ObjectExpression<'a>> {
    match expression.get_inner_expression() {
        Expression::ObjectExpression(object) => Some(object),
        Expression::CallExpression(call) => match call.arguments.first()?.as_expression()? {
            Expression::ObjectExpression(object) => Some(object),
            _ => None,
        },
        _ => None,
    }
}

/// The default-exported component object of a program, if any.
pub(crate) fn default_export<'b, 'a>(program: &'b Program<'a>) -> Option<&'b ObjectExpression<'a>> {
    program.body.iter().find_map(|statement| match statement {
        Statement::ExportDefaultDeclaration(export) => {
            component_object(export.declaration.as_expression()?)
        }
        _ => None,
    })
}

fn properties<'b, 'a>(object: &'b ObjectExpression<'a>) -> impl Iterator<Item = (String, &'b ObjectProperty<'a>)> {
    object.properties.iter().filter_map(|property| match property {
        ObjectPropertyKind::ObjectProperty(property) => {
            Some((property.key.static_name()?.into_owned(), &**property))
        }
        ObjectPropertyKind::SpreadProperty(_) => None,
    })
}

/// Keys of the object a `data` option yields (factory or plain object).
fn data_object<'b, 'a, B: Binder>(
    value: &'b Expression<'a>,
    binder: &B,
) -> Option<&'b ObjectExpression<'a>> {
    let returned = match function_body(value, binder) {
        Some((body, _, expression_body)) => returned_expression(body, expression_body)?,
        None => value,
    };
    match returned.get_inner_expression() {
        Expression::ObjectExpression(object) => Some(object),
        _ => None,
    }
}

fn declare_keys(
    builder: &mut GraphBuilder,
    section: &ObjectExpression<'_>,
    kind: NodeKind,
    index: &SourceIndex<'_>,
) {
    for (key, property) in properties(section) {
        builder.declare(
            &key,
            kind,
            index.declaration(property.key.span().start, property.span.start),
        );
    }
}

fn this_members(expression: &Expression<'_>) -> ThisMembers {
    let mut collector = ThisMembers::default();
    collector.visit_expression(expression);
    collector
}

/// Extract the graph of an options object.
pub(crate) fn analyze_options_object<B: Binder>(
    object: &ObjectExpression<'_>,
    binder: &B,
    index: &SourceIndex<'_>,
    line_offset: u32,
) -> OptionsOutcome {
    let mut builder = GraphBuilder::new(line_offset);
    let mut used = IndexSet::new();

    for (name, option) in properties(object) {
        match (name.as_str(), &option.value) {
            ("data", value) => {
                if let Some(data) = data_object(value, binder) {
                    declare_keys(&mut builder, data, NodeKind::Variable, index);
                }
            }
            ("computed", Expression::ObjectExpression(section)) => {
                declare_keys(&mut builder, section, NodeKind::Variable, index);
            }
            ("methods", Expression::ObjectExpression(section)) => {
                declare_keys(&mut builder, section, NodeKind::Function, index);
            }
            ("setup", value) => {
                if let Some((body, scope, expression_body)) = function_body(value, binder) {
                    let outcome = analyze_setup(body, scope, expression_body, binder, index, line_offset);
                    builder.merge(outcome.builder);
                    used.extend(outcome.used);
                }
            }
            _ => {}
        }
    }

    for (name, option) in properties(object) {
        match (name.as_str(), &option.value) {
            ("computed" | "methods", Expression::ObjectExpression(section)) => {
                for (key, property) in properties(section) {
                    builder.link(&key, &this_members(&property.value).members);
                }
            }
            ("watch", Expression::ObjectExpression(section)) => {
                for (key, property) in properties(section) {
                    let Some(watched) = key.split('.').next().filter(|root| builder.is_declared(root)) else {
                        continue;
                    };
                    builder.tag("watch", [watched]);

                    // `count: 'onCountChange'` names a method as the handler.
                    if let Expression::StringLiteral(handler) = &property.value {
                        builder.link_one(watched, handler.value.as_str(), Relation::Call);
                    }
                    builder.link(watched, &this_members(&property.value).members);
                }
            }
            ("render", value) => {
                used.extend(this_members(value).members.into_keys());
            }
            (hook, value) if LIFECYCLE_OPTIONS.contains(&hook) => {
                builder.tag(hook, this_members(value).members.keys());
            }
            _ => {}
        }
    }

    tracing::trace!(
        nodes = builder.registry.len(),
        used = used.len(),
        "options component extracted"
    );
    OptionsOutcome { builder, used }
}
