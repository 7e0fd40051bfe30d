//! `setup()` analysis: composition extraction of the body, then
//! reconciliation against what the function returns.

use indexmap::{IndexMap, IndexSet};
use oxc_ast::ast::{
    BindingPatternKind, Expression, FunctionBody, ObjectExpression, ObjectProperty,
    ObjectPropertyKind, Statement,
};
use oxc_ast_visit::Visit;
use oxc_span::GetSpan;
use tangle_graph::{NodeKind, Relation};

use super::binder::Binder;
use super::builder::GraphBuilder;
use super::composition::{extract_statements, is_function_like, returned_expression};
use super::source::SourceIndex;
use super::visitor::ScopeReferences;

/// Graph exposed by a setup function plus the names its returned render
/// function uses.
#[derive(Debug, Default)]
pub(crate) struct SetupOutcome {
    pub builder: GraphBuilder,
    pub used: IndexSet<String>,
}

/// Analyze a setup body declared in `scope`.
pub(crate) fn analyze_setup<B: Binder>(
    body: &FunctionBody<'_>,
    scope: B::Scope,
    expression_body: bool,
    binder: &B,
    index: &SourceIndex<'_>,
    line_offset: u32,
) -> SetupOutcome {
    let mut inner = GraphBuilder::new(line_offset);
    extract_statements(&body.statements, scope, binder, index, &mut inner);

    let returned = returned_expression(body, expression_body);
    let Some(Expression::ObjectExpression(object)) = returned.map(Expression::get_inner_expression)
    else {
        // Render function or nothing returned: keep the whole body graph and
        // treat what the returned value touches as used.
        let mut used = IndexSet::new();
        if let Some(returned) = returned {
            let mut collector = ScopeReferences::new(binder, scope);
            collector.visit_expression(returned);
            used.extend(collector.references.into_keys());
        }
        tracing::trace!(nodes = inner.registry.len(), used = used.len(), "setup without object return");
        return SetupOutcome {
            builder: inner,
            used,
        };
    };

    let groups = spread_groups(object, &body.statements, scope, binder, index, &mut inner);
    let builder = reconcile(object, &groups, scope, binder, index, inner, line_offset);
    SetupOutcome {
        builder,
        used: IndexSet::new(),
    }
}

/// Name spread into the returned object (`...state`, `...toRefs(state)`).
fn spread_source<'b>(argument: &'b Expression<'_>) -> Option<&'b str> {
    match argument.get_inner_expression() {
        Expression::Identifier(ident) => Some(ident.name.as_str()),
        Expression::CallExpression(call) => match call.arguments.first()?.as_expression()? {
            Expression::Identifier(ident) => Some(ident.name.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// Object literal a declarator initializes `name` with, directly or as the
/// first argument of a call (`reactive({ … })`).
fn initializer_object<'b, 'a>(
    statements: &'b [Statement<'a>],
    name: &str,
) -> Option<&'b ObjectExpression<'a>> {
    let init = statements.iter().find_map(|statement| {
        let Statement::VariableDeclaration(declaration) = statement else {
            return None;
        };
        declaration.declarations.iter().find_map(|declarator| match &declarator.id.kind {
            BindingPatternKind::BindingIdentifier(ident) if ident.name.as_str() == name => {
                declarator.init.as_ref()
            }
            _ => None,
        })
    })?;

    match init.get_inner_expression() {
        Expression::ObjectExpression(object) => Some(object),
        Expression::CallExpression(call) => match call.arguments.first()?.as_expression()? {
            Expression::ObjectExpression(object) => Some(object),
            _ => None,
        },
        _ => None,
    }
}

fn property_kind(property: &ObjectProperty<'_>) -> NodeKind {
    if property.method || is_function_like(&property.value) {
        NodeKind::Function
    } else {
        NodeKind::Variable
    }
}

/// Register the keys of every spread object as setup nodes and return the
/// keys per spread name.
fn spread_groups<B: Binder>(
    object: &ObjectExpression<'_>,
    statements: &[Statement<'_>],
    scope: B::Scope,
    binder: &B,
    index: &SourceIndex<'_>,
    inner: &mut GraphBuilder,
) -> IndexMap<String, Vec<String>> {
    let mut groups = IndexMap::new();

    for property in &object.properties {
        let ObjectPropertyKind::SpreadProperty(spread) = property else {
            continue;
        };
        let Some(name) = spread_source(&spread.argument) else {
            continue;
        };
        let Some(source) = initializer_object(statements, name) else {
            continue;
        };

        let mut keys = Vec::new();
        for member in &source.properties {
            let ObjectPropertyKind::ObjectProperty(member) = member else {
                continue;
            };
            let Some(key) = member.key.static_name() else {
                continue;
            };
            inner.declare(
                &key,
                property_kind(member),
                index.declaration(member.key.span().start, member.span.start),
            );
            keys.push((key.into_owned(), member));
        }

        for (key, member) in &keys {
            let mut collector = ScopeReferences::new(binder, scope);
            collector.visit_expression(&member.value);
            inner.link(key, &collector.references);
        }

        groups.insert(name.to_string(), keys.into_iter().map(|(key, _)| key).collect());
    }

    groups
}

/// Build the exposed graph from the returned object literal.
fn reconcile<B: Binder>(
    object: &ObjectExpression<'_>,
    groups: &IndexMap<String, Vec<String>>,
    scope: B::Scope,
    binder: &B,
    index: &SourceIndex<'_>,
    mut inner: GraphBuilder,
    line_offset: u32,
) -> GraphBuilder {
    let mut out = GraphBuilder::new(line_offset);
    let mut inline = Vec::new();

    let import = |out: &mut GraphBuilder, inner: &GraphBuilder, label: &str| {
        if let Some(node) = inner.registry.get(label) {
            out.declare_node(node.clone());
            out.raw.import(label, &inner.raw);
        }
    };

    for property in &object.properties {
        match property {
            ObjectPropertyKind::SpreadProperty(spread) => {
                let group = spread_source(&spread.argument).and_then(|name| groups.get(name));
                for key in group.into_iter().flatten() {
                    import(&mut out, &inner, key);
                }
            }
            ObjectPropertyKind::ObjectProperty(property) => {
                let Some(key) = property.key.static_name() else {
                    continue;
                };
                let value = match property.value.get_inner_expression() {
                    Expression::Identifier(ident) if inner.is_declared(ident.name.as_str()) => {
                        Some(ident.name.as_str())
                    }
                    _ => None,
                };

                match value {
                    Some(value) => {
                        import(&mut out, &inner, value);
                        if key != value {
                            if let Some(node) = inner.registry.get(value) {
                                out.declare_node(node.renamed(key.as_ref()));
                                out.raw.add_edge(&key, value, Relation::Read);
                            }
                        }
                    }
                    None => {
                        out.declare(
                            &key,
                            property_kind(property),
                            index.declaration(property.key.span().start, property.span.start),
                        );
                        inline.push((key.into_owned(), &**property));
                    }
                }
            }
        }
    }

    // Inline values may reference any exposed name, so wire them last.
    for (key, property) in inline {
        let mut collector = ScopeReferences::new(binder, scope);
        collector.visit_expression(&property.value);
        out.link(&key, &collector.references);
    }

    out.registry.absorb_conflicts(&mut inner.registry);
    out
}

#[cfg(test)]
mod tests {
    use tangle_graph::Graph;

    use super::super::composition::function_body;
    use super::super::source::with_program;
    use super::*;

    /// Analyze `export default { setup … }` and return the graph and used set.
    fn setup(source: &str) -> (Graph, Vec<String>) {
        with_program(source, true, |program, binder, index| {
            let Some(Statement::ExportDefaultDeclaration(export)) = program.body.last() else {
                panic!("expected a default export");
            };
            let Some(Expression::ObjectExpression(component)) = export.declaration.as_expression() else {
                panic!("expected an object");
            };
            let ObjectPropertyKind::ObjectProperty(property) = &component.properties[0] else {
                panic!("expected setup");
            };
            let (body, scope, expression_body) = function_body(&property.value, binder).unwrap();
            let outcome = analyze_setup(body, scope, expression_body, binder, index, 0);
            (outcome.builder.finish().0, outcome.used.into_iter().collect())
        })
        .unwrap()
    }

    #[test]
    fn test_object_return_imports_and_renames() {
        let (graph, used) = setup(
            r"export default {
  setup() {
    const count = ref(0)
    const hidden = ref(1)
    function increment() { count.value++ }
    return { count, add: increment }
  }
}",
        );

        assert_eq!(graph.labels().collect::<Vec<_>>(), vec!["count", "increment", "add"]);
        assert_eq!(graph.node("add").unwrap().kind, NodeKind::Function);
        assert_eq!(graph.relation("add", "increment"), Some(Relation::Read));
        assert_eq!(graph.relation("increment", "count"), Some(Relation::Write));
        assert!(!graph.contains("hidden"));
        assert!(used.is_empty());
    }

    #[test]
    fn test_spread_groups_are_imported() {
        let (graph, _) = setup(
            r"export default {
  setup() {
    const limit = 10
    const state = reactive({ page: 1, size: limit, next() {} })
    return { ...toRefs(state), limit }
  }
}",
        );

        assert_eq!(graph.labels().collect::<Vec<_>>(), vec!["page", "size", "next", "limit"]);
        assert_eq!(graph.node("next").unwrap().kind, NodeKind::Function);
        assert_eq!(graph.relation("size", "limit"), Some(Relation::Read));
    }

    #[test]
    fn test_inline_values_become_nodes() {
        let (graph, _) = setup(
            r"export default {
  setup() {
    const count = ref(0)
    return { count, reset: () => { count.value = 0 } }
  }
}",
        );

        assert_eq!(graph.node("reset").unwrap().kind, NodeKind::Function);
        assert_eq!(graph.relation("reset", "count"), Some(Relation::Write));
    }

    #[test]
    fn test_render_function_return_keeps_graph_and_marks_usage() {
        let (graph, used) = setup(
            r"export default {
  setup: () => {
    const count = ref(0)
    const unused = ref(1)
    return () => <span>{count.value}</span>
  }
}",
        );

        assert_eq!(graph.labels().collect::<Vec<_>>(), vec!["count", "unused"]);
        assert_eq!(used, vec!["count"]);
    }
}
