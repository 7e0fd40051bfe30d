//! AST visitors that collect what a declaration touches.

use indexmap::IndexMap;
use oxc_ast::ast::{
    AssignmentExpression, BindingPatternKind, CallExpression, Expression, IdentifierReference,
    SimpleAssignmentTarget, StaticMemberExpression, UpdateExpression, VariableDeclarator,
};
use oxc_ast_visit::{Visit, walk};
use tangle_graph::Relation;

use super::binder::Binder;

/// Merge a relation into a label → relation map, keeping the strongest.
fn record(references: &mut IndexMap<String, Relation>, name: &str, relation: Relation) {
    references
        .entry(name.to_string())
        .and_modify(|existing| *existing = existing.merge(relation))
        .or_insert(relation);
}

/// Identifier at the root of a member chain (`a` in `a.b[c].d`).
pub(crate) fn member_root<'b, 'a>(expression: &'b Expression<'a>) -> Option<&'b IdentifierReference<'a>> {
    match expression {
        Expression::Identifier(ident) => Some(ident),
        Expression::StaticMemberExpression(member) => member_root(&member.object),
        Expression::ComputedMemberExpression(member) => member_root(&member.object),
        Expression::PrivateFieldExpression(member) => member_root(&member.object),
        Expression::ParenthesizedExpression(inner) => member_root(&inner.expression),
        Expression::TSNonNullExpression(inner) => member_root(&inner.expression),
        _ => None,
    }
}

fn target_root<'b, 'a>(target: &'b SimpleAssignmentTarget<'a>) -> Option<&'b IdentifierReference<'a>> {
    match target {
        SimpleAssignmentTarget::AssignmentTargetIdentifier(ident) => Some(ident),
        SimpleAssignmentTarget::StaticMemberExpression(member) => member_root(&member.object),
        SimpleAssignmentTarget::ComputedMemberExpression(member) => member_root(&member.object),
        SimpleAssignmentTarget::PrivateFieldExpression(member) => member_root(&member.object),
        _ => None,
    }
}

/// `this.<name>` when `expression` is exactly such a member access.
fn this_member<'b>(expression: &'b Expression<'_>) -> Option<&'b str> {
    match expression.get_inner_expression() {
        Expression::StaticMemberExpression(member) => this_property(member),
        _ => None,
    }
}

fn this_property<'b>(member: &'b StaticMemberExpression<'_>) -> Option<&'b str> {
    matches!(member.object.get_inner_expression(), Expression::ThisExpression(_))
        .then(|| member.property.name.as_str())
}

fn target_this_member<'b>(target: &'b SimpleAssignmentTarget<'_>) -> Option<&'b str> {
    match target {
        SimpleAssignmentTarget::StaticMemberExpression(member) => this_property(member),
        _ => None,
    }
}

/// Collects identifiers that resolve to bindings of one scope.
///
/// Assignment and update targets (including member roots such as
/// `count.value = …`) count as writes, direct callees as calls, everything
/// else as reads.
pub(crate) struct ScopeReferences<'b, B: Binder> {
    binder: &'b B,
    root: B::Scope,
    pub references: IndexMap<String, Relation>,
}

impl<'b, B: Binder> ScopeReferences<'b, B> {
    pub(crate) fn new(binder: &'b B, root: B::Scope) -> Self {
        Self {
            binder,
            root,
            references: IndexMap::new(),
        }
    }

    fn add(&mut self, ident: &IdentifierReference<'_>, relation: Relation) {
        if self.binder.references_scope(ident, self.root) {
            record(&mut self.references, ident.name.as_str(), relation);
        }
    }
}

impl<'a, B: Binder> Visit<'a> for ScopeReferences<'_, B> {
    fn visit_identifier_reference(&mut self, it: &IdentifierReference<'a>) {
        self.add(it, Relation::Read);
    }

    fn visit_assignment_expression(&mut self, it: &AssignmentExpression<'a>) {
        if let Some(root) = it.left.as_simple_assignment_target().and_then(target_root) {
            self.add(root, Relation::Write);
        }
        walk::walk_assignment_expression(self, it);
    }

    fn visit_update_expression(&mut self, it: &UpdateExpression<'a>) {
        if let Some(root) = target_root(&it.argument) {
            self.add(root, Relation::Write);
        }
        walk::walk_update_expression(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if let Expression::Identifier(callee) = it.callee.get_inner_expression() {
            self.add(callee, Relation::Call);
        }
        walk::walk_call_expression(self, it);
    }
}

/// Collects `this.<member>` accesses (options-style components).
#[derive(Default)]
pub(crate) struct ThisMembers {
    pub members: IndexMap<String, Relation>,
}

impl<'a> Visit<'a> for ThisMembers {
    fn visit_static_member_expression(&mut self, it: &StaticMemberExpression<'a>) {
        if let Some(name) = this_property(it) {
            record(&mut self.members, name, Relation::Read);
        }
        walk::walk_static_member_expression(self, it);
    }

    fn visit_assignment_expression(&mut self, it: &AssignmentExpression<'a>) {
        if let Some(name) = it.left.as_simple_assignment_target().and_then(target_this_member) {
            record(&mut self.members, name, Relation::Write);
        }
        walk::walk_assignment_expression(self, it);
    }

    fn visit_update_expression(&mut self, it: &UpdateExpression<'a>) {
        if let Some(name) = target_this_member(&it.argument) {
            record(&mut self.members, name, Relation::Write);
        }
        walk::walk_update_expression(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if let Some(name) = this_member(&it.callee) {
            record(&mut self.members, name, Relation::Call);
        }
        walk::walk_call_expression(self, it);
    }

    // const { a, b } = this
    fn visit_variable_declarator(&mut self, it: &VariableDeclarator<'a>) {
        let from_this = it
            .init
            .as_ref()
            .is_some_and(|init| matches!(init.get_inner_expression(), Expression::ThisExpression(_)));
        if let (true, BindingPatternKind::ObjectPattern(pattern)) = (from_this, &it.id.kind) {
            for property in &pattern.properties {
                if let Some(key) = property.key.static_name() {
                    record(&mut self.members, &key, Relation::Read);
                }
            }
        }
        walk::walk_variable_declarator(self, it);
    }
}

#[cfg(test)]
mod tests {
    use oxc_ast::ast::Statement;

    use super::super::source::with_program;
    use super::*;

    /// References made by the initializer of the last declaration in `source`,
    /// restricted to program scope.
    fn references(source: &str) -> Vec<(String, Relation)> {
        with_program(source, false, |program, binder, _| {
            let root = binder.program_scope(program).unwrap();
            let mut collector = ScopeReferences::new(binder, root);
            if let Some(Statement::VariableDeclaration(declaration)) = program.body.last() {
                if let Some(init) = &declaration.declarations[0].init {
                    collector.visit_expression(init);
                }
            }
            collector.references.into_iter().collect()
        })
        .unwrap()
    }

    #[test]
    fn test_relations_are_classified() {
        let refs = references(
            "let count = 0\nlet log = () => {}\nlet total = 1\n\
             const run = () => { count.value++; log(); return total }",
        );
        assert_eq!(
            refs,
            vec![
                ("count".to_string(), Relation::Write),
                ("log".to_string(), Relation::Call),
                ("total".to_string(), Relation::Read),
            ]
        );
    }

    #[test]
    fn test_shadowed_and_global_names_are_ignored() {
        let refs = references("let item = 1\nconst pick = (item) => item + window.innerWidth");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_write_wins_over_read() {
        let refs = references("let state = {}\nconst reset = () => { console.log(state.a); state.a = 1 }");
        assert_eq!(refs, vec![("state".to_string(), Relation::Write)]);
    }

    #[test]
    fn test_this_members() {
        let members = with_program(
            "function handler() { this.count++; this.save(); const { total } = this; return this.label }",
            false,
            |program, _, _| {
                let mut collector = ThisMembers::default();
                collector.visit_program(program);
                collector.members.into_iter().collect::<Vec<_>>()
            },
        )
        .unwrap();

        assert_eq!(
            members,
            vec![
                ("count".to_string(), Relation::Write),
                ("save".to_string(), Relation::Call),
                ("total".to_string(), Relation::Read),
                ("label".to_string(), Relation::Read),
            ]
        );
    }
}
