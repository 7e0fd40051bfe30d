//! Names a `<template>` block uses.
//!
//! A small tag scanner walks the markup and keeps a stack of open elements
//! with the aliases they introduce (`v-for`, `v-slot`, `#slot`,
//! `slot-scope`). Every interpolation and directive value is parsed on its
//! own; references that resolve nowhere inside that snippet are script names,
//! minus the aliases visible at that point.

use std::sync::LazyLock;

use oxc_ast::ast::{BindingIdentifier, IdentifierReference};
use oxc_ast_visit::Visit;
use regex::Regex;
use tangle_graph::UsageSet;

use super::binder::Binder;
use super::source::with_program;

/// `alias in source` / `(a, b) of source`
static V_FOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*(.+?)\s+(?:in|of)\s+(.+?)\s*$").expect("invalid v-for regex")
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Names referenced from a template, in first-seen order. Snippets that fail
/// to parse are skipped.
pub fn template_usage(template: &str) -> UsageSet {
    let mut scanner = Scanner::default();
    scanner.scan(template);
    scanner.used
}

struct Element {
    name: String,
    aliases: Vec<String>,
}

struct Attribute<'t> {
    name: &'t str,
    value: Option<String>,
}

enum Snippet {
    Expression,
    Statements,
}

#[derive(Default)]
struct Scanner {
    used: UsageSet,
    stack: Vec<Element>,
}

impl Scanner {
    fn scan(&mut self, template: &str) {
        let bytes = template.as_bytes();
        let mut at = 0;

        while at < bytes.len() {
            let rest = &template[at..];
            if rest.starts_with("<!--") {
                at += rest.find("-->").map_or(rest.len(), |end| end + 3);
            } else if rest.starts_with("{{") {
                let Some(end) = rest.find("}}") else { break };
                let code = decode_entities(&rest[2..end]);
                self.evaluate(&code, Snippet::Expression, &[]);
                at += end + 2;
            } else if rest.starts_with("</") {
                let end = rest.find('>').unwrap_or(rest.len());
                self.close(rest[2..end].trim());
                at += (end + 1).min(rest.len());
            } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                at += self.open_tag(rest);
            } else {
                at += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    /// Handle `<name attrs…>` at the start of `rest`; returns bytes consumed.
    fn open_tag(&mut self, rest: &str) -> usize {
        let name_end = rest[1..]
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .map_or(rest.len(), |end| end + 1);
        let name = &rest[1..name_end];
        let (attributes, consumed, self_closing) = parse_attributes(rest, name_end);

        if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            self.used.insert(name.to_string());
        }

        let mut own = Vec::new();
        for attribute in &attributes {
            let Some(value) = &attribute.value else { continue };
            if attribute.name == "v-for" {
                if let Some(captures) = V_FOR.captures(value) {
                    own.extend(pattern_names(&captures[1]));
                }
            } else if is_slot_binding(attribute.name) {
                own.extend(pattern_names(value));
            }
        }

        for attribute in &attributes {
            self.attribute(attribute, &own);
        }

        let void = VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str());
        if !self_closing && !void {
            self.stack.push(Element {
                name: name.to_string(),
                aliases: own,
            });
        }
        consumed
    }

    fn attribute(&mut self, attribute: &Attribute<'_>, own: &[String]) {
        let name = attribute.name;

        // :[key]="…" / @[event]="…"
        if let (Some(start), Some(end)) = (name.find('['), name.rfind(']')) {
            if start < end {
                self.evaluate(&name[start + 1..end], Snippet::Expression, own);
            }
        }

        let Some(value) = &attribute.value else { return };
        if name == "ref" {
            if is_identifier(value) {
                self.used.insert(value.clone());
            }
        } else if name == "v-for" {
            if let Some(captures) = V_FOR.captures(value) {
                self.evaluate(&captures[2], Snippet::Expression, &[]);
            }
        } else if is_slot_binding(name) {
            // aliases only, handled by the caller
        } else if name.starts_with('@') || name.starts_with("v-on") {
            self.evaluate(value, Snippet::Statements, own);
        } else if name.starts_with(':') || name.starts_with("v-") {
            self.evaluate(value, Snippet::Expression, own);
        }
    }

    fn close(&mut self, name: &str) {
        if let Some(position) = self.stack.iter().rposition(|element| element.name == name) {
            self.stack.truncate(position);
        }
    }

    fn evaluate(&mut self, code: &str, snippet: Snippet, own: &[String]) {
        if code.trim().is_empty() {
            return;
        }
        let source = match snippet {
            Snippet::Expression => format!("({code})"),
            Snippet::Statements => code.to_string(),
        };

        let names = with_program(&source, false, |program, binder, _| {
            let mut collector = Unresolved {
                binder,
                names: Vec::new(),
            };
            collector.visit_program(program);
            collector.names
        });

        match names {
            Ok(names) => {
                for name in names {
                    let aliased = own.contains(&name)
                        || self
                            .stack
                            .iter()
                            .any(|element| element.aliases.contains(&name));
                    if !aliased && !name.starts_with('$') {
                        self.used.insert(name);
                    }
                }
            }
            Err(failure) => {
                tracing::debug!(code, error = %failure.summary(), "skipping template expression");
            }
        }
    }
}

fn is_slot_binding(name: &str) -> bool {
    name.starts_with('#') || name.starts_with("v-slot") || name == "slot-scope"
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Attributes of the tag starting at `rest`, scanning from `at`. Returns the
/// attributes, the bytes consumed through `>` and whether the tag self-closes.
fn parse_attributes(rest: &str, mut at: usize) -> (Vec<Attribute<'_>>, usize, bool) {
    let bytes = rest.as_bytes();
    let mut attributes = Vec::new();

    loop {
        while at < bytes.len() && bytes[at].is_ascii_whitespace() {
            at += 1;
        }
        if at >= bytes.len() {
            return (attributes, bytes.len(), false);
        }
        match bytes[at] {
            b'>' => return (attributes, at + 1, false),
            b'/' if bytes.get(at + 1) == Some(&b'>') => return (attributes, at + 2, true),
            b'/' => {
                at += 1;
                continue;
            }
            _ => {}
        }

        let name_start = at;
        while at < bytes.len()
            && !bytes[at].is_ascii_whitespace()
            && !matches!(bytes[at], b'=' | b'>')
            && !(bytes[at] == b'/' && bytes.get(at + 1) == Some(&b'>'))
        {
            at += 1;
        }
        let name = &rest[name_start..at];

        while at < bytes.len() && bytes[at].is_ascii_whitespace() {
            at += 1;
        }
        if bytes.get(at) != Some(&b'=') {
            attributes.push(Attribute { name, value: None });
            continue;
        }
        at += 1;
        while at < bytes.len() && bytes[at].is_ascii_whitespace() {
            at += 1;
        }

        let value = match bytes.get(at) {
            Some(&quote @ (b'"' | b'\'')) => {
                let start = at + 1;
                let end = memchr::memchr(quote, &bytes[start..]).map_or(bytes.len(), |end| start + end);
                at = (end + 1).min(bytes.len());
                &rest[start..end]
            }
            _ => {
                let start = at;
                while at < bytes.len() && !bytes[at].is_ascii_whitespace() && bytes[at] != b'>' {
                    at += 1;
                }
                &rest[start..at]
            }
        };
        attributes.push(Attribute {
            name,
            value: Some(decode_entities(value)),
        });
    }
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Names bound by an alias pattern such as `(item, index)` or `{ row }`.
fn pattern_names(pattern: &str) -> Vec<String> {
    let pattern = pattern.trim();
    let inner = pattern
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(pattern);

    with_program(&format!("({inner}) => 0"), false, |program, _, _| {
        let mut collector = Bindings::default();
        collector.visit_program(program);
        collector.names
    })
    .unwrap_or_default()
}

/// References with no binding inside the snippet.
struct Unresolved<'b, B: Binder> {
    binder: &'b B,
    names: Vec<String>,
}

impl<'a, B: Binder> Visit<'a> for Unresolved<'_, B> {
    fn visit_identifier_reference(&mut self, it: &IdentifierReference<'a>) {
        if self.binder.reference_scope(it).is_none() {
            self.names.push(it.name.to_string());
        }
    }
}

#[derive(Default)]
struct Bindings {
    names: Vec<String>,
}

impl<'a> Visit<'a> for Bindings {
    fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
        self.names.push(it.name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(template: &str) -> Vec<String> {
        template_usage(template).into_iter().collect()
    }

    #[test]
    fn test_interpolation_and_directives() {
        assert_eq!(
            usage(r#"<div :class="{ active: isActive }" @click="toggle()">{{ count + offset }}</div>"#),
            vec!["isActive", "toggle", "count", "offset"]
        );
    }

    #[test]
    fn test_v_for_aliases_are_local() {
        assert_eq!(
            usage(
                r#"<ul><li v-for="(item, i) in items" :key="item.id">{{ item.name }} {{ i }} {{ suffix }}</li></ul>
<p>{{ item }}</p>"#
            ),
            vec!["items", "suffix", "item"]
        );
    }

    #[test]
    fn test_slot_aliases_and_components() {
        assert_eq!(
            usage(r#"<MyTable><template #row="{ row }">{{ row.name }} {{ format(row) }}</template></MyTable>"#),
            vec!["MyTable", "format"]
        );
    }

    #[test]
    fn test_arrow_parameters_and_events() {
        assert_eq!(
            usage(r#"<button @click="(e) => select(e, index)" @keyup.enter="count++; $emit('done')">go</button>"#),
            vec!["select", "index", "count"]
        );
    }

    #[test]
    fn test_comments_refs_and_void_elements() {
        assert_eq!(
            usage(r#"<!-- {{ hidden }} --><input ref="field" v-model="query"><span v-if="a &gt; b">{{ label }}</span>"#),
            vec!["field", "query", "a", "b", "label"]
        );
    }

    #[test]
    fn test_broken_snippets_are_skipped() {
        assert_eq!(usage("<p>{{ a + }} {{ b }}</p>"), vec!["b"]);
    }
}
