//! Names bound into `<style>` blocks through `v-bind()`.

use std::sync::LazyLock;

use regex::Regex;
use tangle_graph::UsageSet;

/// `v-bind(color)`, `v-bind('theme.color')`, `v-bind("size")`
static V_BIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"v-bind\(\s*(?:'([^']*)'|"([^"]*)"|([^)'"]*?))\s*\)"#).expect("invalid v-bind regex")
});

/// Root identifiers of every `v-bind()` expression in `style`.
pub fn style_usage(style: &str) -> UsageSet {
    let mut used = UsageSet::new();
    for captures in V_BIND.captures_iter(style) {
        let Some(expression) = captures.get(1).or(captures.get(2)).or(captures.get(3)) else {
            continue;
        };
        let root = expression
            .as_str()
            .trim()
            .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
            .next()
            .unwrap_or_default();
        if !root.is_empty() {
            used.insert(root.to_string());
        }
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_quoted_bindings() {
        let used = style_usage(
            ".a { color: v-bind(color); }\n.b { width: v-bind('layout.width'); height: v-bind( \"size\" ) }\n",
        );
        assert_eq!(used.into_iter().collect::<Vec<_>>(), vec!["color", "layout", "size"]);
    }

    #[test]
    fn test_no_bindings() {
        assert!(style_usage(".a { color: red }").is_empty());
        assert!(style_usage(".a { color: v-bind() }").is_empty());
    }
}
