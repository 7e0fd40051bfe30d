//! Terminal rendering of analysis results.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use tangle_graph::{CommunityResult, Severity, Suggestion};

/// Whether stdout output should be coloured.
///
/// `--no-color` and `NO_COLOR` disable colours, `FORCE_COLOR` forces them,
/// otherwise the terminal decides.
pub fn should_use_color(no_color: bool) -> bool {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stdout().features().colors_supported()
}

fn severity_tag(severity: Severity, color: bool) -> String {
    let tag = match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    let padded = format!("{tag:<7}");
    if !color {
        return padded;
    }
    match severity {
        Severity::Info => padded.blue().bold().to_string(),
        Severity::Warning => padded.yellow().bold().to_string(),
        Severity::Error => padded.red().bold().to_string(),
    }
}

/// One line per suggestion, followed by a severity tally.
pub fn format_suggestions(suggestions: &[Suggestion], color: bool) -> String {
    if suggestions.is_empty() {
        let check = if color {
            "✓".green().bold().to_string()
        } else {
            "✓".to_string()
        };
        return format!("{check} No suggestions");
    }

    let mut out = String::new();
    for suggestion in suggestions {
        let _ = writeln!(out, "{} {}", severity_tag(suggestion.severity, color), suggestion.message);
    }

    let count = |severity: Severity| suggestions.iter().filter(|s| s.severity == severity).count();
    let _ = write!(
        out,
        "\n{} suggestion(s): {} error, {} warning, {} info",
        suggestions.len(),
        count(Severity::Error),
        count(Severity::Warning),
        count(Severity::Info)
    );
    out
}

/// `community <id>: a, b, c` per community.
pub fn format_communities(result: &CommunityResult, color: bool) -> String {
    let mut out = String::new();
    for community in &result.communities {
        let name = format!("community {}", community.id);
        let name = if color {
            name.cyan().to_string()
        } else {
            name
        };
        let members: Vec<&str> = community.nodes.iter().map(String::as_str).collect();
        let _ = write!(out, "\n{name}: {}", members.join(", "));
    }
    out
}
