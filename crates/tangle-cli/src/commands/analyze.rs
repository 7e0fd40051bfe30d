//! `tangle analyze <file>`.

use std::fs;
use std::path::Path;

use anyhow::Context;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use tangle_extract::{
    ComponentAnalysis, analyze_options, analyze_setup_script, analyze_sfc, analyze_tsx,
};
use tangle_graph::{
    CommunityResult, Graph, Suggestion, detect_communities, detect_communities_with_rng, suggest,
    to_force_graph, to_mermaid, UsageSet,
};

use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config::TangleConfig;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// How a file is read, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.vue` single-file component
    Sfc,
    /// `.tsx`/`.jsx` render-function or class component
    Jsx,
    /// Plain script: options object, else composition-style top-level code
    Script,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "vue" => Some(Self::Sfc),
            "tsx" | "jsx" => Some(Self::Jsx),
            "js" | "mjs" | "cjs" | "ts" | "mts" | "cts" => Some(Self::Script),
            _ => None,
        }
    }
}

/// Extract the component graph of `source`.
///
/// A plain script is first read as an options component; when its default
/// export yields nothing, the whole file is taken as setup code.
pub fn analyze_source(
    kind: SourceKind,
    source: &str,
    jsx: bool,
) -> tangle_extract::Result<ComponentAnalysis> {
    match kind {
        SourceKind::Sfc => analyze_sfc(source),
        SourceKind::Jsx => analyze_tsx(source, 0),
        SourceKind::Script => {
            let options = analyze_options(source, 0, jsx);
            if options.graph.is_empty() && options.used.is_empty() {
                Ok(analyze_setup_script(source, 0, jsx))
            } else {
                Ok(options)
            }
        }
    }
}

/// JSON document printed by `--format json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub graph: &'a Graph,
    /// Names used from outside the script
    pub used: &'a UsageSet,
    pub suggestions: &'a [Suggestion],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communities: Option<&'a CommunityResult>,
}

fn communities(graph: &Graph, config: &TangleConfig) -> CommunityResult {
    let options = config.community_options();
    match config.seed {
        Some(seed) => detect_communities_with_rng(graph, &options, &mut StdRng::seed_from_u64(seed)),
        None => detect_communities(graph, &options),
    }
}

/// Render `analysis` in the configured format.
pub fn render(analysis: &ComponentAnalysis, config: &TangleConfig, color: bool) -> Result<String> {
    let graph = &analysis.graph;
    let clustering = config.communities.then(|| communities(graph, config));

    let output = match config.format {
        OutputFormat::Suggestions => {
            let suggestions = suggest(graph, &analysis.used);
            let mut text = ui::format_suggestions(&suggestions, color);
            if let Some(clustering) = &clustering {
                text.push('\n');
                text.push_str(&ui::format_communities(clustering, color));
            }
            text
        }
        OutputFormat::Json => {
            let suggestions = suggest(graph, &analysis.used);
            serde_json::to_string_pretty(&Report {
                graph,
                used: &analysis.used,
                suggestions: &suggestions,
                communities: clustering.as_ref(),
            })?
        }
        OutputFormat::Mermaid => to_mermaid(graph, &analysis.used),
        OutputFormat::ForceGraph => serde_json::to_string_pretty(&to_force_graph(
            graph,
            &analysis.used,
            clustering.as_ref(),
        ))?,
    };
    Ok(output)
}

/// Run `tangle analyze`.
pub fn execute(args: AnalyzeArgs, color: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = TangleConfig::load(&args, &cwd)?;

    let kind = SourceKind::from_path(&args.file).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "{} is not a component file (expected .vue, .tsx, .jsx, .js or .ts)",
            args.file.display()
        ))
    })?;
    let source = fs::read_to_string(&args.file).with_path(&args.file)?;

    let analysis = analyze_source(kind, &source, config.jsx)
        .with_context(|| format!("Failed to analyze {}", args.file.display()))?;

    for conflict in &analysis.conflicts {
        tracing::warn!(
            label = %conflict.label,
            kept = ?conflict.kept,
            rejected = ?conflict.rejected,
            line = ?conflict.rejected_line,
            "redeclared name, keeping the first declaration"
        );
    }
    tracing::info!(
        file = %args.file.display(),
        nodes = analysis.graph.len(),
        edges = analysis.graph.edge_count(),
        "component analyzed"
    );

    println!("{}", render(&analysis, &config, color)?);
    Ok(())
}
