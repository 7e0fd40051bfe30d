//! # tangle-extract
//!
//! Declaration graphs from component sources.
//!
//! Parses script blocks with oxc, resolves scopes through [`Binder`] and turns
//! the declarations of one component into a [`tangle_graph::Graph`] plus the
//! set of names used from outside the script.
//!
//! ## Component shapes
//!
//! ```text
//! <script setup>            → composition  (top-level declarations)
//! export default { … }      → options      (data/computed/methods/setup/watch/hooks)
//! function Comp() { … }     → render       (declarations + names in returned JSX)
//! <template>, <style>       → usage sets   (names read by markup and v-bind())
//! ```
//!
//! All entry points except [`analyze_tsx`] are tolerant: source that does not
//! parse yields an empty result and a `debug` event.
//!
//! ## Quick Start
//!
//! ```rust
//! use tangle_extract::analyze_sfc;
//!
//! # fn main() -> Result<(), tangle_extract::ExtractError> {
//! let analysis = analyze_sfc(
//!     "<template>{{ count }}</template>\n<script setup>\nconst count = ref(0)\nconst unused = 1\n</script>",
//! )?;
//! assert!(analysis.graph.contains("unused"));
//! assert!(analysis.used.contains("count"));
//! # Ok(())
//! # }
//! ```

mod binder;
mod builder;
mod composition;
mod options;
mod pattern;
mod render;
mod setup;
mod source;
mod visitor;

pub mod sfc;
pub mod style;
pub mod template;

use serde::Serialize;
use tangle_graph::{Graph, RegistrationConflict, UsageSet};

pub use binder::{Binder, OxcBinder};
pub use composition::HOOKS;
pub use options::LIFECYCLE_OPTIONS;
pub use pattern::{BindingRole, FlatBinding, flatten_pattern};
pub use sfc::{SfcBlock, SfcDescriptor, SfcError, parse_sfc};
pub use style::style_usage;
pub use template::template_usage;

use builder::GraphBuilder;
use source::with_program;

/// Errors from the non-tolerant entry points.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// TSX/JSX source could not be turned into a syntax tree.
    #[error("failed to transpile component: {message}")]
    Transpile { message: String },

    #[error(transparent)]
    Sfc(#[from] SfcError),
}

/// Result type alias for extraction.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Graph of one component with the names used outside its script.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentAnalysis {
    pub graph: Graph,
    pub used: UsageSet,
    /// Redeclarations that lost against an earlier node of the same label
    pub conflicts: Vec<RegistrationConflict>,
}

impl ComponentAnalysis {
    fn from_builder(builder: GraphBuilder, used: UsageSet) -> Self {
        let (graph, conflicts) = builder.finish();
        Self {
            graph,
            used,
            conflicts,
        }
    }
}

/// Composition-style script (`<script setup>` content).
///
/// `line_offset` is the number of lines preceding the block in its file.
pub fn analyze_setup_script(source: &str, line_offset: u32, jsx: bool) -> ComponentAnalysis {
    let result = with_program(source, jsx, |program, binder, index| {
        let mut builder = GraphBuilder::new(line_offset);
        if let Some(root) = binder.program_scope(program) {
            composition::extract_statements(&program.body, root, binder, index, &mut builder);
        }
        builder
    });

    match result {
        Ok(builder) => ComponentAnalysis::from_builder(builder, UsageSet::new()),
        Err(failure) => {
            tracing::debug!(error = %failure.summary(), "setup script did not parse");
            ComponentAnalysis::default()
        }
    }
}

/// Options-style script whose default export is a component object.
pub fn analyze_options(source: &str, line_offset: u32, jsx: bool) -> ComponentAnalysis {
    let result = with_program(source, jsx, |program, binder, index| {
        options::default_export(program)
            .map(|object| options::analyze_options_object(object, binder, index, line_offset))
            .unwrap_or_default()
    });

    match result {
        Ok(outcome) => ComponentAnalysis::from_builder(outcome.builder, outcome.used),
        Err(failure) => {
            tracing::debug!(error = %failure.summary(), "options script did not parse");
            ComponentAnalysis::default()
        }
    }
}

/// TSX/JSX component: render function, class component or component object.
///
/// Unlike the other entry points this one fails when the source does not
/// parse.
pub fn analyze_tsx(source: &str, line_offset: u32) -> Result<ComponentAnalysis> {
    let outcome = with_program(source, true, |program, binder, index| {
        render::analyze_render_program(program, binder, index, line_offset)
    })
    .map_err(|failure| ExtractError::Transpile {
        message: failure.summary(),
    })?;

    Ok(ComponentAnalysis::from_builder(outcome.builder, outcome.used))
}

/// Whole single-file component: the script shape is picked from its blocks,
/// template and style usage are merged into the used set.
///
/// A `<script setup>` block wins over a plain `<script>`; a plain script with
/// `lang="tsx"`/`"jsx"` goes through [`analyze_tsx`].
pub fn analyze_sfc(source: &str) -> Result<ComponentAnalysis> {
    let sfc = parse_sfc(source)?;

    let mut analysis = match (&sfc.script_setup, &sfc.script) {
        (Some(setup), _) => analyze_setup_script(setup.content, setup.line_offset, setup.is_jsx()),
        (None, Some(script)) if script.is_jsx() => analyze_tsx(script.content, script.line_offset)?,
        (None, Some(script)) => analyze_options(script.content, script.line_offset, false),
        (None, None) => ComponentAnalysis::default(),
    };

    if let Some(template) = &sfc.template {
        analysis.used.extend(template_usage(template.content));
    }
    for style in &sfc.styles {
        analysis.used.extend(style_usage(style.content));
    }

    tracing::debug!(
        nodes = analysis.graph.len(),
        edges = analysis.graph.edge_count(),
        used = analysis.used.len(),
        "component analyzed"
    );
    Ok(analysis)
}
