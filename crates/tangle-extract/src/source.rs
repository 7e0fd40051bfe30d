//! Parsing and source positions.

use oxc_allocator::Allocator;
use oxc_ast::ast::{Comment, Program};
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use tangle_graph::Declaration;

use super::binder::OxcBinder;

/// Why a block could not be turned into a syntax tree.
#[derive(Debug, Clone)]
pub(crate) struct ParseFailure {
    pub panicked: bool,
    pub messages: Vec<String>,
}

impl ParseFailure {
    pub(crate) fn summary(&self) -> String {
        if self.messages.is_empty() {
            if self.panicked { "parser gave up" } else { "no syntax tree produced" }.to_string()
        } else {
            self.messages.join("; ")
        }
    }
}

/// Parse `source` and run scope analysis, then hand the program and its
/// binder to `analyze`. TypeScript syntax is always accepted; `jsx` enables
/// JSX as well.
pub(crate) fn with_program<T>(
    source: &str,
    jsx: bool,
    analyze: impl FnOnce(&Program<'_>, &OxcBinder<'_>, &SourceIndex<'_>) -> T,
) -> Result<T, ParseFailure> {
    let source_type = if jsx { SourceType::tsx() } else { SourceType::ts() };
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, source_type).parse();

    if parsed.panicked || !parsed.errors.is_empty() {
        return Err(ParseFailure {
            panicked: parsed.panicked,
            messages: parsed.errors.iter().map(ToString::to_string).collect(),
        });
    }

    let program = parsed.program;
    let semantic = SemanticBuilder::new().build(&program).semantic;
    let binder = OxcBinder::new(semantic.scoping());
    let index = SourceIndex::new(source, &program.comments);

    Ok(analyze(&program, &binder, &index))
}

/// Line lookup plus leading comments for one parsed block.
pub(crate) struct SourceIndex<'s> {
    source: &'s str,
    line_starts: Vec<u32>,
    comments: &'s [Comment],
}

impl<'s> SourceIndex<'s> {
    pub(crate) fn new(source: &'s str, comments: &'s [Comment]) -> Self {
        let mut line_starts = Vec::with_capacity(64);
        line_starts.push(0);
        for position in memchr::memchr_iter(b'\n', source.as_bytes()) {
            line_starts.push((position + 1) as u32);
        }
        Self {
            source,
            line_starts,
            comments,
        }
    }

    /// 1-based line and 0-based column (in characters) of a byte offset.
    pub(crate) fn location(&self, offset: u32) -> (u32, u32) {
        let index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        };
        let line_start = self.line_starts[index] as usize;
        let end = (offset as usize).min(self.source.len());
        let column = self
            .source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());
        (index as u32 + 1, column as u32)
    }

    /// Comments directly in front of the token starting at `start`, with
    /// delimiters and leading `*` gutters removed.
    pub(crate) fn leading_comment(&self, start: u32) -> String {
        let mut lines = Vec::new();
        for comment in self.comments {
            if comment.attached_to != start || comment.span.end > start {
                continue;
            }
            let span = comment.content_span();
            let Some(text) = self.source.get(span.start as usize..span.end as usize) else {
                continue;
            };
            lines.extend(
                text.lines()
                    .map(|line| line.trim().trim_start_matches('*').trim())
                    .filter(|line| !line.is_empty()),
            );
        }
        lines.join("\n")
    }

    /// Declaration record for a binding at `binding_start` whose statement (or
    /// property) starts at `owner_start`.
    pub(crate) fn declaration(&self, binding_start: u32, owner_start: u32) -> Declaration {
        let (line, column) = self.location(binding_start);
        Declaration {
            line,
            column,
            comment: self.leading_comment(owner_start),
        }
    }
}
