//! Single File Component block splitter.
//!
//! Finds the top-level `<script>`, `<script setup>`, `<template>` and
//! `<style>` blocks of a `.vue` file. Nested `<template>` tags inside the
//! markup are depth-counted so only the outer block closes it.

use memchr::memmem;

/// Maximum file size in bytes (10 MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of top-level blocks to process
pub const MAX_BLOCKS: usize = 100;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SfcError {
    /// File exceeds maximum allowed size
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Too many blocks: {count} found (max: {max} allowed)")]
    TooManyBlocks { count: usize, max: usize },

    /// Block opened but never closed
    #[error("Unclosed <{tag}> block starting at byte position {position}")]
    UnclosedBlock { tag: &'static str, position: usize },
}

/// Content of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock<'s> {
    pub content: &'s str,
    /// Byte offset of the content in the file
    pub offset: usize,
    /// `lang` attribute, if present
    pub lang: Option<&'s str>,
    /// Number of line breaks before the content
    pub line_offset: u32,
}

impl SfcBlock<'_> {
    /// Whether the block is written in JSX or TSX.
    pub fn is_jsx(&self) -> bool {
        matches!(self.lang, Some("jsx" | "tsx"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcDescriptor<'s> {
    pub script: Option<SfcBlock<'s>>,
    pub script_setup: Option<SfcBlock<'s>>,
    pub template: Option<SfcBlock<'s>>,
    pub styles: Vec<SfcBlock<'s>>,
}

const TAGS: [&str; 3] = ["script", "template", "style"];

/// Split `source` into its blocks.
pub fn parse_sfc(source: &str) -> Result<SfcDescriptor<'_>, SfcError> {
    if source.len() > MAX_FILE_SIZE {
        return Err(SfcError::FileTooLarge {
            size: source.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let bytes = source.as_bytes();
    let mut descriptor = SfcDescriptor::default();
    let mut pointer = 0;
    let mut count = 0;

    while let Some(found) = memchr::memchr(b'<', &bytes[pointer..]) {
        let start = pointer + found;
        let rest = &bytes[start..];

        if rest.starts_with(b"<!--") {
            pointer = memmem::find(rest, b"-->").map_or(bytes.len(), |end| start + end + 3);
            continue;
        }

        let Some(tag) = TAGS.into_iter().find(|tag| opens(rest, tag)) else {
            pointer = start + 1;
            continue;
        };

        count += 1;
        if count > MAX_BLOCKS {
            return Err(SfcError::TooManyBlocks {
                count,
                max: MAX_BLOCKS,
            });
        }

        let attributes_start = start + 1 + tag.len();
        let tag_end = find_closing_angle(bytes, attributes_start).ok_or(SfcError::UnclosedBlock {
            tag,
            position: start,
        })?;
        let attributes = &source[attributes_start..tag_end];

        let (content_start, content_end, next) = if bytes[tag_end - 1] == b'/' {
            (tag_end + 1, tag_end + 1, tag_end + 1)
        } else {
            let content_start = tag_end + 1;
            let end = find_block_end(bytes, content_start, tag).ok_or(SfcError::UnclosedBlock {
                tag,
                position: start,
            })?;
            (content_start, end, end + tag.len() + 3)
        };

        let block = SfcBlock {
            content: &source[content_start..content_end],
            offset: content_start,
            lang: attribute_value(attributes, "lang"),
            line_offset: memchr::memchr_iter(b'\n', &bytes[..content_start]).count() as u32,
        };

        let slot = match tag {
            "script" if has_flag(attributes, "setup") => &mut descriptor.script_setup,
            "script" => &mut descriptor.script,
            "template" => &mut descriptor.template,
            _ => {
                descriptor.styles.push(block);
                pointer = next.min(bytes.len());
                continue;
            }
        };
        if slot.is_some() {
            tracing::debug!(tag, position = start, "ignoring duplicate block");
        } else {
            *slot = Some(block);
        }
        pointer = next.min(bytes.len());
    }

    Ok(descriptor)
}

/// `<tag` followed by whitespace, `>` or `/`.
fn opens(rest: &[u8], tag: &str) -> bool {
    rest.len() > tag.len()
        && rest[1..].starts_with(tag.as_bytes())
        && matches!(
            rest.get(tag.len() + 1),
            Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
        )
}

/// Finds the closing `>` of a tag, handling quoted attributes.
fn find_closing_angle(bytes: &[u8], start: usize) -> Option<usize> {
    let mut quote = None;
    for (i, &byte) in bytes[start..].iter().enumerate() {
        match (byte, quote) {
            (b'"' | b'\'', None) => quote = Some(byte),
            (_, Some(open)) if byte == open => quote = None,
            (b'>', None) => return Some(start + i),
            _ => {}
        }
    }
    None
}

/// Start of the `</tag>` closing the block whose content begins at `start`.
fn find_block_end(bytes: &[u8], start: usize, tag: &str) -> Option<usize> {
    let close = format!("</{tag}>");
    if tag != "template" {
        return memmem::find(&bytes[start..], close.as_bytes()).map(|pos| start + pos);
    }

    let open_finder = memmem::Finder::new(b"<template");
    let close_finder = memmem::Finder::new(close.as_bytes());
    let mut depth = 1usize;
    let mut at = start;

    loop {
        let next_close = close_finder.find(&bytes[at..]).map(|pos| at + pos)?;
        let next_open = open_finder
            .find(&bytes[at..next_close])
            .map(|pos| at + pos)
            .filter(|&pos| opens(&bytes[pos..], tag));

        match next_open {
            Some(open) => {
                depth += 1;
                at = open + "<template".len();
            }
            None => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close);
                }
                at = next_close + close.len();
            }
        }
    }
}

fn has_flag(attributes: &str, name: &str) -> bool {
    attributes
        .split(|c: char| c.is_whitespace() || c == '/')
        .any(|attribute| attribute == name || attribute.starts_with(&format!("{name}=")))
}

/// Value of `name="…"`, `name='…'` or `name=value`.
fn attribute_value<'s>(attributes: &'s str, name: &str) -> Option<&'s str> {
    let mut search = 0;
    while let Some(found) = attributes[search..].find(name) {
        let position = search + found;
        search = position + name.len();

        let boundary = attributes[..position]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        let after = attributes[search..].trim_start();
        let Some(value) = after.strip_prefix('=').map(str::trim_start).filter(|_| boundary) else {
            continue;
        };

        return match value.chars().next() {
            Some(quote @ ('"' | '\'')) => value[1..].find(quote).map(|end| &value[1..=end]),
            Some(_) => Some(
                value
                    .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
                    .next()
                    .unwrap_or(value),
            ),
            None => None,
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_and_line_offsets() {
        let vue = "<template>\n  <div>{{ count }}</div>\n</template>\n\n<script setup lang=\"ts\">\nconst count = 1\n</script>\n<style scoped>\n.a { color: v-bind(color) }\n</style>\n";
        let sfc = parse_sfc(vue).unwrap();

        let setup = sfc.script_setup.unwrap();
        assert_eq!(setup.content, "\nconst count = 1\n");
        assert_eq!(setup.lang, Some("ts"));
        assert_eq!(setup.line_offset, 4);
        assert_eq!(&vue[setup.offset..setup.offset + 6], "\nconst");

        assert!(sfc.template.unwrap().content.contains("{{ count }}"));
        assert_eq!(sfc.styles.len(), 1);
        assert!(sfc.script.is_none());
    }

    #[test]
    fn test_nested_templates() {
        let vue = "<template><List><template #item=\"{ x }\">{{ x }}</template></List></template><script>export default {}</script>";
        let sfc = parse_sfc(vue).unwrap();

        assert_eq!(
            sfc.template.unwrap().content,
            "<List><template #item=\"{ x }\">{{ x }}</template></List>"
        );
        assert_eq!(sfc.script.unwrap().content, "export default {}");
    }

    #[test]
    fn test_regular_and_setup_scripts() {
        let vue = "<script lang='tsx'>export default {}</script>\n<script setup>const a = 1</script>";
        let sfc = parse_sfc(vue).unwrap();

        assert!(sfc.script.as_ref().unwrap().is_jsx());
        assert_eq!(sfc.script_setup.unwrap().content, "const a = 1");
    }

    #[test]
    fn test_comments_and_lookalike_tags_are_skipped() {
        let vue = "<!-- <script>nope</script> -->\n<scripts></scripts>\n<script>yes</script>";
        let sfc = parse_sfc(vue).unwrap();
        assert_eq!(sfc.script.unwrap().content, "yes");
    }

    #[test]
    fn test_setup_inside_lang_value_is_not_a_flag() {
        let sfc = parse_sfc("<script lang=\"setup\">x</script>").unwrap();
        assert!(sfc.script_setup.is_none());
        assert!(sfc.script.is_some());
    }

    #[test]
    fn test_unclosed_block() {
        assert_eq!(
            parse_sfc("<script>const a = 1"),
            Err(SfcError::UnclosedBlock {
                tag: "script",
                position: 0
            })
        );
    }

    #[test]
    fn test_file_too_large() {
        let large = "x".repeat(MAX_FILE_SIZE + 1);
        assert!(matches!(parse_sfc(&large), Err(SfcError::FileTooLarge { .. })));
    }
}
