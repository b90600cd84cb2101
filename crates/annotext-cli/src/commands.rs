//! Subcommand bodies. Each takes the raw input text and returns the text to
//! print, so they can be tested without touching stdin or stdout.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use annotext_engine::codec::code_point::{char_count, code_point_to_utf16};
use annotext_engine::render::to_html;
use annotext_engine::{Block, BlockTree, CodecOptions};
use serde::Serialize;

pub fn serialize(input: &str, pretty: bool) -> Result<String> {
    let tree: BlockTree = serde_json::from_str(input).context("input is not a block tree")?;
    let block = annotext_engine::serialize(&tree)
        .with_context(|| format!("failed to serialize block {}", tree.id))?;
    to_json(&block, pretty)
}

pub fn deserialize(input: &str, options: &CodecOptions, pretty: bool) -> Result<String> {
    let tree = parse_and_deserialize(input, options)?;
    to_json(&tree, pretty)
}

pub fn render(input: &str, options: &CodecOptions) -> Result<String> {
    let tree = parse_and_deserialize(input, options)?;
    Ok(to_html(&tree))
}

/// Tabulates a block's annotations with both code-point and UTF-16 offsets.
pub fn inspect(input: &str) -> Result<String> {
    let block = parse_block(input)?;
    let units: Vec<u16> = block.text.encode_utf16().collect();
    let chars: Vec<char> = block.text.chars().collect();

    let mut out = String::new();
    writeln!(
        out,
        "block {} ({}): {} code points, {} UTF-16 units",
        block.id,
        block.kind.as_str(),
        char_count(&block.text),
        units.len()
    )?;
    writeln!(
        out,
        "{:<14} {:<12} {:<12} {:<32} TEXT",
        "TYPE", "CODE POINTS", "UTF-16", "ATTRIBUTES"
    )?;

    for annotation in &block.annotations {
        let attributes = annotation
            .attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");
        for span in annotation.spans() {
            let text: String = chars
                .iter()
                .skip(span.start)
                .take(span.len())
                .collect();
            let utf16 = format!(
                "{}..{}",
                code_point_to_utf16(&units, span.start),
                code_point_to_utf16(&units, span.end)
            );
            writeln!(
                out,
                "{:<14} {:<12} {:<12} {:<32} {:?}",
                annotation.kind,
                format!("{}..{}", span.start, span.end),
                utf16,
                attributes,
                text
            )?;
        }
    }
    Ok(out)
}

fn parse_block(input: &str) -> Result<Block> {
    serde_json::from_str(input).context("input is not an annotated block")
}

fn parse_and_deserialize(input: &str, options: &CodecOptions) -> Result<BlockTree> {
    let block = parse_block(input)?;
    annotext_engine::deserialize_with(&block, options)
        .with_context(|| format!("failed to deserialize block {}", block.id))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
