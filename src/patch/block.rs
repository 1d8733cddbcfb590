//! Line-oriented rewrite of versions blocks in workflow files
//!
//! Parsing the YAML and serializing it back would lose comments and blank
//! lines, so the file is scanned line by line instead. A block starts at a
//! header line such as `k8s-version:` and runs over the following `-` entry
//! and `#` comment lines:
//!
//! ```yaml
//! k8s-version:
//!   - v1.31.2 # EOL 2025-10-28
//!   - v1.30.6 # EOL 2025-06-28
//! ```
//!
//! Each block is replaced by the merge of its entries with the supported
//! release cycles. Everything outside blocks is copied through untouched.

use crate::error::{Result, SyncError};
use crate::remote::TagRegistry;
use crate::versions::{ImageResolver, ReleaseCycle, strip_v};
use chrono::NaiveDate;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static PATCH_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("valid patch version pattern"));

/// Entries produced for one block
#[derive(Debug, Default, PartialEq)]
pub struct MergedBlock {
    pub lines: Vec<String>,
    /// Supported cycles for which no published image was found
    pub unresolved: Vec<String>,
}

/// Merge the existing entries of a block with the supported cycles
///
/// Entries of supported cycles keep their position and get the resolved tag.
/// Cycles missing from the block are appended in feed order, indented like
/// the last block line. Entries of every other cycle, and stray comment
/// lines, are dropped.
pub fn merge_block<R: TagRegistry>(
    cycles: &[ReleaseCycle],
    block: &[String],
    resolver: &ImageResolver<R>,
    today: NaiveDate,
) -> Result<MergedBlock> {
    let mut claimed: Vec<Option<&ReleaseCycle>> = vec![None; block.len()];
    let mut missing: Vec<&ReleaseCycle> = Vec::new();

    for cycle in cycles {
        if cycle.eol_date()? <= today {
            log::debug!("dropping cycle {}: end of life on {}", cycle.cycle, cycle.eol);
            continue;
        }
        match block
            .iter()
            .position(|line| claims_cycle(line.trim(), cycle.bare_cycle()))
        {
            Some(index) if claimed[index].is_none() => claimed[index] = Some(cycle),
            Some(_) => log::debug!("cycle {} listed twice in feed, ignoring", cycle.cycle),
            None => missing.push(cycle),
        }
    }

    let mut merged = MergedBlock::default();

    for (line, cycle) in block.iter().zip(claimed) {
        let Some(cycle) = cycle else {
            log::debug!("dropping entry {:?}", line.trim());
            continue;
        };
        match resolver.resolve(&cycle.latest)? {
            Some(tag) => {
                merged
                    .lines
                    .push(PATCH_VERSION.replace(line, NoExpand(strip_v(&tag))).into_owned());
            }
            None => {
                log::warn!(
                    "no image published for cycle {}, keeping existing entry {:?}",
                    cycle.cycle,
                    line.trim()
                );
                merged.lines.push(line.clone());
                merged.unresolved.push(cycle.cycle.clone());
            }
        }
    }

    for cycle in missing {
        let Some(last) = block.last() else {
            log::warn!("versions block has no entries, not adding cycle {}", cycle.cycle);
            continue;
        };
        match resolver.resolve(&cycle.latest)? {
            Some(tag) => {
                log::info!("adding cycle {} as {}", cycle.cycle, tag);
                merged.lines.push(format!(
                    "{}- v{} # EOL {}",
                    indentation(last),
                    strip_v(&tag),
                    cycle.eol
                ));
            }
            None => {
                log::warn!("no image published for new cycle {}, skipping", cycle.cycle);
                merged.unresolved.push(cycle.cycle.clone());
            }
        }
    }

    Ok(merged)
}

/// `- v<cycle>` not followed by another digit, so `1.3` never claims `v1.30`
fn claims_cycle(trimmed: &str, cycle: &str) -> bool {
    trimmed
        .strip_prefix("- v")
        .and_then(|rest| rest.strip_prefix(cycle))
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_digit()))
}

fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Outside,
    InBlock,
}

/// Result of patching one file's text
#[derive(Debug)]
pub struct PatchOutcome {
    pub content: String,
    pub blocks: usize,
    pub changed: bool,
    pub unresolved: Vec<String>,
}

/// Rewrites every versions block of a file
pub struct BlockPatcher<'a, R> {
    headers: &'a [String],
    resolver: &'a ImageResolver<R>,
    today: NaiveDate,
}

impl<'a, R: TagRegistry> BlockPatcher<'a, R> {
    pub fn new(headers: &'a [String], resolver: &'a ImageResolver<R>, today: NaiveDate) -> Self {
        Self {
            headers,
            resolver,
            today,
        }
    }

    fn is_header(&self, trimmed: &str) -> bool {
        self.headers.iter().any(|h| trimmed.starts_with(h.as_str()))
    }

    /// Patch `text`, naming it `source_name` in errors
    ///
    /// A text without any versions block is a format error.
    pub fn patch_text(
        &self,
        source_name: &str,
        text: &str,
        cycles: &[ReleaseCycle],
    ) -> Result<PatchOutcome> {
        let mut state = BlockState::Outside;
        let mut output: Vec<String> = Vec::new();
        let mut block: Vec<String> = Vec::new();
        let mut blocks = 0;
        let mut unresolved: Vec<String> = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();

            if state == BlockState::InBlock {
                if trimmed.starts_with('-') || trimmed.starts_with('#') {
                    block.push(line.to_string());
                    continue;
                }
                self.flush(&mut block, cycles, &mut output, &mut unresolved)?;
                state = BlockState::Outside;
            }

            if self.is_header(trimmed) {
                state = BlockState::InBlock;
                blocks += 1;
            }
            output.push(line.to_string());
        }

        if state == BlockState::InBlock {
            self.flush(&mut block, cycles, &mut output, &mut unresolved)?;
        }

        if blocks == 0 {
            return Err(SyncError::format(source_name, "no versions block found"));
        }

        let mut content = output.join("\n");
        content.push('\n');
        Ok(PatchOutcome {
            changed: content != text,
            content,
            blocks,
            unresolved,
        })
    }

    fn flush(
        &self,
        block: &mut Vec<String>,
        cycles: &[ReleaseCycle],
        output: &mut Vec<String>,
        unresolved: &mut Vec<String>,
    ) -> Result<()> {
        let merged = merge_block(cycles, block, self.resolver, self.today)?;
        output.extend(merged.lines);
        for cycle in merged.unresolved {
            if !unresolved.contains(&cycle) {
                unresolved.push(cycle);
            }
        }
        block.clear();
        Ok(())
    }

    /// Patch a file in place
    ///
    /// The new content is built fully in memory and written with a single
    /// write, only when it differs from what is on disk.
    pub fn patch_file(&self, path: &Path, cycles: &[ReleaseCycle]) -> Result<PatchOutcome> {
        let original = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        let source_name = path.display().to_string();
        let outcome = self.patch_text(&source_name, &original, cycles)?;

        if outcome.changed {
            ensure_yaml_preserved(&source_name, &original, &outcome.content)?;
            fs::write(path, &outcome.content).map_err(|e| SyncError::io(path, e))?;
            log::info!("updated {} ({} block(s))", source_name, outcome.blocks);
        } else {
            log::info!("{} is already up to date", source_name);
        }
        Ok(outcome)
    }
}

/// Refuse a rewrite that turns a valid YAML document into an invalid one
pub fn ensure_yaml_preserved(source_name: &str, before: &str, after: &str) -> Result<()> {
    if serde_yaml::from_str::<serde_yaml::Value>(before).is_err() {
        return Ok(());
    }
    serde_yaml::from_str::<serde_yaml::Value>(after)
        .map(|_| ())
        .map_err(|e| SyncError::format(source_name, format!("patched content is not valid YAML: {e}")))
}
