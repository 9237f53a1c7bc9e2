//! Content splitter — cuts a block at a boundary into two independently valid blocks.
//!
//! # Rules
//! - Part A: every line before the boundary, trailing blank lines trimmed.
//! - Part B: the boundary line onward, leading blank lines and bare `\JobSep` lines trimmed.
//! - If the whole block sits inside one `\begin{env}` … `\end{env}` pair, part A is closed
//!   with `\end{env}` and part B reopened with `\begin{env}`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::ContentBlock;
use crate::layout::boundary::JOB_SEPARATOR;
use crate::layout::plan::ContentRef;

static BEGIN_ENV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\\begin\{(\w+)\}\s*$").expect("begin pattern must compile"));
static END_ENV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\\end\{(\w+)\}\s*$").expect("end pattern must compile"));

/// The two halves of a split block.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitBlocks {
    pub head: ContentBlock,
    pub tail: ContentBlock,
    /// Name of the outer environment re-balanced across the cut, if any.
    pub wrapping_env: Option<String>,
}

impl SplitBlocks {
    /// True when either half carries nothing but blank lines, comments and the
    /// re-balanced environment markers.
    pub fn is_degenerate(&self) -> bool {
        let env = self.wrapping_env.as_deref();
        !has_substance(&self.head.lines, env) || !has_substance(&self.tail.lines, env)
    }
}

fn is_blank_or_comment(line: &str) -> bool {
    let t = line.trim();
    t.is_empty() || t.starts_with('%')
}

fn has_substance(lines: &[String], env: Option<&str>) -> bool {
    lines.iter().any(|line| {
        if is_blank_or_comment(line) {
            return false;
        }
        match env {
            Some(name) => {
                !is_env_marker(line, &BEGIN_ENV, name) && !is_env_marker(line, &END_ENV, name)
            }
            None => true,
        }
    })
}

fn is_env_marker(line: &str, re: &Regex, name: &str) -> bool {
    re.captures(line.trim())
        .map(|c| &c[1] == name)
        .unwrap_or(false)
}

/// Detects a single outer environment wrapping the whole block.
///
/// The first non-blank, non-comment line must be `\begin{env}` and the last one the
/// matching `\end{env}`.
pub fn find_wrapping_env(lines: &[String]) -> Option<String> {
    let first = lines.iter().find(|l| !is_blank_or_comment(l))?;
    let env = BEGIN_ENV.captures(first.trim())?[1].to_string();

    let last = lines.iter().rev().find(|l| !is_blank_or_comment(l))?;
    let closing = END_ENV.captures(last.trim())?;
    (closing[1] == env).then_some(env)
}

/// Splits `block` at `boundaries[chosen]`. The original block is left untouched.
///
/// `chosen` must index into `boundaries`, and the boundary must be a line offset of `block`.
pub fn split(block: &ContentBlock, boundaries: &[usize], chosen: usize) -> SplitBlocks {
    let (head_ref, tail_ref) = block.reference.split_parts();
    split_at_line(block, boundaries[chosen], head_ref, tail_ref)
}

/// Splits at an explicit line offset, naming the halves as given.
pub fn split_at_line(
    block: &ContentBlock,
    boundary_line: usize,
    head_ref: ContentRef,
    tail_ref: ContentRef,
) -> SplitBlocks {
    let cut = boundary_line.min(block.lines.len());
    let wrapping_env = find_wrapping_env(&block.lines);

    let mut head: Vec<String> = block.lines[..cut].to_vec();
    while head.last().is_some_and(|l| l.trim().is_empty()) {
        head.pop();
    }

    let tail_start = block.lines[cut..]
        .iter()
        .position(|l| {
            let t = l.trim();
            !t.is_empty() && t != JOB_SEPARATOR
        })
        .map(|offset| cut + offset)
        .unwrap_or(block.lines.len());
    let mut tail: Vec<String> = block.lines[tail_start..].to_vec();

    if let Some(env) = &wrapping_env {
        head.push(String::new());
        head.push(format!("\\end{{{env}}}"));
        tail.insert(0, format!("\\begin{{{env}}}"));
    }

    SplitBlocks {
        head: ContentBlock::new(head_ref, head),
        tail: ContentBlock::new(tail_ref, tail),
        wrapping_env,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    fn make_block(raw: &[&str]) -> ContentBlock {
        ContentBlock::new(ContentRef::generated("work.tex"), lines(raw))
    }

    #[test]
    fn test_split_plain_block() {
        let block = make_block(&[
            "\\Job{A}", "\\item a1", "", "\\JobSep", "", "\\Job{B}", "\\item b1",
        ]);
        let parts = split(&block, &[3], 0);
        assert_eq!(parts.head.lines, lines(&["\\Job{A}", "\\item a1"]));
        assert_eq!(parts.tail.lines, lines(&["\\Job{B}", "\\item b1"]));
        assert_eq!(parts.wrapping_env, None);
        assert_eq!(parts.head.reference.as_str(), "generated/work-p1.tex");
        assert_eq!(parts.tail.reference.as_str(), "generated/work-p2.tex");
        assert!(!parts.is_degenerate());
    }

    #[test]
    fn test_split_keeps_non_separator_boundary_line() {
        let block = make_block(&["\\SubHead{One}", "text", "\\SubHead{Two}", "more"]);
        let parts = split(&block, &[0, 2], 1);
        assert_eq!(parts.head.lines, lines(&["\\SubHead{One}", "text"]));
        assert_eq!(parts.tail.lines, lines(&["\\SubHead{Two}", "more"]));
    }

    #[test]
    fn test_split_rebalances_wrapping_environment() {
        let block = make_block(&[
            "% education",
            "\\begin{timeline}",
            "\\TItem{2019}",
            "\\vspace{\\GapTimelineItem}",
            "\\TItem{2015}",
            "\\end{timeline}",
            "",
        ]);
        let parts = split(&block, &[3], 0);
        assert_eq!(parts.wrapping_env.as_deref(), Some("timeline"));
        assert_eq!(
            parts.head.lines,
            lines(&["% education", "\\begin{timeline}", "\\TItem{2019}", "", "\\end{timeline}"])
        );
        assert_eq!(
            parts.tail.lines,
            lines(&[
                "\\begin{timeline}",
                "\\vspace{\\GapTimelineItem}",
                "\\TItem{2015}",
                "\\end{timeline}",
                ""
            ])
        );
    }

    #[test]
    fn test_split_does_not_mutate_original() {
        let block = make_block(&["a", "\\JobSep", "b"]);
        let before = block.clone();
        let _ = split(&block, &[1], 0);
        assert_eq!(block, before);
    }

    #[test]
    fn test_split_reconstructs_original_content() {
        let raw = ["\\Job{A}", "x", "", "\\SubHead{B}", "y", "\\SubHead{C}", "z"];
        let block = make_block(&raw);
        let parts = split(&block, &[3, 5], 0);
        let mut rebuilt = parts.head.lines.clone();
        rebuilt.push(String::new());
        rebuilt.extend(parts.tail.lines.iter().cloned());
        assert_eq!(rebuilt, lines(&raw));
    }

    #[test]
    fn test_boundary_at_first_line_is_degenerate() {
        let block = make_block(&["\\SubHead{A}", "text"]);
        let parts = split(&block, &[0], 0);
        assert!(parts.head.lines.is_empty());
        assert!(parts.is_degenerate());
    }

    #[test]
    fn test_wrapped_boundary_after_begin_is_degenerate() {
        let block = make_block(&[
            "\\begin{skills}",
            "\\vspace{\\GapSkillCat}",
            "x",
            "\\end{skills}",
        ]);
        let parts = split(&block, &[1], 0);
        assert!(parts.is_degenerate());
    }

    #[test]
    fn test_trailing_separator_is_degenerate() {
        let block = make_block(&["\\Job{A}", "x", "\\JobSep", ""]);
        let parts = split(&block, &[2], 0);
        assert!(parts.tail.lines.is_empty());
        assert!(parts.is_degenerate());
    }

    #[test]
    fn test_wrapping_env_requires_matching_close() {
        assert_eq!(find_wrapping_env(&lines(&["\\begin{a}", "x", "\\end{b}"])), None);
        assert_eq!(find_wrapping_env(&lines(&["x", "\\begin{a}", "\\end{a}"])), None);
        assert_eq!(
            find_wrapping_env(&lines(&["", "\\begin{a}", "x", "\\end{a}", "% tail"])),
            Some("a".to_string())
        );
    }
}
