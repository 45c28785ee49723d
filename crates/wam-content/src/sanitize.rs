//! Cleanup of AI-returned text before it reaches the editor.
//!
//! The generation backend occasionally wraps the message in assistant
//! boilerplate. Removal is fixed-pattern only: markdown headers, lead-in
//! preamble lines, metadata footers, code fences and bold markers.

use regex::Regex;

/// Compiled cleanup patterns, built once per generator.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    header: Regex,
    preamble: Regex,
    footer: Regex,
    fence: Regex,
    bold: Regex,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCleaner {
    pub fn new() -> Self {
        Self {
            // "# Heading" .. "###### Heading"
            header: Regex::new(r"^#{1,6}\s").unwrap(),
            // "Sure, here's your message:" and friends
            preamble: Regex::new(
                r"(?i)^(sure|certainly|of course|absolutely|here('|’)s|here is)\b.*?:?\s*$",
            )
            .unwrap(),
            // "Character count: 123", "Word count: 45", "(123 characters)"
            footer: Regex::new(
                r"(?i)^(\*?\s*(character|word)\s*count\s*[:=].*|\(\d+\s*(characters|words)\)\s*)$",
            )
            .unwrap(),
            // "```" and "```json"
            fence: Regex::new(r"^```[a-zA-Z]*\s*$").unwrap(),
            bold: Regex::new(r"\*\*([^*]+)\*\*").unwrap(),
        }
    }

    /// Strip boilerplate and normalise whitespace. The message body
    /// itself is never reworded; only marker lines are dropped.
    pub fn clean(&self, raw: &str) -> String {
        let mut kept: Vec<&str> = Vec::new();
        let mut seen_body = false;

        for line in raw.lines() {
            let trimmed = line.trim();
            if self.fence.is_match(trimmed) {
                continue;
            }
            if self.header.is_match(trimmed) {
                continue;
            }
            if self.footer.is_match(trimmed) {
                continue;
            }
            // horizontal rules around metadata blocks
            if trimmed.chars().all(|c| c == '-') && trimmed.len() >= 3 {
                continue;
            }
            // preamble only counts before the first body line
            if !seen_body && self.preamble.is_match(trimmed) {
                continue;
            }
            if !trimmed.is_empty() {
                seen_body = true;
            }
            kept.push(line);
        }

        let joined = kept.join("\n");
        let unbolded = self.bold.replace_all(&joined, "$1");
        collapse_blank_runs(unbolded.trim())
    }
}

/// Collapse runs of 2+ blank lines into a single blank line.
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}
