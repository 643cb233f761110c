//! Parsing of the executable's result lines.
//!
//! Pattern lines list itemsets terminated by `-1` and end with the support:
//!
//! ```text
//! 1 -1 1 2 -1 #SUP: 3
//! ```
//!
//! Rule lines carry three `#`-delimited fields:
//!
//! ```text
//! 1 ==> 2 #SUP: 2 #CONF: 0.4
//! ```
//!
//! Every code is mapped back to its label through a [`CodeLookup`]. Any line
//! that does not parse fails the whole decode.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use spmf_model::{Itemsets, MiningResults, OutputShape, Pattern, Rule};

use crate::codec::{CodeLookup, ItemCode};
use crate::encoder::ITEMSET_TERMINATOR;
use crate::error::{Result, TranscodeError};

static SUPPORT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SUP:\s*(\d+)").expect("support marker regex"));
static TERMINAL_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*$").expect("terminal digits regex"));

const RULE_FIELD_DELIMITER: char = '#';
const RULE_ARROW: &str = "==>";
const SUPPORT_PREFIX: &str = "SUP:";
const CONFIDENCE_PREFIX: &str = "CONF:";

/// How result lines are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    Patterns,
    Rules,
}

impl From<OutputShape> for DecodeMode {
    fn from(shape: OutputShape) -> Self {
        if shape.is_rule() {
            Self::Rules
        } else {
            Self::Patterns
        }
    }
}

/// Decode all result lines. Blank lines carry no result and are skipped.
pub fn decode_lines<I, S, L>(lines: I, mode: DecodeMode, lookup: &L) -> Result<MiningResults>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    L: CodeLookup + ?Sized,
{
    let numbered = lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.as_ref().trim().is_empty());
    let results = match mode {
        DecodeMode::Patterns => MiningResults::Patterns(
            numbered
                .map(|(line_no, line)| decode_pattern_line(line.as_ref(), line_no, lookup))
                .collect::<Result<Vec<_>>>()?,
        ),
        DecodeMode::Rules => MiningResults::Rules(
            numbered
                .map(|(line_no, line)| decode_rule_line(line.as_ref(), line_no, lookup))
                .collect::<Result<Vec<_>>>()?,
        ),
    };
    tracing::debug!(results = results.len(), ?mode, "decoded output");
    Ok(results)
}

/// Decode one frequent-pattern line.
///
/// Segments before the last `-1` are itemsets. The final segment holds the
/// support, read after a `SUP:` marker or else from its single token.
/// Codes written before the marker without a closing `-1` form a last
/// itemset; without a marker they are an error.
pub fn decode_pattern_line<L>(line: &str, line_no: usize, lookup: &L) -> Result<Pattern>
where
    L: CodeLookup + ?Sized,
{
    let (segments, tail) = split_itemsets(line);
    let mut itemsets: Vec<Vec<&str>> = Vec::with_capacity(segments.len() + 1);
    for segment in segments {
        if segment.is_empty() {
            return Err(malformed(line_no, line, "empty itemset"));
        }
        itemsets.push(segment);
    }

    let marker = tail.iter().position(|token| {
        token
            .trim_start_matches(RULE_FIELD_DELIMITER)
            .starts_with(SUPPORT_PREFIX)
    });
    let support_text = match marker {
        Some(pos) => {
            if pos > 0 {
                itemsets.push(tail[..pos].to_vec());
            }
            let text = tail[pos..].join(" ");
            SUPPORT_MARKER
                .captures(&text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        }
        None => {
            if tail.len() > 1 {
                return Err(malformed(
                    line_no,
                    line,
                    "codes after the last itemset without a support marker",
                ));
            }
            TERMINAL_DIGITS
                .captures(&tail.join(" "))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        }
    };
    let Some(support_text) = support_text else {
        return Err(malformed(line_no, line, "no trailing support value"));
    };
    let support = support_text
        .parse::<u64>()
        .map_err(|_| malformed(line_no, line, "support value out of range"))?;
    if itemsets.is_empty() {
        return Err(malformed(line_no, line, "pattern has no itemsets"));
    }
    let itemsets = decode_itemsets(&itemsets, line, line_no, lookup)?;
    Ok(Pattern { itemsets, support })
}

/// Decode one rule line: `<antecedent> ==> <consequent> #SUP: <int> #CONF: <float>`.
pub fn decode_rule_line<L>(line: &str, line_no: usize, lookup: &L) -> Result<Rule>
where
    L: CodeLookup + ?Sized,
{
    let fields: Vec<&str> = line.split(RULE_FIELD_DELIMITER).collect();
    if fields.len() != 3 {
        return Err(malformed(
            line_no,
            line,
            format!(
                "expected 3 '{RULE_FIELD_DELIMITER}'-delimited fields, found {}",
                fields.len()
            ),
        ));
    }
    let Some((antecedent, consequent)) = fields[0].split_once(RULE_ARROW) else {
        return Err(malformed(line_no, line, "missing rule implication"));
    };
    let antecedent = rule_side(antecedent, line, line_no, lookup)?;
    let consequent = rule_side(consequent, line, line_no, lookup)?;

    let support = labeled_value(fields[1], SUPPORT_PREFIX)
        .and_then(|value| value.parse::<u64>().ok())
        .ok_or_else(|| malformed(line_no, line, "invalid support field"))?;
    let confidence = labeled_value(fields[2], CONFIDENCE_PREFIX)
        .and_then(|value| value.parse::<f64>().ok())
        .ok_or_else(|| malformed(line_no, line, "invalid confidence field"))?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(malformed(line_no, line, "confidence outside [0, 1]"));
    }
    Ok(Rule {
        antecedent,
        consequent,
        support,
        confidence,
    })
}

/// Split whitespace tokens on the itemset terminator.
///
/// Returns the terminated segments and the tokens after the last terminator.
fn split_itemsets(text: &str) -> (Vec<Vec<&str>>, Vec<&str>) {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for token in text.split_whitespace() {
        if token == ITEMSET_TERMINATOR {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push(token);
        }
    }
    (segments, current)
}

fn rule_side<L>(text: &str, line: &str, line_no: usize, lookup: &L) -> Result<Itemsets>
where
    L: CodeLookup + ?Sized,
{
    let normalized = text.replace(',', " ");
    let (mut segments, tail) = split_itemsets(&normalized);
    if !tail.is_empty() {
        segments.push(tail);
    }
    if segments.is_empty() || segments.iter().any(Vec::is_empty) {
        return Err(malformed(line_no, line, "empty rule side"));
    }
    decode_itemsets(&segments, line, line_no, lookup)
}

fn decode_itemsets<L>(
    segments: &[Vec<&str>],
    line: &str,
    line_no: usize,
    lookup: &L,
) -> Result<Itemsets>
where
    L: CodeLookup + ?Sized,
{
    segments
        .iter()
        .map(|segment| {
            segment
                .iter()
                .map(|token| {
                    let code = token.parse::<ItemCode>().map_err(|_| {
                        malformed(line_no, line, format!("invalid item code {token:?}"))
                    })?;
                    lookup.label(code).map(Cow::into_owned)
                })
                .collect::<Result<Vec<String>>>()
        })
        .collect()
}

fn labeled_value<'a>(field: &'a str, prefix: &str) -> Option<&'a str> {
    field.trim().strip_prefix(prefix).map(str::trim)
}

fn malformed(line_no: usize, line: &str, reason: impl Into<String>) -> TranscodeError {
    TranscodeError::MalformedOutput {
        line: line_no,
        content: line.to_string(),
        reason: reason.into(),
    }
}
