//! Algorithm records driving the encode, invoke, decode pipeline.
//!
//! Every mining algorithm is described by data: the name the executable
//! expects, the parameters it takes in positional order, the input grammar
//! it reads and the shape of the table produced from its output. One
//! generic pipeline consumes these records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Input grammar the executable reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// One line per sequence, itemsets terminated by `-1`, sequence by `-2`.
    Sequences,
    /// One line per event group, optionally suffixed with `|<timestamp>`.
    Episodes { timestamps: bool },
}

impl InputKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sequences => "sequences",
            Self::Episodes { timestamps: true } => "episodes (timestamped)",
            Self::Episodes { timestamps: false } => "episodes",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output table layout for an algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputShape {
    FrequentSequentialPattern,
    FrequentEpisode,
    EpisodeRule,
}

impl OutputShape {
    /// Column names of the projected table, in order.
    pub const fn column_names(self) -> &'static [&'static str] {
        match self {
            Self::FrequentSequentialPattern => &["Frequent sequential pattern", "Support"],
            Self::FrequentEpisode => &["Frequent episode", "Support"],
            Self::EpisodeRule => &["Episode rule", "Support", "Confidence"],
        }
    }

    pub const fn is_rule(self) -> bool {
        matches!(self, Self::EpisodeRule)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FrequentSequentialPattern => "sequential patterns",
            Self::FrequentEpisode => "episodes",
            Self::EpisodeRule => "episode rules",
        }
    }
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single positional argument for the executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    Integer(u64),
    Ratio(f64),
    Flag(bool),
    Text(String),
}

impl ParamValue {
    pub fn to_argument(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Ratio(value) => value.to_string(),
            Self::Flag(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: ParamValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Configuration record for one algorithm invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmSpec {
    /// Name passed to the executable's `run` command.
    pub name: String,
    pub input: InputKind,
    pub output: OutputShape,
    /// Positional parameters, in the order the executable expects them.
    pub parameters: Vec<Parameter>,
}

impl AlgorithmSpec {
    pub fn custom(
        name: impl Into<String>,
        input: InputKind,
        output: OutputShape,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            parameters,
        }
    }

    /// PrefixSpan over sequence input. `min_support` is a ratio in (0, 1].
    pub fn prefix_span(min_support: f64, max_pattern_length: Option<u64>) -> Result<Self> {
        let mut parameters = vec![min_support_ratio(min_support)?];
        if let Some(length) = max_pattern_length {
            parameters.push(positive("max_pattern_length", length)?);
        }
        Ok(Self::custom(
            "PrefixSpan",
            InputKind::Sequences,
            OutputShape::FrequentSequentialPattern,
            parameters,
        ))
    }

    pub fn spade(min_support: f64) -> Result<Self> {
        Ok(Self::custom(
            "SPADE",
            InputKind::Sequences,
            OutputShape::FrequentSequentialPattern,
            vec![min_support_ratio(min_support)?],
        ))
    }

    /// VMSP (maximal sequential patterns).
    pub fn vmsp(min_support: f64, max_pattern_length: u64, max_gap: u64) -> Result<Self> {
        Ok(Self::custom(
            "VMSP",
            InputKind::Sequences,
            OutputShape::FrequentSequentialPattern,
            vec![
                min_support_ratio(min_support)?,
                positive("max_pattern_length", max_pattern_length)?,
                positive("max_gap", max_gap)?,
            ],
        ))
    }

    /// Top-k frequent episodes.
    pub fn tke(k: u64, max_window: u64, timestamps_present: bool) -> Result<Self> {
        Ok(Self::custom(
            "TKE",
            InputKind::Episodes {
                timestamps: timestamps_present,
            },
            OutputShape::FrequentEpisode,
            vec![
                positive("k", k)?,
                positive("max_window", max_window)?,
                self_increment(timestamps_present),
            ],
        ))
    }

    /// EMMA frequent episodes with an absolute minimum support.
    pub fn emma(min_support: u64, max_window: u64, timestamps_present: bool) -> Result<Self> {
        Self::episode_by_support("EMMA", min_support, max_window, timestamps_present)
    }

    pub fn afem(min_support: u64, max_window: u64, timestamps_present: bool) -> Result<Self> {
        Self::episode_by_support("AFEM", min_support, max_window, timestamps_present)
    }

    /// Top-k episode rules.
    pub fn tke_rules(
        k: u64,
        max_window: u64,
        min_confidence: f64,
        timestamps_present: bool,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(ModelError::invalid(
                "min_confidence",
                format!("{min_confidence} is outside [0, 1]"),
            ));
        }
        Ok(Self::custom(
            "TKERules",
            InputKind::Episodes {
                timestamps: timestamps_present,
            },
            OutputShape::EpisodeRule,
            vec![
                positive("k", k)?,
                positive("max_window", max_window)?,
                Parameter::new("min_confidence", ParamValue::Ratio(min_confidence)),
                self_increment(timestamps_present),
            ],
        ))
    }

    fn episode_by_support(
        name: &str,
        min_support: u64,
        max_window: u64,
        timestamps_present: bool,
    ) -> Result<Self> {
        Ok(Self::custom(
            name,
            InputKind::Episodes {
                timestamps: timestamps_present,
            },
            OutputShape::FrequentEpisode,
            vec![
                positive("min_support", min_support)?,
                positive("max_window", max_window)?,
                self_increment(timestamps_present),
            ],
        ))
    }

    /// Parameter values as command-line tokens, in positional order.
    pub fn arguments(&self) -> Vec<String> {
        self.parameters
            .iter()
            .map(|param| param.value.to_argument())
            .collect()
    }
}

fn min_support_ratio(value: f64) -> Result<Parameter> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(ModelError::invalid(
            "min_support",
            format!("{value} is outside (0, 1]"),
        ));
    }
    Ok(Parameter::new("min_support", ParamValue::Ratio(value)))
}

fn positive(name: &str, value: u64) -> Result<Parameter> {
    if value == 0 {
        return Err(ModelError::invalid(name, "must be at least 1"));
    }
    Ok(Parameter::new(name, ParamValue::Integer(value)))
}

// The executable's trailing flag asks it to number events itself, which is
// only wanted when the input carries no timestamps.
fn self_increment(timestamps_present: bool) -> Parameter {
    Parameter::new(
        "self_increment_timestamps",
        ParamValue::Flag(!timestamps_present),
    )
}

/// Static description of a supported algorithm, for listings.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub output: OutputShape,
    pub parameters: &'static [&'static str],
    pub description: &'static str,
}

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "PrefixSpan",
        output: OutputShape::FrequentSequentialPattern,
        parameters: &["min_support", "max_pattern_length?"],
        description: "Frequent sequential patterns by prefix projection",
    },
    CatalogEntry {
        name: "SPADE",
        output: OutputShape::FrequentSequentialPattern,
        parameters: &["min_support"],
        description: "Frequent sequential patterns over vertical id-lists",
    },
    CatalogEntry {
        name: "VMSP",
        output: OutputShape::FrequentSequentialPattern,
        parameters: &["min_support", "max_pattern_length", "max_gap"],
        description: "Maximal sequential patterns",
    },
    CatalogEntry {
        name: "TKE",
        output: OutputShape::FrequentEpisode,
        parameters: &["k", "max_window", "self_increment_timestamps"],
        description: "Top-k frequent episodes",
    },
    CatalogEntry {
        name: "EMMA",
        output: OutputShape::FrequentEpisode,
        parameters: &["min_support", "max_window", "self_increment_timestamps"],
        description: "Frequent episodes with a minimum support",
    },
    CatalogEntry {
        name: "AFEM",
        output: OutputShape::FrequentEpisode,
        parameters: &["min_support", "max_window", "self_increment_timestamps"],
        description: "Frequent episodes by the AFEM search",
    },
    CatalogEntry {
        name: "TKERules",
        output: OutputShape::EpisodeRule,
        parameters: &[
            "k",
            "max_window",
            "min_confidence",
            "self_increment_timestamps",
        ],
        description: "Top-k episode rules",
    },
];
