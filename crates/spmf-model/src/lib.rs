pub mod algorithm;
pub mod error;
pub mod event;
pub mod pattern;

pub use algorithm::{
    AlgorithmSpec, CATALOG, CatalogEntry, InputKind, OutputShape, ParamValue, Parameter,
};
pub use error::{ModelError, Result};
pub use event::{EpisodeEvent, EventRow};
pub use pattern::{
    ITEMSET_ARROW, Itemsets, MiningResults, Pattern, RULE_IMPLICATION, Rule, render_itemsets,
};
