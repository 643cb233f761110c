//! Property tests for the codec and the sequence and episode encoders.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use spmf_model::{EpisodeEvent, EventRow};
use spmf_transform::{
    DecodeMode, ItemCode, SymbolCodec, decode_lines, encode_sequences, group_episodes,
    group_sequences,
};

fn event_rows() -> impl Strategy<Value = Vec<EventRow>> {
    prop::collection::vec((0u8..4, 0i64..12, "[a-z]{1,3}"), 1..60).prop_map(|rows| {
        rows.into_iter()
            .map(|(id, ts, item)| EventRow::new(format!("s{id}"), ts, item))
            .collect()
    })
}

fn episode_events() -> impl Strategy<Value = Vec<EpisodeEvent>> {
    prop::collection::vec((prop::collection::vec("[a-e]", 1..4), -20i64..20), 1..40).prop_map(
        |events| {
            events
                .into_iter()
                .map(|(items, ts)| EpisodeEvent::new(items).with_timestamp(ts))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn codec_is_a_bijection(labels in prop::collection::vec("[a-zA-Z0-9 _|-]{1,6}", 1..40)) {
        let codec = SymbolCodec::build(&labels).unwrap();
        let distinct: BTreeSet<&String> = labels.iter().collect();
        prop_assert_eq!(codec.len(), distinct.len());
        let mut seen = BTreeSet::new();
        for label in &labels {
            let code = codec.encode(label).unwrap();
            prop_assert!(code >= 1 && code as usize <= codec.len());
            prop_assert_eq!(codec.decode(code).unwrap(), label.as_str());
            seen.insert(code);
        }
        prop_assert_eq!(seen.len(), distinct.len());
    }

    #[test]
    fn encoding_is_deterministic(rows in event_rows()) {
        let first = encode_sequences(&rows, &SymbolCodec::for_events(&rows).unwrap()).unwrap();
        let second = encode_sequences(&rows, &SymbolCodec::for_events(&rows).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sequences_respect_ordering_and_grammar(rows in event_rows()) {
        let codec = SymbolCodec::for_events(&rows).unwrap();
        let sequences = group_sequences(&rows, &codec).unwrap();

        let mut expected: BTreeMap<&str, BTreeSet<i64>> = BTreeMap::new();
        for row in &rows {
            expected.entry(row.sequence_id.as_str()).or_default().insert(row.timestamp);
        }
        prop_assert_eq!(sequences.len(), expected.len());

        for sequence in &sequences {
            let timestamps: Vec<i64> = sequence.itemsets.iter().map(|i| i.timestamp).collect();
            prop_assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert_eq!(timestamps.len(), expected[sequence.sequence_id.as_str()].len());
            for itemset in &sequence.itemsets {
                prop_assert!(!itemset.codes.is_empty());
                prop_assert!(itemset.codes.windows(2).all(|pair| pair[0] < pair[1]));
            }
            let line = sequence.to_line();
            prop_assert!(line.ends_with(" -1 -2"));
            let terminators = line.split_whitespace().filter(|t| *t == "-1").count();
            prop_assert_eq!(terminators, sequence.itemsets.len());
        }
    }

    #[test]
    fn encoded_sequences_decode_back_to_labels(rows in event_rows(), support in 1u64..1000) {
        let codec = SymbolCodec::for_events(&rows).unwrap();
        let sequences = group_sequences(&rows, &codec).unwrap();
        let lines: Vec<String> = sequences
            .iter()
            .map(|s| s.to_line().replace("-2", &format!("#SUP: {support}")))
            .collect();
        let results = decode_lines(&lines, DecodeMode::Patterns, &codec).unwrap();
        prop_assert_eq!(results.len(), sequences.len());
        prop_assert!(results.supports().iter().all(|s| *s == support));

        let rendered = results.rendered();
        for (sequence, text) in sequences.iter().zip(&rendered) {
            let labels: Vec<String> = sequence
                .itemsets
                .iter()
                .map(|itemset| {
                    itemset
                        .codes
                        .iter()
                        .map(|code: &ItemCode| codec.decode(*code).unwrap().to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect();
            prop_assert_eq!(text, &labels.join(" -> "));
        }
    }

    #[test]
    fn timestamped_episodes_are_strictly_increasing(events in episode_events()) {
        let codec = SymbolCodec::for_episodes(&events).unwrap();
        let episodes = group_episodes(&events, &codec, true).unwrap();

        let distinct: BTreeSet<i64> = events.iter().filter_map(|e| e.timestamp).collect();
        let timestamps: Vec<i64> = episodes.iter().filter_map(|e| e.timestamp).collect();
        prop_assert_eq!(timestamps.len(), episodes.len());
        prop_assert!(timestamps.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(timestamps, distinct.into_iter().collect::<Vec<_>>());
        for episode in &episodes {
            prop_assert!(!episode.codes.is_empty());
            prop_assert!(episode.codes.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
