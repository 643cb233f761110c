//! End-to-end transcoding tests: rows to input text, result lines to tables.

use spmf_model::{EpisodeEvent, EventRow, MiningResults, OutputShape};
use spmf_transform::{
    DecodeMode, IdentityLookup, SymbolCodec, TranscodeError, decode_lines, encode_episodes,
    encode_sequences, project, project_results,
};

fn prefixspan_rows() -> Vec<EventRow> {
    let ids = std::iter::repeat_n("S1", 9)
        .chain(std::iter::repeat_n("S2", 7))
        .chain(std::iter::repeat_n("S3", 8))
        .chain(std::iter::repeat_n("S4", 7));
    let times = [
        0, 1, 1, 1, 2, 2, 3, 4, 4, 5, 5, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 13, 14, 15, 16,
        16, 17, 18, 19,
    ];
    let items = [
        "a", "a", "b", "c", "a", "c", "d", "c", "f", "a", "d", "c", "b", "c", "a", "e", "e", "f",
        "a", "b", "d", "f", "c", "b", "e", "g", "a", "f", "c", "b", "c",
    ];
    ids.zip(times)
        .zip(items)
        .map(|((id, time), item)| EventRow::new(id, time, item))
        .collect()
}

#[test]
fn single_sequence_scenario() {
    let rows = vec![
        EventRow::new("s", 0, "1"),
        EventRow::new("s", 1, "1"),
        EventRow::new("s", 1, "2"),
        EventRow::new("s", 2, "1"),
    ];
    let codec = SymbolCodec::for_events(&rows).expect("codec");
    assert_eq!(codec.encode("1").expect("code"), 1);
    assert_eq!(codec.encode("2").expect("code"), 2);
    let text = encode_sequences(&rows, &codec).expect("encode");
    assert_eq!(text, "1 -1 1 2 -1 1 -1 -2");

    let results =
        decode_lines(["1 -1 1 2 -1 SUP: 3"], DecodeMode::Patterns, &codec).expect("decode");
    assert_eq!(results.rendered(), vec!["1 -> 1 2".to_string()]);
    assert_eq!(results.supports(), vec![3]);
}

#[test]
fn rule_scenario() {
    let codec = SymbolCodec::build(["1", "2"]).expect("codec");
    let results =
        decode_lines(["1 ==> 2 #SUP: 2 #CONF: 0.4"], DecodeMode::Rules, &codec).expect("decode");
    assert_eq!(results.rendered(), vec!["1 ==> 2".to_string()]);
    assert_eq!(results.supports(), vec![2]);
    let confidences = results.confidences().expect("rule confidences");
    assert!((confidences[0] - 0.4).abs() < 1e-12);
}

#[test]
fn encodes_prefixspan_sample() {
    let rows = prefixspan_rows();
    let codec = SymbolCodec::for_events(&rows).expect("codec");
    let labels: Vec<&str> = codec.iter().map(|(_, label)| label).collect();
    assert_eq!(labels, vec!["a", "b", "c", "d", "f", "e", "g"]);

    let text = encode_sequences(&rows, &codec).expect("encode");
    insta::assert_snapshot!(text, @r"
    1 -1 1 2 3 -1 1 3 -1 4 -1 3 5 -1 -2
    1 4 -1 3 -1 2 3 -1 1 6 -1 -2
    5 6 -1 1 2 -1 4 5 -1 3 -1 2 -1 -2
    6 -1 7 -1 1 5 -1 3 -1 2 -1 3 -1 -2
    ");
}

#[test]
fn encoding_is_repeatable() {
    let rows = prefixspan_rows();
    let first = encode_sequences(&rows, &SymbolCodec::for_events(&rows).expect("codec"));
    let second = encode_sequences(&rows, &SymbolCodec::for_events(&rows).expect("codec"));
    assert_eq!(first.expect("encode"), second.expect("encode"));
}

#[test]
fn decodes_prefixspan_output_to_labels() {
    let rows = prefixspan_rows();
    let codec = SymbolCodec::for_events(&rows).expect("codec");
    let output = "2 3 -1 1 -1 #SUP: 2\n5 -1 2 -1 #SUP: 2\n5 -1 2 -1 3 -1 #SUP: 2\n";
    let results = decode_lines(output.lines(), DecodeMode::Patterns, &codec).expect("decode");
    assert_eq!(
        results.rendered(),
        vec![
            "b c -> a".to_string(),
            "f -> b".to_string(),
            "f -> b -> c".to_string()
        ]
    );

    let df = project_results(OutputShape::FrequentSequentialPattern, &results).expect("project");
    assert_eq!(df.height(), 3);
    assert!(df.column("Frequent sequential pattern").is_ok());
    assert!(df.column("Support").is_ok());
}

#[test]
fn encodes_timestamped_episodes() {
    let events = vec![
        EpisodeEvent::new(["1"]).with_timestamp(1),
        EpisodeEvent::new(["1"]).with_timestamp(2),
        EpisodeEvent::new(["1", "2"]).with_timestamp(3),
        EpisodeEvent::new(["1"]).with_timestamp(6),
        EpisodeEvent::new(["1", "2"]).with_timestamp(7),
        EpisodeEvent::new(["1"]).with_timestamp(8),
        EpisodeEvent::new(["2"]).with_timestamp(9),
        EpisodeEvent::new(["2"]).with_timestamp(11),
    ];
    let codec = SymbolCodec::for_episodes(&events).expect("codec");
    let text = encode_episodes(&events, &codec, true).expect("encode");
    insta::assert_snapshot!(text, @r"
    1|1
    1|2
    1 2|3
    1|6
    1 2|7
    1|8
    2|9
    2|11
    ");
}

#[test]
fn decodes_episode_output_with_identity_lookup() {
    let output = [
        "1 -1 #SUP: 5",
        "2 -1 #SUP: 3",
        "1 2 -1 #SUP: 2",
        "1 -1 1 -1 #SUP: 3",
        "1 -1 2 -1 #SUP: 2",
        "1 -1 1 2 -1 #SUP: 2",
    ];
    let results = decode_lines(output, DecodeMode::Patterns, &IdentityLookup).expect("decode");
    let MiningResults::Patterns(patterns) = &results else {
        panic!("expected patterns");
    };
    assert_eq!(patterns.len(), 6);
    assert_eq!(
        results.rendered(),
        vec!["1", "2", "1 2", "1 -> 1", "1 -> 2", "1 -> 1 2"]
    );
    assert_eq!(results.supports(), vec![5, 3, 2, 3, 2, 2]);
}

#[test]
fn malformed_line_rejects_the_whole_output() {
    let codec = SymbolCodec::build(["x", "y"]).expect("codec");
    let output = ["1 -1 #SUP: 4", "2 -1"];
    let err = decode_lines(output, DecodeMode::Patterns, &codec).unwrap_err();
    assert!(matches!(err, TranscodeError::MalformedOutput { line: 2, .. }));
}

#[test]
fn empty_input_is_rejected_before_encoding() {
    let rows: Vec<EventRow> = Vec::new();
    assert!(matches!(
        SymbolCodec::for_events(&rows),
        Err(TranscodeError::EmptyInput { .. })
    ));
}

#[test]
fn projection_checks_shape() {
    let err = project(
        OutputShape::EpisodeRule,
        &["a ==> b".to_string(), "b ==> a".to_string()],
        &[1, 1],
        Some(&[0.5]),
    )
    .unwrap_err();
    assert!(matches!(err, TranscodeError::ShapeMismatch { .. }));
}
