use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, trace};

use spmf_cli::logging::redact_value;
use spmf_cli::output::{codec_path_for, write_csv, write_text};
use spmf_cli::summary::{catalog_table, print_frame};
use spmf_ingest::{EpisodeColumns, EventColumns, load_episodes_csv, load_events_csv};
use spmf_model::{
    AlgorithmSpec, EpisodeEvent, EventRow, InputKind, MiningResults, OutputShape, ParamValue,
    Parameter,
};
use spmf_runner::{MiningRunner, RunnerConfig};
use spmf_transform::{
    DecodeMode, IdentityLookup, MiningFrame, SymbolCodec, decode_lines, encode_episodes,
    encode_sequences, project_results,
};

use crate::cli::{
    DecodeArgs, EncodeArgs, EncodeModeArg, EpisodeAlgorithmArg, EpisodeColumnArgs, EpisodesArgs,
    RulesArgs, RunArgs, RunnerArgs, SequenceAlgorithmArg, SequencesArgs, ShapeArg,
};

pub fn run_algorithms() -> Result<()> {
    println!("{}", catalog_table());
    Ok(())
}

pub fn run_sequences(args: &SequencesArgs, runner_args: &RunnerArgs) -> Result<()> {
    let spec = sequence_spec(args)?;
    let Some(runner) = prepare_runner(&spec, &args.run, runner_args)? else {
        return Ok(());
    };
    let columns = EventColumns {
        id: args.columns.id_column.clone(),
        time: args.columns.time_column.clone(),
        item: args.columns.item_column.clone(),
    };
    let rows = load_events(&args.input, &columns)?;
    let frame = runner
        .run_events(&spec, &rows)
        .with_context(|| format!("run {}", spec.name))?;
    finish(frame, &args.input, &args.run)
}

pub fn run_episodes(args: &EpisodesArgs, runner_args: &RunnerArgs) -> Result<()> {
    let timestamps = !args.columns.no_timestamps;
    let spec = match &args.run.custom {
        Some(name) => custom_spec(
            name,
            &args.run.params,
            InputKind::Episodes { timestamps },
            OutputShape::FrequentEpisode,
        ),
        None => match args.algorithm {
            EpisodeAlgorithmArg::Tke => AlgorithmSpec::tke(args.k, args.max_window, timestamps),
            EpisodeAlgorithmArg::Emma => {
                AlgorithmSpec::emma(args.min_support, args.max_window, timestamps)
            }
            EpisodeAlgorithmArg::Afem => {
                AlgorithmSpec::afem(args.min_support, args.max_window, timestamps)
            }
        }?,
    };
    mine_episodes(&spec, &args.input, &args.columns, &args.run, runner_args)
}

pub fn run_rules(args: &RulesArgs, runner_args: &RunnerArgs) -> Result<()> {
    let timestamps = !args.columns.no_timestamps;
    let spec = match &args.run.custom {
        Some(name) => custom_spec(
            name,
            &args.run.params,
            InputKind::Episodes { timestamps },
            OutputShape::EpisodeRule,
        ),
        None => AlgorithmSpec::tke_rules(args.k, args.max_window, args.min_confidence, timestamps)?,
    };
    mine_episodes(&spec, &args.input, &args.columns, &args.run, runner_args)
}

pub fn run_encode(args: &EncodeArgs) -> Result<()> {
    let (text, codec, records) = match args.mode {
        EncodeModeArg::Sequences => {
            let columns = EventColumns {
                id: args.id_column.clone(),
                time: args
                    .time_column
                    .clone()
                    .unwrap_or_else(|| EventColumns::default().time),
                item: args.item_column.clone(),
            };
            let rows = load_events(&args.input, &columns)?;
            let codec = SymbolCodec::for_events(&rows).context("build symbol table")?;
            let text = encode_sequences(&rows, &codec).context("encode sequences")?;
            (text, codec, rows.len())
        }
        EncodeModeArg::Episodes => {
            let columns = episode_columns(
                &args.itemset_column,
                args.time_column.as_deref(),
                args.no_timestamps,
            );
            let events = load_episodes(&args.input, &columns)?;
            let codec = SymbolCodec::for_episodes(&events).context("build symbol table")?;
            let text = encode_episodes(&events, &codec, !args.no_timestamps)
                .context("encode episodes")?;
            (text, codec, events.len())
        }
    };

    let codec_path = args
        .codec
        .clone()
        .unwrap_or_else(|| codec_path_for(&args.output));
    write_text(&args.output, &text)?;
    write_text(&codec_path, &codec.to_json()?)?;
    println!(
        "Encoded {records} records ({} distinct items) to {}",
        codec.len(),
        args.output.display()
    );
    println!("Symbol table: {}", codec_path.display());
    Ok(())
}

pub fn run_decode(args: &DecodeArgs) -> Result<()> {
    let shape = match args.shape {
        ShapeArg::SequentialPattern => OutputShape::FrequentSequentialPattern,
        ShapeArg::Episode => OutputShape::FrequentEpisode,
        ShapeArg::Rule => OutputShape::EpisodeRule,
    };
    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    let mode = DecodeMode::from(shape);
    let results = match &args.codec {
        Some(path) => {
            let json =
                fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            let codec = SymbolCodec::from_json(&json)
                .with_context(|| format!("load symbol table {}", path.display()))?;
            decode_lines(content.lines(), mode, &codec)
        }
        None => decode_lines(content.lines(), mode, &IdentityLookup),
    }
    .with_context(|| format!("decode {}", args.input.display()))?;
    trace_results(&results);

    let data = project_results(shape, &results)?;
    let frame = MiningFrame::new("decoded", shape, data);
    finish_with_output(frame, &args.input, args.output.as_deref())
}

/// Resolve the runner config: file, then command-line overrides.
pub fn resolve_runner_config(args: &RunnerArgs) -> Result<RunnerConfig> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let mut config = RunnerConfig::discover(&cwd, args.config.as_deref())
        .context("load runner config")?;
    if let Some(jar) = &args.jar {
        config.executable_path.clone_from(jar);
    }
    if let Some(memory) = args.memory {
        config.memory_mb = memory;
    }
    if let Some(java) = &args.java {
        config.launcher.clone_from(java);
    }
    config.validate().context("runner config")?;
    debug!(
        launcher = %config.launcher,
        memory_mb = config.memory_mb,
        jar = %config.executable_path.display(),
        "resolved runner config"
    );
    Ok(config)
}

fn sequence_spec(args: &SequencesArgs) -> Result<AlgorithmSpec> {
    if let Some(name) = &args.run.custom {
        return Ok(custom_spec(
            name,
            &args.run.params,
            InputKind::Sequences,
            OutputShape::FrequentSequentialPattern,
        ));
    }
    let spec = match args.algorithm {
        SequenceAlgorithmArg::PrefixSpan => {
            AlgorithmSpec::prefix_span(args.min_support, args.max_pattern_length)?
        }
        SequenceAlgorithmArg::Spade => AlgorithmSpec::spade(args.min_support)?,
        SequenceAlgorithmArg::Vmsp => AlgorithmSpec::vmsp(
            args.min_support,
            args.max_pattern_length
                .context("VMSP requires --max-pattern-length")?,
            args.max_gap.context("VMSP requires --max-gap")?,
        )?,
    };
    Ok(spec)
}

fn custom_spec(
    name: &str,
    params: &[String],
    input: InputKind,
    output: OutputShape,
) -> AlgorithmSpec {
    let parameters = params
        .iter()
        .enumerate()
        .map(|(index, value)| {
            Parameter::new(format!("param{}", index + 1), ParamValue::Text(value.clone()))
        })
        .collect();
    AlgorithmSpec::custom(name, input, output, parameters)
}

/// Build the runner, or print the command line and return `None`.
fn prepare_runner(
    spec: &AlgorithmSpec,
    run: &RunArgs,
    runner_args: &RunnerArgs,
) -> Result<Option<MiningRunner>> {
    let runner = MiningRunner::new(resolve_runner_config(runner_args)?);
    if run.print_command {
        let command = runner.command_for(spec, Path::new("<input>"), Path::new("<output>"));
        println!("{command}");
        return Ok(None);
    }
    Ok(Some(runner))
}

fn mine_episodes(
    spec: &AlgorithmSpec,
    input: &Path,
    columns: &EpisodeColumnArgs,
    run: &RunArgs,
    runner_args: &RunnerArgs,
) -> Result<()> {
    let Some(runner) = prepare_runner(spec, run, runner_args)? else {
        return Ok(());
    };
    let columns = episode_columns(
        &columns.itemset_column,
        Some(&columns.time_column),
        columns.no_timestamps,
    );
    let events = load_episodes(input, &columns)?;
    let frame = runner
        .run_episodes(spec, &events)
        .with_context(|| format!("run {}", spec.name))?;
    finish(frame, input, run)
}

fn episode_columns(itemset: &str, time: Option<&str>, no_timestamps: bool) -> EpisodeColumns {
    let defaults = EpisodeColumns::default();
    EpisodeColumns {
        itemset: itemset.to_string(),
        timestamp: if no_timestamps {
            None
        } else {
            time.map(str::to_string).or(defaults.timestamp)
        },
    }
}

fn load_events(path: &Path, columns: &EventColumns) -> Result<Vec<EventRow>> {
    let rows =
        load_events_csv(path, columns).with_context(|| format!("load {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "loaded sequence table");
    if let Some(first) = rows.first() {
        debug!(first_item = %redact_value(&first.item), "first event");
    }
    Ok(rows)
}

fn load_episodes(path: &Path, columns: &EpisodeColumns) -> Result<Vec<EpisodeEvent>> {
    let events =
        load_episodes_csv(path, columns).with_context(|| format!("load {}", path.display()))?;
    info!(path = %path.display(), events = events.len(), "loaded event stream");
    if let Some(first) = events.first().and_then(|e| e.items.first()) {
        debug!(first_item = %redact_value(first), "first event");
    }
    Ok(events)
}

fn trace_results(results: &MiningResults) {
    for (pattern, support) in results.rendered().iter().zip(results.supports()) {
        trace!(pattern = %redact_value(pattern), support, "decoded result");
    }
}

fn finish(frame: MiningFrame, input: &Path, run: &RunArgs) -> Result<()> {
    finish_with_output(frame, input, run.output.as_deref())
}

fn finish_with_output(mut frame: MiningFrame, input: &Path, output: Option<&Path>) -> Result<()> {
    frame.set_source_file(input.to_path_buf());
    info!(results = frame.record_count(), "mining finished");
    match output {
        Some(path) => {
            let count = frame.record_count();
            write_csv(path, &mut frame.data)?;
            println!("Wrote {count} results to {}", path.display());
        }
        None => print_frame(&frame),
    }
    Ok(())
}
