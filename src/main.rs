// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use amson::config::{EditorConfig, SongTable};
use amson::control::KeyboardController;
use amson::editor::{EditScript, ScoreBuilder};
use amson::export;
use amson::score::StageType;
use amson::timing::Metronome;
use anyhow::{Context, Result};
use std::env;

fn print_usage() {
    println!("AMSON - Rhythm Game Chart Editor");
    println!();
    println!("Usage: amson [--config <FILE>] <COMMAND>");
    println!();
    println!("Options:");
    println!("  --config <FILE>                 Editor settings (TOML)");
    println!();
    println!("Commands:");
    println!("  --list-songs [SONGS]            List the song table (YAML, default built-in)");
    println!("  --new <N> [STAGE]               Print an empty chart for song N");
    println!("  --edit <SCRIPT> [OUT]           Run an edit script, write the chart to OUT");
    println!("  --metronome <BPM> <START> <T>.. Show which media times (ms) sound a beat");
    println!("  --keys                          List the editor key bindings");
    println!("  --help                          Show this help message");
}

fn list_songs(path: Option<&str>) -> Result<()> {
    let table = match path {
        Some(path) => SongTable::load(path)?,
        None => SongTable::default(),
    };

    for (index, song) in table.songs.iter().enumerate() {
        println!(
            "{:>3}  {:<24} {:>6.1} BPM  {:>9.0}-{:<9.0} ms  {}",
            index, song.title, song.bpm, song.start_at_ms, song.end_at_ms, song.mv_id
        );
    }
    Ok(())
}

fn new_chart(config: &EditorConfig, song: usize, stage: StageType) -> Result<()> {
    let table = SongTable::default();
    let resource = table
        .get(song)
        .with_context(|| format!("No song at index {} ({} songs)", song, table.len()))?;

    let mut builder = ScoreBuilder::from_config(resource, config);
    builder.set_stage(stage);
    println!("{}", export::to_json(builder.score())?);
    Ok(())
}

fn run_script(config: &EditorConfig, script_path: &str, out: Option<&str>) -> Result<()> {
    let script = EditScript::load(script_path)?;
    let outcome = script.run(&SongTable::default(), config)?;

    for (index, edit, err) in &outcome.rejected {
        eprintln!("edit {} rejected: {:?}: {}", index, edit, err);
    }

    let stats = outcome.score.stats();
    eprintln!(
        "{} notes ({} long), {} sections, {} appeals, {} fevers",
        stats.total_notes, stats.long_notes, stats.sections, stats.appeals, stats.fevers
    );
    for issue in outcome.report.issues() {
        eprintln!("warning: {}", issue);
    }

    match out {
        Some(path) => export::write_json(&outcome.score, path)?,
        None => println!("{}", export::to_json(&outcome.score)?),
    }
    Ok(())
}

fn run_metronome(bpm: f64, start_at_ms: f64, times: &[f64]) {
    let mut metronome = Metronome::new(bpm, start_at_ms);
    println!("Beat interval: {:.2}ms", metronome.tick_interval_ms());

    for &time in times {
        let marker = if metronome.tick(time) { "beat" } else { "-" };
        println!("{:>10.1}  {}", time, marker);
    }
}

fn list_keys() {
    for binding in KeyboardController::with_defaults().bindings() {
        println!("  {:<16} {}", binding.shortcut, binding.description);
    }
}

fn parse_arg<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid {}: {}", what, value))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().collect();

    let mut config = EditorConfig::default();
    if args.len() >= 3 && args[1] == "--config" {
        config = EditorConfig::load(&args[2])?;
        args.drain(1..3);
    }

    if args.len() < 2 {
        println!("AMSON - Rhythm Game Chart Editor");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--list-songs" => {
            list_songs(args.get(2).map(String::as_str))?;
        }
        "--new" => {
            if args.len() < 3 {
                eprintln!("Error: --new requires a song number");
                eprintln!("Use --list-songs to see available songs");
                std::process::exit(1);
            }
            let song: usize = parse_arg(&args[2], "song number")?;
            let stage: StageType = match args.get(3) {
                Some(stage) => stage.parse().map_err(anyhow::Error::msg)?,
                None => StageType::default(),
            };
            new_chart(&config, song, stage)?;
        }
        "--edit" => {
            if args.len() < 3 {
                eprintln!("Error: --edit requires a script file");
                std::process::exit(1);
            }
            run_script(&config, &args[2], args.get(3).map(String::as_str))?;
        }
        "--metronome" => {
            if args.len() < 5 {
                eprintln!("Error: --metronome requires BPM, start time and at least one time");
                std::process::exit(1);
            }
            let bpm: f64 = parse_arg(&args[2], "BPM")?;
            if bpm <= 0.0 {
                anyhow::bail!("BPM must be positive, got {}", bpm);
            }
            let start_at_ms: f64 = parse_arg(&args[3], "start time")?;
            let times = args[4..]
                .iter()
                .map(|t| parse_arg(t, "time"))
                .collect::<Result<Vec<f64>>>()?;
            run_metronome(bpm, start_at_ms, &times);
        }
        "--keys" => list_keys(),
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
