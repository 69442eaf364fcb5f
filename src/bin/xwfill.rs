extern crate clap;

use anyhow::{bail, Context, Result};
use clap::{App, Arg};
use crossword_csp::csp::{ArcQueue, CspRunner, SolveOutcome, SolverConfig};
use crossword_csp::puzzle::{render, Crossword};
use log::LevelFilter;

fn init_logging(verbosity: u64) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("failed to initialize logging")
}

fn parse_number<T: std::str::FromStr>(value: Option<&str>, name: &str) -> Result<Option<T>> {
    match value {
        Some(v) => match v.parse() {
            Ok(n) => Ok(Some(n)),
            Err(_) => bail!("--{name} expects a non-negative integer, got {v:?}"),
        },
        None => Ok(None),
    }
}

fn main() -> Result<()> {
    let matches = App::new("xwfill")
        .about("Fills a crossword grid from a word list")
        .arg(
            Arg::with_name("structure")
                .value_name("STRUCTURE")
                .help("Grid structure file; '_' marks an open cell")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("Word list, one word per line")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("output")
                .value_name("OUTPUT")
                .help("Also write the filled grid to this file")
                .index(3),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("N")
                .help("Break heuristic ties at random with this seed"),
        )
        .arg(
            Arg::with_name("max-steps")
                .long("max-steps")
                .value_name("N")
                .help("Give up after N search steps"),
        )
        .arg(
            Arg::with_name("time-limit")
                .long("time-limit")
                .value_name("MS")
                .help("Give up after MS milliseconds"),
        )
        .arg(
            Arg::with_name("inference")
                .long("inference")
                .takes_value(false)
                .help("Maintain arc consistency after every assignment"),
        )
        .arg(
            Arg::with_name("lifo")
                .long("lifo")
                .takes_value(false)
                .help("Process AC-3 arcs newest first"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increase log verbosity"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"))?;

    let structure = matches.value_of("structure").expect("required by clap");
    let words = matches.value_of("words").expect("required by clap");
    let crossword = Crossword::from_files(structure, words)
        .with_context(|| format!("failed to load puzzle from {structure} and {words}"))?;

    let mut config = SolverConfig::default()
        .with_inference(matches.is_present("inference"))
        .with_arc_queue(if matches.is_present("lifo") {
            ArcQueue::Lifo
        } else {
            ArcQueue::Fifo
        });
    if let Some(seed) = parse_number(matches.value_of("seed"), "seed")? {
        config = config.with_seed(seed);
    }
    if let Some(steps) = parse_number(matches.value_of("max-steps"), "max-steps")? {
        config = config.with_max_steps(steps);
    }
    if let Some(ms) = parse_number(matches.value_of("time-limit"), "time-limit")? {
        config = config.with_time_limit_ms(ms);
    }

    let result = CspRunner::run(&crossword, &config).context("puzzle model is malformed")?;

    match result.outcome {
        SolveOutcome::Solved(fill) => {
            let grid = render(&crossword, &fill);
            print!("{grid}");
            if let Some(output) = matches.value_of("output") {
                std::fs::write(output, &grid)
                    .with_context(|| format!("failed to write {output}"))?;
            }
        }
        SolveOutcome::Unsatisfiable => println!("No solution."),
        SolveOutcome::Aborted(reason) => {
            bail!("search stopped before finding a fill: {reason:?}")
        }
    }
    Ok(())
}
