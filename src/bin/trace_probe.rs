use std::env;
use std::time::Instant;

use stepviz::render::render;
use stepviz::{Algorithm, Catalog, Checkpoints, Problem, SortAlgorithm};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};
use tracing_subscriber::EnvFilter;

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("trace_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    eprintln!("\n{}", "=".repeat(72));
    eprintln!("stepviz trace probe: generation, checkpointing and seek cost");
    eprintln!("{}", "=".repeat(72));
    eprintln!("  steps:   trace length");
    eprintln!("  gen_s:   time to run the instrumented algorithm");
    eprintln!("  seek_s:  time for {} checkpointed seeks", options.seeks);
    eprintln!("  status:  'passed' when seeks match a full replay (up to {} steps)", options.verify_limit);
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/3] Comparison sorts on descending input...");
    for algorithm in [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
    ] {
        for &len in &[64usize, 256, 1_024] {
            let problem = Problem::Sort {
                algorithm,
                values: (0..len as i64).rev().collect(),
            };
            measurements.push(probe(&options, &mut sys, format!("len={len}"), &problem));
        }
    }

    eprintln!("[2/3] Edit distance on DNA-like words...");
    for &len in &[16usize, 64, 128] {
        let problem = Problem::EditDistance {
            source: deterministic_dna(len, 0),
            target: deterministic_dna(len, 1),
        };
        measurements.push(probe(&options, &mut sys, format!("len={len}"), &problem));
    }

    eprintln!("[3/3] KMP on periodic text...");
    for &len in &[256usize, 4_096, 32_768] {
        let problem = Problem::Kmp {
            text: "ab".repeat(len / 2),
            pattern: "abab".to_string(),
        };
        measurements.push(probe(&options, &mut sys, format!("text={len}"), &problem));
    }
    eprintln!();

    options.format.write(&measurements);
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    seeks: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Table;
        let mut verify_limit = 200_000usize;
        let mut seeks = 64usize;

        while let Some(arg) = args.next() {
            let arg: String = arg.into();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            let mut value = |name: &str| -> Result<String, String> {
                match &inline {
                    Some(v) => Ok(v.clone()),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {name}")),
                }
            };
            match flag.as_str() {
                "-h" | "--help" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--format" => format = OutputFormat::from_str(&value("--format")?)?,
                "--verify-limit" => {
                    verify_limit = value("--verify-limit")?
                        .parse()
                        .map_err(|_| "verify limit must be a positive integer".to_string())?
                }
                "--seeks" => {
                    seeks = value("--seeks")?
                        .parse()
                        .map_err(|_| "seek count must be a positive integer".to_string())?
                }
                _ => return Err(format!("unrecognized argument '{arg}'")),
            }
        }

        Ok(Self {
            format,
            verify_limit,
            seeks,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --features probe --bin trace_probe [-- <options>]

Options:
  --format <csv|table>      Output format (default: table)
  --verify-limit <N>        Largest trace checked against a full replay (default: 200000)
  --seeks <N>               Checkpointed seeks per scenario (default: 64)
  -h, --help                Print this help message

Set RUST_LOG=stepviz=debug to see generation and checkpoint spans.
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
        }
    }
}

struct Measurement {
    scenario: String,
    size_desc: String,
    steps: usize,
    gen_s: f64,
    seek_s: f64,
    rss_delta_kib: u64,
    status: &'static str,
}

fn probe(options: &Options, sys: &mut System, size_desc: String, problem: &Problem) -> Measurement {
    let scenario = problem.id().to_string();
    eprint!("      {scenario} {size_desc}... ");

    let before = rss_kib(sys);
    let start = Instant::now();
    let trace = Catalog.generate(problem);
    let gen_s = start.elapsed().as_secs_f64();
    let checkpoints = Checkpoints::build(&Catalog, problem, &trace, None);
    let after = rss_kib(sys);

    // evenly spaced targets, always including both ends
    let targets: Vec<usize> = (0..=options.seeks)
        .map(|i| i * trace.len() / options.seeks.max(1))
        .collect();
    let start = Instant::now();
    let frames: Vec<_> = targets
        .iter()
        .map(|&k| checkpoints.render(&Catalog, problem, trace.steps(), k))
        .collect();
    let seek_s = start.elapsed().as_secs_f64();

    let status = if trace.len() > options.verify_limit {
        "not_checked"
    } else if targets
        .iter()
        .zip(&frames)
        .all(|(&k, frame)| *frame == render(&Catalog, problem, trace.prefix(k)))
    {
        "passed"
    } else {
        "failed"
    };

    eprintln!("steps={}, gen={gen_s:.4}s, seek={seek_s:.4}s, {status}", trace.len());
    Measurement {
        scenario,
        size_desc,
        steps: trace.len(),
        gen_s,
        seek_s,
        rss_delta_kib: after.saturating_sub(before),
        status,
    }
}

fn write_csv(measurements: &[Measurement]) {
    println!("scenario,size_desc,steps,gen_s,seek_s,rss_delta_kib,status");
    for m in measurements {
        println!(
            "{},{},{},{:.4},{:.4},{},{}",
            m.scenario, m.size_desc, m.steps, m.gen_s, m.seek_s, m.rss_delta_kib, m.status
        );
    }
}

fn write_table(measurements: &[Measurement]) {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .fold("scenario".len(), usize::max);
    let col2 = measurements
        .iter()
        .map(|m| m.size_desc.len())
        .fold("size".len(), usize::max);

    println!(
        "{:<col1$}  {:<col2$}  {:>10}  {:>10}  {:>10}  {:>14}  {}",
        "scenario", "size", "steps", "gen_s", "seek_s", "rss_delta_kib", "status"
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<10}  {:-<10}  {:-<10}  {:-<14}  {:-<11}",
        "", "", "", "", "", "", ""
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>10}  {:>10.4}  {:>10.4}  {:>14}  {}",
            m.scenario, m.size_desc, m.steps, m.gen_s, m.seek_s, m.rss_delta_kib, m.status
        );
    }
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(p) => p.memory() / 1024,
        None => 0,
    }
}

fn deterministic_dna(len: usize, offset: usize) -> String {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|i| ALPHABET[(i * (offset + 1) + offset) % ALPHABET.len()] as char)
        .collect()
}
