use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use automata_compiler::batch::{parse_batch, BatchLine};
use automata_compiler::Automata;
use automata_runtime::dot::{dfa_to_dot, nfa_to_dot};
use clap::Parser;

/// Builds automata for every pattern of a batch file and tests its inputs
/// against each of them.
#[derive(Parser, Debug)]
#[command(name = "automata")]
#[command(about = "Regular expression to NFA, DFA and minimal DFA batch runner", long_about = None)]
struct Args {
    /// Batch file of `pattern;input,input,...` lines
    #[arg(value_name = "FILE", default_value = "input.txt")]
    input: PathBuf,

    /// Directory to write Graphviz DOT files of every automaton into
    #[arg(long, value_name = "DIR")]
    dot: Option<PathBuf>,

    /// Print automaton listings and enable trace logging
    #[arg(short, long)]
    debug: bool,
}

fn write_dot_files(dir: &Path, line_no: usize, automata: &Automata) -> Result<()> {
    let create = |prefix: &str| -> Result<BufWriter<File>> {
        let path = dir.join(format!("{}_{:03}.dot", prefix, line_no));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        println!("  dot written: {}", path.display());
        Ok(BufWriter::new(file))
    };

    nfa_to_dot(&automata.nfa, create("nfa")?)?;
    dfa_to_dot(&automata.dfa, create("dfa")?)?;
    dfa_to_dot(&automata.minimized, create("min_dfa")?)?;

    Ok(())
}

fn run_line(args: &Args, line_no: usize, line: &BatchLine) -> Result<()> {
    let automata = Automata::build(&line.pattern)?;
    let normalized = &automata.normalized;

    println!("  expanded: {}", normalized.expanded);
    println!("  formatted: {}", normalized.formatted);
    println!("  postfix: {}", normalized.postfix);
    println!(
        "  states: nfa {}, dfa {}, minimized {}",
        automata.nfa.states().len(),
        automata.dfa.state_count(),
        automata.minimized.state_count()
    );

    if args.debug {
        println!(
            "DEBUG
--------
tree: {}
nfa:
{}dfa:
{}minimized:
{}--------",
            automata.expression, automata.nfa, automata.dfa, automata.minimized
        );
    }

    if let Some(dir) = &args.dot {
        write_dot_files(dir, line_no, &automata)?;
    }

    let answer = |accepted: bool| if accepted { "yes" } else { "no" };
    for input in &line.inputs {
        let verdict = automata.accepts(input);
        println!(
            "  {:?}: nfa {}, dfa {}, minimized {}",
            input,
            answer(verdict.nfa),
            answer(verdict.dfa),
            answer(verdict.minimized)
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder().filter_level(level).init();

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("reading batch file {}", args.input.display()))?;

    if let Some(dir) = &args.dot {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    for (line_no, parsed) in parse_batch(&source) {
        let line = match parsed {
            Ok(line) => line,
            Err(e) => {
                eprintln!("line {}: {}", line_no, e);
                continue;
            }
        };

        println!("line {}", line_no);
        println!("  pattern: {}", line.pattern);
        if let Err(e) = run_line(&args, line_no, &line) {
            eprintln!("line {}: {:#}", line_no, e);
        }
        println!();
    }

    Ok(())
}
