//! Demo CLI for the LTL model checker.
//!
//! Takes a path to a tiny textual Kripke-structure file and an infix LTL
//! formula string, checks the formula against the model, and prints the
//! verdict (plus, depending on `--print`, the counterexample lasso if the
//! formula fails).

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::builder::PossibleValuesParser;
use clap::Parser;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use ltl_buchi_checker::kripke::ExplicitKripke;
use ltl_buchi_checker::{check, lint, syntax, CheckResult};

/// Structure to collect CLI arguments.
#[derive(Parser)]
#[clap(author, version, about = "Automata-theoretic LTL model checker for explicit Kripke structures.")]
struct Arguments {
    /// Path to a file with a model in the textual Kripke-structure format.
    model_path: String,

    /// The LTL formula to check, in infix syntax (e.g. "G (p -> F q)").
    formula: String,

    /// Choice of the amount of output regarding the verdict.
    #[clap(short, long, default_value = "summary", value_parser = PossibleValuesParser::new(["none", "summary", "full"]))]
    print: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Arguments::parse();

    if !Path::new(&args.model_path).is_file() {
        eprintln!("{} is not a valid file", args.model_path);
        return ExitCode::FAILURE;
    }

    let model = match load_model(&args.model_path) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("failed to load model: {err}");
            return ExitCode::FAILURE;
        }
    };

    let phi = match syntax::parse(&args.formula) {
        Ok(phi) => phi,
        Err(err) => {
            eprintln!("failed to parse formula: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.print != "none" {
        for warning in lint::lint(&phi) {
            eprintln!("warning: {warning}");
        }
    }

    match check(phi, &model) {
        Ok(result) => {
            print_result(&result, args.print.as_str());
            if result.holds() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Print the verdict, honoring `--print none|summary|full`.
fn print_result(result: &CheckResult<String>, print_option: &str) {
    if print_option == "none" {
        return;
    }

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    if result.holds() {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
        println!("HOLDS");
    } else {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        println!("FAILS");
    }
    let _ = stdout.reset();

    if print_option == "full" {
        if let Some(lasso) = result.counterexample() {
            println!("counterexample: {}", lasso.describe());
        }
    }
}

/// Load and parse the demo's textual Kripke-structure format from `path`.
fn load_model(path: &str) -> Result<ExplicitKripke, String> {
    let text = fs::read_to_string(path).map_err(|err| err.to_string())?;
    parse_model(&text)
}

/// Parse the demo's textual Kripke-structure format: one line per state,
/// `name: label1,label2 -> succ1,succ2`, with a leading `*` marking an
/// initial state. Blank lines and lines starting with `#` are skipped.
fn parse_model(text: &str) -> Result<ExplicitKripke, String> {
    let mut builder = ExplicitKripke::builder();
    let mut transitions = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (initial, line) = match line.strip_prefix('*') {
            Some(rest) => (true, rest.trim()),
            None => (false, line),
        };

        let (head, tail) = line
            .split_once("->")
            .ok_or_else(|| format!("line {}: missing '->'", line_no + 1))?;
        let (name, labels) = head
            .split_once(':')
            .ok_or_else(|| format!("line {}: missing ':'", line_no + 1))?;
        let name = name.trim().to_string();
        let labels = labels
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        builder = builder.state(name.clone(), labels);
        if initial {
            builder = builder.initial(name.clone());
        }
        for succ in tail.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            transitions.push((name.clone(), succ.to_string()));
        }
    }

    for (from, to) in transitions {
        builder = builder.transition(from, to);
    }

    builder.build().map_err(|err| err.to_string())
}
