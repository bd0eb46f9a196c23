use std::io::{self, BufRead};

use clap::Parser;
use itertools::Itertools;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use yard::{calculate, calculate_all, scan, to_postfix, Error};

#[derive(Parser, Debug)]
#[clap(name = "yard")]
#[clap(about = "Evaluates arithmetic expressions", version)]
struct Cli {
    /// Expressions to evaluate. Lines are read from stdin when none are given.
    expressions: Vec<String>,
    /// Print the scanned tokens.
    #[clap(short, long)]
    tokens: bool,
    /// Print the postfix form.
    #[clap(short, long)]
    postfix: bool,
    /// Log every stage at debug level.
    #[clap(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// Whitespace other than line breaks is kept so the caret lines up with the echoed input.
fn caret_line(input: &str, pos: usize) -> String {
    let mut line: String = input
        .chars()
        .take(pos)
        .map(|c| match c {
            '\n' | '\r' => ' ',
            c if c.is_whitespace() => c,
            _ => ' ',
        })
        .collect();
    line.push('^');
    line
}

fn report_error(input: &str, err: &Error) {
    if let Some(pos) = err.position() {
        eprintln!("{input}\n{}", caret_line(input, pos));
    }
    eprintln!("error: {err}");
}

fn show_stages(input: &str, cli: &Cli) {
    if cli.tokens {
        if let Ok(tokens) = scan(input) {
            println!("tokens: {}", tokens.iter().join(" "));
        }
    }
    if cli.postfix {
        if let Ok(postfix) = to_postfix(input) {
            println!("postfix: {}", postfix.iter().join(" "));
        }
    }
}

/// Returns whether the expression evaluated.
fn print_result(input: &str, result: &Result<f64, Error>, cli: &Cli) -> bool {
    show_stages(input, cli);
    match result {
        Ok(v) => {
            println!("= {v}");
            true
        }
        Err(err) => {
            report_error(input, err);
            false
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.expressions.is_empty() {
        let results = calculate_all(&cli.expressions);
        let mut failed = 0;
        for (expr, result) in cli.expressions.iter().zip(&results) {
            println!("{expr}");
            if !print_result(expr, result, &cli) {
                failed += 1;
            }
        }
        if failed > 0 {
            anyhow::bail!("{failed} of {} expressions failed", results.len());
        }
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "exit" => break,
            _ => {
                debug!(input, "read line");
                print_result(input, &calculate(input), &cli);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_under_rejected_char() {
        assert_eq!(caret_line("2 + 3a", 5), "     ^");
        assert_eq!(caret_line("\t1 x", 3), "\t  ^");
        assert_eq!(caret_line("1\u{3000}+ x", 4), " \u{3000}  ^");
        assert_eq!(caret_line("1\n+ x", 4), "    ^");
    }
}
