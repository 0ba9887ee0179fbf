use std::io;

use clap::Parser;
use decimal_calc::domain::{EvaluatorConfig, DEFAULT_EXIT_KEYWORD};
use decimal_calc::numeric::{RoundingMode, MAX_PRECISION};
use decimal_calc::repl::Repl;

#[derive(Debug, Parser)]
#[command(
    name = "decimal-calc",
    version,
    about = "Interactive infix calculator with fixed-precision decimal arithmetic",
    long_about = "decimal-calc reads one expression per line and prints its value.\n\n\
        Expressions may use + - * /, unary signs, parentheses and decimal literals.\n\
        Every literal and intermediate result is rounded to the working precision.\n\n\
        EXAMPLES:\n\
        \n  decimal-calc                        Start with 16 digits, half-even\n\
        \n  decimal-calc --precision 7          Work with 7 significant digits\n\
        \n  decimal-calc --trace                Print each evaluation step\n\
        \n  echo '(1+2)*3' | decimal-calc       Evaluate from stdin"
)]
struct Cli {
    /// Significant digits kept after every operation
    #[arg(short, long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..=MAX_PRECISION as i64))]
    precision: u32,

    /// Rounding mode: half-even, half-up, half-down, down, up, floor, ceiling
    #[arg(short, long, default_value = "half-even")]
    rounding: RoundingMode,

    /// Keyword that ends the session (case-insensitive)
    #[arg(long, default_value = DEFAULT_EXIT_KEYWORD)]
    exit_keyword: String,

    /// Print the evaluation steps before each result
    #[arg(short, long)]
    trace: bool,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[cfg(feature = "logging")]
fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "logging"))]
fn init_logging(_verbose: u8) {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EvaluatorConfig::new(cli.precision, cli.rounding)
        .with_exit_keyword(cli.exit_keyword)
        .with_trace(cli.trace);
    let repl = Repl::new(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl.run(stdin.lock(), &mut stdout)?;

    Ok(())
}
