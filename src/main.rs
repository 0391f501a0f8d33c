use clap::Parser;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use readnum::{FormatOptions, NumberFormatter, Numeric};

#[derive(Parser)]
#[command(name = "readnum", version, about = "Format numbers for human eyes")]
struct Cli {
    /// Numbers to format; reads lines from stdin when empty
    #[arg(allow_negative_numbers = true)]
    values: Vec<String>,

    /// Digits per group in the integer part (0 disables grouping)
    #[arg(long, default_value_t = 3)]
    group_size: usize,

    /// Delimiter between digit groups
    #[arg(long, default_value = ",")]
    group_delimiter: String,

    /// Decimal point symbol
    #[arg(long, default_value = ".")]
    decimal_symbol: String,

    /// Fixed number of digits after the decimal point
    #[arg(long, conflicts_with = "significant_figures")]
    precision: Option<usize>,

    /// Significant figures after the decimal point
    #[arg(long)]
    significant_figures: Option<usize>,

    /// Apply significant figures to values at or above 1 as well
    #[arg(long, requires = "significant_figures")]
    sig_figs_everywhere: bool,

    /// Show a decimal part even for integral values
    #[arg(long)]
    show_decimal: bool,

    /// Abbreviate large values with k/M/B/T suffixes
    #[arg(long)]
    shortform: bool,

    /// Switch to scientific notation at or above this magnitude
    #[arg(long)]
    exponent_above: Option<f64>,

    /// Switch to scientific notation at or below this magnitude
    #[arg(long)]
    exponent_below: Option<f64>,
}

impl Cli {
    fn options(&self) -> FormatOptions {
        FormatOptions {
            group_size: self.group_size,
            group_delimiter: self.group_delimiter.clone(),
            decimal_symbol: self.decimal_symbol.clone(),
            precision: self.precision,
            significant_figures: self.significant_figures,
            sig_figs_only_below_one: !self.sig_figs_everywhere,
            show_decimal_if_integer: self.show_decimal,
            use_shortform: self.shortform,
            use_exponent_for_large: self.exponent_above.is_some(),
            large_threshold: self.exponent_above.unwrap_or(1e6),
            use_exponent_for_small: self.exponent_below.is_some(),
            small_threshold: self.exponent_below.unwrap_or(1e-6),
        }
    }
}

fn run_args(formatter: &NumberFormatter, values: &[String]) -> ExitCode {
    let mut status = ExitCode::SUCCESS;
    for raw in values {
        match raw.parse::<Numeric>() {
            Ok(value) => println!("{}", formatter.format(value)),
            Err(e) => {
                eprintln!("Error: {e}");
                status = ExitCode::from(1);
            }
        }
    }
    status
}

fn run_stdin(formatter: &NumberFormatter) -> ExitCode {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match trimmed.parse::<Numeric>() {
                    Ok(value) => println!("{}", formatter.format(value)),
                    Err(e) => eprintln!("Error: {e}"),
                }
                if stdout.flush().is_err() {
                    break;
                }
            }
            Err(e) => {
                eprintln!("Read error: {e}");
                return ExitCode::from(1);
            }
        }
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let formatter = match NumberFormatter::new(cli.options()) {
        Ok(formatter) => formatter,
        Err(e) => {
            eprintln!("Invalid options: {e}");
            return ExitCode::from(2);
        }
    };
    if cli.values.is_empty() {
        run_stdin(&formatter)
    } else {
        run_args(&formatter, &cli.values)
    }
}
