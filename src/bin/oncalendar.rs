use clap::Parser;
use oncalendar::{CalendarError, CalendarExpression, CalendarValidator, TimezoneResolver};
use std::io::{self, BufRead};
use std::process;

#[derive(Parser)]
#[command(
    name = "oncalendar",
    about = "Validate systemd OnCalendar= calendar expressions",
    version
)]
struct Cli {
    /// Calendar expressions (e.g., "Mon..Fri *-*-* 09:00")
    expressions: Vec<String>,

    /// Read expressions from stdin, one per line ('#' starts a comment line)
    #[arg(long)]
    stdin: bool,

    /// Output results as a JSON array
    #[arg(long)]
    json: bool,

    /// Show the parsed expression as JSON
    #[arg(long)]
    parse: bool,

    /// Print the canonical form of the expression
    #[arg(long)]
    normalize: bool,

    /// Accept any timezone name without consulting the timezone database
    #[arg(long)]
    no_timezone_check: bool,

    /// Underline the offending part of invalid expressions
    #[arg(long)]
    rich: bool,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));
    let cli = Cli::parse();

    let mut expressions = cli.expressions.clone();
    if cli.stdin {
        match read_stdin() {
            Ok(lines) => expressions.extend(lines),
            Err(e) => {
                eprintln!("error: failed to read stdin: {e}");
                process::exit(2);
            }
        }
    }

    if expressions.is_empty() {
        eprintln!("error: no expression provided");
        process::exit(2);
    }

    let code = if cli.no_timezone_check {
        run(&cli, &expressions, CalendarValidator::with_resolver(|_: &str| true))
    } else {
        run(&cli, &expressions, CalendarValidator::new())
    };
    process::exit(code);
}

fn read_stdin() -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines)
}

fn run<R: TimezoneResolver>(cli: &Cli, expressions: &[String], validator: CalendarValidator<R>) -> i32 {
    if cli.parse || cli.normalize {
        if expressions.len() != 1 {
            eprintln!("error: --parse and --normalize take exactly one expression");
            return 2;
        }
        return match validator.validate(&expressions[0]) {
            Ok(expr) => show_single(cli, &expr),
            Err(e) => {
                report_error(cli, &e);
                1
            }
        };
    }

    let results = validator.validate_all(expressions.iter().map(String::as_str));
    let all_valid = results.iter().all(|(_, result)| result.is_ok());

    if cli.json {
        let entries: Vec<serde_json::Value> = results
            .iter()
            .map(|(expression, result)| match result {
                Ok(expr) => serde_json::json!({
                    "expression": expression,
                    "valid": true,
                    "error": null,
                    "normalized": expr.to_string(),
                }),
                Err(e) => serde_json::json!({
                    "expression": expression,
                    "valid": false,
                    "error": e.to_string(),
                    "normalized": null,
                }),
            })
            .collect();
        match serde_json::to_string_pretty(&entries) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                return 1;
            }
        }
    } else {
        let prefixed = results.len() > 1;
        for (expression, result) in &results {
            let prefix = if prefixed {
                format!("{expression}: ")
            } else {
                String::new()
            };
            match result {
                Ok(_) => println!("{prefix}\u{2713} valid"),
                Err(e) => {
                    println!("{prefix}\u{2717} invalid: {e}");
                    if cli.rich {
                        eprintln!("{}", e.display_rich());
                    }
                }
            }
        }
    }

    if all_valid {
        0
    } else {
        1
    }
}

fn show_single(cli: &Cli, expr: &CalendarExpression) -> i32 {
    if cli.normalize {
        println!("{expr}");
        return 0;
    }
    match serde_json::to_string_pretty(expr) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("error: failed to serialize: {e}");
            1
        }
    }
}

fn report_error(cli: &Cli, e: &CalendarError) {
    if cli.rich {
        eprintln!("{}", e.display_rich());
    } else {
        eprintln!("error: {e}");
    }
}
