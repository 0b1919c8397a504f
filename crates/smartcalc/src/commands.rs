//! Subcommands and their text/JSON renderings

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Subcommand;
use color_eyre::eyre::{Result, eyre};
use serde::Serialize;
use smartcalc_core::{
    CreditSchedule, DepositResult, ErrorCode, ExprError, IntCode, calculate_credit,
    calculate_deposit, evaluate_equation, evaluate_expression, tabulate,
};

use crate::format::{format_amount, format_number, format_rate};
use crate::input::{load_credit, load_deposit};

/// Largest `--steps` accepted by `plot`
pub const MAX_PLOT_STEPS: u32 = 100_000;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Evaluate an arithmetic expression
    Expr {
        expression: String,
    },
    /// Evaluate an expression in `x` at one point
    Equation {
        expression: String,
        /// Value bound to `x`
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
    },
    /// Tabulate an expression in `x` over a closed range
    Plot {
        expression: String,
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
        /// Number of intervals, 1 to 100000
        #[arg(
            long,
            default_value_t = 20,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PLOT_STEPS))
        )]
        steps: u32,
    },
    /// Build a loan repayment schedule from a YAML conditions file
    Credit {
        file: PathBuf,
    },
    /// Simulate a deposit from a YAML conditions file
    Deposit {
        file: PathBuf,
    },
}

/// One tabulated point; `y` is absent where evaluation failed
#[derive(Debug, Serialize)]
struct PlotPoint {
    x: f64,
    y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

fn expr_failure(err: ExprError) -> color_eyre::Report {
    let code = ErrorCode::from(err);
    eyre!("error {}: {}", code.code(), code)
}

/// Run a subcommand and return what should be printed
pub fn run(command: &Command, json: bool) -> Result<String> {
    tracing::debug!(?command, json, "Running command");
    match command {
        Command::Expr { expression } => {
            let value = evaluate_expression(expression).map_err(expr_failure)?;
            render_value(value, json)
        }
        Command::Equation { expression, x } => {
            let value = evaluate_equation(expression, *x).map_err(expr_failure)?;
            render_value(value, json)
        }
        Command::Plot {
            expression,
            from,
            to,
            steps,
        } => {
            let points = tabulate(expression, *from, *to, *steps as usize).map_err(expr_failure)?;
            let points: Vec<PlotPoint> = points
                .into_iter()
                .map(|(x, y)| PlotPoint {
                    x,
                    y: y.ok(),
                    error: y.err().map(|e| e.code().description()),
                })
                .collect();
            if json {
                Ok(serde_json::to_string_pretty(&points)?)
            } else {
                Ok(render_plot(&points))
            }
        }
        Command::Credit { file } => {
            let conditions = load_credit(file)?;
            let schedule = calculate_credit(&conditions)?;
            tracing::info!(periods = schedule.payments.len(), "Credit schedule calculated");
            if json {
                Ok(serde_json::to_string_pretty(&schedule)?)
            } else {
                Ok(render_credit(&schedule))
            }
        }
        Command::Deposit { file } => {
            let conditions = load_deposit(file)?;
            let result = calculate_deposit(&conditions)?;
            tracing::info!(payouts = result.payouts.len(), "Deposit simulated");
            if json {
                Ok(serde_json::to_string_pretty(&result)?)
            } else {
                Ok(render_deposit(&result))
            }
        }
    }
}

fn render_value(value: f64, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::json!({ "result": value }).to_string())
    } else {
        Ok(format_number(value))
    }
}

fn render_plot(points: &[PlotPoint]) -> String {
    let mut out = String::new();
    for point in points {
        let y = match (point.y, point.error) {
            (Some(y), _) => format_number(y),
            (None, Some(error)) => format!("- ({error})"),
            (None, None) => "-".to_string(),
        };
        let _ = writeln!(out, "{:>14}  {y}", format_number(point.x));
    }
    out
}

pub fn render_credit(schedule: &CreditSchedule) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:>14}  {:>14}  {:>14}  {:>16}",
        "#", "payment", "principal", "interest", "remaining"
    );
    for period in &schedule.periods {
        let _ = writeln!(
            out,
            "{:>5}  {:>14}  {:>14}  {:>14}  {:>16}",
            period.number,
            format_amount(period.payment),
            format_amount(period.principal),
            format_amount(period.interest),
            format_amount(period.remaining),
        );
    }
    let _ = writeln!(out, "total:   {}", format_amount(schedule.total));
    let _ = writeln!(out, "overpay: {}", format_amount(schedule.overpay));
    out
}

pub fn render_deposit(result: &DepositResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} .. {}", result.start_date, result.finish_date);
    for payout in &result.payouts {
        let _ = writeln!(out, "{}  {:>14}", payout.date, format_amount(payout.amount));
    }
    if !result.transactions.is_empty() {
        let _ = writeln!(out, "transactions:");
        for tx in &result.transactions {
            let _ = writeln!(out, "{}  {:>14}", tx.date, format_amount(tx.amount));
        }
    }
    let _ = writeln!(out, "interest:       {}", format_amount(result.interest_total));
    let _ = writeln!(out, "tax:            {}", format_amount(result.tax_total));
    let _ = writeln!(out, "effective rate: {}", format_rate(result.effective_rate));
    let _ = writeln!(out, "total:          {}", format_amount(result.total));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[derive(clap::Parser)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        use clap::Parser;
        Cli::try_parse_from(std::iter::once("smartcalc").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    fn expr(expression: &str) -> Command {
        Command::Expr {
            expression: expression.to_string(),
        }
    }

    #[test]
    fn test_expr_text_and_json() {
        assert_eq!(run(&expr("2 + 2 * 2"), false).unwrap(), "6");
        let json: serde_json::Value =
            serde_json::from_str(&run(&expr("1 / 4"), true).unwrap()).unwrap();
        assert_eq!(json["result"], 0.25);
    }

    #[test]
    fn test_expr_error_reports_code() {
        let err = run(&expr("(1+2"), false).unwrap_err();
        assert_eq!(err.to_string(), "error 3: braces not matching");
    }

    #[test]
    fn test_equation_command() {
        let command = Command::Equation {
            expression: "x ^ 2".to_string(),
            x: -3.0,
        };
        assert_eq!(run(&command, false).unwrap(), "9");

        let command = Command::Equation {
            expression: "5 + 3".to_string(),
            x: 1.0,
        };
        assert_eq!(
            run(&command, false).unwrap_err().to_string(),
            "error 7: invalid equation"
        );
    }

    #[test]
    fn test_plot_marks_gaps() {
        let command = Command::Plot {
            expression: "1 / x".to_string(),
            from: -1.0,
            to: 1.0,
            steps: 2,
        };
        let text = run(&command, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("- (invalid expression)"), "{}", lines[1]);

        let json: serde_json::Value =
            serde_json::from_str(&run(&command, true).unwrap()).unwrap();
        assert!(json[1]["y"].is_null());
        assert_eq!(json[2]["y"], 1.0);
    }

    #[test]
    fn test_plot_steps_are_bounded() {
        let command = parse(&["plot", "x", "--from", "-1", "--to", "1"]).unwrap();
        assert!(matches!(command, Command::Plot { steps: 20, .. }));

        let max = MAX_PLOT_STEPS.to_string();
        let command =
            parse(&["plot", "x", "--from", "0", "--to", "1", "--steps", max.as_str()]).unwrap();
        assert!(matches!(command, Command::Plot { steps: MAX_PLOT_STEPS, .. }));

        for steps in ["0", "100001", "18446744073709551615"] {
            let result = parse(&["plot", "x", "--from", "0", "--to", "1", "--steps", steps]);
            assert!(result.is_err(), "--steps {steps} accepted");
        }
    }

    #[test]
    fn test_credit_command_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credit.yaml");
        fs::write(&path, "sum: 12000\nrate: 0\nterm: 12\nkind: Differentiated\n").unwrap();

        let text = run(&Command::Credit { file: path.clone() }, false).unwrap();
        assert!(text.contains("total:   12,000.00"), "{text}");
        assert!(text.contains("overpay: 0.00"), "{text}");

        let json: serde_json::Value =
            serde_json::from_str(&run(&Command::Credit { file: path }, true).unwrap()).unwrap();
        assert_eq!(json["payments"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_deposit_command_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deposit.yaml");
        fs::write(
            &path,
            "sum: 100000\nrate: 10\nterm: 12\nstart_date: \"2024-01-01\"\n",
        )
        .unwrap();

        let text = run(&Command::Deposit { file: path }, false).unwrap();
        assert!(text.starts_with("2024-01-01 .. 2025-01-01"), "{text}");
        assert!(text.contains("2024-02-01          849.32"), "{text}");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deposit.yaml");
        fs::write(&path, "sum: 0\nrate: 10\nterm: 12\nstart_date: \"2024-01-01\"\n").unwrap();
        let err = run(&Command::Deposit { file: path }, false).unwrap_err();
        assert!(err.to_string().contains("sum must be positive"), "{err}");
    }
}
