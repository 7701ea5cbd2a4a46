//! Command-line entry point for the reconciliation engine.
//!
//! One positional argument (the payroll workbook) plus an optional
//! override-table path and a JSON output switch. The binary loads, runs
//! [`reconcile`](payroll_recon::allocation::reconcile), and renders the
//! report; all the interesting logic lives in the library.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use payroll_recon::allocation::reconcile;
use payroll_recon::config::{OverrideConfig, load_overrides};
use payroll_recon::error::EngineResult;
use payroll_recon::models::ReconciliationReport;
use payroll_recon::reader::load_workbook;

/// Default location of the employee override table.
const DEFAULT_OVERRIDES_PATH: &str = "config/overrides.yaml";

/// Reconcile a payroll workbook across programs.
#[derive(Debug, Parser)]
#[command(name = "payroll-recon", version, about)]
struct Cli {
    /// Path to the payroll workbook (.xlsx).
    input: PathBuf,

    /// Path to the employee override table (YAML).
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Emit the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> EngineResult<()> {
    let overrides = match &cli.overrides {
        // An explicitly requested table must exist.
        Some(path) => load_overrides(path)?,
        None if Path::new(DEFAULT_OVERRIDES_PATH).exists() => {
            load_overrides(DEFAULT_OVERRIDES_PATH)?
        }
        None => {
            tracing::warn!(
                path = DEFAULT_OVERRIDES_PATH,
                "no override table found, running without special cases"
            );
            OverrideConfig::default()
        }
    };

    let grid = load_workbook(&cli.input)?;
    let report = reconcile(&grid, &overrides)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
    } else {
        print!("{}", render(&report));
    }

    Ok(())
}

/// Renders the report in the operator-facing text layout.
fn render(report: &ReconciliationReport) -> String {
    use std::fmt::Write;

    let r2 = |d: Decimal| d.round_dp(2);
    let mut out = String::new();

    let _ = writeln!(out, "Run {} at {}", report.run_id, report.generated_at);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Note: there are 2 withdrawals for taxes, a large one and a small one."
    );
    let _ = writeln!(
        out,
        "The small one is the total FUTA ({}) billed per employee.",
        r2(report.futa.calculated)
    );
    let _ = writeln!(
        out,
        "The larger one is employee taxes + employer taxes (less FUTA) + CA ETT."
    );

    let _ = writeln!(out, "\nTAX: every program with non-zero tax:\n");
    let _ = writeln!(out, "\t{:<12} {:>10} (CA ETT)", "Admin:", r2(report.stated_ca_ett));
    for line in &report.program_taxes {
        let _ = writeln!(
            out,
            "\t{:<12} {:>10} + {:>9} = {:>10}",
            format!("{}:", line.program),
            r2(line.employee_tax),
            r2(line.employer_tax),
            r2(line.combined),
        );
    }

    let comparison = |out: &mut String, label: &str, line: &payroll_recon::models::ComparisonLine| {
        let _ = writeln!(
            out,
            "\t{:<36} {:>12}  (stated {:>12}, diff {})",
            label,
            r2(line.calculated),
            r2(line.stated),
            r2(line.difference()),
        );
    };

    let _ = writeln!(out);
    comparison(&mut out, "Calculated Employee Taxes:", &report.employee_taxes);
    comparison(
        &mut out,
        "Calculated Employer Taxes (no FUTA):",
        &report.employer_taxes_excl_futa,
    );
    comparison(&mut out, "Calculated Employer FUTA:", &report.futa);

    let _ = writeln!(
        out,
        "\n\temployee taxes + employer taxes + CA ETT = amount taken from bank account"
    );
    let _ = writeln!(
        out,
        "\t{} + {} + {} = {}",
        r2(report.employee_taxes.calculated),
        r2(report.employer_taxes_excl_futa.calculated),
        r2(report.stated_ca_ett),
        r2(report.bank_debit_total),
    );

    let _ = writeln!(out, "\nNET: every program with positive net:\n");
    for line in &report.program_net {
        let _ = writeln!(out, "\t{:<12} {:>10}", format!("{}:", line.program), r2(line.net));
    }

    let _ = writeln!(out);
    comparison(&mut out, "CALCULATED NET:", &report.net);
    comparison(&mut out, "CALCULATED DEDUCTIONS:", &report.deductions);
    comparison(&mut out, "CALCULATED GROSS:", &report.gross);

    if report.diagnostics.is_empty() {
        let _ = writeln!(out, "\nNo warnings.");
    } else {
        let _ = writeln!(out, "\nWarnings ({}):", report.diagnostics.len());
        for diagnostic in &report.diagnostics {
            let _ = writeln!(out, "\t- {diagnostic}");
        }
    }

    out
}
