use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the GoRide dispatch workspace",
    long_about = "A unified CLI for running the demo dispatcher, benchmarks,\n\
                  and CI checks in the GoRide dispatch workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch a demo ride in the seeded city
    Demo {
        /// Pickup node (1-8)
        #[arg(long, default_value_t = 1)]
        pickup: u32,
        /// Drop-off node (1-8)
        #[arg(long, default_value_t = 6)]
        drop: u32,
        /// Requested vehicle type
        #[arg(long, default_value = "Bike")]
        vehicle: String,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks (fmt, clippy, tests, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run benchmarks
    Bench,
    /// Run check + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn ci_check() {
    step("Formatting");
    run_cargo(&["fmt", "--all", "--check"]);
    step("Clippy");
    run_cargo(&[
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ]);
    step("Tests");
    run_cargo(&["test", "--workspace"]);
}

fn ci_bench() {
    step("Benchmarks");
    run_cargo(&["bench", "-p", "dispatch_core"]);
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Demo {
            pickup,
            drop,
            vehicle,
        } => {
            run_cargo(&[
                "run",
                "-p",
                "goride_cli",
                "--",
                "ride",
                &pickup.to_string(),
                &drop.to_string(),
                "--vehicle",
                &vehicle,
                "--skip-rating",
            ]);
        }
        Commands::Bench => ci_bench(),
        Commands::Ci { job } => match job {
            CiJob::Check => ci_check(),
            CiJob::Bench => ci_bench(),
            CiJob::All => {
                ci_check();
                ci_bench();
            }
        },
    }
}
