//! gradecast CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gradecast",
    version,
    about = "Weighted grade standing and target planner"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current standing from graded work
    Standing {
        /// Path to a .toml or .json course file
        #[arg(long)]
        course: PathBuf,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a target grade is still reachable
    Target {
        /// Path to a .toml or .json course file
        #[arg(long)]
        course: PathBuf,

        /// Target grade (defaults to the course file's target_grade)
        #[arg(long)]
        target: Option<f64>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Minimum score needed on one remaining assessment
    Minimum {
        /// Path to a .toml or .json course file
        #[arg(long)]
        course: PathBuf,

        /// Name of an ungraded assessment
        #[arg(long)]
        assessment: String,

        /// Target grade (defaults to the course file's target_grade)
        #[arg(long)]
        target: Option<f64>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project the final grade under hypothetical scores
    WhatIf {
        /// Path to a .toml or .json course file
        #[arg(long)]
        course: PathBuf,

        /// Hypothetical score, e.g. --set Final=85 (repeatable)
        #[arg(long = "set", value_parser = commands::what_if::parse_override)]
        overrides: Vec<(String, f64)>,

        /// Score assumed for ungraded assessments without an override
        #[arg(long = "default")]
        ungraded_default: Option<f64>,

        /// Allow overrides to replace recorded scores
        #[arg(long)]
        allow_graded: bool,

        /// Target grade (defaults to the course file's target_grade)
        #[arg(long)]
        target: Option<f64>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a full course report to disk
    Report {
        /// Path to a .toml or .json course file
        #[arg(long)]
        course: PathBuf,

        /// Output format: json, html, markdown, all (comma-separated)
        #[arg(long, default_value = "json")]
        format: String,

        /// Output directory (defaults to output_dir from config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare two JSON course reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Ignore score changes smaller than this many points
        #[arg(long, default_value = "0.5")]
        threshold: f64,

        /// Exit code 1 if the needed average went up
        #[arg(long)]
        fail_on_decline: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate course files
    Validate {
        /// Path to a course file or directory
        #[arg(long)]
        course: PathBuf,
    },

    /// Convert a grade between scales
    Convert {
        /// Grade value, e.g. 85, 3.7, B+
        #[arg(long)]
        value: String,

        /// Scale of the value: percentage, four, nine, ten, letter
        #[arg(long, default_value = "percentage")]
        from: String,

        /// Print the conversion as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create starter config and example course
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradecast=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Standing { course, json } => commands::standing::execute(course, json, config),
        Commands::Target {
            course,
            target,
            json,
        } => commands::target::execute(course, target, json, config),
        Commands::Minimum {
            course,
            assessment,
            target,
            json,
        } => commands::minimum::execute(course, assessment, target, json, config),
        Commands::WhatIf {
            course,
            overrides,
            ungraded_default,
            allow_graded,
            target,
            json,
        } => commands::what_if::execute(
            course,
            overrides,
            ungraded_default,
            allow_graded,
            target,
            json,
            config,
        ),
        Commands::Report {
            course,
            format,
            output,
        } => commands::report::execute(course, format, output, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_decline,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_decline, format),
        Commands::Validate { course } => commands::validate::execute(course),
        Commands::Convert { value, from, json } => commands::convert::execute(value, from, json),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
