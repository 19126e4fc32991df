mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "soilsense",
    version,
    about = "Crop recommendations and fertilizer advice from soil test values"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one soil sample
    Analyze {
        /// Soil pH (0-14)
        #[arg(long)]
        ph: Option<String>,

        /// Nitrogen in mg/kg
        #[arg(short = 'n', long)]
        nitrogen: Option<String>,

        /// Phosphorus in mg/kg
        #[arg(short = 'p', long)]
        phosphorus: Option<String>,

        /// Potassium in mg/kg
        #[arg(short = 'k', long)]
        potassium: Option<String>,

        /// Where the sample was taken (e.g., "Bangalore, Karnataka")
        #[arg(short, long)]
        location: Option<String>,

        /// Custom JSON policy file (default: builtin policy)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show each parameter against its optimal range
        #[arg(long)]
        show_parameters: bool,

        /// Show how the recommendation was reached
        #[arg(long)]
        trace: bool,
    },
    /// Analyze a JSON array of soil samples
    Batch {
        /// Path to JSON file with sample objects
        input_file: PathBuf,

        /// Custom JSON policy file (default: builtin policy)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show how each recommendation was reached
        #[arg(long)]
        trace: bool,
    },
    /// Inspect and validate recommendation policies
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

#[derive(Subcommand)]
enum PolicyAction {
    /// Explain a policy in plain language
    Explain {
        /// Custom JSON policy file (default: builtin policy)
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Option<PathBuf>,
    },
    /// Print the builtin policy as JSON, as a starting point for custom files
    Show,
    /// Validate a custom policy file
    Validate {
        /// Path to JSON policy file
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            ph,
            nitrogen,
            phosphorus,
            potassium,
            location,
            rules,
            output,
            show_parameters,
            trace,
        } => commands::analyze::run(
            commands::analyze::SampleArgs {
                ph,
                nitrogen,
                phosphorus,
                potassium,
                location,
            },
            rules,
            &output,
            show_parameters,
            trace,
        ),
        Commands::Batch {
            input_file,
            rules,
            output,
            trace,
        } => commands::batch::run(input_file, rules, &output, trace),
        Commands::Policy { action } => match action {
            PolicyAction::Explain { rules } => commands::policy::explain(rules),
            PolicyAction::Show => commands::policy::show(),
            PolicyAction::Validate { file } => commands::policy::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
