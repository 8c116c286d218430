use clap::Parser;
use std::process;
use transcript_processor::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the run summary has already been reported
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Transcript Processor - College Academic Records Reporter");
    println!("========================================================");
    println!();
    println!("Extract structured academic records from plain-text transcript exports");
    println!("and report per-term WAM statistics for residential colleges.");
    println!();
    println!("USAGE:");
    println!("    transcript-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Parse transcripts and report term statistics (main command)");
    println!("    terms       List every academic term found in the input data");
    println!("    trend       Report the per-college WAM trend across all terms");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Report every term found under ./data:");
    println!("    transcript-processor process");
    println!();
    println!("    # Report two specific terms as CSV files:");
    println!("    transcript-processor process --input /path/to/exports --output reports \\");
    println!("                                 --terms 24T1,24T2 --format csv");
    println!();
    println!("    # List the terms present in the data:");
    println!("    transcript-processor terms --input /path/to/exports");
    println!();
    println!("For detailed help on any command, use:");
    println!("    transcript-processor <COMMAND> --help");
}
