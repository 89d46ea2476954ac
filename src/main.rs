//! CLI entry point for scene-director
//!
//! This provides the command-line interface for playing, linting and dumping
//! scene scripts.

use log::LevelFilter;
use scene_director::{cli, parser};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" | "lint" | "dump" => {
            if args.len() < 3 {
                eprintln!("Error: Missing script file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
            let file_path = PathBuf::from(&args[2]);
            let debug = args.iter().skip(3).any(|arg| arg == "--debug");

            let level = if debug {
                LevelFilter::Trace
            } else {
                LevelFilter::Warn
            };
            if let Err(err) = cli::logger::init(level) {
                eprintln!("Warning: {}", err);
            }

            match command.as_str() {
                "play" => run_play(file_path, debug),
                "lint" => run_lint(file_path),
                _ => run_dump(file_path),
            }
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("scene-director - Scene Script Director");
    println!();
    println!("USAGE:");
    println!("    cargo run -- <command> <script.json> [--debug]");
    println!();
    println!("COMMANDS:");
    println!("    play <file> [--debug]    Play a script in the terminal");
    println!("    lint <file>              Check a script for authoring mistakes");
    println!("    dump <file>              Print the parsed script as JSON");
    println!("    --help, -h               Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --debug    Show debug information (position, vars) and trace logs");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run -- play scripts/blackjack_night.json");
    println!("    cargo run -- lint scripts/blackjack_night.json");
}

fn read_script(file_path: &Path) -> scene_director::Script {
    match parser::load_blocking(file_path) {
        Ok(script) => script,
        Err(err) => {
            eprintln!("Error: Failed to load script '{}'", file_path.display());
            eprintln!("Reason: {:#}", err);
            process::exit(1);
        }
    }
}

fn run_play(file_path: PathBuf, debug: bool) {
    let script = read_script(&file_path);

    if let Err(err) = cli::play::run_play(script, debug) {
        eprintln!("Error: Player mode failed");
        eprintln!("Reason: {}", err);
        process::exit(1);
    }
}

fn run_lint(file_path: PathBuf) {
    let script = read_script(&file_path);

    if cli::report::print_lint(&script).has_errors() {
        process::exit(1);
    }
}

fn run_dump(file_path: PathBuf) {
    let script = read_script(&file_path);

    if let Err(err) = cli::report::print_dump(&script) {
        eprintln!("Error: Failed to write script");
        eprintln!("Reason: {}", err);
        process::exit(1);
    }
}
