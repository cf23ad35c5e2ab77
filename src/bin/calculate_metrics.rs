//! Utility to calculate health metrics from a JSON submission
//!
//! Usage: `calculate_metrics [input.json]` (reads stdin when no file is given)

use std::io::Read;
use std::process::ExitCode;

use healthstat::metrics::{calculate_all_metrics, validate, RawBiometrics};
use healthstat::models::UserProfile;

fn read_input() -> Result<String, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let raw: RawBiometrics = serde_json::from_str(&read_input()?)?;

    match validate(&raw) {
        Ok(input) => {
            let metrics = calculate_all_metrics(&input);
            let profile = UserProfile::new(input, metrics);
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(true)
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&e)?);
            eprintln!("Invalid input: {}", e);
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
