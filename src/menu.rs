//! Interactive suite selection
//!
//! Without a suite token on the command line the harness prints a numbered
//! menu and reads one choice from stdin. Unrecognized tokens and choices
//! fall back to the default suite after an error message.

use std::io::{self, BufRead, Write};

use crate::benchmark::SuiteType;

/// Suite run when the user's selection is unrecognized
pub const DEFAULT_SUITE: SuiteType = SuiteType::AsyncMethods;

/// Resolve the suites to run from an optional command-line token
pub fn select_suites(token: Option<&str>) -> Vec<SuiteType> {
    match token {
        Some(token) => suites_for_token(token).unwrap_or_else(|| {
            eprintln!("Unknown suite: {}", token);
            eprintln!("Valid suites: async, gc, memory, statemachine, all");
            eprintln!("Running default suite: {}", DEFAULT_SUITE);
            vec![DEFAULT_SUITE]
        }),
        None => prompt_for_suites(),
    }
}

/// Map a command-line token to a suite selection
pub fn suites_for_token(token: &str) -> Option<Vec<SuiteType>> {
    if token.eq_ignore_ascii_case("all") {
        return Some(SuiteType::all().to_vec());
    }
    SuiteType::parse(token).map(|suite| vec![suite])
}

/// Map a menu choice to a suite selection
pub fn suites_for_choice(choice: &str) -> Option<Vec<SuiteType>> {
    match choice.trim() {
        "1" => Some(vec![SuiteType::AsyncMethods]),
        "2" => Some(vec![SuiteType::AllocPressure]),
        "3" => Some(vec![SuiteType::MemoryAnalysis]),
        "4" => Some(vec![SuiteType::StateMachine]),
        "5" => Some(SuiteType::all().to_vec()),
        _ => None,
    }
}

fn prompt_for_suites() -> Vec<SuiteType> {
    println!("Choose a benchmark suite:");
    println!("1. Async method comparison");
    println!("2. Allocation pressure");
    println!("3. Detailed memory analysis");
    println!("4. Suspension overhead sweep");
    println!("5. Run ALL suites");
    println!();
    print!("Enter your choice (1-5): ");
    io::stdout().flush().ok();

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() || line.is_empty() {
        eprintln!("No input. Running default suite: {}", DEFAULT_SUITE);
        return vec![DEFAULT_SUITE];
    }

    suites_for_choice(&line).unwrap_or_else(|| {
        eprintln!("Invalid choice. Running default suite: {}", DEFAULT_SUITE);
        vec![DEFAULT_SUITE]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_selection() {
        assert_eq!(
            suites_for_token("async"),
            Some(vec![SuiteType::AsyncMethods])
        );
        assert_eq!(
            suites_for_token("gc"),
            Some(vec![SuiteType::AllocPressure])
        );
        assert_eq!(suites_for_token("ALL"), Some(SuiteType::all().to_vec()));
        assert_eq!(suites_for_token("bogus"), None);
    }

    #[test]
    fn test_choice_selection() {
        assert_eq!(
            suites_for_choice("1"),
            Some(vec![SuiteType::AsyncMethods])
        );
        assert_eq!(
            suites_for_choice(" 4 \n"),
            Some(vec![SuiteType::StateMachine])
        );
        assert_eq!(suites_for_choice("5"), Some(SuiteType::all().to_vec()));
        assert_eq!(suites_for_choice("6"), None);
        assert_eq!(suites_for_choice("x"), None);
    }

    #[test]
    fn test_unknown_token_falls_back() {
        assert_eq!(select_suites(Some("bogus")), vec![DEFAULT_SUITE]);
    }
}
