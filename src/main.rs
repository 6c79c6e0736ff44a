//! settle-engine CLI
//!
//! Compute minimal settling payments from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle debts from a JSON file
//! settle-engine settle --input debts.json
//!
//! # Output as JSON
//! settle-engine settle --input debts.json --format json
//!
//! # Generate a random debt network for testing
//! settle-engine generate --participants 10 --density 0.4
//! ```

use rust_decimal::Decimal;
use settle_engine::core::debt_record::{DebtLog, DebtRecord};
use settle_engine::core::participant::{Participant, Roster};
use settle_engine::optimization::instructions::payment_instructions;
use settle_engine::optimization::settlement::SettlementEngine;
use settle_engine::simulation::random_debts::{generate_random_debts, DebtNetworkConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"settle-engine — minimal-transfer debt settlement via linear programming

USAGE:
    settle-engine <COMMAND> [OPTIONS]

COMMANDS:
    settle      Compute the minimal settling payments for a debt file
    generate    Generate a random debt network (for testing)
    help        Show this message

OPTIONS (settle):
    --input <FILE>      Path to JSON debts file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --participants <N>  Number of participants (default: 10)
    --density <D>       Probability of a debt per ordered pair (default: 0.3)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    settle-engine settle --input debts.json
    settle-engine settle --input debts.json --format json
    settle-engine generate --participants 20 --density 0.5 --output test.json"#
    );
}

/// JSON schema for input debts.
#[derive(serde::Deserialize)]
struct DebtInput {
    creditor: String,
    debtor: String,
    amount: String,
    #[serde(default)]
    memo: Option<String>,
}

#[derive(serde::Deserialize)]
struct DebtsFile {
    /// Optional explicit roster; derived from the debts when omitted.
    #[serde(default)]
    participants: Vec<String>,
    debts: Vec<DebtInput>,
}

/// JSON output schema for settlement results.
#[derive(serde::Serialize)]
struct SettlementOutput {
    gross_debt: String,
    total_settled: String,
    savings: String,
    savings_percent: f64,
    valid: bool,
    transfers: Vec<TransferOutput>,
}

#[derive(serde::Serialize)]
struct TransferOutput {
    payer: String,
    payee: String,
    amount: String,
}

fn load_debts(path: &str) -> (Roster, DebtLog) {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: DebtsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "participants": ["alice", "bob"],
  "debts": [
    {{ "creditor": "alice", "debtor": "bob", "amount": "30", "memo": "groceries" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut log = DebtLog::new();
    for debt in file.debts {
        let amount: Decimal = debt.amount.parse().unwrap_or_else(|e| {
            eprintln!("Invalid amount '{}': {}", debt.amount, e);
            process::exit(1);
        });
        if amount <= Decimal::ZERO {
            eprintln!(
                "Invalid amount '{}': debts must be strictly positive",
                debt.amount
            );
            process::exit(1);
        }
        let mut record = DebtRecord::new(
            Participant::new(&debt.creditor),
            Participant::new(&debt.debtor),
            amount,
        );
        if let Some(memo) = debt.memo {
            record = record.with_memo(memo);
        }
        log.add(record);
    }

    let roster = if file.participants.is_empty() {
        Roster::new(log.participants())
    } else {
        Roster::new(file.participants.into_iter().map(Participant::new).collect())
    };

    (roster, log)
}

fn cmd_settle(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let (roster, log) = load_debts(&path);
    let debts = log.to_matrix(&roster).unwrap_or_else(|e| {
        eprintln!("Error building debt matrix: {}", e);
        process::exit(1);
    });

    let result = SettlementEngine::minimize_payments(&debts).unwrap_or_else(|e| {
        eprintln!("Settlement failed: {}", e);
        process::exit(1);
    });

    let instructions = payment_instructions(result.payments(), &roster);

    if format == "json" {
        let output = SettlementOutput {
            gross_debt: result.gross_debt().to_string(),
            total_settled: result.total_settled().to_string(),
            savings: result.savings().to_string(),
            savings_percent: result.savings_percent(),
            valid: result.is_valid(),
            transfers: instructions
                .iter()
                .map(|t| TransferOutput {
                    payer: t.payer.to_string(),
                    payee: t.payee.to_string(),
                    amount: t.amount.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        println!("{}", result);
        if instructions.is_empty() {
            println!("Nothing to settle.");
        } else {
            println!("Transfers:");
            for instruction in &instructions {
                println!("  {}", instruction);
            }
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut participants = 10usize;
    let mut density = 0.3f64;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" => {
                i += 1;
                participants = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--participants requires a number");
                    process::exit(1);
                });
            }
            "--density" => {
                i += 1;
                density = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--density requires a number in [0, 1]");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = DebtNetworkConfig {
        participant_count: participants,
        density,
        ..Default::default()
    };
    let debts = generate_random_debts(&config);
    let roster = Roster::generated(participants);

    #[derive(serde::Serialize)]
    struct OutputDebt {
        creditor: String,
        debtor: String,
        amount: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        participants: Vec<String>,
        debts: Vec<OutputDebt>,
    }

    let output = OutputFile {
        participants: roster
            .participants()
            .iter()
            .map(|p| p.to_string())
            .collect(),
        debts: debts
            .iter()
            .filter(|(_, _, amount)| *amount > Decimal::ZERO)
            .map(|(creditor, debtor, amount)| OutputDebt {
                creditor: roster
                    .get(creditor)
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
                debtor: roster
                    .get(debtor)
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
                amount: amount.to_string(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} debts across {} participants → {}",
            output.debts.len(),
            participants,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
