//! split-engine CLI
//!
//! Compute balances and settlement plans for a shared-expense group.
//!
//! # Usage
//!
//! ```bash
//! # Net balances from a JSON group file
//! split-engine balances --input group.json
//!
//! # Full settlement plan
//! split-engine settle --input group.json
//!
//! # Output as JSON
//! split-engine settle --input group.json --format json
//!
//! # Generate a random group for testing
//! split-engine generate --members 10 --expenses 30
//! ```

use rust_decimal::Decimal;
use split_engine::core::member::MemberId;
use split_engine::engine::SettlementEngine;
use split_engine::input::{load_group, Group};
use split_engine::simulation::stress_test::{generate_random_group, GroupConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-engine — shared-expense balance netting and settlement minimization

USAGE:
    split-engine <COMMAND> [OPTIONS]

COMMANDS:
    balances    Compute each member's net position
    settle      Compute the settlement plan (who pays whom)
    generate    Generate a random expense group (for testing)
    help        Show this message

OPTIONS (balances, settle):
    --input <FILE>      Path to JSON group file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --members <N>       Number of members (default: 10)
    --expenses <N>      Number of expenses (default: 30)
    --max-amount <X>    Maximum expense total (default: 500)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-engine balances --input group.json
    split-engine settle --input group.json --format json
    split-engine generate --members 5 --expenses 20 --output group.json"#
    );
}

/// JSON output schema for balances.
#[derive(serde::Serialize)]
struct BalancesOutput {
    group: Option<String>,
    balances: Vec<BalanceOutput>,
}

#[derive(serde::Serialize)]
struct BalanceOutput {
    member: String,
    amount: String,
    status: String,
}

/// JSON output schema for settlement plans.
#[derive(serde::Serialize)]
struct SettlementOutput {
    group: Option<String>,
    transfer_count: usize,
    total_moved: String,
    transfers: Vec<TransferOutput>,
}

#[derive(serde::Serialize)]
struct TransferOutput {
    from: String,
    to: String,
    amount: String,
}

fn parse_input_format(args: &[String]) -> (String, String) {
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
    (path, format)
}

fn load_or_exit(path: &str) -> Group {
    load_group(path).unwrap_or_else(|e| {
        eprintln!("Error loading '{}': {}", path, e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "name": "ski trip",
  "members": ["alice", "bob"],
  "expenses": [
    {{
      "payer": "alice",
      "total": "100",
      "splits": [
        {{ "member": "alice", "amount": "50" }},
        {{ "member": "bob", "amount": "50" }}
      ]
    }}
  ]
}}"#
        );
        process::exit(1);
    })
}

fn cmd_balances(args: &[String]) {
    let (path, format) = parse_input_format(args);
    let group = load_or_exit(&path);
    let summary = SettlementEngine::summarize(&group.expenses, &group.roster);

    if format == "json" {
        let output = BalancesOutput {
            group: group.name,
            balances: summary
                .balances()
                .iter()
                .map(|b| BalanceOutput {
                    member: b.member.to_string(),
                    amount: b.amount.to_string(),
                    status: if b.is_creditor() {
                        "CREDITOR".to_string()
                    } else if b.is_debtor() {
                        "DEBTOR".to_string()
                    } else {
                        "SETTLED".to_string()
                    },
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        if let Some(name) = &group.name {
            println!("Group: {}\n", name);
        }
        println!("{}", summary);
    }
}

fn cmd_settle(args: &[String]) {
    let (path, format) = parse_input_format(args);
    let group = load_or_exit(&path);
    let plan = SettlementEngine::plan(&group.expenses, &group.roster);

    if format == "json" {
        let output = SettlementOutput {
            group: group.name,
            transfer_count: plan.transfer_count(),
            total_moved: plan.total_moved().to_string(),
            transfers: plan
                .transfers()
                .iter()
                .map(|t| TransferOutput {
                    from: t.from.to_string(),
                    to: t.to.to_string(),
                    amount: t.amount.to_string(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        if let Some(name) = &group.name {
            println!("Group: {}\n", name);
        }
        println!("{}", plan);
    }
}

fn cmd_generate(args: &[String]) {
    let mut members = 10usize;
    let mut expenses = 30usize;
    let mut max_amount = Decimal::from(500);
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                i += 1;
                members = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--members requires a number");
                    process::exit(1);
                });
            }
            "--expenses" => {
                i += 1;
                expenses = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--expenses requires a number");
                    process::exit(1);
                });
            }
            "--max-amount" => {
                i += 1;
                max_amount = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max-amount requires a decimal amount");
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

    let config = GroupConfig {
        member_count: members,
        expense_count: expenses,
        max_amount,
        ..Default::default()
    };

    let (roster, log) = generate_random_group(&config);

    #[derive(serde::Serialize)]
    struct OutputSplit {
        member: String,
        amount: String,
    }

    #[derive(serde::Serialize)]
    struct OutputExpense {
        payer: String,
        total: String,
        splits: Vec<OutputSplit>,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        members: Vec<String>,
        expenses: Vec<OutputExpense>,
    }

    let output = OutputFile {
        members: roster.iter().map(MemberId::to_string).collect(),
        expenses: log
            .expenses()
            .iter()
            .map(|e| OutputExpense {
                payer: e.payer().to_string(),
                total: e.total().to_string(),
                splits: e
                    .splits()
                    .iter()
                    .map(|s| OutputSplit {
                        member: s.member.to_string(),
                        amount: s.amount.to_string(),
                    })
                    .collect(),
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
            "Generated {} expenses across {} members → {}",
            log.len(),
            members,
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
        "balances" => cmd_balances(rest),
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
