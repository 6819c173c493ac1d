//! txflow CLI
//!
//! Render dashboard and network reports from a transaction export.
//!
//! # Usage
//!
//! ```bash
//! # Summary dashboard over a data directory
//! txflow overview --data-dir ./data
//!
//! # Top-N network view, writing the interactive graph document
//! txflow network --data-dir ./data --top-n 50 --output network_graph.html
//!
//! # Generate a random export for testing
//! txflow generate --customers 20 --externals 60 --rows 200
//! ```

use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process;
use txflow::core::entity::BankCode;
use txflow::core::transaction::Direction;
use txflow::data::cache::DataCache;
use txflow::data::layout::DataDir;
use txflow::data::loader::write_transactions;
use txflow::sample::{generate_sample, SampleConfig};
use txflow::view::dashboard::DashboardView;
use txflow::view::filter::{FilterState, WeightMode};
use txflow::view::html::write_document;
use txflow::view::network::NetworkView;

fn print_usage() {
    eprintln!(
        r#"txflow — transaction network analytics over bank transfer exports

USAGE:
    txflow <COMMAND> [OPTIONS]

COMMANDS:
    overview    Summary metrics, charts and rankings for a data directory
    network     Filtered top-N network view and interactive graph document
    generate    Generate a random transaction export (for testing)
    help        Show this message

OPTIONS (overview):
    --data-dir <DIR>    Input directory (default: .)
    --home <CODE>       The institution's own bank code (default: B1)
    --mode <MODE>       value | frequency | unweighted (default: value)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (network):
    --data-dir <DIR>    Input directory (default: .)
    --home <CODE>       The institution's own bank code (default: B1)
    --top-n <N>         Number of top nodes to keep
    --min-amount <X>    Lower amount bound (inclusive)
    --max-amount <X>    Upper amount bound (inclusive)
    --directions <LIST> Comma-separated: incoming,outgoing
    --output <FILE>     Graph document path (default: <tmp>/network_graph.html)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --customers <N>     Customer entities (default: 20)
    --externals <N>     External entities (default: 60)
    --rows <N>          Rows before deduplication (default: 200)
    --home <CODE>       The institution's own bank code (default: B1)
    --output <FILE>     Output path (default: transactions.csv)

EXAMPLES:
    txflow overview --data-dir ./data --home B1
    txflow network --data-dir ./data --top-n 50 --directions incoming
    txflow generate --rows 500 --output fixtures/transactions.csv"#
    );
}

fn flag_value(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    args.get(*i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires a value", flag);
        process::exit(1);
    })
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, what: &str) -> T
where
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|e| {
        eprintln!("invalid {} '{}': {}", what, value, e);
        process::exit(1);
    })
}

fn cmd_overview(args: &[String]) {
    let mut data_dir = PathBuf::from(".");
    let mut home = BankCode::new("B1");
    let mut mode = WeightMode::Value;
    let mut format = "text".to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" => data_dir = PathBuf::from(flag_value(args, &mut i, "--data-dir")),
            "--home" => home = BankCode::new(flag_value(args, &mut i, "--home")),
            "--mode" => mode = parse_or_exit(&flag_value(args, &mut i, "--mode"), "mode"),
            "--format" => format = flag_value(args, &mut i, "--format"),
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let dir = DataDir::new(data_dir);
    let mut cache = DataCache::new();
    let view = DashboardView::build(&mut cache, &dir, &home, mode).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&view).unwrap());
    } else {
        println!("{}", view);
    }
}

fn cmd_network(args: &[String]) {
    let mut data_dir = PathBuf::from(".");
    let mut home = BankCode::new("B1");
    let mut top_n: Option<usize> = None;
    let mut min_amount: Option<Decimal> = None;
    let mut max_amount: Option<Decimal> = None;
    let mut directions: Option<Vec<Direction>> = None;
    let mut output: Option<PathBuf> = None;
    let mut format = "text".to_string();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" => data_dir = PathBuf::from(flag_value(args, &mut i, "--data-dir")),
            "--home" => home = BankCode::new(flag_value(args, &mut i, "--home")),
            "--top-n" => top_n = Some(parse_or_exit(&flag_value(args, &mut i, "--top-n"), "count")),
            "--min-amount" => {
                min_amount = Some(parse_or_exit(
                    &flag_value(args, &mut i, "--min-amount"),
                    "amount",
                ))
            }
            "--max-amount" => {
                max_amount = Some(parse_or_exit(
                    &flag_value(args, &mut i, "--max-amount"),
                    "amount",
                ))
            }
            "--directions" => {
                let list = flag_value(args, &mut i, "--directions");
                directions = Some(
                    list.split(',')
                        .map(|s| parse_or_exit(s.trim(), "direction"))
                        .collect(),
                );
            }
            "--output" => output = Some(PathBuf::from(flag_value(args, &mut i, "--output"))),
            "--format" => format = flag_value(args, &mut i, "--format"),
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let dir = DataDir::new(data_dir);
    let mut cache = DataCache::new();
    let loaded = cache.transactions(&dir.transactions()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let mut filter = FilterState::for_set(&loaded.set);
    if let Some(n) = top_n {
        filter.top_n = n;
    }
    if let Some(min) = min_amount {
        filter.min_amount = min;
    }
    if let Some(max) = max_amount {
        filter.max_amount = max;
    }
    if let Some(dirs) = directions {
        filter.directions = dirs;
    }

    let view = NetworkView::build(&loaded.set, &filter, &home);

    let document_path = output.unwrap_or_else(|| std::env::temp_dir().join("network_graph.html"));
    if !view.nodes.is_empty() {
        if let Err(e) = write_document(&view, &document_path) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&view).unwrap());
    } else {
        for notice in &view.notices {
            eprintln!("{}", notice);
        }
        println!("Selected nodes: {}", view.nodes.len());
        println!("Subgraph edges: {}", view.edges.len());
        for node in &view.nodes {
            println!(
                "  {:<40} value {:>20}  degree {}",
                node.entity.label(),
                node.value,
                node.degree
            );
        }
        if !view.nodes.is_empty() {
            println!("Graph document: {}", document_path.display());
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = SampleConfig::default();
    let mut output = PathBuf::from("transactions.csv");

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--customers" => {
                config.customers = parse_or_exit(&flag_value(args, &mut i, "--customers"), "count")
            }
            "--externals" => {
                config.externals = parse_or_exit(&flag_value(args, &mut i, "--externals"), "count")
            }
            "--rows" => config.rows = parse_or_exit(&flag_value(args, &mut i, "--rows"), "count"),
            "--home" => config.home = BankCode::new(flag_value(args, &mut i, "--home")),
            "--output" => output = PathBuf::from(flag_value(args, &mut i, "--output")),
            other => {
                eprintln!("Unknown option: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let set = generate_sample(&config);
    if let Err(e) = write_transactions(&set, &output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    eprintln!(
        "Generated {} transactions across {} customers and {} externals: {}",
        set.len(),
        config.customers,
        config.externals,
        output.display()
    );
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
        "overview" => cmd_overview(rest),
        "network" => cmd_network(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
