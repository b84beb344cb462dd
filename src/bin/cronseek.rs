use clap::Parser;
use cronseek::{CronExpr, Scheduler};
use jiff::civil::DateTime;
use std::process;

#[derive(Parser)]
#[command(name = "cronseek", about = "Bidirectional cron occurrence search", version)]
struct Cli {
    /// Five-field cron expression (e.g., "0 3 * * 2#1")
    expression: Option<String>,

    /// Number of occurrences to show
    #[arg(short, long, default_value = "1")]
    n: u32,

    /// Search backward instead of forward
    #[arg(long)]
    prev: bool,

    /// Anchor timestamp (ISO 8601 civil datetime, e.g. 2022-08-10T05:00:00). Defaults to the current UTC time.
    #[arg(long)]
    from: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate expression without computing
    #[arg(long)]
    check: bool,
}

fn main() {
    let cli = Cli::parse();

    let expression = match cli.expression {
        Some(ref expr) => expr.as_str(),
        None => {
            eprintln!("error: no expression provided");
            process::exit(2);
        }
    };

    let expr = match CronExpr::parse(expression) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if cli.check {
        println!("\u{2713} valid");
        process::exit(0);
    }

    let mut scheduler = match cli.from {
        Some(ref from) => match from.parse::<DateTime>() {
            Ok(anchor) => Scheduler::new(expr, anchor),
            Err(e) => {
                eprintln!("error: invalid --from timestamp: {e}");
                process::exit(1);
            }
        },
        None => Scheduler::from_now(expr),
    };

    let mut n = cli.n;
    if n > 1000 {
        eprintln!("warning: capped at 1000 occurrences");
        n = 1000;
    }

    let mut results = Vec::new();
    for _ in 0..n {
        let found = if cli.prev {
            scheduler.prev()
        } else {
            scheduler.next()
        };
        match found {
            Ok(dt) => results.push(dt),
            Err(e) => {
                if results.is_empty() {
                    eprintln!("error: {e}");
                    process::exit(1);
                }
                break;
            }
        }
    }

    if cli.json {
        let stamps: Vec<String> = results
            .iter()
            .map(|dt| dt.strftime("%Y-%m-%d %H:%M").to_string())
            .collect();
        println!("{}", serde_json::to_string(&stamps).unwrap());
    } else {
        for dt in &results {
            println!("{}", dt.strftime("%Y-%m-%d %H:%M"));
        }
    }
}
