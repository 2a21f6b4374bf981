mod command_line_args;
mod transaction_reader;

use basket::rule::item_vec_to_string;
use basket::{encode, generate_rules, mine_with_config, sort_rules, Result};
use command_line_args::{parse_args_or_exit, Arguments};
use env_logger::Env;
use log::{error, info};
use transaction_reader::TransactionReader;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;
use std::time::Instant;

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn mine_rules(args: &Arguments) -> Result<()> {
    info!("Mining data set: {}", args.input_file_path);
    let start = Instant::now();

    let timer = Instant::now();
    let transactions = TransactionReader::open(
        &args.input_file_path,
        &args.transaction_column,
        &args.item_column,
    )?
    .read_transactions()?;
    info!(
        "Read {} transactions in {} ms",
        transactions.len(),
        timer.elapsed().as_millis()
    );

    let (matrix, itemizer) = encode(transactions);
    info!(
        "Encoded {} transactions over {} distinct items",
        matrix.num_rows(),
        matrix.num_columns()
    );

    let frequent = mine_with_config(&matrix, &args.mining)?;

    let timer = Instant::now();
    let mut rules = generate_rules(&frequent, args.metric, args.min_threshold)?;
    sort_rules(&mut rules, args.metric);
    info!(
        "Generated {} rules in {} ms",
        rules.len(),
        timer.elapsed().as_millis()
    );
    if rules.is_empty() {
        info!("No rules met {} >= {}", args.metric, args.min_threshold);
    }

    {
        let mut output = BufWriter::new(File::create(&args.output_rules_path)?);
        writeln!(output, "antecedents,consequents,support,confidence,lift")?;
        for rule in &rules {
            writeln!(
                output,
                "{},{},{},{},{}",
                quoted(&item_vec_to_string(&rule.antecedent, &itemizer)),
                quoted(&item_vec_to_string(&rule.consequent, &itemizer)),
                rule.support(),
                rule.confidence(),
                rule.lift()
            )?;
        }
        output.flush()?;
    }

    info!("Total runtime: {} ms", start.elapsed().as_millis());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let arguments = parse_args_or_exit();

    if let Err(err) = mine_rules(&arguments) {
        error!("{}", err);
        process::exit(1);
    }
}
