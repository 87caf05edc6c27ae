//! prune-csv: keep only the allow-listed columns of a CSV file

use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use console::style;

use convert2wav::cli::{PruneCli, PRUNE_USAGE};
use convert2wav::table::{
    prune_columns, read_allow_list, read_table, write_table, ReadOptions, WriteOptions,
};
use convert2wav::utils::{init_logging, print_error, print_success};

fn main() {
    let cli = match PruneCli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
            ) {
                println!("{}", PRUNE_USAGE);
            } else {
                println!("{}\n\n{}", e.render(), PRUNE_USAGE);
            }
            process::exit(1);
        }
    };

    init_logging(false);

    if let Err(e) = run(&cli) {
        print_error(&format!("{:#}", e));
        process::exit(1);
    }
}

fn run(cli: &PruneCli) -> Result<()> {
    let table = read_table(
        &cli.input,
        &ReadOptions {
            delimiter: cli.delimiter,
            has_headers: true,
        },
    )?;
    let keep = read_allow_list(&cli.keep)?;

    let pruned = prune_columns(&table, &keep, cli.unknown_columns())?;

    write_table(
        &cli.output,
        &pruned,
        &WriteOptions {
            delimiter: cli.delimiter,
            quote_style: cli.quote_style.into(),
        },
    )?;

    print_success(&format!(
        "Kept {} of {} column(s), {} row(s) written to {}",
        pruned.width(),
        table.width(),
        pruned.rows.len(),
        style(cli.output.display()).dim()
    ));

    Ok(())
}
