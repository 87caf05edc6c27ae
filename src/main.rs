//! convert2wav: batch audio conversion CLI
//!
//! Converts every audio file under an input directory into a mono 16 kHz
//! WAV file under an output directory, keeping the relative layout.

use std::io::IsTerminal;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use console::Term;
use log::debug;

use convert2wav::cli::{
    choose_prompt_channel, Cli, LineConfirmer, PromptChannel, TerminalConfirmer, USAGE,
};
use convert2wav::pipeline::{run_batch, Confirmer};
use convert2wav::utils::{init_logging, print_completion, print_config, print_error};
use convert2wav::Result;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
            ) {
                println!("{}", USAGE);
            } else {
                // Flag values that fail validation keep clap's explanation
                println!("{}\n\n{}", e.render(), USAGE);
            }
            process::exit(1);
        }
    };

    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        print_error(&e.to_string());
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.batch_options();

    print_config(
        &options.input_root,
        &options.output_root,
        options.force,
        &format!(
            "{} / {} ch / {} Hz",
            options.settings.codec, options.settings.channels, options.settings.sample_rate
        ),
    );

    let channel = choose_prompt_channel(
        std::io::stdin().is_terminal(),
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
    );
    debug!("overwrite prompts via {:?}", channel);

    let mut terminal;
    let mut piped;
    let confirmer: &mut dyn Confirmer = match channel {
        PromptChannel::TerminalStderr => {
            terminal = TerminalConfirmer::new(Term::stderr());
            &mut terminal
        }
        PromptChannel::TerminalStdout => {
            terminal = TerminalConfirmer::new(Term::stdout());
            &mut terminal
        }
        PromptChannel::Lines => {
            piped = LineConfirmer::new(std::io::stdin().lock(), std::io::stderr());
            &mut piped
        }
    };

    let summary = run_batch(&options, confirmer)?;

    summary.display();
    print_completion();

    Ok(())
}
