use clap::Parser;
use vmws_commands::Cli;
use vmws_utils::errors::exit_code;
use vmws_utils::term::print_error;

fn main() {
    if let Err(e) = Cli::parse().invoke() {
        let message = format!("{e:#}");
        if let Err(print) = print_error(&message) {
            eprintln!("{message} ({print})");
        }
        std::process::exit(exit_code(&e));
    }
}
