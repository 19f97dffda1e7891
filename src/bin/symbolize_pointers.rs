// Replaces pointer addresses in a diagnostic log with stable symbols.
use colored::Colorize;
use ownership_idioms::symbolize::run;
use ownership_idioms::SymbolizeError;
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match run(&args) {
        Ok(text) => print!("{}", text),
        Err(e @ SymbolizeError::Usage(_)) => {
            eprintln!("{} symbolize_pointers <file|->", "usage:".red().bold());
            process::exit(e.exit_code());
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            process::exit(e.exit_code());
        }
    }
}
