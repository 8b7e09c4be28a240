use clap::Parser;
use letdraw::commands::draw::{self, DrawArgs};
use std::env;

#[derive(Parser, Debug)]
#[command(name = "letdraw", disable_help_flag = true)]
struct Cli {
    #[command(flatten)]
    args: DrawArgs,
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("letdraw"));

    let cli = Cli::parse();

    std::process::exit(draw::run(&program, cli.args));
}
