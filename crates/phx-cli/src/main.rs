use clap::Parser;
use colored::Colorize;
use env_logger::Env;

mod convert;

#[derive(Parser)]
#[command(name = "hbjson2wufi")]
#[command(about = "Convert an HBJSON model to a WUFI-Passive XML project", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", hide = true)]
    debug: bool,

    #[command(flatten)]
    convert: convert::ConvertArgs,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides the default level
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    convert::execute(&cli.convert)
}
