mod attest;
mod call;
mod payload;

use {
    crate::{attest::AttestCmd, call::CallCmd, payload::PayloadCmd},
    clap::Parser,
    colored_json::ToColoredJson,
    serde::Serialize,
    tracing::metadata::LevelFilter,
};

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// Logging verbosity: error | warn | info | debug | trace
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Sign, aggregate and verify attestations
    #[command(subcommand, next_display_order = None)]
    Attest(AttestCmd),

    /// Encode and decode call instructions for the call proxy
    #[command(subcommand, next_display_order = None)]
    Call(CallCmd),

    /// Encode and decode bridge-in payloads
    #[command(subcommand, next_display_order = None)]
    Payload(PayloadCmd),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level.parse::<LevelFilter>()?)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Attest(cmd) => cmd.run(),
        Command::Call(cmd) => cmd.run(),
        Command::Payload(cmd) => cmd.run(),
    }
}

pub(crate) fn print_json_pretty<T>(data: T) -> anyhow::Result<()>
where
    T: Serialize,
{
    let json = serde_json::to_string_pretty(&data)?;

    println!("{}", json.to_colored_json_auto()?);

    Ok(())
}
