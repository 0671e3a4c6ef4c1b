mod cmd;
use clap::{Parser, Subcommand};

use cmd::{balance::BalanceArgs, serve::ServeArgs, txs::TxsArgs};
use ethtrail::misc::utils::init_logs;
use eyre::Result;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "ethtrail: Ethereum account activity and historical balances from a block explorer"
)]
pub struct ETArgs {
    #[command(subcommand)]
    pub cmd: ETSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ETSubcommand {
    #[command(about = "Serve the HTTP API", alias = "s")]
    Serve(ServeArgs),
    #[command(about = "Fetch normal, internal, token and NFT txs of an address", alias = "t")]
    Txs(TxsArgs),
    #[command(about = "Print native and token balance of an address at a date", alias = "b")]
    Balance(BalanceArgs),
}

#[tokio::main]
async fn main() {
    init_logs();
    match execute().await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

type ET = ETSubcommand;

async fn execute() -> Result<()> {
    let args = ETArgs::parse();

    match args.cmd {
        ET::Serve(args) => {
            args.run().await?;
        }
        ET::Txs(args) => {
            args.run().await?;
        }
        ET::Balance(args) => {
            args.run().await?;
        }
    }

    Ok(())
}
