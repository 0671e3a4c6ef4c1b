use eyre::Result;
use ethtrail::{
    misc::{
        balance_resolver::{BalanceQuery, resolve_balance},
        shared_init::{ExplorerOpts, OutputFormat, init_explorer},
        utils::SEPARATOR,
    },
    models::json::balance_json::BalanceJson,
};

#[derive(Debug, clap::Parser)]
pub struct BalanceArgs {
    #[arg(help = "Account address (0x-prefixed, 40 hex chars)")]
    address: String,

    #[arg(help = "Date in YYYY-MM-DD, balance is taken at 00:00 UTC")]
    date: String,

    #[arg(long, help = "ERC-20 contract to also query the token balance of")]
    contract_address: Option<String>,

    #[arg(long, help = "Output format ('default', 'json', 'json-pretty')", default_value = "default")]
    format: OutputFormat,

    #[command(flatten)]
    explorer_opts: ExplorerOpts,
}

impl BalanceArgs {
    pub async fn run(&self) -> Result<()> {
        let query = BalanceQuery::parse(
            &self.address,
            &self.date,
            self.contract_address.as_deref(),
        )?;
        let explorer = init_explorer(&self.explorer_opts)?;

        let result = resolve_balance(&explorer, &query).await?;

        match self.format {
            OutputFormat::Default => {
                println!("{SEPARATOR}");
                println!("Account:       {}", query.address);
                println!("Date:          {} 00:00 UTC", query.date);
                println!("Block:         {}", result.block_number);
                println!("Balance (wei): {}", result.balance);
                if let (Some(contract), Some(token_balance)) = (query.contract, &result.token_balance) {
                    println!("Token {contract}: {token_balance}");
                }
                println!("{SEPARATOR}");
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&BalanceJson::from(result))?);
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(&BalanceJson::from(result))?);
            }
        }

        Ok(())
    }
}
