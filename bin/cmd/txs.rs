use eyre::Result;
use ethtrail::{
    misc::{
        account_activity::fetch_account_activity,
        args_parsing::{parse_address, parse_start_block},
        shared_init::{ExplorerOpts, FetchOpts, OutputFormat, init_explorer},
        utils::SEPARATOR,
    },
    models::{json::activity_json::ActivityJson, tx_category::TxCategory},
};

#[derive(Debug, clap::Parser)]
pub struct TxsArgs {
    #[arg(help = "Account address (0x-prefixed, 40 hex chars)")]
    address: String,

    #[arg(short = 'b', long, help = "First block to scan", default_value = "0")]
    start_block: String,

    #[arg(long, help = "Output format ('default', 'json', 'json-pretty')", default_value = "default")]
    format: OutputFormat,

    #[command(flatten)]
    explorer_opts: ExplorerOpts,

    #[command(flatten)]
    fetch_opts: FetchOpts,
}

impl TxsArgs {
    pub async fn run(&self) -> Result<()> {
        let address = parse_address(&self.address)?;
        let start_block = parse_start_block(&self.start_block)?;
        let explorer = init_explorer(&self.explorer_opts)?;

        let activity = fetch_account_activity(
            &explorer,
            address,
            start_block,
            &self.fetch_opts.activity_settings(),
        )
        .await?;

        match self.format {
            OutputFormat::Default => {
                println!("{SEPARATOR}");
                println!("Account:     {address}");
                for category in TxCategory::all() {
                    println!("{:<12} {}", format!("{category}:"), activity.get(category).len());
                }
                println!("{SEPARATOR}");
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&ActivityJson::from(activity))?);
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(&ActivityJson::from(activity))?);
            }
        }

        Ok(())
    }
}
