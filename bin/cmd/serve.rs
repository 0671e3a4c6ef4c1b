use eyre::Result;
use ethtrail::{
    misc::shared_init::{ExplorerOpts, FetchOpts, init_explorer},
    server::{AppState, serve},
};

#[derive(Debug, clap::Parser)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on", env = "PORT", default_value_t = 5000)]
    port: u16,

    #[arg(long, help = "Interface to bind", default_value = "0.0.0.0")]
    host: String,

    #[command(flatten)]
    explorer_opts: ExplorerOpts,

    #[command(flatten)]
    fetch_opts: FetchOpts,
}

impl ServeArgs {
    pub async fn run(&self) -> Result<()> {
        let explorer = init_explorer(&self.explorer_opts)?;
        let state = AppState::new(explorer, self.fetch_opts.activity_settings());
        serve(&self.host, self.port, state).await
    }
}
