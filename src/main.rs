mod app;
mod cli;
mod config;
mod gateway;
mod grading;
mod store;
mod views;
mod workflow;

use anyhow::Result;
use clap::Parser;

use app::App;
use cli::{Cli, Command};
use config::LectioConfig;
use gateway::HttpGateway;
use store::JsonFileStore;
use views::{TerminalNavigator, View};

// The store uses single-threaded interior mutability and the gateway call
// is the only suspension point, so everything runs on one thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = LectioConfig::load()?;
    if let Some(url) = cli.service_url {
        config.service_url = url;
    }
    if let Some(path) = cli.store {
        config.store_path = path;
    }

    let store = JsonFileStore::open(&config.store_path);
    let gateway = HttpGateway::new(&config);
    let navigator = TerminalNavigator::new(&store);
    let mut app = App::new(&store, gateway, navigator);

    match cli.command {
        Command::Submit { file } => app.submit(&file).await?,
        Command::Status => app.status(),
        Command::Transcript => views::render(View::Transcript, &store),
        Command::Summary => views::render(View::Summary, &store),
        Command::Quiz => views::render(View::Quiz, &store),
        Command::Answer { number, value } => app.answer(number, &value)?,
        Command::Grade => app.grade(),
        Command::Retry => app.retry(),
        Command::Reset => app.reset(),
    }

    Ok(())
}
