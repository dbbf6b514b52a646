mod config;
mod controller;
mod log;
mod model;
mod store;
mod ui;
mod view;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dotenv::dotenv;
use tokio::runtime::Builder;
use tracing::{event, Level};
use tracing_subscriber::EnvFilter;

use config::Config;
use controller::TaskController;
use store::HttpTaskStore;

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::load().context("unable to load configuration")?;
    let env_filter = EnvFilter::try_from_env(log::LOG_ENV);
    log::setup(env_filter, &config.log).context("unable to set up logging")?;

    event!(Level::INFO, "Starting TaskBoard: {}", env!("FULL_VERSION"));
    event!(Level::INFO, store = %config.store.url, page_size = config.view.page_size, "configuration loaded");

    let runtime = Builder::new_multi_thread()
        .thread_name("flow")
        .enable_all()
        .build()
        .context("failed to create runtime")?;

    let store = HttpTaskStore::new(&config.store).context("unable to build store client")?;
    let controller = TaskController::new(Arc::new(store));
    let result = ui::start(controller, runtime.handle().clone(), config.view.page_size);

    runtime.shutdown_timeout(Duration::from_millis(100));
    event!(Level::INFO, "TaskBoard stopped");
    result
}

#[cfg(all(test, feature = "e2e"))]
mod e2e_tests;
