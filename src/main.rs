use dotenvy::dotenv;
use snafu::ResultExt;

use sensei::config::Config;
use sensei::error::{ApplicationError, ConfigLoadSnafu, ReplSnafu};
use sensei::logging;
use sensei::repl::{self, Repl};

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    dotenv().ok();

    let config = Config::from_env().context(ConfigLoadSnafu)?;
    let _guard = logging::init(&config)?;

    let mut repl = Repl::new().context(ReplSnafu)?;
    repl::start(&mut repl, config).await.context(ReplSnafu)
}
