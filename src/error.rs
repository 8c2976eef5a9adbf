use snafu::{Location, Snafu};

use crate::config::ConfigError;
use crate::repl::ReplError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApplicationError {
    /// could not read the configuration from the environment
    ConfigLoad {
        source: ConfigError,
        #[snafu(implicit)]
        location: Location,
    },

    /// Could not initialize the logger
    InitializeLogger {
        source: tracing::subscriber::SetGlobalDefaultError,
        #[snafu(implicit)]
        location: Location,
    },

    /// The interactive session ended with an error
    Repl {
        source: ReplError,
        #[snafu(implicit)]
        location: Location,
    },
}
