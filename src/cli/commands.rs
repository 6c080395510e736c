use std::env;

use tracing::{debug, instrument};

use crate::application::services::Outcome;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;

/// Load settings from the working directory and run one invocation.
pub fn execute(args: Vec<String>) -> CliResult<()> {
    let cwd = env::current_dir().ok();
    let settings = Settings::load(cwd.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);
    run(&container, args)
}

/// Dispatch `args` (program path first) through `container`.
#[instrument(skip(container))]
pub fn run(container: &ServiceContainer, args: Vec<String>) -> CliResult<()> {
    match container.dispatcher().dispatch(args)? {
        Outcome::Dispatched { verb, group } => {
            debug!(
                "{} done: {} source(s), {} destination(s)",
                verb,
                group.sources.len(),
                group.destinations.len()
            );
        }
        Outcome::Help => {
            let page = container.manual()?;
            output::manual(&page);
        }
        Outcome::Version => {
            output::info(&format!("hackmyresume {}", env!("CARGO_PKG_VERSION")));
        }
    }
    Ok(())
}
