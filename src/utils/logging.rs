use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Map a configured level name to a tracing level. Unknown names fall back to info.
fn level_from_name(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// `--verbose` wins over the configured level; `RUST_LOG` wins over both.
fn build_filter(verbose: bool, log_level: &str) -> Result<EnvFilter> {
    let level = if verbose {
        Level::DEBUG
    } else {
        level_from_name(log_level)
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        // Filter out noisy dependencies
        .add_directive("reqwest=warn".parse()?)
        .add_directive("rusqlite=warn".parse()?)
        .add_directive("hyper=warn".parse()?);

    Ok(filter)
}

/// Swaps the active filter once the configured level is known.
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    verbose: bool,
}

impl LogHandle {
    pub fn apply_level(&self, log_level: &str) -> Result<()> {
        self.handle.reload(build_filter(self.verbose, log_level)?)?;
        Ok(())
    }
}

fn reloadable(verbose: bool) -> Result<(reload::Layer<EnvFilter, Registry>, LogHandle)> {
    let (layer, handle) = reload::Layer::new(build_filter(verbose, "info")?);
    Ok((layer, LogHandle { handle, verbose }))
}

/// Install the global subscriber at info (or debug with `--verbose`), before
/// configuration is read, so problems found while loading it are reported.
pub fn init_logging(verbose: bool) -> Result<LogHandle> {
    let (filter, handle) = reloadable(verbose)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()?;

    Ok(handle)
}
