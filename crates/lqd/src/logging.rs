use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::args::GlobalArgs;

/// Initialize the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-q`/`-v`.
pub fn init_tracing(global: &GlobalArgs) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(env_filter);

    Registry::default().with(stderr_layer).init();
}

fn default_directive(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        return "off";
    }
    match global.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(quiet: bool, verbose: u8) -> GlobalArgs {
        GlobalArgs { quiet, verbose }
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_directive(&global(false, 0)), "warn");
        assert_eq!(default_directive(&global(false, 1)), "info");
        assert_eq!(default_directive(&global(false, 2)), "debug");
        assert_eq!(default_directive(&global(false, 3)), "trace");
        assert_eq!(default_directive(&global(false, 9)), "trace");
    }

    #[test]
    fn quiet_turns_logging_off() {
        assert_eq!(default_directive(&global(true, 0)), "off");
    }
}
