use std::sync::Mutex;

use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter, Registry};

lazy_static! {
    static ref LOG_INSTALLED: Mutex<bool> = Mutex::new(false);
}

/// Initialize logging.  Nothing is installed unless the environment variable
/// `RUST_LOG` is set to a non-empty value, in which case it is interpreted as
/// an `EnvFilter` and log lines go to stderr so they don't interleave with the
/// JSON on stdout.  Calling this more than once is harmless.
pub fn init_logging() {
    let mut installed = match LOG_INSTALLED.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if *installed {
        return;
    }
    *installed = true;

    // Test scripts frequently set RUST_LOG unconditionally but with an empty
    // value, and we don't want that to be interpreted as a desire to enable
    // logging.
    let rustlog = match std::env::var("RUST_LOG") {
        Ok(rustlog) if !rustlog.is_empty() => rustlog,
        _ => return,
    };

    let env_filter = match EnvFilter::try_new(&rustlog) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("Ignoring bad RUST_LOG {:?}: {}", rustlog, err);
            return;
        }
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .compact()
        // Output mostly lands in logs or a terminal shared with the console,
        // so ANSI and wall time are noise.
        .with_ansi(false)
        .without_time()
        .with_filter(env_filter);

    // Another subscriber (say, from a test harness) may already be the global
    // default; in that case we just leave it alone.
    let _ = Registry::default().with(layer).try_init();
}
