#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use transcribe_testhelpers_macros::test;

use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a `tracing` target filter, e.g.
/// `TRANSCRIBE_LOG=transcribe=debug,transcribe_reflect=trace`.
pub const LOG_ENV: &str = "TRANSCRIBE_LOG";

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Prints the time elapsed since the first test started.
struct SinceStart;

impl FormatTime for SinceStart {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:>4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

/// Frames that only show the test harness or the panic machinery.
const NOISY_FRAME_PREFIXES: &[&str] = &[
    "test::run_test",
    "test::__rust_begin_short_backtrace",
    "std::panicking::",
    "std::panic::",
    "core::panicking::",
    "std::sys::backtrace::",
    "std::sys::thread::",
    "std::thread::Builder::spawn_unchecked_",
    "core::ops::function::FnOnce::call_once",
    "<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once",
    "<core::panic::unwind_safe::AssertUnwindSafe<F> as core::ops::function::FnOnce<()>>::call_once",
    "__pthread",
];

/// Global subscriber and panic hook, installed once per process.
static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    let _ = *START_TIME;

    #[cfg(miri)]
    let verbosity = color_backtrace::Verbosity::Medium;

    #[cfg(not(miri))]
    let verbosity = color_backtrace::Verbosity::Full;

    color_backtrace::BacktracePrinter::new()
        .verbosity(verbosity)
        .add_frame_filter(Box::new(|frames| {
            frames.retain(|frame| match &frame.name {
                Some(name) => !NOISY_FRAME_PREFIXES
                    .iter()
                    .any(|prefix| name.starts_with(prefix)),
                None => true,
            })
        }))
        .install(Box::new(termcolor::StandardStream::stderr(
            termcolor::ColorChoice::AlwaysAnsi,
        )));

    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::TRACE));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_timer(SinceStart)
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Sets up tracing and colored backtraces for the current test.
///
/// Safe to call from every test: the global state is initialized exactly
/// once per process, whether tests run under `cargo test` (many tests per
/// process) or `cargo nextest run` (one test per process).
pub fn setup() {
    let _: () = *SUBSCRIBER_INIT;
}

/// An error type that panics when it's built, so tests can use `?` on any
/// error and still get a located failure.
#[derive(Debug)]
pub struct IPanic;

impl<E> From<E> for IPanic
where
    E: core::error::Error + Send + Sync,
{
    #[track_caller]
    fn from(value: E) -> Self {
        panic!("from: {}: {value}", core::panic::Location::caller())
    }
}
