use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

static DEFAULT_FILTER: &str =
    "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info";

/// Stdout plus a daily rolled file under `./logs/`. Keep the guard alive for
/// the lifetime of the process or buffered file output is lost.
pub fn init(service: &str) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(
        std::path::Path::new("./logs/"),
        format!("{service}.log"),
    );
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();
    guard
}
