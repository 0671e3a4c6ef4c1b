use std::time::{Duration, Instant};

use ::time::UtcOffset;
use tracing_subscriber::{EnvFilter, fmt::time::OffsetTime};

pub const SEPARATOR: &str = "-----------------------------------------------------------------------------------------------";

pub fn init_logs() {
    let time_format =
        time::format_description::parse("[year]-[month]-[day]T[hour]:[minute]:[second]Z")
            .expect("valid log time format");
    let timer = OffsetTime::new(UtcOffset::UTC, time_format);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn measure_start(label: &str) -> (String, Instant) {
    (label.to_string(), Instant::now())
}

pub fn measure_end(start: (String, Instant)) -> Duration {
    let elapsed = start.1.elapsed();
    tracing::info!("Elapsed: {:.2?} for '{}'", elapsed, start.0);
    elapsed
}
