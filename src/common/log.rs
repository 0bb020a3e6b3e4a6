//! Logging setup emitting JSON lines on stderr.
//!
//! Each line follows `{"ts":<unix ms>,"level":..,"mod":..,"msg":..}`. The rest
//! of the crate only talks to the `log` facade.

use std::io::Write;

use log::{LevelFilter, Record};

/// Render one record as a JSON line (without the trailing newline).
pub fn render_line(ts: u128, record: &Record<'_>) -> String {
    let line = serde_json::json!({
        "ts": ts as u64,
        "level": record.level().as_str(),
        "mod": record.target(),
        "msg": record.args().to_string(),
    });
    line.to_string()
}

/// Install the global logger. Repeated calls are ignored.
pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let line = render_line(crate::common::time::now_ms(), record);
            writeln!(buf, "{line}")
        })
        .try_init();
}
