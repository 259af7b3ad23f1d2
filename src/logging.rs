use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::sync::Mutex;

use crate::config::LogConfig;

fn open_log_file(file_name: &str) -> io::Result<Mutex<LineWriter<File>>> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_name)?;
    Ok(Mutex::new(LineWriter::new(file)))
}

fn level_str(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Writes to stderr, and to `debug.log` as well when asked to.
struct ConsoleLogger {
    max_level: Level,
    file: Option<Mutex<LineWriter<File>>>,
}

impl ConsoleLogger {
    fn new(max_level: Level, write_file: bool) -> io::Result<Self> {
        let file = if write_file {
            Some(open_log_file("debug.log")?)
        } else {
            None
        };
        Ok(Self { max_level, file })
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let now = Local::now();
        if let Some(file) = &self.file {
            if let Ok(mut writer) = file.lock() {
                let _ = writeln!(
                    writer,
                    "[{:<5} {}] {}",
                    level_str(record.level()),
                    now.format("%H:%M:%S%.6f"),
                    record.args()
                );
            }
        }
        eprintln!(
            "[{:<5} {}] {}",
            level_str(record.level()),
            now.format("%H:%M:%S%.3f"),
            record.args()
        );
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut writer) = file.lock() {
                let _ = writer.flush();
            }
        }
    }
}

/// Everything, with module paths, into `trace.log`.
struct TraceLogger {
    file: Mutex<LineWriter<File>>,
}

impl TraceLogger {
    fn new() -> io::Result<Self> {
        Ok(Self {
            file: open_log_file("trace.log")?,
        })
    }
}

impl Log for TraceLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut writer) = self.file.lock() {
            let _ = writeln!(
                writer,
                "[{:<5} {} {}] {}",
                level_str(record.level()),
                Local::now().format("%H:%M:%S%.6f"),
                record.module_path().unwrap_or("???"),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.file.lock() {
            let _ = writer.flush();
        }
    }
}

fn install(logger: io::Result<impl Log + 'static>, filter: LevelFilter) {
    match logger {
        Ok(logger) => {
            if log::set_boxed_logger(Box::new(logger)).is_ok() {
                log::set_max_level(filter);
            }
        }
        Err(err) => eprintln!("cannot open log file: {}", err),
    }
}

pub fn init_log(config: &LogConfig) {
    match *config {
        LogConfig::NoLog | LogConfig::Verbose(0) => {}
        LogConfig::Verbose(1) => {
            install(ConsoleLogger::new(Level::Info, false), LevelFilter::Info);
        }
        LogConfig::Verbose(2) => {
            install(ConsoleLogger::new(Level::Debug, false), LevelFilter::Debug);
        }
        LogConfig::Verbose(3) => {
            install(ConsoleLogger::new(Level::Debug, true), LevelFilter::Debug);
        }
        LogConfig::Verbose(4..=u8::MAX) => {
            install(TraceLogger::new(), LevelFilter::Trace);
        }
    }
}
