use std::{fmt, str::FromStr, sync::OnceLock};

use crate::{
    err::{RenderError, Result},
    logging::init_log,
};

pub const DEFAULT_WIDTH: usize = 82;

pub struct Config {
    pub log_config: LogConfig,
}

#[derive(Debug, Clone, Copy)]
pub enum LogConfig {
    NoLog,
    Verbose(u8),
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn init_config(config: Config) {
    CONFIG.set(config).unwrap_or_else(|_| {
        panic!("cannot init config again after init");
    });
    init_log(&get_config().log_config);
}

pub fn get_config() -> &'static Config {
    CONFIG.get().expect("cannot get config before init")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EncoderType {
    /// 16-byte addressed rows, only rows with changes
    #[default]
    Hexdump,
    /// Flat lowercase hex
    Hex,
    /// Decoded UTF-8 text
    Utf8,
}

impl FromStr for EncoderType {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hexdump" => Ok(Self::Hexdump),
            "hex" => Ok(Self::Hex),
            "utf8" => Ok(Self::Utf8),
            _ => Err(RenderError::UnknownEncoder(s.to_string())),
        }
    }
}

impl fmt::Display for EncoderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Hexdump => "hexdump",
                Self::Hex => "hex",
                Self::Utf8 => "utf8",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorType {
    /// `<kind>...</kind>` tags
    #[default]
    Html,
    /// Terminal color escapes
    Ansi,
}

impl FromStr for ColorType {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "ansi" => Ok(Self::Ansi),
            _ => Err(RenderError::UnknownColor(s.to_string())),
        }
    }
}

impl fmt::Display for ColorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Html => "html",
                Self::Ansi => "ansi",
            }
        )
    }
}

pub fn parse_width(s: &str) -> Result<usize> {
    match s.trim().parse::<usize>() {
        Ok(width) if width > 0 => Ok(width),
        _ => Err(RenderError::InvalidWidth(s.to_string())),
    }
}
