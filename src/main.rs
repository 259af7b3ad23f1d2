use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;

use multidiff_render::{
    Model, Render,
    config::{ColorType, Config, DEFAULT_WIDTH, EncoderType, LogConfig, init_config},
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Files to compare, each against the one before it
    #[arg(num_args = 2.., required = true)]
    files: Vec<PathBuf>,

    /// Byte encoding of the rendered diff
    #[arg(short, long, default_value = "hexdump")]
    encoder: EncoderType,

    /// Markup for changed spans
    #[arg(short, long, default_value = "ansi")]
    color: ColorType,

    /// Hexdump row wrap width in characters
    #[arg(short, long, default_value_t = DEFAULT_WIDTH, value_parser = parse_width)]
    width: usize,

    /// Load files as UTF-8 text and diff them by character
    #[arg(short, long)]
    text: bool,

    /// Use verbose output (-vv very verbose, -vvv also to debug.log, -vvvv trace.log)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_width(s: &str) -> Result<usize, String> {
    multidiff_render::config::parse_width(s).map_err(|e| e.to_string())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut model = Model::new();
    for path in &cli.files {
        log::info!("reading {}...", path.display());
        let bytes = fs::read(path)?;
        if cli.text {
            model.push(String::from_utf8(bytes)?)?;
        } else {
            model.push(bytes)?;
        }
    }
    log::info!("rendering {} diffs...", model.diffs.len());
    let render = Render::new(cli.encoder, cli.color, cli.width)?;
    let dump = render.dumps(&model)?;
    let mut writer = BufWriter::new(io::stdout().lock());
    writer.write_all(dump.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_config(Config {
        log_config: LogConfig::Verbose(cli.verbose),
    });
    log::debug!("cli args: {:#?}", cli);
    match run(&cli) {
        Ok(()) => {
            log::info!("success");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
