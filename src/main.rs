use clap::{CommandFactory, Parser};
use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use torolife::config::LifeConfig;
use torolife::error::{Error, Result};
use torolife::grid::Grid;
use torolife::render::{text, Framebuffer, FramebufferRenderer, PixelSink, TextRenderer};
use torolife::settings::Settings;
use torolife::sim::Simulation;

#[derive(Parser, Debug)]
#[command(name = "torolife")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(
    about = "Toroidal Game of Life on the terminal or the Linux framebuffer",
    long_about = None
)]
struct Cli {
    /// Number of generations to run
    #[arg(default_value_t = 10)]
    generations: u32,

    /// Delay between generations in milliseconds
    #[arg(default_value_t = 200)]
    delay: u64,

    /// Initial fraction of live cells (0.0-1.0)
    #[arg(default_value_t = 0.3, value_parser = parse_fraction)]
    fraction: f64,

    /// Random seed for the initial grid (negative values allowed)
    #[arg(default_value_t = 0, allow_negative_numbers = true)]
    seed: i64,

    /// Nonzero to prefer text output over the framebuffer
    #[arg(default_value_t = 0)]
    prefer_txt: u32,

    /// Text mode rows (default: terminal height)
    #[arg(long)]
    rows: Option<u16>,

    /// Text mode columns (default: terminal width)
    #[arg(long)]
    cols: Option<u16>,

    /// Framebuffer device
    #[arg(long)]
    device: Option<PathBuf>,

    /// Character for live cells in text mode
    #[arg(short, long)]
    glyph: Option<char>,

    /// Pixel value for live cells, 0xAARRGGBB or decimal
    #[arg(long, value_parser = parse_color)]
    color: Option<u32>,
}

fn parse_fraction(s: &str) -> std::result::Result<f64, String> {
    let fraction: f64 = s.parse().map_err(|e| format!("invalid fraction '{s}': {e}"))?;
    if (0.0..=1.0).contains(&fraction) {
        Ok(fraction)
    } else {
        Err(format!("fraction must be between 0 and 1, got {fraction}"))
    }
}

fn parse_color(s: &str) -> std::result::Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid color '{s}': {e}"))
}

fn build_config(cli: Cli, settings: Settings) -> LifeConfig {
    LifeConfig {
        generations: cli.generations,
        delay: Duration::from_millis(cli.delay),
        fraction: cli.fraction,
        seed: cli.seed as u64,
        prefer_text: cli.prefer_txt != 0,
        rows: cli.rows,
        cols: cli.cols,
        fallback_size: (settings.text.rows, settings.text.cols),
        glyph: cli.glyph.unwrap_or(settings.text.glyph),
        device: cli.device.unwrap_or(settings.framebuffer.device),
        color: cli.color.unwrap_or(settings.framebuffer.color),
    }
}

fn run(config: &LifeConfig) -> Result<()> {
    if !config.prefer_text {
        match OpenOptions::new().read(true).write(true).open(&config.device) {
            Ok(file) => return run_framebuffer(file, config),
            Err(err) => log::info!(
                "framebuffer {} unavailable ({}), using text output",
                config.device.display(),
                err
            ),
        }
    }
    run_text(config)
}

fn run_framebuffer(file: File, config: &LifeConfig) -> Result<()> {
    let fb = Framebuffer::new(file)?;
    let (rows, cols) = (fb.rows(), fb.cols());
    let mut sim = Simulation::new(Grid::random(rows, cols, config.fraction, config.seed));
    let mut renderer = FramebufferRenderer::new(fb, config.color);
    sim.run(&mut renderer, config.generations, config.delay)
}

fn run_text(config: &LifeConfig) -> Result<()> {
    let (rows, cols) = text::resolve_size(
        (config.rows, config.cols),
        crossterm::terminal::size(),
        config.fallback_size,
    );
    if rows == 0 || cols == 0 {
        return Err(Error::DeviceSize { rows, cols });
    }
    log::info!("text output, {}x{} cells", cols, rows);

    let mut sim = Simulation::new(Grid::random(rows, cols, config.fraction, config.seed));
    let mut renderer = TextRenderer::stdout(config.glyph)?;
    sim.run(&mut renderer, config.generations, config.delay)
}

/// `torolife ?` prints usage, like the classic positional interface
fn is_usage_request(first_arg: Option<&OsStr>) -> bool {
    first_arg.is_some_and(|arg| arg.as_encoded_bytes().first() == Some(&b'?'))
}

fn print_usage(out: &mut impl Write) -> Result<()> {
    Cli::command().write_help(out)?;
    out.flush()?;
    Ok(())
}

fn fail(err: Error) -> ! {
    log::error!("{}", err);
    std::process::exit(err.exit_code());
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if is_usage_request(std::env::args_os().nth(1).as_deref()) {
        if let Err(err) = print_usage(&mut io::stdout()) {
            fail(err);
        }
        return;
    }

    let cli = Cli::parse();
    let config = build_config(cli, Settings::load());

    if let Err(err) = run(&config) {
        fail(err);
    }
}
