use std::env;
use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    /// Tariff codes to decode, in the order given.
    pub decode: Vec<String>,
    pub account: bool,
    pub chapters: bool,
    pub consumption_out: Option<PathBuf>,
    pub tui: bool,
    pub serve: bool,
    pub port: Option<u16>,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --config (expected a TOML file path)",
                )?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--decode" => {
                i += 1;
                let code =
                    args.next_or_err(i, "missing value for --decode (expected a tariff code)")?;
                opts.decode.push(code.to_string());
            }
            "--account" => opts.account = true,
            "--chapters" => opts.chapters = true,
            "--consumption-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --consumption-out (expected a file path)",
                )?;
                if opts.consumption_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--consumption-out provided more than once".to_string());
                }
            }
            "--tui" => opts.tui = true,
            "--serve" => opts.serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                opts.port = Some(port);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.tui && opts.serve {
        return Err(
            "arguments `--tui` and `--serve` are mutually exclusive; choose one".to_string(),
        );
    }

    if cfg!(not(feature = "api")) && opts.port.is_some() {
        return Err("--port requires building with `--features api`".to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("energy-explorer: learn an energy supplier's customer API by exploring it");
    eprintln!();
    eprintln!("Usage: energy-explorer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>           Load configuration from a TOML file");
    eprintln!("  --seed <u64>              Override the consumption seed");
    eprintln!("  --decode <code>           Decode a tariff code (repeatable)");
    eprintln!("  --account                 Print the account summary");
    eprintln!("  --chapters                List the story chapters");
    eprintln!("  --consumption-out <path>  Write meter readings to CSV");
    eprintln!("  --tui                     Launch the interactive explorer (feature `tui`)");
    eprintln!("  --serve                   Start the REST API (feature `api`)");
    eprintln!("  --port <u16>              API server port (feature `api`, default 3000)");
    eprintln!("  -h, --help                Show this help");
}
