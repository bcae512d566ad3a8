//! Energy explorer entry point: CLI wiring over the library.

mod cli;

use std::process;

use energy_explorer::account::Account;
use energy_explorer::config::ExplorerConfig;
use energy_explorer::io::export::export_consumption_csv;
use energy_explorer::machine::ChapterId;
use energy_explorer::tariff::decode;

use cli::CliOptions;

fn main() {
    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    // Load config: --config file, else built-in defaults
    let mut config = match cli.config {
        Some(ref path) => match ExplorerConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => ExplorerConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.account.seed = seed;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let account = Account::mock(&config.account);
    let mut failed = false;

    for code in &cli.decode {
        match decode(code) {
            Some(decoded) => println!("{code}\n{decoded}\n"),
            None => {
                eprintln!("error: \"{code}\" is not a decodable tariff code");
                failed = true;
            }
        }
    }

    if cli.account || nothing_requested(&cli) {
        println!("{account}");
        let code = config.ui.resolve_tariff_code(&account);
        if let Some(decoded) = decode(&code) {
            println!("\n{code}\n{decoded}");
        }
    }

    if cli.chapters {
        for chapter in ChapterId::ALL {
            let meta = chapter.meta();
            println!(
                "{}. {:<26} {:<22} ({})",
                meta.number, meta.title, meta.subtitle, meta.id
            );
        }
    }

    if let Some(ref path) = cli.consumption_out {
        if let Err(e) = export_consumption_csv(&account, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Consumption written to {}", path.display());
    }

    if cli.tui {
        run_tui(&config);
    }

    if cli.serve {
        run_api(&config, account);
    }

    if failed {
        process::exit(1);
    }
}

fn nothing_requested(cli: &CliOptions) -> bool {
    cli.decode.is_empty()
        && !cli.chapters
        && cli.consumption_out.is_none()
        && !cli.tui
        && !cli.serve
}

#[cfg(feature = "tui")]
fn run_tui(config: &ExplorerConfig) {
    if let Err(e) = energy_explorer::tui::run(config) {
        eprintln!("error: TUI crashed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: &ExplorerConfig) {
    eprintln!("error: --tui requires building with `--features tui`");
    process::exit(1);
}

#[cfg(feature = "api")]
fn run_api(config: &ExplorerConfig, account: Account) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let tariff_code = config.ui.resolve_tariff_code(&account);
    let state = Arc::new(energy_explorer::api::AppState {
        account,
        tariff_code,
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(energy_explorer::api::serve(state, addr)) {
        eprintln!("error: API server failed on {addr}: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn run_api(_config: &ExplorerConfig, _account: Account) {
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}
