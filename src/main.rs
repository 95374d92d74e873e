//! Command-line entry point: derive flow states and KPIs from status snapshots.

use std::io::Read;
use std::path::Path;
use std::process;

use tracing::{error, info};

use synapse_flow::config::AppConfig;
use synapse_flow::flow::derivation::{Derivation, derive};
use synapse_flow::io::export::export_csv;
use synapse_flow::logging;
use synapse_flow::wire::parse_observations;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    snapshot_path: Option<String>,
    hardened: bool,
    out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: Option<u16>,
}

fn print_help() {
    eprintln!("synapse-flow — energy-flow edge states and KPIs from status snapshots");
    eprintln!();
    eprintln!("Usage: synapse-flow [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>      Load configuration from TOML file");
    eprintln!("  --preset <name>      Use a built-in preset (reference, hardened)");
    eprintln!("  --snapshot <path>    Read status JSON (object or array) from file");
    eprintln!("  --hardened           Cap grid dependence at 100%");
    eprintln!("  --out <path>         Export derivation records to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve              Start REST API server");
        eprintln!("  --port <u16>         API server port (overrides config)");
    }
    eprintln!("  --help               Show this help message");
    eprintln!();
    eprintln!("Without --snapshot, status JSON is read from stdin.");
}

fn value_arg(args: &[String], i: usize, flag: &str, what: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {flag} requires a {what} argument");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        snapshot_path: None,
        hardened: false,
        out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                cli.config_path = Some(value_arg(&args, i, "--config", "path"));
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(value_arg(&args, i, "--preset", "name"));
            }
            "--snapshot" => {
                i += 1;
                cli.snapshot_path = Some(value_arg(&args, i, "--snapshot", "path"));
            }
            "--hardened" => {
                cli.hardened = true;
            }
            "--out" => {
                i += 1;
                cli.out = Some(value_arg(&args, i, "--out", "path"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = value_arg(&args, i, "--port", "u16");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = Some(p);
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.config_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --config and --preset are mutually exclusive");
        process::exit(1);
    }

    cli
}

fn load_config(cli: &CliArgs) -> AppConfig {
    let loaded = if let Some(ref path) = cli.config_path {
        AppConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        AppConfig::from_preset(name)
    } else {
        Ok(AppConfig::reference())
    };

    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if cli.hardened {
        config.derivation.cap_grid_dependence = true;
    }
    #[cfg(feature = "api")]
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

fn read_input(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run_derivations(cli: &CliArgs, config: &AppConfig) -> Vec<Derivation> {
    let input = read_input(cli.snapshot_path.as_deref()).unwrap_or_else(|e| {
        error!(error = %e, "failed to read snapshot input");
        process::exit(1);
    });

    let observations = parse_observations(&input).unwrap_or_else(|e| {
        error!(error = %e, "rejected snapshot input");
        eprintln!("error: {e}");
        process::exit(1);
    });
    info!(count = observations.len(), "snapshots loaded");

    let policy = config.derivation.policy();
    observations
        .into_iter()
        .map(|o| derive(&o.snapshot, &policy).with_recommended_action(o.recommended_action))
        .collect()
}

fn main() {
    let cli = parse_args();
    let config = load_config(&cli);
    logging::init(&config.logging);

    #[cfg(feature = "api")]
    let derive_input = !cli.serve || cli.snapshot_path.is_some();
    #[cfg(not(feature = "api"))]
    let derive_input = true;

    if derive_input {
        let records = run_derivations(&cli, &config);
        for r in &records {
            println!("{r}");
        }

        if let Some(ref path) = cli.out {
            if let Err(e) = export_csv(&records, Path::new(path)) {
                eprintln!("error: failed to write CSV: {e}");
                process::exit(1);
            }
            info!(path = %path, rows = records.len(), "derivations written");
        }
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let addr_str = format!("{}:{}", config.server.bind, config.server.port);
        let addr: SocketAddr = addr_str.parse().unwrap_or_else(|e| {
            eprintln!("error: invalid bind address \"{addr_str}\": {e}");
            process::exit(1);
        });
        let state = Arc::new(synapse_flow::api::AppState {
            policy: config.derivation.policy(),
        });
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(synapse_flow::api::serve(state, addr)) {
            eprintln!("error: server failed: {e}");
            process::exit(1);
        }
    }
}
