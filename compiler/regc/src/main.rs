//! regc CLI.
//!
//! Deterministic registry generation from module-graph manifests.

use std::path::PathBuf;

use regc::commands::{check, explain, generate, GenerateOptions};
use regc::Config;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(2);
    }

    let code = match args[1].as_str() {
        "generate" => {
            if args.len() < 3 {
                eprintln!("Usage: regc generate <manifest.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  -o <dir>                    Output directory (default: generated)");
                eprintln!("  --root <fqn>                Registry root abstraction");
                eprintln!("  --fallback-namespace <ns>   Namespace for declarations without one");
                std::process::exit(2);
            }
            let mut options = GenerateOptions::default();
            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "-o" if i + 1 < args.len() => {
                        options.out_dir = PathBuf::from(&args[i + 1]);
                        i += 2;
                    }
                    "--root" if i + 1 < args.len() => {
                        options.config.root_abstraction.clone_from(&args[i + 1]);
                        i += 2;
                    }
                    "--fallback-namespace" if i + 1 < args.len() => {
                        options.config.fallback_namespace = Some(args[i + 1].clone());
                        i += 2;
                    }
                    other => {
                        eprintln!("error: unknown option `{other}`");
                        std::process::exit(2);
                    }
                }
            }
            generate(&PathBuf::from(&args[2]), &options)
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: regc check <manifest.json> [--json] [--root <fqn>]");
                std::process::exit(2);
            }
            let mut config = Config::default();
            let mut json = false;
            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "--json" => {
                        json = true;
                        i += 1;
                    }
                    "--root" if i + 1 < args.len() => {
                        config.root_abstraction.clone_from(&args[i + 1]);
                        i += 2;
                    }
                    "--fallback-namespace" if i + 1 < args.len() => {
                        config.fallback_namespace = Some(args[i + 1].clone());
                        i += 2;
                    }
                    other => {
                        eprintln!("error: unknown option `{other}`");
                        std::process::exit(2);
                    }
                }
            }
            check(&PathBuf::from(&args[2]), &config, json)
        }
        "explain" => {
            if args.len() != 3 {
                eprintln!("Usage: regc explain <code>");
                std::process::exit(2);
            }
            explain(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        other => {
            eprintln!("error: unknown command `{other}`");
            print_usage();
            2
        }
    };

    std::process::exit(code);
}

fn print_usage() {
    eprintln!("regc - registry compiler");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  regc generate <manifest.json> [-o <dir>] [options]   Generate registries");
    eprintln!("  regc check <manifest.json> [--json] [options]        Diagnostics only");
    eprintln!("  regc explain <code>                                  Explain an error code");
    eprintln!();
    eprintln!("Set REGC_LOG (e.g. REGC_LOG=reg_analyze=debug) for tracing output.");
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("REGC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
