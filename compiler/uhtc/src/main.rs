//! Reflection header front-end CLI.

use uhtc::{init_tracing, ModuleKind, Session, SessionConfig};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            let mut config = SessionConfig::default();
            let mut paths = Vec::new();
            for arg in args.iter().skip(2) {
                if arg == "--no-editor" {
                    config.editor = false;
                } else if arg == "--no-parallel" {
                    config.parallel = false;
                } else if arg == "--warnings-as-errors" || arg == "-W" {
                    config.warnings_as_errors = true;
                } else if let Some(kind) = arg.strip_prefix("--module=") {
                    let Some(kind) = ModuleKind::from_name(kind) else {
                        eprintln!("error: unknown module kind '{kind}'");
                        eprintln!("Valid kinds: runtime, editor, developer, program");
                        std::process::exit(1);
                    };
                    config.module_kind = kind;
                } else if arg.starts_with('-') {
                    eprintln!("error: unknown option '{arg}'");
                    std::process::exit(1);
                } else {
                    paths.push(arg.as_str());
                }
            }
            if paths.is_empty() {
                eprintln!("Usage: uht check <header.h>... [options]");
                std::process::exit(1);
            }
            std::process::exit(check_headers(config, &paths));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("uht {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Parse and resolve `paths` as one session. Returns the exit code.
fn check_headers(config: SessionConfig, paths: &[&str]) -> i32 {
    let mut session = Session::new(config);
    for path in paths {
        match std::fs::read_to_string(path) {
            Ok(source) => {
                session.add_header(*path, source);
            }
            Err(err) => {
                eprintln!("error: cannot read '{path}': {err}");
                return 1;
            }
        }
    }

    let result = session.run();
    let diagnostics = session.take_diagnostics();
    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }
    match result {
        Ok(()) => {
            println!(
                "{} headers, {} types, {} warnings",
                paths.len(),
                session.types().len(),
                session.diagnostics().warning_count()
            );
            0
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn print_usage() {
    println!("Reflection header front-end");
    println!();
    println!("Usage: uht <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <header.h>...   Parse, resolve and validate headers");
    println!("  help                  Show this help message");
    println!("  version               Show version information");
    println!();
    println!("Check options:");
    println!("  --no-editor           Build without WITH_EDITOR");
    println!("  --module=<kind>       Module kind: runtime, editor, developer, program");
    println!("  --no-parallel         Run every phase on one thread");
    println!("  --warnings-as-errors  Fail on warnings (-W)");
    println!();
    println!("Examples:");
    println!("  uht check Source/Widget.h Source/Button.h");
    println!("  RUST_LOG=uht_parse=debug uht check Widget.h");
}
