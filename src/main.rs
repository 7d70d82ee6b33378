//! sheetbind - bind CSV sheet data to page elements from the command line.

mod bindings;

use anyhow::{Result, bail};
use sheetbind_core::{
    CacheMode, FileFetcher, FormatKind, HttpFetcher, InitOptions, NOT_AVAILABLE, NumberOptions,
    SheetDispatcher, SheetFetcher, format_value,
};
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: sheetbind [OPTIONS] <URL|FILE>");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <URL|FILE>                CSV source (http(s) URL or local path)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --cell <A1>           Print one cell (can be repeated)");
    eprintln!("  -C, --column <LETTERS>    Print a whole column (can be repeated)");
    eprintln!("  --format <KIND>           Format printed queries (percent|currency|raw)");
    eprintln!("  -b, --bindings <FILE>     Apply a TOML bindings file and print results");
    eprintln!("  --cache <MODE>            Cache hint (default|no-store|no-cache)");
    eprintln!("  -h, --help                Print help");
}

struct CliArgs {
    source: String,
    cells: Vec<String>,
    columns: Vec<String>,
    format: Option<FormatKind>,
    bindings: Option<PathBuf>,
    cache: CacheMode,
}

fn parse_args(args: &[String]) -> Result<Option<CliArgs>> {
    let mut source: Option<String> = None;
    let mut cells: Vec<String> = Vec::new();
    let mut columns: Vec<String> = Vec::new();
    let mut format: Option<FormatKind> = None;
    let mut bindings: Option<PathBuf> = None;
    let mut cache = CacheMode::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "-c" | "--cell" => {
                i += 1;
                if i >= args.len() {
                    bail!("--cell requires an A1 reference");
                }
                cells.push(args[i].to_string());
            }
            "-C" | "--column" => {
                i += 1;
                if i >= args.len() {
                    bail!("--column requires column letters");
                }
                columns.push(args[i].to_string());
            }
            "--format" => {
                i += 1;
                if i >= args.len() {
                    bail!("--format requires a value");
                }
                match FormatKind::from_attr(&args[i]) {
                    Some(kind) => format = Some(kind),
                    None => bail!("Unknown format: {}", args[i]),
                }
            }
            "-b" | "--bindings" => {
                i += 1;
                if i >= args.len() {
                    bail!("--bindings requires a file path");
                }
                bindings = Some(PathBuf::from(&args[i]));
            }
            "--cache" => {
                i += 1;
                if i >= args.len() {
                    bail!("--cache requires a value");
                }
                match CacheMode::from_name(&args[i]) {
                    Some(mode) => cache = mode,
                    None => bail!("Unknown cache mode: {}", args[i]),
                }
            }
            arg if arg.starts_with('-') => bail!("Unknown option: {}", arg),
            _ => {
                if source.is_none() {
                    source = Some(args[i].to_string());
                } else {
                    bail!("Unexpected argument: {}", args[i]);
                }
            }
        }
        i += 1;
    }

    let Some(source) = source else {
        bail!("Missing CSV source");
    };
    Ok(Some(CliArgs {
        source,
        cells,
        columns,
        format,
        bindings,
        cache,
    }))
}

async fn run<F: SheetFetcher>(fetcher: F, args: &CliArgs) -> Result<()> {
    let mut dispatcher = SheetDispatcher::with_fetcher(fetcher);
    let opts = InitOptions {
        cache: args.cache,
        auto_dispatch: false,
        ..InitOptions::new(args.source.clone())
    };
    dispatcher.load(&opts).await;

    if !dispatcher.is_ready() {
        match dispatcher.last_error() {
            Some(err) => bail!("Failed to load {}: {}", args.source, err),
            None => bail!("Failed to load {}", args.source),
        }
    }

    let number = NumberOptions::default();
    for cell in &args.cells {
        let value = dispatcher.get_cell(cell);
        println!("{}: {}", cell, format_value(value, args.format, &number));
    }
    for letters in &args.columns {
        let column = dispatcher.get_column(letters);
        if column.is_empty() {
            println!("{}: (no such column)", letters);
            continue;
        }
        for (i, value) in column.iter().enumerate() {
            println!("{}{}: {}", letters, i + 1, value.unwrap_or(NOT_AVAILABLE));
        }
    }

    if let Some(path) = args.bindings.as_ref() {
        let mut loaded = bindings::load_bindings(path)?;
        for warning in &loaded.warnings {
            eprintln!("Warning: {}", warning);
        }
        dispatcher.dispatch(&mut loaded.elements);
        for (label, element) in loaded.labels.iter().zip(&loaded.elements) {
            println!("{}: {}", label, element.text());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let result = if cli.source.starts_with("http://") || cli.source.starts_with("https://") {
        run(HttpFetcher::new(), &cli).await
    } else {
        run(FileFetcher, &cli).await
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("sheetbind")
            .chain(parts.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parse_args_requires_a_source() {
        assert!(parse_args(&argv(&[])).is_err());
        assert!(parse_args(&argv(&["--cell", "A1"])).is_err());
    }

    #[test]
    fn parse_args_collects_queries() {
        let cli = parse_args(&argv(&[
            "data.csv", "--cell", "B2", "-c", "C3", "--column", "A", "--format", "percent",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(cli.source, "data.csv");
        assert_eq!(cli.cells, vec!["B2", "C3"]);
        assert_eq!(cli.columns, vec!["A"]);
        assert_eq!(cli.format, Some(FormatKind::Percent));
    }

    #[test]
    fn parse_args_rejects_unknown_format_and_cache() {
        assert!(parse_args(&argv(&["data.csv", "--format", "fancy"])).is_err());
        assert!(parse_args(&argv(&["data.csv", "--cache", "forever"])).is_err());
    }

    #[test]
    fn parse_args_help_short_circuits() {
        assert!(parse_args(&argv(&["-h"])).unwrap().is_none());
        assert!(parse_args(&argv(&["data.csv", "--help"])).unwrap().is_none());
    }

    #[tokio::test]
    async fn run_reads_a_local_file() {
        let path = std::env::temp_dir().join(format!("sheetbind_cli_{}.csv", std::process::id()));
        std::fs::write(&path, "a,b\nc,d").expect("write csv");

        let cli = parse_args(&argv(&[path.to_str().unwrap(), "--cell", "B2"]))
            .unwrap()
            .unwrap();
        let result = run(FileFetcher, &cli).await;
        let _ = std::fs::remove_file(&path);
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn run_reports_missing_file() {
        let cli = parse_args(&argv(&["/definitely/not/here.csv", "--cell", "A1"]))
            .unwrap()
            .unwrap();
        let err = run(FileFetcher, &cli).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
