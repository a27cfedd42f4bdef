use clap::Parser;
use cmrmeta_core::cli::{Cli, OutputFormat};
use cmrmeta_core::{Locator, MetadataExtractor, MetadataTable, TableReport};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let filters = match cli.filters() {
        Ok(filters) => filters,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let locator = Locator::new().expand_archives(!cli.no_archives);

    // One discovery + extraction pass per match term, merged in order
    let mut merged = MetadataTable::new();
    for filter in &filters {
        info!("Collecting series where SeriesDescription {}", filter);
        let map = match locator.discover(cli.roots.as_slice(), |desc| filter.matches(desc)) {
            Ok(map) => map,
            Err(e) => {
                error!("Discovery failed: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        merged.extend(MetadataExtractor::extract(&map));
    }

    info!("Collected {} records", merged.len());
    output_table(&merged, &cli);
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn output_table(table: &MetadataTable, cli: &Cli) {
    match cli.format {
        OutputFormat::Csv => {
            if let Err(e) = MetadataExtractor::export(table, &cli.output) {
                error!("Failed to write {}: {}", cli.output.display(), e);
                eprintln!("Error: Failed to write {}: {}", cli.output.display(), e);
                process::exit(1);
            }
        }
        OutputFormat::Text => {
            println!("{}", TableReport::new(table));
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(table) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
