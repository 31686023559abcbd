//! Spring Endpoints - Command-line tool listing the HTTP endpoints of a Spring MVC code base.
//!
//! # Usage
//!
//! ```bash
//! spring-endpoints [OPTIONS] <SOURCE_PATH>
//! ```
//!
//! # Examples
//!
//! Write `endpoints.json` in the current directory:
//! ```bash
//! spring-endpoints ./my-service/src/main/java
//! ```
//!
//! Write YAML somewhere else, failing on any unparsable file:
//! ```bash
//! spring-endpoints ./my-service -f yaml -o build/endpoints.yaml --fail-on-parse-error
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! spring-endpoints ./my-service -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use spring_endpoints::cli;

fn main() -> Result<()> {
    // Parse once to know the verbosity before the logger exists
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Spring endpoint analyzer starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    Ok(())
}
