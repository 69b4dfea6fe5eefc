//! # Lexidata
//!
//! Updates Wikidata lexicographical data by running all or the desired queries
//! and their formatting scripts.
//!
//! ```sh
//! lexidata 0.1.0
//! Wikidata lexicographical data update tool.
//!
//! USAGE:
//!     lexidata <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     help     Prints this message or the help of the given subcommand(s)
//!     list     List known languages and available query files
//!     query    Query, export and format language data
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=lexidata=debug`).
use std::path::PathBuf;

use itertools::Itertools;
use structopt::StructOpt;

use lexidata::config::Config;
use lexidata::error::Error;
use lexidata::lang::LANGUAGES;
use lexidata::pipelines::{Pipeline, QueryData};
use lexidata::query::resolve;
use lexidata::sparql::WikidataClient;

#[macro_use]
extern crate log;

mod cli;

fn load_config(
    path: Option<PathBuf>,
    extraction_root: Option<PathBuf>,
) -> Result<Config, Error> {
    let mut config = match path {
        Some(p) => Config::from_file(&p)?,
        None => Config::default(),
    };
    if let Some(root) = extraction_root {
        config.extraction_root = root;
    }
    Ok(config)
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Lexidata::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Lexidata::Query(q) => {
            let mut config = load_config(q.config, q.extraction_root)?;
            if let Some(output_dir) = q.output_dir {
                config.set_output_dir(&output_dir);
            }
            if let Some(endpoint) = q.endpoint {
                config.endpoint = endpoint;
            }
            if q.no_format {
                config.run_formatters = false;
            }
            debug!("config\n{:#?}", config);

            let client =
                WikidataClient::new(&config.endpoint, &config.user_agent, config.timeout())?;
            let pipeline = QueryData::new(config, client)
                .with_languages(q.languages)
                .with_categories(q.categories)
                .with_overwrite(q.overwrite);

            let report = pipeline.run()?;
            if !report.abandoned.is_empty() {
                error!(
                    "Could not update: {}",
                    report
                        .abandoned
                        .iter()
                        .map(|(l, c)| format!("{} {}", l, c))
                        .join(", ")
                );
            }
        }

        cli::Lexidata::List(l) => {
            let config = load_config(l.config, l.extraction_root)?;
            let queries = resolve(&config.extraction_root, None, None)?;
            let available = queries.iter().into_group_map_by(|q| q.language().to_string());

            println!("{:<12} {:<4} {:<8} data types", "language", "iso", "qid");
            for (language, meta) in LANGUAGES.iter() {
                let categories = available
                    .get(*language)
                    .map(|qs| qs.iter().map(|q| q.category()).join(", "))
                    .unwrap_or_default();
                println!("{:<12} {:<4} {:<8} {}", language, meta.iso, meta.qid, categories);
            }
        }
    };
    Ok(())
}
