//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "lexidata", about = "Wikidata lexicographical data update tool.")]
/// Holds every command that is callable by the `lexidata` command.
pub enum Lexidata {
    #[structopt(about = "Query, export and format language data")]
    Query(Query),
    #[structopt(about = "List known languages and available query files")]
    List(List),
}

#[derive(Debug, StructOpt)]
/// Query command and parameters.
///
/// ```sh
/// lexidata-query 0.1.0
/// Query, export and format language data
///
/// USAGE:
///     lexidata query [FLAGS] [OPTIONS]
///
/// FLAGS:
///         --no-format    do not run formatting scripts
///         --overwrite    overwrite existing exports without asking
///
/// OPTIONS:
///     -l, --language <languages>...          languages to update. Default is all of them.
///     -d, --data-type <categories>...        data types to update (nouns, verbs, prepositions).
///     -o, --output-dir <output-dir>          export destination
///     -c, --config <config>                  JSON configuration file
///     -e, --extraction-root <extraction-root>    query files location
///         --endpoint <endpoint>              SPARQL endpoint
/// ```
pub struct Query {
    #[structopt(
        short = "l",
        long = "language",
        help = "languages to update. Default is all of them."
    )]
    pub languages: Vec<String>,
    #[structopt(
        short = "d",
        long = "data-type",
        help = "data types to update (nouns, verbs, prepositions). Default is all of them."
    )]
    pub categories: Vec<String>,
    #[structopt(
        short = "o",
        long = "output-dir",
        parse(from_os_str),
        help = "export destination"
    )]
    pub output_dir: Option<PathBuf>,
    #[structopt(long = "overwrite", help = "overwrite existing exports without asking")]
    pub overwrite: bool,
    #[structopt(
        short = "c",
        long = "config",
        parse(from_os_str),
        help = "JSON configuration file"
    )]
    pub config: Option<PathBuf>,
    #[structopt(
        short = "e",
        long = "extraction-root",
        parse(from_os_str),
        help = "query files location"
    )]
    pub extraction_root: Option<PathBuf>,
    #[structopt(long = "no-format", help = "do not run formatting scripts")]
    pub no_format: bool,
    #[structopt(long = "endpoint", help = "SPARQL endpoint")]
    pub endpoint: Option<String>,
}

#[derive(Debug, StructOpt)]
/// List command and parameters.
pub struct List {
    #[structopt(
        short = "c",
        long = "config",
        parse(from_os_str),
        help = "JSON configuration file"
    )]
    pub config: Option<PathBuf>,
    #[structopt(
        short = "e",
        long = "extraction-root",
        parse(from_os_str),
        help = "query files location"
    )]
    pub extraction_root: Option<PathBuf>,
}
