//! Lexicographical data update pipeline
//!
//! # Processing
//! 1. Query files of the requested languages and data types are resolved into logical queries.
//! 1. Each logical query goes through the existing output check (overwrite, or skip).
//!    A query whose existing files cannot be checked or removed is abandoned.
//! 1. Its parts are run against the query service and merged.
//!    If the first part fails, the query goes back at the end of the queue (3 attempts in total by default).
//! 1. Merged records are exported and the formatting script of the pair is run.
//!
//! Queries are processed one at a time. A failing query never stops the run.
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::format::{Formatter, NoopFormatter, ProcessFormatter};
use crate::io::{reconcile, Action, Decide, Persister, Prompt};
use crate::pipelines::pipeline::Pipeline;
use crate::query::{resolve, resolver, Executor, LogicalQuery, RetryQueue};
use crate::sparql::QueryService;

/// (language, data type)
pub type Pair = (String, String);

/// What happened to each logical query of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub completed: Vec<Pair>,
    /// Pairs whose previous export files were removed before querying.
    pub overwritten: Vec<Pair>,
    pub skipped: Vec<Pair>,
    pub abandoned: Vec<Pair>,
}

/// Print above the progress bar, or on stdout when there is no bar to draw.
fn say(pb: &ProgressBar, msg: String) {
    if pb.is_hidden() {
        println!("{}", msg);
    } else {
        pb.println(msg);
    }
}

fn pair(q: &LogicalQuery) -> Pair {
    (q.language().to_string(), q.category().to_string())
}

pub struct QueryData<S: QueryService> {
    config: Config,
    languages: Vec<String>,
    categories: Vec<String>,
    overwrite: bool,
    service: S,
    decider: Box<dyn Decide>,
    formatter: Box<dyn Formatter>,
}

impl<S: QueryService> QueryData<S> {
    /// Every language and default data type, asking on stdin before overwriting.
    pub fn new(config: Config, service: S) -> Self {
        let formatter: Box<dyn Formatter> = if config.run_formatters {
            Box::new(ProcessFormatter::new(
                &config.formatter_program,
                &config.extraction_root,
            ))
        } else {
            Box::new(NoopFormatter)
        };

        Self {
            config,
            languages: Vec::new(),
            categories: Vec::new(),
            overwrite: false,
            service,
            decider: Box::new(Prompt),
            formatter,
        }
    }

    /// Restrict to these languages. Empty means all of them.
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Restrict to these data types. Empty means the default ones.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_decider(mut self, decider: Box<dyn Decide>) -> Self {
        self.decider = decider;
        self
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn progress_bar(len: usize) -> ProgressBar {
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg}: {percent}% |{bar:40}| {pos}/{len} [{elapsed}<{eta}]")
        {
            pb.set_style(style);
        }
        pb.set_message("Data updated");
        pb
    }
}

impl<S: QueryService> Pipeline<RunReport> for QueryData<S> {
    fn run(&self) -> Result<RunReport, Error> {
        self.config.validate()?;
        resolver::check_request(&self.languages, &self.categories)?;

        let queries = resolve(
            &self.config.extraction_root,
            Some(self.languages.as_slice()),
            Some(self.categories.as_slice()),
        )?;
        info!("{} queries to run", queries.len());
        debug!("queries: {:#?}", queries);

        let output_dir = &self.config.output_dir;
        let persister = Persister::new(&self.config.extraction_root, output_dir);
        let executor = Executor::new(&self.service, &persister, self.config.max_attempts);
        let mut queue = RetryQueue::new(queries, self.config.max_attempts);
        let mut report = RunReport::default();
        let pb = Self::progress_bar(queue.len());

        while let Some(pending) = queue.pop() {
            let query = &pending.query;
            let (language, category) = (query.language(), query.category());

            // existing files are only looked at once, retries keep the first decision.
            if pending.attempt == 1 {
                let reconciled = pb.suspend(|| {
                    reconcile(
                        output_dir,
                        language,
                        category,
                        self.overwrite,
                        &*self.decider,
                    )
                });
                let reconciled = match reconciled {
                    Ok(r) => r,
                    Err(e) => {
                        error!("[{}] could not check existing files: {}", query, e);
                        report.abandoned.push(pair(query));
                        pb.inc(1);
                        continue;
                    }
                };

                if reconciled.action == Action::Skip {
                    say(&pb, format!("Skipping update for {} {}.", language, category));
                    report.skipped.push(pair(query));
                    pb.inc(1);
                    continue;
                }
                if !reconciled.removed.is_empty() {
                    let notice = if self.overwrite {
                        "Overwrite is enabled. Removing existing files ..."
                    } else {
                        "Removing existing files ..."
                    };
                    say(&pb, notice.to_string());
                    report.overwritten.push(pair(query));
                }
            }

            say(&pb, format!("Querying and formatting {} {}", language, category));
            match executor.execute(query) {
                Ok(records) => match persister.finalize(language, category, &records) {
                    Ok(path) => {
                        info!("[{}] {} records written to {:?}", query, records.len(), path);

                        if let Err(e) = self.formatter.format(language, category, output_dir) {
                            warn!("[{}] formatting failed: {}", query, e);
                        }
                        report.completed.push(pair(query));
                    }
                    Err(e) => {
                        error!("[{}] could not write export: {}", query, e);
                        report.abandoned.push(pair(query));
                    }
                },
                Err(e) if e.is_retryable() => {
                    let attempt = pending.attempt;
                    let failed = pair(query);
                    let path = query.path().to_path_buf();
                    if queue.requeue(pending) {
                        warn!(
                            "[{} {}] attempt {} failed, queued again",
                            failed.0, failed.1, attempt
                        );
                        pb.inc_length(1);
                    } else {
                        let exhausted = Error::RetryExhausted {
                            query: path,
                            attempts: attempt,
                        };
                        error!("[{} {}] {}", failed.0, failed.1, exhausted);
                        report.abandoned.push(failed);
                    }
                }
                Err(e) => {
                    error!("[{}] {}", query, e);
                    report.abandoned.push(pair(query));
                }
            }
            pb.inc(1);
        }
        pb.finish();

        info!(
            "{} completed ({} overwritten), {} skipped, {} abandoned",
            report.completed.len(),
            report.overwritten.len(),
            report.skipped.len(),
            report.abandoned.len()
        );
        for (language, category) in &report.abandoned {
            warn!("not updated: {} {}", language, category);
        }

        Ok(report)
    }
}
