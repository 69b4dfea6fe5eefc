/*! Query set resolution

Finds the query files of the requested languages and data types under the extraction root:

```text
<root>/<Language>/<category>/<category>.sparql
<root>/<Language>/<category>/<category>_1.sparql, <category>_2.sparql ...
```

Multi-part files are folded into a single [LogicalQuery].
!*/
use std::collections::BTreeSet;
use std::path::Path;

use log::{debug, warn};

use super::logical::{LogicalQuery, QUERY_EXTENSION};
use crate::error::Error;
use crate::lang::{self, DEFAULT_CATEGORIES};

/// Resolve the logical queries to run, sorted by canonical path.
///
/// `None` or an empty list selects every language of the catalog / every default data type.
pub fn resolve(
    root: &Path,
    languages: Option<&[String]>,
    categories: Option<&[String]>,
) -> Result<Vec<LogicalQuery>, Error> {
    if !root.is_dir() {
        return Err(Error::Configuration(format!(
            "extraction root {:?} does not exist",
            root
        )));
    }

    let languages: Vec<String> = match languages {
        Some(l) if !l.is_empty() => l.to_vec(),
        _ => lang::LANGUAGES.keys().map(|l| l.to_string()).collect(),
    };
    let categories: Vec<String> = match categories {
        Some(c) if !c.is_empty() => c.to_vec(),
        _ => DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
    };
    debug!("resolving {:?} for {:?}", categories, languages);

    let root_str = root
        .to_str()
        .ok_or_else(|| Error::Custom(format!("invalid extraction root: {:?}", root)))?;
    let pattern = format!(
        "{}/**/*.{}",
        glob::Pattern::escape(root_str),
        QUERY_EXTENSION
    );

    let mut queries = BTreeSet::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if !path.is_file() || !is_requested(&path, &languages, &categories) {
            continue;
        }
        match LogicalQuery::from_part(&path) {
            Ok(q) => {
                queries.insert(q);
            }
            Err(e) => warn!("ignoring {:?}: {}", path, e),
        }
    }

    Ok(queries.into_iter().collect())
}

/// Check requested languages and data types against the catalog.
pub fn check_request(languages: &[String], categories: &[String]) -> Result<(), Error> {
    if let Some(unknown) = languages.iter().find(|l| lang::get(l).is_none()) {
        return Err(Error::Configuration(format!("unknown language: {}", unknown)));
    }
    if let Some(unknown) = categories
        .iter()
        .find(|c| !DEFAULT_CATEGORIES.contains(&c.as_str()))
    {
        return Err(Error::Configuration(format!("unknown data type: {}", unknown)));
    }
    Ok(())
}

fn is_requested(path: &Path, languages: &[String], categories: &[String]) -> bool {
    let parent = path.parent();
    let category = parent.and_then(Path::file_name).and_then(|n| n.to_str());
    let language = parent
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .and_then(|n| n.to_str());

    match (language, category) {
        (Some(l), Some(c)) => {
            languages.iter().any(|x| x == l) && categories.iter().any(|x| x == c)
        }
        _ => false,
    }
}
