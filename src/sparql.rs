/*! SPARQL query service.

[QueryService] is the only thing the pipeline knows about the remote service:
it gets a query text and gives back the bindings of the response.
[WikidataClient] implements it against the Wikidata Query Service.
!*/
use std::{collections::HashMap, fmt, time::Duration};

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://query.wikidata.org/sparql";
pub const DEFAULT_USER_AGENT: &str = "lexidata/0.1 (https://github.com/lexidata/lexidata)";

#[derive(Debug)]
pub enum Error {
    Reqwest(reqwest::Error),
    /// Non-success HTTP status.
    Status(u16),
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Reqwest(e) => write!(f, "{}", e),
            Error::Status(code) => write!(f, "HTTP status {}", code),
            Error::Decode(e) => write!(f, "invalid response: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Reqwest(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}

/// A typed value of a binding, as found in `application/sparql-results+json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Term {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub datatype: Option<String>,
}

impl Term {
    /// Plain literal, mostly useful for tests.
    pub fn literal(value: &str) -> Self {
        Self {
            kind: "literal".to_string(),
            value: value.to_string(),
            lang: None,
            datatype: None,
        }
    }
}

/// One row of a response: variable name to value.
pub type Binding = HashMap<String, Term>;

#[derive(Debug, Deserialize)]
pub struct Response {
    pub results: Results,
}

#[derive(Debug, Deserialize)]
pub struct Results {
    pub bindings: Vec<Binding>,
}

/// Anything that can run a SPARQL query.
///
/// Calls are independent: nothing is kept between two queries.
pub trait QueryService {
    fn run(&self, query: &str) -> Result<Vec<Binding>, Error>;
}

/// Blocking client for the Wikidata Query Service.
pub struct WikidataClient {
    endpoint: String,
    client: Client,
}

impl WikidataClient {
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/sparql-results+json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

impl QueryService for WikidataClient {
    fn run(&self, query: &str) -> Result<Vec<Binding>, Error> {
        debug!("sending query to {} ({} bytes)", self.endpoint, query.len());
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response.text()?;
        let parsed: Response = serde_json::from_str(&body)?;
        Ok(parsed.results.bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_response() {
        let body = r#"{
            "head": {"vars": ["lexemeID", "verb"]},
            "results": {"bindings": [
                {
                    "lexemeID": {"type": "literal", "value": "L1"},
                    "verb": {"type": "literal", "value": "olla", "xml:lang": "fi"}
                }
            ]}
        }"#;
        let r: Response = serde_json::from_str(body).unwrap();
        assert_eq!(r.results.bindings.len(), 1);
        let b = &r.results.bindings[0];
        assert_eq!(b["lexemeID"], Term::literal("L1"));
        assert_eq!(b["verb"].value, "olla");
        assert_eq!(b["verb"].lang.as_deref(), Some("fi"));
    }

    #[test]
    fn deserialize_empty_bindings() {
        let body = r#"{"head": {"vars": []}, "results": {"bindings": []}}"#;
        let r: Response = serde_json::from_str(body).unwrap();
        assert!(r.results.bindings.is_empty());
    }
}
