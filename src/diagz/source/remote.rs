//! # Remote repository source
//!
//! Mirrors the local registry contract against a CMIS browser-binding
//! repository reached over HTTPS with OAuth2 client credentials.
//!
//! The repository has no notion of categories or version history, so all
//! metadata comes from the file name: `<id>_<name>_v<version>.svg`. Documents
//! whose name does not match are skipped without error.
//!
//! ## Limits
//!
//! Only the first page returned by the children listing is read. Repositories
//! with more documents than the server's default page size are truncated; the
//! listing request does not ask for more and no continuation is followed.
//!
//! ## Browse URL shapes
//!
//! Deployments configure the API URL either as the service root
//! (`https://host`) or as the repository browse root
//! (`https://host/browser/<repo>`). [`RemoteRepositorySource::build_url`]
//! accepts both by looking for `/browser/<repo>` in the configured URL. A
//! third shape that happens to contain that substring would be misread; there
//! is no versioned config format to disambiguate it.

use super::auth::{ClientCredentials, TokenCache};
use crate::clock::{Clock, SystemClock};
use crate::config::RemoteConfig;
use crate::error::{GalleryError, Result};
use crate::http::{HttpClient, HttpRequest};
use crate::model::{sort_by_id, Diagram, ACTIVE_STATUS, DEFAULT_CATEGORY};
use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::cell::RefCell;
use tracing::{debug, warn};

pub const SUPPORTED_EXTENSION: &str = ".svg";

const CHILDREN_ENDPOINT: &str = "/root?cmisselector=children&succinct=true";

static FILENAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)_(.+?)_v([0-9]+)\.svg$").expect("filename pattern is valid")
});

/// Objects stay raw so one malformed entry only loses itself.
#[derive(Debug, Clone, Deserialize)]
struct ChildrenResponse {
    #[serde(default)]
    objects: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    pub succinct_properties: SuccinctProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SuccinctProperties {
    #[serde(rename = "cmis:objectId", default)]
    pub object_id: String,
    #[serde(rename = "cmis:name", default)]
    pub name: String,
    #[serde(rename = "cmis:contentStreamMimeType", default)]
    pub mime_type: Option<String>,
    #[serde(rename = "cmis:contentStreamLength", default)]
    pub content_length: Option<u64>,
    /// Milliseconds since the epoch.
    #[serde(rename = "cmis:creationDate", default)]
    pub creation_date: Option<i64>,
    #[serde(rename = "cmis:lastModificationDate", default)]
    pub last_modification_date: Option<i64>,
}

impl RemoteDocument {
    pub fn name(&self) -> &str {
        &self.succinct_properties.name
    }

    pub fn object_id(&self) -> &str {
        &self.succinct_properties.object_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub id: String,
    pub name: String,
    pub version: String,
}

/// `"002_SAP Cloud_v19.svg"` -> id "002", name "SAP Cloud", version "v19".
pub fn parse_filename(filename: &str) -> Option<ParsedFilename> {
    let caps = FILENAME_PATTERN.captures(filename)?;
    Some(ParsedFilename {
        id: caps[1].to_string(),
        name: caps[2].to_string(),
        version: format!("v{}", &caps[3]),
    })
}

fn iso_millis(epoch_millis: Option<i64>) -> String {
    epoch_millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Build a diagram from a listed document, `None` when the name does not parse.
pub fn to_diagram(document: &RemoteDocument, image_url: String) -> Option<Diagram> {
    let props = &document.succinct_properties;
    let parsed = parse_filename(&props.name)?;

    Some(Diagram {
        id: parsed.id,
        name: parsed.name,
        original_name: props.name.clone(),
        drawio_file: None,
        current_version: parsed.version.clone(),
        current_png_file: props.name.clone(),
        category: DEFAULT_CATEGORY.to_string(),
        created: iso_millis(props.creation_date),
        last_modified: iso_millis(props.last_modification_date),
        versions: vec![parsed.version],
        status: ACTIVE_STATUS.to_string(),
        description: None,
        version_urls: None,
        image_url: Some(image_url),
    })
}

pub struct RemoteRepositorySource {
    config: RemoteConfig,
    tokens: RefCell<TokenCache>,
}

impl RemoteRepositorySource {
    pub fn new(config: RemoteConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: RemoteConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            tokens: RefCell::new(TokenCache::new(clock)),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn credentials(&self) -> ClientCredentials {
        ClientCredentials {
            token_url: self.config.token_url().to_string(),
            client_id: self.config.client_id().to_string(),
            client_secret: self.config.client_secret().to_string(),
        }
    }

    pub fn get_token<H: HttpClient + ?Sized>(&self, http: &H) -> Result<String> {
        self.tokens
            .borrow_mut()
            .get_token(http, &self.credentials())
    }

    pub fn build_url(&self, endpoint: &str) -> String {
        let base = self.config.api_url();
        let repo = self.config.repository_id();
        if base.contains(&format!("/browser/{}", repo)) {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/browser/{}{}", base, repo, endpoint)
        }
    }

    /// Direct content URL; the token travels as a query parameter so the URL
    /// works without headers until the token expires.
    pub fn content_url(&self, object_id: &str, token: &str) -> String {
        self.build_url(&format!(
            "/root?objectId={}&cmisselector=content&download=inline&access_token={}",
            urlencoding::encode(object_id),
            urlencoding::encode(token)
        ))
    }

    pub fn list_documents<H: HttpClient + ?Sized>(&self, http: &H) -> Result<Vec<RemoteDocument>> {
        let token = self.get_token(http)?;
        self.list_documents_with(http, &token)
    }

    fn list_documents_with<H: HttpClient + ?Sized>(
        &self,
        http: &H,
        token: &str,
    ) -> Result<Vec<RemoteDocument>> {
        let url = self.build_url(CHILDREN_ENDPOINT);
        let request = HttpRequest::get(url.as_str())
            .header("Authorization", format!("Bearer {}", token))
            .header("Accept", "application/json");

        let response = http.execute(&request)?;
        if !response.is_success() {
            return Err(GalleryError::fetch(url, response.status_line()));
        }
        let listing: ChildrenResponse = serde_json::from_slice(&response.body)?;
        let documents: Vec<RemoteDocument> = listing
            .objects
            .into_iter()
            .filter_map(|object| match serde_json::from_value(object) {
                Ok(document) => Some(document),
                Err(e) => {
                    debug!(error = %e, "Skipping malformed repository object");
                    None
                }
            })
            .collect();
        Ok(documents)
    }

    /// Parseable `.svg` documents as diagrams, ascending by numeric id.
    ///
    /// An unconfigured source yields an empty list so callers can fall back to
    /// the local registry.
    pub fn list_diagrams<H: HttpClient + ?Sized>(&self, http: &H) -> Result<Vec<Diagram>> {
        if !self.is_configured() {
            warn!("Remote repository not configured, returning empty list");
            return Ok(Vec::new());
        }

        let token = self.get_token(http)?;
        let documents = self.list_documents_with(http, &token)?;

        let mut diagrams: Vec<Diagram> = documents
            .iter()
            .filter(|doc| doc.name().ends_with(SUPPORTED_EXTENSION))
            .filter_map(|doc| {
                let diagram = to_diagram(doc, self.content_url(doc.object_id(), &token));
                if diagram.is_none() {
                    debug!(name = doc.name(), "Skipping document with unrecognized name");
                }
                diagram
            })
            .collect();
        sort_by_id(&mut diagrams);
        Ok(diagrams)
    }
}
