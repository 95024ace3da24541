//! Data source adapter: loads the member collection from a remote URL
//! (or a local JSON file) once at startup.

use crate::error::{Context, Result, simple_error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default endpoint serving the member records as a JSON array.
pub const DEFAULT_MEMBERS_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

/// One member record. `id` is the identity key and is assumed unique.
///
/// `is_editing` is UI-only state: it never appears in the source data and
/// is skipped during (de)serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip)]
    pub is_editing: bool,
}

pub struct MemberSource {
    pub url: String,
    pub data_file: Option<PathBuf>,
}

impl MemberSource {
    pub fn new(url: impl Into<String>, data_file: Option<PathBuf>) -> Self {
        Self {
            url: url.into(),
            data_file,
        }
    }

    /// Load the full member collection. Exactly one read per call: from the
    /// local file when one is configured, otherwise one HTTP GET.
    pub fn load(&self) -> Result<Vec<Member>> {
        if let Some(path) = &self.data_file {
            let text = fs::read_to_string(path)
                .with_ctx(|| format!("read members file {}", path.display()))?;
            return parse_members(&text);
        }

        let client = reqwest::blocking::Client::new();
        let response = client
            .get(&self.url)
            .send()
            .with_ctx(|| format!("GET {}", self.url))?;
        let status = response.status();
        if !status.is_success() {
            return Err(simple_error(format!(
                "GET {} returned status {}",
                self.url, status
            )));
        }
        let text = response
            .text()
            .with_ctx(|| format!("read body of {}", self.url))?;
        parse_members(&text)
    }
}

/// Parse a JSON array of member objects.
pub fn parse_members(text: &str) -> Result<Vec<Member>> {
    let members: Vec<Member> =
        serde_json::from_str(text).with_ctx(|| "parse members JSON".to_string())?;
    Ok(members)
}
