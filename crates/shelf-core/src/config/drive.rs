//! Drive scope and listing service configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How the configured drive identifiers are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriveType {
    /// A single shared (team) drive, listed in one paginated query.
    #[default]
    Team,
    /// Every team drive visible to the account, grouped under one
    /// virtual organisation root.
    Org,
    /// A plain shared folder whose subfolders must be expanded one level
    /// at a time.
    Folder,
}

impl fmt::Display for DriveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team => write!(f, "team"),
            Self::Org => write!(f, "org"),
            Self::Folder => write!(f, "folder"),
        }
    }
}

impl FromStr for DriveType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "team" => Ok(Self::Team),
            "org" => Ok(Self::Org),
            "folder" => Ok(Self::Folder),
            other => Err(AppError::configuration(format!(
                "Unknown drive type: '{other}'. Supported: team, org, folder"
            ))),
        }
    }
}

/// Which listing service implementation backs the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceProvider {
    /// The Drive v3 REST API.
    #[default]
    Google,
    /// A JSON fixture served from memory.
    Fixture,
}

/// Drive scope and listing service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Scope mode: `"team"`, `"org"`, or `"folder"`.
    #[serde(default)]
    pub drive_type: DriveType,
    /// Team drive or shared folder ID (team and folder modes).
    #[serde(default)]
    pub drive_id: Option<String>,
    /// Name of the virtual organisation root (org mode).
    #[serde(default)]
    pub org_name: Option<String>,
    /// Listing service implementation.
    #[serde(default)]
    pub provider: SourceProvider,
    /// Base URL of the Drive REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Base URL of the Sheets REST API (used for playlists).
    #[serde(default = "default_sheets_base_url")]
    pub sheets_base_url: String,
    /// OAuth bearer token presented to the REST APIs.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Path to the JSON fixture (fixture provider).
    #[serde(default)]
    pub fixture_path: Option<String>,
    /// Page size requested from the listing service.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            drive_type: DriveType::default(),
            drive_id: None,
            org_name: None,
            provider: SourceProvider::default(),
            api_base_url: default_api_base_url(),
            sheets_base_url: default_sheets_base_url(),
            access_token: None,
            fixture_path: None,
            page_size: default_page_size(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl DriveConfig {
    /// The configured drive ID, or a configuration error if it is missing.
    pub fn require_drive_id(&self) -> Result<&str, AppError> {
        self.drive_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                AppError::configuration(format!("drive.drive_id is required in {} mode", self.drive_type))
            })
    }

    /// The configured organisation name, or a configuration error if it is missing.
    pub fn require_org_name(&self) -> Result<&str, AppError> {
        self.org_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::configuration("drive.org_name is required in org mode"))
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        match self.drive_type {
            DriveType::Team | DriveType::Folder => {
                self.require_drive_id()?;
            }
            DriveType::Org => {
                self.require_org_name()?;
            }
        }

        match self.provider {
            SourceProvider::Google if self.access_token.is_none() => Err(
                AppError::configuration("drive.access_token is required for the google provider"),
            ),
            SourceProvider::Fixture if self.fixture_path.is_none() => Err(
                AppError::configuration("drive.fixture_path is required for the fixture provider"),
            ),
            _ => Ok(()),
        }
    }
}

fn default_api_base_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_page_size() -> u32 {
    1000
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_type_parse() {
        assert_eq!("ORG".parse::<DriveType>().unwrap(), DriveType::Org);
        assert_eq!(" folder ".parse::<DriveType>().unwrap(), DriveType::Folder);
        assert!("shared".parse::<DriveType>().is_err());
    }

    #[test]
    fn test_org_requires_name() {
        let config = DriveConfig {
            drive_type: DriveType::Org,
            provider: SourceProvider::Fixture,
            fixture_path: Some("library.json".into()),
            ..DriveConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DriveConfig {
            org_name: Some("newsroom".into()),
            ..config
        };
        assert!(config.validate().is_ok());
    }
}
