//! Request payloads and option structs for the Transifex API.
//!
//! # Design
//! Optional fields are `Option<T>` with `skip_serializing_if`, so an absent
//! option never reaches the wire while `Some(vec![])` is sent as an explicit
//! empty array. The API treats "not provided" and "empty" differently.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, TransifexError};

/// A named group of users attached to a language within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Coordinators,
    Reviewers,
    Translators,
}

impl TeamRole {
    pub const ALL: [TeamRole; 3] = [TeamRole::Coordinators, TeamRole::Reviewers, TeamRole::Translators];

    /// Path segment used under `.../language/{code}/`.
    pub fn as_str(self) -> &'static str {
        match self {
            TeamRole::Coordinators => "coordinators",
            TeamRole::Reviewers => "reviewers",
            TeamRole::Translators => "translators",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional fields accepted when creating a language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translators: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<String>>,
    /// Mailing list address for the language team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
}

/// Optional fields accepted when updating a language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLanguageOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translators: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateLanguageBody<'a> {
    pub language_code: &'a str,
    pub coordinators: &'a [String],
    #[serde(flatten)]
    pub options: &'a LanguageOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateLanguageBody<'a> {
    pub coordinators: &'a [String],
    #[serde(flatten)]
    pub options: &'a UpdateLanguageOptions,
}

/// Where resource content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// The content itself.
    Text(String),
    /// A local file whose contents are uploaded. A path that does not exist
    /// is `MissingFile`; one that exists but cannot be read as text (a
    /// directory, say) is `ApiError::Io`.
    File(PathBuf),
}

impl ContentSource {
    /// Build from the API's `string` / `file` vocabulary. For `file`, `value`
    /// is a path.
    pub fn from_parts(kind: &str, value: impl Into<String>) -> Result<Self, TransifexError> {
        match kind {
            "string" => Ok(ContentSource::Text(value.into())),
            "file" => Ok(ContentSource::File(PathBuf::from(value.into()))),
            other => Err(TransifexError::InvalidFileType(format!(
                "the content type must be specified as file or string, got \"{other}\""
            ))),
        }
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        ContentSource::File(path.as_ref().to_path_buf())
    }

    /// Resolve to the content string, reading the file if needed.
    pub(crate) fn load(&self) -> Result<String, ApiError> {
        match self {
            ContentSource::Text(text) => Ok(text.clone()),
            ContentSource::File(path) => {
                if !path.exists() {
                    return Err(TransifexError::MissingFile(path.clone()).into());
                }
                std::fs::read_to_string(path).map_err(|e| ApiError::Io {
                    path: path.clone(),
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Optional resource attributes shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_translations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl ResourceOptions {
    fn is_empty(&self) -> bool {
        self.accept_translations.is_none() && self.category.is_none() && self.priority.is_none()
    }
}

/// A resource to create in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    pub name: String,
    pub slug: String,
    /// File format identifier, e.g. `PO` or `KEYVALUEJSON`.
    pub i18n_type: String,
    pub content: ContentSource,
    pub options: ResourceOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateResourceBody<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub i18n_type: &'a str,
    pub content: String,
    #[serde(flatten)]
    pub options: &'a ResourceOptions,
}

/// Attributes to change on an existing resource. At least one must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub options: ResourceOptions,
}

impl ResourceUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.options.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ContentBody {
    pub content: String,
}
