//! Language and language-team management within a project.
//!
//! See <https://docs.transifex.com/api/languages>.

use std::sync::Arc;

use crate::config::Options;
use crate::error::{ApiError, TransifexError};
use crate::http::{HttpMethod, HttpResponse, Transport};
use crate::request::{segment, DETAILS, SKIP_INVALID_USERNAME};
use crate::types::{CreateLanguageBody, LanguageOptions, TeamRole, UpdateLanguageBody, UpdateLanguageOptions};

use super::{require_members, ConnectorCore};

const COORDINATORS_REQUIRED: &str = "The coordinators array must contain at least one username.";
const MEMBERS_REQUIRED: &str = "The team array must contain at least one username.";

#[derive(Debug, Clone)]
pub struct Languages {
    core: ConnectorCore,
}

impl Languages {
    pub fn new(transport: Arc<dyn Transport>, options: &Options) -> Result<Self, TransifexError> {
        Ok(Self {
            core: ConnectorCore::new(transport, options)?,
        })
    }

    /// Add a language to a project.
    ///
    /// Only the fields set in `options` are sent. With
    /// `skip_invalid_username`, the API drops unknown usernames and lists
    /// them in its response instead of failing.
    pub fn create_language(
        &self,
        slug: &str,
        lang_code: &str,
        coordinators: &[String],
        options: &LanguageOptions,
        skip_invalid_username: bool,
    ) -> Result<HttpResponse, ApiError> {
        require_members(coordinators, COORDINATORS_REQUIRED)?;

        let uri = self
            .core
            .uri(&languages_path(slug))
            .with_query_if(skip_invalid_username, SKIP_INVALID_USERNAME);
        let body = CreateLanguageBody {
            language_code: lang_code,
            coordinators,
            options,
        };
        let request = self.core.request(HttpMethod::Post, &uri).with_json(&body)?;
        self.core.send(request)
    }

    pub fn delete_language(&self, project: &str, lang_code: &str) -> Result<HttpResponse, ApiError> {
        let uri = self.core.uri(&language_path(project, lang_code));
        self.core.send(self.core.request(HttpMethod::Delete, &uri))
    }

    /// Fetch one language of a project; `details` asks for extended statistics.
    pub fn get_language(&self, project: &str, lang_code: &str, details: bool) -> Result<HttpResponse, ApiError> {
        let uri = self
            .core
            .uri(&language_path(project, lang_code))
            .with_query_if(details, DETAILS);
        self.core.get(&uri)
    }

    pub fn get_languages(&self, project: &str) -> Result<HttpResponse, ApiError> {
        self.core.get(&self.core.uri(&languages_path(project)))
    }

    pub fn get_coordinators(&self, project: &str, lang_code: &str) -> Result<HttpResponse, ApiError> {
        self.get_team(project, lang_code, TeamRole::Coordinators)
    }

    pub fn get_reviewers(&self, project: &str, lang_code: &str) -> Result<HttpResponse, ApiError> {
        self.get_team(project, lang_code, TeamRole::Reviewers)
    }

    pub fn get_translators(&self, project: &str, lang_code: &str) -> Result<HttpResponse, ApiError> {
        self.get_team(project, lang_code, TeamRole::Translators)
    }

    /// Replace a language's coordinators and, when set, its reviewers and translators.
    pub fn update_language(
        &self,
        slug: &str,
        lang_code: &str,
        coordinators: &[String],
        options: &UpdateLanguageOptions,
    ) -> Result<HttpResponse, ApiError> {
        require_members(coordinators, COORDINATORS_REQUIRED)?;

        let uri = self.core.uri(&language_path(slug, lang_code));
        let body = UpdateLanguageBody { coordinators, options };
        let request = self.core.request(HttpMethod::Put, &uri).with_json(&body)?;
        self.core.send(request)
    }

    pub fn update_coordinators(
        &self,
        project: &str,
        lang_code: &str,
        coordinators: &[String],
        skip_invalid_username: bool,
    ) -> Result<HttpResponse, ApiError> {
        self.update_team(project, lang_code, coordinators, skip_invalid_username, TeamRole::Coordinators)
    }

    pub fn update_reviewers(
        &self,
        project: &str,
        lang_code: &str,
        reviewers: &[String],
        skip_invalid_username: bool,
    ) -> Result<HttpResponse, ApiError> {
        self.update_team(project, lang_code, reviewers, skip_invalid_username, TeamRole::Reviewers)
    }

    pub fn update_translators(
        &self,
        project: &str,
        lang_code: &str,
        translators: &[String],
        skip_invalid_username: bool,
    ) -> Result<HttpResponse, ApiError> {
        self.update_team(project, lang_code, translators, skip_invalid_username, TeamRole::Translators)
    }

    fn get_team(&self, project: &str, lang_code: &str, role: TeamRole) -> Result<HttpResponse, ApiError> {
        self.core.get(&self.core.uri(&team_path(project, lang_code, role)))
    }

    /// PUT the member list of one team as a bare JSON array.
    fn update_team(
        &self,
        project: &str,
        lang_code: &str,
        members: &[String],
        skip_invalid_username: bool,
        role: TeamRole,
    ) -> Result<HttpResponse, ApiError> {
        require_members(members, MEMBERS_REQUIRED)?;

        let uri = self
            .core
            .uri(&team_path(project, lang_code, role))
            .with_query_if(skip_invalid_username, SKIP_INVALID_USERNAME);
        let request = self.core.request(HttpMethod::Put, &uri).with_json(members)?;
        self.core.send(request)
    }
}

fn languages_path(project: &str) -> String {
    format!("/api/2/project/{}/languages/", segment(project))
}

fn language_path(project: &str, lang_code: &str) -> String {
    format!("/api/2/project/{}/language/{}/", segment(project), segment(lang_code))
}

fn team_path(project: &str, lang_code: &str, role: TeamRole) -> String {
    format!("{}{}/", language_path(project, lang_code), role.as_str())
}
