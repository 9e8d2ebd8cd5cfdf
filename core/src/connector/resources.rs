//! Resources (source files) of a project and their content.
//!
//! See <https://docs.transifex.com/api/resources>.

use std::sync::Arc;

use tracing::warn;

use crate::config::Options;
use crate::error::{ApiError, TransifexError};
use crate::http::{HttpMethod, HttpResponse, Transport};
use crate::request::{segment, DETAILS};
use crate::types::{ContentBody, ContentSource, CreateResourceBody, NewResource, ResourceUpdate};

use super::ConnectorCore;

#[derive(Debug, Clone)]
pub struct Resources {
    core: ConnectorCore,
}

impl Resources {
    pub fn new(transport: Arc<dyn Transport>, options: &Options) -> Result<Self, TransifexError> {
        Ok(Self {
            core: ConnectorCore::new(transport, options)?,
        })
    }

    /// Create a resource, uploading its initial content.
    ///
    /// A `ContentSource::File` must point at an existing file; it is read
    /// before the request is built.
    pub fn create_resource(&self, project: &str, resource: &NewResource) -> Result<HttpResponse, ApiError> {
        let body = CreateResourceBody {
            name: &resource.name,
            slug: &resource.slug,
            i18n_type: &resource.i18n_type,
            content: resource.content.load()?,
            options: &resource.options,
        };
        let uri = self.core.uri(&resources_path(project));
        let request = self.core.request(HttpMethod::Post, &uri).with_json(&body)?;
        self.core.send(request)
    }

    pub fn delete_resource(&self, project: &str, resource: &str) -> Result<HttpResponse, ApiError> {
        let uri = self.core.uri(&resource_path(project, resource));
        self.core.send(self.core.request(HttpMethod::Delete, &uri))
    }

    pub fn get_resource(&self, project: &str, resource: &str, details: bool) -> Result<HttpResponse, ApiError> {
        let uri = self
            .core
            .uri(&resource_path(project, resource))
            .with_query_if(details, DETAILS);
        self.core.get(&uri)
    }

    pub fn get_resource_content(&self, project: &str, resource: &str) -> Result<HttpResponse, ApiError> {
        self.core.get(&self.core.uri(&content_path(project, resource)))
    }

    pub fn get_resources(&self, project: &str) -> Result<HttpResponse, ApiError> {
        self.core.get(&self.core.uri(&resources_path(project)))
    }

    /// Change resource attributes. Only the fields set in `update` are sent.
    pub fn update_resource(
        &self,
        project: &str,
        resource: &str,
        update: &ResourceUpdate,
    ) -> Result<HttpResponse, ApiError> {
        if update.is_empty() {
            warn!(project, resource, "rejected resource update without fields");
            return Err(TransifexError::InvalidConfiguration(
                "a resource update must set at least one field".to_string(),
            )
            .into());
        }

        let uri = self.core.uri(&resource_path(project, resource));
        let request = self.core.request(HttpMethod::Put, &uri).with_json(update)?;
        self.core.send(request)
    }

    /// Replace the source content of a resource.
    pub fn update_resource_content(
        &self,
        project: &str,
        resource: &str,
        content: &ContentSource,
    ) -> Result<HttpResponse, ApiError> {
        let body = ContentBody {
            content: content.load()?,
        };
        let uri = self.core.uri(&content_path(project, resource));
        let request = self.core.request(HttpMethod::Put, &uri).with_json(&body)?;
        self.core.send(request)
    }
}

fn resources_path(project: &str) -> String {
    format!("/api/2/project/{}/resources/", segment(project))
}

fn resource_path(project: &str, resource: &str) -> String {
    format!("/api/2/project/{}/resource/{}/", segment(project), segment(resource))
}

fn content_path(project: &str, resource: &str) -> String {
    format!("{}content/", resource_path(project, resource))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::super::testing::*;
    use super::*;
    use crate::http::{APPLICATION_JSON, CONTENT_TYPE};
    use crate::types::ResourceOptions;

    fn resources() -> (Arc<RecordingTransport>, Resources) {
        let (transport, core) = core();
        (transport, Resources { core })
    }

    fn new_resource(content: ContentSource) -> NewResource {
        NewResource {
            name: "Messages".to_string(),
            slug: "messages".to_string(),
            i18n_type: "PO".to_string(),
            content,
            options: ResourceOptions::default(),
        }
    }

    #[test]
    fn create_resource_with_inline_content() {
        let (transport, resources) = resources();
        let mut resource = new_resource(ContentSource::Text("msgid \"hi\"".to_string()));
        resource.options.category = Some("core".to_string());
        resources.create_resource("demo", &resource).unwrap();

        let req = &transport.taken()[0];
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.uri, format!("{BASE_URI}/api/2/project/demo/resources/"));
        assert_eq!(req.header(CONTENT_TYPE), Some(APPLICATION_JSON));
        assert_eq!(
            body_json(req),
            serde_json::json!({
                "name": "Messages",
                "slug": "messages",
                "i18n_type": "PO",
                "content": "msgid \"hi\"",
                "category": "core"
            })
        );
    }

    #[test]
    fn create_resource_reads_file_content() {
        let (transport, resources) = resources();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "greeting=Hello").unwrap();

        resources
            .create_resource("demo", &new_resource(ContentSource::file(file.path())))
            .unwrap();

        let body = body_json(&transport.taken()[0]);
        assert_eq!(body["content"], "greeting=Hello");
    }

    #[test]
    fn create_resource_with_missing_file_sends_nothing() {
        let (transport, resources) = resources();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.po");

        let err = resources
            .create_resource("demo", &new_resource(ContentSource::file(&missing)))
            .unwrap_err();
        assert_eq!(err.as_transifex(), Some(&TransifexError::MissingFile(missing)));
        assert!(transport.taken().is_empty());
    }

    #[test]
    fn update_resource_content_puts_content_body() {
        let (transport, resources) = resources();
        resources
            .update_resource_content("demo", "messages", &ContentSource::Text("a=b".to_string()))
            .unwrap();

        let req = &transport.taken()[0];
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.uri, format!("{BASE_URI}/api/2/project/demo/resource/messages/content/"));
        assert_eq!(body_json(req), serde_json::json!({"content": "a=b"}));
    }

    #[test]
    fn update_resource_sends_present_fields_only() {
        let (transport, resources) = resources();
        let update = ResourceUpdate {
            name: Some("Strings".to_string()),
            options: ResourceOptions {
                accept_translations: Some(false),
                ..ResourceOptions::default()
            },
        };
        resources.update_resource("demo", "messages", &update).unwrap();

        let req = &transport.taken()[0];
        assert_eq!(req.uri, format!("{BASE_URI}/api/2/project/demo/resource/messages/"));
        assert_eq!(
            body_json(req),
            serde_json::json!({"name": "Strings", "accept_translations": false})
        );
    }

    #[test]
    fn update_resource_rejects_empty_update() {
        let (transport, resources) = resources();
        let err = resources
            .update_resource("demo", "messages", &ResourceUpdate::default())
            .unwrap_err();
        assert!(matches!(err.as_transifex(), Some(TransifexError::InvalidConfiguration(_))));
        assert!(transport.taken().is_empty());
    }

    #[test]
    fn reads_and_delete_have_no_body() {
        let (transport, resources) = resources();
        resources.get_resources("demo").unwrap();
        resources.get_resource("demo", "messages", true).unwrap();
        resources.get_resource_content("demo", "messages").unwrap();
        resources.delete_resource("demo", "messages").unwrap();

        let reqs = transport.taken();
        let summary: Vec<(HttpMethod, String)> = reqs.iter().map(|r| (r.method, r.uri.clone())).collect();
        assert_eq!(
            summary,
            vec![
                (HttpMethod::Get, format!("{BASE_URI}/api/2/project/demo/resources/")),
                (HttpMethod::Get, format!("{BASE_URI}/api/2/project/demo/resource/messages/?details")),
                (HttpMethod::Get, format!("{BASE_URI}/api/2/project/demo/resource/messages/content/")),
                (HttpMethod::Delete, format!("{BASE_URI}/api/2/project/demo/resource/messages/")),
            ]
        );
        assert!(reqs.iter().all(|r| r.body.is_none() && r.header(CONTENT_TYPE).is_none()));
    }
}
