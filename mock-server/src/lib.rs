use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, RawQuery, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

/// Usernames with this prefix are treated as unknown accounts.
pub const INVALID_USERNAME_PREFIX: &str = "invalid";

pub const FORMATS: &[(&str, &str, &str)] = &[
    ("PO", "PO file", ".po"),
    ("KEYVALUEJSON", "JSON key-value file", ".json"),
    ("YML", "YAML file", ".yml"),
    ("INI", "Joomla INI file", ".ini"),
    ("PROPERTIES", "Java properties", ".properties"),
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    pub language_code: String,
    pub coordinators: Vec<String>,
    pub reviewers: Vec<String>,
    pub translators: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub slug: String,
    pub name: String,
    pub i18n_type: String,
    pub accept_translations: bool,
    pub category: Option<String>,
    pub priority: u8,
    #[serde(skip)]
    pub content: String,
}

#[derive(Deserialize)]
pub struct CreateLanguage {
    pub language_code: String,
    pub coordinators: Vec<String>,
    pub translators: Option<Vec<String>>,
    pub reviewers: Option<Vec<String>>,
    pub list: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateLanguage {
    pub coordinators: Vec<String>,
    pub translators: Option<Vec<String>>,
    pub reviewers: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct CreateResource {
    pub name: String,
    pub slug: String,
    pub i18n_type: String,
    pub content: String,
    pub accept_translations: Option<bool>,
    pub category: Option<String>,
    pub priority: Option<u8>,
}

#[derive(Deserialize)]
pub struct UpdateResource {
    pub name: Option<String>,
    pub accept_translations: Option<bool>,
    pub category: Option<String>,
    pub priority: Option<u8>,
}

#[derive(Deserialize, Serialize)]
pub struct Content {
    pub content: String,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Coordinators,
    Reviewers,
    Translators,
}

#[derive(Default)]
pub struct Project {
    pub languages: BTreeMap<String, Language>,
    pub resources: BTreeMap<String, Resource>,
}

pub type Db = Arc<RwLock<HashMap<String, Project>>>;

type ApiResult = Result<Response, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/2/formats", get(list_formats))
        .route(
            "/api/2/project/{project}/languages/",
            get(list_languages).post(create_language),
        )
        .route(
            "/api/2/project/{project}/language/{code}/",
            get(get_language).put(update_language).delete(delete_language),
        )
        .route(
            "/api/2/project/{project}/language/{code}/{team}/",
            get(get_team).put(update_team),
        )
        .route(
            "/api/2/project/{project}/resources/",
            get(list_resources).post(create_resource),
        )
        .route(
            "/api/2/project/{project}/resource/{resource}/",
            get(get_resource).put(update_resource).delete(delete_resource),
        )
        .route(
            "/api/2/project/{project}/resource/{resource}/content/",
            get(get_resource_content).put(update_resource_content),
        )
        .layer(middleware::from_fn(require_basic_auth))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    info!(addr = ?listener.local_addr().ok(), "mock Transifex API listening");
    axum::serve(listener, app()).await
}

async fn require_basic_auth(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Basic ") && value.len() > "Basic ".len());
    if !authorized {
        debug!(uri = %request.uri(), "rejecting request without credentials");
        return error(StatusCode::UNAUTHORIZED, "authorization required").into_response();
    }
    next.run(request).await
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn has_flag(query: &Option<String>, flag: &str) -> bool {
    query
        .as_deref()
        .is_some_and(|q| q.split('&').any(|part| part == flag))
}

/// Split usernames into known and unknown accounts.
fn partition_usernames(names: Vec<String>) -> (Vec<String>, Vec<String>) {
    names
        .into_iter()
        .partition(|name| !name.starts_with(INVALID_USERNAME_PREFIX))
}

/// Apply the `skip_invalid_username` rule to a set of usernames.
fn check_usernames(
    names: Vec<String>,
    skip_invalid: bool,
    invalid: &mut Vec<String>,
) -> Result<Vec<String>, (StatusCode, Json<Value>)> {
    let (valid, rejected) = partition_usernames(names);
    if !rejected.is_empty() && !skip_invalid {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "invalid usernames", "invalid_usernames": rejected })),
        ));
    }
    invalid.extend(rejected);
    Ok(valid)
}

async fn list_formats() -> Json<Value> {
    let formats: serde_json::Map<String, Value> = FORMATS
        .iter()
        .map(|(name, description, extension)| {
            (
                name.to_string(),
                json!({ "description": description, "file-extensions": extension }),
            )
        })
        .collect();
    Json(Value::Object(formats))
}

// --- languages ---

async fn list_languages(State(db): State<Db>, Path(project): Path<String>) -> Json<Vec<Language>> {
    let db = db.read().await;
    let languages = db
        .get(&project)
        .map(|p| p.languages.values().cloned().collect())
        .unwrap_or_default();
    Json(languages)
}

async fn create_language(
    State(db): State<Db>,
    Path(project): Path<String>,
    RawQuery(query): RawQuery,
    Json(input): Json<CreateLanguage>,
) -> ApiResult {
    if input.coordinators.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "coordinators must not be empty"));
    }
    let skip = has_flag(&query, "skip_invalid_username");
    let mut invalid = Vec::new();
    let coordinators = check_usernames(input.coordinators, skip, &mut invalid)?;
    let reviewers = check_usernames(input.reviewers.unwrap_or_default(), skip, &mut invalid)?;
    let translators = check_usernames(input.translators.unwrap_or_default(), skip, &mut invalid)?;

    let mut db = db.write().await;
    let project = db.entry(project).or_default();
    if project.languages.contains_key(&input.language_code) {
        return Err(error(StatusCode::CONFLICT, "language already exists"));
    }
    let language = Language {
        language_code: input.language_code,
        coordinators,
        reviewers,
        translators,
        list: input.list,
    };
    project
        .languages
        .insert(language.language_code.clone(), language.clone());

    let mut body = serde_json::to_value(&language).unwrap_or_default();
    if skip {
        body["invalid_usernames"] = json!(invalid);
    }
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

async fn get_language(
    State(db): State<Db>,
    Path((project, code)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> ApiResult {
    let db = db.read().await;
    let project = db
        .get(&project)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "project not found"))?;
    let language = project
        .languages
        .get(&code)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "language not found"))?;

    let mut body = serde_json::to_value(language).unwrap_or_default();
    if has_flag(&query, "details") {
        let total: usize = project
            .resources
            .values()
            .map(|r| r.content.lines().filter(|l| !l.trim().is_empty()).count())
            .sum();
        body["total_segments"] = json!(total);
        body["translated_segments"] = json!(0);
    }
    Ok(Json(body).into_response())
}

async fn update_language(
    State(db): State<Db>,
    Path((project, code)): Path<(String, String)>,
    Json(input): Json<UpdateLanguage>,
) -> ApiResult {
    if input.coordinators.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "coordinators must not be empty"));
    }
    let mut db = db.write().await;
    let language = db
        .get_mut(&project)
        .and_then(|p| p.languages.get_mut(&code))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "language not found"))?;
    language.coordinators = input.coordinators;
    if let Some(reviewers) = input.reviewers {
        language.reviewers = reviewers;
    }
    if let Some(translators) = input.translators {
        language.translators = translators;
    }
    Ok(Json(language.clone()).into_response())
}

async fn delete_language(
    State(db): State<Db>,
    Path((project, code)): Path<(String, String)>,
) -> ApiResult {
    let mut db = db.write().await;
    db.get_mut(&project)
        .and_then(|p| p.languages.remove(&code))
        .map(|_| StatusCode::NO_CONTENT.into_response())
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "language not found"))
}

async fn get_team(
    State(db): State<Db>,
    Path((project, code, team)): Path<(String, String, Team)>,
) -> ApiResult {
    let db = db.read().await;
    let language = db
        .get(&project)
        .and_then(|p| p.languages.get(&code))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "language not found"))?;
    let members = match team {
        Team::Coordinators => &language.coordinators,
        Team::Reviewers => &language.reviewers,
        Team::Translators => &language.translators,
    };
    Ok(Json(members.clone()).into_response())
}

async fn update_team(
    State(db): State<Db>,
    Path((project, code, team)): Path<(String, String, Team)>,
    RawQuery(query): RawQuery,
    Json(members): Json<Vec<String>>,
) -> ApiResult {
    if members.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "team must not be empty"));
    }
    let mut invalid = Vec::new();
    let members = check_usernames(members, has_flag(&query, "skip_invalid_username"), &mut invalid)?;

    let mut db = db.write().await;
    let language = db
        .get_mut(&project)
        .and_then(|p| p.languages.get_mut(&code))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "language not found"))?;
    let slot = match team {
        Team::Coordinators => &mut language.coordinators,
        Team::Reviewers => &mut language.reviewers,
        Team::Translators => &mut language.translators,
    };
    *slot = members;
    Ok(Json(json!({ "members": slot, "invalid_usernames": invalid })).into_response())
}

// --- resources ---

async fn list_resources(State(db): State<Db>, Path(project): Path<String>) -> Json<Vec<Resource>> {
    let db = db.read().await;
    let resources = db
        .get(&project)
        .map(|p| p.resources.values().cloned().collect())
        .unwrap_or_default();
    Json(resources)
}

async fn create_resource(
    State(db): State<Db>,
    Path(project): Path<String>,
    Json(input): Json<CreateResource>,
) -> ApiResult {
    if !FORMATS.iter().any(|(name, _, _)| *name == input.i18n_type) {
        return Err(error(StatusCode::BAD_REQUEST, "unsupported i18n_type"));
    }
    let mut db = db.write().await;
    let project = db.entry(project).or_default();
    if project.resources.contains_key(&input.slug) {
        return Err(error(StatusCode::CONFLICT, "resource already exists"));
    }
    let resource = Resource {
        slug: input.slug,
        name: input.name,
        i18n_type: input.i18n_type,
        accept_translations: input.accept_translations.unwrap_or(true),
        category: input.category,
        priority: input.priority.unwrap_or(0),
        content: input.content,
    };
    project
        .resources
        .insert(resource.slug.clone(), resource.clone());
    Ok((StatusCode::CREATED, Json(resource)).into_response())
}

async fn get_resource(
    State(db): State<Db>,
    Path((project, slug)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> ApiResult {
    let db = db.read().await;
    let resource = db
        .get(&project)
        .and_then(|p| p.resources.get(&slug))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "resource not found"))?;
    let mut body = serde_json::to_value(resource).unwrap_or_default();
    if has_flag(&query, "details") {
        body["total_entities"] = json!(resource.content.lines().filter(|l| !l.trim().is_empty()).count());
    }
    Ok(Json(body).into_response())
}

async fn update_resource(
    State(db): State<Db>,
    Path((project, slug)): Path<(String, String)>,
    Json(input): Json<UpdateResource>,
) -> ApiResult {
    let mut db = db.write().await;
    let resource = db
        .get_mut(&project)
        .and_then(|p| p.resources.get_mut(&slug))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "resource not found"))?;
    if let Some(name) = input.name {
        resource.name = name;
    }
    if let Some(accept) = input.accept_translations {
        resource.accept_translations = accept;
    }
    if let Some(category) = input.category {
        resource.category = Some(category);
    }
    if let Some(priority) = input.priority {
        resource.priority = priority;
    }
    Ok(Json(resource.clone()).into_response())
}

async fn delete_resource(
    State(db): State<Db>,
    Path((project, slug)): Path<(String, String)>,
) -> ApiResult {
    let mut db = db.write().await;
    db.get_mut(&project)
        .and_then(|p| p.resources.remove(&slug))
        .map(|_| StatusCode::NO_CONTENT.into_response())
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "resource not found"))
}

async fn get_resource_content(
    State(db): State<Db>,
    Path((project, slug)): Path<(String, String)>,
) -> ApiResult {
    let db = db.read().await;
    let resource = db
        .get(&project)
        .and_then(|p| p.resources.get(&slug))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "resource not found"))?;
    Ok(Json(Content {
        content: resource.content.clone(),
    })
    .into_response())
}

async fn update_resource_content(
    State(db): State<Db>,
    Path((project, slug)): Path<(String, String)>,
    Json(input): Json<Content>,
) -> ApiResult {
    let mut db = db.write().await;
    let resource = db
        .get_mut(&project)
        .and_then(|p| p.resources.get_mut(&slug))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "resource not found"))?;
    let added = input.content.lines().filter(|l| !l.trim().is_empty()).count();
    resource.content = input.content;
    Ok(Json(json!({ "strings_added": added })).into_response())
}
