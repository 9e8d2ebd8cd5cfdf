//! Verify request building against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector names a languages operation, its inputs, and either the
//! request it must produce or the validation error it must raise. Bodies are
//! compared as parsed JSON to avoid false negatives from formatting.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use transifex_core::{
    ApiError, ApiFactory, HttpMethod, HttpRequest, HttpResponse, LanguageOptions, Languages, Options, TeamRole,
    TransifexError, Transport, TransportError, UpdateLanguageOptions,
};

#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
}

impl Transport for RecordingTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        })
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn str_arg<'a>(input: &'a Value, key: &str) -> &'a str {
    input[key].as_str().unwrap_or_else(|| panic!("missing string input {key}"))
}

fn list_arg(input: &Value, key: &str) -> Vec<String> {
    serde_json::from_value(input[key].clone()).unwrap()
}

fn bool_arg(input: &Value, key: &str) -> bool {
    input[key].as_bool().unwrap_or(false)
}

fn run(languages: &Languages, operation: &str, input: &Value) -> Result<HttpResponse, ApiError> {
    let project = str_arg(input, "project");
    let lang_code = input["lang_code"].as_str().unwrap_or_default();
    match operation {
        "get_languages" => languages.get_languages(project),
        "get_language" => languages.get_language(project, lang_code, bool_arg(input, "details")),
        "delete_language" => languages.delete_language(project, lang_code),
        "create_language" => {
            let options: LanguageOptions = serde_json::from_value(input["options"].clone()).unwrap();
            languages.create_language(
                project,
                lang_code,
                &list_arg(input, "coordinators"),
                &options,
                bool_arg(input, "skip_invalid_username"),
            )
        }
        "update_language" => {
            let options: UpdateLanguageOptions = serde_json::from_value(input["options"].clone()).unwrap();
            languages.update_language(project, lang_code, &list_arg(input, "coordinators"), &options)
        }
        "get_team" => {
            let role: TeamRole = serde_json::from_value(input["role"].clone()).unwrap();
            match role {
                TeamRole::Coordinators => languages.get_coordinators(project, lang_code),
                TeamRole::Reviewers => languages.get_reviewers(project, lang_code),
                TeamRole::Translators => languages.get_translators(project, lang_code),
            }
        }
        "update_team" => {
            let role: TeamRole = serde_json::from_value(input["role"].clone()).unwrap();
            let members = list_arg(input, "members");
            let skip = bool_arg(input, "skip_invalid_username");
            match role {
                TeamRole::Coordinators => languages.update_coordinators(project, lang_code, &members, skip),
                TeamRole::Reviewers => languages.update_reviewers(project, lang_code, &members, skip),
                TeamRole::Translators => languages.update_translators(project, lang_code, &members, skip),
            }
        }
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn languages_test_vectors() {
    let raw = include_str!("../../test-vectors/languages.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let base_uri = vectors["base_uri"].as_str().unwrap();

    let transport = Arc::new(RecordingTransport::default());
    let factory = ApiFactory::new(transport.clone());
    let languages = factory
        .languages(&Options::new("alice", "secret").with_base_uri(base_uri))
        .unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = run(&languages, case["operation"].as_str().unwrap(), &case["input"]);
        let sent = std::mem::take(&mut *transport.requests.lock().unwrap());

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "InvalidConfiguration" => assert!(
                    matches!(err, ApiError::Transifex(TransifexError::InvalidConfiguration(_))),
                    "{name}: expected InvalidConfiguration"
                ),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            assert!(sent.is_empty(), "{name}: no request may be sent");
            continue;
        }

        result.unwrap();
        assert_eq!(sent.len(), 1, "{name}: exactly one request");
        let req = &sent[0];
        let expected_req = &case["expected_request"];

        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.uri, format!("{base_uri}{}", expected_req["path"].as_str().unwrap()), "{name}: uri");
        assert!(req.header("authorization").is_some(), "{name}: authorization header");

        match &expected_req["body"] {
            Value::Null => {
                assert!(req.body.is_none(), "{name}: body should be None");
                assert!(req.header("content-type").is_none(), "{name}: no content-type without body");
            }
            expected_body => {
                let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&body, expected_body, "{name}: body");
                assert_eq!(req.header("content-type"), Some("application/json"), "{name}: content-type");
            }
        }
    }
}
