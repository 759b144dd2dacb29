use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use schoolid_core::domain::{reason, AccountRecord, LookupQuery, LookupResult};

use crate::error::Result;
use crate::strategy::LookupStrategy;

const USER_AGENT: &str = concat!("schoolid/", env!("CARGO_PKG_VERSION"));

/// HTTP resolution against the configured lookup endpoint.
///
/// Wire contract: `GET <endpoint>?studentNo=<urlencoded>&name=<urlencoded>`
/// returning `{ "ok": bool, "id"?: string, "error"?: string }`. One request
/// per resolve, no retry. No explicit timeout is set; the transport default
/// applies.
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    endpoint: Option<String>,
    client: Client,
}

impl RemoteEndpoint {
    pub fn new(endpoint: Option<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { endpoint, client })
    }

    /// Checked before every request: absent, unparseable, non-https or
    /// host-less endpoints fail fast without touching the network.
    fn endpoint_url(&self) -> Option<Url> {
        let raw = self.endpoint.as_deref()?;
        let url = Url::parse(raw).ok()?;
        if url.scheme() != "https" || url.host_str().is_none() {
            return None;
        }
        Some(url)
    }

    fn fetch(&self, mut url: Url, query: &LookupQuery) -> std::result::Result<String, reqwest::Error> {
        url.query_pairs_mut()
            .append_pair("studentNo", &query.student_number)
            .append_pair("name", &query.name);
        self.client
            .get(url)
            .send()?
            .error_for_status()?
            .text()
    }
}

impl LookupStrategy for RemoteEndpoint {
    fn source_name(&self) -> &'static str {
        "remote"
    }

    fn resolve(&self, query: &LookupQuery) -> LookupResult {
        let url = match self.endpoint_url() {
            Some(url) => url,
            None => return LookupResult::invalid(reason::ENDPOINT_NOT_SET),
        };
        match self.fetch(url, query) {
            Ok(body) => decode_body(&body),
            Err(_) => LookupResult::transport(reason::NETWORK_ERROR),
        }
    }
}

/// Interprets a 2xx response body. Pure so the wire contract is testable
/// without a server.
pub fn decode_body(body: &str) -> LookupResult {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return LookupResult::transport(reason::BAD_FORMAT),
    };
    let Some(object) = value.as_object() else {
        return LookupResult::transport(reason::BAD_FORMAT);
    };
    match object.get("ok").and_then(Value::as_bool) {
        Some(true) => match object.get("id").and_then(Value::as_str) {
            Some(id) if !id.trim().is_empty() => LookupResult::Found(AccountRecord::new(id)),
            _ => LookupResult::transport(reason::EMPTY_ID),
        },
        Some(false) => match object.get("error").and_then(Value::as_str) {
            Some(code) if code == reason::NOT_FOUND => LookupResult::NotFound,
            Some(code) => LookupResult::transport(code),
            None => LookupResult::transport(reason::BAD_FORMAT),
        },
        None => LookupResult::transport(reason::BAD_FORMAT),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_body, RemoteEndpoint};
    use crate::strategy::LookupStrategy;
    use schoolid_core::domain::{reason, AccountRecord, LookupQuery, LookupResult};

    #[test]
    fn decodes_found() {
        assert_eq!(
            decode_body(r#"{"ok":true,"id":"s1@school.edu"}"#),
            LookupResult::Found(AccountRecord::new("s1@school.edu"))
        );
    }

    #[test]
    fn decodes_not_found() {
        assert_eq!(
            decode_body(r#"{"ok":false,"error":"NOT_FOUND"}"#),
            LookupResult::NotFound
        );
    }

    #[test]
    fn empty_id_is_a_transport_error() {
        assert_eq!(
            decode_body(r#"{"ok":true,"id":""}"#),
            LookupResult::transport(reason::EMPTY_ID)
        );
        assert_eq!(
            decode_body(r#"{"ok":true}"#),
            LookupResult::transport(reason::EMPTY_ID)
        );
    }

    #[test]
    fn server_error_codes_pass_through() {
        assert_eq!(
            decode_body(r#"{"ok":false,"error":"SHEET_UNAVAILABLE"}"#),
            LookupResult::transport("SHEET_UNAVAILABLE")
        );
    }

    #[test]
    fn non_object_bodies_are_bad_format() {
        for body in ["[]", "\"ok\"", "42", "not json at all", r#"{"ok":"yes"}"#] {
            assert_eq!(
                decode_body(body),
                LookupResult::transport(reason::BAD_FORMAT),
                "body: {body}"
            );
        }
        assert_eq!(
            decode_body(r#"{"ok":false}"#),
            LookupResult::transport(reason::BAD_FORMAT)
        );
    }

    #[test]
    fn missing_endpoint_fails_fast() {
        let strategy = RemoteEndpoint::new(None).expect("client");
        let query = LookupQuery::new("20301", "홍길동").expect("query");
        assert_eq!(
            strategy.resolve(&query),
            LookupResult::invalid(reason::ENDPOINT_NOT_SET)
        );
    }

    #[test]
    fn malformed_endpoint_fails_fast() {
        for endpoint in ["여기에_네_웹앱_URL", "http://insecure.example.com/exec", ""] {
            let strategy =
                RemoteEndpoint::new(Some(endpoint.to_string())).expect("client");
            let query = LookupQuery::new("20301", "홍길동").expect("query");
            assert_eq!(
                strategy.resolve(&query),
                LookupResult::invalid(reason::ENDPOINT_NOT_SET),
                "endpoint: {endpoint}"
            );
        }
    }
}
