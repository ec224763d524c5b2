//! Thin Salesforce client: SOAP login plus REST query and composite writes.

use crate::error::AppError;
use crate::model::{OneOrMany, QueryResponse, SaveResult};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Salesforce API version used for both the SOAP and REST endpoints.
pub const API_VERSION: &str = "62.0";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Authenticated handle: instance base URL plus session id. Request-scoped,
/// never pooled or cached.
#[derive(Debug, Clone)]
pub struct Session {
    pub instance_url: String,
    pub session_id: String,
}

pub struct SalesforceClient {
    http: reqwest::Client,
    login_url: String,
}

impl SalesforceClient {
    pub fn new(login_url: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            login_url: login_url.trim_end_matches('/').to_string(),
        })
    }

    /// SOAP `login()`. Yields the session every REST call authenticates with.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let endpoint = format!("{}/services/Soap/u/{}", self.login_url, API_VERSION);
        let response = self
            .http
            .post(&endpoint)
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", "login")
            .body(login_envelope(username, password))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let fault = extract_tag(&body, "faultstring").unwrap_or(body);
            tracing::error!(fault = %fault, "Salesforce login failed");
            return Err(AppError::Login(fault));
        }
        let session = parse_login_response(&body)?;
        tracing::info!(instance = %session.instance_url, "Salesforce login successful");
        Ok(session)
    }

    /// Execute a read-only SOQL query.
    pub async fn query<T: DeserializeOwned>(
        &self,
        session: &Session,
        soql: &str,
    ) -> Result<QueryResponse<T>, AppError> {
        let url = format!(
            "{}/services/data/v{}/query",
            session.instance_url, API_VERSION
        );
        let response = self
            .http
            .get(&url)
            .query(&[("q", soql)])
            .bearer_auth(&session.session_id)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Insert one or more records. A single record comes back as a
    /// one-element result vec.
    pub async fn create<T: Serialize>(
        &self,
        session: &Session,
        object: &str,
        records: impl Into<OneOrMany<T>>,
    ) -> Result<Vec<SaveResult>, AppError> {
        let payload = composite_payload(object, &records.into().into_vec())?;
        let response = self
            .http
            .post(composite_url(session))
            .bearer_auth(&session.session_id)
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Update one or more records; each must carry `Id`. Per-record failures
    /// land in the result vec, not in the error channel.
    pub async fn update<T: Serialize>(
        &self,
        session: &Session,
        object: &str,
        records: impl Into<OneOrMany<T>>,
    ) -> Result<Vec<SaveResult>, AppError> {
        let payload = composite_payload(object, &records.into().into_vec())?;
        let response = self
            .http
            .patch(composite_url(session))
            .bearer_auth(&session.session_id)
            .json(&payload)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Delete by id. A single id comes back as a one-element result vec.
    pub async fn delete(
        &self,
        session: &Session,
        object: &str,
        ids: impl Into<OneOrMany<String>>,
    ) -> Result<Vec<SaveResult>, AppError> {
        let ids = ids.into().into_vec();
        tracing::debug!(object, count = ids.len(), "deleting records");
        let response = self
            .http
            .delete(composite_url(session))
            .query(&[("ids", ids.join(",")), ("allOrNone", "false".into())])
            .bearer_auth(&session.session_id)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

fn composite_url(session: &Session) -> String {
    format!(
        "{}/services/data/v{}/composite/sobjects",
        session.instance_url, API_VERSION
    )
}

/// Composite sObjects body: records with the `attributes.type` envelope,
/// `allOrNone: false` so per-record failures come back in the results.
fn composite_payload<T: Serialize>(object: &str, records: &[T]) -> Result<Value, AppError> {
    let records = records
        .iter()
        .map(|record| {
            let mut value = serde_json::to_value(record)?;
            if let Value::Object(map) = &mut value {
                map.insert("attributes".into(), json!({ "type": object }));
            }
            Ok(value)
        })
        .collect::<Result<Vec<Value>, AppError>>()?;
    Ok(json!({ "allOrNone": false, "records": records }))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::error!(status = status.as_u16(), body = %body, "Salesforce request failed");
    Err(AppError::Remote {
        status: status.as_u16(),
        body,
    })
}

fn login_envelope(username: &str, password: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:urn="urn:partner.soap.sforce.com">
  <soapenv:Body>
    <urn:login>
      <urn:username>{}</urn:username>
      <urn:password>{}</urn:password>
    </urn:login>
  </soapenv:Body>
</soapenv:Envelope>"#,
        xml_escape(username),
        xml_escape(password)
    )
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// First text content of `tag`, tolerating a namespace prefix.
fn extract_tag(xml: &str, tag: &str) -> Option<String> {
    let pattern = format!(r"<(?:\w+:)?{tag}>([^<]*)</(?:\w+:)?{tag}>");
    let re = Regex::new(&pattern).ok()?;
    re.captures(xml).map(|captures| captures[1].to_string())
}

fn parse_login_response(xml: &str) -> Result<Session, AppError> {
    let session_id = extract_tag(xml, "sessionId")
        .ok_or_else(|| AppError::Login("login response missing sessionId".into()))?;
    let server_url = extract_tag(xml, "serverUrl")
        .ok_or_else(|| AppError::Login("login response missing serverUrl".into()))?;
    Ok(Session {
        instance_url: instance_base(&server_url)?,
        session_id,
    })
}

/// `serverUrl` points at the org's SOAP endpoint; the REST base is its
/// scheme, host, and port.
fn instance_base(server_url: &str) -> Result<String, AppError> {
    let url = reqwest::Url::parse(server_url)
        .map_err(|_| AppError::Login(format!("invalid serverUrl: {server_url}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| AppError::Login(format!("invalid serverUrl: {server_url}")))?;
    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <loginResponse>
      <result>
        <serverUrl>https://acme.my.salesforce.com/services/Soap/u/62.0/00Dxx0000001gPL</serverUrl>
        <sessionId>00Dxx0000001gPL!AQEAQI3zD</sessionId>
        <userId>005xx000001Sv6AAAS</userId>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#;

    #[test]
    fn login_response_yields_session() {
        let session = parse_login_response(LOGIN_RESPONSE).unwrap();
        assert_eq!(session.session_id, "00Dxx0000001gPL!AQEAQI3zD");
        assert_eq!(session.instance_url, "https://acme.my.salesforce.com");
    }

    #[test]
    fn instance_base_keeps_explicit_port() {
        let base = instance_base("http://127.0.0.1:8123/services/Soap/u/62.0/00Dxx").unwrap();
        assert_eq!(base, "http://127.0.0.1:8123");
    }

    #[test]
    fn login_response_without_session_id_is_an_error() {
        let err = parse_login_response("<result><serverUrl>x</serverUrl></result>").unwrap_err();
        assert!(err.to_string().contains("sessionId"));
    }

    #[test]
    fn fault_string_is_extracted_with_namespace_prefix() {
        let fault = r#"<soapenv:Fault><faultcode>INVALID_LOGIN</faultcode>
            <soapenv:faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</soapenv:faultstring></soapenv:Fault>"#;
        assert_eq!(
            extract_tag(fault, "faultstring").unwrap(),
            "INVALID_LOGIN: Invalid username, password, security token; or user locked out."
        );
    }

    #[test]
    fn login_envelope_escapes_credentials() {
        let envelope = login_envelope("a&b@example.com", "p<ss>word");
        assert!(envelope.contains("a&amp;b@example.com"));
        assert!(envelope.contains("p&lt;ss&gt;word"));
    }

    #[test]
    fn composite_payload_tags_each_record() {
        let payload = composite_payload(
            "Account",
            &[serde_json::json!({ "Name": "Acme" })],
        )
        .unwrap();
        assert_eq!(payload["allOrNone"], false);
        assert_eq!(payload["records"][0]["attributes"]["type"], "Account");
        assert_eq!(payload["records"][0]["Name"], "Acme");
    }
}
