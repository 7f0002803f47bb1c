// src/utils/email.rs

//! Best-effort client for the external email services: existence
//! verification (hunter.io-style) and person enrichment
//! (clearbit-style). Both fail open: only an explicit "invalid"
//! verdict from the verifier blocks signup; every transport or parse
//! failure is logged and treated as unknown.

use serde_json::Value;

use crate::{config::Config, models::user::ExtraUserFields};

/// Verdict of the external email-verifier API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailVerdict {
    Valid,
    Invalid,
    /// Verifier unreachable, errored, or not configured.
    Unknown,
}

#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    verifier_url: String,
    verifier_api_key: Option<String>,
    enrichment_url: String,
    enrichment_api_key: Option<String>,
}

impl EmailClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            verifier_url: config.email_verifier_url.clone(),
            verifier_api_key: config.email_verifier_api_key.clone(),
            enrichment_url: config.enrichment_url.clone(),
            enrichment_api_key: config.enrichment_api_key.clone(),
        }
    }

    /// Checks whether the email address exists.
    ///
    /// Never returns an error: the verifier is outside the
    /// transactional core and must not block signup when unreachable.
    pub async fn verify(&self, email: &str) -> EmailVerdict {
        let Some(api_key) = &self.verifier_api_key else {
            return EmailVerdict::Unknown;
        };

        let response = self
            .http
            .get(&self.verifier_url)
            .query(&[("email", email), ("api_key", api_key.as_str())])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error when accessing the email verifier API: {}", e);
                return EmailVerdict::Unknown;
            }
        };

        if !response.status().is_success() {
            tracing::error!(
                "Email verifier API returned an error status: {}",
                response.status()
            );
            return EmailVerdict::Unknown;
        }

        match response.json::<Value>().await {
            Ok(body) => parse_verdict(&body),
            Err(e) => {
                tracing::error!("Failed to parse email verifier response: {}", e);
                EmailVerdict::Unknown
            }
        }
    }

    /// Fetches name/surname for the email. Any failure yields `None`.
    pub async fn enrich(&self, email: &str) -> Option<ExtraUserFields> {
        let api_key = self.enrichment_api_key.as_ref()?;

        let response = self
            .http
            .get(&self.enrichment_url)
            .query(&[("email", email)])
            .header("Authorization", api_key.as_str())
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error when accessing the enrichment API: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::error!(
                "Enrichment API returned an error status: {}",
                response.status()
            );
            return None;
        }

        match response.json::<Value>().await {
            Ok(body) => parse_person(&body),
            Err(e) => {
                tracing::error!("Failed to parse enrichment response: {}", e);
                None
            }
        }
    }
}

/// Maps the verifier response body to a verdict.
/// Only `data.status == "invalid"` counts as invalid.
fn parse_verdict(body: &Value) -> EmailVerdict {
    match body["data"]["status"].as_str() {
        Some("invalid") => EmailVerdict::Invalid,
        Some(_) => EmailVerdict::Valid,
        None => {
            tracing::error!("Unexpected email verifier response shape: {}", body);
            EmailVerdict::Unknown
        }
    }
}

/// Extracts name/surname from the person API response.
fn parse_person(body: &Value) -> Option<ExtraUserFields> {
    let name = body["name"]["givenName"].as_str()?;
    let surname = body["name"]["familyName"].as_str()?;
    Some(ExtraUserFields {
        name: name.to_string(),
        surname: surname.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalid_status_blocks() {
        let body = json!({"data": {"status": "invalid"}});
        assert_eq!(parse_verdict(&body), EmailVerdict::Invalid);
    }

    #[test]
    fn any_other_status_allows() {
        for status in ["valid", "accept_all", "webmail", "unknown"] {
            let body = json!({"data": {"status": status}});
            assert_eq!(parse_verdict(&body), EmailVerdict::Valid);
        }
    }

    #[test]
    fn malformed_body_is_unknown() {
        assert_eq!(parse_verdict(&json!({"errors": []})), EmailVerdict::Unknown);
    }

    #[test]
    fn person_fields_are_extracted() {
        let body = json!({"name": {"givenName": "Ada", "familyName": "Lovelace"}});
        assert_eq!(
            parse_person(&body),
            Some(ExtraUserFields {
                name: "Ada".to_string(),
                surname: "Lovelace".to_string(),
            })
        );
    }

    #[test]
    fn partial_person_data_yields_none() {
        let body = json!({"name": {"givenName": "Ada"}});
        assert_eq!(parse_person(&body), None);
    }
}
