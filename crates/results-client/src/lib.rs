//! HTTP client for the course results service.
//!
//! Wraps the three collaborator endpoints (roster, committed results, bulk
//! commit) using [`reqwest`]. The pipeline itself is synchronous, so the
//! blocking client is used; timeout and retry policy live here, not in the
//! import core.

#![deny(unsafe_code)]

use std::time::Duration;

use results_model::{AuthoritativeResult, BulkResultRecord, RosterEntry};
use results_staging::ResultSink;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Errors from the results service API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("api error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service accepted the request but reported the commit failed.
    #[error("bulk commit rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Serialize)]
struct BulkSubmitBody<'a> {
    results: &'a [BulkResultRecord],
}

/// Reply of the bulk commit endpoint.
#[derive(Debug, Deserialize)]
pub struct BulkSubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// HTTP client for a single results service instance.
pub struct ResultsApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ResultsApi {
    /// Create a client.
    ///
    /// * `base_url` - service root, e.g. `https://portal.example.edu/api`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the course roster.
    pub fn fetch_roster(&self, course_id: &str) -> Result<Vec<RosterEntry>, ClientError> {
        let url = format!("{}/course/{course_id}/students", self.base_url);
        debug!(%url, "fetching roster");
        let response = self.client.get(url).send()?;
        Self::parse_json(response)
    }

    /// Fetch the committed results for the course.
    pub fn fetch_results(&self, course_id: &str) -> Result<Vec<AuthoritativeResult>, ClientError> {
        let url = format!("{}/course/{course_id}/results", self.base_url);
        debug!(%url, "fetching committed results");
        let response = self.client.get(url).send()?;
        Self::parse_json(response)
    }

    /// Commit a batch of results in one call.
    ///
    /// A 2xx reply with `success: false` is a rejection, reported with the
    /// server's message.
    pub fn submit_bulk(
        &self,
        course_id: &str,
        records: &[BulkResultRecord],
    ) -> Result<(), ClientError> {
        let url = format!("{}/course/{course_id}/results/bulk", self.base_url);
        info!(%url, records = records.len(), "submitting bulk results");
        let response = self
            .client
            .post(url)
            .json(&BulkSubmitBody { results: records })
            .send()?;
        let reply: BulkSubmitResponse = Self::parse_json(response)?;
        if reply.success {
            Ok(())
        } else {
            Err(ClientError::Rejected(
                reply.message.unwrap_or_else(|| "no reason given".to_string()),
            ))
        }
    }

    fn parse_json<T: DeserializeOwned>(
        response: reqwest::blocking::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json()?)
    }
}

/// Adapts [`ResultsApi`] to the staging crate's commit collaborator trait
/// for one course.
pub struct CourseResultSink<'a> {
    api: &'a ResultsApi,
    course_id: &'a str,
}

impl<'a> CourseResultSink<'a> {
    pub fn new(api: &'a ResultsApi, course_id: &'a str) -> Self {
        Self { api, course_id }
    }
}

impl ResultSink for CourseResultSink<'_> {
    fn submit_bulk(&self, records: &[BulkResultRecord]) -> anyhow::Result<()> {
        self.api
            .submit_bulk(self.course_id, records)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use results_model::Grade;

    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api =
            ResultsApi::new("https://portal.example.edu/api/", Duration::from_secs(10)).unwrap();
        assert_eq!(api.base_url, "https://portal.example.edu/api");
    }

    #[test]
    fn bulk_body_wraps_records_in_results_key() {
        let records = vec![BulkResultRecord {
            matric_no: "CSC/001".to_string(),
            score: 72.0,
            grade: Grade::A,
            remark: String::new(),
            course_id: "CSC301".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
        }];
        let json = serde_json::to_value(BulkSubmitBody { results: &records }).unwrap();
        assert!(json.get("results").is_some());
        assert_eq!(json["results"][0]["matric_no"], "CSC/001");
        assert_eq!(json["results"][0]["grade"], "A");
    }

    #[test]
    fn bulk_reply_message_is_optional() {
        let ok: BulkSubmitResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.message, None);

        let rejected: BulkSubmitResponse =
            serde_json::from_str(r#"{"success": false, "message": "duplicate batch"}"#).unwrap();
        assert!(!rejected.success);
        assert_eq!(rejected.message.as_deref(), Some("duplicate batch"));
    }

    #[test]
    fn roster_reply_parses() {
        let json = r#"[
            {"student_id": "stu-1", "matric_no": "CSC/001", "name": "Jane Doe",
             "department": "Computer Science", "level": "300"}
        ]"#;
        let roster: Vec<RosterEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(roster[0].matric_no, "CSC/001");
    }

    #[test]
    fn committed_result_reply_parses_without_remark() {
        let json = r#"[
            {"student_id": "stu-1", "matric_no": "CSC/001", "score": 55.0,
             "grade": "C", "uploaded_at": "2026-01-15T09:00:00Z"}
        ]"#;
        let results: Vec<AuthoritativeResult> = serde_json::from_str(json).unwrap();
        assert_eq!(results[0].grade, Grade::C);
        assert_eq!(results[0].remark, None);
    }
}
