use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::ApiError;
use crate::config::CoreConfig;
use crate::constants::paths;
use crate::models::{CheckIn, CheckInRequest, Habit, InterviewEntry, NewInterviewEntry, TodaySummary};

/// Request/response client for the dashboard API.
///
/// No retries and no caching: every call goes to the server and either
/// decodes the body or fails with the server's error message.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: CoreConfig,
}

impl ApiClient {
    pub fn new(config: CoreConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    // habits

    pub async fn list_habits(&self) -> Result<Vec<Habit>, ApiError> {
        self.get(paths::HABITS, &[]).await
    }

    pub async fn create_habit(&self, name: &str) -> Result<Value, ApiError> {
        self.send(
            Method::POST,
            paths::HABITS,
            &serde_json::json!({ "name": name }),
        )
        .await
    }

    pub async fn set_habit_active(&self, id: &str, active: bool) -> Result<Value, ApiError> {
        let path = format!("{}/{}", paths::HABITS, id);
        self.send(
            Method::PATCH,
            &path,
            &serde_json::json!({ "active": active }),
        )
        .await
    }

    // check-ins

    pub async fn upsert_check_in(&self, request: &CheckInRequest) -> Result<Value, ApiError> {
        self.send(Method::POST, paths::CHECKINS, request).await
    }

    pub async fn list_check_ins(&self, date: &str) -> Result<Vec<CheckIn>, ApiError> {
        self.get(paths::CHECKINS, &[("date", date)]).await
    }

    // summary

    pub async fn summary_today(&self) -> Result<TodaySummary, ApiError> {
        self.get(paths::SUMMARY_TODAY, &[]).await
    }

    // interview

    pub async fn add_interview(&self, entry: &NewInterviewEntry) -> Result<Value, ApiError> {
        self.send(Method::POST, paths::INTERVIEW_ENTRIES, entry).await
    }

    /// An empty topic lists everything (no `topic` query parameter is sent)
    pub async fn list_interview(&self, topic: &str) -> Result<Vec<InterviewEntry>, ApiError> {
        if topic.is_empty() {
            self.get(paths::INTERVIEW_ENTRIES, &[]).await
        } else {
            self.get(paths::INTERVIEW_ENTRIES, &[("topic", topic)]).await
        }
    }

    // webhooks

    /// Recent webhook deliveries. Optional on the server side, so any failure
    /// reads as "no events".
    pub async fn recent_webhook_events(&self) -> Vec<Value> {
        match self.get::<Vec<Value>>(paths::WEBHOOKS_RECENT, &[]).await {
            Ok(events) => events,
            Err(e) => {
                tracing::debug!(error = %e, "recent webhook events unavailable");
                Vec::new()
            }
        }
    }

    // health

    pub async fn live(&self) -> Result<Value, ApiError> {
        self.get(paths::HEALTH_LIVE, &[]).await
    }

    pub async fn ready(&self) -> Result<Value, ApiError> {
        self.get(paths::HEALTH_READY, &[]).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut builder = self.client.get(self.config.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.execute(builder).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        // .json() also sets Content-Type, which is only wanted when a body is sent
        let builder = self.client.request(method, self.config.url(path)).json(body);
        self.execute(builder).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text)
                .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
            tracing::warn!(status = status.as_u16(), %message, "API request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let data = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok(serde_json::from_value(data)?)
    }
}

/// The `error` string field of a JSON error body, if there is one
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckInStatus;
    use crate::test_support::spawn_server;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        routing::{get, patch},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn client_for(router: Router) -> ApiClient {
        let base = spawn_server(router).await;
        ApiClient::new(CoreConfig::new(base)).unwrap()
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"error":"nope"}"#), Some("nope".into()));
        assert_eq!(error_message(r#"{"error":""}"#), None);
        assert_eq!(error_message(r#"{"message":"x"}"#), None);
        assert_eq!(error_message("<html>"), None);
        assert_eq!(error_message(""), None);
    }

    #[tokio::test]
    async fn test_list_habits() {
        let router = Router::new().route(
            "/api/v1/habits",
            get(|| async {
                Json(json!([
                    {"id": "h1", "name": "Read", "active": true},
                    {"id": 2, "name": "Run", "active": false}
                ]))
            }),
        );
        let client = client_for(router).await;

        let habits = client.list_habits().await.unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[1].id, "2");
        assert!(!habits[1].active);
    }

    #[tokio::test]
    async fn test_create_habit_sends_json_body() {
        let router = Router::new().route(
            "/api/v1/habits",
            axum::routing::post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"id": "new", "name": body["name"], "contentType": content_type}))
            }),
        );
        let client = client_for(router).await;

        let created = client.create_habit("Stretch").await.unwrap();
        assert_eq!(created["name"], "Stretch");
        assert_eq!(created["contentType"], "application/json");
    }

    #[tokio::test]
    async fn test_get_sends_no_content_type() {
        let router = Router::new().route(
            "/api/v1/health/live",
            get(|headers: HeaderMap| async move {
                Json(json!({"hasContentType": headers.contains_key("content-type")}))
            }),
        );
        let client = client_for(router).await;

        let live = client.live().await.unwrap();
        assert_eq!(live["hasContentType"], false);
    }

    #[tokio::test]
    async fn test_set_habit_active_patches_by_id() {
        let router = Router::new().route(
            "/api/v1/habits/:id",
            patch(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                Json(json!({"id": id, "active": body["active"]}))
            }),
        );
        let client = client_for(router).await;

        let updated = client.set_habit_active("h9", false).await.unwrap();
        assert_eq!(updated, json!({"id": "h9", "active": false}));
    }

    #[tokio::test]
    async fn test_upsert_and_list_check_ins() {
        let router = Router::new().route(
            "/api/v1/checkins",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(json!([{
                    "habit": {"id": "h1", "name": "Read", "active": true},
                    "date": q.get("date").cloned().unwrap_or_default(),
                    "status": "DONE",
                    "note": "20 pages"
                }]))
            })
            .post(|Json(body): Json<Value>| async move { Json(body) }),
        );
        let client = client_for(router).await;

        let echoed = client
            .upsert_check_in(&CheckInRequest {
                habit_id: "h1".into(),
                date: "2026-10-17".into(),
                status: CheckInStatus::Skipped,
                note: "tired".into(),
            })
            .await
            .unwrap();
        assert_eq!(echoed["habitId"], "h1");
        assert_eq!(echoed["status"], "SKIPPED");

        let list = client.list_check_ins("2026-10-17").await.unwrap();
        assert_eq!(list[0].date, "2026-10-17");
        assert_eq!(list[0].note.as_deref(), Some("20 pages"));
    }

    #[tokio::test]
    async fn test_error_field_becomes_message() {
        let router = Router::new().route(
            "/api/v1/summary/today",
            get(|| async { (StatusCode::CONFLICT, Json(json!({"error": "habit inactive"}))) }),
        );
        let client = client_for(router).await;

        let err = client.summary_today().await.unwrap_err();
        assert_eq!(err.to_string(), "habit inactive");
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn test_status_fallback_message() {
        let router = Router::new().route(
            "/api/v1/health/ready",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let client = client_for(router).await;

        let err = client.ready().await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed (503)");
    }

    #[tokio::test]
    async fn test_empty_body_is_null() {
        let router = Router::new().route(
            "/api/v1/habits/:id",
            patch(|| async { StatusCode::NO_CONTENT }),
        );
        let client = client_for(router).await;

        let result = client.set_habit_active("h1", true).await.unwrap();
        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn test_list_interview_topic_query() {
        let router = Router::new().route(
            "/api/v1/interview/entries",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let topic = q.get("topic").cloned().unwrap_or_else(|| "<none>".into());
                Json(json!([{
                    "id": 1,
                    "topic": topic,
                    "question": "q",
                    "answer": "a",
                    "rating": 3,
                    "createdAt": "2026-10-17T08:00:00Z"
                }]))
            }),
        );
        let client = client_for(router).await;

        let all = client.list_interview("").await.unwrap();
        assert_eq!(all[0].topic, "<none>");

        let filtered = client.list_interview("aws & k8s").await.unwrap();
        assert_eq!(filtered[0].topic, "aws & k8s");
    }

    #[tokio::test]
    async fn test_add_interview_body() {
        let router = Router::new().route(
            "/api/v1/interview/entries",
            axum::routing::post(|Json(body): Json<Value>| async move { Json(body) }),
        );
        let client = client_for(router).await;

        let echoed = client
            .add_interview(&NewInterviewEntry {
                topic: "terraform".into(),
                question: "What is state?".into(),
                answer: "A mapping".into(),
                rating: 5,
                tags: "iac".into(),
            })
            .await
            .unwrap();
        assert_eq!(echoed["rating"], 5);
        assert_eq!(echoed["tags"], "iac");
    }

    #[tokio::test]
    async fn test_webhook_failure_is_empty() {
        let router = Router::new().route(
            "/api/v1/webhooks/recent",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let client = client_for(router).await;

        assert!(client.recent_webhook_events().await.is_empty());
    }

    #[tokio::test]
    async fn test_webhook_events_pass_through() {
        let router = Router::new().route(
            "/api/v1/webhooks/recent",
            get(|| async { Json(json!([{"source": "github", "action": "push"}])) }),
        );
        let client = client_for(router).await;

        let events = client.recent_webhook_events().await;
        assert_eq!(events, vec![json!({"source": "github", "action": "push"})]);
    }
}
