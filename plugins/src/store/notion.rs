use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use duenotify_core::clock::iso_date;
use duenotify_core::config::StoreConfig;
use duenotify_core::record::TaskRecord;
use duenotify_core::source::TaskSource;

use crate::http::{build_client, parse_json_response, ApiHttpError};

const SERVICE: &str = "notion";
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize)]
pub struct DateEquals {
    pub equals: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyDateFilter {
    pub property: String,
    pub date: DateEquals,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseQuery {
    pub filter: PropertyDateFilter,
    pub page_size: u32,
}

impl DatabaseQuery {
    pub fn due_on(due_property: &str, date: NaiveDate, page_size: u32) -> Self {
        Self {
            filter: PropertyDateFilter {
                property: due_property.to_string(),
                date: DateEquals {
                    equals: iso_date(date),
                },
            },
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// Queries a Notion database for pages whose date property equals a day.
/// Only the first page of results is read.
#[derive(Clone)]
pub struct NotionTaskSource {
    http: reqwest::Client,
    token: String,
    notion_version: String,
    due_property: String,
    page_size: u32,
    url_query: String,
}

impl NotionTaskSource {
    pub fn new(cfg: &StoreConfig, due_property: String) -> Result<Self> {
        let http = build_client(cfg.timeout_ms)?;
        let normalized = cfg.base_url.trim_end_matches('/');
        Ok(Self {
            http,
            token: cfg.api_token.clone(),
            notion_version: cfg.notion_version.clone(),
            due_property,
            page_size: cfg.page_size,
            url_query: format!(
                "{}/v1/databases/{}/query",
                normalized,
                cfg.database_id.trim()
            ),
        })
    }

    pub async fn query(&self, payload: &DatabaseQuery) -> Result<Vec<Value>> {
        let url = &self.url_query;
        tracing::debug!(
            target: "duenotify.store",
            stage = "store.notion.query.in",
            url = %url,
            property = %payload.filter.property,
            equals = %payload.filter.date.equals,
            page_size = payload.page_size
        );
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .header("Notion-Version", self.notion_version.as_str())
            .json(payload)
            .send()
            .await
            .map_err(|err| ApiHttpError::from_reqwest(SERVICE, err, url.clone()))?;
        let status = resp.status();
        let mut v = parse_json_response(SERVICE, resp, url.clone()).await?;

        let results = match v.get_mut("results").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ApiHttpError::decode_error(
                    SERVICE,
                    status.as_u16(),
                    url.clone(),
                    None,
                    "missing `results` array".to_string(),
                )
                .into())
            }
        };
        if v.get("has_more").and_then(Value::as_bool) == Some(true) {
            tracing::warn!(
                target: "duenotify.store",
                stage = "store.notion.query.truncated",
                returned = results.len(),
                "more records are due than fit in one page; the rest are not reported"
            );
        }
        tracing::debug!(
            target: "duenotify.store",
            stage = "store.notion.query.out",
            status = %status,
            results = results.len()
        );
        Ok(results)
    }
}

#[async_trait]
impl TaskSource for NotionTaskSource {
    fn name(&self) -> &str {
        "notion"
    }

    async fn query_due(&self, date: NaiveDate) -> Result<Vec<TaskRecord>> {
        let payload = DatabaseQuery::due_on(&self.due_property, date, self.page_size);
        let raw = self.query(&payload).await?;
        Ok(raw.iter().map(TaskRecord::from_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ApiHttpErrorKind;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn store(base_url: String) -> StoreConfig {
        StoreConfig {
            base_url,
            api_token: "secret-token".to_string(),
            database_id: "db123".to_string(),
            notion_version: "2022-06-28".to_string(),
            page_size: 100,
            timeout_ms: 1_000,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_query_body_shape() {
        let q = DatabaseQuery::due_on("期限", day(), 500);
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            json!({
                "filter": { "property": "期限", "date": { "equals": "2024-05-01" } },
                "page_size": 100
            })
        );
        assert_eq!(DatabaseQuery::due_on("d", day(), 0).page_size, 1);
    }

    #[tokio::test]
    async fn test_query_due_sends_filter_and_headers() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/v1/databases/db123/query")
            .match_header("authorization", "Bearer secret-token")
            .match_header("notion-version", "2022-06-28")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "filter": { "property": "Due", "date": { "equals": "2024-05-01" } },
                "page_size": 100
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "object": "list",
                    "results": [
                        { "id": "p1", "url": "https://notion.so/p1", "properties": {} },
                        { "id": "p2", "url": "https://notion.so/p2", "properties": {} }
                    ],
                    "has_more": false
                })
                .to_string(),
            )
            .create_async()
            .await;

        let source = NotionTaskSource::new(&store(server.url()), "Due".to_string()).unwrap();
        let records = source.query_due(day()).await.unwrap();

        m.assert_async().await;
        let ids: Vec<_> = records.iter().filter_map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_query_due_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/databases/db123/query")
            .with_status(401)
            .with_body(r#"{"object":"error","code":"unauthorized"}"#)
            .create_async()
            .await;

        let source = NotionTaskSource::new(&store(server.url()), "Due".to_string()).unwrap();
        let err = source.query_due(day()).await.unwrap_err();
        let http_err = err
            .downcast_ref::<ApiHttpError>()
            .expect("expected ApiHttpError");
        assert_eq!(http_err.kind(), ApiHttpErrorKind::Status);
        assert_eq!(http_err.status(), Some(401));
        assert!(err.to_string().contains("unauthorized"));
    }

    #[tokio::test]
    async fn test_query_due_without_results_is_decode_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/databases/db123/query")
            .with_status(200)
            .with_body(r#"{"object":"list"}"#)
            .create_async()
            .await;

        let source = NotionTaskSource::new(&store(server.url()), "Due".to_string()).unwrap();
        let err = source.query_due(day()).await.unwrap_err();
        let http_err = err.downcast_ref::<ApiHttpError>().unwrap();
        assert_eq!(http_err.kind(), ApiHttpErrorKind::Decode);
        assert_eq!(http_err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_query_due_invalid_json() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/databases/db123/query")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let source = NotionTaskSource::new(&store(server.url()), "Due".to_string()).unwrap();
        let err = source.query_due(day()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ApiHttpError>().unwrap().kind(),
            ApiHttpErrorKind::Decode
        );
    }

    #[tokio::test]
    async fn test_query_due_slow_store_times_out() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/databases/db123/query")
            .with_status(200)
            .with_body_from_request(|_| {
                std::thread::sleep(std::time::Duration::from_millis(800));
                br#"{"results":[]}"#.to_vec()
            })
            .create_async()
            .await;

        let mut cfg = store(server.url());
        cfg.timeout_ms = 100;
        let source = NotionTaskSource::new(&cfg, "Due".to_string()).unwrap();
        let err = source.query_due(day()).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ApiHttpError>().unwrap().kind(),
            ApiHttpErrorKind::Timeout
        );
    }

    #[tokio::test]
    async fn test_query_due_reads_single_page_when_more_exist() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/v1/databases/db123/query")
            .match_body(Matcher::PartialJson(json!({ "page_size": 2 })))
            .with_status(200)
            .with_body(
                json!({
                    "results": [
                        { "id": "p1", "properties": {} },
                        { "id": "p2", "properties": {} }
                    ],
                    "has_more": true,
                    "next_cursor": "cursor-2"
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let mut cfg = store(server.url());
        cfg.page_size = 2;
        let source = NotionTaskSource::new(&cfg, "Due".to_string()).unwrap();
        let records = source.query_due(day()).await.unwrap();

        m.assert_async().await;
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/v1/databases/db123/query")
            .with_status(200)
            .with_body(r#"{"results":[]}"#)
            .create_async()
            .await;

        let source =
            NotionTaskSource::new(&store(format!("{}/", server.url())), "Due".to_string()).unwrap();
        assert!(source.query_due(day()).await.unwrap().is_empty());
        m.assert_async().await;
    }
}
