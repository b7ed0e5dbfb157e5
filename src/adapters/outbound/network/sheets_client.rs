use crate::inventory::domain::{A1Range, SheetProperties, SpreadsheetId, SpreadsheetMetadata};
use crate::ports::outbound::{AccessTokenProvider, SpreadsheetRepository, UpdateSummary};
use crate::shared::error::SheetsError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const METADATA_FIELDS: &str = "properties.title,sheets.properties";

#[derive(Debug, Deserialize)]
struct SpreadsheetResource {
    properties: SpreadsheetPropertiesResource,
    #[serde(default)]
    sheets: Vec<SheetResource>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetPropertiesResource {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct SheetResource {
    properties: SheetPropertiesResource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetPropertiesResource {
    #[serde(default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    index: u32,
}

#[derive(Debug, Deserialize)]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody {
    range: String,
    major_dimension: &'static str,
    values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    #[serde(default)]
    updated_range: String,
    #[serde(default)]
    updated_rows: u32,
    #[serde(default)]
    updated_cells: u32,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    message: String,
}

/// GoogleSheetsClient adapter for the Google Sheets v4 REST API
///
/// Implements the SpreadsheetRepository port over async reqwest. Reads are
/// retried on transport errors, 429 and 5xx responses; writes are sent once.
pub struct GoogleSheetsClient<T> {
    client: reqwest::Client,
    token_provider: T,
    base_url: String,
    max_retries: u32,
}

impl<T: AccessTokenProvider> GoogleSheetsClient<T> {
    pub const DEFAULT_BASE_URL: &'static str = "https://sheets.googleapis.com";
    const TIMEOUT_SECONDS: u64 = 30;

    /// Creates a client that identifies itself as `application_name`
    pub fn new(token_provider: T, application_name: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("{} whatsaterminal/{}", application_name, version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            token_provider,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            max_retries: 3,
        })
    }

    /// Points the client at another host (used for testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn spreadsheet_url(&self, spreadsheet_id: &SpreadsheetId) -> String {
        format!(
            "{}/v4/spreadsheets/{}",
            self.base_url,
            urlencoding::encode(spreadsheet_id.as_str())
        )
    }

    fn values_url(&self, spreadsheet_id: &SpreadsheetId, range: &A1Range) -> String {
        format!(
            "{}/values/{}",
            self.spreadsheet_url(spreadsheet_id),
            urlencoding::encode(&range.to_string())
        )
    }

    async fn authorized(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let token = self.token_provider.access_token().await?;
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    /// Sends a GET, retrying transient failures with a linear backoff
    async fn get_with_retry<D: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<D> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.get_once(url, query).await {
                Ok(result) => return Ok(result),
                Err(e) if is_retryable(&e) => {
                    tracing::debug!(attempt, error = %e, url, "retrying Sheets API request");
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No attempts were made for {}", url)))
    }

    async fn get_once<D: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<D> {
        tracing::debug!(url, "GET");
        let response = self
            .authorized(Method::GET, url)
            .await?
            .query(query)
            .send()
            .await?;
        parse_response(response).await
    }
}

/// Transport errors and throttling/server responses are worth another try
fn is_retryable(error: &anyhow::Error) -> bool {
    if let Some(SheetsError::Api { status, .. }) = error.downcast_ref::<SheetsError>() {
        return *status == 429 || *status >= 500;
    }
    error
        .downcast_ref::<reqwest::Error>()
        .map(|e| !e.is_decode())
        .unwrap_or(false)
}

async fn parse_response<D: DeserializeOwned>(response: Response) -> Result<D> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json::<D>().await?)
}

/// Builds `SheetsError::Api` from a Google error body, falling back to the raw text
async fn api_error(response: Response) -> anyhow::Error {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<GoogleErrorBody>(&text) {
        Ok(body) if !body.error.message.is_empty() => body.error.message,
        _ if !text.trim().is_empty() => text.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    SheetsError::Api {
        status: status.as_u16(),
        message,
    }
    .into()
}

/// Renders a cell the way it would appear in the sheet
fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl<T: AccessTokenProvider> SpreadsheetRepository for GoogleSheetsClient<T> {
    async fn spreadsheet_metadata(
        &self,
        spreadsheet_id: &SpreadsheetId,
    ) -> Result<SpreadsheetMetadata> {
        let url = self.spreadsheet_url(spreadsheet_id);
        let resource: SpreadsheetResource = self
            .get_with_retry(&url, &[("fields", METADATA_FIELDS)])
            .await?;

        Ok(SpreadsheetMetadata {
            title: resource.properties.title,
            sheets: resource
                .sheets
                .into_iter()
                .map(|s| SheetProperties {
                    sheet_id: s.properties.sheet_id,
                    title: s.properties.title,
                    index: s.properties.index,
                })
                .collect(),
        })
    }

    async fn read_values(
        &self,
        spreadsheet_id: &SpreadsheetId,
        range: &A1Range,
    ) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(spreadsheet_id, range);
        let response: ValueRangeResponse = self
            .get_with_retry(&url, &[("majorDimension", "ROWS")])
            .await?;

        Ok(response
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn write_values(
        &self,
        spreadsheet_id: &SpreadsheetId,
        range: &A1Range,
        rows: Vec<Vec<String>>,
    ) -> Result<UpdateSummary> {
        let url = self.values_url(spreadsheet_id, range);
        let body = ValueRangeBody {
            range: range.to_string(),
            major_dimension: "ROWS",
            values: rows,
        };

        tracing::debug!(url, range = %range, "PUT values");
        let response = self
            .authorized(Method::PUT, &url)
            .await?
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&body)
            .send()
            .await?;
        let updated: UpdateValuesResponse = parse_response(response).await?;

        Ok(UpdateSummary {
            updated_range: updated.updated_range,
            updated_rows: updated.updated_rows,
            updated_cells: updated.updated_cells,
        })
    }

    async fn clear_values(&self, spreadsheet_id: &SpreadsheetId, range: &A1Range) -> Result<()> {
        let url = format!("{}:clear", self.values_url(spreadsheet_id, range));

        tracing::debug!(url, range = %range, "POST clear");
        let response = self
            .authorized(Method::POST, &url)
            .await?
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let _: Value = parse_response(response).await?;
        Ok(())
    }
}
