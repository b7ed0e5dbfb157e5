//! Local stand-in for the Google Sheets v4 REST API and the OAuth token endpoint
//!
//! ## Routes
//! - `GET  /v4/spreadsheets/{id}` - spreadsheet metadata
//! - `GET  /v4/spreadsheets/{id}/values/{range}` - cells of the range
//! - `PUT  /v4/spreadsheets/{id}/values/{range}` - stores the rows of the body
//! - `POST /v4/spreadsheets/{id}/values/{range}:clear` - empties the range
//! - `POST /token` - hands out `access_token` for any assertion
//!
//! Seeded values are anchored at `B3`, where the default crop table starts.
//! Every Sheets route requires `Authorization: Bearer <access_token>`.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const ACCESS_TOKEN: &str = "ya29.fake-access-token";

/// (row, column), 1-based row and zero-based column
type Cells = BTreeMap<(u32, u32), Value>;

const ORIGIN_ROW: u32 = 3;
const ORIGIN_COLUMN: u32 = 1;

/// A request the fake received, with the range already percent-decoded
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub target: String,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct FakeData {
    spreadsheet_id: String,
    title: String,
    sheets: Vec<(String, i64)>,
    cells: HashMap<String, Cells>,
    requests: Vec<RecordedRequest>,
    token_forms: Vec<HashMap<String, String>>,
    failures_left: u32,
    failure_status: u16,
}

#[derive(Clone, Default)]
pub struct FakeSheetsState {
    data: Arc<Mutex<FakeData>>,
}

/// Builder for the spreadsheet the fake serves
pub struct FakeSpreadsheet {
    data: FakeData,
}

impl FakeSpreadsheet {
    pub fn new(spreadsheet_id: &str, title: &str) -> Self {
        Self {
            data: FakeData {
                spreadsheet_id: spreadsheet_id.to_string(),
                title: title.to_string(),
                ..FakeData::default()
            },
        }
    }

    pub fn with_sheet(mut self, title: &str, sheet_id: i64, values: Value) -> Self {
        self.data.sheets.push((title.to_string(), sheet_id));
        let mut cells = Cells::new();
        if let Value::Array(rows) = values {
            put_rows(&mut cells, ORIGIN_ROW, ORIGIN_COLUMN, rows);
        }
        self.data.cells.insert(title.to_string(), cells);
        self
    }

    /// The next `count` Sheets requests answer with `status`
    pub fn failing_first(mut self, count: u32, status: u16) -> Self {
        self.data.failures_left = count;
        self.data.failure_status = status;
        self
    }
}

pub struct FakeSheetsServer {
    pub base_url: String,
    state: FakeSheetsState,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeSheetsServer {
    /// Binds an ephemeral port on 127.0.0.1 and serves in a background task
    pub async fn start(spreadsheet: FakeSpreadsheet) -> Self {
        let state = FakeSheetsState {
            data: Arc::new(Mutex::new(spreadsheet.data)),
        };
        let app = routes().with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn token_uri(&self) -> String {
        format!("{}/token", self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.data.lock().unwrap().requests.clone()
    }

    pub fn token_forms(&self) -> Vec<HashMap<String, String>> {
        self.state.data.lock().unwrap().token_forms.clone()
    }

    /// Current value of a cell as text, e.g. `cell("Crops", "E6")`
    pub fn cell(&self, sheet: &str, a1: &str) -> Option<String> {
        let (column, row) = parse_cell(a1)?;
        let data = self.state.data.lock().unwrap();
        data.cells.get(sheet)?.get(&(row?, column)).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl Drop for FakeSheetsServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn routes() -> Router<FakeSheetsState> {
    Router::new()
        .route("/token", post(issue_token))
        .route("/v4/spreadsheets/{id}", get(spreadsheet_metadata))
        .route(
            "/v4/spreadsheets/{id}/values/{range}",
            get(read_values).put(write_values).post(clear_values),
        )
}

fn google_error(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "error": { "code": status.as_u16(), "message": message, "status": "FAILED" }
    });
    (status, Json(body)).into_response()
}

/// Authorization and injected failures shared by every Sheets route
fn check_request(data: &mut FakeData, headers: &HeaderMap, id: &str) -> Option<Response> {
    let expected = format!("Bearer {}", ACCESS_TOKEN);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return Some(google_error(
            StatusCode::UNAUTHORIZED,
            "Request had invalid authentication credentials.",
        ));
    }

    if data.failures_left > 0 {
        data.failures_left -= 1;
        let status =
            StatusCode::from_u16(data.failure_status).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
        return Some(google_error(status, "The service is currently unavailable."));
    }

    if id != data.spreadsheet_id {
        return Some(google_error(
            StatusCode::NOT_FOUND,
            "Requested entity was not found.",
        ));
    }
    None
}

/// `'Farm 2'!B3:H` -> `Farm 2`
fn sheet_of(range: &str) -> String {
    let name = range.split_once('!').map(|(name, _)| name).unwrap_or(range);
    match name.strip_prefix('\'').and_then(|n| n.strip_suffix('\'')) {
        Some(quoted) => quoted.replace("''", "'"),
        None => name.to_string(),
    }
}

/// `D4` -> (3, Some(4)); `H` -> (7, None)
fn parse_cell(a1: &str) -> Option<(u32, Option<u32>)> {
    let split = a1.find(|c: char| c.is_ascii_digit()).unwrap_or(a1.len());
    let (letters, digits) = a1.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let column = letters
        .chars()
        .try_fold(0u32, |acc, c| {
            c.is_ascii_uppercase()
                .then(|| acc * 26 + (c as u32 - 'A' as u32 + 1))
        })?
        - 1;
    let row = if digits.is_empty() {
        None
    } else {
        Some(digits.parse().ok()?)
    };
    Some((column, row))
}

struct Bounds {
    first_row: u32,
    last_row: Option<u32>,
    first_column: u32,
    last_column: u32,
}

/// `'Farm 2'!B3:H` -> rows 3.. and columns B..=H
fn bounds_of(range: &str) -> Option<Bounds> {
    let (_, cells) = range.rsplit_once('!')?;
    let (start, end) = cells.split_once(':')?;
    let (first_column, first_row) = parse_cell(start)?;
    let (last_column, last_row) = parse_cell(end)?;
    Some(Bounds {
        first_row: first_row?,
        last_row,
        first_column,
        last_column,
    })
}

fn put_rows(cells: &mut Cells, first_row: u32, first_column: u32, rows: Vec<Value>) {
    for (i, row) in rows.into_iter().enumerate() {
        let Value::Array(values) = row else { continue };
        for (j, value) in values.into_iter().enumerate() {
            let key = (first_row + i as u32, first_column + j as u32);
            let empty = matches!(&value, Value::String(s) if s.is_empty()) || value.is_null();
            if empty {
                cells.remove(&key);
            } else {
                cells.insert(key, value);
            }
        }
    }
}

/// Rows of the range with trailing empty cells and rows dropped, like the API
fn read_rows(cells: &Cells, bounds: &Bounds) -> Vec<Vec<Value>> {
    let last_row = bounds
        .last_row
        .unwrap_or_else(|| cells.keys().map(|(row, _)| *row).max().unwrap_or(0));
    let mut rows: Vec<Vec<Value>> = (bounds.first_row..=last_row)
        .map(|row| {
            let mut values: Vec<Value> = (bounds.first_column..=bounds.last_column)
                .map(|column| cells.get(&(row, column)).cloned().unwrap_or(json!("")))
                .collect();
            while values.last().is_some_and(|v| v == &json!("")) {
                values.pop();
            }
            values
        })
        .collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows
}

fn bad_range(range: &str) -> Response {
    google_error(
        StatusCode::BAD_REQUEST,
        &format!("Unable to parse range: {}", range),
    )
}

async fn issue_token(
    State(state): State<FakeSheetsState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut data = state.data.lock().unwrap();
    data.token_forms.push(form);
    Json(json!({
        "access_token": ACCESS_TOKEN,
        "expires_in": 3599,
        "token_type": "Bearer"
    }))
    .into_response()
}

async fn spreadsheet_metadata(
    State(state): State<FakeSheetsState>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut data = state.data.lock().unwrap();
    data.requests.push(RecordedRequest {
        method: "GET",
        target: id.clone(),
        query,
        body: None,
    });
    if let Some(rejection) = check_request(&mut data, &headers, &id) {
        return rejection;
    }

    let sheets: Vec<Value> = data
        .sheets
        .iter()
        .enumerate()
        .map(|(index, (title, sheet_id))| {
            json!({ "properties": { "sheetId": sheet_id, "title": title, "index": index } })
        })
        .collect();
    Json(json!({ "properties": { "title": data.title }, "sheets": sheets })).into_response()
}

async fn read_values(
    State(state): State<FakeSheetsState>,
    Path((id, range)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut data = state.data.lock().unwrap();
    data.requests.push(RecordedRequest {
        method: "GET",
        target: range.clone(),
        query,
        body: None,
    });
    if let Some(rejection) = check_request(&mut data, &headers, &id) {
        return rejection;
    }

    let (Some(cells), Some(bounds)) = (data.cells.get(&sheet_of(&range)), bounds_of(&range))
    else {
        return bad_range(&range);
    };

    let rows = read_rows(cells, &bounds);
    if rows.is_empty() {
        Json(json!({ "range": range, "majorDimension": "ROWS" })).into_response()
    } else {
        Json(json!({ "range": range, "majorDimension": "ROWS", "values": rows })).into_response()
    }
}

async fn write_values(
    State(state): State<FakeSheetsState>,
    Path((id, range)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = state.data.lock().unwrap();
    let updated_rows = body["values"].as_array().map(Vec::len).unwrap_or(0);
    let updated_cells: usize = body["values"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|r| r.as_array().map(Vec::len).unwrap_or(0))
                .sum()
        })
        .unwrap_or(0);
    data.requests.push(RecordedRequest {
        method: "PUT",
        target: range.clone(),
        query,
        body: Some(body.clone()),
    });
    if let Some(rejection) = check_request(&mut data, &headers, &id) {
        return rejection;
    }

    let sheet = sheet_of(&range);
    let (Some(cells), Some(bounds)) = (data.cells.get_mut(&sheet), bounds_of(&range)) else {
        return bad_range(&range);
    };
    let values = match body.get("values") {
        Some(Value::Array(rows)) => rows.clone(),
        _ => Vec::new(),
    };
    put_rows(cells, bounds.first_row, bounds.first_column, values);

    Json(json!({
        "spreadsheetId": id,
        "updatedRange": range,
        "updatedRows": updated_rows,
        "updatedCells": updated_cells
    }))
    .into_response()
}

async fn clear_values(
    State(state): State<FakeSheetsState>,
    Path((id, range)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = state.data.lock().unwrap();
    let Some(range) = range.strip_suffix(":clear").map(str::to_string) else {
        return google_error(StatusCode::NOT_FOUND, "Unknown method");
    };
    data.requests.push(RecordedRequest {
        method: "POST",
        target: format!("{}:clear", range),
        query: HashMap::new(),
        body: Some(body),
    });
    if let Some(rejection) = check_request(&mut data, &headers, &id) {
        return rejection;
    }

    let sheet = sheet_of(&range);
    let (Some(cells), Some(bounds)) = (data.cells.get_mut(&sheet), bounds_of(&range)) else {
        return bad_range(&range);
    };
    let last_row = bounds.last_row.unwrap_or(u32::MAX);
    cells.retain(|(row, column), _| {
        !((bounds.first_row..=last_row).contains(row)
            && (bounds.first_column..=bounds.last_column).contains(column))
    });

    Json(json!({ "spreadsheetId": id, "clearedRange": range })).into_response()
}
