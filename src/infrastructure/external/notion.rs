//! ドキュメントストア（Notion API）の薄いHTTPクライアント
//!
//! ページ（レコード）のCRUDとデータベースクエリをJSONのまま扱う。
//! プロパティの組み立て・読み出しヘルパーもここに置く。

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{EigoCoachError, Result};
use crate::utils::config::EnvConfig;

const BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// データベースクエリのレスポンス
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Value>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// ブロック一覧のレスポンス
#[derive(Debug, Deserialize)]
pub struct BlockChildrenResponse {
    pub results: Vec<Value>,
}

/// Notion API クライアント
pub struct NotionClient {
    http: reqwest::Client,
    api_key: String,
}

impl NotionClient {
    /// 環境設定からクライアントを作成
    pub fn new() -> Result<Self> {
        let config = EnvConfig::get();
        let api_key = config
            .notion_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| EigoCoachError::ConfigError("NOTION_API_KEY is not set".into()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
        })
    }

    /// データベースをクエリする
    pub async fn query_database(
        &self,
        database_id: &str,
        filter: Option<Value>,
        sorts: Option<Value>,
        start_cursor: Option<&str>,
        page_size: Option<u32>,
    ) -> Result<QueryResponse> {
        let mut body = json!({});
        if let Some(filter) = filter {
            body["filter"] = filter;
        }
        if let Some(sorts) = sorts {
            body["sorts"] = sorts;
        }
        if let Some(cursor) = start_cursor {
            body["start_cursor"] = json!(cursor);
        }
        if let Some(size) = page_size {
            body["page_size"] = json!(size);
        }

        let value = self
            .send(
                Method::POST,
                &format!("databases/{}/query", database_id),
                Some(body),
            )
            .await?;

        serde_json::from_value(value)
            .map_err(|e| EigoCoachError::StoreUnavailable(format!("malformed query response: {}", e)))
    }

    /// データベースのスキーマを取得する
    pub async fn retrieve_database(&self, database_id: &str) -> Result<Value> {
        self.send(Method::GET, &format!("databases/{}", database_id), None)
            .await
    }

    /// ページを作成する。`children` を渡すと本文ブロックも同時に登録される。
    pub async fn create_page(
        &self,
        database_id: &str,
        properties: Value,
        children: Option<Value>,
    ) -> Result<Value> {
        let mut body = json!({
            "parent": { "database_id": database_id },
            "properties": properties,
        });
        if let Some(children) = children {
            body["children"] = children;
        }
        self.send(Method::POST, "pages", Some(body)).await
    }

    /// ページのプロパティを更新する
    pub async fn update_page(&self, page_id: &str, properties: Value) -> Result<Value> {
        self.send(
            Method::PATCH,
            &format!("pages/{}", page_id),
            Some(json!({ "properties": properties })),
        )
        .await
    }

    /// ページをアーカイブする（ソフトデリート）
    pub async fn archive_page(&self, page_id: &str) -> Result<()> {
        self.send(
            Method::PATCH,
            &format!("pages/{}", page_id),
            Some(json!({ "archived": true })),
        )
        .await?;
        Ok(())
    }

    /// ブロックの子要素を追加する
    pub async fn append_block_children(&self, block_id: &str, children: Value) -> Result<Value> {
        self.send(
            Method::PATCH,
            &format!("blocks/{}/children", block_id),
            Some(json!({ "children": children })),
        )
        .await
    }

    /// ブロックの子要素一覧を取得する
    pub async fn list_block_children(&self, block_id: &str) -> Result<BlockChildrenResponse> {
        let value = self
            .send(Method::GET, &format!("blocks/{}/children", block_id), None)
            .await?;
        serde_json::from_value(value).map_err(|e| {
            EigoCoachError::StoreUnavailable(format!("malformed block children response: {}", e))
        })
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}/{}", BASE_URL, path);
        let mut request = self
            .http
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Notion-Version", NOTION_VERSION);

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| EigoCoachError::StoreUnavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| EigoCoachError::StoreUnavailable(format!("body read failed: {}", e)))?;

        if !status.is_success() {
            return Err(EigoCoachError::StoreUnavailable(format!(
                "API request failed with status {}: {}",
                status, text
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| EigoCoachError::StoreUnavailable(format!("malformed response: {}", e)))
    }
}

// ========================================
// プロパティの組み立て・読み出しヘルパー
// ========================================

/// title プロパティ値を組み立てる
pub fn title_value(content: &str) -> Value {
    json!({ "title": [{ "text": { "content": content } }] })
}

/// rich_text プロパティ値を組み立てる
pub fn rich_text_value(content: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": content } }] })
}

/// select プロパティ値を組み立てる
pub fn select_value(name: &str) -> Value {
    json!({ "select": { "name": name } })
}

/// number プロパティ値を組み立てる
pub fn number_value(value: f64) -> Value {
    json!({ "number": value })
}

/// date プロパティ値を組み立てる
pub fn date_value(iso: &str) -> Value {
    json!({ "date": { "start": iso } })
}

/// relation プロパティ値を組み立てる
pub fn relation_value(ids: &[String]) -> Value {
    let refs: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
    json!({ "relation": refs })
}

/// checkbox プロパティ値を組み立てる
pub fn checkbox_value(checked: bool) -> Value {
    json!({ "checkbox": checked })
}

/// heading_2 ブロックを組み立てる
pub fn heading_block(content: &str) -> Value {
    json!({
        "object": "block",
        "type": "heading_2",
        "heading_2": { "rich_text": [{ "type": "text", "text": { "content": content } }] }
    })
}

/// paragraph ブロックを組み立てる
pub fn paragraph_block(content: &str) -> Value {
    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": { "rich_text": [{ "type": "text", "text": { "content": content } }] }
    })
}

/// ページの title / rich_text プロパティから先頭テキストを取り出す。
/// 未設定・空のプロパティは空文字列になる。
pub fn page_text(page: &Value, property: &str, kind: &str) -> String {
    page.pointer(&format!("/properties/{}/{}/0/text/content", property, kind))
        .or_else(|| page.pointer(&format!("/properties/{}/{}/0/plain_text", property, kind)))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// ページの select プロパティ名を取り出す。未設定は空文字列。
pub fn page_select(page: &Value, property: &str) -> String {
    page.pointer(&format!("/properties/{}/select/name", property))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// ページの checkbox プロパティを取り出す。未設定は false。
pub fn page_checkbox(page: &Value, property: &str) -> bool {
    page.pointer(&format!("/properties/{}/checkbox", property))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// ページのトップレベル文字列フィールド（id, created_time 等）を取り出す
pub fn page_str(page: &Value, field: &str) -> String {
    page.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
