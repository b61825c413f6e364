//! 生成 API（Gemini）の薄いHTTPクライアント
//!
//! フリーテキスト生成とスキーマ制約付きJSON生成の2系統を提供する。

use serde_json::{Value, json};

use crate::error::{EigoCoachError, Result};
use crate::utils::config::EnvConfig;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// 通常生成のデフォルトモデル
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
/// エッセイ評価など高精度が要るときのデフォルトモデル
const DEFAULT_MODEL_PRO: &str = "gemini-1.5-pro-latest";

/// 生成オプション
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// サンプリング温度（未指定はAPIデフォルト）
    pub temperature: Option<f64>,
    /// システム指示
    pub system: Option<String>,
}

/// Gemini API クライアント
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    model_pro: String,
}

impl GeminiClient {
    /// 環境設定からクライアントを作成
    ///
    /// モデル名は GEMINI_MODEL / GEMINI_MODEL_PRO で上書きできる。
    pub fn new() -> Result<Self> {
        let config = EnvConfig::get();
        let api_key = config
            .gemini_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| EigoCoachError::ConfigError("GEMINI_API_KEY is not set".into()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            model: config
                .gemini_model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            model_pro: config
                .gemini_model_pro
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_PRO.to_string()),
        })
    }

    /// フリーテキストを生成する（通常モデル）
    pub async fn generate_text(&self, prompt: &str, options: GenerateOptions) -> Result<String> {
        let body = build_request(prompt, &options, None);
        let response = self.send(&self.model, body).await?;
        extract_text(&response)
    }

    /// スキーマ制約付きJSONを生成する（高精度モデル）
    ///
    /// モデル出力がスキーマに合致しない場合は `GenerationFailed`。
    pub async fn generate_object(
        &self,
        prompt: &str,
        options: GenerateOptions,
        schema: Value,
    ) -> Result<Value> {
        let body = build_request(prompt, &options, Some(schema));
        let response = self.send(&self.model_pro, body).await?;
        let text = extract_text(&response)?;

        serde_json::from_str(&text).map_err(|e| {
            EigoCoachError::GenerationFailed(format!("output did not match schema: {}", e))
        })
    }

    async fn send(&self, model: &str, body: Value) -> Result<Value> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            BASE_URL, model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EigoCoachError::GenerationFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| EigoCoachError::GenerationFailed(format!("body read failed: {}", e)))?;

        if !status.is_success() {
            return Err(EigoCoachError::GenerationFailed(format!(
                "API request failed with status {}: {}",
                status, text
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| EigoCoachError::GenerationFailed(format!("malformed response: {}", e)))
    }
}

/// generateContent のリクエストボディを組み立てる
fn build_request(prompt: &str, options: &GenerateOptions, schema: Option<Value>) -> Value {
    let mut body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
    });

    if let Some(system) = &options.system {
        body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
    }

    let mut generation_config = json!({});
    if let Some(temperature) = options.temperature {
        generation_config["temperature"] = json!(temperature);
    }
    if let Some(schema) = schema {
        generation_config["responseMimeType"] = json!("application/json");
        generation_config["responseSchema"] = schema;
    }
    if generation_config != json!({}) {
        body["generationConfig"] = generation_config;
    }

    body
}

/// レスポンスから最初の候補テキストを取り出す
fn extract_text(response: &Value) -> Result<String> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(|text| text.to_string())
        .ok_or_else(|| EigoCoachError::GenerationFailed("response contained no candidates".into()))
}
