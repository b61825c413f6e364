//! 英文添削のアダプター実装
//! Application層のReviseGatewayトレイトを実装

use async_trait::async_trait;

use crate::application::traits::ReviseGateway;
use crate::domain::proofread::ReviseRequest;
use crate::error::Result;
use crate::infrastructure::external::gemini::{GeminiClient, GenerateOptions};

/// 添削アダプター
pub struct GeminiProofreadAdapter {
    client: GeminiClient,
}

impl GeminiProofreadAdapter {
    /// 新しいアダプターを作成
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: GeminiClient::new()?,
        })
    }
}

fn build_prompt(request: &ReviseRequest) -> String {
    format!(
        r#"以下のJSONデータに基づいて、英文を添削してください。

# 制約事項
- 出力はMarkdown形式で記述してください。
- 以下のセクションを含めてください：
  1. **修正後の英文**: 自然で、かつ指定された文体（{style}）に適した英文。
  2. **修正箇所の解説**: なぜ修正が必要だったのか、文法・語彙・ニュアンスの観点から簡潔に説明してください。特に、指定された誤りのレベル（{level}）と種類（{types}）に関係する点に注目してください。
  3. **改善のアドバイス**: より良い表現にするための具体的なヒント。

# 入力データ
---
英文: {text}
文体: {style}
誤りのレベル: {level}
誤りの種類: {types}
---"#,
        text = request.text,
        style = request.style,
        level = request.level,
        types = request.error_types_label(),
    )
}

#[async_trait]
impl ReviseGateway for GeminiProofreadAdapter {
    async fn revise_text(&self, request: &ReviseRequest) -> Result<String> {
        self.client
            .generate_text(&build_prompt(request), GenerateOptions::default())
            .await
    }
}
