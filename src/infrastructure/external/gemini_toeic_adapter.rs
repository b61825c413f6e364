//! TOEIC 例文解説のアダプター実装
//! Application層のToeicGatewayトレイトを実装

use async_trait::async_trait;

use crate::application::traits::ToeicGateway;
use crate::domain::toeic::DescriptionType;
use crate::error::Result;
use crate::infrastructure::external::gemini::{GeminiClient, GenerateOptions};

/// TOEIC 解説アダプター
pub struct GeminiToeicAdapter {
    client: GeminiClient,
}

impl GeminiToeicAdapter {
    /// 新しいアダプターを作成
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: GeminiClient::new()?,
        })
    }
}

fn build_prompt(sentence: &str, description_type: DescriptionType) -> String {
    format!(
        r#"# TOEIC Reading Assistant

**Inputs:**
- **English sentence:** <{sentence}>
- **Explanation type:** <{description_type}> (either "vocabulary" or "grammar")

**Instructions:**
1. **Translation:** Provide a Japanese translation of the English sentence.
2. **Explanation:**
   - If **vocabulary**: Explain difficult words/phrases with extra example sentences.
   - If **grammar**: Explain the sentence structure and key grammar points with example sentences.
3. **Output:** Use Markdown and write the final answer in Japanese.

---

## Example

**Input:**
- English sentence: "The quick brown fox jumps over the lazy dog."
- Explanation type: "grammar"

**Output:**
expected output in markdown below
### 日本語訳
「その速い茶色のキツネは怠けた犬を飛び越える。」

### 文法解説
- **構造:** 主語 ("The quick brown fox")、述語 ("jumps over")、目的語 ("the lazy dog") で構成。
- **詳細:**
  - 主語は形容詞 "quick" と "brown" により修飾。
  - 述語は動詞 "jumps" と前置詞 "over" を含む。
  - 目的語は形容詞 "lazy" により修飾。
- **例文:**
  - 主語例: "A clever fox finds a way."
  - 前置詞例: "She walked over the bridge."
"#,
    )
}

#[async_trait]
impl ToeicGateway for GeminiToeicAdapter {
    async fn explain_sentence(
        &self,
        sentence: &str,
        description_type: DescriptionType,
    ) -> Result<String> {
        self.client
            .generate_text(
                &build_prompt(sentence, description_type),
                GenerateOptions::default(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// プロンプトに例文と解説種別が埋め込まれる
    #[test]
    fn prompt_embeds_sentence_and_type() {
        let prompt = build_prompt("The meeting was postponed.", DescriptionType::Vocabulary);
        assert!(prompt.contains("<The meeting was postponed.>"));
        assert!(prompt.contains("<vocabulary>"));
    }
}
