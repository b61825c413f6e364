//! TOEIC 問題データベースのアダプター実装
//! Application層のToeicRepositoryトレイトを実装

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{Value, json};

use crate::application::traits::ToeicRepository;
use crate::domain::toeic::{BlockContent, ToeicQuestion};
use crate::error::Result;
use crate::infrastructure::external::markdown::markdown_to_blocks;
use crate::infrastructure::external::notion::{
    self, NotionClient, checkbox_value, heading_block, title_value,
};
use crate::utils::config::EnvConfig;

/// TOEIC 問題データベースのアダプター
pub struct NotionToeicRepository {
    client: NotionClient,
}

impl NotionToeicRepository {
    /// 新しいアダプターを作成
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: NotionClient::new()?,
        })
    }

    fn database_id(&self) -> Result<String> {
        EnvConfig::require_db_id(&EnvConfig::get().toeic_db_id, "NOTION_TOEIC_DB_ID")
    }

    /// ブロックJSONを type と中身のペアへ整形する
    fn project_block(block: &Value) -> Option<BlockContent> {
        let block_type = block.get("type").and_then(Value::as_str)?.to_string();
        let content = block.get(&block_type).cloned().unwrap_or(Value::Null);
        Some(BlockContent {
            block_type,
            content,
        })
    }
}

#[async_trait]
impl ToeicRepository for NotionToeicRepository {
    async fn save_question(&self, sentence: &str, description: &str) -> Result<String> {
        let database_id = self.database_id()?;

        let page = self
            .client
            .create_page(
                &database_id,
                json!({ "Sentence": title_value(sentence) }),
                None,
            )
            .await?;

        let page_id = notion::page_str(&page, "id");

        // 解説はMarkdownからブロックへ変換して本文に追加する
        let mut children = vec![heading_block("オリジナルの文章")];
        children.extend(markdown_to_blocks(description));

        self.client
            .append_block_children(&page_id, Value::Array(children))
            .await?;

        Ok(page_id)
    }

    async fn list_questions(&self) -> Result<Vec<ToeicQuestion>> {
        let database_id = self.database_id()?;

        let response = self
            .client
            .query_database(
                &database_id,
                None,
                Some(json!([{ "timestamp": "created_time", "direction": "descending" }])),
                None,
                None,
            )
            .await?;

        // 各レコードの本文ブロックを並行取得する。
        // 1件の取得失敗は空の本文に落とし、一覧全体は失敗させない。
        let fetches = response.results.iter().map(|page| async move {
            let id = notion::page_str(page, "id");
            let content = match self.client.list_block_children(&id).await {
                Ok(blocks) => blocks
                    .results
                    .iter()
                    .filter_map(Self::project_block)
                    .collect(),
                Err(e) => {
                    eprintln!("⚠️  failed to fetch content for question {}: {}", id, e);
                    Vec::new()
                }
            };

            ToeicQuestion {
                id,
                sentence: notion::page_text(page, "Sentence", "title"),
                created_time: notion::page_str(page, "created_time"),
                last_edited_time: notion::page_str(page, "last_edited_time"),
                completed: notion::page_checkbox(page, "Completed"),
                content,
            }
        });

        Ok(join_all(fetches).await)
    }

    async fn set_completed(&self, page_id: &str, completed: bool) -> Result<()> {
        self.client
            .update_page(page_id, json!({ "Completed": checkbox_value(completed) }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ブロックの type と中身が対で取り出される
    #[test]
    fn block_projection_pairs_type_and_content() {
        let block = json!({
            "type": "paragraph",
            "paragraph": { "rich_text": [{ "plain_text": "説明" }] }
        });

        let content = NotionToeicRepository::project_block(&block).unwrap();
        assert_eq!(content.block_type, "paragraph");
        assert!(content.content.get("rich_text").is_some());
    }

    /// type の無いブロックはスキップされる
    #[test]
    fn block_without_type_is_skipped() {
        assert!(NotionToeicRepository::project_block(&json!({})).is_none());
    }
}
