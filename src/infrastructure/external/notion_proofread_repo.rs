//! 添削アーカイブのアダプター実装
//! Application層のProofreadArchiveトレイトを実装

use async_trait::async_trait;
use chrono::Local;
use serde_json::json;

use crate::application::traits::ProofreadArchive;
use crate::error::Result;
use crate::infrastructure::external::notion::{
    self, NotionClient, heading_block, paragraph_block, title_value,
};
use crate::utils::config::EnvConfig;

/// 添削アーカイブのアダプター
pub struct NotionProofreadRepository {
    client: NotionClient,
}

impl NotionProofreadRepository {
    /// 新しいアダプターを作成
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: NotionClient::new()?,
        })
    }

    fn database_id(&self) -> Result<String> {
        EnvConfig::require_db_id(&EnvConfig::get().proofread_db_id, "NOTION_PROOFREAD_DB_ID")
    }
}

#[async_trait]
impl ProofreadArchive for NotionProofreadRepository {
    async fn archive_revision(&self, original: &str, revised: &str) -> Result<String> {
        let database_id = self.database_id()?;

        // タイトルは保存時のローカル日時
        let title = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let page = self
            .client
            .create_page(&database_id, json!({ "Name": title_value(&title) }), None)
            .await?;

        let page_id = notion::page_str(&page, "id");

        self.client
            .append_block_children(
                &page_id,
                json!([
                    heading_block("オリジナルの文章"),
                    paragraph_block(original),
                    heading_block("添削後の文章"),
                    paragraph_block(revised),
                ]),
            )
            .await?;

        Ok(page_id)
    }
}
