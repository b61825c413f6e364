//! IELTS セッション永続化のアダプター実装
//! Application層のIeltsRepositoryトレイトとドメイン層のWeaknessTagStoreを実装

use async_trait::async_trait;
use serde_json::json;

use crate::application::traits::IeltsRepository;
use crate::domain::ielts::{IeltsSession, VocabularyItem};
use crate::domain::weakness::{DEFAULT_TAG_CATEGORY, WeaknessTagStore};
use crate::error::Result;
use crate::infrastructure::external::notion::{
    self, NotionClient, heading_block, number_value, paragraph_block, relation_value,
    rich_text_value, select_value, title_value,
};
use crate::utils::config::EnvConfig;

/// IELTS セッションのアダプター
///
/// ライティングログ・弱点タグ・語彙バンクの3データベースへ書き込む。
pub struct NotionIeltsRepository {
    client: NotionClient,
}

impl NotionIeltsRepository {
    /// 新しいアダプターを作成
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: NotionClient::new()?,
        })
    }

    fn writing_db(&self) -> Result<String> {
        EnvConfig::require_db_id(&EnvConfig::get().writing_db_id, "NOTION_WRITING_DB_ID")
    }

    fn weakness_db(&self) -> Result<String> {
        EnvConfig::require_db_id(&EnvConfig::get().weakness_db_id, "NOTION_WEAKNESS_DB_ID")
    }

    fn vocab_db(&self) -> Result<String> {
        EnvConfig::require_db_id(&EnvConfig::get().vocab_db_id, "NOTION_VOCAB_DB_ID")
    }
}

#[async_trait]
impl WeaknessTagStore for NotionIeltsRepository {
    async fn find_tag(&self, name: &str) -> Result<Option<String>> {
        let database_id = self.weakness_db()?;

        // タイトルの完全一致。曖昧一致や大文字小文字の正規化はしない。
        let response = self
            .client
            .query_database(
                &database_id,
                Some(json!({ "property": "Name", "title": { "equals": name } })),
                None,
                None,
                None,
            )
            .await?;

        Ok(response
            .results
            .first()
            .map(|page| notion::page_str(page, "id")))
    }

    async fn create_tag(&self, name: &str) -> Result<String> {
        let database_id = self.weakness_db()?;

        let page = self
            .client
            .create_page(
                &database_id,
                json!({
                    "Name": title_value(name),
                    "Category": select_value(DEFAULT_TAG_CATEGORY),
                }),
                None,
            )
            .await?;

        Ok(notion::page_str(&page, "id"))
    }
}

#[async_trait]
impl IeltsRepository for NotionIeltsRepository {
    async fn create_writing_log(
        &self,
        session: &IeltsSession,
        weakness_ids: &[String],
    ) -> Result<String> {
        let database_id = self.writing_db()?;

        // タイトルは同期日の YYYY-MM-DD
        let title = session.created_at.format("%Y-%m-%d").to_string();
        let criteria = &session.assessment.criteria;

        let properties = json!({
            "Title": title_value(&title),
            "Score": number_value(session.assessment.overall_band),
            "TR": number_value(criteria.tr.score),
            "CC": number_value(criteria.cc.score),
            "LR": number_value(criteria.lr.score),
            "GRA": number_value(criteria.gra.score),
            "TaskType": select_value(&session.task_type.to_string()),
            "Weakness": relation_value(weakness_ids),
        });

        let children = json!([
            heading_block("Essay"),
            paragraph_block(&session.essay),
            heading_block("Feedback"),
            paragraph_block(&session.assessment.rewrite_suggestion),
        ]);

        let page = self
            .client
            .create_page(&database_id, properties, Some(children))
            .await?;

        Ok(notion::page_str(&page, "id"))
    }

    async fn create_vocabulary_entry(&self, item: &VocabularyItem) -> Result<()> {
        let database_id = self.vocab_db()?;

        self.client
            .create_page(
                &database_id,
                json!({
                    "Word": title_value(&item.word),
                    "Meaning": rich_text_value(&item.meaning),
                    "Example": rich_text_value(&item.example),
                    "Status": select_value("Learning"),
                }),
                None,
            )
            .await?;

        Ok(())
    }
}
