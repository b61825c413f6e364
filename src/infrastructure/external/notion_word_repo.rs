//! 単語データベースのアダプター実装
//! Application層のWordRepositoryトレイトを実装

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};

use crate::application::traits::WordRepository;
use crate::domain::word::{CreateWordParams, Cursor, PaginatedWords, UpdateWordParams, Word};
use crate::error::Result;
use crate::infrastructure::external::notion::{
    self, NotionClient, date_value, rich_text_value, select_value, title_value,
};
use crate::utils::config::EnvConfig;

/// 単語データベースのアダプター
pub struct NotionWordRepository {
    client: NotionClient,
}

impl NotionWordRepository {
    /// 新しいアダプターを作成
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: NotionClient::new()?,
        })
    }

    fn database_id(&self) -> Result<String> {
        EnvConfig::require_db_id(&EnvConfig::get().word_db_id, "NOTION_WORD_DB_ID")
    }

    /// ストアのネストしたプロパティ表現をフラットな Word へ投影する
    fn project(page: &Value) -> Word {
        Word {
            id: notion::page_str(page, "id"),
            japanese: notion::page_text(page, "Japanese", "title"),
            english: notion::page_text(page, "English", "rich_text"),
            category: notion::page_select(page, "Category"),
        }
    }

    fn build_properties(japanese: &str, english: &str, category: Option<&str>) -> Value {
        let mut properties = json!({
            "Japanese": title_value(japanese),
            "English": rich_text_value(english),
        });
        if let Some(category) = category {
            properties["Category"] = select_value(category);
        }
        properties
    }
}

#[async_trait]
impl WordRepository for NotionWordRepository {
    async fn get_words(&self, cursor: Option<Cursor>, page_size: u32) -> Result<PaginatedWords> {
        let database_id = self.database_id()?;

        let response = self
            .client
            .query_database(
                &database_id,
                None,
                Some(json!([{ "property": "CreatedAt", "direction": "descending" }])),
                cursor.as_ref().map(|c| c.as_str()),
                Some(page_size),
            )
            .await?;

        Ok(PaginatedWords {
            words: response.results.iter().map(Self::project).collect(),
            next_cursor: response.next_cursor.map(Cursor::new),
            has_more: response.has_more,
        })
    }

    async fn create_word(&self, params: &CreateWordParams) -> Result<Word> {
        let database_id = self.database_id()?;

        let mut properties =
            Self::build_properties(&params.japanese, &params.english, params.category.as_deref());
        properties["CreatedAt"] = date_value(&Utc::now().to_rfc3339());

        let page = self.client.create_page(&database_id, properties, None).await?;

        Ok(Word {
            id: notion::page_str(&page, "id"),
            japanese: params.japanese.clone(),
            english: params.english.clone(),
            category: params.category.clone().unwrap_or_default(),
        })
    }

    async fn update_word(&self, params: &UpdateWordParams) -> Result<Word> {
        let properties =
            Self::build_properties(&params.japanese, &params.english, params.category.as_deref());

        self.client.update_page(&params.id, properties).await?;

        Ok(Word {
            id: params.id.clone(),
            japanese: params.japanese.clone(),
            english: params.english.clone(),
            category: params.category.clone().unwrap_or_default(),
        })
    }

    async fn archive_word(&self, id: &str) -> Result<()> {
        self.client.archive_page(id).await
    }

    async fn get_categories(&self) -> Result<Vec<String>> {
        let database_id = self.database_id()?;
        let database = self.client.retrieve_database(&database_id).await?;

        // スキーマ側の select オプション一覧を既存カテゴリとして扱う
        let categories = database
            .pointer("/properties/Category/select/options")
            .and_then(Value::as_array)
            .map(|options| {
                options
                    .iter()
                    .filter_map(|option| option.get("name").and_then(Value::as_str))
                    .map(|name| name.to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// プロパティの投影：欠けたフィールドは空文字列になる
    #[test]
    fn projection_fills_missing_fields_with_empty() {
        let page = json!({
            "id": "w1",
            "properties": {
                "Japanese": { "title": [{ "text": { "content": "会議" } }] }
            }
        });

        let word = NotionWordRepository::project(&page);
        assert_eq!(word.id, "w1");
        assert_eq!(word.japanese, "会議");
        assert_eq!(word.english, "");
        assert_eq!(word.category, "");
    }

    /// カテゴリ未指定時は Category プロパティ自体を送らない
    #[test]
    fn category_is_omitted_when_absent() {
        let props = NotionWordRepository::build_properties("会議", "meeting", None);
        assert!(props.get("Category").is_none());

        let props = NotionWordRepository::build_properties("会議", "meeting", Some("Office"));
        assert_eq!(props.pointer("/Category/select/name").unwrap(), "Office");
    }
}
