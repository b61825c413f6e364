//! ビジネス英単語のユースケースを管理するサービス
//!
//! # 責任
//! - 単語レコードの追加・更新・アーカイブ・一覧取得
//! - ページネーションの既定値と全件取得ループの制御
//! - 入力の事前検証

use crate::application::traits::WordRepository;
use crate::domain::word::{
    CreateWordParams, Cursor, PaginatedWords, UpdateWordParams, Word, WordListing,
};
use crate::error::{EigoCoachError, Result};

/// ページサイズ未指定時の既定値
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// 全件取得ループの1ページあたり件数
pub const FULL_LIST_PAGE_SIZE: u32 = 100;
/// 全件取得の累積上限（暴走防止）
pub const FULL_LIST_MAX_RECORDS: usize = 1000;

/// 単語サービス
pub struct WordService {
    /// 単語リポジトリ（抽象化されたインターフェース）
    repo: Box<dyn WordRepository>,
}

impl WordService {
    pub fn new(repo: Box<dyn WordRepository>) -> Self {
        Self { repo }
    }

    /// 1ページ分の単語一覧を取得
    ///
    /// `page_size` が未指定または0の場合は既定値10を使う。
    /// カーソルは解釈せずそのままストアへ渡す。
    pub async fn list_words(
        &self,
        cursor: Option<Cursor>,
        page_size: Option<u32>,
    ) -> Result<PaginatedWords> {
        let size = match page_size {
            Some(n) if n > 0 => n,
            _ => DEFAULT_PAGE_SIZE,
        };
        self.repo.get_words(cursor, size).await
    }

    /// 全件取得
    ///
    /// `has_more` が偽になるまでページを辿って蓄積する。累積件数が
    /// 上限に達した場合は打ち切り、`truncated` を立てて警告を出す。
    pub async fn list_all_words(&self) -> Result<WordListing> {
        let mut words: Vec<Word> = Vec::new();
        let mut cursor: Option<Cursor> = None;
        let mut truncated = false;

        loop {
            let page = self.repo.get_words(cursor, FULL_LIST_PAGE_SIZE).await?;
            words.extend(page.words);

            if words.len() >= FULL_LIST_MAX_RECORDS {
                if page.has_more {
                    truncated = true;
                    eprintln!(
                        "⚠️  word listing truncated at {} records; remaining pages were not fetched",
                        FULL_LIST_MAX_RECORDS
                    );
                }
                words.truncate(FULL_LIST_MAX_RECORDS);
                break;
            }

            if !page.has_more {
                break;
            }
            cursor = page.next_cursor;
        }

        Ok(WordListing { words, truncated })
    }

    /// 単語を追加
    pub async fn add_word(&self, params: CreateWordParams) -> Result<Word> {
        if params.japanese.trim().is_empty() || params.english.trim().is_empty() {
            return Err(EigoCoachError::ValidationError(
                "japanese and english are both required".into(),
            ));
        }
        self.repo.create_word(&params).await
    }

    /// 単語を更新
    pub async fn update_word(&self, params: UpdateWordParams) -> Result<Word> {
        if params.id.trim().is_empty() {
            return Err(EigoCoachError::ValidationError("id is required".into()));
        }
        if params.japanese.trim().is_empty() || params.english.trim().is_empty() {
            return Err(EigoCoachError::ValidationError(
                "japanese and english are both required".into(),
            ));
        }
        self.repo.update_word(&params).await
    }

    /// 単語をアーカイブ（以後の一覧から除外される）
    pub async fn delete_word(&self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(EigoCoachError::ValidationError("id is required".into()));
        }
        self.repo.archive_word(id).await
    }

    /// カテゴリ一覧を取得
    pub async fn list_categories(&self) -> Result<Vec<String>> {
        self.repo.get_categories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// テスト用のインメモリ単語リポジトリ
    ///
    /// 挿入順の逆（新しい順）で返す。アーカイブされたレコードは除外。
    /// 内部状態を Arc で共有するため、Box 化した後もテスト側から観測できる。
    #[derive(Clone)]
    struct MockWordRepo {
        words: Arc<Mutex<Vec<Word>>>,
        archived: Arc<Mutex<Vec<String>>>,
        requested_page_sizes: Arc<Mutex<Vec<u32>>>,
        next_id: Arc<Mutex<u32>>,
    }

    impl MockWordRepo {
        fn new() -> Self {
            Self {
                words: Arc::new(Mutex::new(Vec::new())),
                archived: Arc::new(Mutex::new(Vec::new())),
                requested_page_sizes: Arc::new(Mutex::new(Vec::new())),
                next_id: Arc::new(Mutex::new(1)),
            }
        }

        fn with_words(count: usize) -> Self {
            let repo = Self::new();
            {
                let mut words = repo.words.lock().unwrap();
                for i in 0..count {
                    words.push(Word {
                        id: format!("w{}", i + 1),
                        japanese: format!("単語{}", i + 1),
                        english: format!("word{}", i + 1),
                        category: String::new(),
                    });
                }
                *repo.next_id.lock().unwrap() = count as u32 + 1;
            }
            repo
        }

        fn live_newest_first(&self) -> Vec<Word> {
            let archived = self.archived.lock().unwrap();
            let mut live: Vec<Word> = self
                .words
                .lock()
                .unwrap()
                .iter()
                .filter(|w| !archived.contains(&w.id))
                .cloned()
                .collect();
            live.reverse();
            live
        }
    }

    #[async_trait]
    impl WordRepository for MockWordRepo {
        async fn get_words(
            &self,
            cursor: Option<Cursor>,
            page_size: u32,
        ) -> Result<PaginatedWords> {
            self.requested_page_sizes.lock().unwrap().push(page_size);

            let live = self.live_newest_first();
            // カーソルは「次ページの開始位置」を示すトークン
            let start = match &cursor {
                Some(c) => {
                    let token = serde_json::to_value(c).unwrap();
                    token.as_str().unwrap().parse::<usize>().unwrap()
                }
                None => 0,
            };

            let end = (start + page_size as usize).min(live.len());
            let has_more = end < live.len();
            Ok(PaginatedWords {
                words: live[start..end].to_vec(),
                next_cursor: has_more.then(|| Cursor::new(end.to_string())),
                has_more,
            })
        }

        async fn create_word(&self, params: &CreateWordParams) -> Result<Word> {
            let mut next = self.next_id.lock().unwrap();
            let word = Word {
                id: format!("w{}", *next),
                japanese: params.japanese.clone(),
                english: params.english.clone(),
                category: params.category.clone().unwrap_or_default(),
            };
            *next += 1;
            self.words.lock().unwrap().push(word.clone());
            Ok(word)
        }

        async fn update_word(&self, params: &UpdateWordParams) -> Result<Word> {
            let mut words = self.words.lock().unwrap();
            let word = words
                .iter_mut()
                .find(|w| w.id == params.id)
                .ok_or_else(|| EigoCoachError::StoreUnavailable("page not found".into()))?;
            word.japanese = params.japanese.clone();
            word.english = params.english.clone();
            if let Some(category) = &params.category {
                word.category = category.clone();
            }
            Ok(word.clone())
        }

        async fn archive_word(&self, id: &str) -> Result<()> {
            self.archived.lock().unwrap().push(id.to_string());
            Ok(())
        }

        async fn get_categories(&self) -> Result<Vec<String>> {
            Ok(vec!["Office".to_string(), "Meeting".to_string()])
        }
    }

    /// ページサイズ未指定・0指定時は既定値10がストアへ渡る
    #[tokio::test]
    async fn list_defaults_to_page_size_10() {
        let repo = MockWordRepo::with_words(3);
        let service = WordService::new(Box::new(repo.clone()));

        service.list_words(None, None).await.unwrap();
        service.list_words(None, Some(0)).await.unwrap();
        service.list_words(None, Some(25)).await.unwrap();

        let sizes = repo.requested_page_sizes.lock().unwrap().clone();
        assert_eq!(sizes, vec![10, 10, 25]);
    }

    /// 返る件数はページサイズ以下で、後続ページがあるときだけ has_more
    #[tokio::test]
    async fn list_returns_at_most_page_size() {
        let service = WordService::new(Box::new(MockWordRepo::with_words(15)));

        let page = service.list_words(None, Some(10)).await.unwrap();
        assert_eq!(page.words.len(), 10);
        assert!(page.has_more);
        assert!(page.is_consistent());

        let page2 = service
            .list_words(page.next_cursor, Some(10))
            .await
            .unwrap();
        assert_eq!(page2.words.len(), 5);
        assert!(!page2.has_more);
        assert!(page2.next_cursor.is_none());
    }

    /// 同じカーソルで再取得すれば同じ結果（冪等な読み取り）
    #[tokio::test]
    async fn same_cursor_returns_identical_page() {
        let service = WordService::new(Box::new(MockWordRepo::with_words(25)));

        let first = service.list_words(None, Some(10)).await.unwrap();
        let cursor = first.next_cursor.clone().unwrap();

        let a = service.list_words(Some(cursor.clone()), Some(10)).await.unwrap();
        let b = service.list_words(Some(cursor), Some(10)).await.unwrap();
        assert_eq!(a.words, b.words);
    }

    /// 追加した単語が次の一覧の先頭に現れる
    #[tokio::test]
    async fn created_word_appears_first() {
        let service = WordService::new(Box::new(MockWordRepo::with_words(5)));

        let created = service
            .add_word(CreateWordParams {
                japanese: "会議".to_string(),
                english: "meeting".to_string(),
                category: Some("Office".to_string()),
            })
            .await
            .unwrap();
        assert!(!created.id.is_empty());

        let page = service.list_words(None, Some(10)).await.unwrap();
        let first = &page.words[0];
        assert_eq!(first.id, created.id);
        assert_eq!(first.japanese, "会議");
        assert_eq!(first.english, "meeting");
        assert_eq!(first.category, "Office");
    }

    /// アーカイブした単語は以後の一覧に含まれない
    #[tokio::test]
    async fn archived_word_disappears_from_listing() {
        let service = WordService::new(Box::new(MockWordRepo::with_words(3)));

        service.delete_word("w2").await.unwrap();

        let page = service.list_words(None, Some(10)).await.unwrap();
        assert_eq!(page.words.len(), 2);
        assert!(page.words.iter().all(|w| w.id != "w2"));
    }

    /// 空の必須フィールドはストア呼び出し前に検証エラーになる
    #[tokio::test]
    async fn empty_fields_fail_validation() {
        let service = WordService::new(Box::new(MockWordRepo::new()));

        let err = service
            .add_word(CreateWordParams {
                japanese: "  ".to_string(),
                english: "meeting".to_string(),
                category: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EigoCoachError::ValidationError(_)));

        let err = service.delete_word("").await.unwrap_err();
        assert!(matches!(err, EigoCoachError::ValidationError(_)));
    }

    /// 全件取得は has_more が尽きるまでページを辿る
    #[tokio::test]
    async fn list_all_accumulates_every_page() {
        let service = WordService::new(Box::new(MockWordRepo::with_words(250)));

        let listing = service.list_all_words().await.unwrap();
        assert_eq!(listing.words.len(), 250);
        assert!(!listing.truncated);
    }

    /// 累積上限に達したら truncated を立てて打ち切る
    #[tokio::test]
    async fn list_all_truncates_at_cap() {
        let service = WordService::new(Box::new(MockWordRepo::with_words(1200)));

        let listing = service.list_all_words().await.unwrap();
        assert_eq!(listing.words.len(), FULL_LIST_MAX_RECORDS);
        assert!(listing.truncated);
    }
}
