//! TOEIC 例文解説のユースケースを管理するサービス
//!
//! # 責任
//! - 例文解説の生成と保存
//! - 問題一覧の取得とチェックボックス更新

use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::application::traits::{ToeicGateway, ToeicRepository};
use crate::domain::toeic::{DescriptionType, ToeicQuestion};
use crate::error::{EigoCoachError, Result};

/// TOEIC サービス
pub struct ToeicService {
    /// 解説生成ゲートウェイ（抽象化されたインターフェース）
    gateway: Box<dyn ToeicGateway>,
    /// 問題リポジトリ
    repo: Box<dyn ToeicRepository>,
    /// 生成 API の同時実行数制限用セマフォ（デーモン全体で共有）
    semaphore: Arc<Semaphore>,
}

impl ToeicService {
    pub fn new(
        gateway: Box<dyn ToeicGateway>,
        repo: Box<dyn ToeicRepository>,
        semaphore: Arc<Semaphore>,
    ) -> Self {
        Self {
            gateway,
            repo,
            semaphore,
        }
    }

    /// 例文の解説を生成
    pub async fn explain_sentence(
        &self,
        sentence: &str,
        description_type: DescriptionType,
    ) -> Result<String> {
        if sentence.trim().is_empty() {
            return Err(EigoCoachError::ValidationError(
                "sentence cannot be empty".into(),
            ));
        }

        let _permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| EigoCoachError::SystemError(format!("semaphore acquire failed: {}", e)))?;

        self.gateway.explain_sentence(sentence, description_type).await
    }

    /// 例文と解説を保存し、作成されたレコードIDを返す
    pub async fn save_question(&self, sentence: &str, description: &str) -> Result<String> {
        if sentence.trim().is_empty() || description.trim().is_empty() {
            return Err(EigoCoachError::ValidationError(
                "both sentence and description are required".into(),
            ));
        }
        self.repo.save_question(sentence, description).await
    }

    /// 保存済みの問題一覧を取得
    pub async fn list_questions(&self) -> Result<Vec<ToeicQuestion>> {
        self.repo.list_questions().await
    }

    /// 「できるようになった」チェックボックスを更新
    pub async fn set_completed(&self, page_id: &str, completed: bool) -> Result<()> {
        if page_id.trim().is_empty() {
            return Err(EigoCoachError::ValidationError("page id is required".into()));
        }
        self.repo.set_completed(page_id, completed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockToeicGateway;

    #[async_trait]
    impl ToeicGateway for MockToeicGateway {
        async fn explain_sentence(
            &self,
            sentence: &str,
            description_type: DescriptionType,
        ) -> Result<String> {
            Ok(format!("### 日本語訳\n{} ({})", sentence, description_type))
        }
    }

    #[derive(Default)]
    struct MockToeicRepo;

    #[async_trait]
    impl ToeicRepository for MockToeicRepo {
        async fn save_question(&self, _sentence: &str, _description: &str) -> Result<String> {
            Ok("page-1".to_string())
        }

        async fn list_questions(&self) -> Result<Vec<ToeicQuestion>> {
            Ok(vec![])
        }

        async fn set_completed(&self, _page_id: &str, _completed: bool) -> Result<()> {
            Ok(())
        }
    }

    fn service() -> ToeicService {
        ToeicService::new(
            Box::new(MockToeicGateway),
            Box::new(MockToeicRepo::default()),
            Arc::new(Semaphore::new(2)),
        )
    }

    /// 空の例文は検証エラーになる
    #[tokio::test]
    async fn empty_sentence_fails_validation() {
        let err = service()
            .explain_sentence("", DescriptionType::Grammar)
            .await
            .unwrap_err();
        assert!(matches!(err, EigoCoachError::ValidationError(_)));
    }

    /// 解説生成は種別をゲートウェイへ引き渡す
    #[tokio::test]
    async fn explain_delegates_with_type() {
        let text = service()
            .explain_sentence("The meeting was postponed.", DescriptionType::Vocabulary)
            .await
            .unwrap();
        assert!(text.contains("vocabulary"));
    }

    /// 保存は両フィールドを必須とする
    #[tokio::test]
    async fn save_requires_sentence_and_description() {
        let err = service().save_question("sentence", " ").await.unwrap_err();
        assert!(matches!(err, EigoCoachError::ValidationError(_)));

        let id = service()
            .save_question("sentence", "### 解説")
            .await
            .unwrap();
        assert_eq!(id, "page-1");
    }

    /// 空のページIDでのチェック更新は拒否される
    #[tokio::test]
    async fn set_completed_requires_page_id() {
        let err = service().set_completed("", true).await.unwrap_err();
        assert!(matches!(err, EigoCoachError::ValidationError(_)));
    }
}
