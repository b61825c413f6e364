//! 英文添削のユースケースを管理するサービス
//!
//! # 責任
//! - 添削リクエストの検証と生成ゲートウェイへの委譲
//! - 添削結果のアーカイブ保存

use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::application::traits::{ProofreadArchive, ReviseGateway};
use crate::domain::proofread::ReviseRequest;
use crate::error::{EigoCoachError, Result};

/// 添削サービス
pub struct ProofreadService {
    /// 添削ゲートウェイ（抽象化されたインターフェース）
    gateway: Box<dyn ReviseGateway>,
    /// アーカイブリポジトリ
    archive: Box<dyn ProofreadArchive>,
    /// 生成 API の同時実行数制限用セマフォ（デーモン全体で共有）
    semaphore: Arc<Semaphore>,
}

impl ProofreadService {
    pub fn new(
        gateway: Box<dyn ReviseGateway>,
        archive: Box<dyn ProofreadArchive>,
        semaphore: Arc<Semaphore>,
    ) -> Self {
        Self {
            gateway,
            archive,
            semaphore,
        }
    }

    /// 英文を添削
    pub async fn revise_text(&self, request: ReviseRequest) -> Result<String> {
        if request.text.trim().is_empty() {
            return Err(EigoCoachError::ValidationError(
                "text cannot be empty".into(),
            ));
        }

        let _permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| EigoCoachError::SystemError(format!("semaphore acquire failed: {}", e)))?;

        self.gateway.revise_text(&request).await
    }

    /// 原文と添削結果をアーカイブし、作成されたレコードIDを返す
    pub async fn archive_revision(&self, original: &str, revised: &str) -> Result<String> {
        if original.trim().is_empty() || revised.trim().is_empty() {
            return Err(EigoCoachError::ValidationError(
                "both original and revised text are required".into(),
            ));
        }
        self.archive.archive_revision(original, revised).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proofread::{ErrorLevel, ErrorType, WritingStyle};
    use async_trait::async_trait;

    struct MockReviseGateway;

    #[async_trait]
    impl ReviseGateway for MockReviseGateway {
        async fn revise_text(&self, request: &ReviseRequest) -> Result<String> {
            Ok(format!("### 修正後の英文\n{}", request.text))
        }
    }

    struct MockArchive;

    #[async_trait]
    impl ProofreadArchive for MockArchive {
        async fn archive_revision(&self, _original: &str, _revised: &str) -> Result<String> {
            Ok("page-1".to_string())
        }
    }

    fn service() -> ProofreadService {
        ProofreadService::new(
            Box::new(MockReviseGateway),
            Box::new(MockArchive),
            Arc::new(Semaphore::new(2)),
        )
    }

    fn request(text: &str) -> ReviseRequest {
        ReviseRequest {
            text: text.to_string(),
            style: WritingStyle::Normal,
            level: ErrorLevel::Basic,
            error_types: vec![ErrorType::Grammar],
        }
    }

    /// 空テキストはゲートウェイ呼び出し前に検証エラーになる
    #[tokio::test]
    async fn empty_text_fails_validation() {
        let err = service().revise_text(request("   ")).await.unwrap_err();
        assert!(matches!(err, EigoCoachError::ValidationError(_)));
    }

    /// 正常系は添削結果をそのまま返す
    #[tokio::test]
    async fn revision_is_returned_verbatim() {
        let result = service()
            .revise_text(request("I goes to school."))
            .await
            .unwrap();
        assert!(result.contains("I goes to school."));
    }

    /// アーカイブは作成されたレコードIDを返す
    #[tokio::test]
    async fn archive_returns_record_id() {
        let id = service()
            .archive_revision("I goes to school.", "I go to school.")
            .await
            .unwrap();
        assert_eq!(id, "page-1");
    }

    /// 片方が空のアーカイブは拒否される
    #[tokio::test]
    async fn archive_requires_both_texts() {
        let err = service().archive_revision("", "revised").await.unwrap_err();
        assert!(matches!(err, EigoCoachError::ValidationError(_)));
    }
}
