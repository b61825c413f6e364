//! IELTS ライティング練習のユースケースを管理するサービス
//!
//! # 責任
//! - お題生成とエッセイ評価（生成 API 呼び出しの同時実行数制御つき)
//! - 評価結果セッションのストアへの同期
//!   （弱点タグ照合 → ライティングログ作成 → 語彙の並行登録）

use std::sync::Arc;
use tokio::sync::Semaphore;

use chrono::Utc;
use futures::future::try_join_all;

use crate::application::traits::{AiGateway, IeltsRepository};
use crate::domain::ielts::{IeltsAssessment, IeltsSession, TaskType};
use crate::domain::weakness::reconcile_tags;
use crate::error::{EigoCoachError, Result};

/// セッション同期の結果
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// 作成されたライティングログのID
    pub log_id: String,
    /// 照合できた弱点タグの数（入力より少なければ一部スキップ）
    pub linked_tags: usize,
    /// 登録した語彙の数
    pub vocabulary_count: usize,
}

/// IELTS サービス
pub struct IeltsService {
    /// 生成ゲートウェイ（抽象化されたインターフェース）
    gateway: Box<dyn AiGateway>,
    /// セッションリポジトリ
    repo: Box<dyn IeltsRepository>,
    /// 生成 API の同時実行数制限用セマフォ（デーモン全体で共有）
    semaphore: Arc<Semaphore>,
}

impl IeltsService {
    pub fn new(
        gateway: Box<dyn AiGateway>,
        repo: Box<dyn IeltsRepository>,
        semaphore: Arc<Semaphore>,
    ) -> Self {
        Self {
            gateway,
            repo,
            semaphore,
        }
    }

    /// ライティングお題を生成
    pub async fn generate_problem(&self, task_type: TaskType) -> Result<String> {
        let _permit = self.acquire_permit().await?;
        self.gateway.generate_problem(task_type).await
    }

    /// エッセイを評価
    pub async fn evaluate_essay(
        &self,
        essay: &str,
        task_type: TaskType,
    ) -> Result<IeltsAssessment> {
        if essay.trim().is_empty() {
            return Err(EigoCoachError::ValidationError(
                "essay content cannot be empty".into(),
            ));
        }
        let _permit = self.acquire_permit().await?;
        self.gateway.evaluate_essay(essay, task_type).await
    }

    /// 評価済みセッションをストアへ同期
    ///
    /// 1. 弱点タグを照合（失敗したタグはスキップして続行）
    /// 2. ライティングログを作成（失敗したら同期全体が失敗）
    /// 3. 語彙を並行登録（1件でも失敗すればエラーを返す。
    ///    既に登録済みの項目はロールバックされない）
    pub async fn sync_session(
        &self,
        essay: &str,
        task_type: TaskType,
        assessment: IeltsAssessment,
    ) -> Result<SyncOutcome> {
        if essay.trim().is_empty() {
            return Err(EigoCoachError::ValidationError(
                "essay content cannot be empty".into(),
            ));
        }

        let weakness_ids = reconcile_tags(&*self.repo, &assessment.weakness_tags).await;

        let session = IeltsSession {
            essay: essay.to_string(),
            task_type,
            assessment,
            created_at: Utc::now(),
        };

        let log_id = self.repo.create_writing_log(&session, &weakness_ids).await?;

        let vocabulary = &session.assessment.key_vocabulary;
        try_join_all(
            vocabulary
                .iter()
                .map(|item| self.repo.create_vocabulary_entry(item)),
        )
        .await?;

        Ok(SyncOutcome {
            log_id,
            linked_tags: weakness_ids.len(),
            vocabulary_count: vocabulary.len(),
        })
    }

    async fn acquire_permit(&self) -> Result<tokio::sync::OwnedSemaphorePermit> {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| EigoCoachError::SystemError(format!("semaphore acquire failed: {}", e)))
    }
}
