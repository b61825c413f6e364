//! サービスコンテナ
//!
//! # 責任
//! - 全ての依存関係の構築と管理
//! - サービス間の依存関係の解決
//! - テスト時のモック注入サポート

use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::application::{
    CommandHandler, IeltsService, ProofreadService, ToeicService, WordService,
    traits::{
        AiGateway, IeltsRepository, ProofreadArchive, ReviseGateway, ToeicGateway,
        ToeicRepository, WordRepository,
    },
};
use crate::error::Result;
use crate::infrastructure::external::{
    gemini_ielts_adapter::GeminiIeltsAdapter, gemini_proofread_adapter::GeminiProofreadAdapter,
    gemini_toeic_adapter::GeminiToeicAdapter, notion_ielts_repo::NotionIeltsRepository,
    notion_proofread_repo::NotionProofreadRepository, notion_toeic_repo::NotionToeicRepository,
    notion_word_repo::NotionWordRepository,
};

/// 生成 API の最大同時実行数
const MAX_CONCURRENT_GENERATIONS: usize = 2;

/// 依存関係の束（モック注入用）
pub struct Dependencies {
    pub word_repo: Box<dyn WordRepository>,
    pub ielts_repo: Box<dyn IeltsRepository>,
    pub ai_gateway: Box<dyn AiGateway>,
    pub revise_gateway: Box<dyn ReviseGateway>,
    pub proofread_archive: Box<dyn ProofreadArchive>,
    pub toeic_gateway: Box<dyn ToeicGateway>,
    pub toeic_repo: Box<dyn ToeicRepository>,
}

/// サービスコンテナ
pub struct ServiceContainer {
    /// コマンドハンドラー
    pub command_handler: Rc<CommandHandler>,
}

impl ServiceContainer {
    /// 本番のアダプター構成で新しいServiceContainerを作成
    pub fn new() -> Result<Self> {
        let deps = Dependencies {
            word_repo: Box::new(NotionWordRepository::new()?),
            ielts_repo: Box::new(NotionIeltsRepository::new()?),
            ai_gateway: Box::new(GeminiIeltsAdapter::new()?),
            revise_gateway: Box::new(GeminiProofreadAdapter::new()?),
            proofread_archive: Box::new(NotionProofreadRepository::new()?),
            toeic_gateway: Box::new(GeminiToeicAdapter::new()?),
            toeic_repo: Box::new(NotionToeicRepository::new()?),
        };
        Ok(Self::with_dependencies(deps))
    }

    /// 依存関係を注入して作成（テスト用）
    pub fn with_dependencies(deps: Dependencies) -> Self {
        // 生成 API を叩くサービス間でセマフォを共有する
        let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_GENERATIONS));

        let words = WordService::new(deps.word_repo);
        let ielts = IeltsService::new(deps.ai_gateway, deps.ielts_repo, semaphore.clone());
        let proofread = ProofreadService::new(
            deps.revise_gateway,
            deps.proofread_archive,
            semaphore.clone(),
        );
        let toeic = ToeicService::new(deps.toeic_gateway, deps.toeic_repo, semaphore);

        ServiceContainer {
            command_handler: Rc::new(CommandHandler::new(words, ielts, proofread, toeic)),
        }
    }
}
