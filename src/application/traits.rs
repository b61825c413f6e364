//! Application層の抽象化トレイト定義
//! 外部依存を抽象化し、テスト可能な構造を提供します

use async_trait::async_trait;

use crate::domain::ielts::{IeltsAssessment, IeltsSession, TaskType, VocabularyItem};
use crate::domain::proofread::ReviseRequest;
use crate::domain::toeic::{DescriptionType, ToeicQuestion};
use crate::domain::word::{CreateWordParams, Cursor, PaginatedWords, UpdateWordParams, Word};
use crate::error::Result;

/// 単語レコードの永続化抽象
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// 作成日時の降順で1ページ分を取得
    async fn get_words(&self, cursor: Option<Cursor>, page_size: u32) -> Result<PaginatedWords>;

    /// 新しい単語レコードを作成
    async fn create_word(&self, params: &CreateWordParams) -> Result<Word>;

    /// 既存レコードを更新
    async fn update_word(&self, params: &UpdateWordParams) -> Result<Word>;

    /// レコードをアーカイブする（物理削除はしない）
    async fn archive_word(&self, id: &str) -> Result<()>;

    /// カテゴリ選択肢の一覧をスキーマから取得
    async fn get_categories(&self) -> Result<Vec<String>>;
}

/// IELTS セッションの永続化抽象
///
/// 弱点タグの照合は [`crate::domain::weakness::WeaknessTagStore`] として
/// 同じアダプターが実装する。
#[async_trait]
pub trait IeltsRepository: crate::domain::weakness::WeaknessTagStore {
    /// ライティングログレコードを作成し、そのIDを返す
    async fn create_writing_log(
        &self,
        session: &IeltsSession,
        weakness_ids: &[String],
    ) -> Result<String>;

    /// 語彙バンクへ1項目を登録
    async fn create_vocabulary_entry(&self, item: &VocabularyItem) -> Result<()>;
}

/// IELTS 向け生成機能の抽象化
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// ライティングお題を生成
    async fn generate_problem(&self, task_type: TaskType) -> Result<String>;

    /// エッセイをスキーマ制約付きで評価
    async fn evaluate_essay(&self, essay: &str, task_type: TaskType) -> Result<IeltsAssessment>;
}

/// 英文添削の抽象化
#[async_trait]
pub trait ReviseGateway: Send + Sync {
    /// 添削結果（Markdown）を生成
    async fn revise_text(&self, request: &ReviseRequest) -> Result<String>;
}

/// 添削結果アーカイブの抽象化
#[async_trait]
pub trait ProofreadArchive: Send + Sync {
    /// 原文と添削後の文章を1レコードとして保存し、そのIDを返す
    async fn archive_revision(&self, original: &str, revised: &str) -> Result<String>;
}

/// TOEIC 例文解説の生成抽象
#[async_trait]
pub trait ToeicGateway: Send + Sync {
    /// 例文の解説（Markdown・日本語）を生成
    async fn explain_sentence(
        &self,
        sentence: &str,
        description_type: DescriptionType,
    ) -> Result<String>;
}

/// TOEIC 問題レコードの永続化抽象
#[async_trait]
pub trait ToeicRepository: Send + Sync {
    /// 例文と解説を1レコードとして保存し、そのIDを返す
    async fn save_question(&self, sentence: &str, description: &str) -> Result<String>;

    /// 問題一覧を作成日時の降順で取得（本文ブロック込み）
    async fn list_questions(&self) -> Result<Vec<ToeicQuestion>>;

    /// 「できるようになった」チェックボックスを更新
    async fn set_completed(&self, page_id: &str, completed: bool) -> Result<()>;
}
