//! IPCコマンドハンドラー
//!
//! # 責任
//! - IPCコマンドの処理と適切なサービスへの委譲
//! - エラーのユーザー向けメッセージへの変換
//! - レスポンスの生成

use crate::application::{IeltsService, ProofreadService, ToeicService, WordService};
use crate::domain::proofread::ReviseRequest;
use crate::domain::word::{CreateWordParams, Cursor, UpdateWordParams};
use crate::error::Result;
use crate::ipc::{IpcCmd, IpcResp};

/// コマンドハンドラー
pub struct CommandHandler {
    words: WordService,
    ielts: IeltsService,
    proofread: ProofreadService,
    toeic: ToeicService,
}

impl CommandHandler {
    /// 新しいCommandHandlerを作成
    pub fn new(
        words: WordService,
        ielts: IeltsService,
        proofread: ProofreadService,
        toeic: ToeicService,
    ) -> Self {
        Self {
            words,
            ielts,
            proofread,
            toeic,
        }
    }

    /// IPCコマンドを処理
    ///
    /// サービス側のエラーは `ok: false` のレスポンスに変換する。
    /// デーモンが落ちることはない。
    pub async fn handle(&self, cmd: IpcCmd) -> IpcResp {
        match self.dispatch(cmd).await {
            Ok(msg) => IpcResp { ok: true, msg },
            Err(e) => {
                use crate::error::ErrorSeverity;
                match e.severity() {
                    ErrorSeverity::Error | ErrorSeverity::Warning => {
                        eprintln!("⚠️  command failed: {}", e)
                    }
                    _ => {}
                }
                IpcResp {
                    ok: false,
                    msg: e.to_string(),
                }
            }
        }
    }

    async fn dispatch(&self, cmd: IpcCmd) -> Result<String> {
        match cmd {
            IpcCmd::WordList { cursor, page_size } => {
                let page = self
                    .words
                    .list_words(cursor.map(Cursor::new), page_size)
                    .await?;
                to_json(&page)
            }
            IpcCmd::WordListAll => {
                let listing = self.words.list_all_words().await?;
                to_json(&listing)
            }
            IpcCmd::WordAdd {
                japanese,
                english,
                category,
            } => {
                let word = self
                    .words
                    .add_word(CreateWordParams {
                        japanese,
                        english,
                        category,
                    })
                    .await?;
                to_json(&word)
            }
            IpcCmd::WordUpdate {
                id,
                japanese,
                english,
                category,
            } => {
                let word = self
                    .words
                    .update_word(UpdateWordParams {
                        id,
                        japanese,
                        english,
                        category,
                    })
                    .await?;
                to_json(&word)
            }
            IpcCmd::WordDelete { id } => {
                self.words.delete_word(&id).await?;
                Ok(format!("archived {}", id))
            }
            IpcCmd::WordCategories => {
                let categories = self.words.list_categories().await?;
                to_json(&categories)
            }
            IpcCmd::IeltsQuestion { task_type } => self.ielts.generate_problem(task_type).await,
            IpcCmd::IeltsEvaluate { essay, task_type } => {
                let assessment = self.ielts.evaluate_essay(&essay, task_type).await?;
                to_json(&assessment)
            }
            IpcCmd::IeltsSync {
                essay,
                task_type,
                assessment,
            } => {
                let outcome = self.ielts.sync_session(&essay, task_type, assessment).await?;
                Ok(format!(
                    "synced: log={} tags={} vocabulary={}",
                    outcome.log_id, outcome.linked_tags, outcome.vocabulary_count
                ))
            }
            IpcCmd::Revise {
                text,
                style,
                level,
                error_types,
            } => {
                self.proofread
                    .revise_text(ReviseRequest {
                        text,
                        style,
                        level,
                        error_types,
                    })
                    .await
            }
            IpcCmd::ReviseSave { original, revised } => {
                let id = self.proofread.archive_revision(&original, &revised).await?;
                Ok(format!("archived revision as {}", id))
            }
            IpcCmd::ToeicExplain {
                sentence,
                description_type,
            } => self.toeic.explain_sentence(&sentence, description_type).await,
            IpcCmd::ToeicSave {
                sentence,
                description,
            } => {
                let id = self.toeic.save_question(&sentence, &description).await?;
                Ok(format!("saved question as {}", id))
            }
            IpcCmd::ToeicList => {
                let questions = self.toeic.list_questions().await?;
                to_json(&questions)
            }
            IpcCmd::ToeicCheck { page_id, completed } => {
                self.toeic.set_completed(&page_id, completed).await?;
                Ok(format!("updated {} -> {}", page_id, completed))
            }
            IpcCmd::Health => Ok("OK".to_string()),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| crate::error::EigoCoachError::IpcSerializationError(e.to_string()))
}
