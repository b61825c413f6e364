//! Unix Domain Socket (UDS) ベースのシンプルな IPC モジュール。
//! `eigo_coach` CLI ↔ `eigo_coachd` デーモン間の通信で利用します。
use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    path::{Path, PathBuf},
};

use crate::domain::ielts::{IeltsAssessment, TaskType};
use crate::domain::proofread::{ErrorLevel, ErrorType, WritingStyle};
use crate::domain::toeic::DescriptionType;

const SOCKET_FILENAME: &str = "eigo_coach.sock";
const DEFAULT_SOCKET_PATH: &str = "/tmp/eigo_coach.sock";

/// デーモンソケットパスを返します。
pub fn socket_path() -> PathBuf {
    if let Some(path) = socket_env("EIGO_COACH_SOCKET_PATH") {
        return PathBuf::from(path);
    }

    if let Some(dir) = socket_env("EIGO_COACH_SOCKET_DIR") {
        return PathBuf::from(dir).join(SOCKET_FILENAME);
    }

    PathBuf::from(DEFAULT_SOCKET_PATH)
}

/// CLI からデーモンへ送るコマンド列挙。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum IpcCmd {
    /// 単語一覧（1ページ）
    WordList {
        #[serde(default)]
        cursor: Option<String>,
        #[serde(default)]
        page_size: Option<u32>,
    },
    /// 単語全件取得
    WordListAll,
    /// 単語追加
    WordAdd {
        japanese: String,
        english: String,
        #[serde(default)]
        category: Option<String>,
    },
    /// 単語更新
    WordUpdate {
        id: String,
        japanese: String,
        english: String,
        #[serde(default)]
        category: Option<String>,
    },
    /// 単語アーカイブ
    WordDelete { id: String },
    /// カテゴリ一覧
    WordCategories,
    /// ライティングお題生成
    IeltsQuestion { task_type: TaskType },
    /// エッセイ評価
    IeltsEvaluate { essay: String, task_type: TaskType },
    /// 評価済みセッションの同期
    IeltsSync {
        essay: String,
        task_type: TaskType,
        assessment: IeltsAssessment,
    },
    /// 英文添削
    Revise {
        text: String,
        style: WritingStyle,
        level: ErrorLevel,
        error_types: Vec<ErrorType>,
    },
    /// 添削結果のアーカイブ
    ReviseSave { original: String, revised: String },
    /// TOEIC 例文解説生成
    ToeicExplain {
        sentence: String,
        description_type: DescriptionType,
    },
    /// TOEIC 例文と解説の保存
    ToeicSave { sentence: String, description: String },
    /// TOEIC 問題一覧
    ToeicList,
    /// 「できるようになった」チェック更新
    ToeicCheck { page_id: String, completed: bool },
    /// ヘルスチェック
    Health,
}

/// デーモンからの汎用レスポンス。
///
/// 構造化された結果（一覧・評価JSONなど）は `msg` にJSON文字列として載せる。
#[derive(Debug, Serialize, Deserialize)]
pub struct IpcResp {
    pub ok: bool,
    pub msg: String,
}

fn socket_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// コマンドを送信して `IpcResp` を取得する同期ユーティリティ。
pub fn send_cmd(cmd: &IpcCmd) -> Result<IpcResp, Box<dyn Error>> {
    use futures::{SinkExt, StreamExt};
    use tokio::net::UnixStream;
    use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let path = socket_path();
            if !Path::new(&path).exists() {
                return Err("daemon socket not found".into());
            }

            let stream = UnixStream::connect(path).await?;
            let (r, w) = stream.into_split();
            let mut writer = FramedWrite::new(w, LinesCodec::new());
            let mut reader = FramedRead::new(r, LinesCodec::new());

            writer.send(serde_json::to_string(cmd)?).await?;
            if let Some(Ok(line)) = reader.next().await {
                Ok(serde_json::from_str::<IpcResp>(&line)?)
            } else {
                Err("no response from daemon".into())
            }
        })
}
