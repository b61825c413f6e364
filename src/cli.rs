use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::domain::ielts::TaskType;
use crate::domain::proofread::{ErrorLevel, ErrorType, WritingStyle};
use crate::domain::toeic::DescriptionType;

#[derive(Parser)]
#[command(author, version, about = "English study client (daemon control)")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// 📚 ビジネス英単語の操作
    Word {
        #[command(subcommand)]
        action: WordCmd,
    },
    /// ✍️ IELTS ライティング練習
    Ielts {
        #[command(subcommand)]
        action: IeltsCmd,
    },
    /// 🔤 英文添削
    Revise {
        /// 添削する英文（--file と排他）
        text: Option<String>,
        /// 英文をファイルから読む
        #[arg(long)]
        file: Option<PathBuf>,
        /// 文体 (casual / formal / normal)
        #[arg(long, default_value = "normal", value_parser = WritingStyle::from_str)]
        style: WritingStyle,
        /// 誤りのレベル (basic / intermediate / advanced)
        #[arg(long, default_value = "intermediate", value_parser = ErrorLevel::from_str)]
        level: ErrorLevel,
        /// 誤りの種類 (grammar / vocabulary / usage)、複数指定可
        #[arg(long = "error-type", value_parser = ErrorType::from_str)]
        error_types: Vec<ErrorType>,
        /// 添削結果をアーカイブへ保存する
        #[arg(long, default_value_t = false)]
        save: bool,
    },
    /// 📖 TOEIC 例文解説
    Toeic {
        #[command(subcommand)]
        action: ToeicCmd,
    },
    /// ヘルスチェック
    Health,
}

#[derive(Subcommand)]
pub enum WordCmd {
    /// 登録
    Add {
        japanese: String,
        english: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// 更新
    Update {
        id: String,
        japanese: String,
        english: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// アーカイブ（一覧から除外）
    Remove { id: String },
    /// 一覧表示（1ページ）
    List {
        /// 前回レスポンスの next_cursor をそのまま渡す
        #[arg(long)]
        cursor: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// 全件表示
    ListAll,
    /// カテゴリ一覧
    Categories,
}

#[derive(Subcommand)]
pub enum IeltsCmd {
    /// ライティングお題を生成
    Question {
        #[arg(long, default_value = "task2", value_parser = TaskType::from_str)]
        task_type: TaskType,
    },
    /// エッセイを評価（結果はJSONで出力される）
    Evaluate {
        /// エッセイ本文（--file と排他）
        essay: Option<String>,
        /// エッセイをファイルから読む
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, default_value = "task2", value_parser = TaskType::from_str)]
        task_type: TaskType,
    },
    /// 評価結果をストアへ同期
    Sync {
        /// エッセイ本文のファイル
        #[arg(long)]
        essay_file: PathBuf,
        /// `ielts evaluate` が出力した評価JSONのファイル
        #[arg(long)]
        assessment_file: PathBuf,
        #[arg(long, default_value = "task2", value_parser = TaskType::from_str)]
        task_type: TaskType,
    },
}

#[derive(Subcommand)]
pub enum ToeicCmd {
    /// 例文の解説を生成
    Explain {
        sentence: String,
        /// 解説の種類 (vocabulary / grammar)
        #[arg(long = "type", default_value = "grammar", value_parser = DescriptionType::from_str)]
        description_type: DescriptionType,
        /// 生成した解説をそのまま保存する
        #[arg(long, default_value_t = false)]
        save: bool,
    },
    /// 保存済みの問題一覧
    List,
    /// 「できるようになった」を更新
    Check {
        page_id: String,
        /// チェックを外す場合に指定
        #[arg(long, default_value_t = false)]
        undo: bool,
    },
}
