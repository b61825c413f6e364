//! IELTS ライティング評価のエンティティ – ドメイン層

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ライティングタスク種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    /// グラフ・図表の説明
    #[serde(rename = "Task 1")]
    Task1,
    /// 意見論述
    #[serde(rename = "Task 2")]
    Task2,
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskType::Task1 => write!(f, "Task 1"),
            TaskType::Task2 => write!(f, "Task 2"),
        }
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task1" | "1" | "Task 1" => Ok(TaskType::Task1),
            "task2" | "2" | "Task 2" => Ok(TaskType::Task2),
            other => Err(format!("unknown task type: {} (use task1 or task2)", other)),
        }
    }
}

/// 採点基準ごとのスコアとフィードバック
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionFeedback {
    pub score: f64,
    pub feedback: String,
}

/// 4基準の内訳
///
/// TR=Task Response, CC=Coherence and Cohesion,
/// LR=Lexical Resource, GRA=Grammatical Range and Accuracy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaBreakdown {
    #[serde(rename = "TR")]
    pub tr: CriterionFeedback,
    #[serde(rename = "CC")]
    pub cc: CriterionFeedback,
    #[serde(rename = "LR")]
    pub lr: CriterionFeedback,
    #[serde(rename = "GRA")]
    pub gra: CriterionFeedback,
}

/// 語彙バンクへ登録する1項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub word: String,
    pub meaning: String,
    pub example: String,
}

/// エッセイ評価結果
///
/// 生成 API がスキーマ制約付きで返すJSONをそのまま型にしたもの。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IeltsAssessment {
    pub overall_band: f64,
    pub criteria: CriteriaBreakdown,
    pub rewrite_suggestion: String,
    pub weakness_tags: Vec<String>,
    pub key_vocabulary: Vec<VocabularyItem>,
}

/// 評価・同期1サイクル分のセッション
///
/// 同期時に一度だけ作成され、以後変更も削除もされない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IeltsSession {
    pub essay: String,
    pub task_type: TaskType,
    pub assessment: IeltsAssessment,
    pub created_at: DateTime<Utc>,
}
