//! TOEIC 例文解説のエンティティ – ドメイン層

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 解説の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionType {
    /// 語彙解説
    Vocabulary,
    /// 文法解説
    Grammar,
}

impl std::fmt::Display for DescriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptionType::Vocabulary => write!(f, "vocabulary"),
            DescriptionType::Grammar => write!(f, "grammar"),
        }
    }
}

impl FromStr for DescriptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vocabulary" => Ok(DescriptionType::Vocabulary),
            "grammar" => Ok(DescriptionType::Grammar),
            other => Err(format!(
                "unknown description type: {} (use vocabulary or grammar)",
                other
            )),
        }
    }
}

/// レコード本文の1ブロック
///
/// ストアのブロック表現をそのまま持ち回る（type とその中身）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockContent {
    #[serde(rename = "type")]
    pub block_type: String,
    pub content: serde_json::Value,
}

/// 保存済みのTOEIC問題レコード
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToeicQuestion {
    pub id: String,
    pub sentence: String,
    pub created_time: String,
    pub last_edited_time: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub content: Vec<BlockContent>,
}
