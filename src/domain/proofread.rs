//! 英文添削リクエストのエンティティ – ドメイン層

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 文体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingStyle {
    Casual,
    Formal,
    Normal,
}

impl std::fmt::Display for WritingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WritingStyle::Casual => write!(f, "casual"),
            WritingStyle::Formal => write!(f, "formal"),
            WritingStyle::Normal => write!(f, "normal"),
        }
    }
}

impl FromStr for WritingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "casual" => Ok(WritingStyle::Casual),
            "formal" => Ok(WritingStyle::Formal),
            "normal" => Ok(WritingStyle::Normal),
            other => Err(format!("unknown writing style: {}", other)),
        }
    }
}

/// 指摘する誤りのレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorLevel::Basic => write!(f, "basic"),
            ErrorLevel::Intermediate => write!(f, "intermediate"),
            ErrorLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for ErrorLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(ErrorLevel::Basic),
            "intermediate" => Ok(ErrorLevel::Intermediate),
            "advanced" => Ok(ErrorLevel::Advanced),
            other => Err(format!("unknown error level: {}", other)),
        }
    }
}

/// 指摘する誤りの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    Grammar,
    Vocabulary,
    Usage,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorType::Grammar => write!(f, "grammar"),
            ErrorType::Vocabulary => write!(f, "vocabulary"),
            ErrorType::Usage => write!(f, "usage"),
        }
    }
}

impl FromStr for ErrorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grammar" => Ok(ErrorType::Grammar),
            "vocabulary" => Ok(ErrorType::Vocabulary),
            "usage" => Ok(ErrorType::Usage),
            other => Err(format!("unknown error type: {}", other)),
        }
    }
}

/// 添削リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviseRequest {
    pub text: String,
    pub style: WritingStyle,
    pub level: ErrorLevel,
    pub error_types: Vec<ErrorType>,
}

impl ReviseRequest {
    /// プロンプトへ埋め込むための誤り種類のカンマ区切り表記
    pub fn error_types_label(&self) -> String {
        self.error_types
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
