//! 統一エラーハンドリング
//!
//! このモジュールは eigo_coach アプリケーション全体で使用する統一エラー型を定義します。
//! 外部コラボレーター（ドキュメントストア / 生成 API）の失敗もここに集約します。

use thiserror::Error;

/// eigo_coach アプリケーション全体で使用する統一エラー型
#[derive(Debug, Error)]
pub enum EigoCoachError {
    // ========================================
    // 設定関連エラー
    // ========================================
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ========================================
    // 入力検証エラー
    // ========================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // ========================================
    // ドキュメントストア関連エラー
    // ========================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    // ========================================
    // 生成 API 関連エラー
    // ========================================
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    // ========================================
    // IPC関連エラー
    // ========================================
    #[error("IPC connection failed: {0}")]
    IpcConnectionFailed(String),

    #[error("IPC serialization error: {0}")]
    IpcSerializationError(String),

    #[error("System error: {0}")]
    SystemError(String),
}

/// 統一Result型エイリアス
pub type Result<T> = std::result::Result<T, EigoCoachError>;

// ========================================
// 変換実装
// ========================================

/// String からの変換（文字列エラーとの互換性）
impl From<String> for EigoCoachError {
    fn from(message: String) -> Self {
        EigoCoachError::SystemError(message)
    }
}

/// &str からの変換（便利メソッド）
impl From<&str> for EigoCoachError {
    fn from(message: &str) -> Self {
        EigoCoachError::SystemError(message.to_string())
    }
}

/// String への変換（CLI 表示用）
impl From<EigoCoachError> for String {
    fn from(error: EigoCoachError) -> Self {
        error.to_string()
    }
}

// ========================================
// ヘルパー関数
// ========================================

impl EigoCoachError {
    /// エラーがユーザーアクションで解決可能かどうかを判定
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            EigoCoachError::ConfigError(_) | EigoCoachError::ValidationError(_)
        )
    }

    /// エラーの重要度レベルを取得（ログレベル代替）
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EigoCoachError::ConfigError(_) => ErrorSeverity::Error,

            EigoCoachError::StoreUnavailable(_) | EigoCoachError::GenerationFailed(_) => {
                ErrorSeverity::Warning
            }

            EigoCoachError::ValidationError(_) => ErrorSeverity::Info,

            _ => ErrorSeverity::Debug,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 設定・検証エラーはユーザーが対処可能
    #[test]
    fn config_and_validation_errors_are_user_actionable() {
        assert!(
            EigoCoachError::ConfigError("NOTION_WORD_DB_ID not set".into()).is_user_actionable()
        );
        assert!(EigoCoachError::ValidationError("essay is empty".into()).is_user_actionable());
        assert!(!EigoCoachError::StoreUnavailable("503".into()).is_user_actionable());
    }

    /// コラボレーター失敗は Warning 扱い
    #[test]
    fn collaborator_failures_map_to_warning() {
        assert_eq!(
            EigoCoachError::StoreUnavailable("timeout".into()).severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            EigoCoachError::GenerationFailed("no candidates".into()).severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            EigoCoachError::ConfigError("missing key".into()).severity(),
            ErrorSeverity::Error
        );
    }
}
