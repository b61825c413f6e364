//! グローバル環境変数設定
//!
//! アプリケーション全体で使用する環境変数を一元管理。
//! プロセス起動時に一度だけ初期化し、以降はどこからでもアクセス可能。

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::error::{EigoCoachError, Result};

/// グローバル環境変数設定
static ENV_CONFIG: OnceCell<Arc<EnvConfig>> = OnceCell::new();

#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// 環境変数設定
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// ドキュメントストア（Notion）APIキー
    pub notion_api_key: Option<String>,
    /// 生成 API（Gemini）APIキー
    pub gemini_api_key: Option<String>,
    /// ビジネス英単語データベースID
    pub word_db_id: Option<String>,
    /// IELTS ライティングログデータベースID
    pub writing_db_id: Option<String>,
    /// 弱点タグデータベースID
    pub weakness_db_id: Option<String>,
    /// 語彙バンクデータベースID
    pub vocab_db_id: Option<String>,
    /// TOEIC 問題データベースID
    pub toeic_db_id: Option<String>,
    /// 添削アーカイブデータベースID
    pub proofread_db_id: Option<String>,
    /// 生成モデル名（通常用）
    pub gemini_model: Option<String>,
    /// 生成モデル名（エッセイ評価用）
    pub gemini_model_pro: Option<String>,
}

impl EnvConfig {
    fn from_process_env() -> Self {
        EnvConfig {
            notion_api_key: std::env::var("NOTION_API_KEY").ok(),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            word_db_id: std::env::var("NOTION_WORD_DB_ID").ok(),
            writing_db_id: std::env::var("NOTION_WRITING_DB_ID").ok(),
            weakness_db_id: std::env::var("NOTION_WEAKNESS_DB_ID").ok(),
            vocab_db_id: std::env::var("NOTION_VOCAB_DB_ID").ok(),
            toeic_db_id: std::env::var("NOTION_TOEIC_DB_ID").ok(),
            proofread_db_id: std::env::var("NOTION_PROOFREAD_DB_ID").ok(),
            gemini_model: std::env::var("GEMINI_MODEL").ok(),
            gemini_model_pro: std::env::var("GEMINI_MODEL_PRO").ok(),
        }
    }

    /// 環境変数から設定を初期化
    ///
    /// アプリケーション起動時に呼び出す。
    /// 既に初期化済みの場合は何もせずOkを返す（冪等性を保証）。
    pub fn init() -> Result<()> {
        if ENV_CONFIG.get().is_some() {
            return Ok(());
        }

        // 並列実行時の競合を考慮：既に他のスレッドが初期化していても成功とする
        let _ = ENV_CONFIG.set(Arc::new(EnvConfig::from_process_env()));
        Ok(())
    }

    /// 設定を取得
    ///
    /// # Panics
    /// `init()`が呼ばれていない場合パニックする
    pub fn get() -> Arc<EnvConfig> {
        ENV_CONFIG
            .get()
            .expect("EnvConfig not initialized. Call EnvConfig::init() first")
            .clone()
    }

    /// データベースIDを取り出す。未設定なら `ConfigError`。
    ///
    /// 対象のデータベースIDはコマンド実行時に初めて要求される。
    /// 使わない機能のIDが未設定でもデーモンは起動できる。
    pub fn require_db_id(id: &Option<String>, env_name: &str) -> Result<String> {
        id.clone()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| EigoCoachError::ConfigError(format!("{} is not set", env_name)))
    }

    /// テスト用: カスタム設定で初期化
    ///
    /// Note: once_cellはtakeをサポートしていないため、
    /// テストではプロセス全体で一つの設定を共有する必要があります。
    #[cfg(test)]
    pub fn init_for_test(config: EnvConfig) {
        let _lock = TEST_LOCK.lock().unwrap();

        // 既に初期化されている場合は何もしない
        // (once_cellは再初期化できないため)
        if ENV_CONFIG.get().is_none() {
            ENV_CONFIG.set(Arc::new(config)).ok();
        }
    }

    /// テスト用: デフォルト設定で初期化（既に初期化済みの場合はスキップ）
    #[cfg(test)]
    pub fn test_init() {
        let _lock = TEST_LOCK.lock().unwrap();

        if ENV_CONFIG.get().is_none() {
            ENV_CONFIG
                .set(Arc::new(EnvConfig::from_process_env()))
                .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 未設定のデータベースIDは ConfigError になる
    #[test]
    fn missing_db_id_is_config_error() {
        let err = EnvConfig::require_db_id(&None, "NOTION_WORD_DB_ID").unwrap_err();
        match err {
            EigoCoachError::ConfigError(msg) => {
                assert!(msg.contains("NOTION_WORD_DB_ID"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// 空白のみのデータベースIDも未設定扱い
    #[test]
    fn blank_db_id_is_config_error() {
        let blank = Some("   ".to_string());
        assert!(EnvConfig::require_db_id(&blank, "NOTION_VOCAB_DB_ID").is_err());
    }

    /// 設定済みのIDはそのまま返る
    #[test]
    fn present_db_id_is_returned() {
        let id = Some("db-123".to_string());
        assert_eq!(
            EnvConfig::require_db_id(&id, "NOTION_WORD_DB_ID").unwrap(),
            "db-123"
        );
    }

    /// テスト用初期化は一度だけ効き、以降の get で同じ設定が見える
    #[test]
    fn test_helpers_initialize_once() {
        EnvConfig::init_for_test(EnvConfig {
            notion_api_key: Some("secret".to_string()),
            ..Default::default()
        });
        // 既に初期化済みなので何もしない
        EnvConfig::test_init();

        assert_eq!(EnvConfig::get().notion_api_key.as_deref(), Some("secret"));
    }
}
