//! ビジネス英単語エンティティとページネーション型 – ドメイン層

use serde::{Deserialize, Serialize};

/// 1 単語レコード
///
/// `id` はドキュメントストアが採番する不透明な文字列。
/// 任意フィールドが未設定のレコードは空文字列として投影される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub japanese: String,
    pub english: String,
    #[serde(default)]
    pub category: String,
}

/// ページネーションカーソル
///
/// ドキュメントストアが発行する不透明トークン。呼び出し側は解析も構築もせず、
/// 前回レスポンスの `next_cursor` をそのまま次のリクエストへ渡すだけ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Cursor(token.into())
    }

    /// ストアAPIへ渡すための生トークン（クレート内部専用）
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// 1 ページ分の単語一覧
///
/// 不変条件: `has_more` が真 ⇔ `next_cursor` が存在する。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedWords {
    pub words: Vec<Word>,
    pub next_cursor: Option<Cursor>,
    pub has_more: bool,
}

impl PaginatedWords {
    /// has_more ⇔ next_cursor の整合性を確認
    pub fn is_consistent(&self) -> bool {
        self.has_more == self.next_cursor.is_some()
    }
}

/// 全件取得の結果
///
/// 上限到達で打ち切った場合は `truncated` が真になる（暗黙の部分結果にしない）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordListing {
    pub words: Vec<Word>,
    pub truncated: bool,
}

/// 単語作成パラメータ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWordParams {
    pub japanese: String,
    pub english: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// 単語更新パラメータ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWordParams {
    pub id: String,
    pub japanese: String,
    pub english: String,
    #[serde(default)]
    pub category: Option<String>,
}

// === Unit tests ==========================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// カーソルはJSON上で素の文字列として往復する
    #[test]
    fn cursor_roundtrips_as_plain_string() {
        let cursor = Cursor::new("abc-123");
        let json = serde_json::to_string(&cursor).unwrap();
        assert_eq!(json, "\"abc-123\"");

        let back: Cursor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cursor);
    }

    /// has_more と next_cursor の整合性チェック
    #[test]
    fn paginated_words_consistency() {
        let page = PaginatedWords {
            words: vec![],
            next_cursor: Some(Cursor::new("tok")),
            has_more: true,
        };
        assert!(page.is_consistent());

        let broken = PaginatedWords {
            words: vec![],
            next_cursor: None,
            has_more: true,
        };
        assert!(!broken.is_consistent());
    }

    /// category 省略時は空文字列に投影される
    #[test]
    fn missing_category_deserializes_to_empty() {
        let word: Word = serde_json::from_str(
            r#"{"id":"w1","japanese":"会議","english":"meeting"}"#,
        )
        .unwrap();
        assert_eq!(word.category, "");
    }
}
