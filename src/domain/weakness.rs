//! 弱点タグの照合ロジックとストア抽象 – ドメイン層

use async_trait::async_trait;

use crate::error::Result;

/// 弱点タグストア I/F
///
/// 名前は完全一致（大文字小文字を区別）で照合する。
/// 曖昧一致や正規化は行わない。
#[async_trait]
pub trait WeaknessTagStore: Send + Sync {
    /// 名前が完全一致するタグのIDを返す。存在しなければ None。
    async fn find_tag(&self, name: &str) -> Result<Option<String>>;

    /// 新しいタグをデフォルトカテゴリで作成し、IDを返す。
    async fn create_tag(&self, name: &str) -> Result<String>;
}

/// 新規タグ作成時のデフォルトカテゴリ
pub const DEFAULT_TAG_CATEGORY: &str = "General";

/// 弱点タグ名の列をストア上のIDへ照合する。
///
/// 各名前を入力順に処理する（内部で重複除去はしない）:
/// 1. 完全一致で検索し、見つかればそのIDを使う。
/// 2. 見つからなければ新規作成し、そのIDを使う。検索に失敗した場合も
///    作成を試みる。
/// 3. 作成にも失敗したタグはスキップする（照合全体は中断しない）。
///
/// 同一呼び出し内では逐次処理のため、`["A", "A"]` は1回目が作成・2回目が
/// 検索ヒットになる。同じ新規タグ名に対する照合が並行して走った場合は
/// 双方が作成に進み重複レコードが生じうる。ストアが条件付き書き込みを
/// 提供しないため、この競合は許容している。
pub async fn reconcile_tags<S>(store: &S, names: &[String]) -> Vec<String>
where
    S: WeaknessTagStore + ?Sized,
{
    let mut ids = Vec::with_capacity(names.len());

    for name in names {
        let found = match store.find_tag(name).await {
            Ok(found) => found,
            Err(e) => {
                // 検索失敗は未登録とみなして作成へ進む
                eprintln!("⚠️  weakness tag lookup failed for '{}': {}", name, e);
                None
            }
        };

        match found {
            Some(id) => ids.push(id),
            None => match store.create_tag(name).await {
                Ok(id) => ids.push(id),
                Err(e) => {
                    eprintln!("⚠️  weakness tag create failed for '{}': {}", name, e);
                }
            },
        }
    }

    ids
}

// === Unit tests ==========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EigoCoachError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// テスト用のインメモリタグストア
    struct MockTagStore {
        tags: Mutex<HashMap<String, String>>,
        find_calls: Mutex<u32>,
        create_calls: Mutex<u32>,
        fail_create_for: Option<String>,
        next_id: Mutex<u32>,
    }

    impl MockTagStore {
        fn new() -> Self {
            Self {
                tags: Mutex::new(HashMap::new()),
                find_calls: Mutex::new(0),
                create_calls: Mutex::new(0),
                fail_create_for: None,
                next_id: Mutex::new(1),
            }
        }

        fn failing_create_for(name: &str) -> Self {
            Self {
                fail_create_for: Some(name.to_string()),
                ..Self::new()
            }
        }

        fn find_calls(&self) -> u32 {
            *self.find_calls.lock().unwrap()
        }

        fn create_calls(&self) -> u32 {
            *self.create_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl WeaknessTagStore for MockTagStore {
        async fn find_tag(&self, name: &str) -> Result<Option<String>> {
            *self.find_calls.lock().unwrap() += 1;
            Ok(self.tags.lock().unwrap().get(name).cloned())
        }

        async fn create_tag(&self, name: &str) -> Result<String> {
            *self.create_calls.lock().unwrap() += 1;
            if self.fail_create_for.as_deref() == Some(name) {
                return Err(EigoCoachError::StoreUnavailable("create rejected".into()));
            }
            let mut next = self.next_id.lock().unwrap();
            let id = format!("tag-{}", *next);
            *next += 1;
            self.tags.lock().unwrap().insert(name.to_string(), id.clone());
            Ok(id)
        }
    }

    /// 空入力ではストア呼び出しが発生しない
    #[tokio::test]
    async fn empty_input_makes_no_store_calls() {
        let store = MockTagStore::new();
        let ids = reconcile_tags(&store, &[]).await;

        assert!(ids.is_empty());
        assert_eq!(store.find_calls(), 0);
        assert_eq!(store.create_calls(), 0);
    }

    /// 同名2回は「1回目が作成・2回目が検索ヒット」になる
    #[tokio::test]
    async fn duplicate_names_create_once_then_find() {
        let store = MockTagStore::new();
        let names = vec!["Run-on sentences".to_string(), "Run-on sentences".to_string()];

        let ids = reconcile_tags(&store, &names).await;

        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], ids[1]);
        assert_eq!(store.find_calls(), 2);
        assert_eq!(store.create_calls(), 1);
    }

    /// 既存タグは検索ヒットし、新規タグだけ作成される
    #[tokio::test]
    async fn existing_tags_are_found_not_recreated() {
        let store = MockTagStore::new();
        store
            .tags
            .lock()
            .unwrap()
            .insert("Passive Voice".to_string(), "tag-existing".to_string());

        let names = vec!["Passive Voice".to_string(), "Articles".to_string()];
        let ids = reconcile_tags(&store, &names).await;

        assert_eq!(ids[0], "tag-existing");
        assert_eq!(store.create_calls(), 1);
    }

    /// 照合は完全一致であり、大文字小文字の違いは別タグ扱い
    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let store = MockTagStore::new();
        let names = vec![
            "Subject-Verb Agreement".to_string(),
            "subject-verb agreement".to_string(),
        ];

        let ids = reconcile_tags(&store, &names).await;

        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(store.create_calls(), 2);
    }

    /// 作成に失敗したタグはスキップされ、残りは処理される
    #[tokio::test]
    async fn create_failure_skips_tag_and_continues() {
        let store = MockTagStore::failing_create_for("Articles");
        let names = vec![
            "Articles".to_string(),
            "Collocation".to_string(),
        ];

        let ids = reconcile_tags(&store, &names).await;

        assert_eq!(ids.len(), 1);
        assert_eq!(store.create_calls(), 2);
    }
}
