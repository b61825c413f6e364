//! eigo-coachd: 英語学習コマンドを捌く常駐プロセス（シングルスレッド Tokio ランタイム）
//!
//! # 概要
//! CLI から Unix Domain Socket (UDS) 経由で受け取ったコマンドをハンドリングし、
//!  - ドキュメントストア上の単語・セッション・問題レコードのCRUD
//!  - 生成 API によるお題生成・エッセイ評価・添削・例文解説
//! を非同期・協調的に実行します。
//!
//! ## 実行モデル
//! - `tokio::main(flavor = "current_thread")` でシングルスレッドランタイムを起動
//! - クライアントごとの処理は `spawn_local` でローカルタスク化
//! - 生成 API の最大同時実行数はサービス側の `Semaphore` で制御

use std::{error::Error, fs, rc::Rc};

use futures::{SinkExt, StreamExt};
use tokio::{
    net::{UnixListener, UnixStream},
    task::{LocalSet, spawn_local},
};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

use eigo_coach::application::{CommandHandler, ServiceContainer};
use eigo_coach::ipc::{IpcCmd, IpcResp, socket_path};
use eigo_coach::utils::{config::EnvConfig, env::load_env};

/// エントリポイント。環境変数を読み込み、`async_main` を current-thread ランタイムで実行します。
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    load_env();
    EnvConfig::init()?;

    // `spawn_local` はこのスレッドだけで動かしたい非同期ジョブを登録する。LocalSet はその実行エンジン
    let local = LocalSet::new();
    local.run_until(async_main()).await
}

/// ソケット待受とクライアントハンドリングを起動する本体。
async fn async_main() -> Result<(), Box<dyn Error>> {
    let path = socket_path();

    // 既存ソケットがあれば削除して再バインド
    let _ = fs::remove_file(&path);
    let listener = UnixListener::bind(&path)?;
    println!("eigo-coachd listening on {}", path.display());

    let container = ServiceContainer::new()?;
    let handler = container.command_handler.clone();

    loop {
        let (stream, _) = listener.accept().await?;
        let handler = handler.clone();
        spawn_local(async move {
            if let Err(e) = handle_client(stream, handler).await {
                eprintln!("⚠️  client session failed: {}", e);
            }
        });
    }
}

/// 1 クライアントとの IPC セッションを処理します。
/// CLI からの JSON 文字列を `IpcCmd` にデシリアライズし、
/// コマンドハンドラーの結果を `IpcResp` として返送します。
async fn handle_client(
    stream: UnixStream,
    handler: Rc<CommandHandler>,
) -> Result<(), Box<dyn Error>> {
    let (r, w) = stream.into_split();
    let mut reader = FramedRead::new(r, LinesCodec::new());
    let mut writer = FramedWrite::new(w, LinesCodec::new());

    if let Some(Ok(line)) = reader.next().await {
        let resp = match serde_json::from_str::<IpcCmd>(&line) {
            Ok(cmd) => handler.handle(cmd).await,
            Err(e) => IpcResp {
                ok: false,
                msg: format!("invalid command: {}", e),
            },
        };
        writer.send(serde_json::to_string(&resp)?).await?;
    }

    Ok(())
}
