//! eigo_coach CLI: `eigo_coachd` デーモンの簡易コントローラ。
//! 各サブコマンドを `IpcCmd` に組み立てて `ipc::send_cmd` で送信します。
use clap::Parser;
use std::error::Error;
use std::path::Path;

use eigo_coach::cli::{Cli, Cmd, IeltsCmd, ToeicCmd, WordCmd};
use eigo_coach::domain::ielts::IeltsAssessment;
use eigo_coach::domain::proofread::ErrorType;
use eigo_coach::ipc::{IpcCmd, IpcResp, send_cmd};
use eigo_coach::utils::env::load_env;

fn main() -> Result<(), Box<dyn Error>> {
    load_env();

    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Word { action } => {
            let cmd = match action {
                WordCmd::Add {
                    japanese,
                    english,
                    category,
                } => IpcCmd::WordAdd {
                    japanese,
                    english,
                    category,
                },
                WordCmd::Update {
                    id,
                    japanese,
                    english,
                    category,
                } => IpcCmd::WordUpdate {
                    id,
                    japanese,
                    english,
                    category,
                },
                WordCmd::Remove { id } => IpcCmd::WordDelete { id },
                WordCmd::List { cursor, page_size } => IpcCmd::WordList { cursor, page_size },
                WordCmd::ListAll => IpcCmd::WordListAll,
                WordCmd::Categories => IpcCmd::WordCategories,
            };
            print_resp(send_cmd(&cmd)?);
        }
        Cmd::Ielts { action } => match action {
            IeltsCmd::Question { task_type } => {
                print_resp(send_cmd(&IpcCmd::IeltsQuestion { task_type })?);
            }
            IeltsCmd::Evaluate {
                essay,
                file,
                task_type,
            } => {
                let essay = text_or_file(essay, file.as_deref(), "essay")?;
                print_resp(send_cmd(&IpcCmd::IeltsEvaluate { essay, task_type })?);
            }
            IeltsCmd::Sync {
                essay_file,
                assessment_file,
                task_type,
            } => {
                let essay = std::fs::read_to_string(&essay_file)?;
                let assessment: IeltsAssessment =
                    serde_json::from_str(&std::fs::read_to_string(&assessment_file)?)?;
                print_resp(send_cmd(&IpcCmd::IeltsSync {
                    essay,
                    task_type,
                    assessment,
                })?);
            }
        },
        Cmd::Revise {
            text,
            file,
            style,
            level,
            error_types,
            save,
        } => {
            let text = text_or_file(text, file.as_deref(), "text")?;
            let error_types = if error_types.is_empty() {
                vec![ErrorType::Grammar]
            } else {
                error_types
            };

            let resp = send_cmd(&IpcCmd::Revise {
                text: text.clone(),
                style,
                level,
                error_types,
            })?;

            if resp.ok && save {
                let revised = resp.msg.clone();
                print_resp(resp);
                print_resp(send_cmd(&IpcCmd::ReviseSave {
                    original: text,
                    revised,
                })?);
            } else {
                print_resp(resp);
            }
        }
        Cmd::Toeic { action } => match action {
            ToeicCmd::Explain {
                sentence,
                description_type,
                save,
            } => {
                let resp = send_cmd(&IpcCmd::ToeicExplain {
                    sentence: sentence.clone(),
                    description_type,
                })?;

                if resp.ok && save {
                    let description = resp.msg.clone();
                    print_resp(resp);
                    print_resp(send_cmd(&IpcCmd::ToeicSave {
                        sentence,
                        description,
                    })?);
                } else {
                    print_resp(resp);
                }
            }
            ToeicCmd::List => print_resp(send_cmd(&IpcCmd::ToeicList)?),
            ToeicCmd::Check { page_id, undo } => {
                print_resp(send_cmd(&IpcCmd::ToeicCheck {
                    page_id,
                    completed: !undo,
                })?);
            }
        },
        Cmd::Health => print_resp(send_cmd(&IpcCmd::Health)?),
    }

    Ok(())
}

/// 引数テキストかファイルのどちらかから本文を読む
fn text_or_file(
    text: Option<String>,
    file: Option<&Path>,
    what: &str,
) -> Result<String, Box<dyn Error>> {
    match (text, file) {
        (Some(text), None) => Ok(text),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (Some(_), Some(_)) => Err(format!("pass {} inline or via --file, not both", what).into()),
        (None, None) => Err(format!("{} is required (inline or --file)", what).into()),
    }
}

fn print_resp(resp: IpcResp) {
    if resp.ok {
        println!("{}", resp.msg);
    } else {
        eprintln!("Error: {}", resp.msg);
    }
}
