//! Markdown からストアのコンテンツブロックへの変換
//!
//! 生成 API の出力（Markdown）をページ本文として保存するために使う。
//! 見出し・段落・箇条書き・コードブロックのみ対応し、
//! インライン装飾はプレーンテキストに落とす。

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde_json::{Value, json};

/// ストアが1回の追加で受け付けるブロック数の上限
const MAX_BLOCKS: usize = 100;

/// Markdown テキストをブロック配列へ変換する
pub fn markdown_to_blocks(markdown: &str) -> Vec<Value> {
    let mut blocks: Vec<Value> = Vec::new();
    let mut text = String::new();
    let mut context = Context::Paragraph;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                context = Context::Heading;
                text.clear();
            }
            Event::Start(Tag::Paragraph) => {
                if context == Context::Paragraph {
                    text.clear();
                }
            }
            Event::Start(Tag::Item) => {
                context = Context::ListItem;
                text.clear();
            }
            Event::Start(Tag::CodeBlock(_)) => {
                context = Context::Code;
                text.clear();
            }
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Heading(level)) => {
                push_block(&mut blocks, heading(level, text.trim()));
                context = Context::Paragraph;
                text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                // リスト項目内の段落は項目側でまとめて出す
                if context == Context::Paragraph && !text.trim().is_empty() {
                    push_block(&mut blocks, block("paragraph", text.trim()));
                    text.clear();
                }
            }
            Event::End(TagEnd::Item) => {
                if !text.trim().is_empty() {
                    push_block(&mut blocks, block("bulleted_list_item", text.trim()));
                }
                context = Context::Paragraph;
                text.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                push_block(&mut blocks, code_block(text.trim_end()));
                context = Context::Paragraph;
                text.clear();
            }
            _ => {}
        }
    }

    blocks
}

#[derive(PartialEq)]
enum Context {
    Paragraph,
    Heading,
    ListItem,
    Code,
}

fn push_block(blocks: &mut Vec<Value>, block: Value) {
    if blocks.len() < MAX_BLOCKS {
        blocks.push(block);
    }
}

fn block(block_type: &str, content: &str) -> Value {
    let mut value = json!({ "object": "block", "type": block_type });
    value[block_type] = json!({
        "rich_text": [{ "type": "text", "text": { "content": content } }]
    });
    value
}

fn heading(level: HeadingLevel, content: &str) -> Value {
    let block_type = match level {
        HeadingLevel::H1 => "heading_1",
        HeadingLevel::H2 => "heading_2",
        _ => "heading_3",
    };
    block(block_type, content)
}

fn code_block(content: &str) -> Value {
    json!({
        "object": "block",
        "type": "code",
        "code": {
            "rich_text": [{ "type": "text", "text": { "content": content } }],
            "language": "plain text"
        }
    })
}
