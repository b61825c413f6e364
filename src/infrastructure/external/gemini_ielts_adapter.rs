//! IELTS 向け生成機能のアダプター実装
//! Application層のAiGatewayトレイトを実装

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::traits::AiGateway;
use crate::domain::ielts::{IeltsAssessment, TaskType};
use crate::error::{EigoCoachError, Result};
use crate::infrastructure::external::gemini::{GeminiClient, GenerateOptions};

/// IELTS 生成アダプター
pub struct GeminiIeltsAdapter {
    client: GeminiClient,
}

impl GeminiIeltsAdapter {
    /// 新しいアダプターを作成
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: GeminiClient::new()?,
        })
    }
}

const TASK1_PROMPT: &str = "Generate a description for a sample IELTS Writing Task 1 visual \
(Bar Chart, Line Graph, Map, or Process). Describe the data/visual clearly so the student can \
write a report about it. Output ONLY the task description.";

const TASK2_PROMPT: &str = "Generate a challenging IELTS Writing Task 2 topic key question based \
on current trends (Technology, Environment, Education, Work, Globalization). Output ONLY the \
question text. Do not include instructions like 'Write at least 250 words'.";

fn examiner_system_prompt(task_type: TaskType) -> String {
    format!(
        r#"# Role
You represent a strict, senior IELTS Examiner and a strategic Language Mentor. Your goal is to "debug" the student's writing to help them break through the Band 7.0 plateau.

# Objective
Analyze the provided IELTS {} essay.
Output a strict JSON assessment focusing on the gap between current performance and Band 7.0+ requirements.

# Scoring Criteria (Apply these strictly)
1. Task Response (TR): Does it fully address all parts of the task? Is the position clear throughout?
2. Coherence and Cohesion (CC): Is there a logical progression? Are cohesive devices used naturally (not mechanically)?
3. Lexical Resource (LR): Is there a wide range of vocabulary? Are there collocations used with valid precision?
4. Grammatical Range and Accuracy (GRA): Are complex structures used? Are sentences error-free?

# Tone Guidelines
- Be objective and quantitative.
- Do not sugarcoat. The user is an engineer who wants to fix bugs in their English.
- Focus on "High Impact" fixes that yield the biggest score increase."#,
        task_type
    )
}

/// 評価結果のレスポンススキーマ
fn assessment_schema() -> Value {
    let criterion = json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER" },
            "feedback": { "type": "STRING" }
        },
        "required": ["score", "feedback"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "overall_band": {
                "type": "NUMBER",
                "description": "The overall band score, precise to 0.5 (e.g., 6.0, 6.5, 7.0)"
            },
            "criteria": {
                "type": "OBJECT",
                "properties": {
                    "TR": criterion.clone(),
                    "CC": criterion.clone(),
                    "LR": criterion.clone(),
                    "GRA": criterion
                },
                "required": ["TR", "CC", "LR", "GRA"]
            },
            "rewrite_suggestion": {
                "type": "STRING",
                "description": "A rewritten version of the weakest paragraph that demonstrates Band 8.0 quality."
            },
            "weakness_tags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "3-5 specific, actionable tags representing frequent errors or weaknesses (e.g., 'Subject-Verb Agreement', 'Overuse of Passive Voice')."
            },
            "key_vocabulary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "word": { "type": "STRING" },
                        "meaning": { "type": "STRING" },
                        "example": { "type": "STRING" }
                    },
                    "required": ["word", "meaning", "example"]
                },
                "description": "Important vocabulary extracted from the essay or better alternatives suggested."
            }
        },
        "required": ["overall_band", "criteria", "rewrite_suggestion", "weakness_tags", "key_vocabulary"]
    })
}

#[async_trait]
impl AiGateway for GeminiIeltsAdapter {
    async fn generate_problem(&self, task_type: TaskType) -> Result<String> {
        let prompt = match task_type {
            TaskType::Task1 => TASK1_PROMPT,
            TaskType::Task2 => TASK2_PROMPT,
        };

        self.client
            .generate_text(
                prompt,
                GenerateOptions {
                    // お題のバリエーションを広げるため高めに設定
                    temperature: Some(1.0),
                    system: None,
                },
            )
            .await
    }

    async fn evaluate_essay(&self, essay: &str, task_type: TaskType) -> Result<IeltsAssessment> {
        let options = GenerateOptions {
            temperature: None,
            system: Some(examiner_system_prompt(task_type)),
        };
        let prompt = format!("Here is the student's essay:\n\n{}", essay);

        let object = self
            .client
            .generate_object(&prompt, options, assessment_schema())
            .await?;

        serde_json::from_value(object).map_err(|e| {
            EigoCoachError::GenerationFailed(format!("assessment did not match schema: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// スキーマは評価結果の必須フィールドを全て要求する
    #[test]
    fn schema_requires_all_assessment_fields() {
        let schema = assessment_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        for field in [
            "overall_band",
            "criteria",
            "rewrite_suggestion",
            "weakness_tags",
            "key_vocabulary",
        ] {
            assert!(required.contains(&field), "missing {}", field);
        }
    }

    /// システムプロンプトにタスク種別が埋め込まれる
    #[test]
    fn system_prompt_mentions_task_type() {
        assert!(examiner_system_prompt(TaskType::Task1).contains("Task 1"));
        assert!(examiner_system_prompt(TaskType::Task2).contains("Task 2"));
    }
}
