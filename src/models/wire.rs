//! 接口数据结构
//!
//! 与试卷服务、答题记录服务交互的请求/响应结构。
//! 所有接口统一使用 `{code, message, data}` 信封，`code == 200` 表示成功。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 通用响应信封
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: u64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// 检查响应是否成功
    pub fn is_success(&self) -> bool {
        self.code == 200
    }
}

/// 试卷服务返回的试卷数据
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperData {
    #[serde(rename = "paperId")]
    pub paper_id: String,

    #[serde(rename = "paperName")]
    pub paper_name: String,

    #[serde(default)]
    pub subject: String,

    /// 考试时长（分钟），服务端可能缺省
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: Option<u64>,

    pub questions: Vec<WireQuestion>,
}

/// 试卷数据中的单道题目
#[derive(Debug, Clone, Deserialize)]
pub struct WireQuestion {
    #[serde(rename = "questionId")]
    pub question_id: String,

    pub order: u32,

    #[serde(default)]
    pub marks: u32,

    #[serde(default)]
    pub difficulty: Option<String>,

    pub stem: String,

    pub options: Vec<String>,

    #[serde(default)]
    pub tip: Option<String>,
}

/// 单题作答记录请求（fire-and-forget）
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRequest {
    #[serde(rename = "paperId")]
    pub paper_id: String,

    #[serde(rename = "questionId")]
    pub question_id: String,

    /// 选项字母（"A" / "B" / ...）
    #[serde(rename = "selectedOption")]
    pub selected_option: String,
}

/// 交卷请求
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRequest {
    #[serde(rename = "paperId")]
    pub paper_id: String,

    /// 幂等键，同一会话内所有交卷重试共用
    #[serde(rename = "attemptKey")]
    pub attempt_key: String,

    /// 题目ID -> 选项下标（0 起），未作答的题不出现
    pub answers: HashMap<String, usize>,

    #[serde(rename = "timeSpentSeconds")]
    pub time_spent_seconds: u64,
}

/// 交卷结果
///
/// 原样交给结果页展示，核心不解释判分逻辑
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SubmissionResult {
    pub status: String,

    #[serde(rename = "totalQuestions")]
    pub total_questions: u32,

    #[serde(rename = "correctAnswers")]
    pub correct_answers: u32,

    #[serde(rename = "scorePercent")]
    pub score_percent: f64,

    #[serde(rename = "timeSpent")]
    pub time_spent: u64,
}
