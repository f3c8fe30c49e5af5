//! 试卷领域模型
//!
//! 试卷在会话开始时由 PaperLoader 构建一次，之后不再变化。
//! 正确答案数据永远不会出现在这些类型中（判分是服务端的职责）。

use std::fmt;

/// 题目难度标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// 从服务端返回的难度字符串解析
    ///
    /// 无法识别的值一律按 Medium 处理
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("easy") | Some("1") => Difficulty::Easy,
            Some("hard") | Some("3") => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "简单"),
            Difficulty::Medium => write!(f, "中等"),
            Difficulty::Hard => write!(f, "困难"),
        }
    }
}

/// 题目内容
#[derive(Debug, Clone)]
pub struct Question {
    /// 题干
    pub stem: String,
    /// 选项列表
    pub options: Vec<String>,
    /// 提示文本（可选）
    pub tip: Option<String>,
}

/// 试卷中的一道题
///
/// `order` 是题目在试卷中的固定位置，加载后不变
#[derive(Debug, Clone)]
pub struct PaperQuestion {
    pub question_id: String,
    pub order: u32,
    pub marks: u32,
    pub difficulty: Difficulty,
    pub question: Question,
}

/// 一张完整的试卷
///
/// 加载成功后不可变，会话结束时销毁
#[derive(Debug, Clone)]
pub struct ExamPaper {
    pub paper_id: String,
    pub title: String,
    pub subject: String,
    /// 考试时长（秒）
    pub duration_seconds: u64,
    /// 按 order 排好序的题目列表，保证非空
    pub questions: Vec<PaperQuestion>,
}

impl ExamPaper {
    /// 题目总数
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// 试卷总分
    pub fn total_marks(&self) -> u32 {
        self.questions.iter().map(|q| q.marks).sum()
    }

    /// 按下标取题目
    pub fn question_at(&self, index: usize) -> Option<&PaperQuestion> {
        self.questions.get(index)
    }
}
