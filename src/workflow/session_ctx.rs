//! 会话上下文
//!
//! 封装"我在考哪张卷子"这一信息，供日志显示使用

use std::fmt::Display;

use crate::models::paper::ExamPaper;

/// 会话上下文
#[derive(Debug, Clone)]
pub struct SessionCtx {
    /// 试卷ID
    pub paper_id: String,

    /// 试卷名称
    pub title: String,

    /// 科目
    pub subject: String,

    /// 题目总数
    pub total_questions: usize,
}

impl SessionCtx {
    /// 从试卷创建会话上下文
    pub fn from_paper(paper: &ExamPaper) -> Self {
        Self {
            paper_id: paper.paper_id.clone(),
            title: paper.title.clone(),
            subject: paper.subject.clone(),
            total_questions: paper.total_questions(),
        }
    }
}

impl Display for SessionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[考试 {} 科目#{}]", self.paper_id, self.subject)
    }
}
