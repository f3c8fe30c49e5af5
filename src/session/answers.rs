//! 答案选择台账
//!
//! 只记录"考生最后一次选了什么"，不关心对错。写入是同步的，
//! 同一题后写覆盖先写；条目只增不删，直到会话结束。

use std::collections::HashMap;

/// 题目ID -> 选项下标（0 起）
pub type AnswerMap = HashMap<String, usize>;

/// 答案存储
#[derive(Debug, Default, Clone)]
pub struct AnswerStore {
    answers: AnswerMap,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次选择，覆盖该题之前的选择
    pub fn select(&mut self, question_id: impl Into<String>, option_index: usize) {
        self.answers.insert(question_id.into(), option_index);
    }

    /// 查询某题当前的选择
    pub fn get(&self, question_id: &str) -> Option<usize> {
        self.answers.get(question_id).copied()
    }

    /// 该题是否已作答
    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    /// 已作答题数
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// 交卷用的答案快照
    pub fn snapshot(&self) -> AnswerMap {
        self.answers.clone()
    }
}

/// 选项下标转字母（0 -> "A"）
///
/// 超出 26 个选项的下标直接用数字表示，实际试卷不会出现
pub fn option_letter(option_index: usize) -> String {
    if option_index < 26 {
        ((b'A' + option_index as u8) as char).to_string()
    } else {
        option_index.to_string()
    }
}
