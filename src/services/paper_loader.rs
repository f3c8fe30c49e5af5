//! 试卷加载 - 业务能力层
//!
//! 会话开始时拉取一次试卷结构并构建不可变的 `ExamPaper`。
//! 这是整个会话里唯一构建试卷的地方，每个会话最多调用一次。

use thiserror::Error;
use tracing::info;

use crate::clients::PaperClient;
use crate::config::Config;
use crate::error::AppError;
use crate::models::paper::{Difficulty, ExamPaper, PaperQuestion, Question};
use crate::models::wire::PaperData;

/// 试卷加载错误
#[derive(Debug, Error)]
pub enum LoadError {
    /// 试卷ID为空
    #[error("试卷ID不能为空")]
    EmptyPaperId,

    /// 试卷没有题目，按错误处理而不是空会话
    #[error("试卷 {paper_id} 没有题目")]
    EmptyPaper { paper_id: String },

    /// 拉取试卷失败
    #[error("拉取试卷失败: {0}")]
    Fetch(#[from] AppError),
}

/// 试卷加载服务
pub struct PaperLoader {
    client: PaperClient,
    default_duration_minutes: u64,
}

impl PaperLoader {
    /// 创建新的试卷加载服务
    pub fn new(config: &Config) -> Self {
        Self {
            client: PaperClient::new(config),
            default_duration_minutes: config.default_duration_minutes,
        }
    }

    /// 加载试卷
    ///
    /// # 参数
    /// - `paper_id`: 试卷ID
    ///
    /// # 返回
    /// 返回构建好的不可变试卷；零题试卷视为错误
    pub async fn load(&self, paper_id: &str) -> Result<ExamPaper, LoadError> {
        if paper_id.trim().is_empty() {
            return Err(LoadError::EmptyPaperId);
        }

        let data = self.client.fetch_paper(paper_id).await?;
        let paper = self.build_paper(data)?;

        info!(
            "✓ 试卷加载完成: {} ({} 题, 时长 {} 分钟)",
            paper.title,
            paper.total_questions(),
            paper.duration_seconds / 60
        );

        Ok(paper)
    }

    /// 从接口数据构建领域试卷
    ///
    /// 题目按 order 排序；服务端未给时长时套用默认时长
    fn build_paper(&self, data: PaperData) -> Result<ExamPaper, LoadError> {
        if data.questions.is_empty() {
            return Err(LoadError::EmptyPaper {
                paper_id: data.paper_id,
            });
        }

        let duration_minutes = data
            .duration_minutes
            .unwrap_or(self.default_duration_minutes);

        let mut questions: Vec<PaperQuestion> = data
            .questions
            .into_iter()
            .map(|q| PaperQuestion {
                question_id: q.question_id,
                order: q.order,
                marks: q.marks,
                difficulty: Difficulty::parse(q.difficulty.as_deref()),
                question: Question {
                    stem: q.stem,
                    options: q.options,
                    tip: q.tip,
                },
            })
            .collect();

        questions.sort_by_key(|q| q.order);

        Ok(ExamPaper {
            paper_id: data.paper_id,
            title: data.paper_name,
            subject: data.subject,
            duration_seconds: duration_minutes * 60,
            questions,
        })
    }
}
