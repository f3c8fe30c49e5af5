//! 会话状态机 - 会话核心
//!
//! ## 职责
//!
//! 本模块是整个考试会话的聚合根，其他组件只能通过事件驱动
//! `SessionState::apply` 来读写会话状态。
//!
//! ## 核心保证
//!
//! 1. **单次交卷**：`SubmissionStatus` 守卫是系统里唯一的"锁"，
//!    无论是双击交卷、交卷与倒计时到点竞争，还是重复的到点回调，
//!    都只会产生一次交卷请求
//! 2. **后写覆盖**：同一题的选择以考生最后一次操作为准，
//!    作答上报任务拿不到 AnswerStore 的写权限，完成顺序乱序也无法回写
//! 3. **时间核算**：用时在发起交卷的那一刻计算，
//!    `time_spent = duration - remaining`，始终落在 `[0, duration]` 内
//!
//! ## 状态机
//!
//! `NotSubmitted → Submitting → {Submitted | Failed}`；
//! `Failed → Submitting`（考生主动重试）是唯一的回边；`Submitted` 终态。

use uuid::Uuid;

use crate::models::paper::{ExamPaper, PaperQuestion};
use crate::models::wire::{SubmissionRequest, SubmissionResult};
use crate::session::answers::{option_letter, AnswerStore};
use crate::session::event::{Effect, SessionEvent, SubmitReason};
use crate::session::navigation::NavigationController;

/// 交卷状态
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionStatus {
    /// 未交卷
    NotSubmitted,
    /// 交卷请求已发出，等待结果
    Submitting,
    /// 交卷成功（终态）
    Submitted(SubmissionResult),
    /// 交卷失败，可重试
    Failed(String),
}

impl SubmissionStatus {
    /// 是否已到终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Submitted(_))
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::NotSubmitted => write!(f, "未交卷"),
            SubmissionStatus::Submitting => write!(f, "交卷中"),
            SubmissionStatus::Submitted(_) => write!(f, "已交卷"),
            SubmissionStatus::Failed(reason) => write!(f, "交卷失败: {}", reason),
        }
    }
}

/// 考试会话状态（聚合根）
#[derive(Debug)]
pub struct SessionState {
    paper: ExamPaper,
    answers: AnswerStore,
    nav: NavigationController,
    remaining_seconds: u64,
    status: SubmissionStatus,
    /// 交卷幂等键，会话创建时生成一次，重试时复用
    attempt_key: String,
}

impl SessionState {
    /// 从加载好的试卷创建会话
    ///
    /// 剩余时间以试卷时长为起点，由倒计时事件驱动递减
    pub fn new(paper: ExamPaper) -> Self {
        let total = paper.total_questions();
        let remaining = paper.duration_seconds;
        Self {
            paper,
            answers: AnswerStore::new(),
            nav: NavigationController::new(total),
            remaining_seconds: remaining,
            status: SubmissionStatus::NotSubmitted,
            attempt_key: Uuid::new_v4().to_string(),
        }
    }

    // ========== 只读访问 ==========

    pub fn paper(&self) -> &ExamPaper {
        &self.paper
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn cursor(&self) -> usize {
        self.nav.cursor()
    }

    /// 光标所在题目
    pub fn current_question(&self) -> &PaperQuestion {
        // 导航控制器保证光标始终在范围内
        &self.paper.questions[self.nav.cursor()]
    }

    pub fn answered_count(&self) -> usize {
        self.answers.answered_count()
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answers.is_answered(question_id)
    }

    pub fn selected_option(&self, question_id: &str) -> Option<usize> {
        self.answers.get(question_id)
    }

    pub fn attempt_key(&self) -> &str {
        &self.attempt_key
    }

    // ========== 状态转移 ==========

    /// 应用一个事件，返回待执行的副作用
    ///
    /// 纯状态转移，不做任何 IO
    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::Tick(remaining) => {
                // 剩余时间只减不增，时钟按墙钟折算后仍做一次钳制
                if !self.status.is_terminal() {
                    self.remaining_seconds = self.remaining_seconds.min(remaining);
                }
                Vec::new()
            }

            SessionEvent::Expired => {
                // 到点时交卷已在途或已完成则什么都不做
                if self.status == SubmissionStatus::NotSubmitted {
                    self.remaining_seconds = 0;
                    self.begin_submission()
                } else {
                    Vec::new()
                }
            }

            SessionEvent::Select {
                question_id,
                option_index,
            } => self.select(&question_id, option_index),

            SessionEvent::PickCurrent(option_index) => {
                let question_id = self.current_question().question_id.clone();
                self.select(&question_id, option_index)
            }

            SessionEvent::GoTo(index) => {
                if self.can_mutate() {
                    self.nav.go_to(index);
                }
                Vec::new()
            }

            SessionEvent::Next => {
                if self.can_mutate() {
                    self.nav.next();
                }
                Vec::new()
            }

            SessionEvent::Previous => {
                if self.can_mutate() {
                    self.nav.previous();
                }
                Vec::new()
            }

            SessionEvent::SubmitRequested(reason) => {
                if self.may_submit(reason) {
                    self.begin_submission()
                } else {
                    Vec::new()
                }
            }

            SessionEvent::SubmitSucceeded(result) => {
                if self.status == SubmissionStatus::Submitting {
                    self.status = SubmissionStatus::Submitted(result.clone());
                    vec![Effect::StopClock, Effect::DeliverResult(result)]
                } else {
                    Vec::new()
                }
            }

            SessionEvent::SubmitFailed(reason) => {
                if self.status == SubmissionStatus::Submitting {
                    self.status = SubmissionStatus::Failed(reason);
                }
                Vec::new()
            }

            // 驱动层事件，对状态无影响
            SessionEvent::StatusRequested | SessionEvent::Quit => Vec::new(),
        }
    }

    /// 会话是否仍可作答/导航
    ///
    /// 交卷请求发出后答题卡冻结；失败后会话恢复可用
    fn can_mutate(&self) -> bool {
        matches!(
            self.status,
            SubmissionStatus::NotSubmitted | SubmissionStatus::Failed(_)
        )
    }

    /// 交卷守卫
    ///
    /// 主动交卷允许从失败状态重试；到点自动交卷只在完全未交过时触发
    fn may_submit(&self, reason: SubmitReason) -> bool {
        match reason {
            SubmitReason::Manual => self.can_mutate(),
            SubmitReason::TimerExpired => self.status == SubmissionStatus::NotSubmitted,
        }
    }

    fn select(&mut self, question_id: &str, option_index: usize) -> Vec<Effect> {
        if !self.can_mutate() {
            return Vec::new();
        }

        // 不认识的题目ID不进答题卡，避免污染交卷数据
        if !self
            .paper
            .questions
            .iter()
            .any(|q| q.question_id == question_id)
        {
            return Vec::new();
        }

        self.answers.select(question_id, option_index);

        vec![Effect::RecordAttempt {
            question_id: question_id.to_string(),
            option_letter: option_letter(option_index),
        }]
    }

    /// 进入交卷流程
    ///
    /// 用时在这一刻计算并钳制在 `[0, duration]`，答案取当前快照
    fn begin_submission(&mut self) -> Vec<Effect> {
        self.status = SubmissionStatus::Submitting;

        let duration = self.paper.duration_seconds;
        let time_spent_seconds = duration
            .saturating_sub(self.remaining_seconds)
            .min(duration);

        let request = SubmissionRequest {
            paper_id: self.paper.paper_id.clone(),
            attempt_key: self.attempt_key.clone(),
            answers: self.answers.snapshot(),
            time_spent_seconds,
        };

        vec![Effect::BeginSubmission(request)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::paper::{Difficulty, Question};

    /// 创建测试用试卷：3 道题，时长 9000 秒
    fn make_paper() -> ExamPaper {
        let questions = (1..=3)
            .map(|i| PaperQuestion {
                question_id: format!("q{}", i),
                order: i as u32,
                marks: 5,
                difficulty: Difficulty::Medium,
                question: Question {
                    stem: format!("第 {} 题题干", i),
                    options: vec!["甲".into(), "乙".into(), "丙".into(), "丁".into()],
                    tip: None,
                },
            })
            .collect();

        ExamPaper {
            paper_id: "p-test".to_string(),
            title: "测试卷".to_string(),
            subject: "历史".to_string(),
            duration_seconds: 9000,
            questions,
        }
    }

    fn make_result() -> SubmissionResult {
        SubmissionResult {
            status: "graded".to_string(),
            total_questions: 3,
            correct_answers: 2,
            score_percent: 66.7,
            time_spent: 100,
        }
    }

    /// 从副作用列表中取出交卷请求
    fn submission_of(effects: &[Effect]) -> Option<&SubmissionRequest> {
        effects.iter().find_map(|e| match e {
            Effect::BeginSubmission(req) => Some(req),
            _ => None,
        })
    }

    #[test]
    fn test_select_produces_record_effect() {
        let mut state = SessionState::new(make_paper());

        let effects = state.apply(SessionEvent::Select {
            question_id: "q1".to_string(),
            option_index: 2,
        });

        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::RecordAttempt {
                question_id,
                option_letter,
            } => {
                assert_eq!(question_id, "q1");
                assert_eq!(option_letter, "C");
            }
            other => panic!("预期 RecordAttempt，实际是 {:?}", other),
        }
    }

    #[test]
    fn test_unknown_question_is_ignored() {
        let mut state = SessionState::new(make_paper());

        let effects = state.apply(SessionEvent::Select {
            question_id: "不存在的题".to_string(),
            option_index: 0,
        });

        assert!(effects.is_empty());
        assert_eq!(state.answered_count(), 0);
    }

    #[test]
    fn test_last_write_wins_in_submission_payload() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::Select {
            question_id: "q1".to_string(),
            option_index: 1,
        });
        state.apply(SessionEvent::Select {
            question_id: "q1".to_string(),
            option_index: 3,
        });
        state.apply(SessionEvent::Select {
            question_id: "q1".to_string(),
            option_index: 0,
        });

        let effects = state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));
        let request = submission_of(&effects).expect("应该产生交卷请求");

        // 最后一次选择生效
        assert_eq!(request.answers.get("q1"), Some(&0));
    }

    /// 完整作答场景：9000 秒、3 题，q1 选 1、q2 选 0、q3 未答，
    /// 第 100 秒交卷
    #[test]
    fn test_worked_example_manual_submit() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::Tick(8990));
        state.apply(SessionEvent::Select {
            question_id: "q1".to_string(),
            option_index: 1,
        });
        state.apply(SessionEvent::Tick(8960));
        state.apply(SessionEvent::Select {
            question_id: "q2".to_string(),
            option_index: 0,
        });
        state.apply(SessionEvent::Tick(8900));

        let effects = state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));
        let request = submission_of(&effects).expect("应该产生交卷请求");

        assert_eq!(request.time_spent_seconds, 100);
        assert_eq!(request.answers.get("q1"), Some(&1));
        assert_eq!(request.answers.get("q2"), Some(&0));
        // q3 未作答，不出现在请求中
        assert!(!request.answers.contains_key("q3"));
    }

    #[test]
    fn test_double_submit_is_noop() {
        let mut state = SessionState::new(make_paper());

        let first = state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));
        assert!(submission_of(&first).is_some());

        // 双击：第二次请求被状态守卫拦下
        let second = state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));
        assert!(second.is_empty());
        assert_eq!(*state.status(), SubmissionStatus::Submitting);
    }

    #[test]
    fn test_expiry_during_manual_submit_is_noop() {
        let mut state = SessionState::new(make_paper());
        state.apply(SessionEvent::Tick(8900));

        let first = state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));
        assert!(submission_of(&first).is_some());

        // 交卷在途时倒计时到点，不触发第二次交卷
        let on_expiry = state.apply(SessionEvent::Expired);
        assert!(on_expiry.is_empty());
    }

    #[test]
    fn test_auto_submit_on_expiry() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::Select {
            question_id: "q2".to_string(),
            option_index: 2,
        });
        state.apply(SessionEvent::Tick(1));

        let effects = state.apply(SessionEvent::Expired);
        let request = submission_of(&effects).expect("到点应该自动交卷");

        // 剩余时间清零，用时等于全程时长
        assert_eq!(request.time_spent_seconds, 9000);
        assert_eq!(request.answers.get("q2"), Some(&2));
        assert_eq!(*state.status(), SubmissionStatus::Submitting);
    }

    #[test]
    fn test_duplicate_expiry_is_noop() {
        let mut state = SessionState::new(make_paper());

        let first = state.apply(SessionEvent::Expired);
        assert!(submission_of(&first).is_some());

        let second = state.apply(SessionEvent::Expired);
        assert!(second.is_empty());
    }

    #[test]
    fn test_retry_after_failure_reuses_attempt_key() {
        let mut state = SessionState::new(make_paper());
        let key = state.attempt_key().to_string();

        let first = state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));
        assert_eq!(submission_of(&first).unwrap().attempt_key, key);

        state.apply(SessionEvent::SubmitFailed("网络超时".to_string()));
        assert!(matches!(state.status(), SubmissionStatus::Failed(_)));

        // 失败后主动重试允许再次进入交卷流程
        let retry = state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));
        let request = submission_of(&retry).expect("失败后重试应该被放行");
        assert_eq!(request.attempt_key, key);
        assert_eq!(*state.status(), SubmissionStatus::Submitting);
    }

    #[test]
    fn test_expiry_does_not_retry_failed_submission() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));
        state.apply(SessionEvent::SubmitFailed("服务端异常".to_string()));

        // 自动交卷不走失败重试的回边，重试必须由考生发起
        let effects = state.apply(SessionEvent::Expired);
        assert!(effects.is_empty());
        assert!(matches!(state.status(), SubmissionStatus::Failed(_)));
    }

    #[test]
    fn test_submit_success_stops_clock_and_delivers() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));
        let effects = state.apply(SessionEvent::SubmitSucceeded(make_result()));

        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::StopClock)));
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::DeliverResult(_))));
        assert!(state.status().is_terminal());
    }

    #[test]
    fn test_answers_frozen_while_submitting() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::Select {
            question_id: "q1".to_string(),
            option_index: 1,
        });
        state.apply(SessionEvent::SubmitRequested(SubmitReason::Manual));

        // 交卷在途，答题卡冻结
        let effects = state.apply(SessionEvent::Select {
            question_id: "q1".to_string(),
            option_index: 3,
        });
        assert!(effects.is_empty());
        assert_eq!(state.selected_option("q1"), Some(1));
    }

    #[test]
    fn test_navigation_preserves_answers() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::PickCurrent(2));
        assert_eq!(state.selected_option("q1"), Some(2));

        state.apply(SessionEvent::GoTo(2));
        assert_eq!(state.cursor(), 2);
        state.apply(SessionEvent::Previous);
        state.apply(SessionEvent::Previous);
        assert_eq!(state.cursor(), 0);

        // 来回导航后答案不变
        assert_eq!(state.selected_option("q1"), Some(2));
    }

    #[test]
    fn test_navigation_out_of_bounds_is_noop() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::GoTo(99));
        assert_eq!(state.cursor(), 0);

        state.apply(SessionEvent::Previous);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_remaining_never_increases() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::Tick(8000));
        assert_eq!(state.remaining_seconds(), 8000);

        // 乱序到达的旧 tick 不能把时间加回去
        state.apply(SessionEvent::Tick(8500));
        assert_eq!(state.remaining_seconds(), 8000);
    }

    #[test]
    fn test_pick_current_follows_cursor() {
        let mut state = SessionState::new(make_paper());

        state.apply(SessionEvent::Next);
        let effects = state.apply(SessionEvent::PickCurrent(0));

        match &effects[0] {
            Effect::RecordAttempt { question_id, .. } => assert_eq!(question_id, "q2"),
            other => panic!("预期 RecordAttempt，实际是 {:?}", other),
        }
        assert_eq!(state.selected_option("q2"), Some(0));
    }
}
