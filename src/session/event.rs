//! 会话事件与副作用定义
//!
//! 会话核心是一个显式状态机：所有输入（计时、选择、导航、交卷请求、
//! 交卷结果）统一走事件队列，`SessionState::apply` 做纯状态转移并
//! 返回待执行的副作用，由流程层负责执行。

use crate::models::wire::SubmissionResult;

/// 交卷触发原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    /// 考生主动交卷
    Manual,
    /// 倒计时耗尽，自动交卷
    TimerExpired,
}

impl std::fmt::Display for SubmitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitReason::Manual => write!(f, "主动交卷"),
            SubmitReason::TimerExpired => write!(f, "时间到自动交卷"),
        }
    }
}

/// 会话事件
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// 倒计时刷新，携带剩余秒数
    Tick(u64),
    /// 倒计时耗尽
    Expired,
    /// 为指定题目选择选项
    Select {
        question_id: String,
        option_index: usize,
    },
    /// 为光标所在题目选择选项
    PickCurrent(usize),
    /// 跳转到指定题目
    GoTo(usize),
    /// 下一题
    Next,
    /// 上一题
    Previous,
    /// 请求交卷
    SubmitRequested(SubmitReason),
    /// 交卷成功，携带判分结果
    SubmitSucceeded(SubmissionResult),
    /// 交卷失败，携带原因
    SubmitFailed(String),
    /// 查看答题进度（仅驱动层使用）
    StatusRequested,
    /// 放弃会话（仅驱动层使用）
    Quit,
}

/// 状态转移产生的副作用
///
/// 副作用只描述"要做什么"，网络调用与任务管理在流程层完成
#[derive(Debug, Clone)]
pub enum Effect {
    /// 上报一次单题作答记录（fire-and-forget）
    RecordAttempt {
        question_id: String,
        option_letter: String,
    },
    /// 发起一次交卷请求
    BeginSubmission(crate::models::wire::SubmissionRequest),
    /// 停止倒计时
    StopClock,
    /// 将判分结果交给结果页
    DeliverResult(SubmissionResult),
}
