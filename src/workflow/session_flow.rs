//! 考试会话事件循环 - 流程层
//!
//! ## 职责
//!
//! 把一场考试跑起来：启动倒计时，从事件队列逐个取事件喂给状态机，
//! 执行状态机产出的副作用，直到交卷成功或考生离开。
//!
//! ## 并发模型
//!
//! 事件循环单线程串行处理事件；网络调用（作答上报、交卷请求）在
//! 独立任务中执行，结果以事件形式回到队列。交卷在途时考生仍能收到
//! 倒计时刷新。状态机内的交卷守卫是唯一的互斥手段。

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::clients::AttemptClient;
use crate::config::Config;
use crate::models::paper::ExamPaper;
use crate::models::wire::SubmissionResult;
use crate::services::{AttemptRecorder, SubmissionCoordinator};
use crate::session::{Effect, SessionClock, SessionEvent, SessionState};
use crate::utils::logging;
use crate::workflow::session_ctx::SessionCtx;

/// 考试会话流程
pub struct SessionFlow {
    state: SessionState,
    ctx: SessionCtx,
    recorder: AttemptRecorder,
    coordinator: SubmissionCoordinator,
    tx: UnboundedSender<SessionEvent>,
    rx: UnboundedReceiver<SessionEvent>,
    tick_interval_secs: u64,
    verbose_logging: bool,
}

impl SessionFlow {
    /// 创建会话流程
    ///
    /// # 参数
    /// - `paper`: 加载好的试卷
    /// - `client`: 作答/交卷服务客户端（上报与交卷共用）
    /// - `config`: 程序配置
    pub fn new(paper: ExamPaper, client: Arc<AttemptClient>, config: &Config) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let ctx = SessionCtx::from_paper(&paper);
        let recorder = AttemptRecorder::new(Arc::clone(&client), paper.paper_id.clone());
        let coordinator = SubmissionCoordinator::new(client);
        let state = SessionState::new(paper);

        Self {
            state,
            ctx,
            recorder,
            coordinator,
            tx,
            rx,
            tick_interval_secs: config.tick_interval_secs,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 事件队列发送端，交给驱动层（UI/命令行）投递考生操作
    pub fn handle(&self) -> UnboundedSender<SessionEvent> {
        self.tx.clone()
    }

    /// 当前会话状态（只读）
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// 运行会话直到交卷成功或考生离开
    ///
    /// # 返回
    /// 交卷成功时返回判分结果；考生中途离开返回 None
    pub async fn run(mut self) -> Result<Option<SubmissionResult>> {
        logging::log_session_start(&self.ctx, self.state.paper().duration_seconds);
        self.log_current_question();

        let mut clock = SessionClock::start(
            self.state.remaining_seconds(),
            self.tick_interval_secs,
            self.tx.clone(),
        );

        let mut outcome: Option<SubmissionResult> = None;

        while let Some(event) = self.rx.recv().await {
            match &event {
                SessionEvent::Quit => {
                    warn!("{} ⚠️ 考生离开，会话中止", self.ctx);
                    break;
                }
                SessionEvent::StatusRequested => {
                    self.log_progress();
                    continue;
                }
                SessionEvent::Expired => {
                    info!("{} ⏰ 考试时间到", self.ctx);
                }
                _ => {}
            }

            let moved = matches!(
                &event,
                SessionEvent::GoTo(_) | SessionEvent::Next | SessionEvent::Previous
            );

            let effects = self.state.apply(event);

            for effect in effects {
                self.execute(effect, &mut clock, &mut outcome);
            }

            if moved {
                self.log_current_question();
            }

            if outcome.is_some() {
                break;
            }
        }

        // 收尾：取消倒计时，等在途上报结束，保证没有游离回调
        clock.stop();
        self.recorder.drain().await;

        Ok(outcome)
    }

    /// 执行单个副作用
    fn execute(
        &mut self,
        effect: Effect,
        clock: &mut SessionClock,
        outcome: &mut Option<SubmissionResult>,
    ) {
        match effect {
            Effect::RecordAttempt {
                question_id,
                option_letter,
            } => {
                if self.verbose_logging {
                    info!(
                        "{} 📝 题目 {} 选择 {}",
                        self.ctx, question_id, option_letter
                    );
                }
                self.recorder.record(&question_id, &option_letter);
            }

            Effect::BeginSubmission(request) => {
                self.coordinator.dispatch(request, self.tx.clone());
            }

            Effect::StopClock => {
                clock.stop();
            }

            Effect::DeliverResult(result) => {
                logging::log_result(&self.ctx, &result);
                *outcome = Some(result);
            }
        }
    }

    // ========== 日志辅助方法 ==========

    /// 显示光标所在题目
    fn log_current_question(&self) {
        let question = self.state.current_question();
        let selected = self.state.selected_option(&question.question_id);
        logging::log_question(
            &self.ctx,
            self.state.cursor(),
            self.ctx.total_questions,
            question,
            selected,
        );
    }

    /// 显示答题进度
    fn log_progress(&self) {
        logging::log_progress(
            &self.ctx,
            self.state.answered_count(),
            self.ctx.total_questions,
            self.state.remaining_seconds(),
            self.state.status(),
        );
    }
}
