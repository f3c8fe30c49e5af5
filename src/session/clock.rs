//! 考试倒计时
//!
//! 剩余时间按墙钟差值折算而不是按 tick 次数递减，页面挂起或
//! 调度延迟都不会把剩余时间变多。到点事件只发一次，之后任务退出。

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::debug;

use crate::session::event::SessionEvent;

/// 倒计时时钟
///
/// 持有后台计时任务的句柄，`stop` 或析构时取消任务，
/// 保证交卷后不会再有迟到的到点回调
pub struct SessionClock {
    handle: Option<JoinHandle<()>>,
}

impl SessionClock {
    /// 启动倒计时
    ///
    /// # 参数
    /// - `total_seconds`: 考试总时长（秒）
    /// - `tick_interval_secs`: 刷新间隔（秒），至少 1 秒
    /// - `tx`: 事件队列发送端，Tick 与 Expired 都从这里进入状态机
    pub fn start(
        total_seconds: u64,
        tick_interval_secs: u64,
        tx: UnboundedSender<SessionEvent>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = interval(Duration::from_secs(tick_interval_secs.max(1)));
            // 挂起期间错过的 tick 直接跳过，剩余时间由墙钟差值兜底
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let elapsed = started.elapsed().as_secs();
                let remaining = total_seconds.saturating_sub(elapsed);

                if tx.send(SessionEvent::Tick(remaining)).is_err() {
                    // 会话已经结束，没人再收事件
                    break;
                }

                if remaining == 0 {
                    debug!("倒计时耗尽，发出到点事件");
                    let _ = tx.send(SessionEvent::Expired);
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// 停止倒计时，取消后台任务
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// 计时任务是否还在运行
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.stop();
    }
}
