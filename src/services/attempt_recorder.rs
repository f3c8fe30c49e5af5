//! 单题作答上报 - 业务能力层
//!
//! 每次选择后把作答记录尽力上报给服务端，只为后台留一份实时的
//! 部分作答数据，不作为判分依据。上报任务是游离的：
//!
//! - 失败只记日志，永远不打扰考生，也不会阻塞导航或交卷
//! - 任务完成顺序可能乱序，任务拿不到 AnswerStore，
//!   所以乱序完成不可能覆盖本地答案，交卷始终以本地后写为准

use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::clients::AttemptClient;
use crate::models::wire::AttemptRequest;

/// 作答上报服务
pub struct AttemptRecorder {
    client: Arc<AttemptClient>,
    paper_id: String,
    handles: Vec<JoinHandle<()>>,
}

impl AttemptRecorder {
    /// 创建新的作答上报服务
    pub fn new(client: Arc<AttemptClient>, paper_id: impl Into<String>) -> Self {
        Self {
            client,
            paper_id: paper_id.into(),
            handles: Vec::new(),
        }
    }

    /// 上报一次作答（fire-and-forget）
    ///
    /// # 参数
    /// - `question_id`: 题目ID
    /// - `option_letter`: 选项字母（"A" / "B" / ...）
    pub fn record(&mut self, question_id: &str, option_letter: &str) {
        let client = Arc::clone(&self.client);
        let request = AttemptRequest {
            paper_id: self.paper_id.clone(),
            question_id: question_id.to_string(),
            selected_option: option_letter.to_string(),
        };

        let handle = tokio::spawn(async move {
            match client.record_attempt(&request).await {
                Ok(()) => {
                    debug!(
                        "✓ 作答上报成功: 题目 {} 选项 {}",
                        request.question_id, request.selected_option
                    );
                }
                Err(e) => {
                    // 尽力而为：失败只记日志，不重试不上抛
                    warn!(
                        "⚠️ 作答上报失败 (题目 {}): {}",
                        request.question_id, e
                    );
                }
            }
        });

        self.handles.push(handle);
    }

    /// 仍在途的上报任务数
    pub fn in_flight(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// 等待所有在途上报结束，仅在会话收尾时调用
    pub async fn drain(&mut self) {
        let handles = std::mem::take(&mut self.handles);
        if handles.is_empty() {
            return;
        }

        debug!("等待 {} 个在途作答上报任务结束", handles.len());
        join_all(handles).await;
    }
}
