//! 交卷执行 - 业务能力层
//!
//! 交卷守卫（单次交卷保证）在状态机里；本服务只负责把状态机产出的
//! 交卷请求发往服务端，并把结果作为事件送回队列。请求在独立任务中
//! 执行，交卷在途时事件循环继续响应倒计时与导航。

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::clients::AttemptClient;
use crate::models::wire::SubmissionRequest;
use crate::session::event::SessionEvent;

/// 交卷协调服务
pub struct SubmissionCoordinator {
    client: Arc<AttemptClient>,
}

impl SubmissionCoordinator {
    /// 创建新的交卷协调服务
    pub fn new(client: Arc<AttemptClient>) -> Self {
        Self { client }
    }

    /// 发起一次交卷
    ///
    /// # 参数
    /// - `request`: 状态机在进入 Submitting 时产出的交卷请求
    /// - `tx`: 事件队列发送端，成功/失败都以事件形式回到状态机
    pub fn dispatch(&self, request: SubmissionRequest, tx: UnboundedSender<SessionEvent>) {
        let client = Arc::clone(&self.client);

        info!(
            "📤 正在交卷: 已答 {} 题, 用时 {} 秒",
            request.answers.len(),
            request.time_spent_seconds
        );

        tokio::spawn(async move {
            let event = match client.submit_paper(&request).await {
                Ok(result) => SessionEvent::SubmitSucceeded(result),
                Err(e) => {
                    warn!("⚠️ 交卷请求失败: {}", e);
                    SessionEvent::SubmitFailed(e.to_string())
                }
            };

            // 会话若已收尾，结果事件丢弃即可
            let _ = tx.send(event);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::collections::HashMap;
    use tokio::sync::mpsc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> SubmissionRequest {
        SubmissionRequest {
            paper_id: "p-1".to_string(),
            attempt_key: "key".to_string(),
            answers: HashMap::new(),
            time_spent_seconds: 10,
        }
    }

    fn coordinator_for(server: &MockServer) -> SubmissionCoordinator {
        let config = Config {
            attempt_api_base_url: server.uri(),
            ..Config::default()
        };
        SubmissionCoordinator::new(Arc::new(AttemptClient::new(&config)))
    }

    #[tokio::test]
    async fn test_success_becomes_event() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "code": 200,
            "data": {
                "status": "graded",
                "totalQuestions": 3,
                "correctAnswers": 1,
                "scorePercent": 33.3,
                "timeSpent": 10
            }
        });

        Mock::given(method("POST"))
            .and(path("/paper/answer/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        coordinator_for(&server).dispatch(request(), tx);

        match rx.recv().await {
            Some(SessionEvent::SubmitSucceeded(result)) => {
                assert_eq!(result.total_questions, 3);
            }
            other => panic!("预期 SubmitSucceeded，实际是 {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_becomes_event() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/paper/answer/submit"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        coordinator_for(&server).dispatch(request(), tx);

        assert!(matches!(
            rx.recv().await,
            Some(SessionEvent::SubmitFailed(_))
        ));
    }
}
