/// 作答/交卷服务 API 客户端
///
/// 封装单题作答记录与最终交卷两个接口的调用逻辑
use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::wire::{ApiEnvelope, AttemptRequest, SubmissionRequest, SubmissionResult};

/// 作答/交卷服务客户端
pub struct AttemptClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl AttemptClient {
    /// 创建新的作答服务客户端
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: config.attempt_api_base_url.clone(),
            token: config.exam_token.clone(),
            http,
        }
    }

    /// 上报单题作答记录
    ///
    /// 调用方自行决定是否关心结果，本方法只负责一次请求
    pub async fn record_attempt(&self, request: &AttemptRequest) -> AppResult<()> {
        let endpoint = format!("{}/attempt/record", self.base_url);

        debug!(
            "上报作答: 题目 {} 选项 {}",
            request.question_id, request.selected_option
        );

        let response = self
            .http
            .post(&endpoint)
            .header("examtoken", &self.token)
            .json(request)
            .send()
            .await?;

        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;

        if !envelope.is_success() {
            return Err(AppError::api_bad_response(
                &endpoint,
                Some(envelope.code),
                envelope.message,
            ));
        }

        Ok(())
    }

    /// 提交试卷
    ///
    /// # 参数
    /// - `request`: 交卷请求（答案快照 + 用时 + 幂等键）
    ///
    /// # 返回
    /// 返回服务端判分结果
    pub async fn submit_paper(&self, request: &SubmissionRequest) -> AppResult<SubmissionResult> {
        let endpoint = format!("{}/paper/answer/submit", self.base_url);

        debug!(
            "交卷 Payload: {}",
            serde_json::to_string(request).unwrap_or_default()
        );

        let response = self
            .http
            .post(&endpoint)
            .header("examtoken", &self.token)
            .json(request)
            .send()
            .await?;

        let envelope: ApiEnvelope<SubmissionResult> = response.json().await?;

        if !envelope.is_success() {
            return Err(AppError::api_bad_response(
                &endpoint,
                Some(envelope.code),
                envelope.message,
            ));
        }

        envelope
            .data
            .ok_or_else(|| AppError::api_empty_response(&endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AttemptClient {
        let config = Config {
            attempt_api_base_url: server.uri(),
            ..Config::default()
        };
        AttemptClient::new(&config)
    }

    #[tokio::test]
    async fn test_record_attempt_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/attempt/record"))
            .and(body_partial_json(serde_json::json!({
                "questionId": "q3",
                "selectedOption": "B"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"code": 200})),
            )
            .mount(&server)
            .await;

        let request = AttemptRequest {
            paper_id: "p-1".to_string(),
            question_id: "q3".to_string(),
            selected_option: "B".to_string(),
        };

        client_for(&server).record_attempt(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_paper_parses_result() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "code": 200,
            "data": {
                "status": "graded",
                "totalQuestions": 3,
                "correctAnswers": 2,
                "scorePercent": 66.7,
                "timeSpent": 100
            }
        });

        Mock::given(method("POST"))
            .and(path("/paper/answer/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let request = SubmissionRequest {
            paper_id: "p-1".to_string(),
            attempt_key: "key".to_string(),
            answers: HashMap::new(),
            time_spent_seconds: 100,
        };

        let result = client_for(&server).submit_paper(&request).await.unwrap();
        assert_eq!(result.correct_answers, 2);
        assert_eq!(result.time_spent, 100);
    }

    #[tokio::test]
    async fn test_submit_paper_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/paper/answer/submit"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let request = SubmissionRequest {
            paper_id: "p-1".to_string(),
            attempt_key: "key".to_string(),
            answers: HashMap::new(),
            time_spent_seconds: 0,
        };

        let result = client_for(&server).submit_paper(&request).await;
        assert!(result.is_err(), "服务端 500 应该返回错误");
    }
}
