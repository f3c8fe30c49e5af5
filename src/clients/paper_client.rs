/// 试卷服务 API 客户端
///
/// 封装所有与试卷服务相关的调用逻辑
use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::wire::{ApiEnvelope, PaperData};

/// 试卷服务客户端
pub struct PaperClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl PaperClient {
    /// 创建新的试卷服务客户端
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: config.paper_api_base_url.clone(),
            token: config.exam_token.clone(),
            http,
        }
    }

    /// 拉取试卷结构
    ///
    /// # 参数
    /// - `paper_id`: 试卷ID
    ///
    /// # 返回
    /// 返回试卷原始数据（未做领域校验，校验在 PaperLoader 中进行）
    pub async fn fetch_paper(&self, paper_id: &str) -> AppResult<PaperData> {
        let endpoint = format!("{}/paper/take/{}", self.base_url, paper_id);

        debug!("拉取试卷: {}", endpoint);

        let response = self
            .http
            .get(&endpoint)
            .header("examtoken", &self.token)
            .header("Accept", "application/json, text/plain, */*")
            .send()
            .await?;

        let envelope: ApiEnvelope<PaperData> = response.json().await?;

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
