//! 考试应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一场考试从加载到交卷的完整编排。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建试卷加载服务与作答服务客户端
//! 2. **试卷加载**：带重试地拉取试卷，零题试卷直接报错
//! 3. **会话驱动**：启动 SessionFlow，把命令行输入翻译成会话事件
//! 4. **结果交接**：交卷成功后输出结果页地址，把判分结果交出去
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有客户端的模块
//! - **向下委托**：会话过程的全部逻辑都在 workflow/session 中

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::clients::AttemptClient;
use crate::config::Config;
use crate::models::paper::ExamPaper;
use crate::models::wire::SubmissionResult;
use crate::services::PaperLoader;
use crate::session::{SessionEvent, SubmitReason};
use crate::utils::logging;
use crate::workflow::SessionFlow;

/// 应用主结构
pub struct App {
    config: Config,
    loader: PaperLoader,
    attempt_client: Arc<AttemptClient>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup();

        let loader = PaperLoader::new(&config);
        let attempt_client = Arc::new(AttemptClient::new(&config));

        Ok(Self {
            config,
            loader,
            attempt_client,
        })
    }

    /// 运行一场考试
    ///
    /// # 参数
    /// - `paper_id`: 试卷ID
    ///
    /// # 返回
    /// 交卷成功返回判分结果；考生中途离开返回 None
    pub async fn run(&self, paper_id: &str) -> Result<Option<SubmissionResult>> {
        let paper = self.load_paper_with_retry(paper_id).await?;

        let flow = SessionFlow::new(paper, Arc::clone(&self.attempt_client), &self.config);
        let input_handle = spawn_input_loop(flow.handle());

        let outcome = flow.run().await?;

        // 会话结束后命令行输入不再需要
        input_handle.abort();

        if outcome.is_some() {
            // 交接给结果页：按试卷ID路由
            info!(
                "➡️ 前往结果页: {}/{}",
                self.config.results_url_base, paper_id
            );
        }

        Ok(outcome)
    }

    /// 带重试的试卷加载
    ///
    /// 加载失败会阻塞会话开始，重试次数用完才放弃
    async fn load_paper_with_retry(&self, paper_id: &str) -> Result<ExamPaper> {
        let attempts = self.config.load_retries.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.loader.load(paper_id).await {
                Ok(paper) => return Ok(paper),
                Err(e) if attempt < attempts => {
                    warn!(
                        "⚠️ 试卷加载失败 (尝试 {}/{}): {}，2 秒后重试...",
                        attempt, attempts, e
                    );
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
                Err(e) => {
                    error!("❌ 试卷加载失败，已重试 {} 次: {}", attempts, e);
                    return Err(e).context(format!("无法加载试卷 {}", paper_id));
                }
            }
        }
    }
}

/// 启动命令行输入循环
///
/// 把考生输入翻译成会话事件投递给事件队列；会话结束后由调用方取消
fn spawn_input_loop(tx: UnboundedSender<SessionEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_command(line) {
                Some(event) => {
                    let is_quit = matches!(event, SessionEvent::Quit);
                    if tx.send(event).is_err() || is_quit {
                        break;
                    }
                }
                None => {
                    warn!("无法识别的命令: {} (可用: A-D / next / prev / goto N / submit / status / quit)", line);
                }
            }
        }
    })
}

/// 解析考生输入的命令
///
/// 支持：选项字母（A-D）、pick N、next/prev、goto N、submit、status、quit
fn parse_command(line: &str) -> Option<SessionEvent> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?.to_ascii_lowercase();
    let arg = parts.next();

    match head.as_str() {
        "n" | "next" => Some(SessionEvent::Next),
        "p" | "prev" | "previous" => Some(SessionEvent::Previous),
        "g" | "goto" => {
            // goto 按 1 起的题号输入，内部转成 0 起下标
            let number: usize = arg?.parse().ok()?;
            Some(SessionEvent::GoTo(number.checked_sub(1)?))
        }
        "pick" => {
            let index: usize = arg?.parse().ok()?;
            Some(SessionEvent::PickCurrent(index))
        }
        "s" | "submit" => Some(SessionEvent::SubmitRequested(SubmitReason::Manual)),
        "status" => Some(SessionEvent::StatusRequested),
        "q" | "quit" | "exit" => Some(SessionEvent::Quit),
        single if single.len() == 1 => {
            let c = single.chars().next()?;
            if c.is_ascii_lowercase() {
                Some(SessionEvent::PickCurrent((c as u8 - b'a') as usize))
            } else {
                None
            }
        }
        _ => None,
    }
}
