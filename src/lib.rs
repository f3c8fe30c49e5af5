//! # Take Exam Submit
//!
//! 一个限时考试会话引擎：管理一名考生对一张固定题目试卷的作答过程
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 领域类型与接口数据结构
//! - `ExamPaper` - 加载后不可变的试卷
//! - `wire` - 与服务端交互的请求/响应结构
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 封装远端服务调用，只处理单次请求
//! - `PaperClient` - 试卷服务
//! - `AttemptClient` - 作答记录 / 交卷服务
//!
//! ### ③ 会话核心（Session）
//! - `session/` - 显式状态机，所有状态变化走事件队列
//! - `SessionState` - 聚合根，纯状态转移，单次交卷守卫在这里
//! - `SessionClock` - 按墙钟折算的倒计时
//! - `AnswerStore` - 后写覆盖的答案台账
//!
//! ### ④ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `PaperLoader` - 加载并校验试卷
//! - `AttemptRecorder` - 尽力而为的单题作答上报
//! - `SubmissionCoordinator` - 执行交卷请求
//!
//! ### ⑤ 流程层（Workflow）
//! - `workflow/` - 定义"一场考试"的完整事件循环
//! - `SessionCtx` - 上下文封装（试卷 + 科目）
//! - `SessionFlow` - 流程编排（倒计时 → 作答 → 交卷 → 结果）
//!
//! ### ⑥ 编排层（Orchestration）
//! - `orchestrator/app` - 应用入口，加载重试、输入驱动、结果交接
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod session;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{AttemptClient, PaperClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::paper::{ExamPaper, PaperQuestion, Question};
pub use models::wire::SubmissionResult;
pub use orchestrator::App;
pub use services::{AttemptRecorder, LoadError, PaperLoader, SubmissionCoordinator};
pub use session::{SessionClock, SessionEvent, SessionState, SubmissionStatus, SubmitReason};
pub use workflow::{SessionCtx, SessionFlow};
