/// 日志工具模块
///
/// 提供日志初始化和考试过程中的格式化输出辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::paper::PaperQuestion;
use crate::session::answers::option_letter;
use crate::session::state::SubmissionStatus;
use crate::workflow::session_ctx::SessionCtx;

/// 初始化日志
///
/// 默认 info 级别，可用 RUST_LOG 覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup() {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 限时考试会话模式");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 记录会话开始信息
///
/// # 参数
/// - `ctx`: 会话上下文
/// - `duration_seconds`: 考试时长（秒）
pub fn log_session_start(ctx: &SessionCtx, duration_seconds: u64) {
    info!("\n{}", "=".repeat(60));
    info!("📋 开始考试: {}", ctx.title);
    info!("📚 科目: {} / 共 {} 题", ctx.subject, ctx.total_questions);
    info!("⏰ 时长: {}", format_remaining(duration_seconds));
    info!("{}", "=".repeat(60));
}

/// 显示一道题目
///
/// # 参数
/// - `ctx`: 会话上下文
/// - `index`: 题目下标（0 起）
/// - `total`: 题目总数
/// - `question`: 题目数据
/// - `selected`: 该题当前的选择
pub fn log_question(
    ctx: &SessionCtx,
    index: usize,
    total: usize,
    question: &PaperQuestion,
    selected: Option<usize>,
) {
    info!("\n{}", "─".repeat(60));
    info!(
        "{} 第 {}/{} 题 ({} 分, {})",
        ctx,
        index + 1,
        total,
        question.marks,
        question.difficulty
    );
    info!("题干: {}", truncate_text(&question.question.stem, 80));

    for (i, option) in question.question.options.iter().enumerate() {
        let marker = if selected == Some(i) { "●" } else { " " };
        info!("  {} {}. {}", marker, option_letter(i), truncate_text(option, 60));
    }

    if let Some(tip) = &question.question.tip {
        info!("💡 提示: {}", truncate_text(tip, 60));
    }
}

/// 显示答题进度
pub fn log_progress(
    ctx: &SessionCtx,
    answered: usize,
    total: usize,
    remaining_seconds: u64,
    status: &SubmissionStatus,
) {
    info!("\n{}", "─".repeat(60));
    info!("{} 📊 已答 {}/{} 题", ctx, answered, total);
    info!("⏰ 剩余时间: {}", format_remaining(remaining_seconds));
    info!("状态: {}", status);
    info!("{}", "─".repeat(60));
}

/// 打印判分结果
pub fn log_result(ctx: &SessionCtx, result: &crate::models::wire::SubmissionResult) {
    info!("\n{}", "=".repeat(60));
    info!("📊 交卷成功: {}", ctx.title);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "✅ 答对: {}/{}",
        result.correct_answers, result.total_questions
    );
    info!("🎯 得分率: {:.1}%", result.score_percent);
    info!("⏱️ 用时: {}", format_remaining(result.time_spent));
    info!("{}", "=".repeat(60));
}

/// 剩余秒数格式化为 HH:MM:SS
pub fn format_remaining(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
