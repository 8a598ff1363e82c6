// ==========================================
// 选课管理系统 - 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 级别策略: 校验/冲突 warn，持久化失败 error，操作成功 info
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=select_course=trace 可打开工作流进出跟踪
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 初始化测试环境的日志系统
///
/// 捕获到测试输出，仅失败用例打印；重复初始化安全
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("select_course=debug"))
        .with_test_writer()
        .try_init();
}
