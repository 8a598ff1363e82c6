// ==========================================
// 选课管理系统 - 引擎层
// ==========================================
// 职责: 实现业务规则纯逻辑,不拼 SQL
// 红线: 引擎层无状态、无副作用、无 I/O 操作
// ==========================================

pub mod grade_core;
pub mod status_gate;

// 重导出核心引擎
pub use grade_core::GradeCore;
pub use status_gate::{StatusGate, TransitionDenied};
