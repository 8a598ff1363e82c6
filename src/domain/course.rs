// ==========================================
// 选课管理系统 - 课程领域模型
// ==========================================
// 用途: 课程管理服务写入，选课工作流只读
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Course - 课程主数据
// ==========================================
// is_active 与 is_del 为相互独立的软标记：
// 课程可以停用但未删除，也可以两者同时成立
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    // ===== 主键 =====
    pub id: i64,

    // ===== 基础信息 =====
    pub code: String,  // 课程代码（唯一）
    pub title: String, // 课程名称
    pub credits: i32,  // 学分

    // ===== 软标记 =====
    pub is_active: bool, // 停用标记（false=停课）
    pub is_del: bool,    // 删除标记（true=已删除，记录保留）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
