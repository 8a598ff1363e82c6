// ==========================================
// 选课管理系统 - 学生领域模型
// ==========================================
// 用途: 学生管理服务写入，选课工作流只读
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Student - 学生主数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    // ===== 主键 =====
    pub id: i64,

    // ===== 基础信息 =====
    pub first_name: String,
    pub last_name: String,
    pub email: String, // 唯一；认证层以此解析当前用户（本层不关心）

    // ===== 软标记 =====
    pub is_active: bool, // 停用标记（false=禁止选课）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
