// ==========================================
// 选课管理系统 - 选课记录领域模型
// ==========================================
// 约束: letter_grade/grade_point 当且仅当 grade 存在时存在，
//       且必须由 GradeCore 派生，不得在调用点各自换算
// 约束: status=Withdrawn 蕴含 grade 为空（有成绩不可退选）
// ==========================================

use crate::domain::types::{EnrollmentStatus, LetterGrade};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Enrollment - 选课记录
// ==========================================
// 逻辑主键: (student_id, course_id)；id 为存储用代理键
// 生命周期: 选课创建 → 成绩登记/退选/结课；记录从不物理删除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    // ===== 主键 =====
    pub id: i64, // 代理键（AUTOINCREMENT）

    // ===== 关联 =====
    pub student_id: i64, // 学生 Id
    pub course_id: i64,  // 课程 Id

    // ===== 成绩字段 =====
    pub grade: Option<i32>,                // 百分制成绩（0~100）
    pub letter_grade: Option<LetterGrade>, // 等第（派生）
    pub grade_point: Option<f64>,          // 绩点（派生）

    // ===== 状态 =====
    pub status: EnrollmentStatus, // 选课状态（A/W/C）
    pub row_version: i32,         // 成绩修订计数（覆盖已有成绩时 +1）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 创建时间（退选后重选会刷新）
    pub updated_at: DateTime<Utc>, // 最后更新时间
}

impl Enrollment {
    /// 新建一条 Active 选课记录（尚未持久化，id 由存储层回填）
    pub fn new_active(student_id: i64, course_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            student_id,
            course_id,
            grade: None,
            letter_grade: None,
            grade_point: None,
            status: EnrollmentStatus::Active,
            row_version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// 是否已有成绩
    pub fn has_grade(&self) -> bool {
        self.grade.is_some()
    }
}
