// ==========================================
// 选课管理系统 - Status Gate 纯函数库
// ==========================================
// 职责: 课程/学生可用性判定 + 选课状态机转移判定
// 红线: 无状态、无副作用、无 I/O 操作；
//       入参为外部提供的快照，本层不查询存储
// 红线: 非法状态转移在此处统一拒绝，不散落在各操作里
// ==========================================

use crate::domain::course::Course;
use crate::domain::student::Student;
use crate::domain::types::{EnrollmentAction, EnrollmentStatus};
use thiserror::Error;

// ==========================================
// TransitionDenied - 状态机拒绝原因
// ==========================================
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDenied {
    /// 选课时已有非退选记录
    #[error("已选过该课程: status={status}")]
    AlreadyEnrolled { status: EnrollmentStatus },

    /// 对已退选记录登记成绩/结课
    #[error("已退选")]
    AlreadyWithdrawn,

    /// 对已结课记录登记成绩
    #[error("课程已结束: action={action}")]
    CourseEnded { action: EnrollmentAction },

    /// 重复结课
    #[error("该课程已结课")]
    AlreadyCompleted,

    /// 动作要求记录存在而记录不存在
    #[error("记录不存在: action={action}")]
    NoRecord { action: EnrollmentAction },
}

// ==========================================
// StatusGate - 纯函数工具类
// ==========================================
pub struct StatusGate;

impl StatusGate {
    /// 课程是否可选
    ///
    /// # 规则
    /// - 课程存在 且 is_active=true 且 is_del=false
    pub fn is_enrollable(course: Option<&Course>) -> bool {
        matches!(course, Some(c) if c.is_active && !c.is_del)
    }

    /// 学生是否可用
    ///
    /// # 规则
    /// - 学生存在 且 is_active=true
    pub fn is_usable(student: Option<&Student>) -> bool {
        matches!(student, Some(s) if s.is_active)
    }

    /// 状态机转移判定
    ///
    /// # 转移表
    /// | 当前       | Enroll       | RecordGrade | Withdraw  | Complete  |
    /// |------------|--------------|-------------|-----------|-----------|
    /// | 无记录     | Active(新建) | 拒绝        | 拒绝      | 拒绝      |
    /// | Active     | 拒绝(已选)   | Active      | Withdrawn | Completed |
    /// | Withdrawn  | Active(重选) | 拒绝        | Withdrawn | 拒绝      |
    /// | Completed  | 拒绝(已选)   | 拒绝(已结课)| Withdrawn | 拒绝      |
    ///
    /// 说明：
    /// - Withdraw 对 Withdrawn 记录幂等（退选序列最终总是 Withdrawn）
    /// - Withdraw 的"有成绩不可退选"约束与状态无关，由工作流单独把守
    /// - 记录不存在时只有 Enroll 合法，其余动作先由存在性检查拦截
    pub fn next_status(
        current: Option<EnrollmentStatus>,
        action: EnrollmentAction,
    ) -> Result<EnrollmentStatus, TransitionDenied> {
        use EnrollmentAction::*;
        use EnrollmentStatus::*;

        match (current, action) {
            // ===== 选课 =====
            (None, Enroll) => Ok(Active),
            (Some(Withdrawn), Enroll) => Ok(Active),
            (Some(status @ (Active | Completed)), Enroll) => {
                Err(TransitionDenied::AlreadyEnrolled { status })
            }

            // ===== 成绩登记（状态不变）=====
            (Some(Active), RecordGrade) => Ok(Active),
            (Some(Withdrawn), RecordGrade) => Err(TransitionDenied::AlreadyWithdrawn),
            (Some(Completed), RecordGrade) => Err(TransitionDenied::CourseEnded { action }),

            // ===== 退选（对已退选幂等）=====
            (Some(Active | Withdrawn | Completed), Withdraw) => Ok(Withdrawn),

            // ===== 结课 =====
            (Some(Active), Complete) => Ok(Completed),
            (Some(Withdrawn), Complete) => Err(TransitionDenied::AlreadyWithdrawn),
            (Some(Completed), Complete) => Err(TransitionDenied::AlreadyCompleted),

            // ===== 无记录时的其余动作 =====
            (None, RecordGrade | Withdraw | Complete) => {
                Err(TransitionDenied::NoRecord { action })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn course(is_active: bool, is_del: bool) -> Course {
        Course {
            id: 1,
            code: "C001".to_string(),
            title: "Math".to_string(),
            credits: 3,
            is_active,
            is_del,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn student(is_active: bool) -> Student {
        Student {
            id: 1,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "ab@example.com".to_string(),
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_enrollable_软标记组合() {
        assert!(StatusGate::is_enrollable(Some(&course(true, false))));
        assert!(!StatusGate::is_enrollable(Some(&course(false, false))));
        assert!(!StatusGate::is_enrollable(Some(&course(true, true))));
        assert!(!StatusGate::is_enrollable(Some(&course(false, true))));
        assert!(!StatusGate::is_enrollable(None));
    }

    #[test]
    fn test_is_usable_停用学生() {
        assert!(StatusGate::is_usable(Some(&student(true))));
        assert!(!StatusGate::is_usable(Some(&student(false))));
        assert!(!StatusGate::is_usable(None));
    }

    #[test]
    fn test_next_status_选课转移() {
        use EnrollmentAction::*;
        use EnrollmentStatus::*;

        // 新建与重选
        assert_eq!(StatusGate::next_status(None, Enroll), Ok(Active));
        assert_eq!(StatusGate::next_status(Some(Withdrawn), Enroll), Ok(Active));

        // 重复选课
        assert_eq!(
            StatusGate::next_status(Some(Active), Enroll),
            Err(TransitionDenied::AlreadyEnrolled { status: Active })
        );
        assert_eq!(
            StatusGate::next_status(Some(Completed), Enroll),
            Err(TransitionDenied::AlreadyEnrolled { status: Completed })
        );
    }

    #[test]
    fn test_next_status_成绩登记转移() {
        use EnrollmentAction::*;
        use EnrollmentStatus::*;

        assert_eq!(StatusGate::next_status(Some(Active), RecordGrade), Ok(Active));
        assert_eq!(
            StatusGate::next_status(Some(Withdrawn), RecordGrade),
            Err(TransitionDenied::AlreadyWithdrawn)
        );
        assert_eq!(
            StatusGate::next_status(Some(Completed), RecordGrade),
            Err(TransitionDenied::CourseEnded { action: RecordGrade })
        );
    }

    #[test]
    fn test_next_status_退选幂等() {
        use EnrollmentAction::*;
        use EnrollmentStatus::*;

        assert_eq!(StatusGate::next_status(Some(Active), Withdraw), Ok(Withdrawn));
        assert_eq!(StatusGate::next_status(Some(Withdrawn), Withdraw), Ok(Withdrawn));
        assert_eq!(StatusGate::next_status(Some(Completed), Withdraw), Ok(Withdrawn));
    }

    #[test]
    fn test_next_status_结课转移() {
        use EnrollmentAction::*;
        use EnrollmentStatus::*;

        assert_eq!(StatusGate::next_status(Some(Active), Complete), Ok(Completed));
        assert_eq!(
            StatusGate::next_status(Some(Withdrawn), Complete),
            Err(TransitionDenied::AlreadyWithdrawn)
        );
        assert_eq!(
            StatusGate::next_status(Some(Completed), Complete),
            Err(TransitionDenied::AlreadyCompleted)
        );
    }

    #[test]
    fn test_next_status_无记录拒绝() {
        use EnrollmentAction::*;

        for action in [RecordGrade, Withdraw, Complete] {
            assert_eq!(
                StatusGate::next_status(None, action),
                Err(TransitionDenied::NoRecord { action })
            );
        }
    }
}
