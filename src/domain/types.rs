// ==========================================
// 选课管理系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (JSON)
// 存储格式: 单字母状态码 (与源系统数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 选课状态 (Enrollment Status)
// ==========================================
// 红线: 状态机制,不是散落的字符串判断
// 数据库存储: "A" / "W" / "C"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Active,    // 已选课
    Withdrawn, // 已退选（软状态，记录保留）
    Completed, // 课程已结束（禁止成绩修改）
}

impl EnrollmentStatus {
    /// 数据库状态码
    pub fn to_db_str(self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "A",
            EnrollmentStatus::Withdrawn => "W",
            EnrollmentStatus::Completed => "C",
        }
    }

    /// 从数据库状态码解析
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "A" => Some(EnrollmentStatus::Active),
            "W" => Some(EnrollmentStatus::Withdrawn),
            "C" => Some(EnrollmentStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(f, "ACTIVE"),
            EnrollmentStatus::Withdrawn => write!(f, "WITHDRAWN"),
            EnrollmentStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

// ==========================================
// 选课动作 (Enrollment Action)
// ==========================================
// 状态机输入，配合 StatusGate::next_status 使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentAction {
    Enroll,      // 选课（新建或退选后重选）
    RecordGrade, // 登记成绩（状态不变）
    Withdraw,    // 退选
    Complete,    // 结课
}

impl fmt::Display for EnrollmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentAction::Enroll => write!(f, "ENROLL"),
            EnrollmentAction::RecordGrade => write!(f, "RECORD_GRADE"),
            EnrollmentAction::Withdraw => write!(f, "WITHDRAW"),
            EnrollmentAction::Complete => write!(f, "COMPLETE"),
        }
    }
}

// ==========================================
// 等第 (Letter Grade)
// ==========================================
// 由百分制成绩派生，换算规则唯一定义在 GradeCore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// 数据库/展示用字母
    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    /// 从字母解析
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "A" => Some(LetterGrade::A),
            "B" => Some(LetterGrade::B),
            "C" => Some(LetterGrade::C),
            "D" => Some(LetterGrade::D),
            "F" => Some(LetterGrade::F),
            _ => None,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_roundtrip() {
        for status in [
            EnrollmentStatus::Active,
            EnrollmentStatus::Withdrawn,
            EnrollmentStatus::Completed,
        ] {
            assert_eq!(EnrollmentStatus::from_db_str(status.to_db_str()), Some(status));
        }
        assert_eq!(EnrollmentStatus::from_db_str("X"), None);
    }

    #[test]
    fn test_letter_grade_parse() {
        assert_eq!(LetterGrade::from_db_str("A"), Some(LetterGrade::A));
        assert_eq!(LetterGrade::from_db_str("E"), None);
    }
}
