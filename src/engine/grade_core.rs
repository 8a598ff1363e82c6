// ==========================================
// 选课管理系统 - Grade Core 纯函数库
// ==========================================
// 职责: 百分制成绩 → 等第 → 绩点的唯一换算点
// 红线: 无状态、无副作用、无 I/O 操作
// 红线: 分段表只在此处定义，调用点不得自行换算
// ==========================================

use crate::domain::types::LetterGrade;

// ==========================================
// GradeCore - 纯函数工具类
// ==========================================
pub struct GradeCore;

impl GradeCore {
    /// 计算等第
    ///
    /// # 规则
    /// - score >= 90 → A
    /// - score >= 80 → B
    /// - score >= 70 → C
    /// - score >= 60 → D
    /// - 否则 → F
    ///
    /// 各分段下界含端点（90 为 A，89 为 B）
    pub fn letter_grade(score: i32) -> LetterGrade {
        if score >= 90 {
            LetterGrade::A
        } else if score >= 80 {
            LetterGrade::B
        } else if score >= 70 {
            LetterGrade::C
        } else if score >= 60 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    /// 计算绩点
    ///
    /// # 规则
    /// - A → 4.0, B → 3.0, C → 2.0, D → 1.0, F → 0.0
    pub fn grade_point(letter: LetterGrade) -> f64 {
        match letter {
            LetterGrade::A => 4.0,
            LetterGrade::B => 3.0,
            LetterGrade::C => 2.0,
            LetterGrade::D => 1.0,
            LetterGrade::F => 0.0,
        }
    }

    /// 成绩登记时的组合换算：等第 + 绩点
    pub fn evaluate(score: i32) -> (LetterGrade, f64) {
        let letter = Self::letter_grade(score);
        (letter, Self::grade_point(letter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_grade_分段表() {
        assert_eq!(GradeCore::letter_grade(100), LetterGrade::A);
        assert_eq!(GradeCore::letter_grade(90), LetterGrade::A);
        assert_eq!(GradeCore::letter_grade(89), LetterGrade::B);
        assert_eq!(GradeCore::letter_grade(80), LetterGrade::B);
        assert_eq!(GradeCore::letter_grade(79), LetterGrade::C);
        assert_eq!(GradeCore::letter_grade(70), LetterGrade::C);
        assert_eq!(GradeCore::letter_grade(69), LetterGrade::D);
        assert_eq!(GradeCore::letter_grade(60), LetterGrade::D);
        assert_eq!(GradeCore::letter_grade(59), LetterGrade::F);
        assert_eq!(GradeCore::letter_grade(0), LetterGrade::F);
    }

    #[test]
    fn test_grade_point_映射() {
        assert_eq!(GradeCore::grade_point(LetterGrade::A), 4.0);
        assert_eq!(GradeCore::grade_point(LetterGrade::B), 3.0);
        assert_eq!(GradeCore::grade_point(LetterGrade::C), 2.0);
        assert_eq!(GradeCore::grade_point(LetterGrade::D), 1.0);
        assert_eq!(GradeCore::grade_point(LetterGrade::F), 0.0);
    }

    #[test]
    fn test_evaluate_组合换算() {
        assert_eq!(GradeCore::evaluate(90), (LetterGrade::A, 4.0));
        assert_eq!(GradeCore::evaluate(89), (LetterGrade::B, 3.0));
        assert_eq!(GradeCore::evaluate(67), (LetterGrade::D, 1.0));
        assert_eq!(GradeCore::evaluate(60), (LetterGrade::D, 1.0));
        assert_eq!(GradeCore::evaluate(59), (LetterGrade::F, 0.0));
    }
}
