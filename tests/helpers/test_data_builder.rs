// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::Utc;
use select_course::domain::course::Course;
use select_course::domain::enrollment::Enrollment;
use select_course::domain::student::Student;
use select_course::domain::types::EnrollmentStatus;
use select_course::engine::grade_core::GradeCore;

// ==========================================
// Student 构建器
// ==========================================

pub struct StudentBuilder {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    is_active: bool,
}

impl StudentBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            email: format!("student{}@example.com", id),
            is_active: true,
        }
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Student {
        let now = Utc::now();
        Student {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

// ==========================================
// Course 构建器
// ==========================================

pub struct CourseBuilder {
    id: i64,
    code: String,
    title: String,
    credits: i32,
    is_active: bool,
    is_del: bool,
}

impl CourseBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            code: format!("C{:03}", id),
            title: format!("Course{}", id),
            credits: 3,
            is_active: true,
            is_del: false,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn credits(mut self, credits: i32) -> Self {
        self.credits = credits;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.is_del = true;
        self
    }

    pub fn build(self) -> Course {
        Course {
            id: self.id,
            code: self.code,
            title: self.title,
            credits: self.credits,
            is_active: self.is_active,
            is_del: self.is_del,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

// ==========================================
// Enrollment 构建器
// ==========================================

pub struct EnrollmentBuilder {
    student_id: i64,
    course_id: i64,
    grade: Option<i32>,
    status: EnrollmentStatus,
    row_version: i32,
}

impl EnrollmentBuilder {
    pub fn new(student_id: i64, course_id: i64) -> Self {
        Self {
            student_id,
            course_id,
            grade: None,
            status: EnrollmentStatus::Active,
            row_version: 0,
        }
    }

    /// 设置成绩（等第/绩点经 GradeCore 派生，与生产路径一致）
    pub fn grade(mut self, grade: i32) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn status(mut self, status: EnrollmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Enrollment {
        let now = Utc::now();
        let (letter_grade, grade_point) = match self.grade {
            Some(score) => {
                let (letter, point) = GradeCore::evaluate(score);
                (Some(letter), Some(point))
            }
            None => (None, None),
        };
        Enrollment {
            id: 0,
            student_id: self.student_id,
            course_id: self.course_id,
            grade: self.grade,
            letter_grade,
            grade_point,
            status: self.status,
            row_version: self.row_version,
            created_at: now,
            updated_at: now,
        }
    }
}
