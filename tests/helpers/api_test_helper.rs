// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::NamedTempFile;

use select_course::api::EnrollmentApi;
use select_course::domain::course::Course;
use select_course::domain::enrollment::Enrollment;
use select_course::domain::student::Student;
use select_course::repository::{CourseRepository, EnrollmentRepository, StudentRepository};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 所有仓储共享同一连接，测试数据准备与被测 API 看到同一份数据
pub struct ApiTestEnv {
    pub db_path: String,
    pub enrollment_api: EnrollmentApi,

    // Repository层（用于测试数据准备与结果核对）
    pub enrollment_repo: Arc<EnrollmentRepository>,
    pub course_repo: Arc<CourseRepository>,
    pub student_repo: Arc<StudentRepository>,

    // 共享连接（用于故障注入等底层操作）
    pub conn: Arc<Mutex<Connection>>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境
    ///
    /// # 说明
    /// - 使用临时数据库文件并初始化 schema
    /// - 初始化所有Repository和API
    pub fn new() -> Result<Self, String> {
        let (temp_file, db_path) =
            test_helpers::create_test_db().map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let conn = select_course::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let enrollment_repo = Arc::new(EnrollmentRepository::from_connection(conn.clone()));
        let course_repo = Arc::new(CourseRepository::from_connection(conn.clone()));
        let student_repo = Arc::new(StudentRepository::from_connection(conn.clone()));

        let enrollment_api = EnrollmentApi::new(
            enrollment_repo.clone(),
            course_repo.clone(),
            student_repo.clone(),
        );

        Ok(Self {
            db_path,
            enrollment_api,
            enrollment_repo,
            course_repo,
            student_repo,
            conn,
            _temp_file: temp_file,
        })
    }

    /// 播种学生
    pub fn seed_students(&self, students: Vec<Student>) -> Result<(), String> {
        for student in &students {
            self.student_repo
                .insert(student)
                .map_err(|e| format!("播种学生失败: {}", e))?;
        }
        Ok(())
    }

    /// 播种课程
    pub fn seed_courses(&self, courses: Vec<Course>) -> Result<(), String> {
        for course in &courses {
            self.course_repo
                .insert(course)
                .map_err(|e| format!("播种课程失败: {}", e))?;
        }
        Ok(())
    }

    /// 播种选课记录
    pub fn seed_enrollments(&self, enrollments: Vec<Enrollment>) -> Result<(), String> {
        for enrollment in &enrollments {
            self.enrollment_repo
                .insert(enrollment)
                .map_err(|e| format!("播种选课记录失败: {}", e))?;
        }
        Ok(())
    }

    /// 故障注入: 重命名 enrollment 表，使后续读写失败
    ///
    /// 用于验证持久化失败被收敛为操作级错误消息
    pub fn break_enrollment_table(&self) {
        let conn = self.conn.lock().expect("测试连接锁获取失败");
        conn.execute_batch("ALTER TABLE enrollment RENAME TO enrollment_broken;")
            .expect("故障注入失败");
    }
}
