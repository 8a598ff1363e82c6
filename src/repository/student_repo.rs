// ==========================================
// 选课管理系统 - 学生数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 选课工作流对学生只读；insert 仅供初始化与测试播种
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::student::Student;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// StudentRepository - 学生仓储
// ==========================================
/// 学生仓储
/// 职责: 管理 student 表的数据访问
pub struct StudentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StudentRepository {
    /// 创建新的 StudentRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按主键查询学生
    ///
    /// # 返回
    /// - Ok(Some(Student)): 找到学生
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_id(&self, student_id: i64) -> RepositoryResult<Option<Student>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, first_name, last_name, email, is_active, created_at, updated_at
            FROM student
            WHERE id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![student_id], map_student_row);

        match result {
            Ok(student) => Ok(Some(student)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入学生记录（初始化/测试用）
    pub fn insert(&self, student: &Student) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO student (id, first_name, last_name, email, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                student.id,
                student.first_name,
                student.last_name,
                student.email,
                student.is_active,
                student.created_at.to_rfc3339(),
                student.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

/// student 行映射
fn map_student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        is_active: row.get(4)?,
        created_at: row
            .get::<_, String>(5)?
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap_or_else(|_| chrono::Utc::now()),
        updated_at: row
            .get::<_, String>(6)?
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap_or_else(|_| chrono::Utc::now()),
    })
}
