// ==========================================
// 选课管理系统 - 课程数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 说明: 选课工作流对课程只读；课程的停用/删除由课程管理服务负责，
//       本仓储只暴露查询与播种接口
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::course::Course;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// CourseRepository - 课程仓储
// ==========================================
/// 课程仓储
/// 职责: 管理 course 表的数据访问
pub struct CourseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CourseRepository {
    /// 创建新的 CourseRepository 实例
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

    /// 按主键查询课程
    ///
    /// # 返回
    /// - Ok(Some(Course)): 找到课程（含已停用/已删除，软标记由调用方判定）
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_id(&self, course_id: i64) -> RepositoryResult<Option<Course>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, code, title, credits, is_active, is_del, created_at, updated_at
            FROM course
            WHERE id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![course_id], map_course_row);

        match result {
            Ok(course) => Ok(Some(course)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入课程记录（初始化/测试用）
    pub fn insert(&self, course: &Course) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO course (id, code, title, credits, is_active, is_del, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                course.id,
                course.code,
                course.title,
                course.credits,
                course.is_active,
                course.is_del,
                course.created_at.to_rfc3339(),
                course.updated_at.map(|dt| dt.to_rfc3339()),
            ],
        )?;
        Ok(())
    }
}

/// course 行映射
fn map_course_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        code: row.get(1)?,
        title: row.get(2)?,
        credits: row.get(3)?,
        is_active: row.get(4)?,
        is_del: row.get(5)?,
        created_at: row
            .get::<_, String>(6)?
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap_or_else(|_| chrono::Utc::now()),
        updated_at: row
            .get::<_, Option<String>>(7)?
            .and_then(|s| s.parse::<chrono::DateTime<chrono::Utc>>().ok()),
    })
}
