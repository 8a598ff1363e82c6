// ==========================================
// 选课管理系统 - 选课记录数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 记录从不物理删除；退选通过状态列表达，
//       "隐藏已退选"属于业务语义，由 API 层把守，
//       本层仅提供 list_active/count_active 查询口径
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::enrollment::Enrollment;
use crate::domain::types::{EnrollmentStatus, LetterGrade};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// EnrollmentRepository - 选课记录仓储
// ==========================================
/// 选课记录仓储
/// 职责: 管理 enrollment 表的 CRUD 操作
pub struct EnrollmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EnrollmentRepository {
    /// 创建新的 EnrollmentRepository 实例
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

    /// 按逻辑主键 (student_id, course_id) 查询
    ///
    /// 包含已退选记录（审计口径）；业务上的"隐藏已退选"由调用方判定
    ///
    /// # 返回
    /// - Ok(Some(Enrollment)): 找到选课记录
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_key(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> RepositoryResult<Option<Enrollment>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, student_id, course_id,
                   grade, letter_grade, grade_point,
                   status, row_version,
                   created_at, updated_at
            FROM enrollment
            WHERE student_id = ?1 AND course_id = ?2
            "#,
        )?;

        let result = stmt.query_row(params![student_id, course_id], map_enrollment_row);

        match result {
            Ok(enrollment) => Ok(Some(enrollment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 分页查询非退选记录（Active + Completed）
    ///
    /// # 参数
    /// - `limit`: 返回记录数上限
    /// - `offset`: 偏移量（分页）
    pub fn list_active(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<Enrollment>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, student_id, course_id,
                   grade, letter_grade, grade_point,
                   status, row_version,
                   created_at, updated_at
            FROM enrollment
            WHERE status <> 'W'
            ORDER BY id ASC
            LIMIT ?1 OFFSET ?2
            "#,
        )?;

        let enrollments = stmt
            .query_map(params![limit, offset], map_enrollment_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(enrollments)
    }

    /// 统计非退选记录总数
    pub fn count_active(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM enrollment WHERE status <> 'W'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// 新增选课记录
    ///
    /// # 返回
    /// - Ok(i64): 新记录的代理键
    pub fn insert(&self, enrollment: &Enrollment) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO enrollment (
                student_id, course_id,
                grade, letter_grade, grade_point,
                status, row_version,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                enrollment.student_id,
                enrollment.course_id,
                enrollment.grade,
                enrollment.letter_grade.map(|l| l.as_str()),
                enrollment.grade_point,
                enrollment.status.to_db_str(),
                enrollment.row_version,
                enrollment.created_at.to_rfc3339(),
                enrollment.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 更新选课记录（按代理键定位）
    pub fn update(&self, enrollment: &Enrollment) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE enrollment
            SET grade = ?1,
                letter_grade = ?2,
                grade_point = ?3,
                status = ?4,
                row_version = ?5,
                created_at = ?6,
                updated_at = ?7
            WHERE id = ?8
            "#,
            params![
                enrollment.grade,
                enrollment.letter_grade.map(|l| l.as_str()),
                enrollment.grade_point,
                enrollment.status.to_db_str(),
                enrollment.row_version,
                enrollment.created_at.to_rfc3339(),
                enrollment.updated_at.to_rfc3339(),
                enrollment.id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Enrollment".to_string(),
                id: enrollment.id.to_string(),
            });
        }
        Ok(())
    }
}

/// enrollment 行映射
fn map_enrollment_row(row: &Row<'_>) -> rusqlite::Result<Enrollment> {
    Ok(Enrollment {
        id: row.get(0)?,
        student_id: row.get(1)?,
        course_id: row.get(2)?,
        grade: row.get(3)?,
        letter_grade: row
            .get::<_, Option<String>>(4)?
            .and_then(|s| LetterGrade::from_db_str(&s)),
        grade_point: row.get(5)?,
        status: parse_status(&row.get::<_, String>(6)?),
        row_version: row.get(7)?,
        created_at: row
            .get::<_, String>(8)?
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap_or_else(|_| chrono::Utc::now()),
        updated_at: row
            .get::<_, String>(9)?
            .parse::<chrono::DateTime<chrono::Utc>>()
            .unwrap_or_else(|_| chrono::Utc::now()),
    })
}

fn parse_status(s: &str) -> EnrollmentStatus {
    EnrollmentStatus::from_db_str(s).unwrap_or(EnrollmentStatus::Active) // 默认值
}
