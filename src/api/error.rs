// ==========================================
// 选课管理系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换仓储层/状态机错误为业务错误
// 约束: 错误信息必须包含显式原因；message 即对外的稳定业务码
// ==========================================

use crate::engine::status_gate::TransitionDenied;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
///
/// 分类对应错误处理策略：
/// - 校验/冲突类（InvalidInput/NotFound/Unavailable/Conflict）：
///   业务上的正常失败，warn 级别记录，message 原样返回调用方
/// - 持久化类（DatabaseError 等）：error 级别记录，
///   对外折叠为操作级别的笼统消息，细节只进日志
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("资源不可用: {0}")]
    Unavailable(String),

    #[error("业务冲突: {0}")]
    Conflict(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 稳定错误代码（供传输层映射状态码/前端分支判断）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unavailable(_) => "UNAVAILABLE",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 是否为持久化/系统类错误（对外折叠消息，error 级别记录）
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            ApiError::DatabaseError(_)
                | ApiError::DatabaseConnectionError(_)
                | ApiError::InternalError(_)
                | ApiError::Other(_)
        )
    }

    /// 业务消息（message 即业务码，原样返回调用方）
    pub fn business_message(&self) -> String {
        match self {
            ApiError::InvalidInput(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unavailable(msg)
            | ApiError::Conflict(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 查询路径上用 `?` 直接上抛；持久化路径由工作流显式折叠
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::Conflict(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::DatabaseError(format!("外键约束违反: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 TransitionDenied 转换
// 目的: 状态机拒绝 → 带稳定业务消息的冲突/未找到错误
// ==========================================
impl From<TransitionDenied> for ApiError {
    fn from(denied: TransitionDenied) -> Self {
        match denied {
            TransitionDenied::AlreadyEnrolled { .. } => {
                ApiError::Conflict("已选过该课程".to_string())
            }
            TransitionDenied::AlreadyWithdrawn => ApiError::Conflict("已退选".to_string()),
            TransitionDenied::CourseEnded { .. } => {
                ApiError::Conflict("课程已结束，无法更新成绩".to_string())
            }
            TransitionDenied::AlreadyCompleted => {
                ApiError::Conflict("该课程已结课".to_string())
            }
            TransitionDenied::NoRecord { .. } => {
                ApiError::NotFound("无此选课资料".to_string())
            }
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
