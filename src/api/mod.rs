// ==========================================
// 选课管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供传输层（HTTP 等，不在本库范围）调用
// 约束: 本层与传输无关；所有结果以 success + message 结构化返回
// ==========================================

pub mod enrollment_api;
pub mod error;

// 重导出核心类型
pub use enrollment_api::{
    CourseDto, EnrollmentApi, EnrollmentDto, EnrollmentResponse, StudentDto,
};
pub use error::{ApiError, ApiResult};
