// ==========================================
// 选课管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 课程注册与成绩管理后端（单进程同步）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EnrollmentAction, EnrollmentStatus, LetterGrade};

// 领域实体
pub use domain::{Course, Enrollment, Student};

// 引擎
pub use engine::{GradeCore, StatusGate, TransitionDenied};

// API
pub use api::{EnrollmentApi, EnrollmentDto, EnrollmentResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "选课管理系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";
