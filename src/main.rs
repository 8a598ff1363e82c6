// ==========================================
// 选课管理系统 - 控制台入口
// ==========================================
// 职责: 初始化日志与数据库，完成自检后退出
// 说明: HTTP 等传输层不在本库范围；本入口用于部署前的环境自检
// ==========================================

use std::path::PathBuf;

use select_course::db;

/// 解析数据库路径
///
/// 优先级: 环境变量 SELECT_COURSE_DB > 用户数据目录 > 当前目录回退
fn resolve_db_path() -> String {
    if let Ok(path) = std::env::var("SELECT_COURSE_DB") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./select_course.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("select-course");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("select_course.db");
        }
    }
    path.to_string_lossy().to_string()
}

fn main() {
    // 初始化日志系统
    select_course::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 课程注册与成绩管理后端", select_course::APP_NAME);
    tracing::info!("系统版本: {}", select_course::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = resolve_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 打开连接并初始化 schema
    let conn = match db::open_sqlite_connection(&db_path) {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("无法打开数据库: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db::init_schema(&conn) {
        tracing::error!("schema 初始化失败: {}", e);
        std::process::exit(1);
    }

    // schema 版本自检（只告警，不自动迁移）
    match db::read_schema_version(&conn) {
        Ok(Some(version)) if version == db::CURRENT_SCHEMA_VERSION => {
            tracing::info!("schema 版本: {}", version);
        }
        Ok(version) => {
            tracing::warn!(
                "schema 版本不匹配: 当前={:?}, 期望={}",
                version,
                db::CURRENT_SCHEMA_VERSION
            );
        }
        Err(e) => {
            tracing::warn!("schema 版本读取失败: {}", e);
        }
    }

    tracing::info!("环境自检完成，数据库就绪");
    tracing::info!("库模式使用: select_course::api::EnrollmentApi");
}
