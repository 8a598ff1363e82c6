// ==========================================
// 选课管理系统 - 选课 API
// ==========================================
// 职责: 选课/退选/成绩登记/结课工作流编排
// 约束: 操作者身份（student_id）由调用方解析后显式传入，
//       本层不读任何环境上下文
// 约束: 所有错误在本层就地收敛为 EnrollmentResponse，不向外抛出；
//       校验/冲突 warn 级别，持久化失败 error 级别
// ==========================================

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, trace, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::course::Course;
use crate::domain::enrollment::Enrollment;
use crate::domain::student::Student;
use crate::domain::types::{EnrollmentAction, EnrollmentStatus, LetterGrade};
use crate::engine::grade_core::GradeCore;
use crate::engine::status_gate::StatusGate;
use crate::repository::course_repo::CourseRepository;
use crate::repository::enrollment_repo::EnrollmentRepository;
use crate::repository::student_repo::StudentRepository;

// ==========================================
// 响应 DTO
// ==========================================

/// 学生摘要（嵌入选课响应）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// 课程摘要（嵌入选课响应）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDto {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub credits: i32,
}

/// 选课记录完整视图（记录 + 学生摘要 + 课程摘要）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentDto {
    pub student_id: i64,
    pub student: StudentDto,
    pub course_id: i64,
    pub course: CourseDto,
    pub grade: Option<i32>,
    pub letter_grade: Option<LetterGrade>,
    pub grade_point: Option<f64>,
    pub status: EnrollmentStatus,
}

/// 选课操作统一响应
///
/// message 即对外的稳定业务码；success=false 时 enrollments 为空
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub success: bool,
    pub message: String,
    pub enrollments: Vec<EnrollmentDto>,
    pub page_count: i64,
    pub total_count: i64,
}

impl EnrollmentResponse {
    fn ok(message: &str, enrollments: Vec<EnrollmentDto>) -> Self {
        let total = enrollments.len() as i64;
        Self {
            success: true,
            message: message.to_string(),
            enrollments,
            page_count: 0,
            total_count: total,
        }
    }

    fn ok_paged(
        message: &str,
        enrollments: Vec<EnrollmentDto>,
        page_count: i64,
        total_count: i64,
    ) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            enrollments,
            page_count,
            total_count,
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            enrollments: Vec::new(),
            page_count: 0,
            total_count: 0,
        }
    }
}

// ==========================================
// EnrollmentApi - 选课 API
// ==========================================

/// 选课API
///
/// 职责：
/// 1. 选课（新建/退选后重选）
/// 2. 成绩登记（等第/绩点派生、修订计数）
/// 3. 退选（软状态变更，记录保留）
/// 4. 结课（锁定成绩）
/// 5. 选课查询与分页列表（隐藏已退选）
pub struct EnrollmentApi {
    enrollment_repo: Arc<EnrollmentRepository>,
    course_repo: Arc<CourseRepository>,
    student_repo: Arc<StudentRepository>,
}

impl EnrollmentApi {
    /// 创建新的 EnrollmentApi 实例
    ///
    /// # 参数
    /// - enrollment_repo: 选课记录仓储
    /// - course_repo: 课程仓储（只读）
    /// - student_repo: 学生仓储（只读）
    pub fn new(
        enrollment_repo: Arc<EnrollmentRepository>,
        course_repo: Arc<CourseRepository>,
        student_repo: Arc<StudentRepository>,
    ) -> Self {
        Self {
            enrollment_repo,
            course_repo,
            student_repo,
        }
    }

    // ==========================================
    // 选课
    // ==========================================

    /// 选课
    ///
    /// # 规则
    /// 1. 学生/课程 Id 非零
    /// 2. 学生存在且启用；课程存在、启用且未删除
    /// 3. 无记录 → 新建 Active；已退选 → 原记录翻回 Active（不产生重复记录），
    ///    并以独立消息区分重选与首次选课
    pub fn enroll(&self, student_id: i64, course_id: i64) -> EnrollmentResponse {
        trace!("进入 enroll");
        let response = match self.try_enroll(student_id, course_id) {
            Ok((dto, reenrolled)) => {
                info!(student_id, course_id, reenrolled, "选课成功");
                let message = if reenrolled {
                    "该课程已重新选课成功"
                } else {
                    "选课成功"
                };
                EnrollmentResponse::ok(message, vec![dto])
            }
            Err(err) => self.fail_response(&err, "选课发生错误"),
        };
        trace!("离开 enroll");
        response
    }

    fn try_enroll(&self, student_id: i64, course_id: i64) -> ApiResult<(EnrollmentDto, bool)> {
        if student_id == 0 || course_id == 0 {
            return Err(ApiError::InvalidInput("Id为空".to_string()));
        }

        // 学生/课程可用性门禁
        let student = match self.student_repo.find_by_id(student_id)? {
            Some(s) if StatusGate::is_usable(Some(&s)) => s,
            _ => {
                return Err(ApiError::Unavailable("学生不存在或已停用".to_string()));
            }
        };
        let course = match self.course_repo.find_by_id(course_id)? {
            Some(c) if StatusGate::is_enrollable(Some(&c)) => c,
            _ => {
                return Err(ApiError::Unavailable("课程不存在或已停用".to_string()));
            }
        };

        let existing = self.enrollment_repo.find_by_key(student_id, course_id)?;
        let now = Utc::now();

        match existing {
            None => {
                let status = StatusGate::next_status(None, EnrollmentAction::Enroll)?;
                let mut enrollment = Enrollment::new_active(student_id, course_id, now);
                enrollment.status = status;
                let id = self
                    .enrollment_repo
                    .insert(&enrollment)
                    .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
                enrollment.id = id;
                Ok((make_dto(&enrollment, &student, &course), false))
            }
            Some(mut enrollment) => {
                // 已有记录：只有退选状态允许翻回 Active（重选）
                let next = StatusGate::next_status(Some(enrollment.status), EnrollmentAction::Enroll)?;
                enrollment.status = next;
                enrollment.created_at = now; // 重选刷新创建时间
                enrollment.updated_at = now;
                self.enrollment_repo
                    .update(&enrollment)
                    .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
                Ok((make_dto(&enrollment, &student, &course), true))
            }
        }
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 按 (student_id, course_id) 查询选课记录
    ///
    /// 已退选记录对常规查询隐藏（返回"已退选"），但物理保留供审计
    pub fn get_enrollment(&self, student_id: i64, course_id: i64) -> EnrollmentResponse {
        trace!("进入 get_enrollment");
        let response = match self.try_get_enrollment(student_id, course_id) {
            Ok(dto) => EnrollmentResponse::ok("查询成功", vec![dto]),
            Err(err) => self.fail_response(&err, "查询发生错误"),
        };
        trace!("离开 get_enrollment");
        response
    }

    fn try_get_enrollment(&self, student_id: i64, course_id: i64) -> ApiResult<EnrollmentDto> {
        if student_id == 0 || course_id == 0 {
            return Err(ApiError::InvalidInput("StudentId或CourseId为空".to_string()));
        }

        let enrollment = self
            .enrollment_repo
            .find_by_key(student_id, course_id)?
            .ok_or_else(|| ApiError::NotFound("无此选课资料".to_string()))?;

        if enrollment.status == EnrollmentStatus::Withdrawn {
            return Err(ApiError::Conflict("已退选".to_string()));
        }

        self.build_dto(&enrollment)
    }

    /// 分页查询选课列表（仅非退选记录）
    ///
    /// # 参数
    /// - page: 页码（1 起始）
    /// - page_size: 每页记录数
    pub fn list_enrollments(&self, page: i64, page_size: i64) -> EnrollmentResponse {
        trace!("进入 list_enrollments");
        let response = match self.try_list_enrollments(page, page_size) {
            Ok((dtos, page_count, total_count)) => {
                EnrollmentResponse::ok_paged("查询成功", dtos, page_count, total_count)
            }
            Err(err) => self.fail_response(&err, "查询发生错误"),
        };
        trace!("离开 list_enrollments");
        response
    }

    fn try_list_enrollments(
        &self,
        page: i64,
        page_size: i64,
    ) -> ApiResult<(Vec<EnrollmentDto>, i64, i64)> {
        if page < 1 || page_size < 1 {
            return Err(ApiError::InvalidInput("分页参数错误".to_string()));
        }

        let total_count = self.enrollment_repo.count_active()?;
        let page_count = if total_count == 0 {
            0
        } else {
            (total_count + page_size - 1) / page_size
        };

        let offset = (page - 1) * page_size;
        let enrollments = self.enrollment_repo.list_active(page_size, offset)?;

        // 组合学生/课程摘要；引用缺失的记录跳过并告警（外键保证下不应出现）
        let mut dtos = Vec::with_capacity(enrollments.len());
        for enrollment in &enrollments {
            match self.build_dto(enrollment) {
                Ok(dto) => dtos.push(dto),
                Err(err) => {
                    warn!(
                        enrollment_id = enrollment.id,
                        error = %err,
                        "选课记录引用数据缺失，已跳过"
                    );
                }
            }
        }

        Ok((dtos, page_count, total_count))
    }

    // ==========================================
    // 成绩登记
    // ==========================================

    /// 更新成绩
    ///
    /// # 前置条件（固定优先级：完整性 → 范围 → 存在性 → 状态）
    /// 1. Id 非零且成绩非空
    /// 2. 成绩在 [0,100]
    /// 3. 选课记录存在
    /// 4. 状态非已退选、非已结课
    ///
    /// # 行为
    /// - 覆盖已有成绩时先将修订计数 +1（首次登记不计数）
    /// - 等第/绩点经 GradeCore 统一派生
    pub fn update_grade(
        &self,
        student_id: i64,
        course_id: i64,
        grade: Option<i32>,
    ) -> EnrollmentResponse {
        trace!("进入 update_grade");
        let response = match self.try_update_grade(student_id, course_id, grade) {
            Ok(dto) => {
                info!(student_id, course_id, grade, "更新成绩成功");
                EnrollmentResponse::ok("更新成绩成功", vec![dto])
            }
            Err(err) => self.fail_response(&err, "更新成绩发生错误"),
        };
        trace!("离开 update_grade");
        response
    }

    fn try_update_grade(
        &self,
        student_id: i64,
        course_id: i64,
        grade: Option<i32>,
    ) -> ApiResult<EnrollmentDto> {
        // 1. 完整性
        let score = match grade {
            Some(s) if student_id != 0 && course_id != 0 => s,
            _ => return Err(ApiError::InvalidInput("数据不完整".to_string())),
        };

        // 2. 范围
        if !(0..=100).contains(&score) {
            return Err(ApiError::InvalidInput("成绩超过范围（0~100）".to_string()));
        }

        // 3. 存在性
        let mut enrollment = self
            .enrollment_repo
            .find_by_key(student_id, course_id)?
            .ok_or_else(|| ApiError::NotFound("数据不存在".to_string()))?;

        // 4. 状态
        enrollment.status =
            StatusGate::next_status(Some(enrollment.status), EnrollmentAction::RecordGrade)?;

        // 覆盖已有成绩时计修订
        if enrollment.grade.is_some() {
            enrollment.row_version += 1;
        }
        let (letter, point) = GradeCore::evaluate(score);
        enrollment.grade = Some(score);
        enrollment.letter_grade = Some(letter);
        enrollment.grade_point = Some(point);
        enrollment.updated_at = Utc::now();

        self.enrollment_repo
            .update(&enrollment)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        self.build_dto(&enrollment)
    }

    // ==========================================
    // 退选
    // ==========================================

    /// 退选
    ///
    /// # 规则
    /// - 已有成绩的记录不可退选（与状态无关）；成绩须经独立的管理路径清除
    /// - 退选是软状态变更，记录保留
    pub fn withdraw(&self, student_id: i64, course_id: i64) -> EnrollmentResponse {
        trace!("进入 withdraw");
        let response = match self.try_withdraw(student_id, course_id) {
            Ok(()) => {
                info!(student_id, course_id, "退选成功");
                EnrollmentResponse::ok("退选成功", Vec::new())
            }
            Err(err) => self.fail_response(&err, "退选发生错误"),
        };
        trace!("离开 withdraw");
        response
    }

    fn try_withdraw(&self, student_id: i64, course_id: i64) -> ApiResult<()> {
        if student_id == 0 || course_id == 0 {
            return Err(ApiError::InvalidInput("StudentId或CourseId为空".to_string()));
        }

        let mut enrollment = self
            .enrollment_repo
            .find_by_key(student_id, course_id)?
            .ok_or_else(|| ApiError::NotFound("无此选课资料".to_string()))?;

        // 成绩门禁先于状态机：有成绩一律拒绝
        if enrollment.has_grade() {
            return Err(ApiError::Conflict("已有成绩，无法退选".to_string()));
        }

        enrollment.status =
            StatusGate::next_status(Some(enrollment.status), EnrollmentAction::Withdraw)?;
        enrollment.updated_at = Utc::now();

        self.enrollment_repo
            .update(&enrollment)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    // ==========================================
    // 结课
    // ==========================================

    /// 结课
    ///
    /// 将选课记录标记为课程已结束；此后禁止成绩修改
    pub fn complete(&self, student_id: i64, course_id: i64) -> EnrollmentResponse {
        trace!("进入 complete");
        let response = match self.try_complete(student_id, course_id) {
            Ok(()) => {
                info!(student_id, course_id, "结课成功");
                EnrollmentResponse::ok("结课成功", Vec::new())
            }
            Err(err) => self.fail_response(&err, "结课发生错误"),
        };
        trace!("离开 complete");
        response
    }

    fn try_complete(&self, student_id: i64, course_id: i64) -> ApiResult<()> {
        if student_id == 0 || course_id == 0 {
            return Err(ApiError::InvalidInput("StudentId或CourseId为空".to_string()));
        }

        let mut enrollment = self
            .enrollment_repo
            .find_by_key(student_id, course_id)?
            .ok_or_else(|| ApiError::NotFound("无此选课资料".to_string()))?;

        enrollment.status =
            StatusGate::next_status(Some(enrollment.status), EnrollmentAction::Complete)?;
        enrollment.updated_at = Utc::now();

        self.enrollment_repo
            .update(&enrollment)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    // ==========================================
    // 内部工具
    // ==========================================

    /// 错误 → 失败响应
    ///
    /// 持久化类错误对外折叠为操作级消息，细节只进日志；
    /// 业务类错误 message 原样返回
    fn fail_response(&self, err: &ApiError, persistence_message: &str) -> EnrollmentResponse {
        if err.is_persistence() {
            error!(code = err.code(), error = %err, "操作持久化失败");
            EnrollmentResponse::fail(persistence_message)
        } else {
            warn!(code = err.code(), error = %err, "业务校验未通过");
            EnrollmentResponse::fail(&err.business_message())
        }
    }

    /// 查询学生/课程摘要并组合完整视图
    fn build_dto(&self, enrollment: &Enrollment) -> ApiResult<EnrollmentDto> {
        let student = self.student_repo.find_by_id(enrollment.student_id)?;
        let course = self.course_repo.find_by_id(enrollment.course_id)?;
        match (student, course) {
            (Some(student), Some(course)) => Ok(make_dto(enrollment, &student, &course)),
            (student, course) => Err(ApiError::InternalError(format!(
                "选课记录引用数据缺失: student存在={}, course存在={}",
                student.is_some(),
                course.is_some()
            ))),
        }
    }
}

/// 由记录与主数据快照组合视图
fn make_dto(enrollment: &Enrollment, student: &Student, course: &Course) -> EnrollmentDto {
    EnrollmentDto {
        student_id: enrollment.student_id,
        student: StudentDto {
            id: student.id,
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
        },
        course_id: enrollment.course_id,
        course: CourseDto {
            id: course.id,
            code: course.code.clone(),
            title: course.title.clone(),
            credits: course.credits,
        },
        grade: enrollment.grade,
        letter_grade: enrollment.letter_grade,
        grade_point: enrollment.grade_point,
        status: enrollment.status,
    }
}
