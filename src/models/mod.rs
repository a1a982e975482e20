//! 业务数据模型
//!
//! 与 entity/ 中的数据库实体相对应，这里定义对外暴露的业务类型、
//! 请求/响应结构，以及统一的业务错误码。

pub mod common;
pub mod course_assignments;
pub mod directory;
pub mod submissions;
pub mod users;
pub mod work_items;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 业务错误码
///
/// 与 HTTP 状态码对应：40xxx -> 4xx，50xxx -> 5xx。
/// 422xx 为提交/评分相关的业务校验错误，沿用 422 Unprocessable Entity。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    Unauthorized = 40100,
    Forbidden = 40300,
    NotFound = 40400,

    // 提交相关
    MalformedSubmission = 42201,
    KindMismatch = 42202,
    ItemNotFound = 42203,
    DeadlinePassed = 42204,
    DuplicateSubmission = 42205,
    InvalidScore = 42206,
    ScoreExceedsCeiling = 42207,

    // 作业/测验/考试相关
    InvalidSchedule = 42211,
    InvalidGradingCeiling = 42212,

    // 课程排课相关
    DuplicateAssignment = 42221,

    // 目录/身份相关
    UserNotFound = 42230,
    TeacherProfileNotFound = 42231,
    StudentProfileNotFound = 42232,
    SubjectNotFound = 42233,
    SectionNotFound = 42234,

    InternalServerError = 50000,
}

impl ErrorCode {
    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> u16 {
        match *self as i32 {
            0 => 200,
            40000..=40099 => 400,
            40100..=40199 => 401,
            40300..=40399 => 403,
            40400..=40499 => 404,
            42200..=42299 => 422,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::Success.http_status(), 200);
        assert_eq!(ErrorCode::BadRequest.http_status(), 400);
        assert_eq!(ErrorCode::Forbidden.http_status(), 403);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::DuplicateSubmission.http_status(), 422);
        assert_eq!(ErrorCode::InternalServerError.http_status(), 500);
    }
}
