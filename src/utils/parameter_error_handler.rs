use actix_web::{HttpRequest, HttpResponse, error::Error as ActixError};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析错误处理
///
/// 默认的 actix 错误是纯文本，这里统一包装成 ApiResponse。
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> ActixError {
    let message = format!("请求体解析失败: {err}");
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

/// 查询参数解析错误处理
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &HttpRequest,
) -> ActixError {
    let message = format!("查询参数解析失败: {err}");
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}
