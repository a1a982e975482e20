//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_edusystem_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EduSystemError {
            $($variant(String),)*
        }

        impl EduSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_edusystem_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    StoragePluginNotFound("E009", "Storage Plugin Not Found"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Conflict("E013", "Conflict Error"),
}

impl EduSystemError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否由存储层唯一约束冲突引起
    ///
    /// SQLite / PostgreSQL / MySQL 的驱动错误文案各不相同，这里统一按关键字匹配。
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }
}

impl fmt::Display for EduSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduSystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EduSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        EduSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EduSystemError {
    fn from(err: std::io::Error) -> Self {
        EduSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EduSystemError {
    fn from(err: serde_json::Error) -> Self {
        EduSystemError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduSystemError {
    fn from(err: chrono::ParseError) -> Self {
        EduSystemError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduSystemError::cache_connection("test").code(), "E001");
        assert_eq!(EduSystemError::database_config("test").code(), "E003");
        assert_eq!(EduSystemError::validation("test").code(), "E006");
        assert_eq!(EduSystemError::conflict("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EduSystemError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            EduSystemError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = EduSystemError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = EduSystemError::database_operation(
            "创建提交失败: UNIQUE constraint failed: submissions.student_id, submissions.work_item_id",
        );
        assert!(sqlite.is_unique_violation());

        let postgres = EduSystemError::database_operation(
            "duplicate key value violates unique constraint \"idx_submissions_student_item\"",
        );
        assert!(postgres.is_unique_violation());

        let other = EduSystemError::database_operation("connection reset by peer");
        assert!(!other.is_unique_violation());
    }
}
