//! 成绩派生计算
//!
//! 百分比与等级都是查询时派生值，不落库。

/// 百分比，保留两位小数
///
/// 调用方须保证 total > 0。
pub fn percentage(obtained: i32, total: i32) -> f64 {
    (obtained as f64 / total as f64 * 100.0 * 100.0).round() / 100.0
}

/// 百分比到等级的固定映射
pub fn letter_grade(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "A+"
    } else if percentage >= 80.0 {
        "A"
    } else if percentage >= 70.0 {
        "B+"
    } else if percentage >= 60.0 {
        "B"
    } else if percentage >= 50.0 {
        "C"
    } else if percentage >= 40.0 {
        "D"
    } else {
        "F"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(42, 60), 70.0);
        assert_eq!(percentage(0, 60), 0.0);
        assert_eq!(percentage(3, 3), 100.0);
        // 1/3 -> 33.333... -> 保留两位
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
    }

    #[test]
    fn test_letter_grade_thresholds() {
        assert_eq!(letter_grade(100.0), "A+");
        assert_eq!(letter_grade(90.0), "A+");
        assert_eq!(letter_grade(89.99), "A");
        assert_eq!(letter_grade(80.0), "A");
        assert_eq!(letter_grade(70.0), "B+");
        assert_eq!(letter_grade(60.0), "B");
        assert_eq!(letter_grade(50.0), "C");
        assert_eq!(letter_grade(40.0), "D");
        assert_eq!(letter_grade(39.99), "F");
        assert_eq!(letter_grade(0.0), "F");
    }
}
