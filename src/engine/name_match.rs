// ==========================================
// 装卸口排班系统 - 姓名归一化
// ==========================================
// 规则: 去首尾空白 → 合并连续空白 → NFD 分解去掉组合附加符 → 小写
// 红线: 纯函数，无状态
// ==========================================

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 归一化姓名，用于大小写/重音无关比较
///
/// # 示例
/// ```
/// use dock_rotation::engine::name_match::normalize_name;
/// assert_eq!(normalize_name("  JOSÉ   Conceição "), "jose conceicao");
/// ```
pub fn normalize_name(name: &str) -> String {
    let stripped: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
