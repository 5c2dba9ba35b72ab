use sea_orm::sea_query::LikeExpr;

/// 转义 LIKE 模式中的通配符（`\` 为转义字符）
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 构造 `%keyword%` 形式的包含匹配
pub fn contains_pattern(keyword: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(keyword.trim()))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("CS_101"), "CS\\_101");
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
        assert_eq!(escape_like_pattern("محمد"), "محمد");
    }
}
