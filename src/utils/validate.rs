use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("Invalid slug regex"));

static STUDENT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{3,20}$").expect("Invalid student number regex"));

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,20}$").expect("Invalid code regex"));

static ELEMENT_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_.-]{1,64}$").expect("Invalid element key regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must be 3-32 characters of letters, digits, dots, underscores or hyphens",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 页面 slug：小写字母、数字、连字符，不以连字符开头或结尾
pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    if slug.len() > 100 || !SLUG_RE.is_match(slug) || slug.starts_with('-') || slug.ends_with('-')
    {
        return Err("Slug must contain only lowercase letters, digits and hyphens");
    }
    Ok(())
}

pub fn validate_student_number(number: &str) -> Result<(), &'static str> {
    if !STUDENT_NUMBER_RE.is_match(number) {
        return Err("Student number must be 3-20 letters, digits or hyphens");
    }
    Ok(())
}

/// 院系与课程代码
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if !CODE_RE.is_match(code) {
        return Err("Code must be 2-20 letters, digits, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_element_key(key: &str) -> Result<(), &'static str> {
    if !ELEMENT_KEY_RE.is_match(key) {
        return Err("Element key must be 1-64 lowercase letters, digits, dots, underscores or hyphens");
    }
    Ok(())
}

/// 必填文本字段（去除首尾空白后非空）
pub fn validate_required(value: &str, field: &'static str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

/// 密码策略：至少 8 位，包含大写、小写字母和数字，且不在常见弱密码表中
pub fn validate_password(password: &str) -> Result<(), String> {
    const WEAK: [&str; 6] = [
        "password1",
        "qwerty123",
        "admin1234",
        "abcd1234",
        "welcome1",
        "university1",
    ];

    let mut errors = Vec::new();
    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if WEAK.iter().any(|weak| password.eq_ignore_ascii_case(weak)) {
        errors.push("Password is too common, please choose a stronger password");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username() {
        assert!(validate_username("registrar.office").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("with space").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("dean@uni.edu.sa").is_ok());
        assert!(validate_email("dean@uni").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_slug() {
        assert!(validate_slug("admissions-2025").is_ok());
        assert!(validate_slug("About").is_err());
        assert!(validate_slug("news_events").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_student_number() {
        assert!(validate_student_number("441-10023").is_ok());
        assert!(validate_student_number("S1").is_err());
        assert!(validate_student_number("4411002300000000000000").is_err());
        assert!(validate_student_number("441 100").is_err());
    }

    #[test]
    fn test_code_and_element_key() {
        assert!(validate_code("CS101").is_ok());
        assert!(validate_code("C").is_err());
        assert!(validate_element_key("hero.title").is_ok());
        assert!(validate_element_key("Hero Title").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Registrar2024").is_ok());

        let err = validate_password("Ab1").unwrap_err();
        assert!(err.contains("at least 8 characters"));

        let err = validate_password("abcdefgh1").unwrap_err();
        assert!(err.contains("uppercase"));

        assert!(validate_password("Password1").is_err());
    }
}
