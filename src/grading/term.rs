//! 学年与学期

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("Invalid academic year regex"));

/// 学期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum Semester {
    First,
    Second,
    Summer,
}

impl Semester {
    pub const FIRST: &'static str = "first";
    pub const SECOND: &'static str = "second";
    pub const SUMMER: &'static str = "summer";

    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::First => Self::FIRST,
            Semester::Second => Self::SECOND,
            Semester::Summer => Self::SUMMER,
        }
    }

    /// 阿拉伯语名称（导出表格使用）
    pub fn arabic_name(&self) -> &'static str {
        match self {
            Semester::First => "الأول",
            Semester::Second => "الثاني",
            Semester::Summer => "الصيفي",
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let normalized = value.trim_start_matches("الفصل").trim();
        match normalized.to_lowercase().as_str() {
            "first" | "1" | "fall" | "الأول" | "الاول" => Ok(Semester::First),
            "second" | "2" | "spring" | "الثاني" => Ok(Semester::Second),
            "summer" | "3" | "الصيفي" => Ok(Semester::Summer),
            _ => Err(format!(
                "Invalid semester: '{value}'. Supported: first, second, summer"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// 校验学年格式 `YYYY-YYYY`，且后一年必须为前一年加一
pub fn validate_academic_year(value: &str) -> Result<(), String> {
    let caps = ACADEMIC_YEAR_RE
        .captures(value.trim())
        .ok_or_else(|| format!("Academic year '{value}' must look like 2024-2025"))?;

    let start: i32 = caps[1].parse().map_err(|_| "Invalid start year".to_string())?;
    let end: i32 = caps[2].parse().map_err(|_| "Invalid end year".to_string())?;

    if end != start + 1 {
        return Err(format!(
            "Academic year '{value}' must span two consecutive years"
        ));
    }
    if !(1950..=2100).contains(&start) {
        return Err(format!("Academic year '{value}' is out of range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_parsing() {
        assert_eq!("first".parse::<Semester>(), Ok(Semester::First));
        assert_eq!(" Second ".parse::<Semester>(), Ok(Semester::Second));
        assert_eq!("الأول".parse::<Semester>(), Ok(Semester::First));
        assert_eq!("الفصل الثاني".parse::<Semester>(), Ok(Semester::Second));
        assert_eq!("الصيفي".parse::<Semester>(), Ok(Semester::Summer));
        assert_eq!("2".parse::<Semester>(), Ok(Semester::Second));
        assert!("winter".parse::<Semester>().is_err());
    }

    #[test]
    fn test_semester_serde() {
        let json = serde_json::to_string(&Semester::Summer).unwrap();
        assert_eq!(json, "\"summer\"");
        let parsed: Semester = serde_json::from_str("\"الأول\"").unwrap();
        assert_eq!(parsed, Semester::First);
    }

    #[test]
    fn test_academic_year() {
        assert!(validate_academic_year("2024-2025").is_ok());
        assert!(validate_academic_year("2024-2026").is_err());
        assert!(validate_academic_year("2024/2025").is_err());
        assert!(validate_academic_year("24-25").is_err());
        assert!(validate_academic_year("1800-1801").is_err());
    }
}
