//! 成绩批量导入校验
//!
//! 表格解析之后的纯校验逻辑：列名识别、必填项、分项范围、
//! 学生与课程存在性检查。每一行独立校验，错误按行号汇总，
//! 合法行与错误行互不影响。

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use ts_rs::TS;

use super::components::{Component, ComponentLimits, ComponentScores, ComputedGrade};
use super::term::{Semester, validate_academic_year};

/// 导入表格中的列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeColumn {
    StudentNumber,
    CourseCode,
    Coursework,
    Midterm,
    FinalExam,
    AcademicYear,
    Semester,
}

impl GradeColumn {
    pub const ALL: [GradeColumn; 7] = [
        GradeColumn::StudentNumber,
        GradeColumn::CourseCode,
        GradeColumn::Coursework,
        GradeColumn::Midterm,
        GradeColumn::FinalExam,
        GradeColumn::AcademicYear,
        GradeColumn::Semester,
    ];

    /// 模板与导出使用的阿拉伯语表头
    pub fn arabic_header(&self) -> &'static str {
        match self {
            GradeColumn::StudentNumber => "الرقم الجامعي",
            GradeColumn::CourseCode => "رمز المقرر",
            GradeColumn::Coursework => "أعمال السنة",
            GradeColumn::Midterm => "الاختبار النصفي",
            GradeColumn::FinalExam => "الاختبار النهائي",
            GradeColumn::AcademicYear => "العام الأكاديمي",
            GradeColumn::Semester => "الفصل الدراسي",
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            GradeColumn::StudentNumber => "student_number",
            GradeColumn::CourseCode => "course_code",
            GradeColumn::Coursework => "coursework",
            GradeColumn::Midterm => "midterm",
            GradeColumn::FinalExam => "final_exam",
            GradeColumn::AcademicYear => "academic_year",
            GradeColumn::Semester => "semester",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            GradeColumn::StudentNumber => &["student_number", "student_id", "الرقم الجامعي"],
            GradeColumn::CourseCode => &["course_code", "course", "رمز المقرر", "رمز المادة"],
            GradeColumn::Coursework => &["coursework", "أعمال السنة", "الأعمال"],
            GradeColumn::Midterm => &["midterm", "الاختبار النصفي", "النصفي"],
            GradeColumn::FinalExam => &["final_exam", "final", "الاختبار النهائي", "النهائي"],
            GradeColumn::AcademicYear => &["academic_year", "year", "العام الأكاديمي", "العام الدراسي"],
            GradeColumn::Semester => &["semester", "term", "الفصل الدراسي", "الفصل"],
        }
    }

    fn from_component(component: Component) -> Self {
        match component {
            Component::Coursework => GradeColumn::Coursework,
            Component::Midterm => GradeColumn::Midterm,
            Component::FinalExam => GradeColumn::FinalExam,
        }
    }
}

/// 表头规范化：去掉 BOM 与首尾空白，统一小写
fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// 列名到列下标的映射
#[derive(Debug, Clone)]
pub struct ColumnMap {
    indices: HashMap<GradeColumn, usize>,
}

impl ColumnMap {
    /// 识别表头，缺少必需列时返回该列的阿拉伯语名称
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, String> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();

        let mut indices = HashMap::new();
        for column in GradeColumn::ALL {
            let index = normalized
                .iter()
                .position(|h| column.aliases().iter().any(|alias| alias == h))
                .ok_or_else(|| column.arabic_header().to_string())?;
            indices.insert(column, index);
        }

        Ok(Self { indices })
    }

    pub fn index(&self, column: GradeColumn) -> usize {
        self.indices[&column]
    }

    /// 从一行单元格中取出原始行数据
    pub fn extract<S: AsRef<str>>(&self, row_num: usize, cells: &[S]) -> RawGradeRow {
        let cell = |column: GradeColumn| -> String {
            cells
                .get(self.index(column))
                .map(|c| c.as_ref().trim().to_string())
                .unwrap_or_default()
        };

        RawGradeRow {
            row: row_num,
            student_number: cell(GradeColumn::StudentNumber),
            course_code: cell(GradeColumn::CourseCode),
            coursework: cell(GradeColumn::Coursework),
            midterm: cell(GradeColumn::Midterm),
            final_exam: cell(GradeColumn::FinalExam),
            academic_year: cell(GradeColumn::AcademicYear),
            semester: cell(GradeColumn::Semester),
        }
    }
}

/// 未经校验的表格行（行号从 1 开始，表头为第 1 行）
#[derive(Debug, Clone, Default)]
pub struct RawGradeRow {
    pub row: usize,
    pub student_number: String,
    pub course_code: String,
    pub coursework: String,
    pub midterm: String,
    pub final_exam: String,
    pub academic_year: String,
    pub semester: String,
}

impl RawGradeRow {
    /// 整行为空（表格尾部的空行）
    pub fn is_blank(&self) -> bool {
        [
            &self.student_number,
            &self.course_code,
            &self.coursework,
            &self.midterm,
            &self.final_exam,
            &self.academic_year,
            &self.semester,
        ]
        .iter()
        .all(|v| v.is_empty())
    }
}

/// 行级错误
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ImportRowError {
    pub row: usize,
    pub field: String,
    pub message: String,
}

impl ImportRowError {
    pub fn new(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 学生学号、课程代码到数据库 ID 的查找
pub trait RecordDirectory {
    fn student_id(&self, student_number: &str) -> Option<i64>;
    fn course_id(&self, course_code: &str) -> Option<i64>;
}

/// 基于预加载映射的查找表
#[derive(Debug, Clone, Default)]
pub struct ImportDirectory {
    pub students: HashMap<String, i64>,
    pub courses: HashMap<String, i64>,
}

impl RecordDirectory for ImportDirectory {
    fn student_id(&self, student_number: &str) -> Option<i64> {
        self.students.get(student_number).copied()
    }

    fn course_id(&self, course_code: &str) -> Option<i64> {
        self.courses
            .get(course_code)
            .or_else(|| self.courses.get(&course_code.to_uppercase()))
            .copied()
    }
}

/// 校验通过的行
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedGradeRow {
    pub row: usize,
    pub student_id: i64,
    pub course_id: i64,
    pub scores: ComponentScores,
    pub computed: ComputedGrade,
    pub academic_year: String,
    pub semester: Semester,
}

/// 校验结果：合法记录与错误列表并存
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub records: Vec<ValidatedGradeRow>,
    pub errors: Vec<ImportRowError>,
}

impl ValidationReport {
    /// 出错的行数（同一行多个错误只计一次）
    pub fn rejected_rows(&self) -> usize {
        self.errors
            .iter()
            .map(|e| e.row)
            .collect::<HashSet<_>>()
            .len()
    }
}

/// 解析分数，兼容阿拉伯-印度数字与阿拉伯小数点
pub fn parse_score(raw: &str) -> Option<f64> {
    let normalized: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => {
                char::from_digit(c as u32 - 0x0660, 10).unwrap_or(c)
            }
            '\u{06F0}'..='\u{06F9}' => {
                char::from_digit(c as u32 - 0x06F0, 10).unwrap_or(c)
            }
            '\u{066B}' | ',' => '.',
            _ => c,
        })
        .collect();

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 校验全部行。
///
/// 每行的错误都会被收集；同一文件中重复出现的
/// （学生, 课程, 学年, 学期）组合只保留第一次出现。
pub fn validate_rows<D: RecordDirectory>(
    rows: &[RawGradeRow],
    limits: &ComponentLimits,
    directory: &D,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen: HashSet<(i64, i64, String, Semester)> = HashSet::new();

    for raw in rows.iter().filter(|r| !r.is_blank()) {
        match validate_row(raw, limits, directory) {
            Ok(record) => {
                let key = (
                    record.student_id,
                    record.course_id,
                    record.academic_year.clone(),
                    record.semester,
                );
                if seen.insert(key) {
                    report.records.push(record);
                } else {
                    report.errors.push(ImportRowError::new(
                        raw.row,
                        GradeColumn::StudentNumber.field_name(),
                        format!(
                            "Duplicate grade for student {} in course {} within this file",
                            raw.student_number, raw.course_code
                        ),
                    ));
                }
            }
            Err(mut errors) => report.errors.append(&mut errors),
        }
    }

    report
}

/// 校验单行
pub fn validate_row<D: RecordDirectory>(
    raw: &RawGradeRow,
    limits: &ComponentLimits,
    directory: &D,
) -> Result<ValidatedGradeRow, Vec<ImportRowError>> {
    let row = raw.row;
    let mut errors = Vec::new();

    // 学生
    let student_id = if raw.student_number.is_empty() {
        errors.push(ImportRowError::new(
            row,
            GradeColumn::StudentNumber.field_name(),
            "Student number is required",
        ));
        None
    } else {
        let id = directory.student_id(&raw.student_number);
        if id.is_none() {
            errors.push(ImportRowError::new(
                row,
                GradeColumn::StudentNumber.field_name(),
                format!("Student '{}' does not exist", raw.student_number),
            ));
        }
        id
    };

    // 课程
    let course_id = if raw.course_code.is_empty() {
        errors.push(ImportRowError::new(
            row,
            GradeColumn::CourseCode.field_name(),
            "Course code is required",
        ));
        None
    } else {
        let id = directory.course_id(&raw.course_code);
        if id.is_none() {
            errors.push(ImportRowError::new(
                row,
                GradeColumn::CourseCode.field_name(),
                format!("Course '{}' does not exist", raw.course_code),
            ));
        }
        id
    };

    // 分项分数
    let mut component_value = |component: Component, value: &str| -> Option<f64> {
        let column = GradeColumn::from_component(component);
        if value.is_empty() {
            errors.push(ImportRowError::new(
                row,
                column.field_name(),
                format!("{} is required", column.arabic_header()),
            ));
            return None;
        }
        let Some(score) = parse_score(value) else {
            errors.push(ImportRowError::new(
                row,
                column.field_name(),
                format!("'{value}' is not a number"),
            ));
            return None;
        };
        if let Err(e) = limits.check(component, score) {
            errors.push(ImportRowError::new(row, column.field_name(), e.to_string()));
            return None;
        }
        Some(score)
    };

    let coursework = component_value(Component::Coursework, &raw.coursework);
    let midterm = component_value(Component::Midterm, &raw.midterm);
    let final_exam = component_value(Component::FinalExam, &raw.final_exam);

    // 学年与学期
    if raw.academic_year.is_empty() {
        errors.push(ImportRowError::new(
            row,
            GradeColumn::AcademicYear.field_name(),
            "Academic year is required",
        ));
    } else if let Err(msg) = validate_academic_year(&raw.academic_year) {
        errors.push(ImportRowError::new(
            row,
            GradeColumn::AcademicYear.field_name(),
            msg,
        ));
    }

    let semester = if raw.semester.is_empty() {
        errors.push(ImportRowError::new(
            row,
            GradeColumn::Semester.field_name(),
            "Semester is required",
        ));
        None
    } else {
        match raw.semester.parse::<Semester>() {
            Ok(s) => Some(s),
            Err(msg) => {
                errors.push(ImportRowError::new(
                    row,
                    GradeColumn::Semester.field_name(),
                    msg,
                ));
                None
            }
        }
    };

    match (student_id, course_id, coursework, midterm, final_exam, semester) {
        (
            Some(student_id),
            Some(course_id),
            Some(coursework),
            Some(midterm),
            Some(final_exam),
            Some(semester),
        ) if errors.is_empty() => {
            let scores = ComponentScores {
                coursework,
                midterm,
                final_exam,
            };
            Ok(ValidatedGradeRow {
                row,
                student_id,
                course_id,
                computed: scores.compute(),
                scores,
                academic_year: raw.academic_year.trim().to_string(),
                semester,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::LetterGrade;

    fn directory() -> ImportDirectory {
        ImportDirectory {
            students: HashMap::from([
                ("S1001".to_string(), 1),
                ("S1002".to_string(), 2),
                ("S1003".to_string(), 3),
            ]),
            courses: HashMap::from([("CS101".to_string(), 10), ("MATH201".to_string(), 20)]),
        }
    }

    fn row(num: usize, student: &str, course: &str, cw: &str, mid: &str, fin: &str) -> RawGradeRow {
        RawGradeRow {
            row: num,
            student_number: student.to_string(),
            course_code: course.to_string(),
            coursework: cw.to_string(),
            midterm: mid.to_string(),
            final_exam: fin.to_string(),
            academic_year: "2024-2025".to_string(),
            semester: "first".to_string(),
        }
    }

    #[test]
    fn test_accepts_valid_row_and_computes_total() {
        let rows = [row(2, "S1001", "CS101", "25", "28", "35")];
        let report = validate_rows(&rows, &ComponentLimits::default(), &directory());

        assert!(report.errors.is_empty());
        assert_eq!(report.records.len(), 1);
        let record = &report.records[0];
        assert_eq!(record.computed.total, 88.0);
        assert_eq!(record.computed.letter, LetterGrade::BPlus);
        assert_eq!(record.student_id, 1);
        assert_eq!(record.course_id, 10);
        assert_eq!(record.semester, Semester::First);
    }

    #[test]
    fn test_rejects_missing_identifiers_with_row_number() {
        let rows = [
            row(2, "", "CS101", "20", "20", "30"),
            row(3, "S1002", "", "20", "20", "30"),
        ];
        let report = validate_rows(&rows, &ComponentLimits::default(), &directory());

        assert!(report.records.is_empty());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].row, 2);
        assert_eq!(report.errors[0].field, "student_number");
        assert_eq!(report.errors[1].row, 3);
        assert_eq!(report.errors[1].field, "course_code");
    }

    #[test]
    fn test_partial_failure_keeps_other_rows() {
        let rows = [
            row(2, "S1001", "CS101", "25", "28", "35"),
            row(3, "S1002", "CS101", "20", "45", "30"),
            row(4, "S1003", "MATH201", "30", "30", "40"),
        ];
        let report = validate_rows(&rows, &ComponentLimits::default(), &directory());

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row, 3);
        assert_eq!(report.errors[0].field, "midterm");
        assert_eq!(report.records[0].row, 2);
        assert_eq!(report.records[1].row, 4);
        assert_eq!(report.records[1].computed.total, 100.0);
    }

    #[test]
    fn test_unknown_records_are_reported() {
        let rows = [row(2, "S9999", "BIO100", "10", "10", "10")];
        let report = validate_rows(&rows, &ComponentLimits::default(), &directory());
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].message.contains("S9999"));
        assert!(report.errors[1].message.contains("BIO100"));
        assert_eq!(report.rejected_rows(), 1);
    }

    #[test]
    fn test_non_numeric_and_blank_scores() {
        let rows = [row(2, "S1001", "CS101", "abc", "", "35")];
        let report = validate_rows(&rows, &ComponentLimits::default(), &directory());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].field, "coursework");
        assert_eq!(report.errors[1].field, "midterm");
    }

    #[test]
    fn test_bad_term_fields() {
        let mut bad = row(2, "S1001", "CS101", "20", "20", "30");
        bad.academic_year = "2024".to_string();
        bad.semester = "winter".to_string();
        let report = validate_rows(&[bad], &ComponentLimits::default(), &directory());
        let fields: Vec<_> = report.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["academic_year", "semester"]);
    }

    #[test]
    fn test_duplicate_rows_in_file() {
        let rows = [
            row(2, "S1001", "CS101", "20", "20", "30"),
            row(3, "S1001", "CS101", "25", "20", "30"),
        ];
        let report = validate_rows(&rows, &ComponentLimits::default(), &directory());
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row, 3);
    }

    #[test]
    fn test_blank_rows_are_ignored() {
        let rows = [
            row(2, "S1001", "CS101", "20", "20", "30"),
            RawGradeRow {
                row: 3,
                ..Default::default()
            },
        ];
        let report = validate_rows(&rows, &ComponentLimits::default(), &directory());
        assert_eq!(report.records.len(), 1);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_parse_score_variants() {
        assert_eq!(parse_score(" 25 "), Some(25.0));
        assert_eq!(parse_score("٢٥"), Some(25.0));
        assert_eq!(parse_score("١٢٫٥"), Some(12.5));
        assert_eq!(parse_score("12,5"), Some(12.5));
        assert_eq!(parse_score("NaN"), None);
        assert_eq!(parse_score("x"), None);
    }

    #[test]
    fn test_resolve_arabic_and_english_headers() {
        let arabic = [
            "\u{feff}الرقم الجامعي",
            "رمز المقرر",
            "أعمال السنة",
            "الاختبار النصفي",
            "الاختبار النهائي",
            "العام الأكاديمي",
            "الفصل الدراسي",
        ];
        let map = ColumnMap::resolve(&arabic).unwrap();
        assert_eq!(map.index(GradeColumn::StudentNumber), 0);
        assert_eq!(map.index(GradeColumn::Semester), 6);

        let english = [
            "Semester",
            "Academic_Year",
            "Final",
            "Midterm",
            "Coursework",
            "Course_Code",
            "Student_Number",
        ];
        let map = ColumnMap::resolve(&english).unwrap();
        assert_eq!(map.index(GradeColumn::StudentNumber), 6);
        assert_eq!(map.index(GradeColumn::FinalExam), 2);

        let raw = map.extract(5, &["first", "2024-2025", "35", "28", "25", "CS101", "S1001"]);
        assert_eq!(raw.row, 5);
        assert_eq!(raw.student_number, "S1001");
        assert_eq!(raw.coursework, "25");
    }

    #[test]
    fn test_resolve_reports_missing_column() {
        let headers = ["student_number", "course_code", "coursework"];
        let missing = ColumnMap::resolve(&headers).unwrap_err();
        assert_eq!(missing, "الاختبار النصفي");
    }
}
