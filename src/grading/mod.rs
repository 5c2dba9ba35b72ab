//! 成绩计算
//!
//! 与存储、HTTP 无关的纯逻辑：分项校验、总分与等级、
//! 学分加权 GPA，以及批量导入的逐行校验。

pub mod components;
pub mod gpa;
pub mod import;
pub mod scale;
pub mod term;

pub use components::{
    Component, ComponentLimits, ComponentRangeError, ComponentScores, ComputedGrade, round2,
};
pub use gpa::{GpaEntry, GpaSummary, weighted_gpa};
pub use import::{
    ColumnMap, GradeColumn, ImportDirectory, ImportRowError, RawGradeRow, RecordDirectory,
    ValidatedGradeRow, ValidationReport, validate_rows,
};
pub use scale::{GRADE_BANDS, GradeBand, GradeOutcome, LetterGrade, score_total};
pub use term::{Semester, validate_academic_year};
