//! 成绩分项（平时、期中、期末）与总分计算

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::scale::{LetterGrade, score_total};
use crate::config::GradingConfig;

/// 成绩分项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Coursework,
    Midterm,
    FinalExam,
}

impl Component {
    pub fn field_name(&self) -> &'static str {
        match self {
            Component::Coursework => "coursework",
            Component::Midterm => "midterm",
            Component::FinalExam => "final_exam",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// 各分项满分
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ComponentLimits {
    pub coursework_max: f64,
    pub midterm_max: f64,
    pub final_max: f64,
}

impl Default for ComponentLimits {
    fn default() -> Self {
        Self {
            coursework_max: 30.0,
            midterm_max: 30.0,
            final_max: 40.0,
        }
    }
}

impl From<&GradingConfig> for ComponentLimits {
    fn from(config: &GradingConfig) -> Self {
        Self {
            coursework_max: config.coursework_max,
            midterm_max: config.midterm_max,
            final_max: config.final_max,
        }
    }
}

/// 分项越界
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRangeError {
    pub component: Component,
    pub value: f64,
    pub max: f64,
}

impl std::fmt::Display for ComponentRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} score {} is out of range (0-{})",
            self.component, self.value, self.max
        )
    }
}

impl ComponentLimits {
    pub fn max_for(&self, component: Component) -> f64 {
        match component {
            Component::Coursework => self.coursework_max,
            Component::Midterm => self.midterm_max,
            Component::FinalExam => self.final_max,
        }
    }

    /// 检查单个分项是否在 [0, max] 内
    pub fn check(&self, component: Component, value: f64) -> Result<(), ComponentRangeError> {
        let max = self.max_for(component);
        if value.is_finite() && (0.0..=max).contains(&value) {
            Ok(())
        } else {
            Err(ComponentRangeError {
                component,
                value,
                max,
            })
        }
    }

    /// 检查全部分项，返回所有越界项
    pub fn check_all(&self, scores: &ComponentScores) -> Vec<ComponentRangeError> {
        [
            (Component::Coursework, scores.coursework),
            (Component::Midterm, scores.midterm),
            (Component::FinalExam, scores.final_exam),
        ]
        .into_iter()
        .filter_map(|(component, value)| self.check(component, value).err())
        .collect()
    }
}

/// 三个分项分数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ComponentScores {
    pub coursework: f64,
    pub midterm: f64,
    pub final_exam: f64,
}

/// 由分项推导出的总分、等级和绩点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedGrade {
    pub total: f64,
    pub letter: LetterGrade,
    pub gpa_points: f64,
}

impl ComponentScores {
    pub fn total(&self) -> f64 {
        round2(self.coursework + self.midterm + self.final_exam)
    }

    pub fn compute(&self) -> ComputedGrade {
        let total = self.total();
        let outcome = score_total(total);
        ComputedGrade {
            total,
            letter: outcome.letter,
            gpa_points: outcome.points,
        }
    }
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(coursework: f64, midterm: f64, final_exam: f64) -> ComponentScores {
        ComponentScores {
            coursework,
            midterm,
            final_exam,
        }
    }

    #[test]
    fn test_compute_total_and_letter() {
        let computed = scores(25.0, 28.0, 35.0).compute();
        assert_eq!(computed.total, 88.0);
        assert_eq!(computed.letter, LetterGrade::BPlus);
        assert_eq!(computed.gpa_points, 3.5);
    }

    #[test]
    fn test_total_is_rounded() {
        let computed = scores(10.1, 20.2, 30.3).compute();
        assert_eq!(computed.total, 60.6);
        assert_eq!(computed.letter, LetterGrade::D);
    }

    #[test]
    fn test_limits_accept_bounds() {
        let limits = ComponentLimits::default();
        assert!(limits.check_all(&scores(0.0, 0.0, 0.0)).is_empty());
        assert!(limits.check_all(&scores(30.0, 30.0, 40.0)).is_empty());
    }

    #[test]
    fn test_limits_report_every_violation() {
        let limits = ComponentLimits::default();
        let errors = limits.check_all(&scores(-1.0, 31.0, f64::NAN));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].component, Component::Coursework);
        assert_eq!(errors[1].component, Component::Midterm);
        assert_eq!(errors[1].max, 30.0);
        assert_eq!(errors[2].component, Component::FinalExam);
    }

    #[test]
    fn test_range_error_message() {
        let limits = ComponentLimits::default();
        let err = limits.check(Component::Midterm, 45.0).unwrap_err();
        assert_eq!(err.to_string(), "midterm score 45 is out of range (0-30)");
    }
}
