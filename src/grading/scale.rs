//! 等级与绩点对照表

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 字母等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum LetterGrade {
    #[ts(rename = "A+")]
    APlus,
    A,
    #[ts(rename = "B+")]
    BPlus,
    B,
    #[ts(rename = "C+")]
    CPlus,
    C,
    #[ts(rename = "D+")]
    DPlus,
    D,
    F,
}

impl LetterGrade {
    /// 从高到低的全部等级
    pub const ALL: [LetterGrade; 9] = [
        LetterGrade::APlus,
        LetterGrade::A,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::DPlus,
        LetterGrade::D,
        LetterGrade::F,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    /// 该等级对应的绩点
    pub fn points(&self) -> f64 {
        GRADE_BANDS
            .iter()
            .find(|band| band.letter == *self)
            .map(|band| band.points)
            .unwrap_or(0.0)
    }

    pub fn is_passing(&self) -> bool {
        *self != LetterGrade::F
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LetterGrade::ALL
            .iter()
            .find(|letter| letter.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Invalid letter grade: {s}"))
    }
}

impl Serialize for LetterGrade {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LetterGrade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// 分数段：总分不低于 `min_total` 即落入该段
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeBand {
    pub letter: LetterGrade,
    pub min_total: f64,
    pub points: f64,
}

/// 按 `min_total` 降序排列
#[rustfmt::skip]
pub const GRADE_BANDS: [GradeBand; 9] = [
    GradeBand { letter: LetterGrade::APlus, min_total: 95.0, points: 4.0 },
    GradeBand { letter: LetterGrade::A, min_total: 90.0, points: 3.75 },
    GradeBand { letter: LetterGrade::BPlus, min_total: 85.0, points: 3.5 },
    GradeBand { letter: LetterGrade::B, min_total: 80.0, points: 3.0 },
    GradeBand { letter: LetterGrade::CPlus, min_total: 75.0, points: 2.5 },
    GradeBand { letter: LetterGrade::C, min_total: 70.0, points: 2.0 },
    GradeBand { letter: LetterGrade::DPlus, min_total: 65.0, points: 1.5 },
    GradeBand { letter: LetterGrade::D, min_total: 60.0, points: 1.0 },
    GradeBand { letter: LetterGrade::F, min_total: 0.0, points: 0.0 },
];

/// 评分结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeOutcome {
    pub letter: LetterGrade,
    pub points: f64,
}

impl GradeOutcome {
    const FAIL: GradeOutcome = GradeOutcome {
        letter: LetterGrade::F,
        points: 0.0,
    };
}

/// 将 0–100 的总分映射为等级和绩点。
///
/// 非有限值、负数或超过 100 的总分一律按 F / 0.0 处理。
pub fn score_total(total: f64) -> GradeOutcome {
    if !total.is_finite() || !(0.0..=100.0).contains(&total) {
        return GradeOutcome::FAIL;
    }

    GRADE_BANDS
        .iter()
        .find(|band| total >= band.min_total)
        .map(|band| GradeOutcome {
            letter: band.letter,
            points: band.points,
        })
        .unwrap_or(GradeOutcome::FAIL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_band() {
        for total in [95.0, 97.5, 99.99, 100.0] {
            let outcome = score_total(total);
            assert_eq!(outcome.letter, LetterGrade::APlus, "total {total}");
            assert_eq!(outcome.points, 4.0);
        }
    }

    #[test]
    fn test_failing_band() {
        for total in [0.0, 30.0, 59.0, 59.99] {
            let outcome = score_total(total);
            assert_eq!(outcome.letter, LetterGrade::F, "total {total}");
            assert_eq!(outcome.points, 0.0);
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(score_total(90.0).letter, LetterGrade::A);
        assert_eq!(score_total(89.99).letter, LetterGrade::BPlus);
        assert_eq!(score_total(88.0).letter, LetterGrade::BPlus);
        assert_eq!(score_total(80.0).letter, LetterGrade::B);
        assert_eq!(score_total(75.0).letter, LetterGrade::CPlus);
        assert_eq!(score_total(70.0).letter, LetterGrade::C);
        assert_eq!(score_total(65.0).letter, LetterGrade::DPlus);
        assert_eq!(score_total(60.0).letter, LetterGrade::D);
    }

    #[test]
    fn test_invalid_totals_fail() {
        for total in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0, 100.5] {
            assert_eq!(score_total(total), GradeOutcome::FAIL);
        }
    }

    #[test]
    fn test_points_are_monotonic() {
        let mut previous = 0.0;
        let mut total = 0.0;
        while total <= 100.0 {
            let points = score_total(total).points;
            assert!(points >= previous, "points dropped at total {total}");
            previous = points;
            total += 0.25;
        }
    }

    #[test]
    fn test_bands_are_descending() {
        for pair in GRADE_BANDS.windows(2) {
            assert!(pair[0].min_total > pair[1].min_total);
            assert!(pair[0].points > pair[1].points);
        }
    }

    #[test]
    fn test_letter_round_trip_through_str() {
        for letter in LetterGrade::ALL {
            assert_eq!(letter.as_str().parse::<LetterGrade>(), Ok(letter));
        }
        assert!("E".parse::<LetterGrade>().is_err());
        assert_eq!(LetterGrade::BPlus.points(), 3.5);
        assert!(!LetterGrade::F.is_passing());
    }
}
