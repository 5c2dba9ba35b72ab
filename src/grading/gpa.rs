//! 学分加权绩点

use super::components::round2;

/// 参与 GPA 计算的一门课
#[derive(Debug, Clone, Copy)]
pub struct GpaEntry {
    pub gpa_points: f64,
    pub credit_hours: i32,
    pub passed: bool,
}

/// 学分汇总
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GpaSummary {
    pub gpa: f64,
    pub credits_attempted: i32,
    pub credits_earned: i32,
    pub quality_points: f64,
}

/// 按学分加权计算 GPA，没有学分时为 0
pub fn weighted_gpa<'a, I>(entries: I) -> GpaSummary
where
    I: IntoIterator<Item = &'a GpaEntry>,
{
    let mut summary = GpaSummary::default();

    for entry in entries {
        let credits = entry.credit_hours.max(0);
        summary.credits_attempted += credits;
        if entry.passed {
            summary.credits_earned += credits;
        }
        summary.quality_points += entry.gpa_points * credits as f64;
    }

    if summary.credits_attempted > 0 {
        summary.gpa = round2(summary.quality_points / summary.credits_attempted as f64);
    }
    summary.quality_points = round2(summary.quality_points);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        let entries: [GpaEntry; 0] = [];
        let summary = weighted_gpa(&entries);
        assert_eq!(summary, GpaSummary::default());
    }

    #[test]
    fn test_weighted_by_credits() {
        let entries = [
            GpaEntry {
                gpa_points: 4.0,
                credit_hours: 3,
                passed: true,
            },
            GpaEntry {
                gpa_points: 2.0,
                credit_hours: 1,
                passed: true,
            },
            GpaEntry {
                gpa_points: 0.0,
                credit_hours: 2,
                passed: false,
            },
        ];
        let summary = weighted_gpa(&entries);
        // (12 + 2 + 0) / 6
        assert_eq!(summary.gpa, 2.33);
        assert_eq!(summary.credits_attempted, 6);
        assert_eq!(summary.credits_earned, 4);
        assert_eq!(summary.quality_points, 14.0);
    }
}
