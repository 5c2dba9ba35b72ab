use actix_web::{HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::grading::GRADE_BANDS;
use crate::models::{ApiResponse, grades::responses::GradeScaleResponse};

/// 及格线：最低及格等级的下限
fn passing_total() -> f64 {
    GRADE_BANDS
        .iter()
        .filter(|band| band.letter.is_passing())
        .map(|band| band.min_total)
        .fold(f64::INFINITY, f64::min)
}

pub async fn grade_scale(service: &GradeService) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeScaleResponse {
            bands: GRADE_BANDS.to_vec(),
            limits: service.limits(),
            passing_total: passing_total(),
        },
        "Grade scale retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_total_is_lowest_passing_band() {
        assert_eq!(passing_total(), 60.0);
    }
}
