use crate::domain::recommendation::{RecommendationRequest, RecommendationResult, Restaurant};

const TABELOG_URL: &str = "https://tabelog.com/";
const GURUNAVI_URL: &str = "https://gurunavi.com/";

/// Static recommendations served when the model cannot be reached. Deterministic in the request.
pub fn fallback_recommendations(request: &RecommendationRequest) -> RecommendationResult {
    let RecommendationRequest {
        latitude,
        longitude,
        date,
    } = request;

    RecommendationResult {
        lunch_restaurants: vec![
            Restaurant {
                link: TABELOG_URL.to_string(),
                reason: format!(
                    "緯度{latitude}、経度{longitude}付近で営業中のランチスポットです。アクセスが良く、手頃な価格でお食事を楽しめます。"
                ),
            },
            Restaurant {
                link: GURUNAVI_URL.to_string(),
                reason: "地域の人気ランチスポットです。新鮮な食材を使った健康的なメニューが特徴です。"
                    .to_string(),
            },
        ],
        dinner_restaurants: vec![
            Restaurant {
                link: TABELOG_URL.to_string(),
                reason: format!(
                    "{date}の夜にふさわしい雰囲気の良いレストランです。特別な日のお食事に最適です。"
                ),
            },
            Restaurant {
                link: GURUNAVI_URL.to_string(),
                reason: "地元の食材を活かした創作料理が楽しめる人気のディナースポットです。"
                    .to_string(),
            },
        ],
    }
}
