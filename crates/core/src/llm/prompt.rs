use crate::domain::recommendation::RecommendationRequest;
use crate::time::weekday::DayContext;

fn output_schema() -> String {
    [
        "{",
        "  \"lunch_restaurants\": [",
        "    {",
        "      \"link\": \"Official website or Tabelog URL of the restaurant\",",
        "      \"reason\": \"おすすめの理由を日本語で（アクセス、料理の特徴、価格帯、雰囲気など）\"",
        "    },",
        "    {",
        "      \"link\": \"Official website or Tabelog URL of the restaurant\",",
        "      \"reason\": \"おすすめの理由を日本語で\"",
        "    }",
        "  ],",
        "  \"dinner_restaurants\": [",
        "    {",
        "      \"link\": \"Official website or Tabelog URL of the restaurant\",",
        "      \"reason\": \"おすすめの理由を日本語で（アクセス、料理の特徴、価格帯、雰囲気など）\"",
        "    },",
        "    {",
        "      \"link\": \"Official website or Tabelog URL of the restaurant\",",
        "      \"reason\": \"おすすめの理由を日本語で\"",
        "    }",
        "  ]",
        "}",
    ]
    .join("\n")
}

/// Coordinates and date are rendered as the caller sent them. A date that no longer parses
/// renders as `Unknown`, not a weekend.
pub fn build_prompt(request: &RecommendationRequest) -> String {
    let RecommendationRequest {
        latitude,
        longitude,
        date,
    } = request;
    let day = DayContext::parse(date);
    let weekend = if day.is_weekend { "Yes" } else { "No" };
    let schema = output_schema();

    format!(
        "You are an expert on restaurants in Japan. Recommend places for lunch and dinner that fit the conditions below.\n\n\
Conditions:\n\
- Latitude: {latitude}\n\
- Longitude: {longitude}\n\
- Date: {date} ({weekday})\n\
- Weekend: {weekend}\n\n\
Answer with JSON in exactly this shape, writing every reason in Japanese:\n\n\
{schema}\n\n\
When choosing restaurants:\n\
1. Prefer places within walking distance of the location or with good transit access\n\
2. Make sure they are open on the given date and day of the week\n\
3. Lunch should be casual and reasonably priced; dinner can be more special\n\
4. Only link to restaurants that actually exist\n\
5. Give a concrete, useful reason for each restaurant in Japanese\n",
        weekday = day.weekday,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn request(date: &str) -> RecommendationRequest {
        RecommendationRequest {
            latitude: Number::from_f64(35.6812).unwrap(),
            longitude: Number::from_f64(139.7671).unwrap(),
            date: date.to_string(),
        }
    }

    #[test]
    fn embeds_coordinates_date_and_weekday() {
        let prompt = build_prompt(&request("2024-06-15"));
        assert!(prompt.contains("- Latitude: 35.6812\n"));
        assert!(prompt.contains("- Longitude: 139.7671\n"));
        assert!(prompt.contains("- Date: 2024-06-15 (Saturday)\n"));
        assert!(prompt.contains("- Weekend: Yes\n"));
    }

    #[test]
    fn weekday_is_not_weekend() {
        let prompt = build_prompt(&request("2024-06-17"));
        assert!(prompt.contains("(Monday)"));
        assert!(prompt.contains("- Weekend: No\n"));
    }

    #[test]
    fn renders_date_and_coordinates_as_sent() {
        let prompt = build_prompt(&RecommendationRequest {
            latitude: Number::from_f64(35.0).unwrap(),
            longitude: Number::from(139),
            date: "2024-6-16".to_string(),
        });
        assert!(prompt.contains("- Latitude: 35.0\n"));
        assert!(prompt.contains("- Longitude: 139\n"));
        assert!(prompt.contains("- Date: 2024-6-16 (Sunday)\n"));
        assert!(prompt.contains("- Weekend: Yes\n"));
    }

    #[test]
    fn includes_output_shape() {
        let prompt = build_prompt(&request("2024-06-17"));
        assert!(prompt.contains("\"lunch_restaurants\": ["));
        assert!(prompt.contains("\"dinner_restaurants\": ["));
        assert_eq!(prompt.matches("\"link\"").count(), 4);
        assert_eq!(prompt.matches("\"reason\"").count(), 4);
    }

    #[test]
    fn unparseable_date_renders_unknown_weekday() {
        let prompt = build_prompt(&request("bogus"));
        assert!(prompt.contains("- Date: bogus (Unknown)\n"));
        assert!(prompt.contains("- Weekend: No\n"));
    }
}
