use serde::{Deserialize, Serialize};

/// One entry in the analysis history list from `GET /openai/analyses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: String,
    pub title: String,
}

/// A single recognized food item within an analysis result.
///
/// Weight and calories are strings as the server sends them
/// (e.g. "150g", "220 kcal").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub weight: String,
    pub calories: String,
}

/// The structured result of a food image analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub title: String,
    #[serde(default)]
    pub items: Vec<FoodItem>,
    #[serde(rename = "totalCalories")]
    pub total_calories: String,
}

/// A stored analysis from `GET /openai/analyses/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisDetail {
    pub id: String,
    pub title: String,
    pub result: AnalysisResult,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analysis_detail() {
        let json = r#"{
            "id": "a1",
            "title": "Grilled chicken plate",
            "result": {
                "title": "Grilled chicken plate",
                "items": [
                    {"name": "Chicken breast", "weight": "150g", "calories": "248 kcal"},
                    {"name": "Rice", "weight": "200g", "calories": "260 kcal"}
                ],
                "totalCalories": "508 kcal"
            },
            "createdAt": "2024-05-01T12:30:00Z",
            "imageUrl": null
        }"#;

        let detail: AnalysisDetail = serde_json::from_str(json).expect("Failed to parse detail JSON");
        assert_eq!(detail.id, "a1");
        assert_eq!(detail.result.items.len(), 2);
        assert_eq!(detail.result.items[1].name, "Rice");
        assert_eq!(detail.result.total_calories, "508 kcal");
        assert!(detail.image_url.is_none());
    }

    #[test]
    fn test_parse_result_without_items() {
        // items may be absent from the wire form
        let json = r#"{"title":"Empty plate","totalCalories":"0 kcal"}"#;
        let result: AnalysisResult = serde_json::from_str(json).expect("Failed to parse result");
        assert!(result.items.is_empty());
    }
}
