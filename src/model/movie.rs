use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasteRating {
    pub year: u32,
    pub name: String,
    pub user_rating: Number,
    pub taste_rating: Number,
    pub description: String,
}

impl TasteRating {
    pub fn to_csvable_array(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.name.clone(),
            self.user_rating.to_string(),
            self.taste_rating.to_string(),
            self.description.clone(),
        ]
    }

    pub fn csv_titles() -> Vec<&'static str> {
        vec!["year", "name", "user_rating", "taste_rating", "description"]
    }
}
