//! One extracted listing entry

use serde::{Deserialize, Serialize};

use crate::extractors::Field;

/// A listing record. Fields that could not be extracted are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(rename = "stars")]
    pub rating_label: String,
    pub date: String,
    #[serde(rename = "reviewText")]
    pub snippet: String,
    pub url: String,
    #[serde(rename = "usefulness")]
    pub secondary_metric: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl Record {
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Rating => &mut self.rating_label,
            Field::Date => &mut self.date,
            Field::Snippet => &mut self.snippet,
            Field::Url => &mut self.url,
            Field::SecondaryMetric => &mut self.secondary_metric,
            Field::Image => &mut self.image_url,
        }
    }

    /// Rating label as a number, if it parses as one
    pub fn rating_value(&self) -> Option<f64> {
        self.rating_label.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let record = Record {
            name: "Heat".to_string(),
            rating_label: "8.3".to_string(),
            date: "1995".to_string(),
            snippet: "A group of professional bank robbers...".to_string(),
            url: "https://www.imdb.com/title/tt0113277/".to_string(),
            secondary_metric: "12 of 14 found this helpful".to_string(),
            image_url: "https://m.media/heat.jpg".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected = vec!["name", "stars", "date", "reviewText", "url", "usefulness", "imageUrl"];
        expected.sort_unstable();
        let mut keys = keys;
        keys.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(json["stars"], "8.3");
        assert_eq!(json["imageUrl"], "https://m.media/heat.jpg");
    }

    #[test]
    fn test_rating_value() {
        let mut record = Record::default();
        assert_eq!(record.rating_value(), None);

        record.rating_label = "8.4".to_string();
        assert_eq!(record.rating_value(), Some(8.4));

        record.rating_label = "NaN".to_string();
        assert_eq!(record.rating_value(), None);
    }
}
