//! Structured persona profiles and their first-person rendering.
//!
//! Source files are loosely typed (CSV cells, JSON numbers or strings), so
//! every field is an optional string and absent or blank values fall back to
//! a neutral "unknown" phrase when rendered.

use serde::{Deserialize, Deserializer, Serialize};

/// Demographic attributes shared by silicon and cognitive personas
///
/// Matches the columns of the demographics CSV and the `demographics`
/// object of cognitive profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemographicProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub occupation: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub income_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub residence_type: Option<String>,
}

impl DemographicProfile {
    /// Render the silicon persona description.
    pub fn describe(&self) -> String {
        format!(
            "我今年{}岁，性别{}。我的最高学历是{}。我目前的职业是{}，个人年收入大致在{}范围。我住在{}。",
            or_unknown(&self.age, "未知年龄"),
            or_unknown(&self.gender, "未知性别"),
            or_unknown(&self.education, "未知学历"),
            or_unknown(&self.occupation, "未知职业"),
            or_unknown(&self.income_level, "未知收入"),
            or_unknown(&self.residence_type, "未知地区"),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

/// Rich persona profile (cognitive strategy)
///
/// ```json
/// {
///   "id": "cog_a",
///   "demographics": {"age": 35, "gender": "女", "education": "本科"},
///   "personality": {"description": "我性格外向，喜欢尝试新事物。"},
///   "values": "努力工作就会有回报",
///   "narrative_memory": "我小时候在农村长大。"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitiveProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub demographics: DemographicProfile,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default, deserialize_with = "lenient_string")]
    pub values: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub narrative_memory: Option<String>,
}

impl CognitiveProfile {
    /// Render the cognitive persona description.
    pub fn describe(&self) -> String {
        let demo = &self.demographics;
        format!(
            "我今年{}岁，性别{}，学历是{}，住在{}。我的职业是{}，年收入大概是{}。{}我认为{}。{}",
            or_unknown(&demo.age, "未知年龄"),
            or_unknown(&demo.gender, "未知性别"),
            or_unknown(&demo.education, "未知学历"),
            or_unknown(&demo.residence_type, "未知地区"),
            or_unknown(&demo.occupation, "未知职业"),
            or_unknown(&demo.income_level, "未知收入"),
            or_unknown(&self.personality.description, "我是一个普通人。"),
            or_unknown(&self.values, "生活是复杂的"),
            or_unknown(&self.narrative_memory, ""),
        )
    }
}

fn or_unknown<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// Accept strings, numbers and booleans as text; `null` or absent → `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Int(i64),
        Float(f64),
        Bool(bool),
        Text(String),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Text(t) => t,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demographic_describe_full() {
        let profile = DemographicProfile {
            age: Some("45".into()),
            gender: Some("男".into()),
            education: Some("高中".into()),
            occupation: Some("司机".into()),
            income_level: Some("5-10万".into()),
            residence_type: Some("城市".into()),
            ..Default::default()
        };
        assert_eq!(
            profile.describe(),
            "我今年45岁，性别男。我的最高学历是高中。我目前的职业是司机，个人年收入大致在5-10万范围。我住在城市。"
        );
    }

    #[test]
    fn test_demographic_describe_missing_fields() {
        let profile = DemographicProfile {
            gender: Some("  ".into()),
            ..Default::default()
        };
        let text = profile.describe();
        assert!(text.starts_with("我今年未知年龄岁，性别未知性别。"));
        assert!(text.ends_with("我住在未知地区。"));
    }

    #[test]
    fn test_cognitive_from_json_with_numeric_age() {
        let json = r#"{
            "id": "cog_a",
            "demographics": {"age": 35, "gender": "女", "education": "本科",
                             "occupation": "教师", "income_level": "10万", "residence_type": "县城"},
            "personality": {"description": "我性格外向。"},
            "values": "努力就有回报",
            "narrative_memory": "我在农村长大。"
        }"#;
        let profile: CognitiveProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id.as_deref(), Some("cog_a"));
        assert_eq!(
            profile.describe(),
            "我今年35岁，性别女，学历是本科，住在县城。我的职业是教师，年收入大概是10万。我性格外向。我认为努力就有回报。我在农村长大。"
        );
    }

    #[test]
    fn test_cognitive_defaults() {
        let profile: CognitiveProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.id.is_none());
        let text = profile.describe();
        assert!(text.contains("我是一个普通人。"));
        assert!(text.ends_with("我认为生活是复杂的。"));
    }

    #[test]
    fn test_null_fields_are_none() {
        let profile: DemographicProfile =
            serde_json::from_str(r#"{"age": null, "id": 7}"#).unwrap();
        assert!(profile.age.is_none());
        assert_eq!(profile.id.as_deref(), Some("7"));
    }
}
