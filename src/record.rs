//! Record model: the entity managed by the table, its partial draft form,
//! column keys and typed cell values.

use serde::{Deserialize, Serialize};

/// Backend-assigned record identity.
pub type RecordId = i64;

/// A record as confirmed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub explanation: String,
    pub rating: i64,
    #[serde(default)]
    pub powers: Vec<String>,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl Record {
    /// Returns the typed cell value for a table column.
    pub fn cell(&self, key: ColumnKey) -> CellValue<'_> {
        match key {
            ColumnKey::Id => CellValue::Integer(self.id),
            ColumnKey::Name => CellValue::Text(&self.name),
            ColumnKey::Explanation => CellValue::Text(&self.explanation),
            ColumnKey::Rating => CellValue::Integer(self.rating),
            ColumnKey::Powers => CellValue::List(&self.powers),
            ColumnKey::Tips => CellValue::List(&self.tips),
        }
    }

    /// Tier derived from the rating.
    pub fn tier(&self) -> RatingTier {
        RatingTier::from_rating(self.rating)
    }

    /// Case-insensitive substring match over name, explanation, powers and tips.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.explanation.to_lowercase().contains(needle)
            || self.powers.iter().any(|p| p.to_lowercase().contains(needle))
            || self.tips.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Partial record used by create/edit forms and sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub powers: Vec<String>,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl RecordDraft {
    /// Checks the required fields. A rating of zero counts as missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push(RequiredField::Name);
        }
        if self.rating.unwrap_or(0) == 0 {
            missing.push(RequiredField::Rating);
        }
        let malformed: Vec<ListField> = [ListField::Powers, ListField::Tips]
            .into_iter()
            .filter(|&field| self.list(field).iter().any(|item| !is_clean_item(item)))
            .collect();
        if missing.is_empty() && malformed.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing, malformed })
        }
    }

    /// Builds the record the backend would store under `id`.
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            name: self.name,
            explanation: self.explanation,
            rating: self.rating.unwrap_or(0),
            powers: self.powers,
            image_ref: self.image_ref,
            tips: self.tips,
        }
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Powers => &self.powers,
            ListField::Tips => &self.tips,
        }
    }

    pub fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Powers => &mut self.powers,
            ListField::Tips => &mut self.tips,
        }
    }
}

impl From<&Record> for RecordDraft {
    fn from(record: &Record) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            explanation: record.explanation.clone(),
            rating: Some(record.rating),
            powers: record.powers.clone(),
            image_ref: record.image_ref.clone(),
            tips: record.tips.clone(),
        }
    }
}

/// List items must be non-empty and carry no surrounding whitespace.
fn is_clean_item(item: &str) -> bool {
    !item.is_empty() && item.trim() == item
}

/// The two freeform tag lists of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    Powers,
    Tips,
}

impl ListField {
    pub fn label(&self) -> &'static str {
        match self {
            ListField::Powers => "Powers",
            ListField::Tips => "Catching Tips",
        }
    }
}

/// Required fields checked before a submission leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Rating,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Name => "Name",
            RequiredField::Rating => "Rating",
        }
    }
}

/// A candidate record is missing required fields or has blank or untrimmed
/// list items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
    pub malformed: Vec<ListField>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.missing.iter().map(|m| m.label()).collect();
        match names.as_slice() {
            [] => {}
            [one] => write!(f, "{} is a required field", one)?,
            _ => write!(f, "{} are required fields", names.join(" and "))?,
        }
        if !self.malformed.is_empty() {
            if !names.is_empty() {
                write!(f, "; ")?;
            }
            let lists: Vec<&str> = self.malformed.iter().map(|l| l.label()).collect();
            write!(f, "{} must not contain blank or untrimmed items", lists.join(" and "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Table columns, one per record field shown in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Id,
    Name,
    Explanation,
    Rating,
    Powers,
    Tips,
}

impl ColumnKey {
    pub fn all() -> &'static [ColumnKey] {
        &[
            ColumnKey::Id,
            ColumnKey::Name,
            ColumnKey::Explanation,
            ColumnKey::Rating,
            ColumnKey::Powers,
            ColumnKey::Tips,
        ]
    }

    /// Default header label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKey::Id => "ID",
            ColumnKey::Name => "Name",
            ColumnKey::Explanation => "Name Origin",
            ColumnKey::Rating => "Rating",
            ColumnKey::Powers => "Powers",
            ColumnKey::Tips => "Catching Tips",
        }
    }

    /// Default width in layout units.
    pub fn default_width(&self) -> u32 {
        match self {
            ColumnKey::Id => 80,
            ColumnKey::Name => 150,
            ColumnKey::Explanation => 300,
            ColumnKey::Rating => 120,
            ColumnKey::Powers | ColumnKey::Tips => 250,
        }
    }

    /// List-valued columns have no natural order.
    pub fn is_sortable(&self) -> bool {
        !matches!(self, ColumnKey::Powers | ColumnKey::Tips)
    }
}

/// Typed value of one table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue<'a> {
    Integer(i64),
    Text(&'a str),
    List(&'a [String]),
}

impl CellValue<'_> {
    /// Display text; lists are joined with ", ".
    pub fn display(&self) -> String {
        match self {
            CellValue::Integer(v) => v.to_string(),
            CellValue::Text(s) => s.to_string(),
            CellValue::List(items) => items.join(", "),
        }
    }
}

/// Rating bands used for labels and colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RatingTier {
    BelowAverage,
    Average,
    AboveAverage,
    Strong,
    VeryStrong,
    Legendary,
}

impl RatingTier {
    pub fn from_rating(rating: i64) -> Self {
        match rating {
            r if r >= 95 => RatingTier::Legendary,
            r if r >= 90 => RatingTier::VeryStrong,
            r if r >= 85 => RatingTier::Strong,
            r if r >= 80 => RatingTier::AboveAverage,
            r if r >= 70 => RatingTier::Average,
            _ => RatingTier::BelowAverage,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingTier::Legendary => "Legendary",
            RatingTier::VeryStrong => "Very Strong",
            RatingTier::Strong => "Strong",
            RatingTier::AboveAverage => "Above Average",
            RatingTier::Average => "Average",
            RatingTier::BelowAverage => "Below Average",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record {
            id: 25,
            name: "Pikachu".to_string(),
            explanation: "Pika is the sound of a spark".to_string(),
            rating: 90,
            powers: vec!["Thunderbolt".to_string(), "Quick Attack".to_string()],
            image_ref: "pikachu.png".to_string(),
            tips: vec!["Look in forests".to_string()],
        }
    }

    #[test]
    fn test_cell_values() {
        let r = sample();
        assert_eq!(r.cell(ColumnKey::Id), CellValue::Integer(25));
        assert_eq!(r.cell(ColumnKey::Name).display(), "Pikachu");
        assert_eq!(
            r.cell(ColumnKey::Powers).display(),
            "Thunderbolt, Quick Attack"
        );
        assert_eq!(r.cell(ColumnKey::Tips).display(), "Look in forests");
    }

    #[test]
    fn test_matches_all_text_fields() {
        let r = sample();
        assert!(r.matches("pika"));
        assert!(r.matches("spark"));
        assert!(r.matches("thunder"));
        assert!(r.matches("forests"));
        assert!(!r.matches("water"));
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(RatingTier::from_rating(95), RatingTier::Legendary);
        assert_eq!(RatingTier::from_rating(94), RatingTier::VeryStrong);
        assert_eq!(RatingTier::from_rating(85), RatingTier::Strong);
        assert_eq!(RatingTier::from_rating(80), RatingTier::AboveAverage);
        assert_eq!(RatingTier::from_rating(70), RatingTier::Average);
        assert_eq!(RatingTier::from_rating(69), RatingTier::BelowAverage);
        assert_eq!(sample().tier().label(), "Very Strong");
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let draft = RecordDraft {
            name: "  ".to_string(),
            rating: Some(0),
            ..RecordDraft::default()
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err.missing, vec![RequiredField::Name, RequiredField::Rating]);
        assert_eq!(err.to_string(), "Name and Rating are required fields");

        let draft = RecordDraft {
            name: "Mew".to_string(),
            rating: None,
            ..RecordDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Rating is a required field"
        );

        let draft = RecordDraft {
            name: "Mew".to_string(),
            rating: Some(100),
            ..RecordDraft::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_and_untrimmed_items() {
        let draft = RecordDraft {
            name: "Mew".to_string(),
            rating: Some(50),
            powers: vec!["   ".to_string(), "  Psychic ".to_string()],
            tips: vec![String::new()],
            ..RecordDraft::default()
        };
        let err = draft.validate().unwrap_err();
        assert!(err.missing.is_empty());
        assert_eq!(err.malformed, vec![ListField::Powers, ListField::Tips]);
        assert_eq!(
            err.to_string(),
            "Powers and Catching Tips must not contain blank or untrimmed items"
        );

        let draft = RecordDraft {
            tips: vec!["Night only ".to_string()],
            ..RecordDraft::default()
        };
        assert_eq!(
            draft.validate().unwrap_err().to_string(),
            "Name and Rating are required fields; \
             Catching Tips must not contain blank or untrimmed items"
        );

        let draft = RecordDraft {
            name: "Mew".to_string(),
            rating: Some(50),
            powers: vec!["Psychic".to_string(), "Mega Punch".to_string()],
            ..RecordDraft::default()
        };
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_sortable_keys() {
        let sortable: Vec<ColumnKey> = ColumnKey::all()
            .iter()
            .copied()
            .filter(|k| k.is_sortable())
            .collect();
        assert_eq!(
            sortable,
            vec![
                ColumnKey::Id,
                ColumnKey::Name,
                ColumnKey::Explanation,
                ColumnKey::Rating
            ]
        );
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["imageRef"], "pikachu.png");

        let parsed: Record =
            serde_json::from_str(r#"{"id":1,"name":"Mew","rating":100}"#).unwrap();
        assert!(parsed.powers.is_empty());
        assert_eq!(parsed.explanation, "");
    }

    #[test]
    fn test_draft_round_trips_record() {
        let r = sample();
        let draft = RecordDraft::from(&r);
        assert_eq!(draft.id, Some(25));
        assert_eq!(draft.into_record(25), r);
    }
}
