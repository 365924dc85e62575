//! Character list handling shared by the tabs: form validation, filtering,
//! faction grouping and faction colors.

use serde_json::Map;
use thiserror::Error;

use crate::api::{Character, CharacterInput, NamedRelationship};

/// Factions offered by the character form.
pub const FACTIONS: [&str; 4] = ["Thục Hán", "Tào Ngụy", "Đông Ngô", "Khác"];

/// Relationship types offered when linking two characters by name.
pub const RELATION_TYPES: [&str; 10] = [
	"Nghĩa huynh",
	"Chủ - tướng",
	"Quân sư",
	"Kế thừa",
	"Cha - con",
	"Anh - em",
	"Tình cảm",
	"Đồng minh",
	"Kẻ thù",
	"Từng phục vụ",
];

/// Group name for characters without a faction.
pub const UNKNOWN_FACTION: &str = "Unknown";

/// Color of nodes with no faction color and no explicit color.
pub const NEUTRAL_COLOR: &str = "#97C2FC";

/// Display color of a faction, if it has one.
pub fn faction_color(faction: &str) -> Option<&'static str> {
	match faction {
		"Thục Hán" => Some("#4CAF50"),
		"Tào Ngụy" => Some("#2196F3"),
		"Đông Ngô" => Some("#FF9800"),
		"Khác" => Some("#9C27B0"),
		_ => None,
	}
}

/// Rejected form input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("name is required")]
	EmptyName,
	#[error("birth year must be a whole number, got {0:?}")]
	InvalidBorn(String),
	#[error("both characters are required")]
	MissingEndpoint,
	#[error("a character cannot be related to itself")]
	SameEndpoints,
	#[error("relationship type is required")]
	MissingType,
}

/// Raw contents of the character form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterDraft {
	pub name: String,
	pub born: String,
	pub faction: String,
	pub info: String,
}

impl CharacterDraft {
	/// Prefill the form for editing `character`.
	pub fn from_character(character: &Character) -> Self {
		Self {
			name: character.name.clone(),
			born: character.born.map(|b| b.to_string()).unwrap_or_default(),
			faction: character.faction.clone().unwrap_or_default(),
			info: character.info.clone().unwrap_or_default(),
		}
	}

	/// Trim the fields and turn blanks into absent values.
	pub fn validate(&self) -> Result<CharacterInput, ValidationError> {
		let name = self.name.trim();
		if name.is_empty() {
			return Err(ValidationError::EmptyName);
		}
		let born = match self.born.trim() {
			"" => None,
			year => Some(
				year.parse::<i64>()
					.map_err(|_| ValidationError::InvalidBorn(year.to_string()))?,
			),
		};
		Ok(CharacterInput {
			name: name.to_string(),
			born,
			faction: non_blank(&self.faction),
			info: non_blank(&self.info),
		})
	}
}

fn non_blank(s: &str) -> Option<String> {
	let s = s.trim();
	(!s.is_empty()).then(|| s.to_string())
}

/// Raw contents of the add-relationship form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationshipDraft {
	pub from_name: String,
	pub to_name: String,
	pub rel_type: String,
}

impl RelationshipDraft {
	pub fn validate(&self) -> Result<NamedRelationship, ValidationError> {
		let from = self.from_name.trim();
		let to = self.to_name.trim();
		if from.is_empty() || to.is_empty() {
			return Err(ValidationError::MissingEndpoint);
		}
		if from == to {
			return Err(ValidationError::SameEndpoints);
		}
		let rel_type = self.rel_type.trim();
		if rel_type.is_empty() {
			return Err(ValidationError::MissingType);
		}
		Ok(NamedRelationship {
			from_name: from.to_string(),
			to_name: to.to_string(),
			rel_type: rel_type.to_string(),
			properties: Map::new(),
		})
	}
}

/// Client-side filter of the character list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterFilter {
	/// Matched case-insensitively against name and info.
	pub search: String,
	/// Exact faction; empty matches all.
	pub faction: String,
}

impl CharacterFilter {
	pub fn matches(&self, character: &Character) -> bool {
		let term = self.search.trim().to_lowercase();
		let text_ok = term.is_empty()
			|| character.name.to_lowercase().contains(&term)
			|| character
				.info
				.as_deref()
				.is_some_and(|info| info.to_lowercase().contains(&term));
		let faction_ok =
			self.faction.is_empty() || character.faction.as_deref() == Some(self.faction.as_str());
		text_ok && faction_ok
	}

	pub fn apply(&self, characters: &[Character]) -> Vec<Character> {
		characters
			.iter()
			.filter(|c| self.matches(c))
			.cloned()
			.collect()
	}
}

/// Characters sharing a faction.
#[derive(Clone, Debug, PartialEq)]
pub struct FactionGroup {
	pub faction: String,
	pub characters: Vec<Character>,
}

impl FactionGroup {
	pub fn color(&self) -> &'static str {
		faction_color(&self.faction).unwrap_or(NEUTRAL_COLOR)
	}

	/// First `shown` names, and how many were left out.
	pub fn preview(&self, shown: usize) -> (Vec<&str>, usize) {
		let names = self
			.characters
			.iter()
			.take(shown)
			.map(|c| c.name.as_str())
			.collect();
		(names, self.characters.len().saturating_sub(shown))
	}
}

/// Group by faction in order of first appearance; characters without a
/// faction go to [`UNKNOWN_FACTION`].
pub fn group_by_faction(characters: &[Character]) -> Vec<FactionGroup> {
	let mut groups: Vec<FactionGroup> = Vec::new();
	for character in characters {
		let faction = character
			.faction
			.as_deref()
			.filter(|f| !f.is_empty())
			.unwrap_or(UNKNOWN_FACTION);
		match groups.iter_mut().find(|g| g.faction == faction) {
			Some(group) => group.characters.push(character.clone()),
			None => groups.push(FactionGroup {
				faction: faction.to_string(),
				characters: vec![character.clone()],
			}),
		}
	}
	groups
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::EntityId;

	fn character(id: i64, name: &str, faction: Option<&str>, info: Option<&str>) -> Character {
		Character {
			id: EntityId::Int(id),
			name: name.into(),
			faction: faction.map(Into::into),
			born: None,
			info: info.map(Into::into),
		}
	}

	fn roster() -> Vec<Character> {
		vec![
			character(1, "Lưu Bị", Some("Thục Hán"), Some("Hoàng thúc")),
			character(2, "Tào Tháo", Some("Tào Ngụy"), None),
			character(3, "Quan Vũ", Some("Thục Hán"), Some("Võ thánh")),
			character(4, "Lữ Bố", None, None),
		]
	}

	#[test]
	fn draft_trims_and_parses() {
		let draft = CharacterDraft {
			name: "  Triệu Vân ".into(),
			born: "168".into(),
			faction: "Thục Hán".into(),
			info: "   ".into(),
		};
		let input = draft.validate().unwrap();
		assert_eq!(input.name, "Triệu Vân");
		assert_eq!(input.born, Some(168));
		assert_eq!(input.faction.as_deref(), Some("Thục Hán"));
		assert_eq!(input.info, None);
	}

	#[test]
	fn draft_rejects_empty_name_and_bad_year() {
		assert_eq!(
			CharacterDraft::default().validate(),
			Err(ValidationError::EmptyName)
		);
		let draft = CharacterDraft {
			name: "Chu Du".into(),
			born: "175 AD".into(),
			..CharacterDraft::default()
		};
		assert_eq!(
			draft.validate(),
			Err(ValidationError::InvalidBorn("175 AD".into()))
		);
	}

	#[test]
	fn draft_round_trips_existing_character() {
		let mut c = character(7, "Tôn Quyền", Some("Đông Ngô"), None);
		c.born = Some(182);
		let input = CharacterDraft::from_character(&c).validate().unwrap();
		assert_eq!(input.born, Some(182));
		assert_eq!(input.faction.as_deref(), Some("Đông Ngô"));
	}

	#[test]
	fn relationship_draft_requires_distinct_endpoints_and_type() {
		let draft = RelationshipDraft {
			from_name: "Lưu Bị".into(),
			to_name: "Lưu Bị".into(),
			rel_type: "Nghĩa huynh".into(),
		};
		assert_eq!(draft.validate(), Err(ValidationError::SameEndpoints));

		let draft = RelationshipDraft {
			to_name: "Gia Cát Lượng".into(),
			rel_type: String::new(),
			..draft
		};
		assert_eq!(draft.validate(), Err(ValidationError::MissingType));

		let ok = RelationshipDraft {
			rel_type: "Quân sư".into(),
			..draft
		}
		.validate()
		.unwrap();
		assert_eq!(ok.to_name, "Gia Cát Lượng");
		assert!(ok.properties.is_empty());
	}

	#[test]
	fn filter_matches_name_or_info_case_insensitively() {
		let filter = CharacterFilter {
			search: "VÕ".into(),
			faction: String::new(),
		};
		let names: Vec<_> = filter.apply(&roster()).into_iter().map(|c| c.name).collect();
		assert_eq!(names, ["Quan Vũ"]);
	}

	#[test]
	fn filter_by_exact_faction() {
		let filter = CharacterFilter {
			search: String::new(),
			faction: "Thục Hán".into(),
		};
		assert_eq!(filter.apply(&roster()).len(), 2);
		assert_eq!(CharacterFilter::default().apply(&roster()).len(), 4);
	}

	#[test]
	fn groups_keep_first_appearance_order() {
		let groups = group_by_faction(&roster());
		let factions: Vec<_> = groups.iter().map(|g| g.faction.as_str()).collect();
		assert_eq!(factions, ["Thục Hán", "Tào Ngụy", UNKNOWN_FACTION]);
		assert_eq!(groups[0].characters.len(), 2);
		assert_eq!(groups[2].color(), NEUTRAL_COLOR);
		assert_eq!(groups[0].color(), "#4CAF50");
	}

	#[test]
	fn preview_counts_the_rest() {
		let group = FactionGroup {
			faction: "Thục Hán".into(),
			characters: roster(),
		};
		let (names, rest) = group.preview(3);
		assert_eq!(names, ["Lưu Bị", "Tào Tháo", "Quan Vũ"]);
		assert_eq!(rest, 1);
	}
}
