//! The housing document: the single root entity and unit of persistence.
//!
//! Every mutation produces a brand-new document value (see the
//! [`crate::mutations`] catalogue); nothing mutates a document in place
//! once it has been handed to the sync engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ada::AdaIndividual;
use super::group::Group;
use super::meal::{default_active_colors, default_meal_times, MealSchedule};
use super::room::{Gender, Room, RoomType};

/// Room keys assigned to each group, keyed by group id.
pub type AssignmentMap = BTreeMap<String, Vec<String>>;

/// Housing assignments split by gender.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HousingAssignments {
    pub male: AssignmentMap,
    pub female: AssignmentMap,
}

impl HousingAssignments {
    pub fn for_gender(&self, gender: Gender) -> &AssignmentMap {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    pub(crate) fn for_gender_mut(&mut self, gender: Gender) -> &mut AssignmentMap {
        match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        }
    }
}

/// Event-wide free-text notes shown on the public dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DefaultNotes {
    pub general_info: String,
    pub housing_notes: String,
    pub teen_shower_plan: String,
    pub adult_shower_plan: String,
}

/// The whole dataset: groups, rooms, and every assignment between them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HousingDocument {
    /// Schema tag, advisory only.
    pub version: String,
    pub last_updated: DateTime<Utc>,
    pub groups: Vec<Group>,
    pub rooms: Vec<Room>,
    pub housing_assignments: HousingAssignments,
    pub small_group_assignments: AssignmentMap,
    /// Group id -> meal color name.
    pub meal_color_assignments: BTreeMap<String, String>,
    /// Color name -> meal schedule.
    pub meal_times: BTreeMap<String, MealSchedule>,
    pub active_colors: Vec<String>,
    pub ada_individuals: Vec<AdaIndividual>,
    pub default_notes: DefaultNotes,
    /// Group id -> free-text note.
    pub group_notes: BTreeMap<String, String>,
}

impl HousingDocument {
    /// Current document schema tag.
    pub const SCHEMA_VERSION: &'static str = "3.0";

    /// The document used when the remote store has nothing persisted yet.
    pub fn default_skeleton() -> Self {
        Self {
            version: Self::SCHEMA_VERSION.to_string(),
            last_updated: Utc::now(),
            groups: Vec::new(),
            rooms: Vec::new(),
            housing_assignments: HousingAssignments::default(),
            small_group_assignments: AssignmentMap::new(),
            meal_color_assignments: BTreeMap::new(),
            meal_times: default_meal_times(),
            active_colors: default_active_colors(),
            ada_individuals: Vec::new(),
            default_notes: DefaultNotes::default(),
            group_notes: BTreeMap::new(),
        }
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn room(&self, key: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.key() == key)
    }

    /// Rooms used for overnight housing. Derived from `rooms`; never
    /// stored separately.
    pub fn housing_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms
            .iter()
            .filter(|r| r.room_type == RoomType::Housing)
    }

    /// Rooms used for small-group sessions. Derived from `rooms`.
    pub fn small_group_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms
            .iter()
            .filter(|r| r.room_type == RoomType::SmallGroup)
    }

    pub(crate) fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skeleton() {
        let doc = HousingDocument::default_skeleton();
        assert_eq!(doc.version, "3.0");
        assert!(doc.groups.is_empty());
        assert!(doc.rooms.is_empty());
        assert_eq!(doc.meal_times.len(), 8);
        assert_eq!(doc.active_colors.len(), 6);
        assert!(doc.housing_assignments.male.is_empty());
        assert!(doc.ada_individuals.is_empty());
    }

    #[test]
    fn test_derived_room_partitions() {
        let mut doc = HousingDocument::default_skeleton();
        doc.rooms = vec![
            Room::new("A", "1", RoomType::Housing).with_gender(Gender::Male),
            Room::new("A", "2", RoomType::SmallGroup),
            Room::new("B", "1", RoomType::Housing).with_gender(Gender::Female),
        ];

        let housing: Vec<_> = doc.housing_rooms().map(Room::key).collect();
        let small: Vec<_> = doc.small_group_rooms().map(Room::key).collect();

        assert_eq!(housing, vec!["A-1", "B-1"]);
        assert_eq!(small, vec!["A-2"]);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut doc = HousingDocument::default_skeleton();
        doc.groups.push(
            Group::new("g1", "St. Mary")
                .with_leader("Jo Smith", "555-0100")
                .with_headcounts(4, 6, 1, 2),
        );
        doc.rooms
            .push(Room::new("Xavier Hall", "204", RoomType::Housing).with_capacity(8));
        doc.housing_assignments
            .female
            .insert("g1".to_string(), vec!["Xavier Hall-204".to_string()]);
        doc.meal_color_assignments
            .insert("g1".to_string(), "Blue".to_string());
        doc.ada_individuals
            .push(AdaIndividual::new("Pat", "g1", "ground floor"));
        doc.group_notes
            .insert("g1".to_string(), "arriving late Friday".to_string());

        let json = serde_json::to_string_pretty(&doc).unwrap();
        let parsed: HousingDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, parsed);
    }

    #[test]
    fn test_wire_format_keys() {
        let doc = HousingDocument::default_skeleton();
        let json = serde_json::to_value(&doc).unwrap();

        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("housingAssignments").is_some());
        assert!(json.get("smallGroupAssignments").is_some());
        assert!(json.get("mealColorAssignments").is_some());
        assert!(json.get("adaIndividuals").is_some());
        assert!(json.get("defaultNotes").is_some());
        assert_eq!(json["mealTimes"]["Blue"]["satBreakfast"], "7:00 AM");
    }
}
