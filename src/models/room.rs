use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender a housing room is reserved for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// How a room is used during the event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomType {
    #[serde(rename = "housing")]
    Housing,
    #[serde(rename = "smallGroup")]
    SmallGroup,
}

/// A physical room, uniquely identified by building + room number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub building: String,
    pub room_id: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gender: Option<Gender>,
    pub capacity: u32,
    pub accessibility: String,
}

impl Room {
    pub fn new(
        building: impl Into<String>,
        room_id: impl Into<String>,
        room_type: RoomType,
    ) -> Self {
        Self {
            building: building.into(),
            room_id: room_id.into(),
            room_type,
            gender: None,
            capacity: 0,
            accessibility: String::new(),
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_accessibility(mut self, notes: impl Into<String>) -> Self {
        self.accessibility = notes.into();
        self
    }

    /// Composite key used by all assignment maps: `"{building}-{roomId}"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.building, self.room_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_key() {
        let room = Room::new("Xavier Hall", "204", RoomType::Housing);
        assert_eq!(room.key(), "Xavier Hall-204");
    }

    #[test]
    fn test_room_builder() {
        let room = Room::new("Xavier Hall", "204", RoomType::Housing)
            .with_gender(Gender::Female)
            .with_capacity(8)
            .with_accessibility("elevator access");

        assert_eq!(room.gender, Some(Gender::Female));
        assert_eq!(room.capacity, 8);
        assert_eq!(room.accessibility, "elevator access");
    }

    #[test]
    fn test_room_type_serde_names() {
        let housing = Room::new("A", "1", RoomType::Housing);
        let small = Room::new("A", "2", RoomType::SmallGroup).with_gender(Gender::Male);

        let housing_json = serde_json::to_value(&housing).unwrap();
        let small_json = serde_json::to_value(&small).unwrap();

        assert_eq!(housing_json["type"], "housing");
        assert_eq!(small_json["type"], "smallGroup");
        assert_eq!(small_json["gender"], "male");
        // Unset gender is omitted from the wire format.
        assert!(housing_json.get("gender").is_none());
        assert_eq!(housing_json["roomId"], "1");
    }

    #[test]
    fn test_gender_display() {
        assert_eq!(Gender::Male.to_string(), "male");
        assert_eq!(Gender::Female.to_string(), "female");
    }
}
