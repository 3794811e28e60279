use serde::{Deserialize, Serialize};

/// An individual needing accessibility accommodations, tracked against
/// the group they arrive with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdaIndividual {
    pub name: String,
    pub group_id: String,
    pub accommodations: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub room_assignment: Option<String>,
}

impl AdaIndividual {
    pub fn new(
        name: impl Into<String>,
        group_id: impl Into<String>,
        accommodations: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group_id: group_id.into(),
            accommodations: accommodations.into(),
            room_assignment: None,
        }
    }

    pub fn with_room(mut self, room_key: impl Into<String>) -> Self {
        self.room_assignment = Some(room_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ada_individual_new() {
        let ind = AdaIndividual::new("Pat", "g1", "wheelchair access");
        assert_eq!(ind.group_id, "g1");
        assert!(ind.room_assignment.is_none());
    }

    #[test]
    fn test_ada_individual_serde() {
        let ind = AdaIndividual::new("Pat", "g1", "wheelchair access").with_room("Xavier Hall-101");
        let json = serde_json::to_value(&ind).unwrap();
        assert_eq!(json["groupId"], "g1");
        assert_eq!(json["roomAssignment"], "Xavier Hall-101");
    }
}
