use serde::{Deserialize, Serialize};

/// A parish/team record attending the event.
///
/// Headcounts are split by gender and role because housing capacity is
/// allocated per gender and chaperones are housed with their teens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub parish: String,
    pub leader: String,
    pub phone: String,
    pub religious: String,
    pub seminarian_sgl: String,
    pub male_teens: u32,
    pub female_teens: u32,
    pub male_chaperones: u32,
    pub female_chaperones: u32,
    pub staying_off_campus: bool,
    pub special_accommodations: String,
}

impl Group {
    pub fn new(id: impl Into<String>, parish: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parish: parish.into(),
            leader: String::new(),
            phone: String::new(),
            religious: String::new(),
            seminarian_sgl: String::new(),
            male_teens: 0,
            female_teens: 0,
            male_chaperones: 0,
            female_chaperones: 0,
            staying_off_campus: false,
            special_accommodations: String::new(),
        }
    }

    pub fn with_leader(mut self, leader: impl Into<String>, phone: impl Into<String>) -> Self {
        self.leader = leader.into();
        self.phone = phone.into();
        self
    }

    pub fn with_headcounts(
        mut self,
        male_teens: u32,
        female_teens: u32,
        male_chaperones: u32,
        female_chaperones: u32,
    ) -> Self {
        self.male_teens = male_teens;
        self.female_teens = female_teens;
        self.male_chaperones = male_chaperones;
        self.female_chaperones = female_chaperones;
        self
    }

    pub fn with_accommodations(mut self, notes: impl Into<String>) -> Self {
        self.special_accommodations = notes.into();
        self
    }

    /// Total attendees across all four headcounts.
    pub fn total_attendees(&self) -> u32 {
        self.male_teens + self.female_teens + self.male_chaperones + self.female_chaperones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_new() {
        let group = Group::new("g1", "St. Mary");
        assert_eq!(group.id, "g1");
        assert_eq!(group.parish, "St. Mary");
        assert_eq!(group.total_attendees(), 0);
        assert!(!group.staying_off_campus);
    }

    #[test]
    fn test_group_builder() {
        let group = Group::new("g2", "Holy Family")
            .with_leader("Jo Smith", "555-0100")
            .with_headcounts(4, 6, 1, 2)
            .with_accommodations("ground floor only");

        assert_eq!(group.leader, "Jo Smith");
        assert_eq!(group.total_attendees(), 13);
        assert_eq!(group.special_accommodations, "ground floor only");
    }

    #[test]
    fn test_group_serde_field_names() {
        let group = Group::new("g3", "St. Anne").with_headcounts(2, 3, 1, 1);
        let json = serde_json::to_value(&group).unwrap();

        assert_eq!(json["maleTeens"], 2);
        assert_eq!(json["femaleTeens"], 3);
        assert_eq!(json["seminarianSgl"], "");
        assert_eq!(json["stayingOffCampus"], false);
    }
}
