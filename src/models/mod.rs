mod ada;
mod document;
mod group;
mod meal;
mod room;

pub use ada::AdaIndividual;
pub use document::{AssignmentMap, DefaultNotes, HousingAssignments, HousingDocument};
pub use group::Group;
pub use meal::{default_active_colors, default_meal_times, MealSchedule};
pub use room::{Gender, Room, RoomType};
