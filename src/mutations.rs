//! Pure document transforms.
//!
//! Every function here takes the current [`HousingDocument`] by
//! reference and returns a new document with `lastUpdated` refreshed.
//! A failed transform returns the error and leaves the input untouched,
//! so callers can apply these under the sync engine's "edit now, save
//! automatically" contract without partial updates.

use thiserror::Error;

use crate::models::{AdaIndividual, DefaultNotes, Gender, Group, HousingDocument, Room};

/// Validation errors raised by document transforms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("group not found: {0}")]
    GroupNotFound(String),

    #[error("group already exists: {0}")]
    GroupExists(String),

    #[error("room not found: {0}")]
    RoomNotFound(String),

    #[error("room already exists: {0}")]
    RoomExists(String),

    #[error("unknown meal color: {0}")]
    UnknownColor(String),

    #[error("no ADA individual at index {0}")]
    AdaIndexOutOfRange(usize),
}

fn require_group(doc: &HousingDocument, group_id: &str) -> Result<(), MutationError> {
    if doc.group(group_id).is_some() {
        Ok(())
    } else {
        Err(MutationError::GroupNotFound(group_id.to_string()))
    }
}

pub fn add_group(doc: &HousingDocument, group: Group) -> Result<HousingDocument, MutationError> {
    if doc.group(&group.id).is_some() {
        return Err(MutationError::GroupExists(group.id));
    }
    let mut next = doc.clone();
    next.groups.push(group);
    next.touch();
    Ok(next)
}

/// Replace the group with the same id.
pub fn update_group(doc: &HousingDocument, group: Group) -> Result<HousingDocument, MutationError> {
    let mut next = doc.clone();
    let slot = next
        .groups
        .iter_mut()
        .find(|g| g.id == group.id)
        .ok_or_else(|| MutationError::GroupNotFound(group.id.clone()))?;
    *slot = group;
    next.touch();
    Ok(next)
}

/// Delete a group and cascade-remove every reference to it: housing and
/// small-group assignments, meal color, group notes, and ADA records.
/// One atomic transition; a dangling group id never survives.
pub fn delete_group(doc: &HousingDocument, group_id: &str) -> Result<HousingDocument, MutationError> {
    require_group(doc, group_id)?;
    let mut next = doc.clone();
    next.groups.retain(|g| g.id != group_id);
    next.housing_assignments.male.remove(group_id);
    next.housing_assignments.female.remove(group_id);
    next.small_group_assignments.remove(group_id);
    next.meal_color_assignments.remove(group_id);
    next.group_notes.remove(group_id);
    next.ada_individuals.retain(|i| i.group_id != group_id);
    next.touch();
    Ok(next)
}

pub fn add_room(doc: &HousingDocument, room: Room) -> Result<HousingDocument, MutationError> {
    if doc.room(&room.key()).is_some() {
        return Err(MutationError::RoomExists(room.key()));
    }
    let mut next = doc.clone();
    next.rooms.push(room);
    next.touch();
    Ok(next)
}

/// Replace the room currently stored under `key`. The replacement may
/// change the key (building/number edits), as long as it stays unique.
pub fn update_room(
    doc: &HousingDocument,
    key: &str,
    room: Room,
) -> Result<HousingDocument, MutationError> {
    let index = doc
        .rooms
        .iter()
        .position(|r| r.key() == key)
        .ok_or_else(|| MutationError::RoomNotFound(key.to_string()))?;
    if room.key() != key && doc.room(&room.key()).is_some() {
        return Err(MutationError::RoomExists(room.key()));
    }
    let mut next = doc.clone();
    next.rooms[index] = room;
    next.touch();
    Ok(next)
}

pub fn delete_room(doc: &HousingDocument, key: &str) -> Result<HousingDocument, MutationError> {
    if doc.room(key).is_none() {
        return Err(MutationError::RoomNotFound(key.to_string()));
    }
    let mut next = doc.clone();
    next.rooms.retain(|r| r.key() != key);
    next.touch();
    Ok(next)
}

/// Replace a group's housing assignment list for one gender.
pub fn set_housing_assignment(
    doc: &HousingDocument,
    group_id: &str,
    gender: Gender,
    room_keys: Vec<String>,
) -> Result<HousingDocument, MutationError> {
    require_group(doc, group_id)?;
    let mut next = doc.clone();
    next.housing_assignments
        .for_gender_mut(gender)
        .insert(group_id.to_string(), room_keys);
    next.touch();
    Ok(next)
}

/// Symmetric-difference toggle: an already-assigned key is removed, an
/// unassigned one appended. Backs the assignment grid's toggle buttons.
pub fn toggle_housing_assignment(
    doc: &HousingDocument,
    group_id: &str,
    gender: Gender,
    room_key: &str,
) -> Result<HousingDocument, MutationError> {
    require_group(doc, group_id)?;
    let mut next = doc.clone();
    let list = next
        .housing_assignments
        .for_gender_mut(gender)
        .entry(group_id.to_string())
        .or_default();
    toggle_key(list, room_key);
    next.touch();
    Ok(next)
}

pub fn set_small_group_assignment(
    doc: &HousingDocument,
    group_id: &str,
    room_keys: Vec<String>,
) -> Result<HousingDocument, MutationError> {
    require_group(doc, group_id)?;
    let mut next = doc.clone();
    next.small_group_assignments
        .insert(group_id.to_string(), room_keys);
    next.touch();
    Ok(next)
}

pub fn toggle_small_group_assignment(
    doc: &HousingDocument,
    group_id: &str,
    room_key: &str,
) -> Result<HousingDocument, MutationError> {
    require_group(doc, group_id)?;
    let mut next = doc.clone();
    let list = next
        .small_group_assignments
        .entry(group_id.to_string())
        .or_default();
    toggle_key(list, room_key);
    next.touch();
    Ok(next)
}

fn toggle_key(list: &mut Vec<String>, room_key: &str) {
    if let Some(pos) = list.iter().position(|k| k == room_key) {
        list.remove(pos);
    } else {
        list.push(room_key.to_string());
    }
}

/// Assign a group to a meal color. The color must be one of the fixed
/// schedule slots.
pub fn set_meal_color(
    doc: &HousingDocument,
    group_id: &str,
    color: &str,
) -> Result<HousingDocument, MutationError> {
    require_group(doc, group_id)?;
    if !doc.meal_times.contains_key(color) {
        return Err(MutationError::UnknownColor(color.to_string()));
    }
    let mut next = doc.clone();
    next.meal_color_assignments
        .insert(group_id.to_string(), color.to_string());
    next.touch();
    Ok(next)
}

pub fn set_default_notes(
    doc: &HousingDocument,
    notes: DefaultNotes,
) -> Result<HousingDocument, MutationError> {
    let mut next = doc.clone();
    next.default_notes = notes;
    next.touch();
    Ok(next)
}

pub fn set_group_note(
    doc: &HousingDocument,
    group_id: &str,
    note: impl Into<String>,
) -> Result<HousingDocument, MutationError> {
    require_group(doc, group_id)?;
    let mut next = doc.clone();
    next.group_notes.insert(group_id.to_string(), note.into());
    next.touch();
    Ok(next)
}

pub fn add_ada_individual(
    doc: &HousingDocument,
    individual: AdaIndividual,
) -> Result<HousingDocument, MutationError> {
    require_group(doc, &individual.group_id)?;
    let mut next = doc.clone();
    next.ada_individuals.push(individual);
    next.touch();
    Ok(next)
}

pub fn remove_ada_individual(
    doc: &HousingDocument,
    index: usize,
) -> Result<HousingDocument, MutationError> {
    if index >= doc.ada_individuals.len() {
        return Err(MutationError::AdaIndexOutOfRange(index));
    }
    let mut next = doc.clone();
    next.ada_individuals.remove(index);
    next.touch();
    Ok(next)
}
