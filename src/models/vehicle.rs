//! Vehicle types and the capacity-ordered fleet table.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A known vehicle type with a load capacity in bags.
///
/// Serialized with the `type` key used by the configuration file, e.g.
/// `{"type": "Box Truck", "capacity": 135}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleType {
    /// Display label, e.g. "Box Truck".
    #[serde(rename = "type")]
    pub label: String,
    /// Maximum total load in bags.
    pub capacity: u32,
}

impl VehicleType {
    /// Creates a vehicle type.
    pub fn new(label: impl Into<String>, capacity: u32) -> Self {
        Self {
            label: label.into(),
            capacity,
        }
    }
}

/// The fixed, capacity-ascending list of vehicle types available for a run.
///
/// Routes are seeded against the smallest type and escalate through the
/// list on overflow; finished routes are labeled with the smallest type
/// whose capacity covers their total load.
///
/// # Examples
///
/// ```
/// use bagroute::models::{Fleet, VehicleType};
///
/// let fleet = Fleet::new(vec![
///     VehicleType::new("Box Truck", 135),
///     VehicleType::new("26' Flatbed", 315),
/// ])
/// .unwrap();
///
/// assert_eq!(fleet.smallest().capacity, 135);
/// assert_eq!(fleet.for_load(200).unwrap().label, "26' Flatbed");
/// assert!(fleet.for_load(400).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    types: Vec<VehicleType>,
}

impl Fleet {
    /// Creates a fleet from a capacity-ascending list of vehicle types.
    ///
    /// Returns a configuration error if the list is empty, a capacity is
    /// zero, or the capacities are not strictly ascending.
    pub fn new(types: Vec<VehicleType>) -> Result<Self> {
        if types.is_empty() {
            return Err(Error::Config("vehicle table is empty".to_string()));
        }
        for pair in types.windows(2) {
            if pair[1].capacity <= pair[0].capacity {
                return Err(Error::Config(format!(
                    "vehicle capacities must be strictly ascending: {} ({}) precedes {} ({})",
                    pair[0].label, pair[0].capacity, pair[1].label, pair[1].capacity
                )));
            }
        }
        if types[0].capacity == 0 {
            return Err(Error::Config(format!(
                "vehicle {} has zero capacity",
                types[0].label
            )));
        }
        Ok(Self { types })
    }

    /// All vehicle types, ascending by capacity.
    pub fn types(&self) -> &[VehicleType] {
        &self.types
    }

    /// The smallest vehicle type, tried first when seeding a route.
    pub fn smallest(&self) -> &VehicleType {
        &self.types[0]
    }

    /// The largest vehicle type.
    pub fn largest(&self) -> &VehicleType {
        &self.types[self.types.len() - 1]
    }

    /// Number of vehicle types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the fleet has no types (never holds after `new`).
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The smallest vehicle type whose capacity covers `load`, if any.
    pub fn for_load(&self, load: u32) -> Option<&VehicleType> {
        self.types.iter().find(|t| t.capacity >= load)
    }
}
