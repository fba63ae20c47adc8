//! Core data models for Veloboard
//!
//! Station and bike records exactly as the backend serves them. Optional
//! fields stay `Option` here; the accessor methods on [`Station`] are the one
//! place where absent counts become zero.

pub mod stations;

pub use stations::{FetchRequest, StationsClient, StationsError, DEFAULT_API_URL};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A bike-share docking station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Display name of the station
    #[serde(default)]
    pub name: String,
    /// Operator station code, when the backend includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stationcode: Option<String>,
    /// Number of available e-bikes
    #[serde(default)]
    pub ebike: Option<u32>,
    /// Number of available mechanical bikes
    #[serde(default)]
    pub mechanical: Option<u32>,
    /// Total number of docks
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Whether the station is physically installed
    #[serde(default)]
    pub is_installed: bool,
    /// Whether the station currently rents bikes
    #[serde(default)]
    pub is_renting: bool,
    /// Whether the station currently accepts returns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_returning: Option<bool>,
    /// Individual bikes docked at the station
    #[serde(default)]
    pub bikes: Option<Vec<Bike>>,
    /// Geographic position
    #[serde(default)]
    pub coordonnees_geo: Option<GeoPoint>,
}

/// Whether a station can be used right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationStatus {
    /// Installed and renting
    Active,
    /// Anything else
    Inactive,
}

impl StationStatus {
    /// Label shown in the table and the detail view
    pub fn label(self) -> &'static str {
        match self {
            StationStatus::Active => "Active",
            StationStatus::Inactive => "Inactive",
        }
    }
}

impl Station {
    /// A station is active only when it is both installed and renting
    pub fn is_active(&self) -> bool {
        self.is_installed && self.is_renting
    }

    pub fn status(&self) -> StationStatus {
        if self.is_active() {
            StationStatus::Active
        } else {
            StationStatus::Inactive
        }
    }

    pub fn ebike_count(&self) -> u32 {
        self.ebike.unwrap_or(0)
    }

    pub fn mechanical_count(&self) -> u32 {
        self.mechanical.unwrap_or(0)
    }

    pub fn capacity_or_zero(&self) -> u32 {
        self.capacity.unwrap_or(0)
    }

    /// E-bikes plus mechanical bikes currently available
    pub fn available_bikes(&self) -> u32 {
        self.ebike_count().saturating_add(self.mechanical_count())
    }

    /// Bike records, empty when the backend sent none
    pub fn bikes(&self) -> &[Bike] {
        self.bikes.as_deref().unwrap_or(&[])
    }

    /// Splits the bike records by type, keeping their relative order.
    ///
    /// Bikes whose type is neither "E-Bike" nor "Mechanical" are left out.
    pub fn partition_bikes(&self) -> BikePartition<'_> {
        let mut partition = BikePartition::default();
        for bike in self.bikes() {
            match bike.kind() {
                Some(BikeKind::EBike) => partition.ebikes.push(bike),
                Some(BikeKind::Mechanical) => partition.mechanical.push(bike),
                None => {}
            }
        }
        partition
    }
}

/// Bikes of a station split by type
#[derive(Debug, Default, PartialEq)]
pub struct BikePartition<'a> {
    pub ebikes: Vec<&'a Bike>,
    pub mechanical: Vec<&'a Bike>,
}

/// A single bike docked at a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bike {
    /// Raw type string from the backend ("E-Bike" or "Mechanical")
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Bike identifier
    pub number: BikeNumber,
    /// Free-form status text
    #[serde(default)]
    pub status: String,
}

/// The two bike categories tracked per station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BikeKind {
    EBike,
    Mechanical,
}

impl BikeKind {
    /// Exact, case-sensitive match on the backend's type string
    pub fn from_type(kind: &str) -> Option<Self> {
        match kind {
            "E-Bike" => Some(BikeKind::EBike),
            "Mechanical" => Some(BikeKind::Mechanical),
            _ => None,
        }
    }
}

impl Bike {
    pub fn kind(&self) -> Option<BikeKind> {
        BikeKind::from_type(&self.kind)
    }
}

/// Bike identifier, which the backend sends either as a number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BikeNumber {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for BikeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BikeNumber::Number(n) => write!(f, "{}", n),
            BikeNumber::Text(s) => f.write_str(s),
        }
    }
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}
