// ABOUTME: Progress photo model with pose tag and body measurements
// ABOUTME: ProgressPhoto and the closed Pose enumeration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Photo angle tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pose {
    /// Facing the camera
    Front,
    /// Back to the camera
    Back,
    /// Side profile
    Side,
}

impl Pose {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Side => "side",
        }
    }
}

impl Display for Pose {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Pose {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            "side" => Ok(Self::Side),
            _ => Err(AppError::invalid_input(format!(
                "Invalid pose: {s} (expected front, back or side)"
            ))),
        }
    }
}

/// A progress photo with optional body measurements
///
/// The binary payload lives in external object storage; the row stores only
/// the storage key, the public URL and the metadata. The week number is
/// user-assigned, not derived from the date. Measurements are in cm except
/// `weight` which is in kg; each is independently nullable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressPhoto {
    /// Surrogate primary key
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Object storage key
    pub file_key: String,
    /// Public URL of the stored object
    pub url: String,
    /// Photo angle
    pub pose: Pose,
    /// User-assigned week number
    pub week: i32,
    /// When the photo was taken
    pub date: DateTime<Utc>,
    /// Optional notes
    pub notes: Option<String>,
    /// Body weight in kg
    pub weight: Option<i32>,
    /// Chest circumference in cm
    pub chest: Option<i32>,
    /// Waist circumference in cm
    pub waist: Option<i32>,
    /// Hips circumference in cm
    pub hips: Option<i32>,
    /// Left arm circumference in cm
    pub left_arm: Option<i32>,
    /// Right arm circumference in cm
    pub right_arm: Option<i32>,
    /// Left thigh circumference in cm
    pub left_thigh: Option<i32>,
    /// Right thigh circumference in cm
    pub right_thigh: Option<i32>,
    /// Left calf circumference in cm
    pub left_calf: Option<i32>,
    /// Right calf circumference in cm
    pub right_calf: Option<i32>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
