// ABOUTME: Exercise library models: global seed exercises and user custom exercises
// ABOUTME: Difficulty and MediaType enumerations with database string conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exercise difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Beginner
    Iniciante,
    /// Intermediate
    #[default]
    Intermediario,
    /// Advanced
    Avancado,
}

impl Difficulty {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Iniciante => "iniciante",
            Self::Intermediario => "intermediario",
            Self::Avancado => "avancado",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "iniciante" => Self::Iniciante,
            "avancado" => Self::Avancado,
            _ => Self::Intermediario,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Media type of the demonstration asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Animated GIF demonstration
    Gif,
    /// Static image
    #[default]
    Image,
}

impl MediaType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Image => "image",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "gif" => Self::Gif,
            _ => Self::Image,
        }
    }

    /// Media type implied by a file extension
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("gif") {
            Self::Gif
        } else {
            Self::Image
        }
    }
}

/// A pre-defined exercise in the shared, read-only library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryExercise {
    /// Surrogate primary key
    pub id: i64,
    /// Exercise name, e.g. "Supino Reto"
    pub name: String,
    /// Muscle group, e.g. "Peito", "Costas", "Pernas"
    pub muscle_group: String,
    /// Equipment used, e.g. "Barra", "Halteres", "Máquina"
    pub equipment: Option<String>,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// URL of the demonstration GIF/image
    pub media_url: String,
    /// Media type of the demonstration asset
    pub media_type: MediaType,
    /// How to perform the exercise
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A user-created exercise, never shared with other users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCustomExercise {
    /// Surrogate primary key
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Exercise name
    pub name: String,
    /// Muscle group
    pub muscle_group: String,
    /// Equipment used
    pub equipment: Option<String>,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// URL of the uploaded media, when any
    pub media_url: Option<String>,
    /// Media type of the uploaded asset
    pub media_type: MediaType,
    /// How to perform the exercise
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_defaults_to_intermediate() {
        assert_eq!(Difficulty::parse("unknown"), Difficulty::Intermediario);
        assert_eq!(Difficulty::parse("iniciante"), Difficulty::Iniciante);
    }

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(MediaType::from_extension("gif"), MediaType::Gif);
        assert_eq!(MediaType::from_extension("GIF"), MediaType::Gif);
        assert_eq!(MediaType::from_extension("png"), MediaType::Image);
    }
}
