use serde::{Deserialize, Serialize};
use snafu::Snafu;

use super::{CourseId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    /// Total runtime in minutes.
    pub duration: u32,
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub category: String,
    pub level: Level,
    pub instructor: String,
    pub rating: f64,
    pub is_favorite: bool,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Course {
    pub fn is_completed(&self) -> bool {
        self.completed_lessons == self.total_lessons
    }

    pub fn is_started(&self) -> bool {
        self.completed_lessons > 0
    }

    /// Completion bucket for display. Filtering uses the underlying predicates
    /// directly, see [crate::query::StatusFilter].
    pub fn status(&self) -> CourseStatus {
        if self.is_completed() {
            CourseStatus::Completed
        } else if self.is_started() {
            CourseStatus::InProgress
        } else {
            CourseStatus::NotStarted
        }
    }

    /// Completion percentage in `0.0..=100.0`. A course without lessons sits
    /// at 0%, never a division by zero.
    pub fn progress_percent(&self) -> f64 {
        if self.total_lessons == 0 {
            return 0.0;
        }

        f64::from(self.completed_lessons) / f64::from(self.total_lessons) * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::str::FromStr for Level {
    type Err = ParseLevel;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "Beginner" => Ok(Level::Beginner),
            "Intermediate" => Ok(Level::Intermediate),
            "Advanced" => Ok(Level::Advanced),
            _ => Err(ParseLevel {
                text: input.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("Failed to parse course level: {}", text))]
pub struct ParseLevel {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CourseStatus::NotStarted => "not started",
            CourseStatus::InProgress => "in progress",
            CourseStatus::Completed => "completed",
        };
        write!(f, "{name}")
    }
}
