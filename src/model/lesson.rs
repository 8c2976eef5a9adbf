use serde::{Deserialize, Serialize};

use super::{CourseId, LessonId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
    pub video_url: String,
    /// Runtime in seconds, positive for every real lesson.
    pub duration: u32,
    /// Position within the course, unique per course and ascending.
    pub order: u32,
    pub is_completed: bool,
    /// Seconds of the video already watched. The progress tracker keeps this
    /// within `0..=duration`; raw seed records are not re-validated.
    pub watched_time: u32,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub url: String,
    #[serde(default)]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pdf,
    Link,
    File,
}
