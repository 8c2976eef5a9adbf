use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Denormalized number of catalogue entries in this category. Seeded once,
    /// never recomputed.
    pub course_count: u32,
}
