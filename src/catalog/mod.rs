//! Session-scoped catalogue store: the single owner of course and lesson
//! records, seeded once at startup and mutated in place for the lifetime of
//! the process.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use snafu::{OptionExt, Snafu};
use tracing::instrument;

use crate::model::{Category, Course, CourseId, Lesson, LessonId, User};
use crate::progress::{self, LessonState, ProgressError};

mod seed;

#[derive(Debug, Clone, PartialEq, Snafu)]
pub enum CatalogError {
    #[snafu(display("course `{id}` not found"))]
    CourseNotFound { id: CourseId },

    #[snafu(display("lesson `{id}` not found"))]
    LessonNotFound { id: LessonId },

    #[snafu(transparent)]
    Progress { source: ProgressError },
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

/// Handle to the in-memory catalogue. Clones share the same state; reads hand
/// out snapshots so callers never hold the lock, and queries can never mutate
/// the store.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug)]
struct Inner {
    courses: Vec<Course>,
    lessons: Vec<Lesson>,
    categories: Vec<Category>,
    user: User,
}

impl Catalog {
    /// Fresh store holding the built-in sample catalogue.
    pub fn seeded() -> Catalog {
        Catalog {
            inner: Arc::new(RwLock::new(seed::content())),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("catalog lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("catalog lock poisoned")
    }

    /// Every course, in seed order.
    pub fn courses(&self) -> Vec<Course> {
        self.read().courses.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.read().categories.clone()
    }

    pub fn user(&self) -> User {
        self.read().user.clone()
    }

    pub fn course(&self, id: &CourseId) -> Result<Course> {
        self.read()
            .courses
            .iter()
            .find(|course| &course.id == id)
            .cloned()
            .context(CourseNotFoundSnafu { id: id.clone() })
    }

    pub fn lesson(&self, id: &LessonId) -> Result<Lesson> {
        self.read()
            .lessons
            .iter()
            .find(|lesson| &lesson.id == id)
            .cloned()
            .context(LessonNotFoundSnafu { id: id.clone() })
    }

    /// The lessons of one course, ordered by their `order` field. Unknown
    /// courses simply have no lessons.
    pub fn lessons_of(&self, course_id: &CourseId) -> Vec<Lesson> {
        let mut lessons: Vec<Lesson> = self
            .read()
            .lessons
            .iter()
            .filter(|lesson| &lesson.course_id == course_id)
            .cloned()
            .collect();

        lessons.sort_by_key(|lesson| lesson.order);
        lessons
    }

    /// Flip a course's favorite flag. Touches nothing else, in particular not
    /// the lesson counts.
    #[instrument(skip(self))]
    pub fn toggle_favorite(&self, id: &CourseId) -> Result<Course> {
        let mut inner = self.write();
        let course = inner.course_mut(id)?;

        course.is_favorite = !course.is_favorite;
        tracing::info!(course = %id, favorite = course.is_favorite, "toggled favorite");

        Ok(course.clone())
    }

    /// Apply a playback sample to a lesson and recompute the owning course's
    /// rollup. Fully applies or fails as invalid input; there is no partial
    /// update.
    #[instrument(skip(self))]
    pub fn record_progress(
        &self,
        id: &LessonId,
        current_time: u32,
        total_duration: u32,
    ) -> Result<LessonUpdate> {
        let mut inner = self.write();

        let (lesson, state) = {
            let lesson = inner.lesson_mut(id)?;
            let state = progress::record_progress(lesson, current_time, total_duration)?;
            (lesson.clone(), state)
        };

        let completed_lessons = inner.roll_up(&lesson.course_id);
        tracing::debug!(lesson = %id, watched = lesson.watched_time, ?state, "recorded progress");

        Ok(LessonUpdate {
            lesson,
            state,
            completed_lessons,
        })
    }

    /// Mark a lesson as done outright (natural video end) and recompute the
    /// owning course's rollup.
    #[instrument(skip(self))]
    pub fn record_completion(&self, id: &LessonId) -> Result<LessonUpdate> {
        let mut inner = self.write();

        let (lesson, state) = {
            let lesson = inner.lesson_mut(id)?;
            let state = progress::record_completion(lesson)?;
            (lesson.clone(), state)
        };

        let completed_lessons = inner.roll_up(&lesson.course_id);
        tracing::info!(lesson = %id, course = %lesson.course_id, "lesson completed");

        Ok(LessonUpdate {
            lesson,
            state,
            completed_lessons,
        })
    }
}

impl Inner {
    fn course_mut(&mut self, id: &CourseId) -> Result<&mut Course> {
        self.courses
            .iter_mut()
            .find(|course| &course.id == id)
            .context(CourseNotFoundSnafu { id: id.clone() })
    }

    fn lesson_mut(&mut self, id: &LessonId) -> Result<&mut Lesson> {
        self.lessons
            .iter_mut()
            .find(|lesson| &lesson.id == id)
            .context(LessonNotFoundSnafu { id: id.clone() })
    }

    /// Recompute a course's completed-lesson count from its lesson records.
    /// Capped by `total_lessons` so the count invariant holds even against
    /// over-complete seed data.
    fn roll_up(&mut self, course_id: &CourseId) -> u32 {
        let count = self
            .lessons
            .iter()
            .filter(|lesson| &lesson.course_id == course_id && lesson.is_completed)
            .count() as u32;

        if let Some(course) = self.courses.iter_mut().find(|course| &course.id == course_id) {
            course.completed_lessons = count.min(course.total_lessons);
        }

        count
    }
}

/// Result of a progress mutation: the lesson after the transition and the
/// owning course's recomputed rollup.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonUpdate {
    pub lesson: Lesson,
    pub state: LessonState,
    pub completed_lessons: u32,
}
