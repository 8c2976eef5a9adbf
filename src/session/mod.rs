//! One viewer's playback session over a single course: the current lesson,
//! the playback callbacks, and the cancellable auto-advance timer that moves
//! to the next lesson after a completion.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use snafu::{ensure, Snafu};
use tokio::select;
use tokio::sync::oneshot;
use tracing::instrument;

use crate::catalog::{Catalog, CatalogError, LessonUpdate};
use crate::model::{Course, CourseId, Lesson, LessonId};
use crate::progress;

#[derive(Debug, Snafu)]
pub enum SessionError {
    #[snafu(transparent)]
    Catalog { source: CatalogError },

    #[snafu(display("lesson `{lesson}` does not belong to course `{course}`"))]
    ForeignLesson { lesson: LessonId, course: CourseId },
}

pub type Result<T, E = SessionError> = std::result::Result<T, E>;

/// Clones share state so the spawned auto-advance task can move the current
/// lesson once its delay elapses.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    course_id: CourseId,
    advance_delay: Duration,
    current: Arc<RwLock<Option<LessonId>>>,
    pending: Arc<Mutex<Option<PendingAdvance>>>,
}

impl Session {
    /// Open a course, resuming at the first unfinished lesson (or the first
    /// lesson of an entirely finished course).
    #[instrument(skip(catalog))]
    pub fn open(catalog: Catalog, course_id: CourseId, advance_delay: Duration) -> Result<Session> {
        catalog.course(&course_id)?;

        let lessons = catalog.lessons_of(&course_id);
        let current = progress::select_current(&lessons).map(|lesson| lesson.id.clone());
        tracing::info!(course = %course_id, current = ?current, "opened course session");

        Ok(Session {
            catalog,
            course_id,
            advance_delay,
            current: Arc::new(RwLock::new(current)),
            pending: Arc::new(Mutex::new(None)),
        })
    }

    pub fn course(&self) -> Result<Course> {
        Ok(self.catalog.course(&self.course_id)?)
    }

    /// This course's lessons, ordered by `order`.
    pub fn lessons(&self) -> Vec<Lesson> {
        self.catalog.lessons_of(&self.course_id)
    }

    pub fn current_id(&self) -> Option<LessonId> {
        self.current.read().expect("session lock poisoned").clone()
    }

    pub fn current(&self) -> Option<Lesson> {
        let id = self.current_id()?;
        self.catalog.lesson(&id).ok()
    }

    /// Switch playback to another lesson of this course, superseding any
    /// pending auto-advance.
    #[instrument(skip(self))]
    pub fn select_lesson(&self, id: &LessonId) -> Result<Lesson> {
        let lesson = self.catalog.lesson(id)?;
        ensure!(
            lesson.course_id == self.course_id,
            ForeignLessonSnafu {
                lesson: id.clone(),
                course: self.course_id.clone(),
            }
        );

        self.cancel_pending();
        *self.current.write().expect("session lock poisoned") = Some(lesson.id.clone());
        tracing::info!(lesson = %id, "selected lesson");

        Ok(lesson)
    }

    /// Playback progress sample for the current lesson. Samples arriving
    /// while nothing is playing are dropped.
    pub fn record_progress(
        &self,
        current_time: u32,
        total_duration: u32,
    ) -> Result<Option<LessonUpdate>> {
        let Some(id) = self.current_id() else {
            return Ok(None);
        };

        let update = self.catalog.record_progress(&id, current_time, total_duration)?;
        Ok(Some(update))
    }

    /// Natural end of the current video: mark the lesson done and schedule the
    /// next one (by `order`) to start after the configured delay. The last
    /// lesson of a course completes without scheduling anything.
    #[instrument(skip(self))]
    pub fn complete_current(&self) -> Result<Option<Completion>> {
        let Some(id) = self.current_id() else {
            return Ok(None);
        };

        let update = self.catalog.record_completion(&id)?;

        let lessons = self.lessons();
        let next = progress::next_after(&lessons, &id).map(|lesson| lesson.id.clone());
        match &next {
            Some(next_id) => self.schedule_advance(next_id.clone()),
            None => tracing::info!(course = %self.course_id, "course finished, nothing to advance to"),
        }

        Ok(Some(Completion { update, next }))
    }

    /// Cancel any pending auto-advance. Called when the viewer navigates
    /// away.
    pub fn close(&self) {
        self.cancel_pending();
    }

    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    fn schedule_advance(&self, next: LessonId) {
        let (stop, mut stopped) = oneshot::channel();
        let session = self.clone();
        let target = next.clone();
        let delay = self.advance_delay;

        let handle = tokio::spawn(async move {
            select! {
                _ = &mut stopped => {
                    tracing::debug!(lesson = %target, "auto-advance cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    tracing::info!(lesson = %target, "auto-advancing to next lesson");
                    *session.current.write().expect("session lock poisoned") = Some(target);
                    session.pending.lock().expect("session lock poisoned").take();
                }
            }
        });

        let replaced = self
            .pending
            .lock()
            .expect("session lock poisoned")
            .replace(PendingAdvance { _handle: handle, stop });

        if let Some(previous) = replaced {
            previous.cancel();
        }
    }

    fn cancel_pending(&self) {
        if let Some(pending) = self.pending.lock().expect("session lock poisoned").take() {
            pending.cancel();
        }
    }
}

/// At most one scheduled advance exists per session; it fires once or not at
/// all.
#[derive(Debug)]
struct PendingAdvance {
    _handle: tokio::task::JoinHandle<()>,
    stop: oneshot::Sender<()>,
}

impl PendingAdvance {
    fn cancel(self) {
        // the task may have fired already, a dead receiver is fine
        let _ = self.stop.send(());
    }
}

/// Outcome of `complete_current`: the applied update plus the lesson that
/// will become current once the delay elapses.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub update: LessonUpdate,
    pub next: Option<LessonId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(50);

    fn course_id(id: &str) -> CourseId {
        CourseId::new(id.to_string())
    }

    fn lesson_id(id: &str) -> LessonId {
        LessonId::new(id.to_string())
    }

    fn open_react_course() -> Session {
        Session::open(Catalog::seeded(), course_id("1"), DELAY).unwrap()
    }

    async fn past_the_delay() {
        tokio::time::sleep(DELAY * 4).await;
    }

    #[tokio::test]
    async fn opening_resumes_at_first_unfinished_lesson() {
        let session = open_react_course();

        // seeded lessons 1 and 2 are done, 3 is not
        assert_eq!(session.current_id(), Some(lesson_id("3")));
    }

    #[tokio::test]
    async fn opening_an_unknown_course_fails() {
        let result = Session::open(Catalog::seeded(), course_id("missing"), DELAY);

        assert!(matches!(
            result,
            Err(SessionError::Catalog {
                source: CatalogError::CourseNotFound { .. }
            })
        ));
    }

    #[tokio::test]
    async fn lessons_of_other_courses_cannot_be_selected() {
        let catalog = Catalog::seeded();
        let session = Session::open(catalog, course_id("2"), DELAY).unwrap();

        let result = session.select_lesson(&lesson_id("1"));

        assert!(matches!(result, Err(SessionError::ForeignLesson { .. })));
    }

    #[tokio::test]
    async fn completion_advances_after_the_delay() {
        let session = open_react_course();
        session.select_lesson(&lesson_id("1")).unwrap();

        let completion = session.complete_current().unwrap().unwrap();
        assert_eq!(completion.next, Some(lesson_id("2")));
        assert_eq!(session.current_id(), Some(lesson_id("1")), "advance is delayed");

        past_the_delay().await;
        assert_eq!(session.current_id(), Some(lesson_id("2")));
    }

    #[tokio::test]
    async fn selecting_a_lesson_supersedes_the_pending_advance() {
        let session = open_react_course();
        session.select_lesson(&lesson_id("1")).unwrap();
        session.complete_current().unwrap();

        session.select_lesson(&lesson_id("3")).unwrap();

        past_the_delay().await;
        assert_eq!(session.current_id(), Some(lesson_id("3")));
    }

    #[tokio::test]
    async fn closing_cancels_the_pending_advance() {
        let session = open_react_course();
        session.select_lesson(&lesson_id("1")).unwrap();
        session.complete_current().unwrap();

        session.close();

        past_the_delay().await;
        assert_eq!(session.current_id(), Some(lesson_id("1")));
    }

    #[tokio::test]
    async fn last_lesson_completes_without_scheduling() {
        let session = open_react_course();
        // lesson 3 is the last one
        assert_eq!(session.current_id(), Some(lesson_id("3")));

        let completion = session.complete_current().unwrap().unwrap();
        assert_eq!(completion.next, None);
        assert_eq!(completion.update.completed_lessons, 3);

        past_the_delay().await;
        assert_eq!(session.current_id(), Some(lesson_id("3")), "playback stops in place");
    }

    #[tokio::test]
    async fn progress_samples_update_the_store() {
        let session = open_react_course();

        let update = session.record_progress(300, 2100).unwrap().unwrap();
        assert_eq!(update.lesson.watched_time, 300);

        let update = session.record_progress(1900, 2100).unwrap().unwrap();
        assert_eq!(update.completed_lessons, 3);
    }
}
