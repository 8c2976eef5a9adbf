//! Watch-progress state machine for a single lesson, plus the course-level
//! rollup and lesson-selection policies built on top of it.

use snafu::{ensure, Snafu};

use crate::model::{Lesson, LessonId};

/// Fraction of the video that must be watched before the lesson counts as
/// done.
pub const COMPLETION_THRESHOLD: f64 = 0.9;

/// A lesson is either still being watched or done. `Completed` is terminal;
/// there is no un-complete transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonState {
    InProgress,
    Completed,
}

impl LessonState {
    pub fn of(lesson: &Lesson) -> LessonState {
        if lesson.is_completed {
            LessonState::Completed
        } else {
            LessonState::InProgress
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ProgressError {
    /// playback reported a zero-length duration, progress would be undefined
    #[snafu(display("cannot record progress against a zero-length duration"))]
    ZeroDuration,
}

/// Apply a playback sample `(current_time, total_duration)` to a lesson.
///
/// Watched time follows the sample, clamped into `0..=total_duration`. Once
/// the sample passes [COMPLETION_THRESHOLD] the lesson flips to `Completed`
/// and its watched time is pinned to the full duration; later samples no
/// longer move it.
pub fn record_progress(
    lesson: &mut Lesson,
    current_time: u32,
    total_duration: u32,
) -> Result<LessonState, ProgressError> {
    ensure!(total_duration > 0, ZeroDurationSnafu);

    if lesson.is_completed {
        return Ok(LessonState::Completed);
    }

    lesson.watched_time = current_time.min(total_duration);

    if f64::from(current_time) / f64::from(total_duration) >= COMPLETION_THRESHOLD {
        lesson.is_completed = true;
        lesson.watched_time = total_duration;
    }

    Ok(LessonState::of(lesson))
}

/// Unconditionally mark a lesson as done, e.g. on the natural end of its
/// video. Watched time is pinned to the lesson's own duration.
pub fn record_completion(lesson: &mut Lesson) -> Result<LessonState, ProgressError> {
    ensure!(lesson.duration > 0, ZeroDurationSnafu);

    lesson.is_completed = true;
    lesson.watched_time = lesson.duration;

    Ok(LessonState::Completed)
}

/// Course rollup input: how many of these lessons are done. Always recomputed
/// from the records themselves so the count cannot drift.
pub fn completed_count(lessons: &[Lesson]) -> u32 {
    lessons.iter().filter(|lesson| lesson.is_completed).count() as u32
}

/// Lesson to resume on course entry. Expects `lessons` ordered by `order`:
/// the first unfinished lesson wins, an entirely finished course restarts at
/// the first lesson, an empty course has nothing to play.
pub fn select_current(lessons: &[Lesson]) -> Option<&Lesson> {
    lessons
        .iter()
        .find(|lesson| !lesson.is_completed)
        .or_else(|| lessons.first())
}

/// The lesson following `current` in `order`, if any.
pub fn next_after<'a>(lessons: &'a [Lesson], current: &LessonId) -> Option<&'a Lesson> {
    let index = lessons.iter().position(|lesson| &lesson.id == current)?;
    lessons.get(index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CourseId, LessonId};

    fn lesson(order: u32, duration: u32, is_completed: bool) -> Lesson {
        Lesson {
            id: LessonId::new(order.to_string()),
            course_id: CourseId::new("course".to_string()),
            title: format!("Lesson {order}"),
            description: String::new(),
            video_url: String::new(),
            duration,
            order,
            is_completed,
            watched_time: if is_completed { duration } else { 0 },
            resources: Vec::new(),
            transcript: None,
        }
    }

    #[test]
    fn sample_below_threshold_stays_in_progress() {
        let mut lesson = lesson(1, 1800, false);

        let state = record_progress(&mut lesson, 900, 1800).unwrap();

        assert_eq!(state, LessonState::InProgress);
        assert_eq!(lesson.watched_time, 900);
        assert!(!lesson.is_completed);
    }

    #[test]
    fn sample_at_threshold_completes_and_clamps() {
        let mut lesson = lesson(1, 1800, false);

        // 1650 / 1800 = 0.9167
        let state = record_progress(&mut lesson, 1650, 1800).unwrap();

        assert_eq!(state, LessonState::Completed);
        assert_eq!(lesson.watched_time, 1800);
    }

    #[test]
    fn exact_ninety_percent_completes() {
        let mut lesson = lesson(1, 1000, false);

        let state = record_progress(&mut lesson, 900, 1000).unwrap();

        assert_eq!(state, LessonState::Completed);
    }

    #[test]
    fn sample_beyond_duration_is_clamped() {
        let mut lesson = lesson(1, 100, false);

        record_progress(&mut lesson, 250, 100).unwrap();

        assert_eq!(lesson.watched_time, 100);
        assert!(lesson.is_completed);
    }

    #[test]
    fn completed_is_terminal() {
        let mut lesson = lesson(1, 1800, false);
        record_completion(&mut lesson).unwrap();

        let state = record_progress(&mut lesson, 42, 1800).unwrap();

        assert_eq!(state, LessonState::Completed);
        assert_eq!(lesson.watched_time, 1800, "watched time stays pinned");
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut broken = lesson(1, 0, false);

        assert_eq!(
            record_progress(&mut broken, 10, 0),
            Err(ProgressError::ZeroDuration)
        );
        assert_eq!(record_completion(&mut broken), Err(ProgressError::ZeroDuration));
        assert_eq!(broken.watched_time, 0, "rejected updates must not apply");
    }

    #[test]
    fn completion_pins_watched_time() {
        let mut lesson = lesson(1, 1200, false);

        let state = record_completion(&mut lesson).unwrap();

        assert_eq!(state, LessonState::Completed);
        assert_eq!(lesson.watched_time, 1200);
    }

    #[test]
    fn resume_at_first_unfinished_lesson() {
        let lessons = vec![lesson(1, 60, true), lesson(2, 60, false), lesson(3, 60, false)];

        let current = select_current(&lessons).unwrap();

        assert_eq!(current.order, 2);
    }

    #[test]
    fn finished_course_restarts_at_first_lesson() {
        let lessons = vec![lesson(1, 60, true), lesson(2, 60, true)];

        assert_eq!(select_current(&lessons).unwrap().order, 1);
    }

    #[test]
    fn empty_course_has_no_current_lesson() {
        assert!(select_current(&[]).is_none());
    }

    #[test]
    fn next_after_walks_the_order() {
        let lessons = vec![lesson(1, 60, true), lesson(2, 60, false), lesson(3, 60, false)];

        let next = next_after(&lessons, &lessons[1].id).unwrap();
        assert_eq!(next.order, 3);

        assert!(next_after(&lessons, &lessons[2].id).is_none());
    }

    #[test]
    fn rollup_counts_completed_records() {
        let lessons = vec![lesson(1, 60, true), lesson(2, 60, true), lesson(3, 60, false)];

        assert_eq!(completed_count(&lessons), 2);
    }
}
