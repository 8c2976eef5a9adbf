//! Interactive front end: the dashboard commands drive the query engine,
//! the player commands drive a course session.

use std::time::Duration;

use itertools::Itertools;
use rustyline::{history::MemHistory, Editor};
use snafu::{ResultExt, Snafu};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::model::{Course, CourseId, Lesson, LessonId};
use crate::query::{self, CourseQuery};
use crate::session::Session;

mod parse;

pub struct Repl {
    inner: Editor<(), MemHistory>,
    message: Option<String>,
}

impl Repl {
    pub fn new() -> Result<Self, ReplError> {
        let config = rustyline::Config::default();
        let inner =
            rustyline::Editor::with_history(config, MemHistory::new()).context(RustylineSnafu)?;

        let repl = Self {
            inner,
            message: None,
        };
        Ok(repl)
    }

    pub async fn prompt(&mut self) -> Action {
        let message = self
            .message
            .as_ref()
            .map(|msg| format!("  {msg}\n"))
            .unwrap_or_default();
        let prompt = format!("{}sensei> ", message);

        let Ok(input) = self.inner.readline(&prompt) else {
            return Action::Exit;
        };

        self.message = None;

        self.inner.add_history_entry(input.clone()).ok();

        match parse::parse(&input) {
            Ok(action) => action,
            Err(err) => {
                self.reply(err.to_string());
                Action::None
            }
        }
    }

    pub fn reply(&mut self, message: String) {
        if let Some(msg) = self.message.as_mut() {
            msg.push('\n');
            msg.push_str(&message);
        } else {
            self.message = Some(message);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Action {
    /// Dashboard view with search/filter/sort state.
    Browse { query: CourseQuery },
    Featured,
    Categories,
    Profile,
    Favorite { course_id: CourseId },
    Open { course_id: CourseId },
    Lessons,
    Select { lesson_id: LessonId },
    Progress { current_time: u32, total_duration: u32 },
    Complete,
    Restart,
    Exit,
    None,
}

#[derive(Debug, Snafu)]
pub enum ReplError {
    #[snafu(display("failed to initialize REPL: {}", source))]
    Rustyline {
        source: rustyline::error::ReadlineError,
    },
}

const NO_SESSION: &str = "no course is open, try `open <course-id>` first";

pub async fn start(repl: &mut Repl, config: Config) -> Result<(), ReplError> {
    tracing::info!("starting REPL");

    let mut catalog = Catalog::seeded();
    let mut session: Option<Session> = None;

    loop {
        match repl.prompt().await {
            Action::Exit => break,
            Action::Restart => {
                if let Some(session) = session.take() {
                    session.close();
                }
                catalog = Catalog::seeded();
                repl.reply("catalogue reseeded, session state cleared".to_string());
            }
            Action::Browse { query } => {
                let courses = query::query(&catalog.courses(), &query);
                if courses.is_empty() {
                    repl.reply("no courses match".to_string());
                } else {
                    repl.reply(render_courses(&courses));
                }
            }
            Action::Featured => {
                let featured = query::featured(&catalog.courses(), config.featured_count);
                repl.reply(render_courses(&featured));
            }
            Action::Categories => {
                let categories = catalog
                    .categories()
                    .iter()
                    .map(|category| format!("  {} ({} courses)", category.name, category.course_count))
                    .join("\n");

                repl.reply(categories);
            }
            Action::Profile => {
                let user = catalog.user();
                repl.reply(format!(
                    "{} <{}> — {} plan, member since {}",
                    user.name,
                    user.email,
                    user.subscription,
                    user.joined_at.format("%Y-%m-%d"),
                ));
            }
            Action::Favorite { course_id } => match catalog.toggle_favorite(&course_id) {
                Ok(course) => repl.reply(format!(
                    "`{}` is {} a favorite",
                    course.title,
                    if course.is_favorite { "now" } else { "no longer" },
                )),
                Err(err) => repl.reply(err.to_string()),
            },
            Action::Open { course_id } => {
                if let Some(previous) = session.take() {
                    previous.close();
                }

                match Session::open(catalog.clone(), course_id, config.advance_delay()) {
                    Ok(opened) => {
                        repl.reply(render_session(&opened));
                        session = Some(opened);
                    }
                    Err(err) => repl.reply(err.to_string()),
                }
            }
            Action::Lessons => match &session {
                Some(session) => repl.reply(render_lessons(session)),
                None => repl.reply(NO_SESSION.to_string()),
            },
            Action::Select { lesson_id } => match &session {
                Some(session) => match session.select_lesson(&lesson_id) {
                    Ok(lesson) => repl.reply(format!("now playing: {}. {}", lesson.order, lesson.title)),
                    Err(err) => repl.reply(err.to_string()),
                },
                None => repl.reply(NO_SESSION.to_string()),
            },
            Action::Progress {
                current_time,
                total_duration,
            } => match &session {
                Some(session) => match session.record_progress(current_time, total_duration) {
                    Ok(Some(update)) => repl.reply(format!(
                        "{}: watched {} of {} ({} of the course done)",
                        update.lesson.title,
                        seconds(update.lesson.watched_time),
                        seconds(update.lesson.duration),
                        update.completed_lessons,
                    )),
                    Ok(None) => repl.reply("no lesson is playing".to_string()),
                    Err(err) => repl.reply(err.to_string()),
                },
                None => repl.reply(NO_SESSION.to_string()),
            },
            Action::Complete => match &session {
                Some(session) => match session.complete_current() {
                    Ok(Some(completion)) => match completion.next {
                        Some(next) => repl.reply(format!(
                            "lesson done — next lesson `{next}` starts in {}",
                            humantime::format_duration(session.advance_delay()),
                        )),
                        None => repl.reply("lesson done — course finished".to_string()),
                    },
                    Ok(None) => repl.reply("no lesson is playing".to_string()),
                    Err(err) => repl.reply(err.to_string()),
                },
                None => repl.reply(NO_SESSION.to_string()),
            },
            Action::None => continue,
        }
    }

    if let Some(session) = session.take() {
        session.close();
    }

    Ok(())
}

fn render_courses(courses: &[Course]) -> String {
    courses.iter().map(render_course).join("\n")
}

fn render_course(course: &Course) -> String {
    let favorite = if course.is_favorite { "★" } else { " " };

    format!(
        "{favorite} [{}] {} — {} · {} · {:.1}☆ · {:.0}% of {} lessons · {} · {}",
        course.id,
        course.title,
        course.category,
        course.level,
        course.rating,
        course.progress_percent(),
        course.total_lessons,
        minutes(course.duration),
        course.status(),
    )
}

fn render_session(session: &Session) -> String {
    let Ok(course) = session.course() else {
        return "course not found".to_string();
    };

    let header = format!(
        "{} by {} ({}, {:.1}☆)",
        course.title, course.instructor, course.level, course.rating,
    );

    format!("{header}\n{}", render_lessons(session))
}

fn render_lessons(session: &Session) -> String {
    let current = session.current_id();
    let lessons = session.lessons();

    if lessons.is_empty() {
        return "this course has no lessons".to_string();
    }

    lessons.iter().map(|lesson| render_lesson(lesson, &current)).join("\n")
}

fn render_lesson(lesson: &Lesson, current: &Option<LessonId>) -> String {
    let playing = if current.as_ref() == Some(&lesson.id) { "▶" } else { " " };
    let done = if lesson.is_completed { "✓" } else { " " };

    format!(
        "{playing}{done} {:>2}. [{}] {} ({})",
        lesson.order,
        lesson.id,
        lesson.title,
        seconds(lesson.duration),
    )
}

fn seconds(value: u32) -> String {
    humantime::format_duration(Duration::from_secs(u64::from(value))).to_string()
}

fn minutes(value: u32) -> String {
    humantime::format_duration(Duration::from_secs(u64::from(value) * 60)).to_string()
}
