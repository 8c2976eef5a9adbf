use super::*;
use chumsky::{error::SimpleReason, prelude::*, text::whitespace};
use itertools::Itertools;

#[derive(Debug, Snafu)]
#[snafu(display("cannot parse '{input}' - {}", self.combine_errors("\n")))]
pub struct ParseError {
    input: String,
    errors: Vec<Simple<char>>,
}

impl ParseError {
    fn combine_errors(&self, separator: &str) -> String {
        self.errors
            .iter()
            .map(|err| {
                format!(
                    "{}:\n   {}",
                    err,
                    match err.reason() {
                        SimpleReason::Custom(msg) => format!("error {}", msg),
                        SimpleReason::Unexpected => "unexpected input".to_string(),
                        SimpleReason::Unclosed { span, delimiter } => {
                            format!(
                                "unclosed delimiter ({}..{}) in {}",
                                span.start, span.end, delimiter
                            )
                        }
                    }
                )
            })
            .join(separator)
    }
}

pub fn parse(input: &str) -> Result<Action, ParseError> {
    let action = program().parse(input).map_err(|errors| ParseError {
        input: input.to_string(),
        errors,
    })?;

    Ok(action)
}

fn program() -> impl Parser<char, Action, Error = Simple<char>> {
    choice((
        action_browse(),
        action_list(),
        action_featured(),
        action_categories(),
        action_profile(),
        action_favorite(),
        action_open(),
        action_lessons(),
        action_select(),
        action_progress(),
        action_complete(),
        action_restart(),
        action_exit(),
    ))
    .then_ignore(end())
}

fn action_browse() -> impl Parser<char, Action, Error = Simple<char>> {
    just("browse")
        .ignore_then(
            whitespace()
                .at_least(1)
                .ignore_then(query_content())
                .or_not(),
        )
        .map(|query| Action::Browse {
            query: query.unwrap_or_default(),
        })
}

fn action_list() -> impl Parser<char, Action, Error = Simple<char>> {
    just("list").to(Action::Browse {
        query: CourseQuery::default(),
    })
}

fn action_featured() -> impl Parser<char, Action, Error = Simple<char>> {
    just("featured").to(Action::Featured)
}

fn action_categories() -> impl Parser<char, Action, Error = Simple<char>> {
    just("categories").to(Action::Categories)
}

fn action_profile() -> impl Parser<char, Action, Error = Simple<char>> {
    just("profile").to(Action::Profile)
}

fn action_favorite() -> impl Parser<char, Action, Error = Simple<char>> {
    just("favorite")
        .then_ignore(whitespace().at_least(1))
        .ignore_then(course_descriptor())
        .map(|course_id| Action::Favorite { course_id })
}

fn action_open() -> impl Parser<char, Action, Error = Simple<char>> {
    just("open")
        .then_ignore(whitespace().at_least(1))
        .ignore_then(course_descriptor())
        .map(|course_id| Action::Open { course_id })
}

fn action_lessons() -> impl Parser<char, Action, Error = Simple<char>> {
    just("lessons").to(Action::Lessons)
}

fn action_select() -> impl Parser<char, Action, Error = Simple<char>> {
    just("select")
        .then_ignore(whitespace().at_least(1))
        .ignore_then(lesson_descriptor())
        .map(|lesson_id| Action::Select { lesson_id })
}

fn action_progress() -> impl Parser<char, Action, Error = Simple<char>> {
    just("progress")
        .then_ignore(whitespace().at_least(1))
        .ignore_then(seconds())
        .then_ignore(whitespace().at_least(1))
        .then(seconds())
        .map(|(current_time, total_duration)| Action::Progress {
            current_time,
            total_duration,
        })
}

fn action_complete() -> impl Parser<char, Action, Error = Simple<char>> {
    just("complete").to(Action::Complete)
}

fn action_restart() -> impl Parser<char, Action, Error = Simple<char>> {
    just("restart").to(Action::Restart)
}

fn action_exit() -> impl Parser<char, Action, Error = Simple<char>> {
    choice((just("exit"), just("quit"))).to(Action::Exit)
}

fn course_descriptor() -> impl Parser<char, CourseId, Error = Simple<char>> {
    filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .try_map(|chars, span| {
            chars
                .into_iter()
                .collect::<String>()
                .parse()
                .map_err(|_| Simple::custom(span, "invalid course id"))
        })
}

fn lesson_descriptor() -> impl Parser<char, LessonId, Error = Simple<char>> {
    filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .try_map(|chars, span| {
            chars
                .into_iter()
                .collect::<String>()
                .parse()
                .map_err(|_| Simple::custom(span, "invalid lesson id"))
        })
}

fn seconds() -> impl Parser<char, u32, Error = Simple<char>> {
    text::int(10).try_map(|digits: String, span| {
        digits
            .parse()
            .map_err(|_| Simple::custom(span, "invalid number of seconds"))
    })
}

fn query_content() -> impl Parser<char, CourseQuery, Error = Simple<char>> {
    take_until(end()).try_map(|(chars, _), span| {
        let text: String = chars.into_iter().collect();
        serde_json::from_str(&text)
            .map_err(|source| Simple::custom(span, format!("invalid query: {}", source)))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::query::{LevelFilter, SortKey};

    use super::*;

    #[test]
    fn test_grammar() {
        let action = program().parse("favorite 3").unwrap();

        assert_eq!(
            action,
            Action::Favorite {
                course_id: "3".parse().unwrap()
            }
        );
    }

    #[test]
    fn bare_browse_uses_the_default_query() {
        let action = program().parse("browse").unwrap();

        assert_eq!(
            action,
            Action::Browse {
                query: CourseQuery::default()
            }
        );
    }

    #[test]
    fn parse_query_content() {
        let query = query_content()
            .parse(
                json!({
                    "search": "react",
                    "level": "Advanced",
                    "sort": "rating"
                })
                .to_string(),
            )
            .unwrap();

        assert_eq!(query.search, "react");
        assert_eq!(query.level, LevelFilter::Only(crate::model::Level::Advanced));
        assert_eq!(query.sort, SortKey::Rating);
    }

    #[test]
    fn parse_playback_commands() {
        assert_eq!(
            program().parse("progress 900 1800").unwrap(),
            Action::Progress {
                current_time: 900,
                total_duration: 1800
            }
        );
        assert_eq!(program().parse("complete").unwrap(), Action::Complete);
        assert_eq!(
            program().parse("select 2").unwrap(),
            Action::Select {
                lesson_id: "2".parse().unwrap()
            }
        );
    }

    #[test]
    fn parse_session_commands() {
        assert_eq!(
            program().parse("open 1").unwrap(),
            Action::Open {
                course_id: "1".parse().unwrap()
            }
        );
        assert_eq!(program().parse("lessons").unwrap(), Action::Lessons);
    }

    #[test]
    fn exit_has_an_alias() {
        assert_eq!(program().parse("exit").unwrap(), Action::Exit);
        assert_eq!(program().parse("quit").unwrap(), Action::Exit);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(program().parse("frobnicate").is_err());
        assert!(parse("progress nine hundred").is_err());
    }
}
