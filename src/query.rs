//! Pure query engine over catalogue snapshots: free-text search, categorical
//! filters with an `All` sentinel, stable comparator-based sorting, and the
//! featured-set selection for the promotional carousel.

use serde::{Deserialize, Serialize};

use crate::model::{Course, Level};

/// Dashboard query state. Defaults match an untouched dashboard: no search,
/// every filter disabled, most recently updated first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub level: LevelFilter,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl CourseQuery {
    pub fn matches(&self, course: &Course) -> bool {
        self.matches_search(course)
            && self.category.matches(course)
            && self.level.matches(course)
            && self.status.matches(course)
    }

    /// Case-insensitive substring match on title, description, instructor, or
    /// any tag. An empty search matches everything.
    fn matches_search(&self, course: &Course) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        course.title.to_lowercase().contains(&needle)
            || course.description.to_lowercase().contains(&needle)
            || course.instructor.to_lowercase().contains(&needle)
            || course.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    fn matches(&self, course: &Course) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => &course.category == name,
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryFilter::All => serializer.serialize_str("All"),
            CategoryFilter::Only(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if name == "All" {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(name))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelFilter {
    #[default]
    All,
    Only(Level),
}

impl LevelFilter {
    fn matches(&self, course: &Course) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Only(level) => course.level == *level,
        }
    }
}

impl Serialize for LevelFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LevelFilter::All => serializer.serialize_str("All"),
            LevelFilter::Only(level) => serializer.serialize_str(&level.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for LevelFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if name == "All" {
            return Ok(LevelFilter::All);
        }

        name.parse()
            .map(LevelFilter::Only)
            .map_err(serde::de::Error::custom)
    }
}

/// Completion bucket filter. Derived from the lesson counts at query time,
/// never stored on the course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    #[serde(alias = "All")]
    All,
    NotStarted,
    InProgress,
    Completed,
}

impl StatusFilter {
    fn matches(&self, course: &Course) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::NotStarted => !course.is_started(),
            StatusFilter::InProgress => course.is_started() && !course.is_completed(),
            StatusFilter::Completed => course.is_completed(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Popular,
    Rating,
    Progress,
    Alphabetical,
    #[default]
    Recent,
}

/// Filter then sort a catalogue snapshot. The input is never mutated; every
/// sort is stable, so ties keep their catalogue order.
pub fn query(courses: &[Course], query: &CourseQuery) -> Vec<Course> {
    let mut matched: Vec<Course> = courses
        .iter()
        .filter(|course| query.matches(course))
        .cloned()
        .collect();

    sort(&mut matched, query.sort);
    matched
}

fn sort(courses: &mut [Course], key: SortKey) {
    match key {
        SortKey::Popular | SortKey::Rating => {
            courses.sort_by(|a, b| b.rating.total_cmp(&a.rating))
        }
        SortKey::Progress => {
            courses.sort_by(|a, b| b.progress_percent().total_cmp(&a.progress_percent()))
        }
        // case-insensitive stand-in for the locale collation a browser gets
        // for free
        SortKey::Alphabetical => {
            courses.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::Recent => courses.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
}

/// Top `n` courses by rating for the hero carousel; ties keep catalogue
/// order, and fewer than `n` courses yield them all.
pub fn featured(courses: &[Course], n: usize) -> Vec<Course> {
    let mut ranked = courses.to_vec();
    ranked.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::CourseId;

    fn sample() -> Vec<Course> {
        Catalog::seeded().courses()
    }

    fn ids(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|course| course.id.as_str()).collect()
    }

    fn search(text: &str) -> CourseQuery {
        CourseQuery {
            search: text.to_string(),
            ..CourseQuery::default()
        }
    }

    #[test]
    fn default_query_returns_everything_most_recent_first() {
        let courses = sample();

        let result = query(&courses, &CourseQuery::default());

        assert_eq!(result.len(), courses.len());
        assert_eq!(ids(&result), vec!["5", "3", "4", "2", "1"]);
    }

    #[test]
    fn rating_sort_is_idempotent() {
        let courses = sample();
        let by_rating = CourseQuery {
            sort: SortKey::Rating,
            ..CourseQuery::default()
        };

        let once = query(&courses, &by_rating);
        let twice = query(&once, &by_rating);

        assert_eq!(once, twice);
    }

    #[test]
    fn rating_ties_keep_catalogue_order() {
        let courses = sample();

        let result = query(
            &courses,
            &CourseQuery {
                sort: SortKey::Rating,
                ..CourseQuery::default()
            },
        );

        // two courses at 4.9 and two at 4.8, each pair in seed order
        assert_eq!(ids(&result), vec!["1", "3", "2", "5", "4"]);
    }

    #[test]
    fn progress_sort_ranks_by_completion_percentage() {
        let result = query(
            &sample(),
            &CourseQuery {
                sort: SortKey::Progress,
                ..CourseQuery::default()
            },
        );

        // 100% > 41.7% > 26.7% > 22.2% > 0%
        assert_eq!(ids(&result), vec!["4", "3", "1", "5", "2"]);
    }

    #[test]
    fn alphabetical_sort_ignores_case() {
        let result = query(
            &sample(),
            &CourseQuery {
                sort: SortKey::Alphabetical,
                ..CourseQuery::default()
            },
        );

        assert_eq!(ids(&result), vec!["2", "5", "4", "3", "1"]);
    }

    #[test]
    fn search_matches_title_and_tags_case_insensitively() {
        let courses = sample();

        let by_title = query(&courses, &search("react"));
        assert_eq!(ids(&by_title), vec!["1"]);

        let by_tag = query(&courses, &search("hooks"));
        assert_eq!(ids(&by_tag), vec!["1"]);

        let by_instructor = query(&courses, &search("roberto"));
        assert_eq!(ids(&by_instructor), vec!["5"]);
    }

    #[test]
    fn search_without_matches_is_empty() {
        assert!(query(&sample(), &search("zzz")).is_empty());
    }

    #[test]
    fn category_and_level_filters_are_exact() {
        let courses = sample();

        let photography = query(
            &courses,
            &CourseQuery {
                category: CategoryFilter::Only("Fotografia".to_string()),
                ..CourseQuery::default()
            },
        );
        assert_eq!(ids(&photography), vec!["5"]);

        let advanced = query(
            &courses,
            &CourseQuery {
                level: LevelFilter::Only(Level::Advanced),
                ..CourseQuery::default()
            },
        );
        assert_eq!(ids(&advanced), vec!["3", "1"]);
    }

    #[test]
    fn status_filter_buckets_are_derived_from_lesson_counts() {
        let courses = sample();

        let completed = query(
            &courses,
            &CourseQuery {
                status: StatusFilter::Completed,
                ..CourseQuery::default()
            },
        );
        // 24/24 is in, 8/36 is out
        assert_eq!(ids(&completed), vec!["4"]);

        let not_started = query(
            &courses,
            &CourseQuery {
                status: StatusFilter::NotStarted,
                ..CourseQuery::default()
            },
        );
        assert_eq!(ids(&not_started), vec!["2"]);

        let in_progress = query(
            &courses,
            &CourseQuery {
                status: StatusFilter::InProgress,
                ..CourseQuery::default()
            },
        );
        assert_eq!(ids(&in_progress), vec!["5", "3", "1"]);
    }

    #[test]
    fn featured_returns_top_rated_with_stable_ties() {
        let courses = sample();

        let top = featured(&courses, 3);

        assert_eq!(ids(&top), vec!["1", "3", "2"]);

        let floor = top.iter().map(|course| course.rating).fold(f64::MAX, f64::min);
        let excluded: Vec<&Course> = courses
            .iter()
            .filter(|course| !top.iter().any(|t| t.id == course.id))
            .collect();
        assert!(excluded.iter().all(|course| course.rating <= floor));
    }

    #[test]
    fn featured_caps_at_catalogue_size() {
        let courses = sample();

        assert_eq!(featured(&courses, 10).len(), courses.len());
        assert!(featured(&[], 3).is_empty());
    }

    #[test]
    fn course_without_lessons_sorts_at_zero_percent() {
        let mut courses = sample();
        let mut empty = courses[0].clone();
        empty.id = CourseId::new("empty".to_string());
        empty.total_lessons = 0;
        empty.completed_lessons = 0;
        courses.push(empty.clone());

        assert_eq!(empty.progress_percent(), 0.0);

        let result = query(
            &courses,
            &CourseQuery {
                sort: SortKey::Progress,
                ..CourseQuery::default()
            },
        );
        assert_eq!(result.last().map(|course| course.id.as_str()), Some("empty"));
    }

    #[test]
    fn query_state_deserializes_from_json() {
        let parsed: CourseQuery = serde_json::from_str(
            r#"{"search":"react","category":"All","level":"Advanced","status":"completed","sort":"rating"}"#,
        )
        .unwrap();

        assert_eq!(parsed.search, "react");
        assert_eq!(parsed.category, CategoryFilter::All);
        assert_eq!(parsed.level, LevelFilter::Only(Level::Advanced));
        assert_eq!(parsed.status, StatusFilter::Completed);
        assert_eq!(parsed.sort, SortKey::Rating);
    }
}
