use derive_new::new;
use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Declares a validated string identifier newtype together with its parse
/// error. Identifiers must be non-empty and contain no whitespace.
macro_rules! define_id {
    ($id:ident, $error:ident: $entity:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
        #[serde(transparent)]
        pub struct $id(String);

        impl $id {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $id {
            type Err = $error;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                if input.is_empty() || input.chars().any(char::is_whitespace) {
                    return Err($error::new(input.to_string()));
                }

                Ok(Self(input.to_string()))
            }
        }

        impl std::fmt::Display for $id {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::convert::AsRef<str> for $id {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Snafu, new)]
        #[snafu(display("Failed to parse {} id: {}", $entity, text))]
        pub struct $error {
            pub text: String,
        }
    };
}

define_id!(CourseId, ParseCourseId: "course");
define_id!(LessonId, ParseLessonId: "lesson");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_course_id() {
        let id: CourseId = "1".parse().unwrap();
        assert_eq!(id.as_str(), "1");
    }

    #[test]
    fn reject_blank_and_spaced_ids() {
        assert!("".parse::<CourseId>().is_err());
        assert!("a b".parse::<LessonId>().is_err());
    }
}
