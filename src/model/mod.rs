pub use category::*;
pub use course::*;
pub use id::*;
pub use lesson::*;
pub use timestamp::*;
pub use user::*;

mod category;
mod course;
mod id;
mod lesson;
mod timestamp;
mod user;
