mod machine;

pub use machine::{Session, Stage};
