pub mod github;
pub mod grid;
pub mod levels;
pub mod streaks;
pub mod template;
