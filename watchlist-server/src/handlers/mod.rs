pub mod folders;
pub mod groups;
pub mod health;
pub mod statuses;
pub mod watched_groups;
pub mod watched_users;
