pub mod category;
pub mod game;
pub mod leaderboard;
pub mod provider;
pub mod ranking;
pub mod sample;
