pub mod game;
pub mod model;
pub mod replay;
pub mod rule;
pub mod view;
