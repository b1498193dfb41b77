pub mod health;
pub mod podcast;
pub mod podcasts;
pub mod voices;
