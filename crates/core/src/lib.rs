pub mod detection;
pub mod emotion;
pub mod notification;
pub mod pipeline;
pub mod rendering;
pub mod shared;
pub mod video;
