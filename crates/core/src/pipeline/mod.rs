pub mod cancellation_token;
pub mod combined_frame_result;
pub mod emotion_producer;
pub mod overlay_consumer;
pub mod pipeline_logger;
pub mod pipeline_runner;
pub mod shared_result_store;
