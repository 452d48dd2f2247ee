pub mod emotion_cache;
pub mod emotion_classifier;
pub mod emotion_result;
pub mod inference_throttle;
