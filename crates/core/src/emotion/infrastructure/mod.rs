pub mod scripted_emotion_classifier;
