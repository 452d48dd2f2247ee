/// Minimum time between two fresh emotion classification passes.
pub const DEFAULT_INFERENCE_INTERVAL_MS: u64 = 1000;

/// Minimum time between two accepted wake-up notifications.
pub const DEFAULT_COOLDOWN_MS: u64 = 3000;

/// How long the producer waits for the sensor before treating the cycle as a no-op.
pub const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 1000;

/// How long the consumer waits for the display to become ready.
pub const DEFAULT_DISPLAY_TIMEOUT_MS: u64 = 100;

/// Pause between stopping the renderer and stopping inference.
pub const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 100;

/// Sensor buffers cycled by the frame source.
pub const SENSOR_BUFFER_COUNT: usize = 3;

pub const DEFAULT_FRAME_WIDTH: u32 = 1280;
pub const DEFAULT_FRAME_HEIGHT: u32 = 720;

/// Number of landmark points the detector produces per face.
pub const LANDMARK_COUNT: usize = 5;

pub const SETTINGS_DIR_NAME: &str = "emotion-watch";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
