use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::rendering::domain::overlay_renderer::{OverlayItem, OverlayRenderer};

/// Renders overlays to the log at a simulated vsync rate.
///
/// Only logs when the overlay content changes, so a steady scene does not
/// flood the output at display rate.
pub struct LogOverlayRenderer {
    vsync: Receiver<Instant>,
    last_drawn: Option<Vec<OverlayItem>>,
    draws: u64,
}

impl LogOverlayRenderer {
    pub fn new(refresh_hz: u32) -> Result<Self, &'static str> {
        if refresh_hz == 0 {
            return Err("refresh rate must be >= 1");
        }
        Ok(Self::with_interval(Duration::from_secs_f64(
            1.0 / refresh_hz as f64,
        )))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            vsync: crossbeam_channel::tick(interval),
            last_drawn: None,
            draws: 0,
        }
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl OverlayRenderer for LogOverlayRenderer {
    fn wait_frame_ready(&mut self, timeout: Duration) -> bool {
        self.vsync.recv_timeout(timeout).is_ok()
    }

    fn draw(&mut self, items: &[OverlayItem]) {
        self.draws += 1;
        if self.last_drawn.as_deref() == Some(items) {
            return;
        }
        if items.is_empty() {
            log::info!("Overlay: no faces");
        } else {
            let captions: Vec<String> = items
                .iter()
                .map(|item| {
                    let b = item.bounding_box;
                    format!(
                        "[{:.0},{:.0} {:.0}x{:.0}] {}",
                        b.x, b.y, b.width, b.height, item.caption
                    )
                })
                .collect();
            log::info!("Overlay: {}", captions.join(" | "));
        }
        self.last_drawn = Some(items.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::detection::BoundingBox;
    use crate::emotion::domain::emotion_result::EmotionLabel;

    fn item(caption: &str) -> OverlayItem {
        OverlayItem {
            bounding_box: BoundingBox::new(1.0, 2.0, 3.0, 4.0),
            label: EmotionLabel::Happiness,
            caption: caption.to_string(),
        }
    }

    #[test]
    fn test_zero_refresh_errors() {
        assert!(LogOverlayRenderer::new(0).is_err());
    }

    #[test]
    fn test_frame_ready_follows_vsync() {
        let mut renderer = LogOverlayRenderer::with_interval(Duration::from_millis(1));
        assert!(renderer.wait_frame_ready(Duration::from_secs(1)));
    }

    #[test]
    fn test_frame_ready_times_out() {
        let mut renderer = LogOverlayRenderer::with_interval(Duration::from_secs(60));
        assert!(!renderer.wait_frame_ready(Duration::from_millis(5)));
    }

    #[test]
    fn test_draw_remembers_last_overlay() {
        let mut renderer = LogOverlayRenderer::with_interval(Duration::from_secs(60));
        renderer.draw(&[item("Happiness 0.90")]);
        renderer.draw(&[item("Happiness 0.90")]);
        renderer.draw(&[]);

        assert_eq!(renderer.draws(), 3);
        assert_eq!(renderer.last_drawn, Some(vec![]));
    }
}
