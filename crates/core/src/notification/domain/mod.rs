pub mod cooldown_gate;
pub mod label_translations;
pub mod notification_transport;
pub mod wake_up_event;
