pub mod log_notification_transport;
pub mod udp_notification_transport;
