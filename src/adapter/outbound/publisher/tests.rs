use crate::adapter::outbound::publisher::LogPublisher;
use crate::port::{Destination, Publisher};

#[tokio::test]
async fn test_log_publisher_always_succeeds() {
    let publisher = LogPublisher;
    let result = publisher
        .send(&Destination::new("@chan"), "FPIBANK = 0.05000$")
        .await;
    assert!(result.is_ok());
    assert_eq!(publisher.name(), "log");
}

#[tokio::test]
async fn test_publisher_is_object_safe() {
    let publisher: Box<dyn Publisher> = Box::new(LogPublisher);
    assert!(publisher.send(&Destination::new("1"), "x").await.is_ok());
}
