mod notifier;

pub use notifier::{
    INotificationSink, InMemoryNotificationSink, LogNotificationSink, SentNotification,
};
