use crate::error::Result;
use crate::domain::notification::Notification;
use std::io::Write;

/// Writes recorded notifications as `kind,recipient` rows.
pub struct NotificationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> NotificationWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_notifications(&mut self, notifications: &[Notification]) -> Result<()> {
        if notifications.is_empty() {
            self.writer.write_record(["kind", "recipient"])?;
        }
        for notification in notifications {
            self.writer.serialize(notification)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
