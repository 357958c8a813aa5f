use log::{error, info, warn};

use crate::command::{Channel, SetCommand, CHANNEL_COUNT};
use crate::error::PanelError;
use crate::serial_port::Connection;

pub const DEFAULT_ENTRY: &str = "0.0000";

/// Panel state behind the widgets: one entry buffer per channel, the status line and the port.
pub struct DacController {
    connection: Connection,
    entries: [String; CHANNEL_COUNT],
    status: String,
}

impl DacController {
    pub fn new(connection: Connection) -> Self {
        let status = format!("Connected to {}", connection.describe());
        Self {
            connection,
            entries: std::array::from_fn(|_| DEFAULT_ENTRY.to_string()),
            status,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn entry(&self, channel: Channel) -> &str {
        &self.entries[channel.index()]
    }

    /// Edit buffer behind the channel's text field.
    pub fn entry_mut(&mut self, channel: Channel) -> &mut String {
        &mut self.entries[channel.index()]
    }

    /// Validates the channel's entry and writes the command. Status changes only on success.
    pub fn send(&mut self, channel: Channel) -> Result<SetCommand, PanelError> {
        let cmd = SetCommand::parse(channel, self.entry(channel)).map_err(|e| {
            warn!("Rejected entry {:?}: {}", self.entry(channel), e);
            e
        })?;

        if let Err(e) = self.connection.write(cmd.to_line().as_bytes()) {
            error!("Write failed for channel {}: {}", channel, e);
            return Err(e);
        }

        info!("Sent: {}", cmd);
        self.status = format!("Sent: {}", cmd);
        Ok(cmd)
    }

    pub fn close(&mut self) {
        self.connection.close();
    }
}
