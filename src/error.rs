use thiserror::Error;

use crate::command::Channel;

/// Everything that can go wrong between the operator and the DAC.
///
/// `Display` is the body of the dialog shown to the operator.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Cannot open {port}\n\n{source}")]
    PortOpen {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Channel {channel}: not a number")]
    NotANumber { channel: Channel },

    #[error("Channel {channel}: voltage must be between -5.0 and +5.0 V")]
    OutOfRange { channel: Channel },

    #[error("{0}")]
    Write(#[from] std::io::Error),
}

impl PanelError {
    pub fn title(&self) -> &'static str {
        match self {
            PanelError::PortOpen { .. } => "Serial error",
            PanelError::NotANumber { .. } => "Input error",
            PanelError::OutOfRange { .. } => "Range error",
            PanelError::Write(_) => "Serial write error",
        }
    }

    /// Only a failed open ends the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PanelError::PortOpen { .. })
    }
}
