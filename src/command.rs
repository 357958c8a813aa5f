use std::fmt;

use crate::error::PanelError;

pub const CHANNEL_COUNT: usize = 16;
pub const MIN_VOLTS: f64 = -5.0;
pub const MAX_VOLTS: f64 = 5.0;

/// One DAC output line, always `< CHANNEL_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel(u8);

impl Channel {
    pub fn new(index: usize) -> Option<Self> {
        if index < CHANNEL_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Channel> {
        (0..CHANNEL_COUNT).filter_map(Channel::new)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `SET <channel> <volts>` as sent to the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetCommand {
    pub channel: Channel,
    pub volts: f64,
}

impl SetCommand {
    /// Parses the operator's entry text for `channel` and checks the range.
    pub fn parse(channel: Channel, text: &str) -> Result<Self, PanelError> {
        let volts: f64 = text
            .trim()
            .parse()
            .map_err(|_| PanelError::NotANumber { channel })?;

        // NaN fails `contains` as well
        if !(MIN_VOLTS..=MAX_VOLTS).contains(&volts) {
            return Err(PanelError::OutOfRange { channel });
        }

        Ok(Self { channel, volts })
    }

    /// The newline-terminated line written to the port.
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for SetCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SET {} {:.4}", self.channel, self.volts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(i: usize) -> Channel {
        Channel::new(i).unwrap()
    }

    #[test]
    fn test_channel_bounds() {
        assert!(Channel::new(0).is_some());
        assert!(Channel::new(15).is_some());
        assert!(Channel::new(16).is_none());
        assert_eq!(Channel::all().count(), CHANNEL_COUNT);
        assert_eq!(Channel::all().last().map(Channel::index), Some(15));
    }

    #[test]
    fn test_line_format() {
        let cmd = SetCommand::parse(ch(3), "2.5").unwrap();
        assert_eq!(cmd.to_line(), "SET 3 2.5000\n");
        assert_eq!(cmd.to_string(), "SET 3 2.5000");

        let cmd = SetCommand::parse(ch(15), "-1.23456").unwrap();
        assert_eq!(cmd.to_line(), "SET 15 -1.2346\n");

        let cmd = SetCommand::parse(ch(0), "0.0000").unwrap();
        assert_eq!(cmd.to_line(), "SET 0 0.0000\n");
    }

    #[test]
    fn test_whitespace_is_stripped() {
        let cmd = SetCommand::parse(ch(1), "  4.2 \t").unwrap();
        assert_eq!(cmd.to_line(), "SET 1 4.2000\n");
    }

    #[test]
    fn test_not_a_number() {
        for text in ["abc", "", "   ", "1.2.3", "5V", "1_0", "５"] {
            let err = SetCommand::parse(ch(4), text).unwrap_err();
            assert!(matches!(err, PanelError::NotANumber { channel } if channel.index() == 4));
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        assert!(SetCommand::parse(ch(2), "5.0").is_ok());
        assert!(SetCommand::parse(ch(2), "-5.0").is_ok());
        assert_eq!(SetCommand::parse(ch(2), "-5").unwrap().to_line(), "SET 2 -5.0000\n");

        for text in ["5.0001", "-5.0001", "100", "inf", "-inf", "NaN"] {
            let err = SetCommand::parse(ch(2), text).unwrap_err();
            assert!(matches!(err, PanelError::OutOfRange { .. }), "{text}");
        }
    }
}
