use std::io::{self, Write};

use log::{debug, info, warn};

use crate::error::PanelError;
use crate::settings::Settings;

/// The byte sink the panel talks to. Real ports and test doubles both implement it.
pub trait PortHandle: Send {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;
    fn close(self: Box<Self>) -> io::Result<()>;
}

impl PortHandle for Box<dyn serialport::SerialPort> {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        write_blocking(self, data)
    }

    fn close(mut self: Box<Self>) -> io::Result<()> {
        // the OS handle is released when the port is dropped
        self.flush()
    }
}

/// Writes all of `data`, waiting out port timeouts.
///
/// The configured timeout bounds reads only; writes block until the whole buffer is out.
pub fn write_blocking<W: Write + ?Sized>(port: &mut W, mut data: &[u8]) -> io::Result<()> {
    while !data.is_empty() {
        match port.write(data) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "port accepted no bytes",
                ));
            }
            Ok(n) => data = &data[n..],
            Err(ref e)
                if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) =>
            {
                debug!("Port busy, retrying write of {} bytes", data.len());
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Single owned port handle. Closed at most once, on `close` or on drop.
pub struct Connection {
    handle: Option<Box<dyn PortHandle>>,
    port_name: String,
    baud_rate: u32,
}

impl Connection {
    pub fn open(settings: &Settings) -> Result<Self, PanelError> {
        let port = serialport::new(&settings.port_name, settings.baud_rate)
            .timeout(settings.read_timeout())
            .open()
            .map_err(|source| PanelError::PortOpen {
                port: settings.port_name.clone(),
                source,
            })?;

        info!(
            "Opened {} @ {} baud",
            settings.port_name, settings.baud_rate
        );
        Ok(Self::with_handle(
            Box::new(port),
            settings.port_name.clone(),
            settings.baud_rate,
        ))
    }

    pub fn with_handle(handle: Box<dyn PortHandle>, port_name: String, baud_rate: u32) -> Self {
        Self {
            handle: Some(handle),
            port_name,
            baud_rate,
        }
    }

    pub fn describe(&self) -> String {
        format!("{} @ {}", self.port_name, self.baud_rate)
    }

    pub fn write(&mut self, data: &[u8]) -> Result<(), PanelError> {
        match self.handle.as_mut() {
            Some(handle) => handle.write_all(data).map_err(PanelError::from),
            None => Err(PanelError::Write(io::Error::new(
                io::ErrorKind::NotConnected,
                format!("{} is closed", self.port_name),
            ))),
        }
    }

    /// Closes the port, swallowing any error. Safe to call repeatedly.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            match handle.close() {
                Ok(()) => info!("Closed {}", self.port_name),
                Err(e) => warn!("Error closing {} (ignored): {}", self.port_name, e),
            }
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
