pub mod entry;
pub mod printf;

use anyhow::Result;
use jmate_config::{NativeConfig, OutputStream};
use jmate_io::{LibcBridge, NativeBridge, PrintStream, TraceBridge};
use std::io;

/// Settings shared by the printing commands
#[derive(Debug, Clone)]
pub struct Options {
    pub native: NativeConfig,
    pub stream: OutputStream,
    pub trace: bool,
}

impl Options {
    /// Resolve the native routine and open a print stream on the chosen output
    pub fn open(&self) -> Result<PrintStream<Box<dyn NativeBridge>>> {
        // The invoking user supplies both FORMAT and ARGs and owns their match
        let bridge = unsafe {
            match self.stream {
                OutputStream::Stdout => {
                    self.wrap(LibcBridge::from_config(&self.native, io::stdout())?)
                }
                OutputStream::Stderr => {
                    self.wrap(LibcBridge::from_config(&self.native, io::stderr())?)
                }
            }
        };
        Ok(PrintStream::new(bridge))
    }

    fn wrap<B: NativeBridge + 'static>(&self, bridge: B) -> Box<dyn NativeBridge> {
        if self.trace {
            Box::new(TraceBridge::new(bridge))
        } else {
            Box::new(bridge)
        }
    }
}
