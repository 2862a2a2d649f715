//! Link endpoints

use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::path::PathBuf;

use bluedot_core::config::LinkTarget;

/// Read half of an open link
pub type Reader = Box<dyn Read + Send>;

/// Write half of an open link
pub type Writer = Box<dyn Write + Send>;

/// Something the link thread can open
pub trait Connect {
    /// Shown in status notices and logs
    fn name(&self) -> &str;

    /// Open the link, returning independent read and write halves
    fn connect(&self) -> io::Result<(Reader, Writer)>;
}

/// A configured server endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// TCP `host:port`
    Tcp(String),
    /// Serial character device, e.g. an RFCOMM binding
    Device(PathBuf),
}

impl From<LinkTarget<'_>> for Endpoint {
    fn from(target: LinkTarget<'_>) -> Self {
        match target {
            LinkTarget::Tcp(address) => Endpoint::Tcp(address.to_owned()),
            LinkTarget::Device(path) => Endpoint::Device(PathBuf::from(path)),
        }
    }
}

impl Connect for Endpoint {
    fn name(&self) -> &str {
        match self {
            Endpoint::Tcp(address) => address.as_str(),
            Endpoint::Device(path) => path.to_str().unwrap_or("device"),
        }
    }

    fn connect(&self) -> io::Result<(Reader, Writer)> {
        match self {
            Endpoint::Tcp(address) => {
                let stream = TcpStream::connect(address.as_str())?;
                // Touch messages are a few bytes each
                stream.set_nodelay(true)?;
                let reader = stream.try_clone()?;
                Ok((Box::new(reader), Box::new(stream)))
            }
            Endpoint::Device(path) => {
                let file = OpenOptions::new().read(true).write(true).open(path)?;
                let reader = file.try_clone()?;
                Ok((Box::new(reader), Box::new(file)))
            }
        }
    }
}
