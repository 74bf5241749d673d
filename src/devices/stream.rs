use std::io::{self, Read, Write};

/// Moves single bytes between the device words and the session's streams.
pub struct DeviceRedirector<R, W> {
    stdin: R,
    stdout: W,
}

impl<R: Read, W: Write> DeviceRedirector<R, W> {
    pub fn new(stdin: R, stdout: W) -> Self {
        Self { stdin, stdout }
    }

    /// Pull one byte from stdin. End of stream is reported as an error.
    pub fn read_byte(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        match self.stdin.read(&mut buf)? {
            0 => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin reached end of stream",
            )),
            _ => {
                log::debug!("Read {:#04x} from stdin", buf[0]);
                Ok(buf[0])
            }
        }
    }

    /// Push one byte to stdout.
    pub fn write_byte(&mut self, val: u8) -> io::Result<()> {
        match self.stdout.write(&[val])? {
            0 => Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "stdout accepted no bytes",
            )),
            _ => {
                log::debug!("Wrote {val:#04x} to stdout");
                Ok(())
            }
        }
    }

    pub fn stdin(&self) -> &R {
        &self.stdin
    }

    pub fn stdout(&self) -> &W {
        &self.stdout
    }

    pub fn into_inner(self) -> (R, W) {
        (self.stdin, self.stdout)
    }
}
