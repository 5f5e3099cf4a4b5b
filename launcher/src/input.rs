//! Terminal input that never reads past the current line.
//!
//! Dispatched tools inherit the launcher's stdin. A buffered reader would pull
//! their input (piped answers, pasted text) into the launcher's buffer, so the
//! menu and argument lines are read one byte at a time from the raw handle.

use std::fs::File;
use std::io::{self, BufRead, ErrorKind, Read};

/// [`BufRead`] over `R` that holds at most one byte.
pub struct UnbufferedReader<R> {
    inner: R,
    byte: [u8; 1],
    filled: bool,
}

impl<R: Read> UnbufferedReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            byte: [0],
            filled: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for UnbufferedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let Some(&byte) = self.fill_buf()?.first() else {
            return Ok(0);
        };
        buf[0] = byte;
        self.consume(1);
        Ok(1)
    }
}

impl<R: Read> BufRead for UnbufferedReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while !self.filled {
            match self.inner.read(&mut self.byte) {
                Ok(0) => return Ok(&[]),
                Ok(_) => self.filled = true,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(&self.byte)
    }

    fn consume(&mut self, amt: usize) {
        if amt > 0 {
            self.filled = false;
        }
    }
}

/// Stdin as a [`File`] on a duplicated handle, bypassing std's stdin buffer.
#[cfg(unix)]
pub fn raw_stdin() -> io::Result<File> {
    use std::os::fd::AsFd;
    Ok(File::from(io::stdin().as_fd().try_clone_to_owned()?))
}

/// Stdin as a [`File`] on a duplicated handle, bypassing std's stdin buffer.
#[cfg(windows)]
pub fn raw_stdin() -> io::Result<File> {
    use std::os::windows::io::AsHandle;
    Ok(File::from(io::stdin().as_handle().try_clone_to_owned()?))
}
