use core::fmt;

/// Somewhere log bytes can go.
///
/// Implementations are called from whatever context logs, so they must not
/// block indefinitely and must tolerate concurrent callers.
pub trait LogSink: Send + Sync {
    fn write_bytes(&self, bytes: &[u8]);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn write_bytes(&self, bytes: &[u8]) {
        (**self).write_bytes(bytes);
    }
}

/// Adapts a [`LogSink`] to [`fmt::Write`].
pub struct SinkWriter<'a, S: ?Sized>(pub &'a S);

impl<S: LogSink + ?Sized> fmt::Write for SinkWriter<'_, S> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use std::sync::Mutex;

    struct Buf(Mutex<Vec<u8>>);

    impl LogSink for Buf {
        fn write_bytes(&self, bytes: &[u8]) {
            self.0.lock().unwrap().extend_from_slice(bytes);
        }
    }

    #[test]
    fn writer_forwards_utf8() {
        let buf = Buf(Mutex::new(Vec::new()));
        write!(SinkWriter(&buf), "µ={}", 3).unwrap();
        assert_eq!(buf.0.lock().unwrap().as_slice(), "µ=3".as_bytes());
    }
}
