// ABOUTME: Frame-based SMPP I/O over a tokio TcpStream
// ABOUTME: Reads whole PDUs out of a growing buffer and writes encoder output unmodified

use crate::frame::{self, Frame};
use bytes::{Buf, BytesMut};
use std::io::{self, Cursor};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tracing::debug;

/// Send and receive `Frame` values over a TCP stream.
///
/// This is the transport only. No session state is tracked: callers decide
/// which PDUs are valid to send when (bind before submit, unbind last).
#[derive(Debug)]
pub struct Connection {
    // Write buffering; `write_frame` flushes after each PDU.
    stream: BufWriter<TcpStream>,

    // The buffer for reading frames.
    buffer: BytesMut,
}

impl Connection {
    /// Create a new `Connection`, backed by `socket`. Read and write buffers
    /// are initialized.
    pub fn new(socket: TcpStream) -> Connection {
        Connection {
            stream: BufWriter::new(socket),
            buffer: BytesMut::with_capacity(4 * 1024),
        }
    }

    /// Read a single `Frame` value from the underlying stream.
    ///
    /// Waits until a whole PDU is buffered. Bytes after it stay in the buffer
    /// for the next call.
    ///
    /// Returns `None` if the peer closed the stream on a PDU boundary, and an
    /// error if it closed mid-PDU or sent a malformed PDU.
    pub async fn read_frame(&mut self) -> crate::Result<Option<Frame>> {
        loop {
            if let Some(frame) = self.parse_frame()? {
                return Ok(Some(frame));
            }

            // `0` indicates "end of stream".
            if 0 == self.stream.read_buf(&mut self.buffer).await? {
                return self
                    .buffer
                    .is_empty()
                    .then_some(None)
                    .ok_or_else(|| "connection reset by peer".into());
            }
        }
    }

    /// Tries to parse a frame from the buffer. If the buffer contains enough
    /// data, the frame is returned and the data removed from the buffer. If not
    /// enough data has been buffered yet, `Ok(None)` is returned. If the
    /// buffered data does not represent a valid frame, `Err` is returned.
    fn parse_frame(&mut self) -> crate::Result<Option<Frame>> {
        use frame::Error::Incomplete;

        let mut buf = Cursor::new(&self.buffer[..]);

        // Cheap length check before any allocation.
        match Frame::check(&mut buf) {
            Ok(_) => {
                let len = buf.position() as usize;
                buf.set_position(0);

                let frame = Frame::parse(&mut buf)?;
                self.buffer.advance(len);

                debug!(
                    command = frame.name(),
                    sequence_number = frame.sequence_number(),
                    command_status = frame.command_status(),
                    len,
                    "read frame"
                );
                Ok(Some(frame))
            }
            // Expected while a PDU is still arriving.
            Err(Incomplete) => Ok(None),
            // The stream is now out of step; the caller should drop the
            // connection.
            Err(e) => Err(e.into()),
        }
    }

    /// Write a single `Frame` value to the underlying stream and flush.
    pub async fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        let bytes = frame.to_bytes();
        debug!(
            command = frame.name(),
            sequence_number = frame.sequence_number(),
            len = bytes.len(),
            "write frame"
        );

        self.stream.write_all(&bytes).await?;
        self.stream.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Encodable;
    use crate::datatypes::{EnquireLink, EnquireLinkResponse, SubmitSm};
    use tokio::net::TcpListener;

    async fn connected_pair() -> (Connection, TcpStream) {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server, _) = listener.accept().await.unwrap();
        (Connection::new(client), server)
    }

    #[tokio::test]
    async fn reads_pdus_split_across_writes() {
        let (mut conn, mut peer) = connected_pair().await;

        let submit = SubmitSm::builder()
            .sequence_number(5)
            .source_addr("123456")
            .destination_addr("9876543210")
            .short_message("Hello SubmitSm")
            .build()
            .unwrap();
        let mut wire = BytesMut::new();
        submit.encode(&mut wire);
        EnquireLink::new(6).encode(&mut wire);

        // Header of the first PDU arrives alone, the rest later.
        peer.write_all(&wire[..7]).await.unwrap();
        peer.flush().await.unwrap();
        peer.write_all(&wire[7..]).await.unwrap();
        peer.flush().await.unwrap();

        let first = conn.read_frame().await.unwrap().unwrap();
        assert_eq!(first, Frame::from(submit));

        let second = conn.read_frame().await.unwrap().unwrap();
        assert_eq!(second, Frame::EnquireLink(EnquireLink::new(6)));

        drop(peer);
        assert!(conn.read_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn writes_encoder_output_unmodified() {
        let (mut conn, mut peer) = connected_pair().await;
        let resp = EnquireLinkResponse::new(9);

        conn.write_frame(&resp.clone().into()).await.unwrap();

        let mut received = [0u8; 16];
        peer.read_exact(&mut received).await.unwrap();
        assert_eq!(&received[..], &resp.to_bytes()[..]);
    }

    #[tokio::test]
    async fn close_mid_pdu_is_an_error() {
        let (mut conn, mut peer) = connected_pair().await;
        let bytes = EnquireLink::new(1).to_bytes();

        peer.write_all(&bytes[..10]).await.unwrap();
        peer.flush().await.unwrap();
        drop(peer);

        assert!(conn.read_frame().await.is_err());
    }
}
