//! A codec for DNS messages in the RFC 1035 wire format.
//!
//! [decode] turns the bytes of a DNS message into a [Message]: a header,
//! the question section and three sections of resource records. [encode]
//! does the reverse. Domain names in the input may use compression
//! pointers; the encoder compresses repeated names unless told not to
//! with [EncodeOptions].
//!
//! Malformed input never panics: every failure is a [DecodeError] telling
//! what went wrong, in which field, and at which byte offset.
//!
//! ## Example: build a query and read it back.
//!
//! ```rust
//! use dnswire::{Message, RecordType};
//!
//! let name = "example.com".parse().unwrap();
//! let query = Message::query(name, RecordType::A);
//! let bytes = dnswire::encode(&query).unwrap();
//!
//! let decoded = dnswire::decode(&bytes).unwrap();
//! assert_eq!(decoded, query);
//! assert_eq!(decoded.questions[0].to_string(), "example.com. IN A");
//! ```
//!
//! ## Example: decode a response.
//!
//! ```rust
//! use dnswire::{RData, RecordType};
//! use std::net::Ipv4Addr;
//!
//! let data = b"\x00\x01\x81\x80\x00\x00\x00\x01\x00\x00\x00\x00\
//!              \x05hello\x00\x00\x01\x00\x01\x00\x00\x00\x0a\x00\x04\x01\x02\x03\x04";
//! let msg = dnswire::decode(data).unwrap();
//! let answer = &msg.answers[0];
//! assert_eq!(answer.rtype, RecordType::A);
//! assert_eq!(answer.rdata, RData::A(Ipv4Addr::new(1, 2, 3, 4)));
//! ```
//!
//! # Logging
//!
//! The default `logging` feature logs through the [`log`](https://crates.io/crates/log)
//! crate, mostly at `trace` level. Without it the crate does not depend on `log`.
//!
//! The codec is based on these RFCs:
//! - DNS:       [RFC 1035](https://tools.ietf.org/html/rfc1035)
//! - AAAA:      [RFC 3596](https://tools.ietf.org/html/rfc3596)
//! - AD and CD: [RFC 4035](https://tools.ietf.org/html/rfc4035)

#![forbid(unsafe_code)]

// log for logging (optional).
#[cfg(not(feature = "logging"))]
#[macro_use]
mod log {
    macro_rules! trace {
        ($($arg:expr),* $(,)?) => {
            {
                $( let _ = &$arg; )* // avoid warnings about unused variables.
            }
        };
    }

    macro_rules! debug {
        ($($arg:expr),* $(,)?) => {
            {
                $( let _ = &$arg; )*
            }
        };
    }
}

#[macro_use]
mod macros;

mod error;
mod header;
mod iana;
mod message;
mod name;
mod rdata;
mod record;
mod wire;

pub use error::{
    BuildError, DecodeError, DecodeErrorKind, EncodeError, Error, Field, Result, Section,
};
pub use header::{
    Header, SectionCounts, FLAGS_AA, FLAGS_AD, FLAGS_CD, FLAGS_QR, FLAGS_RA, FLAGS_RD, FLAGS_TC,
    FLAGS_Z, HEADER_LEN,
};
pub use iana::{Class, FromStrError, Opcode, Rcode, RecordType};
pub use message::{EncodeOptions, Message};
pub use name::{Label, Name, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use rdata::{RData, Txt, MAX_CHARACTER_STRING_LEN};
pub use record::{Question, ResourceRecord};

/// Decodes a complete DNS message.
///
/// Bytes after the last record of the additional section are ignored.
pub fn decode(data: &[u8]) -> core::result::Result<Message, DecodeError> {
    Message::from_bytes(data)
}

/// Encodes a message with name compression.
pub fn encode(msg: &Message) -> core::result::Result<Vec<u8>, EncodeError> {
    msg.to_bytes()
}

/// Encodes a message with the given options.
pub fn encode_with(
    msg: &Message,
    options: &EncodeOptions,
) -> core::result::Result<Vec<u8>, EncodeError> {
    msg.to_bytes_with(options)
}
