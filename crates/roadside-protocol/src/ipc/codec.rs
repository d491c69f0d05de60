//! Outbound messages as bridge calls.
//!
//! A bridge call names the channel and the method, and carries its arguments
//! as a msgpack map wrapped in an [`mrpc::Value::Binary`]. Log forwarding is
//! not a bridge method and never becomes a call.

use std::fmt;

use mrpc::Value;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{ToCompanion, rpc::BridgeMethod};

/// Errors from encoding/decoding bridge arguments.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided value was not a binary payload.
    #[error("expected binary argument payload, got {0:?}")]
    InvalidValueType(Value),
    /// The payload did not decode into the expected arguments.
    #[error(transparent)]
    Decode(#[from] rmp_serde::decode::Error),
    /// The arguments could not be serialized.
    #[error(transparent)]
    Encode(#[from] rmp_serde::encode::Error),
}

/// One invocation on the named command channel.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeCall {
    /// Channel the call is sent on.
    pub channel: String,
    /// Method invoked on the companion side.
    pub method: BridgeMethod,
    /// Encoded arguments.
    pub args: Value,
}

impl fmt::Display for BridgeCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.channel, self.method.as_str())?;
        if let Value::Binary(bytes) = &self.args {
            write!(f, " ({} bytes)", bytes.len())?;
        }
        Ok(())
    }
}

/// Turn an outbound message into the call that carries it.
///
/// Returns `Ok(None)` for messages that are not bridge methods.
pub fn encode_call(channel: &str, msg: &ToCompanion) -> Result<Option<BridgeCall>, Error> {
    let (Some(method), ToCompanion::BookService(args)) = (msg.method(), msg) else {
        return Ok(None);
    };
    Ok(Some(BridgeCall {
        channel: channel.to_string(),
        method,
        args: encode_args(args)?,
    }))
}

/// Encode arguments as a named msgpack map.
pub fn encode_args<T: Serialize>(args: &T) -> Result<Value, Error> {
    Ok(Value::Binary(rmp_serde::to_vec_named(args)?))
}

/// Decode arguments produced by [`encode_args`].
pub fn decode_args<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    match value {
        Value::Binary(bytes) => Ok(rmp_serde::from_slice(&bytes)?),
        other => Err(Error::InvalidValueType(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::BookServiceArgs;

    #[test]
    fn book_service_becomes_a_call() {
        let msg = ToCompanion::BookService(BookServiceArgs {
            category_name: "Tow / Pickup Required".into(),
        });
        let call = encode_call("com.onecharge.carplay", &msg)
            .expect("encode")
            .expect("bridge call");
        assert_eq!(call.channel, "com.onecharge.carplay");
        assert_eq!(call.method.as_str(), "bookService");
        assert!(call.to_string().starts_with("com.onecharge.carplay/bookService ("));

        let Value::Binary(bytes) = &call.args else {
            panic!("expected binary args");
        };
        // Wire field name is camelCase.
        assert!(bytes.windows(12).any(|w| w == b"categoryName"));

        let args: BookServiceArgs = decode_args(call.args).expect("decode");
        assert_eq!(args.category_name, "Tow / Pickup Required");
    }

    #[test]
    fn log_messages_are_not_calls() {
        let msg = ToCompanion::Log {
            level: "INFO".into(),
            target: "roadside_engine".into(),
            message: "connected".into(),
        };
        assert!(encode_call("com.onecharge.carplay", &msg).expect("encode").is_none());
    }

    #[test]
    fn non_binary_values_are_rejected() {
        let err = decode_args::<BookServiceArgs>(Value::String("bookService".into())).unwrap_err();
        assert!(matches!(err, Error::InvalidValueType(_)));
    }
}
