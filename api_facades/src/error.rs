//! Bridge Error Module

use infrastructure_external_format::{DecodeError, EncodeError};
use thiserror::Error;
use usecases_link_management::{ConnectError, LinkError, ReceiveError, RpcError, SendError};

/// Every failure a bridge call can report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error(transparent)]
    Send(#[from] SendError),
    #[error(transparent)]
    Receive(#[from] ReceiveError),
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}

impl BridgeError {
    /// Stable numeric code reported by `Bridge::errorno`
    ///
    /// | Code | Failure |
    /// |---|---|
    /// | 1 | local node init |
    /// | 2 | connection |
    /// | 3 | send or rpc |
    /// | 4 | receive |
    /// | 5 | message not addressed to us |
    /// | 6 | decode |
    /// | 7 | encode |
    /// | 8 | no default link |
    /// | 9 | invalid link |
    pub fn code(&self) -> i64 {
        match self {
            BridgeError::Connect(ConnectError::Init(_)) => 1,
            BridgeError::Connect(ConnectError::Connection { .. }) => 2,
            BridgeError::Send(_) | BridgeError::Rpc(_) => 3,
            BridgeError::Receive(ReceiveError::ReceiveFailed(_)) => 4,
            BridgeError::Receive(ReceiveError::NotMine(_)) => 5,
            BridgeError::Decode(_) => 6,
            BridgeError::Encode(_) => 7,
            BridgeError::Link(LinkError::NoDefaultLink) => 8,
            BridgeError::Link(LinkError::InvalidLink(_)) => 9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters_distribution::{MessageKind, TransportError};
    use entities_data_handling::LinkHandle;

    #[test]
    fn test_codes() {
        let cases: Vec<(BridgeError, i64)> = vec![
            (ConnectError::Init(TransportError::Closed).into(), 1),
            (
                ConnectError::Connection {
                    node: "a@b".to_string(),
                    source: TransportError::Timeout,
                }
                .into(),
                2,
            ),
            (SendError(TransportError::Timeout).into(), 3),
            (RpcError::CallFailed(TransportError::Timeout).into(), 3),
            (ReceiveError::ReceiveFailed(TransportError::Timeout).into(), 4),
            (ReceiveError::NotMine(MessageKind::Exit).into(), 5),
            (DecodeError::UnsupportedTag(0).into(), 6),
            (EncodeError::MissingValue { position: 0 }.into(), 7),
            (LinkError::NoDefaultLink.into(), 8),
            (LinkError::InvalidLink(LinkHandle(1)).into(), 9),
        ];
        for (error, code) in cases {
            assert_eq!(error.code(), code, "{}", error);
        }
    }

    #[test]
    fn test_messages_are_readable() {
        let e: BridgeError = LinkError::NoDefaultLink.into();
        assert_eq!(e.to_string(), "no default link");
        let e: BridgeError = DecodeError::UnsupportedTag(200).into();
        assert!(e.to_string().starts_with("decode failed"));
    }
}
