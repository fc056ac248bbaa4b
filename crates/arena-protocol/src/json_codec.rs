//! JSON lines codec.
//!
//! One message per line; see [`wire_types`](crate::wire_types) for the
//! shapes. Encoders return the JSON text **without** the trailing newline;
//! framing is the transport's job.

use arena_core::{InputMessage, OutputMessage};

use crate::wire_types::{WireInput, WireOutput};
use crate::ProtocolError;

/// Decode one client line into an `InputMessage`.
pub fn decode_input(line: &str) -> Result<InputMessage, ProtocolError> {
    let wire: WireInput = serde_json::from_str(line.trim())?;
    Ok(wire.into())
}

/// Encode an `InputMessage` as a client would send it.
///
/// `Disconnect` has no wire form and is rejected.
pub fn encode_input(msg: &InputMessage) -> Result<String, ProtocolError> {
    let wire = WireInput::try_from(msg)?;
    Ok(serde_json::to_string(&wire)?)
}

/// Encode an `OutputMessage` for a client.
pub fn encode_output(msg: &OutputMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&WireOutput::from(msg))?)
}

/// Decode one server line into an `OutputMessage`.
pub fn decode_output(line: &str) -> Result<OutputMessage, ProtocolError> {
    let wire: WireOutput = serde_json::from_str(line.trim())?;
    Ok(wire.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{Board, Symbol, OPPONENT_DISCONNECTED};

    #[test]
    fn decodes_client_events() {
        assert_eq!(decode_input(r#"{"event":"join"}"#).unwrap(), InputMessage::Join);
        assert_eq!(
            decode_input(r#"{"event":"move","data":{"index":4}}"#).unwrap(),
            InputMessage::move_to(4)
        );
        // Range is the engine's concern, not the codec's.
        assert_eq!(
            decode_input(r#" {"event":"move","data":{"index":42}} "#).unwrap(),
            InputMessage::move_to(42)
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(decode_input("").is_err());
        assert!(decode_input("join").is_err());
        assert!(decode_input(r#"{"event":"move","data":{"index":-1}}"#).is_err());
        assert!(decode_input(r#"{"event":"move","data":{"index":"a"}}"#).is_err());
        assert!(decode_input(r#"{"event":"move"}"#).is_err());
        assert!(decode_input(r#"{"event":"disconnect"}"#).is_err());
    }

    #[test]
    fn disconnect_is_not_encodable() {
        assert!(matches!(
            encode_input(&InputMessage::Disconnect),
            Err(ProtocolError::NotOnWire("disconnect"))
        ));
        assert_eq!(encode_input(&InputMessage::Join).unwrap(), r#"{"event":"join"}"#);
    }

    #[test]
    fn encodes_server_events_in_documented_shape() {
        assert_eq!(
            encode_output(&OutputMessage::start(Symbol::X, true)).unwrap(),
            r#"{"event":"start","data":{"symbol":"X","turn":true}}"#
        );

        let mut board = Board::new();
        board.place(4, Symbol::X);
        board.place(0, Symbol::O);
        assert_eq!(
            encode_output(&OutputMessage::update(board, false)).unwrap(),
            r#"{"event":"update","data":{"board":["O",null,null,null,"X",null,null,null,null],"turn":false}}"#
        );

        assert_eq!(
            encode_output(&OutputMessage::Win(Symbol::O)).unwrap(),
            r#"{"event":"win","data":"O"}"#
        );
        assert_eq!(encode_output(&OutputMessage::Tie).unwrap(), r#"{"event":"tie"}"#);
        assert_eq!(
            encode_output(&OutputMessage::status(OPPONENT_DISCONNECTED)).unwrap(),
            r#"{"event":"status","data":"Opponent disconnected. Game over."}"#
        );
    }

    #[test]
    fn decodes_update_board() {
        let msg = decode_output(
            r#"{"event":"update","data":{"board":["O","X",null,"O","X",null,null,"X",null],"turn":true}}"#,
        )
        .unwrap();
        let OutputMessage::Update(update) = msg else {
            panic!("expected update, got {:?}", msg);
        };
        assert!(update.turn);
        assert_eq!(update.board.get(0), Some(Some(Symbol::O)));
        assert_eq!(update.board.get(7), Some(Some(Symbol::X)));
        assert_eq!(update.board.occupied_count(), 5);
    }
}
