//! Serde shapes of the JSON wire protocol.
//!
//! Every message is an adjacently tagged object: the event name under
//! `"event"` and its payload (if any) under `"data"`.
//!
//! ```text
//! client → server
//!   {"event":"join"}
//!   {"event":"move","data":{"index":4}}
//!
//! server → client
//!   {"event":"start","data":{"symbol":"X","turn":true}}
//!   {"event":"update","data":{"board":[null,null,null,null,"X",null,null,null,null],"turn":false}}
//!   {"event":"win","data":"X"}
//!   {"event":"tie"}
//!   {"event":"status","data":"Opponent disconnected. Game over."}
//! ```
//!
//! Conversion to and from the logical `arena_core` messages lives here too,
//! so `json_codec` only deals with text.

use arena_core::{Board, InputMessage, Move, OutputMessage, Start, Symbol, Update, BOARD_CELLS};
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Input messages (client → server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum WireInput {
    Join,
    Move(WireMove),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMove {
    pub index: usize,
}

/// Output messages (server → client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum WireOutput {
    Start(WireStart),
    Update(WireUpdate),
    Win(WireSymbol),
    Tie,
    Status(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireSymbol {
    X,
    O,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStart {
    pub symbol: WireSymbol,
    pub turn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireUpdate {
    pub board: [Option<WireSymbol>; BOARD_CELLS],
    pub turn: bool,
}

// -----------------------------------------------------------------------------
// Conversions
// -----------------------------------------------------------------------------

impl From<Symbol> for WireSymbol {
    fn from(s: Symbol) -> Self {
        match s {
            Symbol::X => WireSymbol::X,
            Symbol::O => WireSymbol::O,
        }
    }
}

impl From<WireSymbol> for Symbol {
    fn from(s: WireSymbol) -> Self {
        match s {
            WireSymbol::X => Symbol::X,
            WireSymbol::O => Symbol::O,
        }
    }
}

impl From<WireInput> for InputMessage {
    fn from(w: WireInput) -> Self {
        match w {
            WireInput::Join => InputMessage::Join,
            WireInput::Move(m) => InputMessage::Move(Move { index: m.index }),
        }
    }
}

impl TryFrom<&InputMessage> for WireInput {
    type Error = ProtocolError;

    fn try_from(msg: &InputMessage) -> Result<Self, Self::Error> {
        match msg {
            InputMessage::Join => Ok(WireInput::Join),
            InputMessage::Move(m) => Ok(WireInput::Move(WireMove { index: m.index })),
            InputMessage::Disconnect => Err(ProtocolError::NotOnWire("disconnect")),
        }
    }
}

impl From<&OutputMessage> for WireOutput {
    fn from(msg: &OutputMessage) -> Self {
        match msg {
            OutputMessage::Start(s) => WireOutput::Start(WireStart {
                symbol: s.symbol.into(),
                turn: s.turn,
            }),
            OutputMessage::Update(u) => WireOutput::Update(WireUpdate {
                board: (*u.board.cells()).map(|cell| cell.map(WireSymbol::from)),
                turn: u.turn,
            }),
            OutputMessage::Win(s) => WireOutput::Win((*s).into()),
            OutputMessage::Tie => WireOutput::Tie,
            OutputMessage::Status(text) => WireOutput::Status(text.clone()),
        }
    }
}

impl From<WireOutput> for OutputMessage {
    fn from(w: WireOutput) -> Self {
        match w {
            WireOutput::Start(s) => OutputMessage::Start(Start {
                symbol: s.symbol.into(),
                turn: s.turn,
            }),
            WireOutput::Update(u) => OutputMessage::Update(Update {
                board: Board::from_cells(u.board.map(|cell| cell.map(Symbol::from))),
                turn: u.turn,
            }),
            WireOutput::Win(s) => OutputMessage::Win(s.into()),
            WireOutput::Tie => OutputMessage::Tie,
            WireOutput::Status(text) => OutputMessage::Status(text),
        }
    }
}
