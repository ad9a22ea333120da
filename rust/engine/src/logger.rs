use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::Card;
use crate::game::{HandResult, HandState, Side};
use crate::rules::DiscardPolicy;

/// Final cards and verdict for one side of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRecord {
    pub board: Board,
    /// Street discards followed by Fantasyland burns
    pub discards: Vec<Card>,
    pub fouled: bool,
    pub royalties: u32,
}

/// Complete record of a finished hand.
/// Serialized to JSONL format for hand history storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// RNG seed used for deck shuffling (enables deterministic replay)
    pub seed: u64,
    pub discard_policy: DiscardPolicy,
    pub fantasyland: bool,
    pub player: SideRecord,
    pub opponent: SideRecord,
    /// Player's points; the opponent scored the negation
    pub points: i32,
    /// Cards in the player's next Fantasyland deal, if earned
    #[serde(default)]
    pub next_fantasyland: Option<u8>,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl HandRecord {
    /// Builds a record from a completed hand; `None` while the hand is in progress.
    pub fn from_state(hand_id: String, state: &HandState) -> Option<Self> {
        let result: &HandResult = state.result()?;
        let side = |s: Side, fouled: bool, royalties: u32| {
            let side_state = state.side(s);
            SideRecord {
                board: side_state.board.clone(),
                discards: side_state.all_discards(),
                fouled,
                royalties,
            }
        };
        Some(Self {
            hand_id,
            seed: state.seed(),
            discard_policy: state.discard_policy(),
            fantasyland: result.fantasyland_hand,
            player: side(Side::Player, result.player.fouled, result.player.total),
            opponent: side(Side::Opponent, result.opponent.fouled, result.opponent.total),
            points: result.score.points_a,
            next_fantasyland: result.next_fantasyland.map(|t| t.cards),
            ts: None,
            meta: None,
        })
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`HandRecord`]s to a JSONL file, one line per hand.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that only hands out ids; writes are dropped.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
