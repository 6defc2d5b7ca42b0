//! `game.dot` codec.
//!
//! States are written as a Graphviz `digraph` with every attribute a quoted
//! string: numbers in decimal, booleans as `"0"`/`"1"`, a missing winner as
//! `""` and a card that never entered play as `entered_play="-1"`. Nodes come
//! first (game, players, zones, cards by key), then the `CURRENT_TURN` edge,
//! the `IN` edges, and finally the action edges in id order, so encoding the
//! same state always yields the same bytes.
//!
//! The decoder reads exactly what the encoder writes; it is not a general DOT
//! parser.

use rustc_hash::FxHashMap;

use crate::cards::CardInstance;
use crate::core::action::{ActionId, ActionKind, LegalAction};
use crate::core::entity::{CardKey, NodeRef, GAME_NODE};
use crate::core::graph::{GameGraph, GameNode, PlayerNode};
use crate::core::player::{PlayerId, PlayerMap};
use crate::error::{EngineError, Result};
use crate::zones::ZoneRef;

const CURRENT_TURN: &str = "CURRENT_TURN";
const IN: &str = "IN";

fn quote(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

fn flag(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

fn write_stmt(out: &mut String, from: &str, to: Option<&str>, attrs: &[(&str, String)]) {
    out.push_str("  ");
    quote(out, from);
    if let Some(to) = to {
        out.push_str(" -> ");
        quote(out, to);
    }
    out.push_str(" [");
    for (i, (k, v)) in attrs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(k);
        out.push('=');
        quote(out, v);
    }
    out.push_str("];\n");
}

/// Serialize a graph.
#[must_use]
pub fn encode(graph: &GameGraph) -> String {
    let mut out = String::from("digraph game {\n");

    let game = &graph.game;
    write_stmt(
        &mut out,
        GAME_NODE,
        None,
        &[
            ("type", "Game".into()),
            ("turn", game.turn.to_string()),
            ("game_over", flag(game.game_over).into()),
            ("winner", game.winner.map(|w| w.to_string()).unwrap_or_default()),
        ],
    );

    for (player, node) in graph.players.iter() {
        write_stmt(
            &mut out,
            &player.to_string(),
            None,
            &[
                ("type", "Player".into()),
                ("lore", node.lore.to_string()),
                ("ink_drops", node.ink_drops.to_string()),
                ("ink_total", node.ink_total.to_string()),
                ("ink_available", node.ink_available.to_string()),
            ],
        );
    }

    for zone in ZoneRef::all() {
        write_stmt(
            &mut out,
            &zone.to_string(),
            None,
            &[
                ("type", "Zone".into()),
                ("kind", zone.kind.to_string()),
                ("owner", zone.owner.to_string()),
            ],
        );
    }

    for (card, _) in graph.cards() {
        write_stmt(
            &mut out,
            card.key.as_str(),
            None,
            &[
                ("type", "Card".into()),
                ("card_id", card.card_id.to_string()),
                ("label", card.label.clone()),
                ("tapped", flag(card.tapped).into()),
                ("damage", card.damage.to_string()),
                (
                    "entered_play",
                    card.entered_play.map_or_else(|| "-1".to_string(), |t| t.to_string()),
                ),
            ],
        );
    }

    write_stmt(
        &mut out,
        GAME_NODE,
        Some(&graph.current_turn().to_string()),
        &[("label", CURRENT_TURN.into())],
    );

    for (card, zone) in graph.cards() {
        write_stmt(
            &mut out,
            card.key.as_str(),
            Some(&zone.to_string()),
            &[("label", IN.into())],
        );
    }

    for action in graph.actions() {
        write_stmt(
            &mut out,
            &action.source.to_string(),
            Some(&action.dest.to_string()),
            &[
                ("action_type", action.kind.to_string()),
                ("action_id", action.id.to_string()),
                ("label", action.description.clone()),
            ],
        );
    }

    out.push_str("}\n");
    out
}

/// One parsed statement.
struct Stmt {
    from: String,
    to: Option<String>,
    attrs: FxHashMap<String, String>,
}

impl Stmt {
    fn attr(&self, key: &str) -> Result<&str> {
        self.attrs
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| EngineError::parse(format!("'{}' has no attribute '{key}'", self.from)))
    }

    fn num<T: std::str::FromStr>(&self, key: &str) -> Result<T> {
        let raw = self.attr(key)?;
        raw.parse()
            .map_err(|_| EngineError::parse(format!("'{}': bad {key} '{raw}'", self.from)))
    }

    fn flag(&self, key: &str) -> Result<bool> {
        match self.attr(key)? {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(EngineError::parse(format!("'{}': bad {key} '{other}'", self.from))),
        }
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(EngineError::parse(format!("expected '{token}' at '{}'", self.rest)))
        }
    }

    fn quoted(&mut self) -> Result<String> {
        self.expect("\"")?;
        let rest = self.rest;
        let mut out = String::new();
        let mut chars = rest.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.rest = &rest[i + 1..];
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => out.push(escaped),
                    None => break,
                },
                _ => out.push(c),
            }
        }
        Err(EngineError::parse("unterminated string"))
    }

    fn ident(&mut self) -> Result<&'a str> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(EngineError::parse(format!("expected identifier at '{}'", self.rest)));
        }
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(ident)
    }

    fn stmt(&mut self) -> Result<Stmt> {
        let from = self.quoted()?;
        let to = if self.eat("->") { Some(self.quoted()?) } else { None };

        let mut attrs = FxHashMap::default();
        self.expect("[")?;
        if !self.eat("]") {
            loop {
                let key = self.ident()?;
                self.expect("=")?;
                attrs.insert(key.to_string(), self.quoted()?);
                if self.eat("]") {
                    break;
                }
                self.expect(",")?;
            }
        }
        self.expect(";")?;
        Ok(Stmt { from, to, attrs })
    }
}

fn parse_statements(text: &str) -> Result<Vec<Stmt>> {
    let mut cur = Cursor { rest: text };
    cur.expect("digraph")?;
    cur.ident()?;
    cur.expect("{")?;

    let mut stmts = Vec::new();
    while !cur.eat("}") {
        if cur.rest.trim().is_empty() {
            return Err(EngineError::parse("missing closing brace"));
        }
        stmts.push(cur.stmt()?);
    }
    Ok(stmts)
}

fn card_owner(key: &str) -> Result<PlayerId> {
    key.split('.')
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|_| EngineError::parse(format!("card '{key}' has no owner prefix")))
}

/// Parse a graph written by [`encode`].
pub fn decode(text: &str) -> Result<GameGraph> {
    let mut game = None;
    let mut players = PlayerMap::<Option<PlayerNode>>::default();
    let mut cards: Vec<CardInstance> = Vec::new();
    let mut current_turn = None;
    let mut locations: FxHashMap<String, ZoneRef> = FxHashMap::default();
    let mut actions = Vec::new();

    for stmt in parse_statements(text)? {
        match &stmt.to {
            None => match stmt.attr("type")? {
                "Game" => {
                    let winner = match stmt.attr("winner")? {
                        "" => None,
                        w => Some(w.parse()?),
                    };
                    game = Some(GameNode {
                        turn: stmt.num("turn")?,
                        game_over: stmt.flag("game_over")?,
                        winner,
                    });
                }
                "Player" => {
                    let player: PlayerId = stmt.from.parse()?;
                    players[player] = Some(PlayerNode {
                        lore: stmt.num("lore")?,
                        ink_drops: stmt.num("ink_drops")?,
                        ink_total: stmt.num("ink_total")?,
                        ink_available: stmt.num("ink_available")?,
                    });
                }
                "Zone" => {
                    stmt.from.parse::<ZoneRef>()?;
                }
                "Card" => {
                    let entered: i64 = stmt.num("entered_play")?;
                    let entered_play = if entered < 0 {
                        None
                    } else {
                        Some(u32::try_from(entered).map_err(|_| {
                            EngineError::parse(format!("'{}': entered_play out of range", stmt.from))
                        })?)
                    };
                    cards.push(CardInstance {
                        key: CardKey::from_raw(stmt.from.as_str()),
                        owner: card_owner(&stmt.from)?,
                        card_id: stmt.num("card_id")?,
                        label: stmt.attr("label")?.to_string(),
                        tapped: stmt.flag("tapped")?,
                        damage: stmt.num("damage")?,
                        entered_play,
                    });
                }
                other => {
                    return Err(EngineError::parse(format!("unknown node type '{other}'")));
                }
            },
            Some(to) => {
                if let Some(kind) = stmt.attrs.get("action_type") {
                    actions.push(LegalAction {
                        id: ActionId::new(stmt.attr("action_id")?),
                        kind: kind.parse::<ActionKind>()?,
                        source: stmt.from.parse::<NodeRef>()?,
                        dest: to.parse::<NodeRef>()?,
                        description: stmt.attr("label")?.to_string(),
                    });
                    continue;
                }
                match stmt.attr("label")? {
                    CURRENT_TURN => {
                        if stmt.from != GAME_NODE || current_turn.is_some() {
                            return Err(EngineError::parse("more than one CURRENT_TURN edge"));
                        }
                        current_turn = Some(to.parse::<PlayerId>()?);
                    }
                    IN => {
                        let zone: ZoneRef = to.parse()?;
                        if locations.insert(stmt.from.clone(), zone).is_some() {
                            return Err(EngineError::parse(format!(
                                "card '{}' has two IN edges",
                                stmt.from
                            )));
                        }
                    }
                    other => {
                        return Err(EngineError::parse(format!("unknown edge label '{other}'")));
                    }
                }
            }
        }
    }

    let game = game.ok_or_else(|| EngineError::parse("missing game node"))?;
    let current_turn = current_turn.ok_or_else(|| EngineError::parse("missing CURRENT_TURN edge"))?;
    let players = PlayerMap::from_pair(
        players[PlayerId::P1]
            .take()
            .ok_or_else(|| EngineError::parse("missing player p1"))?,
        players[PlayerId::P2]
            .take()
            .ok_or_else(|| EngineError::parse("missing player p2"))?,
    );

    let mut placed = Vec::with_capacity(cards.len());
    for card in cards {
        let zone = locations.remove(card.key.as_str()).ok_or_else(|| {
            EngineError::parse(format!("card '{}' has no IN edge", card.key))
        })?;
        placed.push((card, zone));
    }
    if let Some(stray) = locations.keys().next() {
        return Err(EngineError::parse(format!("IN edge from unknown card '{stray}'")));
    }

    actions.sort_by(|a: &LegalAction, b: &LegalAction| {
        let ai = crate::rules::decode_index(a.id.as_str());
        let bi = crate::rules::decode_index(b.id.as_str());
        ai.cmp(&bi).then_with(|| a.id.cmp(&b.id))
    });

    GameGraph::from_parts(game, players, current_turn, placed, actions)
}
