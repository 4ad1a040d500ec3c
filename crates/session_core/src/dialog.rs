//! Conversation state machine.
//!
//! One key press advances exactly one line. Closing a dialog evaluates the
//! NPC's on-talk event; an outcome that carries a message re-enters the
//! dialog as a one-shot system line with no further chaining.

use crate::entity::{Npc, NpcId, Player};
use crate::events::{self, EventOutcome};
use crate::movement;
use crate::present::Presenter;
use data_runtime::map::WarpSpec;
use grid_core::MapGrid;

#[derive(Debug)]
enum State {
    Idle,
    Active {
        npc: NpcId,
        line: usize,
        /// One-shot system message shown after the on-talk event; the next
        /// press closes unconditionally.
        system: bool,
        /// Warp requested by the on-talk event, delivered on close.
        pending_warp: Option<WarpSpec>,
    },
}

/// What one advance press did.
#[derive(Debug, PartialEq)]
pub enum DialogStep {
    Line,
    Closed { warp: Option<WarpSpec> },
}

#[derive(Debug)]
pub struct Dialog {
    state: State,
}

impl Default for Dialog {
    fn default() -> Self {
        Self { state: State::Idle }
    }
}

impl Dialog {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    #[must_use]
    pub fn active_npc(&self) -> Option<NpcId> {
        match &self.state {
            State::Active { npc, .. } => Some(*npc),
            State::Idle => None,
        }
    }

    /// Open a conversation: face the pair toward each other and show the
    /// first line. Rejected while another dialog is active or when the NPC
    /// has nothing to say.
    pub fn start(&mut self, npc: &mut Npc, player: &mut Player, hud: &mut dyn Presenter) -> bool {
        if self.is_active() || npc.lines.is_empty() {
            return false;
        }
        player
            .mover
            .face(movement::yaw_toward(player.mover.pos, npc.pos));
        npc.yaw = movement::yaw_toward(npc.pos, player.mover.pos);
        hud.show_dialog(&npc.name, &npc.lines[0]);
        self.state = State::Active {
            npc: npc.id,
            line: 0,
            system: false,
            pending_warp: None,
        };
        true
    }

    /// Advance one line, closing past the end. `npc` must be the NPC this
    /// dialog was started with. Returns `None` when no dialog is active.
    pub fn advance(
        &mut self,
        npc: &mut Npc,
        player: &mut Player,
        grid: &mut MapGrid,
        hud: &mut dyn Presenter,
    ) -> Option<DialogStep> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        match state {
            State::Idle => None,
            State::Active {
                system: true,
                pending_warp,
                ..
            } => {
                hud.hide_dialog();
                Some(DialogStep::Closed { warp: pending_warp })
            }
            State::Active {
                npc: id,
                line,
                system: false,
                pending_warp,
            } => {
                let next = line + 1;
                if next < npc.lines.len() {
                    hud.show_dialog(&npc.name, &npc.lines[next]);
                    self.state = State::Active {
                        npc: id,
                        line: next,
                        system: false,
                        pending_warp,
                    };
                    Some(DialogStep::Line)
                } else {
                    Some(self.close(id, npc, player, grid, hud))
                }
            }
        }
    }

    /// Run the on-talk event and either surface its message as a system
    /// line or finish the conversation.
    fn close(
        &mut self,
        id: NpcId,
        npc: &mut Npc,
        player: &mut Player,
        grid: &mut MapGrid,
        hud: &mut dyn Presenter,
    ) -> DialogStep {
        let Some(ev) = npc.talk_event.as_mut() else {
            hud.hide_dialog();
            return DialogStep::Closed { warp: None };
        };
        let (message, warp) = match events::evaluate(ev, player, grid) {
            EventOutcome::Applied { message, warp } => (message, warp),
            EventOutcome::Failed { message } => (message, None),
            EventOutcome::Inert => (None, None),
        };
        if let Some(msg) = message {
            hud.show_dialog(&npc.name, &msg);
            self.state = State::Active {
                npc: id,
                line: 0,
                system: true,
                pending_warp: warp,
            };
            DialogStep::Line
        } else {
            hud.hide_dialog();
            DialogStep::Closed { warp }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::RecordingPresenter;
    use data_runtime::map::{EventKind, EventSpec, FlagSetSpec, NpcSpec, TriggerKind};
    use data_runtime::player::PlayerSpec;
    use grid_core::GridPos;

    fn player() -> Player {
        let spec = PlayerSpec {
            name: "Wren".into(),
            asset: String::new(),
            hp: 100,
            max_hp: 100,
            attack: 15,
            defense: 3,
            level: 1,
            xp: 0,
            next_xp: 100,
        };
        Player::from_spec(&spec, GridPos::new(1, 1), 0.0, 2.0)
    }

    fn npc_with_gift() -> Npc {
        Npc::from_spec(
            NpcId(0),
            &NpcSpec {
                name: "Maren".into(),
                x: 1,
                z: 2,
                asset: String::new(),
                lines: vec!["Hail.".into(), "The gate is sealed.".into()],
                talk_event: Some(EventSpec {
                    x: 0,
                    z: 0,
                    kind: EventKind::SetFlag,
                    trigger: TriggerKind::Action,
                    condition: None,
                    action: Some(FlagSetSpec {
                        flag: "gate_key".into(),
                        value: "true".into(),
                    }),
                    warp_to: None,
                    message: Some("Take this key.".into()),
                    failure: None,
                    once: true,
                }),
            },
        )
    }

    #[test]
    fn lines_then_system_message_then_close() {
        let mut grid = MapGrid::from_rows(4, 4, &vec![vec![0u8; 4]; 4]).unwrap();
        let mut p = player();
        let mut npc = npc_with_gift();
        let mut hud = RecordingPresenter::default();
        let mut d = Dialog::default();

        assert!(d.start(&mut npc, &mut p, &mut hud));
        assert!(!d.start(&mut npc, &mut p, &mut hud));
        assert_eq!(hud.dialog.as_ref().unwrap().1, "Hail.");

        assert_eq!(
            d.advance(&mut npc, &mut p, &mut grid, &mut hud),
            Some(DialogStep::Line)
        );
        assert_eq!(hud.dialog.as_ref().unwrap().1, "The gate is sealed.");

        // Past the last line: on-talk event fires and its message becomes a
        // one-shot system line.
        assert_eq!(
            d.advance(&mut npc, &mut p, &mut grid, &mut hud),
            Some(DialogStep::Line)
        );
        assert_eq!(hud.dialog.as_ref().unwrap().1, "Take this key.");
        assert!(p.flags.check("gate_key", "true"));
        assert!(d.is_active());

        assert_eq!(
            d.advance(&mut npc, &mut p, &mut grid, &mut hud),
            Some(DialogStep::Closed { warp: None })
        );
        assert!(!d.is_active());
        assert!(hud.dialog.is_none());
    }

    #[test]
    fn spent_once_talk_event_closes_without_system_line() {
        let mut grid = MapGrid::from_rows(4, 4, &vec![vec![0u8; 4]; 4]).unwrap();
        let mut p = player();
        let mut npc = npc_with_gift();
        let mut hud = RecordingPresenter::default();
        let mut d = Dialog::default();

        // First full pass spends the once-event.
        d.start(&mut npc, &mut p, &mut hud);
        for _ in 0..3 {
            d.advance(&mut npc, &mut p, &mut grid, &mut hud);
        }
        assert!(!d.is_active());

        // Second conversation: lines replay, but the event is inert and the
        // dialog closes straight away.
        d.start(&mut npc, &mut p, &mut hud);
        d.advance(&mut npc, &mut p, &mut grid, &mut hud);
        assert_eq!(
            d.advance(&mut npc, &mut p, &mut grid, &mut hud),
            Some(DialogStep::Closed { warp: None })
        );
    }

    #[test]
    fn facing_snaps_both_parties() {
        let mut p = player();
        let mut npc = npc_with_gift();
        let mut hud = RecordingPresenter::default();
        let mut d = Dialog::default();
        d.start(&mut npc, &mut p, &mut hud);
        // NPC is at +z from the player.
        assert_eq!(movement::facing_cell(p.mover.pos, p.mover.yaw), npc.pos);
        assert_eq!(movement::facing_cell(npc.pos, npc.yaw), p.mover.pos);
    }
}
