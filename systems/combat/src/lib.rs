#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Routes player fight input into combat commands, gated on the explicit
//! combat sub-state so input during cue playback is dropped rather than
//! queued.

use maze_crawl_core::{AttackKind, CombatPhase, CombatView, Command, SceneState};

/// Player intent gathered by the adapter for one fight tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatInput {
    /// Attack the player selected this tick, if any.
    pub attack: Option<AttackKind>,
    /// Whether the presentation layer finished playing the pending cue.
    pub cue_complete: bool,
}

impl CombatInput {
    /// No input this tick.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// The player selected an attack.
    #[must_use]
    pub fn attack(kind: AttackKind) -> Self {
        Self {
            attack: Some(kind),
            cue_complete: false,
        }
    }

    /// The pending cue finished playing.
    #[must_use]
    pub fn cue_complete() -> Self {
        Self {
            attack: None,
            cue_complete: true,
        }
    }
}

/// Pure system translating fight input into at most one command per tick.
#[derive(Debug, Default)]
pub struct CombatGate;

impl CombatGate {
    /// Creates a new combat input gate.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Routes the tick's input against the current combat sub-state.
    ///
    /// Attacks pass only while input is awaited; cue completions pass only
    /// while that cue is pending. Everything else is dropped, so mashed
    /// buttons during cue playback never resolve extra rounds.
    pub fn handle(
        &mut self,
        input: CombatInput,
        scene: SceneState,
        combat: Option<&CombatView>,
        out: &mut Vec<Command>,
    ) {
        if !scene.is_fight() {
            return;
        }
        let Some(view) = combat else {
            return;
        };

        match view.phase {
            CombatPhase::AwaitingInput => {
                if let Some(kind) = input.attack {
                    out.push(Command::Attack { kind });
                }
            }
            CombatPhase::AwaitingCue(cue) => {
                if input.cue_complete {
                    out.push(Command::AcknowledgeCue { cue });
                }
            }
            CombatPhase::Concluded(_) => {}
        }
    }
}
