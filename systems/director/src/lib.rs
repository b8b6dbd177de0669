#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scene direction: maps fight and maze milestones onto the commands that
//! move the game between scenes.

use maze_crawl_core::{Combatant, Command, Event, FoeKind};

/// Stateless system that reacts to scene milestones.
///
/// The world owns transition validation; the director only expresses intent,
/// so a stale or duplicate event at worst produces a rejected command.
#[derive(Debug, Default)]
pub struct Director;

impl Director {
    /// Creates a new scene director.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Translates this tick's events into scene transition commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match *event {
                Event::FightConcluded { winner, foe } => match (winner, foe) {
                    (Combatant::Player, FoeKind::Regular) => {
                        out.push(Command::ConcludeFight);
                    }
                    (Combatant::Player, FoeKind::Boss) => {
                        out.push(Command::EndGame { victory: true });
                    }
                    (Combatant::Enemy, _) => {
                        out.push(Command::EndGame { victory: false });
                    }
                },
                Event::StairsReached {
                    encounters_remaining: 0,
                    ..
                } => {
                    out.push(Command::EndGame { victory: true });
                }
                Event::BossTriggerReached { cell } => {
                    out.push(Command::BeginEncounter {
                        cell,
                        foe: FoeKind::Boss,
                    });
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_crawl_core::GridPos;

    fn direct(events: &[Event]) -> Vec<Command> {
        let mut out = Vec::new();
        Director::new().handle(events, &mut out);
        out
    }

    #[test]
    fn won_regular_fight_returns_to_the_maze() {
        let commands = direct(&[Event::FightConcluded {
            winner: Combatant::Player,
            foe: FoeKind::Regular,
        }]);
        assert_eq!(commands, vec![Command::ConcludeFight]);
    }

    #[test]
    fn won_boss_fight_ends_the_game_in_victory() {
        let commands = direct(&[Event::FightConcluded {
            winner: Combatant::Player,
            foe: FoeKind::Boss,
        }]);
        assert_eq!(commands, vec![Command::EndGame { victory: true }]);
    }

    #[test]
    fn lost_fight_ends_the_game_in_defeat() {
        for foe in [FoeKind::Regular, FoeKind::Boss] {
            let commands = direct(&[Event::FightConcluded {
                winner: Combatant::Enemy,
                foe,
            }]);
            assert_eq!(commands, vec![Command::EndGame { victory: false }]);
        }
    }

    #[test]
    fn stairs_grant_victory_only_with_no_encounters_remaining() {
        let unlocked = direct(&[Event::StairsReached {
            cell: GridPos::new(0, 4),
            encounters_remaining: 0,
        }]);
        let locked = direct(&[Event::StairsReached {
            cell: GridPos::new(0, 4),
            encounters_remaining: 1,
        }]);

        assert_eq!(unlocked, vec![Command::EndGame { victory: true }]);
        assert!(locked.is_empty());
    }

    #[test]
    fn boss_trigger_starts_a_boss_encounter_at_the_trigger_cell() {
        let cell = GridPos::new(3, 3);
        let commands = direct(&[Event::BossTriggerReached { cell }]);
        assert_eq!(
            commands,
            vec![Command::BeginEncounter {
                cell,
                foe: FoeKind::Boss,
            }]
        );
    }
}
