//! Turn-based combat resolver owned by the world for the duration of a fight.

use maze_crawl_core::{
    AttackKind, AttackTable, CombatConfig, CombatCue, CombatPhase, CombatView, Combatant, Event,
    FoeKind, Health, RejectReason, RoundOutcome,
};

#[derive(Clone, Copy, Debug)]
struct CombatActor {
    health: Health,
    max: Health,
    alive: bool,
}

impl CombatActor {
    fn with_health(health: Health) -> Self {
        Self {
            health,
            max: health,
            alive: !health.is_depleted(),
        }
    }

    fn take_damage(&mut self, amount: u32) {
        self.health = self.health.damaged_by(amount);
        if self.health.is_depleted() {
            self.alive = false;
        }
    }
}

/// Resolves one attack round at a time and tracks the explicit combat
/// sub-state gating the presentation layer.
///
/// Constructed on fight-scene entry, dropped on exit; the actors never
/// outlive the fight.
#[derive(Clone, Debug)]
pub(crate) struct CombatResolver {
    player: CombatActor,
    enemy: CombatActor,
    foe: FoeKind,
    counter_damage: u32,
    attacks: AttackTable,
    phase: CombatPhase,
}

impl CombatResolver {
    /// Spawns both combat actors from the balance configuration.
    pub(crate) fn new(config: &CombatConfig, foe: FoeKind) -> Self {
        Self {
            player: CombatActor::with_health(Health::new(config.player_health)),
            enemy: CombatActor::with_health(config.foe_health(foe)),
            foe,
            counter_damage: config.foe_damage(foe),
            attacks: config.attacks,
            phase: CombatPhase::AwaitingInput,
        }
    }

    /// Classification of the opponent being fought.
    pub(crate) fn foe(&self) -> FoeKind {
        self.foe
    }

    /// The winner once the fight has concluded.
    pub(crate) fn winner(&self) -> Option<Combatant> {
        match self.phase {
            CombatPhase::Concluded(winner) => Some(winner),
            _ => None,
        }
    }

    /// Captures an immutable snapshot of the fight for queries.
    pub(crate) fn view(&self) -> CombatView {
        CombatView {
            player_health: self.player.health,
            player_max: self.player.max,
            enemy_health: self.enemy.health,
            enemy_max: self.enemy.max,
            foe: self.foe,
            phase: self.phase,
        }
    }

    /// Resolves one full round: player attack, conditional counter-attack,
    /// outcome evaluation.
    ///
    /// A combatant whose health reaches zero mid-round deals no further
    /// damage: killing the enemy skips its counter-attack entirely.
    pub(crate) fn resolve_round(
        &mut self,
        kind: AttackKind,
        out_events: &mut Vec<Event>,
    ) -> Result<RoundOutcome, RejectReason> {
        match self.phase {
            CombatPhase::AwaitingInput => {}
            CombatPhase::AwaitingCue(_) => return Err(RejectReason::CuePending),
            CombatPhase::Concluded(_) => return Err(RejectReason::FightOver),
        }

        let spec = self.attacks.spec_for(kind);
        self.enemy.take_damage(spec.damage);
        if spec.damage > 0 {
            out_events.push(Event::AttackLanded {
                attacker: Combatant::Player,
                damage: spec.damage,
                remaining: self.enemy.health,
            });
        }

        let outcome = if !self.enemy.alive {
            out_events.push(Event::CombatantDied {
                who: Combatant::Enemy,
            });
            self.phase = CombatPhase::AwaitingCue(CombatCue::EnemyDeath);
            RoundOutcome::EnemyDead
        } else if spec.blocks_counter {
            self.phase = CombatPhase::AwaitingInput;
            if spec.damage > 0 {
                RoundOutcome::EnemyHit
            } else {
                RoundOutcome::RoundContinues
            }
        } else {
            self.resolve_counter_attack(spec.damage > 0, out_events)
        };

        out_events.push(Event::RoundResolved { outcome });
        Ok(outcome)
    }

    fn resolve_counter_attack(
        &mut self,
        player_strike_landed: bool,
        out_events: &mut Vec<Event>,
    ) -> RoundOutcome {
        let damage = self.counter_damage;
        self.player.take_damage(damage);
        if damage > 0 {
            out_events.push(Event::AttackLanded {
                attacker: Combatant::Enemy,
                damage,
                remaining: self.player.health,
            });
        }

        if !self.player.alive {
            out_events.push(Event::CombatantDied {
                who: Combatant::Player,
            });
            self.phase = CombatPhase::AwaitingCue(CombatCue::PlayerDeath);
            RoundOutcome::PlayerDead
        } else if damage > 0 {
            self.phase = CombatPhase::AwaitingCue(CombatCue::EnemyAttack);
            RoundOutcome::PlayerHit
        } else {
            self.phase = CombatPhase::AwaitingInput;
            if player_strike_landed {
                RoundOutcome::EnemyHit
            } else {
                RoundOutcome::RoundContinues
            }
        }
    }

    /// Clears the pending presentation cue reported by the adapter layer.
    ///
    /// Acknowledging a death cue concludes the fight and emits the single
    /// `FightConcluded` event for the scene director to act on.
    pub(crate) fn acknowledge(
        &mut self,
        cue: CombatCue,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectReason> {
        let pending = match self.phase {
            CombatPhase::AwaitingCue(pending) => pending,
            _ => return Err(RejectReason::CueMismatch),
        };
        if pending != cue {
            return Err(RejectReason::CueMismatch);
        }

        out_events.push(Event::CueCleared { cue });
        match cue {
            CombatCue::EnemyAttack => {
                self.phase = CombatPhase::AwaitingInput;
            }
            CombatCue::EnemyDeath => {
                self.phase = CombatPhase::Concluded(Combatant::Player);
                out_events.push(Event::FightConcluded {
                    winner: Combatant::Player,
                    foe: self.foe,
                });
            }
            CombatCue::PlayerDeath => {
                self.phase = CombatPhase::Concluded(Combatant::Enemy);
                out_events.push(Event::FightConcluded {
                    winner: Combatant::Enemy,
                    foe: self.foe,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_crawl_core::AttackSpec;

    fn config(player_health: u32, enemy_health: u32, slash_damage: u32) -> CombatConfig {
        CombatConfig {
            player_health,
            regular_health: enemy_health,
            regular_damage: 2,
            boss_health: enemy_health,
            boss_damage: 3,
            attacks: AttackTable::new(
                AttackSpec::new(1, false),
                AttackSpec::new(slash_damage, false),
                AttackSpec::new(0, true),
            ),
        }
    }

    #[test]
    fn lethal_strike_skips_the_counter_attack() {
        let mut resolver = CombatResolver::new(&config(10, 3, 5), FoeKind::Regular);
        let mut events = Vec::new();

        let outcome = resolver.resolve_round(AttackKind::Slash, &mut events);

        assert_eq!(outcome, Ok(RoundOutcome::EnemyDead));
        assert!(outcome.expect("round resolves").is_terminal());
        let view = resolver.view();
        assert_eq!(view.player_health, Health::new(10));
        assert!(view.enemy_health.is_depleted());
        assert_eq!(
            view.phase,
            CombatPhase::AwaitingCue(CombatCue::EnemyDeath)
        );
        assert!(events.iter().all(|event| !matches!(
            event,
            Event::AttackLanded {
                attacker: Combatant::Enemy,
                ..
            }
        )));
    }

    #[test]
    fn surviving_enemy_counters_and_raises_the_attack_cue() {
        let mut resolver = CombatResolver::new(&config(10, 9, 5), FoeKind::Regular);
        let mut events = Vec::new();

        let outcome = resolver.resolve_round(AttackKind::Slash, &mut events);

        assert_eq!(outcome, Ok(RoundOutcome::PlayerHit));
        assert!(!outcome.expect("round resolves").is_terminal());
        let view = resolver.view();
        assert_eq!(view.player_health, Health::new(8));
        assert_eq!(view.enemy_health, Health::new(4));
        assert_eq!(
            view.phase,
            CombatPhase::AwaitingCue(CombatCue::EnemyAttack)
        );
    }

    #[test]
    fn guard_denies_the_counter_attack() {
        let mut resolver = CombatResolver::new(&config(10, 9, 5), FoeKind::Regular);
        let mut events = Vec::new();

        let outcome = resolver.resolve_round(AttackKind::Guard, &mut events);

        assert_eq!(outcome, Ok(RoundOutcome::RoundContinues));
        let view = resolver.view();
        assert_eq!(view.player_health, Health::new(10));
        assert_eq!(view.phase, CombatPhase::AwaitingInput);
    }

    #[test]
    fn attack_is_rejected_while_a_cue_is_pending() {
        let mut resolver = CombatResolver::new(&config(10, 9, 5), FoeKind::Regular);
        let mut events = Vec::new();
        let _ = resolver
            .resolve_round(AttackKind::Slash, &mut events)
            .expect("first round resolves");

        let second = resolver.resolve_round(AttackKind::Slash, &mut events);

        assert_eq!(second, Err(RejectReason::CuePending));
    }

    #[test]
    fn mismatched_acknowledgement_is_rejected() {
        let mut resolver = CombatResolver::new(&config(10, 9, 5), FoeKind::Regular);
        let mut events = Vec::new();
        let _ = resolver
            .resolve_round(AttackKind::Slash, &mut events)
            .expect("round resolves");

        let result = resolver.acknowledge(CombatCue::EnemyDeath, &mut events);

        assert_eq!(result, Err(RejectReason::CueMismatch));
    }

    #[test]
    fn death_cue_acknowledgement_concludes_the_fight_once() {
        let mut resolver = CombatResolver::new(&config(10, 3, 5), FoeKind::Boss);
        let mut events = Vec::new();
        let _ = resolver
            .resolve_round(AttackKind::Slash, &mut events)
            .expect("lethal round resolves");

        resolver
            .acknowledge(CombatCue::EnemyDeath, &mut events)
            .expect("cue matches");

        assert_eq!(resolver.winner(), Some(Combatant::Player));
        let concluded: Vec<_> = events
            .iter()
            .filter(|event| matches!(event, Event::FightConcluded { .. }))
            .collect();
        assert_eq!(concluded.len(), 1);
        assert!(matches!(
            concluded[0],
            Event::FightConcluded {
                winner: Combatant::Player,
                foe: FoeKind::Boss,
            }
        ));

        let after = resolver.resolve_round(AttackKind::Jab, &mut events);
        assert_eq!(after, Err(RejectReason::FightOver));
    }

    #[test]
    fn player_death_concludes_with_enemy_victory() {
        let mut resolver = CombatResolver::new(&config(2, 9, 1), FoeKind::Regular);
        let mut events = Vec::new();

        let outcome = resolver.resolve_round(AttackKind::Slash, &mut events);

        assert_eq!(outcome, Ok(RoundOutcome::PlayerDead));
        resolver
            .acknowledge(CombatCue::PlayerDeath, &mut events)
            .expect("cue matches");
        assert_eq!(resolver.winner(), Some(Combatant::Enemy));
    }
}
