//! Run phases and the timers that move a run between them.

use std::time::Duration;

use wave_arena_core::{Hud, RunState};

/// Lifecycle of a combat run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RunPhase {
    /// Waiting for simulated participants to gather.
    Lobby { participants: u32 },
    /// Wave combat.
    Active,
    /// Boss-slain banner is showing.
    BossSlainDisplay { remaining: Duration },
    /// Quiet period before the wave after a boss.
    PostBossPause { remaining: Duration },
    /// Death message is showing.
    PlayerDead { remaining: Duration },
    /// Terminal state.
    Finished,
}

/// Outcome of advancing a timed phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PhaseTimer {
    Running,
    Elapsed,
}

impl RunPhase {
    pub(crate) fn run_state(self) -> RunState {
        match self {
            Self::Lobby { .. } => RunState::Lobby,
            Self::Active => RunState::Active,
            Self::BossSlainDisplay { .. } | Self::PostBossPause { .. } => RunState::BossSequence,
            Self::PlayerDead { .. } => RunState::Dead,
            Self::Finished => RunState::Finished,
        }
    }

    /// Counts down the phase timer, if the phase has one.
    pub(crate) fn advance(&mut self, dt: Duration) -> PhaseTimer {
        let remaining = match self {
            Self::BossSlainDisplay { remaining }
            | Self::PostBossPause { remaining }
            | Self::PlayerDead { remaining } => remaining,
            Self::Lobby { .. } | Self::Active | Self::Finished => return PhaseTimer::Running,
        };
        *remaining = remaining.saturating_sub(dt);
        if remaining.is_zero() {
            PhaseTimer::Elapsed
        } else {
            PhaseTimer::Running
        }
    }

    /// Writes the phase-specific banners into the HUD.
    pub(crate) fn fill_hud(self, hud: &mut Hud) {
        match self {
            Self::Lobby { participants } => hud.lobby_participants = Some(participants),
            Self::BossSlainDisplay { remaining } => hud.boss_slain_banner = Some(remaining),
            Self::PostBossPause { remaining } => hud.next_wave_in = Some(remaining),
            Self::PlayerDead { remaining } => hud.death_message = Some(remaining),
            Self::Active | Self::Finished => {}
        }
    }
}
