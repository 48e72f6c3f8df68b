//! Player development and morale model.
//!
//! Short-term state (form, morale, injuries) reacts to every match and
//! matchday; long-term state (rating, age) moves once per season.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::DevelopmentConfig;
use crate::models::match_result::{MatchEvent, MatchOutcome};
use crate::models::player::{Player, MAX_ATTRIBUTE, MIN_RATING};
use crate::player::rating::overall_from_attributes;

/// What a single match did to one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MatchDevelopment {
    pub form_change: f32,
    pub morale_change: f32,
    /// Weeks out when the post-match injury roll hit
    pub injury_weeks: Option<u8>,
}

/// Apply a finished match to one squad player.
///
/// Form moves by the summed impact of the player's own events times
/// `form_impact_scale`; morale follows the outcome; an independent injury
/// roll may sideline the player for 1..=`max_injury_weeks` weeks.
pub fn apply_match_outcome(
    player: &mut Player,
    events: &[MatchEvent],
    outcome: MatchOutcome,
    config: &DevelopmentConfig,
    rng: &mut impl Rng,
) -> MatchDevelopment {
    let impact: i32 = events
        .iter()
        .filter(|e| e.player_id == player.id)
        .map(|e| e.impact as i32)
        .sum();

    let old_form = player.form;
    player.form = (player.form + impact as f32 * config.form_impact_scale).clamp(0.0, 100.0);

    let morale_delta = match outcome {
        MatchOutcome::Win => config.win_morale,
        MatchOutcome::Draw => config.draw_morale,
        MatchOutcome::Loss => config.loss_morale,
    };
    let old_morale = player.morale;
    player.morale = (player.morale + morale_delta).clamp(0.0, 100.0);

    let injury_weeks = if rng.gen_bool(config.injury_chance) {
        let weeks = rng.gen_range(1..=config.max_injury_weeks);
        player.injury_weeks = weeks;
        log::debug!("{} injured for {} week(s)", player.full_name(), weeks);
        Some(weeks)
    } else {
        None
    };

    MatchDevelopment {
        form_change: player.form - old_form,
        morale_change: player.morale - old_morale,
        injury_weeks,
    }
}

/// Weekly tick: one week of injury recovery and form decay, both floored at 0.
pub fn advance_week(player: &mut Player, config: &DevelopmentConfig) {
    player.injury_weeks = player.injury_weeks.saturating_sub(1);
    player.form = (player.form - config.weekly_form_decay).max(0.0);
}

/// Age one year and move the rating along the age curve.
///
/// | age after birthday | change                      |
/// |--------------------|-----------------------------|
/// | < 25               | +1..=3, capped at potential |
/// | 25..30             | +0..=1, capped at potential |
/// | 30..=32            | none                        |
/// | > 32               | -0..=2, floored at 40       |
///
/// Returns the rating change.
pub fn develop_for_new_season(player: &mut Player, rng: &mut impl Rng) -> f32 {
    player.age = player.age.saturating_add(1);
    let before = player.overall_rating;

    if player.age < 25 {
        let gain = rng.gen_range(1..=3) as f32;
        player.overall_rating = (before + gain).min(player.potential).max(before);
    } else if player.age < 30 {
        let gain = rng.gen_range(0..=1) as f32;
        player.overall_rating = (before + gain).min(player.potential).max(before);
    } else if player.age > 32 {
        let loss = rng.gen_range(0..=2) as f32;
        let floor = MIN_RATING.min(before);
        player.overall_rating = (before - loss).max(floor);
    }

    player.overall_rating - before
}

/// One match worth of playing data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MatchPerformance {
    /// 1-10
    pub rating: f32,
    pub minutes_played: u8,
    pub goals: u8,
    pub assists: u8,
    pub key_passes: u8,
    pub tackles: u8,
    pub interceptions: u8,
}

/// Fractional attribute growth earned from a single performance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AttributeGrowth {
    pub pace: f32,
    pub shooting: f32,
    pub passing: f32,
    pub dribbling: f32,
    pub defense: f32,
    pub physical: f32,
    pub experience: f32,
}

/// Growth from a match performance.
///
/// Base rate 0.5, boosted by how far the rating is above 6, scaled by age
/// (x1.2 under 25, x0.8 from 30). Attribute growth requires 45+ minutes.
pub fn calculate_player_growth(player: &Player, performance: &MatchPerformance) -> AttributeGrowth {
    let performance_boost = ((performance.rating - 6.0) / 4.0).max(0.0);
    let age_factor = if player.age < 25 {
        1.2
    } else if player.age < 30 {
        1.0
    } else {
        0.8
    };
    let growth = 0.5 * (1.0 + performance_boost) * age_factor;

    let mut result = AttributeGrowth { experience: growth * 10.0, ..Default::default() };
    if performance.minutes_played < 45 {
        return result;
    }

    if performance.goals > 0 {
        result.shooting = growth * 0.8;
    }
    if performance.assists > 0 {
        result.passing = growth * 0.6;
    }
    if performance.tackles > 0 || performance.interceptions > 0 {
        result.defense = growth * 0.5;
    }
    if performance.key_passes > 2 {
        result.dribbling = growth * 0.4;
    }
    result.pace = growth * 0.2;
    result.physical = growth * 0.3;
    result
}

/// Add rounded growth to the attributes and re-derive the overall rating.
pub fn apply_growth(player: &mut Player, growth: &AttributeGrowth) {
    let bump = |value: u8, delta: f32| -> u8 {
        (value as f32 + delta).round().clamp(0.0, MAX_ATTRIBUTE as f32) as u8
    };
    let a = &mut player.attributes;
    a.pace = bump(a.pace, growth.pace);
    a.shooting = bump(a.shooting, growth.shooting);
    a.passing = bump(a.passing, growth.passing);
    a.dribbling = bump(a.dribbling, growth.dribbling);
    a.defense = bump(a.defense, growth.defense);
    a.physical = bump(a.physical, growth.physical);

    let derived = overall_from_attributes(&player.attributes, player.position);
    if derived > player.overall_rating {
        player.set_overall(derived);
    }
}

/// Form drift from a 1-10 match rating: +-5 form per rating point around 6.5.
pub fn update_form_from_rating(form: f32, match_rating: f32) -> f32 {
    (form + (match_rating - 6.5) * 5.0).clamp(0.0, 100.0)
}

/// Morale drift from the result plus a personal-performance nudge.
pub fn update_morale_from_result(morale: f32, outcome: MatchOutcome, match_rating: f32) -> f32 {
    let mut change = match outcome {
        MatchOutcome::Win => 10.0,
        MatchOutcome::Draw => 0.0,
        MatchOutcome::Loss => -15.0,
    };
    if match_rating >= 7.5 {
        change += 5.0;
    } else if match_rating <= 5.5 {
        change -= 5.0;
    }
    (morale + change).clamp(0.0, 100.0)
}

/// Remaining headroom, shrinking linearly from age 18 to 33.
pub fn potential_growth(player: &Player) -> f32 {
    let remaining = player.potential - player.overall_rating;
    let age_decay = (1.0 - (player.age as f32 - 18.0) / 15.0).max(0.0);
    remaining * age_decay
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DevelopmentStatus {
    RisingStar,
    Developing,
    Plateau,
    Declining,
}

impl DevelopmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DevelopmentStatus::RisingStar => "Rising Star",
            DevelopmentStatus::Developing => "Developing",
            DevelopmentStatus::Plateau => "Plateau",
            DevelopmentStatus::Declining => "Declining",
        }
    }
}

pub fn development_status(player: &Player) -> DevelopmentStatus {
    let growth = potential_growth(player);
    if growth > 5.0 {
        DevelopmentStatus::RisingStar
    } else if growth > 2.0 {
        DevelopmentStatus::Developing
    } else if growth > 0.0 {
        DevelopmentStatus::Plateau
    } else {
        DevelopmentStatus::Declining
    }
}

/// Young improvers always get an offer; otherwise long service plus good form.
pub fn should_offer_new_contract(player: &Player, years_at_club: u32) -> bool {
    let status = development_status(player);
    if player.age < 25
        && matches!(status, DevelopmentStatus::RisingStar | DevelopmentStatus::Developing)
    {
        return true;
    }
    years_at_club >= 3 && player.form >= 70.0
}
