//! Transfer market: listings, bids and the selling club's negotiation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::player::{Player, PlayerAttributes, Position};

const FIRST_NAMES: &[&str] = &[
    "Cristiano", "Lionel", "Neymar", "Kylian", "Robert", "Erling", "Vinicius", "Jude", "Pedri",
    "Gavi", "Florian", "Declan", "Aurelien", "Jamal", "Bukayo", "Phil", "Rodri", "Sergio",
];

const MARKET_POSITIONS: &[Position] = &[
    Position::ST,
    Position::LW,
    Position::RW,
    Position::CAM,
    Position::CM,
    Position::CDM,
    Position::LB,
    Position::RB,
    Position::CB,
    Position::GK,
];

const NATIONALITIES: &[&str] = &[
    "Portugal", "Argentina", "Brazil", "France", "Germany", "Spain", "Italy", "England",
    "Netherlands", "Belgium", "Poland", "Uruguay", "Mexico",
];

const SELLING_CLUBS: &[&str] = &[
    "Northbridge United", "Eastport City", "Riverside Athletic", "Kingsford Rovers",
    "Westmoor Albion", "Harbour Town", "Realm Madrid", "Catalonia FC", "Paris Lumiere",
    "Bavaria Munich", "Turin Bianconeri", "Milano Nerazzurri",
];

/// A player listed for sale by another club.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTarget {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub age: u8,
    /// One decimal
    pub rating: f32,
    pub asking_price: f64,
    pub club: String,
    pub nationality: String,
    pub market_value: f64,
}

impl TransferTarget {
    /// The listing as a squad player.
    pub fn to_player(&self, contract_end_year: u16) -> Player {
        let (first, last) = self.name.split_once(' ').unwrap_or((self.name.as_str(), ""));
        let rating = self.rating.round().clamp(0.0, 99.0) as u8;
        Player::new(self.id, first, last, self.position, self.age, PlayerAttributes::uniform(rating))
            .with_overall(self.rating)
            .with_potential(self.rating.max(self.rating + (30.0 - self.age as f32).max(0.0) * 0.5))
            .with_contract_end(contract_end_year)
    }
}

/// 1M at rating 70, scaling with the cube of rating/70.
pub fn market_value(rating: f32) -> f64 {
    1_000_000.0 * (rating as f64 / 70.0).powi(3)
}

/// `count` listings with ids from `first_id`, most valuable first.
///
/// Ratings are uniform in [70, 100), ages 18-32, and asking prices 90-120%
/// of market value.
pub fn generate_transfer_market(count: usize, first_id: u32, rng: &mut impl Rng) -> Vec<TransferTarget> {
    let mut market: Vec<TransferTarget> = (0..count)
        .map(|i| {
            let rating: f32 = rng.gen_range(70.0..100.0);
            let value = market_value(rating);
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
            let last = FIRST_NAMES.choose(rng).copied().unwrap_or("Jones");
            TransferTarget {
                id: first_id + i as u32,
                name: format!("{first} {last}"),
                position: MARKET_POSITIONS.choose(rng).copied().unwrap_or(Position::CM),
                age: rng.gen_range(18..33),
                rating: (rating * 10.0).round() / 10.0,
                asking_price: (value * rng.gen_range(0.9..1.2)).round(),
                club: SELLING_CLUBS.choose(rng).copied().unwrap_or("Free Agent").to_string(),
                nationality: NATIONALITIES.choose(rng).copied().unwrap_or("England").to_string(),
                market_value: value.round(),
            }
        })
        .collect();

    market.sort_by(|a, b| b.market_value.total_cmp(&a.market_value));
    market
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Countered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationResponse {
    Accept,
    Reject,
    Counter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferOffer {
    pub id: u32,
    pub player_id: u32,
    pub player_name: String,
    pub from_club: String,
    pub to_club: String,
    pub offer_price: f64,
    pub asking_price: f64,
    pub status: OfferStatus,
    pub negotiation_round: u32,
    /// 150% of market value; the buyer never goes above this
    pub max_offer: f64,
}

impl TransferOffer {
    pub fn new(id: u32, target: &TransferTarget, buying_club: impl Into<String>, initial_offer: f64) -> Self {
        Self {
            id,
            player_id: target.id,
            player_name: target.name.clone(),
            from_club: target.club.clone(),
            to_club: buying_club.into(),
            offer_price: initial_offer,
            asking_price: target.asking_price,
            status: OfferStatus::Pending,
            negotiation_round: 1,
            max_offer: (target.market_value * 1.5).round(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, OfferStatus::Pending | OfferStatus::Countered)
    }
}

/// Seller's reaction: at 95% of asking it accepts 70% of the time and
/// counters otherwise; from 70% it counters; below that it rejects.
pub fn ai_negotiation_response(offer: &TransferOffer, rng: &mut impl Rng) -> NegotiationResponse {
    if offer.offer_price >= offer.asking_price * 0.95 {
        if rng.gen_bool(0.7) {
            NegotiationResponse::Accept
        } else {
            NegotiationResponse::Counter
        }
    } else if offer.offer_price >= offer.asking_price * 0.7 {
        NegotiationResponse::Counter
    } else {
        NegotiationResponse::Reject
    }
}

/// A price 30-50% of the way from the offer to the asking price.
pub fn generate_counter_offer(offer: &TransferOffer, rng: &mut impl Rng) -> f64 {
    let gap = (offer.asking_price - offer.offer_price).max(0.0);
    (offer.offer_price + gap * rng.gen_range(0.3..0.5)).round()
}

/// Apply a response. A counter needs a price; without one the offer is unchanged.
pub fn respond_to_offer(
    offer: &TransferOffer,
    response: NegotiationResponse,
    counter_price: Option<f64>,
) -> TransferOffer {
    match (response, counter_price) {
        (NegotiationResponse::Accept, _) => TransferOffer { status: OfferStatus::Accepted, ..offer.clone() },
        (NegotiationResponse::Reject, _) => TransferOffer { status: OfferStatus::Rejected, ..offer.clone() },
        (NegotiationResponse::Counter, Some(price)) => TransferOffer {
            offer_price: price.round(),
            status: OfferStatus::Countered,
            negotiation_round: offer.negotiation_round + 1,
            ..offer.clone()
        },
        (NegotiationResponse::Counter, None) => offer.clone(),
    }
}

/// One round with the selling club. Closed offers are returned as-is.
pub fn negotiate(offer: &TransferOffer, rng: &mut impl Rng) -> TransferOffer {
    if !offer.is_open() {
        return offer.clone();
    }
    let response = ai_negotiation_response(offer, rng);
    let counter = match response {
        NegotiationResponse::Counter => Some(generate_counter_offer(offer, rng)),
        _ => None,
    };
    let next = respond_to_offer(offer, response, counter);
    log::debug!(
        "offer {} for {}: {:?} at {:.0} (round {})",
        next.id,
        next.player_name,
        next.status,
        next.offer_price,
        next.negotiation_round
    );
    next
}

pub fn filter_by_position(players: &[TransferTarget], position: Position) -> Vec<&TransferTarget> {
    players.iter().filter(|p| p.position == position).collect()
}

pub fn filter_by_budget(players: &[TransferTarget], budget: f64) -> Vec<&TransferTarget> {
    players.iter().filter(|p| p.market_value <= budget).collect()
}

pub fn filter_by_rating(players: &[TransferTarget], min_rating: f32) -> Vec<&TransferTarget> {
    players.iter().filter(|p| p.rating >= min_rating).collect()
}

/// Case-insensitive match on name, club or nationality.
pub fn search_players<'a>(players: &'a [TransferTarget], query: &str) -> Vec<&'a TransferTarget> {
    let query = query.to_lowercase();
    players
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query)
                || p.club.to_lowercase().contains(&query)
                || p.nationality.to_lowercase().contains(&query)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketActivity {
    Low,
    Medium,
    High,
}

impl MarketActivity {
    pub fn bid_chance(&self) -> f64 {
        match self {
            MarketActivity::Low => 0.1,
            MarketActivity::Medium => 0.25,
            MarketActivity::High => 0.4,
        }
    }
}

/// Chances in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealLikelihood {
    pub player_accepts: u8,
    pub club_accepts: u8,
    pub deal_completes: u8,
}

/// A bid from another club for one of the managed club's players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingBid {
    pub player_id: u32,
    pub bid_amount: f64,
    /// Weekly
    pub salary: f64,
    pub contract_years: u8,
    pub likelihood: DealLikelihood,
}

/// Bids other clubs make for the squad during a window, likeliest first.
pub fn generate_incoming_bids(
    squad: &[Player],
    current_season: u16,
    activity: MarketActivity,
    rng: &mut impl Rng,
) -> Vec<IncomingBid> {
    let mut bids: Vec<IncomingBid> = Vec::new();

    for player in squad {
        if !rng.gen_bool(activity.bid_chance()) {
            continue;
        }
        let estimated_value = crate::player::stats::estimate_transfer_value(
            player.age,
            player.overall_rating,
            player.potential,
            player.contract_years_remaining(current_season),
        );
        let bid_amount = estimated_value * rng.gen_range(0.8..1.2);

        let salary_factor = if player.age < 25 {
            1.3
        } else if player.age < 30 {
            1.0
        } else {
            0.7
        };
        let salary = player.overall_rating as f64 * 2_000.0 * salary_factor;

        let player_accepts = if player.contract_years_remaining(current_season) < 1 {
            0.8
        } else if player.age < 25 {
            0.6
        } else {
            0.3
        };
        let club_accepts = if estimated_value > 0.0 { (bid_amount / estimated_value * 0.95).min(1.0) } else { 1.0 };
        let deal_completes = (player_accepts * club_accepts).min(1.0);

        bids.push(IncomingBid {
            player_id: player.id,
            bid_amount: bid_amount.round(),
            salary: salary.round(),
            contract_years: rng.gen_range(3..6),
            likelihood: DealLikelihood {
                player_accepts: (player_accepts * 100.0).round() as u8,
                club_accepts: (club_accepts * 100.0).round() as u8,
                deal_completes: (deal_completes * 100.0).round() as u8,
            },
        });
    }

    bids.sort_by(|a, b| b.likelihood.deal_completes.cmp(&a.likelihood.deal_completes));
    bids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn target(asking: f64, value: f64) -> TransferTarget {
        TransferTarget {
            id: 5001,
            name: "Erling Rodri".to_string(),
            position: Position::ST,
            age: 23,
            rating: 84.5,
            asking_price: asking,
            club: "Eastport City".to_string(),
            nationality: "Norway".to_string(),
            market_value: value,
        }
    }

    #[test]
    fn test_market_value_curve() {
        assert!((market_value(70.0) - 1_000_000.0).abs() < 1e-6);
        assert!((market_value(140.0) - 8_000_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_generate_market_sorted_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let market = generate_transfer_market(50, 10_000, &mut rng);
        assert_eq!(market.len(), 50);
        assert!(market.windows(2).all(|w| w[0].market_value >= w[1].market_value));
        for p in &market {
            assert!((10_000..10_050).contains(&p.id));
            assert!((70.0..=100.0).contains(&p.rating));
            assert!((18..33).contains(&p.age));
            assert!(p.asking_price >= (p.market_value * 0.9).floor() - 1.0);
            assert!(p.asking_price <= (p.market_value * 1.2).ceil() + 1.0);
        }
    }

    #[test]
    fn test_ai_response_thresholds() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let t = target(10_000_000.0, 9_000_000.0);

        let low = TransferOffer::new(1, &t, "Testing FC", 6_000_000.0);
        assert_eq!(ai_negotiation_response(&low, &mut rng), NegotiationResponse::Reject);

        let mid = TransferOffer::new(2, &t, "Testing FC", 8_000_000.0);
        assert_eq!(ai_negotiation_response(&mid, &mut rng), NegotiationResponse::Counter);

        let high = TransferOffer::new(3, &t, "Testing FC", 9_600_000.0);
        for _ in 0..20 {
            assert_ne!(ai_negotiation_response(&high, &mut rng), NegotiationResponse::Reject);
        }
    }

    #[test]
    fn test_counter_moves_toward_asking() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let t = target(10_000_000.0, 9_000_000.0);
        let offer = TransferOffer::new(1, &t, "Testing FC", 8_000_000.0);
        for _ in 0..20 {
            let counter = generate_counter_offer(&offer, &mut rng);
            assert!((8_600_000.0..=9_000_000.0).contains(&counter));
        }

        let countered = respond_to_offer(&offer, NegotiationResponse::Counter, Some(8_800_000.0));
        assert_eq!(countered.status, OfferStatus::Countered);
        assert_eq!(countered.negotiation_round, 2);
        assert_eq!(countered.offer_price, 8_800_000.0);
        assert_eq!(respond_to_offer(&offer, NegotiationResponse::Counter, None), offer);
        assert_eq!(offer.max_offer, 13_500_000.0);
    }

    #[test]
    fn test_negotiate_closed_offer_is_unchanged() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let t = target(10_000_000.0, 9_000_000.0);
        let offer = TransferOffer::new(1, &t, "Testing FC", 1_000_000.0);
        let rejected = negotiate(&offer, &mut rng);
        assert_eq!(rejected.status, OfferStatus::Rejected);
        assert_eq!(negotiate(&rejected, &mut rng), rejected);
    }

    #[test]
    fn test_filters_and_search() {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let market = generate_transfer_market(40, 1, &mut rng);
        assert!(filter_by_position(&market, Position::GK).iter().all(|p| p.position == Position::GK));
        assert!(filter_by_budget(&market, 2_000_000.0).iter().all(|p| p.market_value <= 2_000_000.0));
        assert!(filter_by_rating(&market, 90.0).iter().all(|p| p.rating >= 90.0));

        let listed = vec![target(1.0, 1.0)];
        assert_eq!(search_players(&listed, "eastport").len(), 1);
        assert_eq!(search_players(&listed, "NORWAY").len(), 1);
        assert!(search_players(&listed, "madrid").is_empty());
    }

    #[test]
    fn test_to_player_keeps_identity() {
        let player = target(1.0, 1.0).to_player(2028);
        assert_eq!(player.id, 5001);
        assert_eq!(player.first_name, "Erling");
        assert_eq!(player.last_name, "Rodri");
        assert_eq!(player.overall_rating, 84.5);
        assert!(player.potential >= player.overall_rating);
        assert_eq!(player.contract_end_year, 2028);
    }

    #[test]
    fn test_incoming_bids_sorted() {
        let squad: Vec<Player> = (1..=30)
            .map(|id| {
                Player::new(id, "Squad", "Player", Position::CM, 20 + (id % 15) as u8, PlayerAttributes::uniform(72))
                    .with_contract_end(2026 + (id % 3) as u16)
            })
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let bids = generate_incoming_bids(&squad, 2025, MarketActivity::High, &mut rng);
        assert!(!bids.is_empty());
        assert!(bids.windows(2).all(|w| w[0].likelihood.deal_completes >= w[1].likelihood.deal_completes));
        assert!(bids.iter().all(|b| (3..6).contains(&b.contract_years) && b.likelihood.deal_completes <= 100));
    }
}
