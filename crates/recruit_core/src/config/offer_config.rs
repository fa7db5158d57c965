use serde::{Deserialize, Serialize};

/// CPU staff behaviour on the offer board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OfferBoardConfig {
    /// Points every staff gets per tick before prestige scaling
    pub base_action_points: u16,
    /// One extra point per this much prestige
    pub prestige_points_divisor: u8,
    pub contact_cost: u16,
    pub offer_cost: u16,
    pub max_offers_per_tick: u16,
    pub max_contacts_per_tick: u16,
    /// Board size at week 0; grows by `board_growth` over the cycle
    pub base_board_size: usize,
    pub board_growth: usize,
    /// Hard ceiling on live offers a single recruit can hold
    pub max_offers_per_recruit: usize,
    /// Outstanding offers allowed per open scholarship slot
    pub offers_per_slot: usize,
    pub offer_momentum: i32,
    pub contact_momentum: i32,
    /// Contact momentum on a recruit soft-committed elsewhere
    pub poach_momentum: i32,
    pub mirror_momentum: i32,
    pub revoke_momentum: i32,
    /// Weeks an offer must stand before it can be pulled
    pub revoke_cooldown_weeks: u16,
    /// Cold board ticks before a revocation
    pub stale_momentum_weeks: u8,
    pub extreme_offer_count: usize,
    pub elite_prestige: u8,
    pub dogpile_elite_count: usize,
    pub reach_penalty_per_star: f32,
}

impl Default for OfferBoardConfig {
    fn default() -> Self {
        Self {
            base_action_points: 6,
            prestige_points_divisor: 12,
            contact_cost: 1,
            offer_cost: 3,
            max_offers_per_tick: 3,
            max_contacts_per_tick: 8,
            base_board_size: 10,
            board_growth: 20,
            max_offers_per_recruit: 35,
            offers_per_slot: 3,
            offer_momentum: 3,
            contact_momentum: 1,
            poach_momentum: 2,
            mirror_momentum: 2,
            revoke_momentum: -2,
            revoke_cooldown_weeks: 3,
            stale_momentum_weeks: 4,
            extreme_offer_count: 28,
            elite_prestige: 80,
            dogpile_elite_count: 3,
            reach_penalty_per_star: 18.0,
        }
    }
}
