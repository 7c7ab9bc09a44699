use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Mutex;

use crate::core::game::{rating, CreatorType, GameRecord};

/// Hand-authored stand-in for an upstream listing row, served when the upstream
/// cannot provide a leaderboard.
#[derive(Debug)]
pub struct SampleGame {
    pub id: u64,
    pub name: &'static str,
    pub player_count: u64,
    pub up_votes: u64,
    pub down_votes: u64,
    pub visits: u64,
    pub favorited_count: u64,
    pub creator_name: &'static str,
    pub creator_type: CreatorType,
    pub genre: &'static str,
}

#[rustfmt::skip]
pub static SAMPLE_GAMES: [SampleGame; 50] = [
    SampleGame { id: 2753915549, name: "Blox Fruits", player_count: 1250000, up_votes: 4375000, down_votes: 131250, visits: 45000000000, favorited_count: 12500000, creator_name: "Gamer Robot Inc", creator_type: CreatorType::Group, genre: "RPG" },
    SampleGame { id: 3260590327, name: "Brookhaven RP", player_count: 890000, up_votes: 3430137, down_votes: 137205, visits: 35000000000, favorited_count: 9800000, creator_name: "Wolfpaq Games", creator_type: CreatorType::Group, genre: "Town and City" },
    SampleGame { id: 1962086868, name: "Tower of Hell", player_count: 450000, up_votes: 1925274, down_votes: 96263, visits: 22000000000, favorited_count: 5500000, creator_name: "YXCeptional Studios", creator_type: CreatorType::Group, genre: "Obby" },
    SampleGame { id: 1224212277, name: "Murder Mystery 2", player_count: 380000, up_votes: 1470411, down_votes: 88224, visits: 18000000000, favorited_count: 4200000, creator_name: "Nikilis", creator_type: CreatorType::User, genre: "Horror" },
    SampleGame { id: 920587237, name: "Adopt Me!", player_count: 350000, up_votes: 5250548, down_votes: 367538, visits: 32000000000, favorited_count: 15000000, creator_name: "Uplift Games", creator_type: CreatorType::Group, genre: "Town and City" },
    SampleGame { id: 286090429, name: "Arsenal", player_count: 320000, up_votes: 1330685, down_votes: 106454, visits: 8000000000, favorited_count: 3800000, creator_name: "ROLVe Community", creator_type: CreatorType::Group, genre: "FPS" },
    SampleGame { id: 606849621, name: "Jailbreak", player_count: 280000, up_votes: 1575822, down_votes: 141823, visits: 7000000000, favorited_count: 4500000, creator_name: "Badimo", creator_type: CreatorType::Group, genre: "Adventure" },
    SampleGame { id: 6065012721, name: "Doors", player_count: 250000, up_votes: 980959, down_votes: 98095, visits: 4500000000, favorited_count: 2800000, creator_name: "LSPLASH", creator_type: CreatorType::Group, genre: "Horror" },
    SampleGame { id: 4390690873, name: "Pet Simulator X", player_count: 230000, up_votes: 2170096, down_votes: 260411, visits: 15000000000, favorited_count: 6200000, creator_name: "BIG Games Pets", creator_type: CreatorType::Group, genre: "Simulator" },
    SampleGame { id: 4668397652, name: "Anime Fighting Simulator", player_count: 200000, up_votes: 735233, down_votes: 110284, visits: 3500000000, favorited_count: 2100000, creator_name: "Voldex Games", creator_type: CreatorType::Group, genre: "Fighting" },
    SampleGame { id: 2073775453, name: "King Legacy", player_count: 185000, up_votes: 665370, down_votes: 19961, visits: 3000000000, favorited_count: 1900000, creator_name: "Kingdom Studio", creator_type: CreatorType::Group, genre: "RPG" },
    SampleGame { id: 245662005, name: "Shindo Life", player_count: 170000, up_votes: 840507, down_votes: 33620, visits: 2800000000, favorited_count: 2400000, creator_name: "RELL World", creator_type: CreatorType::Group, genre: "Fighting" },
    SampleGame { id: 5642829052, name: "Da Hood", player_count: 160000, up_votes: 595644, down_votes: 29782, visits: 2500000000, favorited_count: 1700000, creator_name: "Da Hood Entertainment", creator_type: CreatorType::Group, genre: "Fighting" },
    SampleGame { id: 189707, name: "Natural Disaster Survival", player_count: 150000, up_votes: 1085781, down_votes: 65146, visits: 3200000000, favorited_count: 3100000, creator_name: "Stickmasterluke", creator_type: CreatorType::User, genre: "Survival" },
    SampleGame { id: 226620726, name: "Bee Swarm Simulator", player_count: 140000, up_votes: 875918, down_votes: 61314, visits: 2100000000, favorited_count: 2500000, creator_name: "Onett", creator_type: CreatorType::User, genre: "Simulator" },
    SampleGame { id: 1558468921, name: "Build A Boat For Treasure", player_count: 130000, up_votes: 560055, down_votes: 44804, visits: 1800000000, favorited_count: 1600000, creator_name: "Chillz Studios", creator_type: CreatorType::Group, genre: "Building" },
    SampleGame { id: 24270354, name: "Piggy", player_count: 120000, up_votes: 630192, down_votes: 56717, visits: 2000000000, favorited_count: 1800000, creator_name: "MiniToon", creator_type: CreatorType::User, genre: "Horror" },
    SampleGame { id: 192800, name: "MeepCity", player_count: 110000, up_votes: 1435329, down_votes: 143532, visits: 16000000000, favorited_count: 4100000, creator_name: "alexnewtron", creator_type: CreatorType::User, genre: "Town and City" },
    SampleGame { id: 292439477, name: "Phantom Forces", player_count: 100000, up_votes: 1015466, down_votes: 121855, visits: 4000000000, favorited_count: 2900000, creator_name: "StyLiS Studios", creator_type: CreatorType::Group, genre: "FPS" },
    SampleGame { id: 62124643, name: "Work at a Pizza Place", player_count: 95000, up_votes: 525603, down_votes: 78840, visits: 2500000000, favorited_count: 1500000, creator_name: "Dued1", creator_type: CreatorType::User, genre: "Town and City" },
    SampleGame { id: 4806019399, name: "All Star Tower Defense", player_count: 90000, up_votes: 420740, down_votes: 12622, visits: 1500000000, favorited_count: 1200000, creator_name: "All Star Tower Defense", creator_type: CreatorType::Group, genre: "Strategy" },
    SampleGame { id: 4537602097, name: "Rainbow Friends", player_count: 85000, up_votes: 332877, down_votes: 13315, visits: 1200000000, favorited_count: 950000, creator_name: "Fiddlesticks Studios", creator_type: CreatorType::Group, genre: "Horror" },
    SampleGame { id: 4988235551, name: "Combat Warriors", player_count: 80000, up_votes: 210014, down_votes: 10500, visits: 800000000, favorited_count: 600000, creator_name: "Combat Warriors Official", creator_type: CreatorType::Group, genre: "Fighting" },
    SampleGame { id: 87666387, name: "Theme Park Tycoon 2", player_count: 75000, up_votes: 385151, down_votes: 23109, visits: 2000000000, favorited_count: 1100000, creator_name: "Den_S", creator_type: CreatorType::User, genre: "Tycoon" },
    SampleGame { id: 1261754078, name: "Royale High", player_count: 70000, up_votes: 2975288, down_votes: 208270, visits: 25000000000, favorited_count: 8500000, creator_name: "callmehbob", creator_type: CreatorType::User, genre: "Roleplay" },
    SampleGame { id: 2474168535, name: "Tower Defense Simulator", player_count: 68000, up_votes: 490425, down_votes: 39234, visits: 2500000000, favorited_count: 1400000, creator_name: "Paradoxum Games", creator_type: CreatorType::Group, genre: "Strategy" },
    SampleGame { id: 1320186298, name: "Your Bizarre Adventure", player_count: 65000, up_votes: 385562, down_votes: 34700, visits: 1800000000, favorited_count: 1100000, creator_name: "Wry Studios", creator_type: CreatorType::Group, genre: "Fighting" },
    SampleGame { id: 1165772396, name: "Bedwars", player_count: 62000, up_votes: 770699, down_votes: 77069, visits: 5000000000, favorited_count: 2200000, creator_name: "Easy.gg", creator_type: CreatorType::Group, genre: "Fighting" },
    SampleGame { id: 2891968218, name: "Sonic Speed Simulator", player_count: 60000, up_votes: 298836, down_votes: 35860, visits: 1500000000, favorited_count: 850000, creator_name: "Gamefam Sonic", creator_type: CreatorType::Group, genre: "Simulator" },
    SampleGame { id: 4872321990, name: "Dragon Ball Z Final Stand", player_count: 55000, up_votes: 262973, down_votes: 39445, visits: 900000000, favorited_count: 750000, creator_name: "Pyrite Games", creator_type: CreatorType::Group, genre: "Fighting" },
    SampleGame { id: 3956818381, name: "Blade Ball", player_count: 53000, up_votes: 147110, down_votes: 4413, visits: 700000000, favorited_count: 420000, creator_name: "Wiggity", creator_type: CreatorType::Group, genre: "Fighting" },
    SampleGame { id: 4748698679, name: "Anime Adventures", player_count: 50000, up_votes: 133247, down_votes: 5329, visits: 600000000, favorited_count: 380000, creator_name: "Gomu", creator_type: CreatorType::Group, genre: "Strategy" },
    SampleGame { id: 3527629287, name: "The Strongest Battlegrounds", player_count: 48000, up_votes: 112384, down_votes: 5619, visits: 500000000, favorited_count: 320000, creator_name: "Yielding Arts", creator_type: CreatorType::Group, genre: "Fighting" },
    SampleGame { id: 17625359063, name: "Rivals", player_count: 45000, up_votes: 98521, down_votes: 5911, visits: 400000000, favorited_count: 280000, creator_name: "Nosniy Games", creator_type: CreatorType::Group, genre: "FPS" },
    SampleGame { id: 116501225, name: "Lumber Tycoon 2", player_count: 42000, up_votes: 343658, down_votes: 24056, visits: 1500000000, favorited_count: 980000, creator_name: "Defaultio", creator_type: CreatorType::User, genre: "Tycoon" },
    SampleGame { id: 5022159088, name: "Car Dealership Tycoon", player_count: 40000, up_votes: 158795, down_votes: 12703, visits: 600000000, favorited_count: 450000, creator_name: "Foxzie", creator_type: CreatorType::Group, genre: "Tycoon" },
    SampleGame { id: 194979152, name: "Retail Tycoon 2", player_count: 38000, up_votes: 182932, down_votes: 16463, visits: 800000000, favorited_count: 520000, creator_name: "Haggie125", creator_type: CreatorType::User, genre: "Tycoon" },
    SampleGame { id: 3054776683, name: "Zombie Attack", player_count: 35000, up_votes: 144069, down_votes: 14406, visits: 700000000, favorited_count: 410000, creator_name: "Mojo Studios", creator_type: CreatorType::Group, genre: "Survival" },
    SampleGame { id: 2961220862, name: "Demonfall", player_count: 33000, up_votes: 122206, down_votes: 14664, visits: 500000000, favorited_count: 350000, creator_name: "Demonfall Studio", creator_type: CreatorType::Group, genre: "RPG" },
    SampleGame { id: 379766425, name: "Bubble Gum Simulator", player_count: 30000, up_votes: 735343, down_votes: 110301, visits: 4500000000, favorited_count: 2100000, creator_name: "Rumble Studios", creator_type: CreatorType::Group, genre: "Simulator" },
    SampleGame { id: 2612480355, name: "Ninja Legends", player_count: 28000, up_votes: 245480, down_votes: 7364, visits: 1200000000, favorited_count: 700000, creator_name: "Scriptbloxian Studios", creator_type: CreatorType::Group, genre: "Simulator" },
    SampleGame { id: 3084826316, name: "Survive the Killer", player_count: 26000, up_votes: 192617, down_votes: 7704, visits: 900000000, favorited_count: 550000, creator_name: "Mojo Studios", creator_type: CreatorType::Group, genre: "Horror" },
    SampleGame { id: 5552218437, name: "World Zero", player_count: 24000, up_votes: 98754, down_votes: 4937, visits: 400000000, favorited_count: 280000, creator_name: "Red Manta Studios", creator_type: CreatorType::Group, genre: "RPG" },
    SampleGame { id: 5853179255, name: "Saber Simulator", player_count: 22000, up_votes: 217891, down_votes: 13073, visits: 1100000000, favorited_count: 620000, creator_name: "Saber Simulator", creator_type: CreatorType::Group, genre: "Simulator" },
    SampleGame { id: 2721144847, name: "A Bizarre Day", player_count: 20000, up_votes: 168028, down_votes: 11761, visits: 800000000, favorited_count: 480000, creator_name: "Rey Roblox", creator_type: CreatorType::User, genre: "Fighting" },
    SampleGame { id: 4924922222, name: "My Restaurant", player_count: 18000, up_votes: 77165, down_votes: 6173, visits: 300000000, favorited_count: 220000, creator_name: "BIG Games Restaurant", creator_type: CreatorType::Group, genre: "Tycoon" },
    SampleGame { id: 3009416287, name: "Anime Dimensions", player_count: 16000, up_votes: 108302, down_votes: 9747, visits: 500000000, favorited_count: 310000, creator_name: "Anime Dimensions Team", creator_type: CreatorType::Group, genre: "RPG" },
    SampleGame { id: 2434855916, name: "King Piece", player_count: 15000, up_votes: 133439, down_votes: 13343, visits: 600000000, favorited_count: 380000, creator_name: "Ninjetsu Studio", creator_type: CreatorType::Group, genre: "RPG" },
    SampleGame { id: 900000000049, name: "Pet Simulator Classic", player_count: 14000, up_votes: 525576, down_votes: 63069, visits: 3000000000, favorited_count: 1500000, creator_name: "BIG Games", creator_type: CreatorType::Group, genre: "Simulator" },
    SampleGame { id: 900000000050, name: "Ragdoll Engine", player_count: 12000, up_votes: 147713, down_votes: 22156, visits: 700000000, favorited_count: 420000, creator_name: "Ragdoll Engine Team", creator_type: CreatorType::Group, genre: "Sandbox" },
];

impl SampleGame {
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            rank: 0,
            id: self.id,
            place_id: self.id,
            name: self.name.to_string(),
            description: String::new(),
            player_count: self.player_count,
            up_votes: self.up_votes,
            down_votes: self.down_votes,
            rating: rating(self.up_votes, self.down_votes),
            visits: self.visits,
            favorited_count: self.favorited_count,
            creator_name: self.creator_name.to_string(),
            creator_type: self.creator_type,
            genre: self.genre.to_string(),
            age_recommendation: "All Ages".to_string(),
            thumbnail_url: String::new(),
            icon_url: String::new(),
        }
    }
}

pub fn sample_records() -> Vec<GameRecord> {
    SAMPLE_GAMES.iter().map(SampleGame::to_record).collect()
}

/// Bounded random variation of player counts, so that sample data served over
/// several refreshes does not look frozen. Each count moves by at most
/// `ratio` of its value in either direction.
pub struct Jitter {
    ratio: f64,
    rng: Mutex<StdRng>,
}

impl Jitter {
    pub fn new(ratio: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Jitter {
            ratio: ratio.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }

    pub fn none() -> Self {
        Jitter::new(0.0, Some(0))
    }

    pub fn apply(&self, games: &mut [GameRecord]) {
        if self.ratio == 0.0 {
            return;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for game in games.iter_mut() {
            let factor = 1.0 + rng.random_range(-self.ratio..=self.ratio);
            game.player_count = (game.player_count as f64 * factor).round() as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn sample_set_has_unique_named_entries() {
        assert_eq!(SAMPLE_GAMES.len(), 50);
        assert!(SAMPLE_GAMES.iter().all(|g| !g.name.is_empty()));
        assert_eq!(SAMPLE_GAMES.iter().map(|g| g.name).unique().count(), 50);
        assert_eq!(SAMPLE_GAMES.iter().map(|g| g.id).unique().count(), 50);
    }

    #[test]
    fn records_carry_derived_rating() {
        let records = sample_records();
        assert!(records.iter().all(|g| g.rating > 0 && g.rating <= 100));
        assert!(records.iter().all(|g| g.rank == 0));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let jitter = Jitter::new(0.05, Some(7));
        for _ in 0..20 {
            let mut records = sample_records();
            jitter.apply(&mut records);
            for (jittered, original) in records.iter().zip(SAMPLE_GAMES.iter()) {
                let base = original.player_count as f64;
                let count = jittered.player_count as f64;
                assert!(count >= (base * 0.95).floor(), "{} too low", jittered.name);
                assert!(count <= (base * 1.05).ceil(), "{} too high", jittered.name);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let (a, b) = (Jitter::new(0.1, Some(42)), Jitter::new(0.1, Some(42)));
        let (mut first, mut second) = (sample_records(), sample_records());
        a.apply(&mut first);
        b.apply(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_ratio_leaves_counts_untouched() {
        let mut records = sample_records();
        Jitter::none().apply(&mut records);
        assert_eq!(records, sample_records());
    }
}
