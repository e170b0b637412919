//! Writes `sample_games.csv`, a synthetic dataset in the games schema.
//!
//! A share of the rows is deliberately dirty (missing ratings, `tbd` user
//! scores, release years outside 2000–2022) so the loader's cleaning pass
//! has something to drop.

use anyhow::{Context, Result};

const PLATFORMS: [&str; 8] = ["PS2", "PS3", "PS4", "X360", "XOne", "Wii", "DS", "PC"];
const GENRES: [&str; 8] = [
    "Action", "Sports", "Shooter", "Role-Playing", "Racing", "Platform", "Puzzle", "Strategy",
];
const RATINGS: [&str; 5] = ["E", "E10+", "T", "M", "RP"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_games.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Name",
        "Platform",
        "Year_of_Release",
        "Genre",
        "NA_sales",
        "EU_sales",
        "JP_sales",
        "Other_sales",
        "Critic_Score",
        "User_Score",
        "Rating",
    ])?;

    let mut rows = 0usize;
    for game_no in 0..600 {
        let name = format!("Game {game_no:04}");
        let genre = rng.pick(&GENRES);
        let rating = rng.pick(&RATINGS);
        let year = 1996 + rng.below(29) as i32;
        let critic = 40 + rng.below(59);
        let user = (critic as f64 / 10.0 + rng.next_f64() * 2.0 - 1.0).clamp(0.0, 10.0);

        // Popular titles ship on several platforms.
        let n_platforms = 1 + rng.below(3);
        for _ in 0..n_platforms {
            let platform = rng.pick(&PLATFORMS);
            let user_score = if rng.chance(0.05) {
                "tbd".to_string()
            } else {
                format!("{user:.1}")
            };
            let rating = if rng.chance(0.08) { "" } else { rating };

            let record = [
                name.clone(),
                platform.to_string(),
                format!("{year}.0"),
                genre.to_string(),
                format!("{:.2}", rng.next_f64() * 3.0),
                format!("{:.2}", rng.next_f64() * 2.0),
                format!("{:.2}", rng.next_f64()),
                format!("{:.2}", rng.next_f64() * 0.5),
                format!("{critic}.0"),
                user_score,
                rating.to_string(),
            ];
            writer.write_record(&record)?;
            rows += 1;
        }
    }
    writer.flush().context("flushing sample CSV")?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
