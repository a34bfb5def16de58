use chrono::{Duration, NaiveDate};

use neo_grid::{RawValue, Record};

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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn round_to(v: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (v * f).round() / f
}

/// Orbit class from perihelion `q` and aphelion `big_q` distances (au).
fn orbit_class(q: f64, big_q: f64) -> &'static str {
    let a = (q + big_q) / 2.0;
    if big_q < 0.983 {
        "Atira"
    } else if a < 1.0 {
        "Aten"
    } else if q < 1.017 {
        "Apollo"
    } else {
        "Amor"
    }
}

fn main() {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let first_day = NaiveDate::from_ymd_opt(1898, 8, 13).expect("valid date");
    let span_days = 45_000;
    let letters: Vec<char> = ('A'..='Z').filter(|c| *c != 'I').collect();

    let mut records = Vec::new();
    for n in 0..500 {
        let offset = (rng.next_f64() * span_days as f64) as i64;
        let discovered = first_day + Duration::days(offset);

        let half = letters[(rng.next_u64() % letters.len() as u64) as usize];
        let letter = letters[(rng.next_u64() % letters.len() as u64) as usize];
        let designation = format!("({} {half}{letter}{})", discovered.format("%Y"), n % 100);

        let q = rng.uniform(0.1, 1.3);
        let big_q = q + rng.uniform(0.2, 4.0);
        let a: f64 = (q + big_q) / 2.0;
        let h_mag = rng.uniform(14.0, 28.0);
        let moid = rng.uniform(0.0, 0.5) * q;
        let pha = if moid <= 0.05 && h_mag <= 22.0 { "Y" } else { "N" };

        // A few records without a known discovery date.
        let discovery = if n % 37 == 0 {
            RawValue::Null
        } else {
            RawValue::date(discovered)
        };

        records.push(
            Record::new()
                .with("designation", designation.as_str())
                .with("discovery_date", discovery)
                .with("h_mag", round_to(h_mag, 1))
                .with("moid_au", round_to(moid, 3))
                .with("q_au_1", round_to(q, 2))
                .with("q_au_2", round_to(big_q, 2))
                .with("period_yr", round_to(a.powf(1.5), 2))
                .with("i_deg", round_to(rng.uniform(0.0, 40.0), 2))
                .with("pha", pha)
                .with("orbit_class", orbit_class(q, big_q)),
        );
    }

    let output_path = "near-earth-asteroids.json";
    let json = serde_json::to_string_pretty(&records).expect("Failed to serialize records");
    std::fs::write(output_path, json).expect("Failed to write output file");

    log::info!("generated {} records", records.len());
    println!("Wrote {} records to {output_path}", records.len());
}
